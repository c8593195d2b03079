use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::input::document::DEFAULT_MAX_DEPTH;
use crate::interpolation::{
    MarkerSet,
    TokenKind,
};
use crate::locale::LocaleKey;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "interpolation.prefix")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// One numbered line per error.
fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImportExportSettings {
    pub interpolation: InterpolationSettings,

    /// Separates a translation key from its context suffix.
    pub context_separator: String,

    /// Deepest object nesting accepted in an imported document.
    pub max_depth: usize,

    pub export: ExportSettings,
}

impl Default for ImportExportSettings {
    fn default() -> Self {
        Self {
            interpolation: InterpolationSettings::default(),
            context_separator: "_".to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
            export: ExportSettings::default(),
        }
    }
}

/// Marker strings of the interpolation mini-language.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InterpolationSettings {
    pub prefix: String,
    pub suffix: String,
    pub format_separator: String,
    pub nesting_prefix: String,
    pub nesting_suffix: String,
    /// Separates a nesting key from its arguments.
    /// If unset, the format separator is used for both.
    pub nesting_separator: Option<String>,
}

impl Default for InterpolationSettings {
    fn default() -> Self {
        Self {
            prefix: "{{".to_string(),
            suffix: "}}".to_string(),
            format_separator: ",".to_string(),
            nesting_prefix: "$t(".to_string(),
            nesting_suffix: ")".to_string(),
            nesting_separator: None,
        }
    }
}

impl InterpolationSettings {
    /// Markers with their field paths and token kinds.
    fn named_markers(&self) -> Vec<(&'static str, &str, TokenKind)> {
        let mut markers = vec![
            ("interpolation.prefix", self.prefix.as_str(), TokenKind::InterpolationPrefix),
            ("interpolation.suffix", self.suffix.as_str(), TokenKind::InterpolationSuffix),
            (
                "interpolation.formatSeparator",
                self.format_separator.as_str(),
                TokenKind::FormatSeparator,
            ),
            ("interpolation.nestingPrefix", self.nesting_prefix.as_str(), TokenKind::NestingPrefix),
            ("interpolation.nestingSuffix", self.nesting_suffix.as_str(), TokenKind::NestingSuffix),
        ];
        if let Some(separator) = &self.nesting_separator {
            markers.push((
                "interpolation.nestingSeparator",
                separator.as_str(),
                TokenKind::NestingSeparator,
            ));
        }
        markers
    }

    /// The lexer marker set described by these settings.
    #[must_use]
    pub fn marker_set(&self) -> MarkerSet {
        MarkerSet::new(self.named_markers().into_iter().map(|(_, marker, kind)| (marker, kind)))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportSettings {
    /// Which locale identifier names the top-level nodes.
    pub locale_key: LocaleKey,

    /// Only export these locales. Empty exports every locale.
    pub locale_filter: Vec<String>,
}

impl ImportExportSettings {
    /// # Errors
    /// - A marker or separator is empty
    /// - Two markers share the same string
    /// - `maxDepth` is zero
    /// - A locale filter entry is empty
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        let markers = self.interpolation.named_markers();
        for (index, (field, marker, _)) in markers.iter().enumerate() {
            if marker.is_empty() {
                errors.push(ValidationError::new(
                    *field,
                    "The marker cannot be empty. Please specify a marker, for example: \"{{\"",
                ));
                continue;
            }
            let duplicate =
                markers.iter().take(index).find(|(_, other, _)| other == marker).map(|(f, ..)| *f);
            if let Some(other_field) = duplicate {
                errors.push(ValidationError::new(
                    *field,
                    format!("The marker '{marker}' is already used by '{other_field}'"),
                ));
            }
        }

        if self.context_separator.is_empty() {
            errors.push(ValidationError::new(
                "contextSeparator",
                "The separator cannot be empty. Please specify a separator, for example: \"_\"",
            ));
        }

        if self.max_depth == 0 {
            errors.push(ValidationError::new("maxDepth", "The depth must be at least 1"));
        }

        for (index, filter) in self.export.locale_filter.iter().enumerate() {
            if filter.is_empty() {
                errors.push(ValidationError::new(
                    format!("export.localeFilter[{index}]"),
                    "The locale cannot be empty. Please specify a locale, for example: \"en\"",
                ));
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}
