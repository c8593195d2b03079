//! Non-fatal import diagnostics.

use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WarningLevel {
    Minor,
    Major,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WarningKind {
    TranslationVariable,
    TranslationReference,
}

/// A problem found while importing one value. Warnings never stop an import.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Warning {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    pub level: WarningLevel,
    pub kind: WarningKind,
}

impl Warning {
    #[must_use]
    pub fn new(message: impl Into<String>, kind: WarningKind, level: WarningLevel) -> Self {
        Self { message: message.into(), error: None, details: None, level, kind }
    }

    /// A minor warning about variable inference.
    #[must_use]
    pub fn variable(message: impl Into<String>) -> Self {
        Self::new(message, WarningKind::TranslationVariable, WarningLevel::Minor)
    }

    /// A minor warning about reference inference.
    #[must_use]
    pub fn reference(message: impl Into<String>) -> Self {
        Self::new(message, WarningKind::TranslationReference, WarningLevel::Minor)
    }

    #[must_use]
    pub fn with_error(mut self, error: &impl std::error::Error) -> Self {
        self.error = Some(error.to_string());
        self
    }

    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }
}
