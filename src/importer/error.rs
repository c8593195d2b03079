use thiserror::Error;

use crate::input::document::FlattenError;

/// Failures that abort an import without a partial result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    #[error("Empty input")]
    EmptyDocument,

    #[error("Expected an object at the document root, found {0}")]
    NotAnObject(&'static str),

    #[error("base.{0} is required")]
    MissingBaseField(&'static str),

    #[error("No locales")]
    NoLocales,

    #[error("No locale matches '{segment}' for path '{path}'")]
    UnresolvedLocale { segment: String, path: String },

    #[error("Path '{0}' has no value")]
    IncompletePath(String),

    #[error(transparent)]
    Flatten(#[from] FlattenError),

    #[error("Failed to build the variable pattern: {0}")]
    Pattern(String),
}

impl From<regex::Error> for ImportError {
    fn from(error: regex::Error) -> Self {
        Self::Pattern(error.to_string())
    }
}
