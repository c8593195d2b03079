use thiserror::Error;

use crate::input::document::FlattenError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExportError {
    #[error("The locale-key was empty for locale {locale_id}")]
    EmptyLocaleKey { locale_id: String },

    #[error("Expected the root node to render as a map, but it holds the value '{0}'")]
    NotAMap(String),

    #[error("Did not expect a value in the root node: '{0}'")]
    RootHasValue(String),

    #[error("Failed to look up locale-id for locale-key: {0}")]
    UnknownLocale(String),

    #[error(transparent)]
    Flatten(#[from] FlattenError),
}
