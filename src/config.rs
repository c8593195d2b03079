//! Settings for the import and export engines.
/// Settings file loader
mod loader;
/// Settings types and validation
mod types;
/// Settings resolved for a workspace
mod workspace;

pub use loader::CONFIG_FILE_NAME;
pub use types::{
    ConfigError,
    ExportSettings,
    ImportExportSettings,
    InterpolationSettings,
    ValidationError,
};
pub use workspace::WorkspaceConfig;
