//! Entry point: imports a JSON document and prints its export.
//!
//! ```text
//! i18n-interchange <document.json> [locale-hint]
//! ```

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use i18n_interchange::catalog::{
    CreatorSource,
    Project,
    ProjectGraph,
};
use i18n_interchange::config::{
    ConfigError,
    WorkspaceConfig,
};
use i18n_interchange::export::{
    ExportError,
    export_i18n,
};
use i18n_interchange::importer::{
    ImportError,
    Importer,
};
use i18n_interchange::locale::{
    self,
    Locale,
};
use serde_json::Value;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Everything that ends a run early.
#[derive(Error, Debug)]
enum AppError {
    /// Missing document argument.
    #[error("Usage: i18n-interchange <document.json> [locale-hint]")]
    Usage,

    /// The hint names none of the seed locales.
    #[error("Unknown locale hint '{0}'")]
    UnknownHint(String),

    /// Reading the document or writing the output.
    #[error("I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Decoding the document or encoding the output.
    #[error("JSON failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Workspace settings.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Import.
    #[error(transparent)]
    Import(#[from] ImportError),

    /// Export.
    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Installs the stderr subscriber and runs.
fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(%error, "Aborted");
            ExitCode::FAILURE
        }
    }
}

/// Import, persist into an in-memory graph, export, print.
fn run() -> Result<(), AppError> {
    let mut args = std::env::args().skip(1);
    let path = args.next().map(PathBuf::from).ok_or(AppError::Usage)?;
    let hint_alias = args.next();

    let workspace_root = std::env::current_dir().ok();
    let config = WorkspaceConfig::load(workspace_root.as_deref())?;
    match config.source() {
        Some(source) => tracing::info!(source = %source.display(), "Using workspace settings"),
        None => tracing::info!("Using default settings"),
    }

    let locales = Locale::seed();
    let hint = match hint_alias {
        Some(alias) => {
            Some(locale::resolve(&locales, &alias).ok_or(AppError::UnknownHint(alias))?)
        }
        None => None,
    };

    let document: Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
    let base = Project::new("local", "cli", "local").with_title(path.display().to_string());

    let importer = Importer::new(config.settings())?;
    let outcome =
        importer.import_translations(&locales, hint, &base, CreatorSource::Import, &document)?;
    for warning in &outcome.warnings {
        tracing::warn!(
            kind = ?warning.kind,
            level = ?warning.level,
            error = ?warning.error,
            "{}",
            warning.message
        );
    }

    let mut graph = ProjectGraph::new(base).with_locales(locales.iter().cloned());
    let summary = graph.apply_import(&outcome.import);
    tracing::info!(?summary, "Persisted import");

    let extended = graph.extend(&config.extend_options());
    let exported = export_i18n(&extended, &config.export_options())?.to_i18next()?;

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", serde_json::to_string_pretty(&exported)?)?;
    Ok(())
}
