//! i18n-interchange
//!
//! Import and export of i18next-style translation documents into a catalog of
//! categories, translations and per-locale values.

pub mod catalog;
pub mod config;
pub mod export;
pub mod importer;
pub mod input;
pub mod interpolation;
pub mod locale;

#[cfg(test)]
mod test_utils;

pub use export::{
    ExportOptions,
    I18n,
    export_i18n,
};
pub use importer::{
    Import,
    ImportOutcome,
    Importer,
    import_translations,
};
