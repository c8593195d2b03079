//! Export of catalog projects back into i18next documents.

pub mod error;
pub mod exporter;
pub mod i18n;

pub use error::ExportError;
pub use exporter::{
    ExportOptions,
    export_i18n,
};
pub use i18n::{
    I18n,
    I18nWithLocales,
};
