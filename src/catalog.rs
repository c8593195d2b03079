//! Projects, categories, translations and their per-locale values.

pub mod extended;
pub mod graph;
pub mod model;

pub use extended::{
    CategoryTreeNode,
    ExtendedLocale,
    ExtendedProject,
};
pub use graph::{
    ApplySummary,
    ExtendOptions,
    ProjectGraph,
};
pub use model::{
    Category,
    CreatorSource,
    LEGACY_REFERENCE_PREFIX,
    Project,
    ROOT_CATEGORY,
    Translation,
    TranslationValue,
};
