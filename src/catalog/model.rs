//! Catalog entities.

use std::collections::BTreeMap;
use std::fmt;

use serde::{
    Deserialize,
    Serialize,
};
use serde_json::Value;

/// Key of the category holding translations that sit directly under a locale.
pub const ROOT_CATEGORY: &str = "__root__";

/// Prefix under which older catalogs stored references among the variables.
pub const LEGACY_REFERENCE_PREFIX: &str = "_refs:";

/// Where a translation value came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreatorSource {
    #[default]
    User,
    Import,
    Seed,
}

impl fmt::Display for CreatorSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::User => "user",
            Self::Import => "import",
            Self::Seed => "seed",
        })
    }
}

/// Identity and ownership shared by everything created in a project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub created_by: String,
    pub organization_id: String,
}

impl Project {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        created_by: impl Into<String>,
        organization_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            created_by: created_by.into(),
            organization_id: organization_id.into(),
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

/// A folder of translations, addressed by a dot-joined key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub key: String,
    pub title: String,
    pub project_id: String,
    pub created_by: String,
    pub organization_id: String,
    /// Translations keyed by their translation key.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub translations: BTreeMap<String, Translation>,
}

impl Category {
    #[must_use]
    pub fn new(key: impl Into<String>, title: impl Into<String>, base: &Project) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            project_id: base.id.clone(),
            created_by: base.created_by.clone(),
            organization_id: base.organization_id.clone(),
            translations: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.key == ROOT_CATEGORY || self.key.is_empty()
    }

    /// Path segments of the key; empty for the root category.
    #[must_use]
    pub fn path(&self) -> Vec<&str> {
        if self.is_root() { Vec::new() } else { self.key.split('.').collect() }
    }

    #[must_use]
    pub fn has_translation_for_locale(&self, locale_id: &str) -> bool {
        self.translations.values().any(|t| t.values.contains_key(locale_id))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Translation {
    pub key: String,
    pub title: String,
    /// Variables used by the values, with an example value for each.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub variables: BTreeMap<String, Value>,
    /// Keys of other translations nested into the values, with the raw
    /// arguments of the first occurrence.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub references: BTreeMap<String, Option<String>>,
    pub created_by: String,
    pub organization_id: String,
    /// Values keyed by locale ID.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub values: BTreeMap<String, TranslationValue>,
}

impl Translation {
    #[must_use]
    pub fn new(key: impl Into<String>, title: impl Into<String>, base: &Project) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            variables: BTreeMap::new(),
            references: BTreeMap::new(),
            created_by: base.created_by.clone(),
            organization_id: base.organization_id.clone(),
            values: BTreeMap::new(),
        }
    }

    /// Moves `_refs:`-prefixed variables into [`Translation::references`].
    /// An existing reference is never overwritten. Returns how many variables
    /// were moved.
    pub fn migrate_legacy_references(&mut self) -> usize {
        let legacy: Vec<String> = self
            .variables
            .keys()
            .filter(|name| name.starts_with(LEGACY_REFERENCE_PREFIX))
            .cloned()
            .collect();

        for name in &legacy {
            let Some(value) = self.variables.remove(name) else { continue };
            let key = name.strip_prefix(LEGACY_REFERENCE_PREFIX).unwrap_or(name).to_string();
            let argument = match value {
                Value::Null => None,
                Value::String(s) => Some(s),
                other => Some(other.to_string()),
            };
            self.references.entry(key).or_insert(argument);
        }

        legacy.len()
    }
}

/// One locale's rendering of a translation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationValue {
    pub locale_id: String,
    pub value: String,
    /// Alternate renderings keyed by context suffix.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub context: BTreeMap<String, String>,
    pub source: CreatorSource,
    pub created_by: String,
    pub organization_id: String,
}

impl TranslationValue {
    #[must_use]
    pub fn new(locale_id: impl Into<String>, source: CreatorSource, base: &Project) -> Self {
        Self {
            locale_id: locale_id.into(),
            value: String::new(),
            context: BTreeMap::new(),
            source,
            created_by: base.created_by.clone(),
            organization_id: base.organization_id.clone(),
        }
    }

    /// Whether `other` renders differently from `self`.
    #[must_use]
    pub fn differs_from(&self, other: &Self) -> bool {
        self.value != other.value || self.context != other.context
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use serde_json::json;

    use super::*;

    fn base() -> Project {
        Project::new("proj-1", "jim", "org-1")
    }

    #[googletest::test]
    fn test_category_path() {
        let nested = Category::new("general.form", "Form", &base());
        let root = Category::new(ROOT_CATEGORY, "Root", &base());

        assert_eq!(nested.path(), vec!["general", "form"]);
        assert_that!(root.is_root(), eq(true));
        assert_that!(root.path(), is_empty());
        assert_that!(nested.project_id, eq("proj-1"));
    }

    #[googletest::test]
    fn test_has_translation_for_locale() {
        let mut category = Category::new("general", "General", &base());
        let mut translation = Translation::new("hello", "Hello", &base());
        translation
            .values
            .insert("loc-en".to_string(), TranslationValue::new("loc-en", CreatorSource::Import, &base()));
        category.translations.insert("hello".to_string(), translation);

        assert_that!(category.has_translation_for_locale("loc-en"), eq(true));
        assert_that!(category.has_translation_for_locale("loc-no"), eq(false));
    }

    #[googletest::test]
    fn test_migrate_legacy_references() {
        let mut translation = Translation::new("meaning", "Meaning", &base());
        translation.variables.insert("count".to_string(), json!(42));
        translation.variables.insert("_refs:life".to_string(), Value::Null);
        translation.variables.insert("_refs:other".to_string(), json!("{\"a\": 1}"));
        translation.references.insert("other".to_string(), Some("kept".to_string()));

        let moved = translation.migrate_legacy_references();

        assert_that!(moved, eq(2));
        assert_eq!(translation.variables.keys().collect::<Vec<_>>(), vec!["count"]);
        assert_eq!(translation.references.get("life"), Some(&None));
        assert_eq!(translation.references.get("other"), Some(&Some("kept".to_string())));
    }

    #[googletest::test]
    fn test_creator_source_serde() {
        assert_that!(serde_json::to_string(&CreatorSource::Import).unwrap(), eq("\"import\""));
        assert_that!(CreatorSource::Seed.to_string(), eq("seed"));
    }

    #[googletest::test]
    fn test_value_differs_from() {
        let a = TranslationValue::new("loc-en", CreatorSource::Import, &base());
        let mut b = a.clone();
        b.source = CreatorSource::User;

        assert_that!(a.differs_from(&b), eq(false));
        b.context.insert("male".to_string(), "He".to_string());
        assert_that!(a.differs_from(&b), eq(true));
    }
}
