//! The exported document tree.
//!
//! An [`I18n`] node mirrors the nested shape of an i18next document: leaves
//! carry a value, interior nodes carry child nodes. [`I18nWithLocales`] is the
//! same shape with one value per locale on each leaf.
//!
//! Tree depth is bounded by construction: nodes are built from category keys
//! (bounded on import) or from documents flattened with a depth bound.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use serde::Serialize;
use serde_json::{
    Map,
    Value,
};

use super::error::ExportError;
use crate::input::document::{
    DEFAULT_MAX_DEPTH,
    flatten_with_depth,
};
use crate::locale::{
    self,
    Locale,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct I18n {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub value: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub nodes: BTreeMap<String, I18n>,
}

impl I18n {
    #[must_use]
    pub fn leaf(value: impl Into<String>) -> Self {
        Self { value: value.into(), nodes: BTreeMap::new() }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty() && self.nodes.is_empty()
    }

    /// Builds a tree from a decoded document. Empty string leaves are left
    /// out; numbers become their decimal form.
    ///
    /// # Errors
    /// The document is not an object, holds an unsupported type, or is nested
    /// deeper than the default bound.
    pub fn from_document(document: &Value) -> Result<Self, ExportError> {
        if !document.is_object() {
            return Err(ExportError::NotAMap(document.to_string()));
        }
        let mut root = Self::default();
        for path in flatten_with_depth(document, DEFAULT_MAX_DEPTH)? {
            let Some((value, segments)) = path.split_last() else { continue };
            if value.is_empty() {
                continue;
            }
            let segments: Vec<&str> = segments.iter().map(String::as_str).collect();
            root.add_node(Self::leaf(value.as_str()), &segments);
        }
        Ok(root)
    }

    /// Places `node` at `path`, creating intermediate nodes. A node already at
    /// `path` is merged with `node`, keeping its own value. An empty path
    /// merges into `self`.
    pub fn add_node(&mut self, node: Self, path: &[&str]) {
        let Some((last, parents)) = path.split_last() else {
            self.merge(node);
            return;
        };
        let mut current = self;
        for segment in parents {
            current = current.nodes.entry((*segment).to_string()).or_default();
        }
        match current.nodes.entry((*last).to_string()) {
            Entry::Occupied(mut existing) => existing.get_mut().merge(node),
            Entry::Vacant(slot) => {
                slot.insert(node);
            }
        }
    }

    /// Deep union with `other`. On conflicting values `self` wins.
    pub fn merge(&mut self, other: Self) {
        if self.value.is_empty() {
            self.value = other.value;
        }
        for (key, node) in other.nodes {
            match self.nodes.entry(key) {
                Entry::Occupied(mut existing) => existing.get_mut().merge(node),
                Entry::Vacant(slot) => {
                    slot.insert(node);
                }
            }
        }
    }

    /// Renders the tree as nested maps of strings.
    ///
    /// A node with a value renders as that string, a node without children as
    /// `""`. Children rendering as `""` or `{}` are dropped.
    #[must_use]
    pub fn to_map(&self) -> Value {
        if !self.value.is_empty() {
            return Value::String(self.value.clone());
        }
        if self.nodes.is_empty() {
            return Value::String(String::new());
        }
        let map: Map<String, Value> = self
            .nodes
            .iter()
            .map(|(key, node)| (key.clone(), node.to_map()))
            .filter(|(_, value)| !is_blank(value))
            .collect();
        Value::Object(map)
    }

    /// [`I18n::to_map`] for a root node, which must render as a map.
    ///
    /// # Errors
    /// The root node carries a value.
    pub fn to_i18next(&self) -> Result<Map<String, Value>, ExportError> {
        match self.to_map() {
            Value::Object(map) => Ok(map),
            Value::String(s) if s.is_empty() => Ok(Map::new()),
            other => Err(ExportError::NotAMap(other.to_string())),
        }
    }

    /// Copies the tree, attaching every value to `locale_id`.
    #[must_use]
    pub fn to_locale_aware(&self, locale_id: &str) -> I18nWithLocales {
        let mut node = I18nWithLocales::default();
        if !self.value.is_empty() {
            node.value.insert(locale_id.to_string(), self.value.clone());
        }
        for (key, child) in &self.nodes {
            node.nodes.insert(key.clone(), child.to_locale_aware(locale_id));
        }
        node
    }

    /// Treats each top-level key as a locale and merges the locale subtrees
    /// into one tree with per-locale values.
    ///
    /// With `locales`, each key is resolved by ID or alias and the values are
    /// keyed by locale ID; without, the key itself is used.
    ///
    /// # Errors
    /// The root carries a value, or a key does not resolve to a locale.
    pub fn merge_as_if_root_is_locale(
        &self,
        locales: Option<&[Locale]>,
    ) -> Result<I18nWithLocales, ExportError> {
        if !self.value.is_empty() {
            return Err(ExportError::RootHasValue(self.value.clone()));
        }
        let mut merged = I18nWithLocales::default();
        for (locale_key, locale_node) in &self.nodes {
            let locale_id = match locales {
                Some(locales) => locale::resolve(locales, locale_key)
                    .map(|l| l.id.as_str())
                    .ok_or_else(|| ExportError::UnknownLocale(locale_key.clone()))?,
                None => locale_key.as_str(),
            };
            for (key, node) in &locale_node.nodes {
                let aware = node.to_locale_aware(locale_id);
                match merged.nodes.entry(key.clone()) {
                    Entry::Occupied(mut existing) => existing.get_mut().merge(aware),
                    Entry::Vacant(slot) => {
                        slot.insert(aware);
                    }
                }
            }
        }
        Ok(merged)
    }
}

/// `""` or `{}`.
fn is_blank(value: &Value) -> bool {
    match value {
        Value::String(s) => s.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

/// An [`I18n`] tree whose leaves hold one value per locale ID.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct I18nWithLocales {
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub value: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub nodes: BTreeMap<String, I18nWithLocales>,
}

impl I18nWithLocales {
    /// Deep union with `other`. Values of the same locale are replaced by
    /// `other`'s.
    pub fn merge(&mut self, other: Self) {
        self.value.extend(other.value);
        for (key, node) in other.nodes {
            match self.nodes.entry(key) {
                Entry::Occupied(mut existing) => existing.get_mut().merge(node),
                Entry::Vacant(slot) => {
                    slot.insert(node);
                }
            }
        }
    }
}
