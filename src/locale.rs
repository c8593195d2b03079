//! Locales and their aliases.

use serde::{
    Deserialize,
    Serialize,
};

/// A language or region target, addressable by its ID or any of its aliases.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locale {
    pub id: String,
    /// ISO-639-1 code, e.g. `en`.
    #[serde(rename = "iso_639_1")]
    pub iso639_1: String,
    /// ISO-639-2 code, e.g. `eng`.
    #[serde(rename = "iso_639_2")]
    pub iso639_2: String,
    /// ISO-639-3 code, e.g. `eng`.
    #[serde(rename = "iso_639_3")]
    pub iso639_3: String,
    /// IETF language tag, e.g. `en-US`.
    pub ietf: String,
    pub title: String,
    /// Other locales in preferred fallback order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fallbacks: Vec<String>,
}

impl Locale {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        ietf: impl Into<String>,
        iso639_1: impl Into<String>,
        iso639_2: impl Into<String>,
        iso639_3: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            iso639_1: iso639_1.into(),
            iso639_2: iso639_2.into(),
            iso639_3: iso639_3.into(),
            ietf: ietf.into(),
            title: title.into(),
            fallbacks: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_fallbacks<I, S>(mut self, fallbacks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fallbacks = fallbacks.into_iter().map(Into::into).collect();
        self
    }

    /// Identifiers in resolution order: ID, IETF, ISO-639-3, ISO-639-2,
    /// ISO-639-1.
    #[must_use]
    pub fn aliases(&self) -> [&str; 5] {
        [
            self.id.as_str(),
            self.ietf.as_str(),
            self.iso639_3.as_str(),
            self.iso639_2.as_str(),
            self.iso639_1.as_str(),
        ]
    }

    /// Whether `candidate` equals the ID or one of the aliases. Matching is
    /// exact and case-sensitive; empty aliases never match.
    #[must_use]
    pub fn matches_alias(&self, candidate: &str) -> bool {
        !candidate.is_empty() && self.aliases().contains(&candidate)
    }

    /// The locale identifier selected by `key`.
    #[must_use]
    pub fn key_for(&self, key: LocaleKey) -> &str {
        match key {
            LocaleKey::Ietf => &self.ietf,
            LocaleKey::Iso1 => &self.iso639_1,
            LocaleKey::Iso2 => &self.iso639_2,
            LocaleKey::Iso3 => &self.iso639_3,
        }
    }

    /// A small built-in locale set for bootstrapping an empty catalog.
    #[must_use]
    pub fn seed() -> Vec<Self> {
        vec![
            Self::new("en-GB", "en-GB", "en", "eng", "eng", "British")
                .with_fallbacks(["eng", "en"]),
            Self::new("en-US", "en-US", "en", "eng", "eng", "US English")
                .with_fallbacks(["eng", "en"]),
            Self::new("nb-NO", "nb-NO", "nb", "nob", "nob", "Norwegian Bokmål")
                .with_fallbacks(["nn-NO", "no", "dan", "swe", "eng"]),
            Self::new("nn-NO", "nn-NO", "nn", "nno", "nno", "Norwegian Nynorsk")
                .with_fallbacks(["nb-NO", "no", "dan", "swe", "eng"]),
        ]
    }
}

/// Returns the first locale, in list order, that `alias` identifies.
#[must_use]
pub fn resolve<'a>(locales: &'a [Locale], alias: &str) -> Option<&'a Locale> {
    locales.iter().find(|locale| locale.matches_alias(alias))
}

/// Which locale identifier is used as the top-level key on export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocaleKey {
    Ietf,
    #[default]
    Iso1,
    Iso2,
    Iso3,
}
