//! 結合済みプロジェクトを [`I18n`] ツリーにエクスポートする

use std::collections::btree_map::Entry;

use super::error::ExportError;
use super::i18n::I18n;
use crate::catalog::{
    Category,
    ExtendedProject,
};
use crate::config::ExportSettings;
use crate::importer::key::join_key_and_context;
use crate::locale::LocaleKey;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// 最上位ノードの名前に使うロケール識別子
    pub locale_key: LocaleKey,
    /// 選択したキー・ID・別名のいずれかが含まれるロケールのみ出力する（空ならすべて）
    pub locale_filter: Vec<String>,
    /// 翻訳キーとコンテキストをつなぐ区切り文字
    pub context_separator: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            locale_key: LocaleKey::default(),
            locale_filter: Vec::new(),
            context_separator: "_".to_string(),
        }
    }
}

impl From<&ExportSettings> for ExportOptions {
    fn from(settings: &ExportSettings) -> Self {
        Self {
            locale_key: settings.locale_key,
            locale_filter: settings.locale_filter.clone(),
            ..Self::default()
        }
    }
}

impl ExportOptions {
    #[must_use]
    pub fn with_context_separator(mut self, separator: impl Into<String>) -> Self {
        self.context_separator = separator.into();
        self
    }
}

/// `project` の文書ツリーを作る
///
/// - 値を持つロケールごとに、[`ExportOptions::locale_key`] で名付けた最上位ノードを作る
/// - カテゴリはドット区切りのパスに置き、ルートカテゴリの翻訳はロケール直下に置く
/// - コンテキストは区切り文字でつないだ兄弟キーになる
///
/// # Errors
/// 出力するロケールのキーが空
pub fn export_i18n(project: &ExtendedProject, options: &ExportOptions) -> Result<I18n, ExportError> {
    let mut root = I18n::default();

    for (locale_id, extended) in project.by_locales() {
        let locale = extended.locale;
        let key = locale.key_for(options.locale_key);
        if key.is_empty() {
            return Err(ExportError::EmptyLocaleKey { locale_id: locale_id.to_string() });
        }
        if !options.locale_filter.is_empty()
            && !options.locale_filter.iter().any(|f| f == key || locale.matches_alias(f))
        {
            tracing::debug!(locale = %locale_id, "Skipping filtered locale");
            continue;
        }

        let mut locale_node = I18n::default();
        for category in &extended.categories {
            let node = category_node(category, locale_id, &options.context_separator);
            locale_node.add_node(node, &category.path());
        }

        match root.nodes.entry(key.to_string()) {
            Entry::Occupied(mut existing) => {
                tracing::warn!(
                    locale = %locale_id,
                    key = %key,
                    "Several locales export under the same key, merging"
                );
                existing.get_mut().merge(locale_node);
            }
            Entry::Vacant(slot) => {
                slot.insert(locale_node);
            }
        }
    }

    tracing::debug!(locales = root.nodes.len(), "Exported project");
    Ok(root)
}

/// `category` のうち `locale_id` の値を持つ翻訳
///
/// コンテキスト付きキーは別の翻訳のキーと重なりうる
/// （`friend` + `male` と `friend_male` + `one`）。
/// 葉はマージするので、空の値が既存の文字列を消すことはない
fn category_node(category: &Category, locale_id: &str, separator: &str) -> I18n {
    let mut node = I18n::default();
    for translation in category.translations.values() {
        let Some(value) = translation.values.get(locale_id) else { continue };
        node.add_node(I18n::leaf(value.value.as_str()), &[translation.key.as_str()]);
        for (context, rendering) in &value.context {
            let key = join_key_and_context(&translation.key, context, separator);
            node.add_node(I18n::leaf(rendering.as_str()), &[key.as_str()]);
        }
    }
    node
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;
    use serde_json::json;

    use super::*;
    use crate::catalog::{
        CreatorSource,
        Project,
        ROOT_CATEGORY,
        Translation,
        TranslationValue,
    };
    use crate::locale::Locale;

    fn base() -> Project {
        Project::new("proj-1", "jim", "org-1")
    }

    fn locales() -> Vec<Locale> {
        vec![
            Locale::new("loc-en", "en-US", "en", "eng", "eng", "English"),
            Locale::new("loc-no", "nb-NO", "nb", "nob", "nob", "Norwegian"),
        ]
    }

    fn category(key: &str, entries: &[(&str, &str, &str)]) -> Category {
        let mut category = Category::new(key, key, &base());
        for (translation_key, locale_id, text) in entries {
            let translation = category
                .translations
                .entry((*translation_key).to_string())
                .or_insert_with(|| Translation::new(*translation_key, *translation_key, &base()));
            let mut value = TranslationValue::new(*locale_id, CreatorSource::Import, &base());
            value.value = (*text).to_string();
            translation.values.insert((*locale_id).to_string(), value);
        }
        category
    }

    fn project(categories: Vec<Category>) -> ExtendedProject {
        ExtendedProject::new(base(), locales(), categories)
    }

    #[googletest::test]
    fn test_export_nests_categories_under_locales() {
        let project = project(vec![
            category("general", &[("hello", "loc-en", "Hello"), ("hello", "loc-no", "Hei")]),
            category("general.form", &[("submit", "loc-en", "Submit")]),
            category(ROOT_CATEGORY, &[("title", "loc-en", "App")]),
        ]);

        let exported = export_i18n(&project, &ExportOptions::default()).unwrap();

        assert_eq!(
            exported.to_map(),
            json!({
                "en": {
                    "title": "App",
                    "general": { "hello": "Hello", "form": { "submit": "Submit" } },
                },
                "nb": { "general": { "hello": "Hei" } },
            })
        );
    }

    #[googletest::test]
    fn test_export_context_as_sibling_keys() {
        let mut friend = category("cat", &[("friend", "loc-en", "A friend")]);
        let value = friend
            .translations
            .get_mut("friend")
            .and_then(|t| t.values.get_mut("loc-en"))
            .unwrap();
        value.context.insert("male".to_string(), "A boyfriend".to_string());

        let exported =
            export_i18n(&project(vec![friend.clone()]), &ExportOptions::default()).unwrap();
        let dashed = export_i18n(
            &project(vec![friend]),
            &ExportOptions::default().with_context_separator("-"),
        )
        .unwrap();

        assert_eq!(
            exported.to_map(),
            json!({ "en": { "cat": { "friend": "A friend", "friend_male": "A boyfriend" } } })
        );
        assert_eq!(
            dashed.to_map(),
            json!({ "en": { "cat": { "friend": "A friend", "friend-male": "A boyfriend" } } })
        );
    }

    /// `export_i18n`: 空の値がコンテキスト付きキーを上書きしない
    #[googletest::test]
    fn test_export_keeps_context_key_shadowed_by_longer_translation() {
        let mut friends = category("cat", &[
            ("friend", "loc-en", "A friend"),
            ("friend_male", "loc-en", ""),
        ]);
        for (key, context, rendering) in
            [("friend", "male", "A boyfriend"), ("friend_male", "one", "One boyfriend")]
        {
            friends
                .translations
                .get_mut(key)
                .and_then(|t| t.values.get_mut("loc-en"))
                .unwrap()
                .context
                .insert(context.to_string(), rendering.to_string());
        }

        let exported = export_i18n(&project(vec![friends]), &ExportOptions::default()).unwrap();

        assert_eq!(
            exported.to_map(),
            json!({ "en": { "cat": {
                "friend": "A friend",
                "friend_male": "A boyfriend",
                "friend_male_one": "One boyfriend",
            } } })
        );
    }

    #[rstest]
    #[case::ietf(LocaleKey::Ietf, &["en-US", "nb-NO"])]
    #[case::iso3(LocaleKey::Iso3, &["eng", "nob"])]
    fn test_export_locale_key_variant(#[case] locale_key: LocaleKey, #[case] expected: &[&str]) {
        let project = project(vec![category(
            "general",
            &[("hello", "loc-en", "Hello"), ("hello", "loc-no", "Hei")],
        )]);
        let options = ExportOptions { locale_key, ..ExportOptions::default() };

        let exported = export_i18n(&project, &options).unwrap();

        let keys: Vec<&str> = exported.nodes.keys().map(String::as_str).collect();
        assert_eq!(keys, expected);
    }

    #[googletest::test]
    fn test_export_locale_filter() {
        let project = project(vec![category(
            "general",
            &[("hello", "loc-en", "Hello"), ("hello", "loc-no", "Hei")],
        )]);
        let options =
            ExportOptions { locale_filter: vec!["nb-NO".to_string()], ..ExportOptions::default() };

        let exported = export_i18n(&project, &options).unwrap();

        let keys: Vec<&str> = exported.nodes.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["nb"]);
    }

    #[googletest::test]
    fn test_export_empty_locale_key_fails() {
        let locales = [Locale::new("loc-x", "x-X", "", "xxx", "xxx", "No ISO-1")];
        let project =
            ExtendedProject::new(base(), locales, [category("a", &[("b", "loc-x", "c")])]);

        let result = export_i18n(&project, &ExportOptions::default());

        assert_eq!(result, Err(ExportError::EmptyLocaleKey { locale_id: "loc-x".to_string() }));
    }

    /// `export_i18n`: 同じキーのロケールは最初のロケールを優先してマージする
    #[googletest::test]
    fn test_export_merges_colliding_locale_keys() {
        let locales = [
            Locale::new("loc-gb", "en-GB", "en", "eng", "eng", "British"),
            Locale::new("loc-us", "en-US", "en", "eng", "eng", "American"),
        ];
        let project = ExtendedProject::new(
            base(),
            locales,
            [category("c", &[("colour", "loc-gb", "Colour"), ("colour", "loc-us", "Color"), (
                "fall", "loc-us", "Fall",
            )])],
        );

        let exported = export_i18n(&project, &ExportOptions::default()).unwrap();

        assert_eq!(exported.to_map(), json!({ "en": { "c": { "colour": "Colour", "fall": "Fall" } } }));
    }
}
