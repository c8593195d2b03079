//! 入れ子の i18next 文書をカタログのエンティティに取り込む
//!
//! 文書は `ロケール › カテゴリのセグメント… › 翻訳キー › 値` の形のパスに平坦化する。
//! 先頭のセグメントでロケールを決め、末尾の 2 つを翻訳キー（コンテキスト付きの場合あり）
//! と値とし、その間をドットでつないだものをカテゴリキーとする。

pub mod describe;
pub mod error;
pub mod infer;
pub mod key;
pub mod title;
pub mod warning;

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

pub use self::describe::{
    DescribeError,
    TitleChange,
    describe_titles,
};
pub use self::error::ImportError;
pub use self::infer::VariableInferrer;
pub use self::warning::{
    Warning,
    WarningKind,
    WarningLevel,
};
use crate::catalog::{
    Category,
    CreatorSource,
    Project,
    ROOT_CATEGORY,
    Translation,
    TranslationValue,
};
use crate::config::ImportExportSettings;
use crate::input::document::{
    MapPath,
    PathParts,
    flatten_with_depth,
    sort_paths,
    type_name,
};
use crate::locale::{
    self,
    Locale,
};

/// 1 つの文書から作ったカテゴリ（カテゴリキーごと）
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Import {
    pub categories: BTreeMap<String, Category>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImportOutcome {
    pub import: Import,
    pub warnings: Vec<Warning>,
}

/// 1 つの設定で文書から [`Import`] を作る
#[derive(Debug, Clone)]
pub struct Importer {
    inferrer: VariableInferrer,
    /// 翻訳キーからコンテキストを切り離す区切り文字
    context_separator: String,
    /// 平坦化の最大深さ
    max_depth: usize,
}

impl Importer {
    /// # Errors
    /// 補間マーカーから変数パターンを作れない
    pub fn new(settings: &ImportExportSettings) -> Result<Self, ImportError> {
        Ok(Self {
            inferrer: VariableInferrer::new(&settings.interpolation)?,
            context_separator: settings.context_separator.clone(),
            max_depth: settings.max_depth,
        })
    }

    /// `document` を取り込む
    ///
    /// # Arguments
    /// * `locales` - パスの先頭セグメントを ID または別名で解決する候補
    /// * `locale_hint` - 指定時は文書全体をこのロケールの値として扱う（ロケール階層なし）
    /// * `base` - 作成するエンティティの所有者情報
    /// * `source` - 値の作成元
    /// * `document` - デコード済みの文書
    ///
    /// # Returns
    /// カテゴリと警告。警告があっても取り込みは続ける
    ///
    /// # Errors
    /// 次の場合は部分的な結果を返さずに失敗する
    /// - 文書が空、またはオブジェクトでない
    /// - `base` の ID・作成者・組織が空
    /// - ロケールがない
    /// - パスが短すぎる・深すぎる、または未対応の型を含む
    /// - ロケールのセグメントを解決できない
    pub fn import_translations(
        &self,
        locales: &[Locale],
        locale_hint: Option<&Locale>,
        base: &Project,
        source: CreatorSource,
        document: &Value,
    ) -> Result<ImportOutcome, ImportError> {
        check_preconditions(locales, locale_hint, base, document)?;

        let mut paths = flatten_with_depth(document, self.max_depth)?;
        if let Some(hint) = locale_hint {
            for path in &mut paths {
                path.insert(0, hint.id.clone());
            }
        }
        sort_paths(&mut paths);
        tracing::debug!(paths = paths.len(), hint = ?locale_hint.map(|l| &l.id), "Importing document");

        let mut outcome = ImportOutcome::default();
        for path in &paths {
            self.import_path(locales, locale_hint, base, source, path, &mut outcome)?;
        }

        tracing::debug!(
            categories = outcome.import.categories.len(),
            warnings = outcome.warnings.len(),
            "Imported document"
        );
        Ok(outcome)
    }

    /// 平坦化したパス 1 つを `outcome` に反映する
    fn import_path(
        &self,
        locales: &[Locale],
        locale_hint: Option<&Locale>,
        base: &Project,
        source: CreatorSource,
        path: &MapPath,
        outcome: &mut ImportOutcome,
    ) -> Result<(), ImportError> {
        let joined = || path.join(".");
        let parts = PathParts::split(path).ok_or_else(|| ImportError::IncompletePath(joined()))?;
        let (locale_segment, category_segments) =
            parts.root.split_first().ok_or_else(|| ImportError::IncompletePath(joined()))?;

        let locale = match locale_hint {
            Some(hint) => hint,
            None => locale::resolve(locales, locale_segment).ok_or_else(|| {
                ImportError::UnresolvedLocale { segment: locale_segment.clone(), path: joined() }
            })?,
        };

        // 空のキーはルートカテゴリのみ
        let category_key = match category_segments.join(".") {
            key if key.is_empty() => ROOT_CATEGORY.to_string(),
            key => key,
        };
        let (translation_key, context) = parts
            .mid_path
            .map_or(("", None), |mid| key::split_key_and_context(mid, &self.context_separator));
        tracing::trace!(path = %joined(), locale = %locale.id, category = %category_key, "Importing value");

        let category = outcome.import.categories.entry(category_key.clone()).or_insert_with(|| {
            let last = category_segments.last().map_or("", String::as_str);
            Category::new(category_key.as_str(), title::infer_title(last), base)
        });
        let translation =
            category.translations.entry(translation_key.to_string()).or_insert_with(|| {
                Translation::new(translation_key, title::infer_title(translation_key), base)
            });
        let value = translation
            .values
            .entry(locale.id.clone())
            .or_insert_with(|| TranslationValue::new(locale.id.as_str(), source, base));
        value.source = source;
        match context {
            Some(context) => {
                value.context.insert(context.to_string(), parts.value.to_string());
            }
            None if !parts.value.is_empty() => parts.value.clone_into(&mut value.value),
            None => {}
        }

        let inferred = self.inferrer.infer(parts.value, &category_key, translation_key);
        outcome.warnings.extend(inferred.warnings);
        outcome
            .warnings
            .extend(infer::merge_variables(&mut translation.variables, inferred.variables));
        for (reference, argument) in inferred.references {
            translation.references.entry(reference).or_insert(argument);
        }
        Ok(())
    }
}

/// パスを見る前に判定できる失敗
fn check_preconditions(
    locales: &[Locale],
    locale_hint: Option<&Locale>,
    base: &Project,
    document: &Value,
) -> Result<(), ImportError> {
    match document {
        Value::Object(map) if map.is_empty() => return Err(ImportError::EmptyDocument),
        Value::Object(_) => {}
        Value::Null => return Err(ImportError::EmptyDocument),
        other => return Err(ImportError::NotAnObject(type_name(other))),
    }
    if base.id.is_empty() {
        return Err(ImportError::MissingBaseField("projectId"));
    }
    if base.created_by.is_empty() {
        return Err(ImportError::MissingBaseField("createdBy"));
    }
    if base.organization_id.is_empty() {
        return Err(ImportError::MissingBaseField("organizationId"));
    }
    if locales.is_empty() && locale_hint.is_none() {
        return Err(ImportError::NoLocales);
    }
    Ok(())
}

/// デフォルト設定で `document` を取り込む
///
/// # Errors
/// [`Importer::import_translations`] を参照
pub fn import_translations(
    locales: &[Locale],
    locale_hint: Option<&Locale>,
    base: &Project,
    source: CreatorSource,
    document: &Value,
) -> Result<ImportOutcome, ImportError> {
    Importer::new(&ImportExportSettings::default())?.import_translations(
        locales,
        locale_hint,
        base,
        source,
        document,
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;
    use serde_json::json;

    use super::*;
    use crate::test_utils::{
        base_project,
        test_locales,
    };

    fn import(document: &Value) -> Result<ImportOutcome, ImportError> {
        import_translations(&test_locales(), None, &base_project(), CreatorSource::Import, document)
    }

    #[googletest::test]
    fn test_import_builds_categories_translations_and_values() {
        let document = json!({
            "en": { "general": { "form": { "submit": "Submit {{count}} items" } } },
            "nb": { "general": { "form": { "submit": "Send {{count}} ting" } } },
        });

        let outcome = import(&document).unwrap();

        let keys: Vec<&str> = outcome.import.categories.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["general.form"]);
        let category = &outcome.import.categories["general.form"];
        assert_that!(category.title, eq("Form"));
        assert_that!(category.project_id, eq("proj-123"));
        let translation = &category.translations["submit"];
        assert_that!(translation.title, eq("Submit"));
        assert_eq!(translation.variables.get("count"), Some(&json!(42)));
        assert_that!(translation.values["loc-en"].value, eq("Submit {{count}} items"));
        assert_that!(translation.values["loc-no"].value, eq("Send {{count}} ting"));
        assert_that!(translation.values["loc-no"].source, eq(CreatorSource::Import));
        assert_that!(outcome.warnings, is_empty());
    }

    /// `import_translations`: 末尾の区切り文字以降をコンテキストとして分離する
    #[googletest::test]
    fn test_import_splits_context() {
        let document = json!({ "en": { "cat": {
            "friend": "A friend",
            "friend_male": "A boyfriend",
            "_private": "Hidden",
        } } });

        let outcome = import(&document).unwrap();

        let translations = &outcome.import.categories["cat"].translations;
        let friend = &translations["friend"].values["loc-en"];
        assert_that!(friend.value, eq("A friend"));
        assert_eq!(friend.context.get("male").map(String::as_str), Some("A boyfriend"));
        assert_that!(translations.contains_key("_private"), eq(true));
    }

    #[googletest::test]
    fn test_import_context_only_value_stays_empty() {
        let document = json!({ "en": { "cat": { "friend_male": "A boyfriend" } } });

        let outcome = import(&document).unwrap();

        let value = &outcome.import.categories["cat"].translations["friend"].values["loc-en"];
        assert_that!(value.value, eq(""));
        assert_that!(value.context.len(), eq(1));
    }

    /// `import_translations`: カテゴリのないパスはルートカテゴリに入る
    #[googletest::test]
    fn test_import_root_category_for_short_paths() {
        let document = json!({ "en": { "greeting": "Hi", "single": "" }, "nb": "Hei" });

        let outcome = import(&document).unwrap();

        let root = &outcome.import.categories[ROOT_CATEGORY];
        assert_that!(root.title, eq("Root"));
        assert_that!(root.translations["greeting"].values["loc-en"].value, eq("Hi"));
        assert_that!(root.translations["single"].values["loc-en"].value, eq(""));
        assert_that!(root.translations[""].values["loc-no"].value, eq("Hei"));
    }

    /// `import_translations`: 空のカテゴリセグメントはルートカテゴリになる
    #[googletest::test]
    fn test_import_empty_category_segment_is_root() {
        let document = json!({ "en": { "": { "k": "v" }, "top": "Top" } });

        let outcome = import(&document).unwrap();

        let keys: Vec<&str> = outcome.import.categories.keys().map(String::as_str).collect();
        assert_eq!(keys, vec![ROOT_CATEGORY]);
        let root = &outcome.import.categories[ROOT_CATEGORY];
        assert_that!(root.title, eq("Root"));
        assert_that!(root.translations["k"].values["loc-en"].value, eq("v"));
        assert_that!(root.translations["top"].values["loc-en"].value, eq("Top"));
    }

    #[googletest::test]
    fn test_import_with_locale_hint() {
        let hint = test_locales().into_iter().nth(1).unwrap();
        let document = json!({ "general": { "hello": "Hei" } });

        let outcome =
            import_translations(&[], Some(&hint), &base_project(), CreatorSource::User, &document)
                .unwrap();

        let value = &outcome.import.categories["general"].translations["hello"].values["loc-no"];
        assert_that!(value.value, eq("Hei"));
        assert_that!(value.source, eq(CreatorSource::User));
    }

    #[googletest::test]
    fn test_import_records_references_and_warnings() {
        let document = json!({ "en": { "cat": {
            "meaning": "The meaning of $t(life) is {{count}}",
            "broken": "Hello, {{name}}",
        } } });

        let outcome = import(&document).unwrap();

        let translations = &outcome.import.categories["cat"].translations;
        assert_eq!(translations["meaning"].references.get("life"), Some(&None));
        assert_eq!(translations["broken"].variables.get("name"), Some(&json!("Douglas Dagurasu")));
        assert_that!(outcome.warnings.len(), eq(1));
        assert_that!(outcome.warnings[0].message, contains_substring("translation broken"));
    }

    #[rstest]
    #[case::empty(json!({}), "Empty input")]
    #[case::null(json!(null), "Empty input")]
    #[case::array(json!(["en"]), "found array")]
    #[case::unknown_locale(json!({ "xx": { "a": "b" } }), "No locale matches 'xx'")]
    #[case::bool_leaf(json!({ "en": { "a": true } }), "Unhandled type boolean at 'en.a'")]
    fn test_import_hard_errors(#[case] document: Value, #[case] expected: &str) {
        let error = import(&document).unwrap_err();

        assert_that!(error.to_string(), contains_substring(expected));
    }

    #[googletest::test]
    fn test_import_requires_base_and_locales() {
        let document = json!({ "en": { "a": "b" } });
        let mut base = base_project();
        base.organization_id.clear();

        let missing_org = import_translations(
            &test_locales(),
            None,
            &base,
            CreatorSource::Import,
            &document,
        );
        let no_locales =
            import_translations(&[], None, &base_project(), CreatorSource::Import, &document);

        assert_eq!(missing_org, Err(ImportError::MissingBaseField("organizationId")));
        assert_eq!(no_locales, Err(ImportError::NoLocales));
    }

    #[googletest::test]
    fn test_import_respects_max_depth() {
        let settings = ImportExportSettings { max_depth: 2, ..ImportExportSettings::default() };
        let importer = Importer::new(&settings).unwrap();
        let document = json!({ "en": { "a": { "b": { "c": "deep" } } } });

        let result = importer.import_translations(
            &test_locales(),
            None,
            &base_project(),
            CreatorSource::Import,
            &document,
        );

        assert!(matches!(result, Err(ImportError::Flatten(_))));
    }
}
