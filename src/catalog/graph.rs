//! メモリ上のプロジェクトストア
//!
//! [`Import`] を永続化層と同じ規則で反映する。存在しないエンティティは作成し、
//! 既存の値は内容が変わった場合のみ書き込む。

use std::collections::BTreeMap;

use serde::Serialize;

use super::extended::ExtendedProject;
use super::model::{
    Category,
    Project,
    Translation,
    TranslationValue,
};
use crate::importer::Import;
use crate::locale::Locale;

/// [`ProjectGraph::apply_import`] が書き込んだ件数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ApplySummary {
    pub categories_created: usize,
    pub translations_created: usize,
    pub values_created: usize,
    pub values_updated: usize,
    pub values_unchanged: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtendOptions {
    /// ID または別名が一致するロケールのみ残す（空ならすべて）
    pub locale_filter: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ProjectGraph {
    project: Project,
    /// ID で一意、追加順
    locales: Vec<Locale>,
    /// カテゴリキーごと
    categories: BTreeMap<String, Category>,
}

impl ProjectGraph {
    #[must_use]
    pub fn new(project: Project) -> Self {
        Self { project, locales: Vec::new(), categories: BTreeMap::new() }
    }

    #[must_use]
    pub fn with_locales(mut self, locales: impl IntoIterator<Item = Locale>) -> Self {
        for locale in locales {
            self.add_locale(locale);
        }
        self
    }

    /// 同じ ID のロケールがなければ `locale` を追加する
    ///
    /// # Returns
    /// 追加した場合は `true`
    pub fn add_locale(&mut self, locale: Locale) -> bool {
        if self.locales.iter().any(|l| l.id == locale.id) {
            return false;
        }
        self.locales.push(locale);
        true
    }

    #[must_use]
    pub const fn project(&self) -> &Project {
        &self.project
    }

    #[must_use]
    pub fn locales(&self) -> &[Locale] {
        &self.locales
    }

    #[must_use]
    pub const fn categories(&self) -> &BTreeMap<String, Category> {
        &self.categories
    }

    #[must_use]
    pub fn category(&self, key: &str) -> Option<&Category> {
        self.categories.get(key)
    }

    /// `import` を反映する
    ///
    /// - カテゴリ・翻訳・値は存在しなければ作成する
    /// - 既存の値は文字列またはコンテキストが異なる場合のみ上書きする
    /// - 推論した変数は既存の翻訳にマージし、記録済みの参照は置き換えない
    pub fn apply_import(&mut self, import: &Import) -> ApplySummary {
        let mut summary = ApplySummary::default();

        for (key, incoming) in &import.categories {
            let Some(category) = self.categories.get_mut(key) else {
                summary.categories_created += 1;
                summary.translations_created += incoming.translations.len();
                summary.values_created +=
                    incoming.translations.values().map(|t| t.values.len()).sum::<usize>();
                tracing::debug!(category = %key, "Creating category");
                self.categories.insert(key.clone(), incoming.clone());
                continue;
            };

            for (translation_key, incoming_translation) in &incoming.translations {
                let Some(translation) = category.translations.get_mut(translation_key) else {
                    summary.translations_created += 1;
                    summary.values_created += incoming_translation.values.len();
                    category
                        .translations
                        .insert(translation_key.clone(), incoming_translation.clone());
                    continue;
                };
                merge_translation(translation, incoming_translation, &mut summary);
            }
        }

        tracing::debug!(?summary, "Applied import");
        summary
    }

    /// プロジェクトの結合ビューを作る
    #[must_use]
    pub fn extend(&self, options: &ExtendOptions) -> ExtendedProject {
        let locales = self.locales.iter().filter(|locale| {
            options.locale_filter.is_empty()
                || options.locale_filter.iter().any(|f| locale.matches_alias(f))
        });
        ExtendedProject::new(
            self.project.clone(),
            locales.cloned(),
            self.categories.values().cloned(),
        )
    }
}

/// `incoming` を既存の翻訳にマージし、値の書き込みを数える
fn merge_translation(
    translation: &mut Translation,
    incoming: &Translation,
    summary: &mut ApplySummary,
) {
    for (name, example) in &incoming.variables {
        translation.variables.insert(name.clone(), example.clone());
    }
    for (key, argument) in &incoming.references {
        translation.references.entry(key.clone()).or_insert_with(|| argument.clone());
    }

    for (locale_id, incoming_value) in &incoming.values {
        match translation.values.get_mut(locale_id) {
            None => {
                summary.values_created += 1;
                translation.values.insert(locale_id.clone(), incoming_value.clone());
            }
            Some(existing) if existing.differs_from(incoming_value) => {
                summary.values_updated += 1;
                update_value(existing, incoming_value);
            }
            Some(_) => summary.values_unchanged += 1,
        }
    }
}

/// `incoming` の文字列と作成元を引き継ぐ
fn update_value(existing: &mut TranslationValue, incoming: &TranslationValue) {
    existing.value.clone_from(&incoming.value);
    existing.context.clone_from(&incoming.context);
    existing.source = incoming.source;
}
