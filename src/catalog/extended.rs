//! エクスポートが使うプロジェクトの結合ビュー

use std::collections::BTreeMap;

use serde::Serialize;

use super::model::{
    Category,
    Project,
};
use crate::locale::Locale;

/// ロケールとカテゴリを含むプロジェクト
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExtendedProject {
    pub project: Project,
    /// ロケール（ID ごと）
    pub locales: BTreeMap<String, Locale>,
    /// カテゴリ（カテゴリキーごと）
    pub categories: BTreeMap<String, Category>,
    pub category_tree: CategoryTreeNode,
}

/// 1 つのロケールに値を持つカテゴリ
#[derive(Debug, Clone, PartialEq)]
pub struct ExtendedLocale<'a> {
    pub locale: &'a Locale,
    /// カテゴリキー順
    pub categories: Vec<&'a Category>,
}

impl ExtendedProject {
    #[must_use]
    pub fn new(
        project: Project,
        locales: impl IntoIterator<Item = Locale>,
        categories: impl IntoIterator<Item = Category>,
    ) -> Self {
        let locales = locales.into_iter().map(|l| (l.id.clone(), l)).collect();
        let categories: BTreeMap<String, Category> =
            categories.into_iter().map(|c| (c.key.clone(), c)).collect();
        let category_tree = CategoryTreeNode::from_categories(categories.values());
        Self { project, locales, categories, category_tree }
    }

    /// カテゴリをロケール ID ごとにまとめる
    ///
    /// 値を 1 つも持たないロケールは含まない
    #[must_use]
    pub fn by_locales(&self) -> BTreeMap<&str, ExtendedLocale<'_>> {
        self.locales
            .values()
            .filter(|locale| self.category_tree.has_translation_for_locale_deep(&locale.id))
            .map(|locale| {
                let categories = self
                    .categories
                    .values()
                    .filter(|c| c.has_translation_for_locale(&locale.id))
                    .collect();
                (locale.id.as_str(), ExtendedLocale { locale, categories })
            })
            .collect()
    }
}

/// ドット区切りのカテゴリキーで組んだツリー（セグメントごとに 1 ノード）
///
/// ルートカテゴリはツリーのルートノードに置く
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategoryTreeNode {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub categories: BTreeMap<String, CategoryTreeNode>,
}

impl CategoryTreeNode {
    /// ツリーを作る
    ///
    /// カテゴリが存在しないセグメントにも中間ノードを作る
    pub fn from_categories<'a>(categories: impl IntoIterator<Item = &'a Category>) -> Self {
        let mut sorted: Vec<&Category> = categories.into_iter().collect();
        sorted.sort_by(|a, b| {
            a.path().len().cmp(&b.path().len()).then_with(|| a.key.cmp(&b.key))
        });

        let mut tree = Self::default();
        for category in sorted {
            tree.insert(category);
        }
        tree
    }

    /// `category` をそのパスに置く（同じパスでは最初のカテゴリを優先）
    fn insert(&mut self, category: &Category) {
        let mut node = self;
        for segment in category.path() {
            node = node.categories.entry(segment.to_string()).or_default();
        }
        if node.category.is_some() {
            tracing::warn!(key = %category.key, "Category already present in tree, keeping first");
            return;
        }
        node.category = Some(category.clone());
    }

    /// `path` のノード
    #[must_use]
    pub fn get(&self, path: &[&str]) -> Option<&Self> {
        path.iter().try_fold(self, |node, segment| node.categories.get(*segment))
    }

    #[must_use]
    pub fn has_translation_for_locale(&self, locale_id: &str) -> bool {
        self.category.as_ref().is_some_and(|c| c.has_translation_for_locale(locale_id))
    }

    /// このノードまたは配下のいずれかが `locale_id` の値を持つか
    #[must_use]
    pub fn has_translation_for_locale_deep(&self, locale_id: &str) -> bool {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if node.has_translation_for_locale(locale_id) {
                return true;
            }
            stack.extend(node.categories.values());
        }
        false
    }
}
