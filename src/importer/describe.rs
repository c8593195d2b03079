//! タイトル文書の取り込み
//!
//! `{ "general": { "form": "フォーム" } }` のようなドット区切りキーとタイトルの文書を
//! プロジェクトのカテゴリ・翻訳と突き合わせ、必要なタイトル変更を列挙する。

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::catalog::ExtendedProject;
use crate::input::document::{
    FlattenError,
    flatten,
    sort_paths,
    type_name,
};

/// 提案の最大編集距離
const MAX_SUGGESTION_DISTANCE: usize = 3;

/// 提案の最大件数
const MAX_SUGGESTIONS: usize = 5;

/// タイトル変更の要求
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TitleChange {
    #[serde(rename_all = "camelCase")]
    CategoryTitle { category_key: String, previous: String, title: String },

    #[serde(rename_all = "camelCase")]
    TranslationTitle {
        category_key: String,
        translation_key: String,
        previous: String,
        title: String,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DescribeError {
    #[error("Expected an object at the document root, found {0}")]
    NotAnObject(&'static str),

    #[error(transparent)]
    Flatten(#[from] FlattenError),

    #[error(
        "Key '{key}' is given twice. The previous title was '{previous}' and the new title is '{title}'"
    )]
    DuplicateKey { key: String, previous: String, title: String },

    #[error(
        "No category or translation '{key}' in project '{project}'. Did you mean one of these?: {suggestions:?}"
    )]
    UnknownKey { key: String, project: String, suggestions: Vec<String> },
}

/// 突き合わせ先: カテゴリキーまたは「カテゴリパス.翻訳キー」
#[derive(Debug, Clone, Copy)]
struct Target<'a> {
    /// カテゴリキー
    category_key: &'a str,
    /// 翻訳キー（カテゴリ自体なら `None`）
    translation_key: Option<&'a str>,
    /// 現在のタイトル
    title: &'a str,
}

/// タイトル文書から変更要求を作る
///
/// # Arguments
/// * `project` - 突き合わせ対象のプロジェクト
/// * `document` - ドット区切りキーからタイトルへの入れ子文書
///
/// # Returns
/// キー順に並んだ変更要求。タイトルが同じものは含まない。
///
/// # Errors
/// - 文書がオブジェクトでない、または文字列・数値以外の値を含む
/// - 同じキーが二度指定された（`{"a.b": .., "a": {"b": ..}}`）
/// - キーがどのカテゴリにも翻訳にも一致しない（近いキーを提案する）
pub fn describe_titles(
    project: &ExtendedProject,
    document: &Value,
) -> Result<Vec<TitleChange>, DescribeError> {
    if !document.is_object() {
        return Err(DescribeError::NotAnObject(type_name(document)));
    }
    let titles = flatten_titles(document)?;
    if titles.is_empty() {
        return Ok(Vec::new());
    }

    let (categories, translations) = targets_by_key(project);
    let mut changes = Vec::new();

    for (key, title) in &titles {
        let category = categories.get(key.as_str());
        let translation = translations.get(key.as_str());
        if category.is_none() && translation.is_none() {
            let candidates =
                categories.keys().copied().chain(translations.keys().map(String::as_str));
            return Err(DescribeError::UnknownKey {
                key: key.clone(),
                project: project.project.id.clone(),
                suggestions: suggestions_for(key, candidates),
            });
        }

        for target in category.into_iter().chain(translation) {
            if target.title != title.as_str() {
                changes.push(target.change(title));
            }
        }
    }

    tracing::debug!(keys = titles.len(), changes = changes.len(), "Described titles");
    Ok(changes)
}

impl Target<'_> {
    /// `title` への変更要求
    fn change(&self, title: &str) -> TitleChange {
        let category_key = self.category_key.to_string();
        let previous = self.title.to_string();
        let title = title.to_string();
        match self.translation_key {
            None => TitleChange::CategoryTitle { category_key, previous, title },
            Some(key) => TitleChange::TranslationTitle {
                category_key,
                translation_key: key.to_string(),
                previous,
                title,
            },
        }
    }
}

/// 文書をドット区切りキーとタイトルの組に平坦化する
///
/// ドットを含むキーと入れ子の両方で同じキーに届いた場合はエラー。
/// 浅いパスが先に入るので、`previous` はドットを含むキー側になる
fn flatten_titles(document: &Value) -> Result<BTreeMap<String, String>, DescribeError> {
    let mut paths = flatten(document)?;
    sort_paths(&mut paths);

    let mut titles: BTreeMap<String, String> = BTreeMap::new();
    for path in paths {
        let Some((title, segments)) = path.split_last() else { continue };
        match titles.entry(segments.join(".")) {
            Entry::Occupied(existing) => {
                return Err(DescribeError::DuplicateKey {
                    key: existing.key().clone(),
                    previous: existing.get().clone(),
                    title: title.clone(),
                });
            }
            Entry::Vacant(slot) => {
                slot.insert(title.clone());
            }
        }
    }
    Ok(titles)
}

/// カテゴリと翻訳をそれぞれの文書キーで引けるようにする
///
/// 翻訳のキーはエクスポート時の位置と同じく、カテゴリのパスと翻訳キーを
/// ドットでつないだもの（ルートカテゴリの翻訳は翻訳キーのみ）
fn targets_by_key(
    project: &ExtendedProject,
) -> (BTreeMap<&str, Target<'_>>, BTreeMap<String, Target<'_>>) {
    let mut categories = BTreeMap::new();
    let mut translations = BTreeMap::new();

    for category in project.categories.values() {
        categories.insert(category.key.as_str(), Target {
            category_key: &category.key,
            translation_key: None,
            title: &category.title,
        });
        let path = category.path();
        for translation in category.translations.values() {
            let mut segments = path.clone();
            segments.push(&translation.key);
            translations.insert(segments.join("."), Target {
                category_key: &category.key,
                translation_key: Some(&translation.key),
                title: &translation.title,
            });
        }
    }

    (categories, translations)
}

/// `key` に近い候補を返す
///
/// 大文字小文字を無視した編集距離が [`MAX_SUGGESTION_DISTANCE`] 以下のもの、
/// または `key` で始まるものを、距離・長さの順に並べる
fn suggestions_for<'a>(key: &str, candidates: impl Iterator<Item = &'a str>) -> Vec<String> {
    let lowered = key.to_lowercase();
    let mut scored: Vec<(usize, &str)> = candidates
        .filter_map(|candidate| {
            let distance = edit_distance(&lowered, &candidate.to_lowercase());
            let close = distance <= MAX_SUGGESTION_DISTANCE
                || candidate.to_lowercase().starts_with(&lowered);
            close.then_some((distance, candidate))
        })
        .collect();
    scored.sort_by(|(da, a), (db, b)| da.cmp(db).then(a.len().cmp(&b.len())).then(a.cmp(b)));
    scored.dedup_by(|(_, a), (_, b)| a == b);
    scored.into_iter().take(MAX_SUGGESTIONS).map(|(_, candidate)| candidate.to_string()).collect()
}

/// 文字単位のレーベンシュタイン距離
fn edit_distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut previous: Vec<usize> = (0..=b.len()).collect();

    for (i, ca) in a.chars().enumerate() {
        let mut current = Vec::with_capacity(b.len() + 1);
        current.push(i + 1);
        for ((diagonal, above), cb) in previous.iter().zip(previous.iter().skip(1)).zip(&b) {
            let left = current.last().copied().unwrap_or(i + 1);
            let substitution = diagonal + usize::from(ca != *cb);
            current.push(substitution.min(above + 1).min(left + 1));
        }
        previous = current;
    }

    previous.last().copied().unwrap_or_default()
}
