//! Flattening of decoded translation documents into leaf paths.

use serde_json::{
    Number,
    Value,
};
use thiserror::Error;

/// Ordered segments locating one leaf; the last element is the leaf itself.
pub type MapPath = Vec<String>;

/// Default bound on object nesting.
pub const DEFAULT_MAX_DEPTH: usize = 64;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlattenError {
    #[error("Unhandled type {type_name} at '{path}'")]
    UnsupportedType { path: String, type_name: &'static str },

    #[error("Document is nested deeper than {max_depth} levels at '{path}'")]
    TooDeep { path: String, max_depth: usize },
}

/// Flattens `document` into leaf paths, bounded by [`DEFAULT_MAX_DEPTH`].
///
/// # Examples
/// ```
/// use serde_json::json;
/// use i18n_interchange::input::document::{flatten, sort_paths};
///
/// let mut paths = flatten(&json!({ "en": { "hello": "Hello" } })).unwrap();
/// sort_paths(&mut paths);
/// assert_eq!(paths, vec![vec!["en", "hello", "Hello"]]);
/// ```
///
/// # Errors
/// See [`flatten_with_depth`].
pub fn flatten(document: &Value) -> Result<Vec<MapPath>, FlattenError> {
    flatten_with_depth(document, DEFAULT_MAX_DEPTH)
}

/// Flattens `document` into leaf paths.
///
/// Objects are walked with an explicit stack. String leaves are kept as-is and
/// numbers use their shortest decimal form, so `1.0` becomes `"1"`. The order of the result is
/// unspecified; use [`sort_paths`] before processing.
///
/// # Errors
/// - A leaf is neither a string nor a number.
/// - Objects are nested deeper than `max_depth`.
pub fn flatten_with_depth(
    document: &Value,
    max_depth: usize,
) -> Result<Vec<MapPath>, FlattenError> {
    let mut paths = Vec::new();
    let mut stack: Vec<(MapPath, &Value)> = vec![(Vec::new(), document)];

    while let Some((mut path, value)) = stack.pop() {
        match value {
            Value::String(s) => {
                path.push(s.clone());
                paths.push(path);
            }
            Value::Number(n) => {
                path.push(number_text(n));
                paths.push(path);
            }
            Value::Object(map) => {
                if path.len() >= max_depth {
                    return Err(FlattenError::TooDeep { path: path.join("."), max_depth });
                }
                for (key, child) in map.iter().rev() {
                    let mut child_path = Vec::with_capacity(path.len() + 1);
                    child_path.extend(path.iter().cloned());
                    child_path.push(key.clone());
                    stack.push((child_path, child));
                }
            }
            other => {
                return Err(FlattenError::UnsupportedType {
                    path: path.join("."),
                    type_name: type_name(other),
                });
            }
        }
    }

    Ok(paths)
}

/// Shortest decimal text of `number`, without a trailing `.0` on integral
/// floats and never in exponent form.
fn number_text(number: &Number) -> String {
    match number.as_f64() {
        Some(float) if number.is_f64() => float.to_string(),
        _ => number.to_string(),
    }
}

/// Sorts paths so shorter paths come first, breaking ties on the joined path.
pub fn sort_paths(paths: &mut [MapPath]) {
    paths.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.join(".").cmp(&b.join("."))));
}

/// JSON type name of `value`, as used in error messages.
#[must_use]
pub const fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A leaf path split into its locale-and-category root, its translation key
/// candidate and its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathParts<'a> {
    /// Every segment before the translation key.
    pub root: &'a [String],
    /// The second-to-last segment, absent for paths of length two.
    pub mid_path: Option<&'a str>,
    pub value: &'a str,
}

impl<'a> PathParts<'a> {
    /// Splits `path`; returns `None` for paths shorter than two segments.
    #[must_use]
    pub fn split(path: &'a [String]) -> Option<Self> {
        match path {
            [] | [_] => None,
            [root, value] => Some(Self {
                root: std::slice::from_ref(root),
                mid_path: None,
                value: value.as_str(),
            }),
            [root @ .., mid_path, value] => {
                Some(Self { root, mid_path: Some(mid_path.as_str()), value: value.as_str() })
            }
        }
    }
}
