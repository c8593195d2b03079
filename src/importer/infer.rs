//! 翻訳値からの変数・参照の推論

use std::collections::BTreeMap;

use regex::Regex;
use serde_json::{
    Map,
    Value,
    json,
};

use super::warning::Warning;
use crate::config::InterpolationSettings;
use crate::interpolation::{
    Node,
    Parser,
};

/// 変数名に一致する例がない場合の値
pub const UNKNOWN_EXAMPLE: &str = "???";

/// 例の値
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Example {
    Number(i64),
    Text(&'static str),
}

/// 小文字の変数名ごとの例
const EXAMPLES: &[(&str, Example)] = &[
    ("count", Example::Number(42)),
    ("total", Example::Number(42)),
    ("limit", Example::Number(1000)),
    ("maxlimit", Example::Number(5000)),
    ("value", Example::Number(83)),
    ("year", Example::Text("2006")),
    ("color", Example::Text("blue")),
    ("colour", Example::Text("green")),
    ("error", Example::Text("Simulated error")),
    ("errormessage", Example::Text("Simulated error")),
    ("errormsg", Example::Text("Simulated error")),
    ("regionname", Example::Text("Gigantis")),
    ("region", Example::Text("Gigantis")),
    ("country", Example::Text("Japan")),
    ("countryname", Example::Text("Japan")),
    ("companyname", Example::Text("Wily")),
    ("name", Example::Text("Douglas Dagurasu")),
    ("firstname", Example::Text("Axl")),
    ("lastname", Example::Text("Akuseru")),
    ("month", Example::Text("August")),
    ("price", Example::Text("5000")),
    ("email", Example::Text("roll@example.com")),
    ("date", Example::Text("1987-12-17T06:00:00-09:00")),
    ("expires", Example::Text("1995-03-24T06:00:00-09:00")),
    ("days", Example::Number(6)),
];

impl From<Example> for Value {
    fn from(example: Example) -> Self {
        match example {
            Example::Number(n) => Self::from(n),
            Example::Text(s) => Self::from(s),
        }
    }
}

/// 変数名の例を返す
///
/// 小文字にした名前で完全一致を探し、なければ末尾が一致する最長の項目を使う
/// （`errorCount` ⇒ 42）。どちらもなければ [`UNKNOWN_EXAMPLE`]
#[must_use]
pub fn example_value(name: &str) -> Value {
    let name = name.to_lowercase();
    EXAMPLES
        .iter()
        .find(|(key, _)| *key == name)
        .or_else(|| {
            EXAMPLES.iter().filter(|(key, _)| name.ends_with(key)).max_by_key(|(key, _)| key.len())
        })
        .map_or_else(|| Value::from(UNKNOWN_EXAMPLE), |(_, example)| Value::from(*example))
}

/// パース前に変数名を集めるパターンを作る
///
/// `{{\s*([^\s,}]*)[^}]*}}` をマーカーに合わせた形
///
/// # Errors
/// マーカーから正しいパターンを作れない（空のマーカーなど）
pub fn variable_pattern(settings: &InterpolationSettings) -> Result<Regex, regex::Error> {
    let prefix = regex::escape(&settings.prefix);
    let suffix = regex::escape(&settings.suffix);
    let stop = first_char_escaped(&settings.suffix);
    let separator = first_char_escaped(&settings.format_separator);
    Regex::new(&format!(r"{prefix}\s*([^\s{separator}{stop}]*)[^{stop}]*{suffix}"))
}

/// `marker` の先頭文字（文字クラス用にエスケープ済み）
fn first_char_escaped(marker: &str) -> String {
    marker.chars().next().map(|c| regex::escape(&c.to_string())).unwrap_or_default()
}

/// 1 つの翻訳値から推論した結果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Inferred {
    pub variables: BTreeMap<String, Value>,
    pub references: BTreeMap<String, Option<String>>,
    pub warnings: Vec<Warning>,
}

/// 翻訳値から変数と参照を推論する
#[derive(Debug, Clone)]
pub struct VariableInferrer {
    /// 補間・ネストのノードを見つける
    parser: Parser,
    /// パースに失敗した値からも変数名を集める
    pattern: Regex,
}

impl VariableInferrer {
    /// # Errors
    /// [`variable_pattern`] を参照
    pub fn new(settings: &InterpolationSettings) -> Result<Self, regex::Error> {
        Ok(Self { parser: Parser::new(settings.marker_set()), pattern: variable_pattern(settings)? })
    }

    /// `value` から推論する
    ///
    /// `category` と `translation` は警告の表示にのみ使う
    #[must_use]
    pub fn infer(&self, value: &str, category: &str, translation: &str) -> Inferred {
        let mut inferred = Inferred::default();

        for captures in self.pattern.captures_iter(value) {
            if let Some(name) = captures.get(1).map(|m| m.as_str()).filter(|n| !n.is_empty()) {
                inferred.variables.insert(name.to_string(), example_value(name));
            }
        }

        let ast = match self.parser.parse(value) {
            Ok(ast) => ast,
            Err(error) => {
                tracing::debug!(%category, %translation, %error, "Failed to parse translation value");
                inferred.warnings.push(
                    Warning::variable(format!(
                        "There was a problem parsing the translation-value. This occurred in \
                         category {category} translation {translation}"
                    ))
                    .with_error(&error)
                    .with_details(json!({ "value": value })),
                );
                return inferred;
            }
        };

        let nodes_details = || serde_json::to_value(&ast.nodes).unwrap_or(Value::Null);
        let location = |node: &Node, index: usize| {
            format!(
                "{} ({index}). This occurred in category {category} translation {translation} \
                 value {value} at {}-{}",
                node.token.kind, node.token.start, node.token.end
            )
        };

        for (index, node) in ast.nodes.iter().enumerate() {
            if node.is_nesting() {
                let Some(raw_key) = node.key() else {
                    inferred.warnings.push(
                        Warning::reference(format!(
                            "Attempted to infer references, but the node had no key. {}",
                            location(node, index)
                        ))
                        .with_details(nodes_details()),
                    );
                    continue;
                };
                if let Some(argument) = node.argument() {
                    infer_from_arguments(argument, &mut inferred);
                }
                let key = raw_key.trim();
                if key.is_empty() {
                    inferred.warnings.push(
                        Warning::variable(format!(
                            "Attempted to infer references, but the key was empty. {}",
                            location(node, index)
                        ))
                        .with_details(nodes_details()),
                    );
                    continue;
                }
                inferred
                    .references
                    .entry(key.to_string())
                    .or_insert_with(|| node.argument().map(ToString::to_string));
            } else if node.is_interpolation() {
                let Some(raw_key) = node.key() else {
                    inferred.warnings.push(
                        Warning::variable(format!(
                            "Attempted to infer variables, but the node had no key. {}",
                            location(node, index)
                        ))
                        .with_details(nodes_details()),
                    );
                    continue;
                };
                let key = raw_key.trim();
                if key.is_empty() {
                    inferred.warnings.push(
                        Warning::variable(format!(
                            "Attempted to infer variables, but the key was empty. {}",
                            location(node, index)
                        ))
                        .with_details(nodes_details()),
                    );
                    continue;
                }
                inferred.variables.insert(key.to_string(), example_value(key));
            }
        }

        inferred
    }
}

/// ネストの引数を JSON オブジェクトとみなし、そのキーを変数とする
fn infer_from_arguments(argument: &str, inferred: &mut Inferred) {
    let json_like = argument.trim().replace("\\\"", "\"");
    match serde_json::from_str::<Map<String, Value>>(&json_like) {
        Ok(object) => {
            for key in object.keys() {
                inferred.variables.entry(key.clone()).or_insert_with(|| example_value(key));
            }
        }
        Err(error) => {
            inferred.warnings.push(
                Warning::variable(
                    "Attempted to interpret the token-arguments as json, but encountered an error",
                )
                .with_error(&error)
                .with_details(json!({ "argument": json_like })),
            );
        }
    }
}

/// 推論した変数を `variables` にマージする
///
/// 既存の名前と例が異なる場合は警告を出し、新しい例を採用する
pub fn merge_variables(
    variables: &mut BTreeMap<String, Value>,
    inferred: BTreeMap<String, Value>,
) -> Vec<Warning> {
    let mut warnings = Vec::new();
    for (name, example) in inferred {
        if let Some(existing) = variables.get(&name)
            && *existing != example
        {
            warnings.push(
                Warning::variable("duplicate inferred values with different values detected")
                    .with_details(json!({ "variable": name, "a": existing, "b": example })),
            );
        }
        variables.insert(name, example);
    }
    warnings
}
