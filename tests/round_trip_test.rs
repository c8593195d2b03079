//! Import and export through the public API, with YAML fixtures.

#![allow(clippy::unwrap_used)]
#![allow(clippy::indexing_slicing)]
#![allow(missing_docs)]

use i18n_interchange::catalog::{
    CreatorSource,
    ExtendOptions,
    Project,
    ProjectGraph,
    ROOT_CATEGORY,
};
use i18n_interchange::export::{
    ExportOptions,
    I18n,
    export_i18n,
};
use i18n_interchange::importer::{
    ImportError,
    ImportOutcome,
    TitleChange,
    describe_titles,
    import_translations,
};
use i18n_interchange::input::document::{
    flatten,
    sort_paths,
};
use i18n_interchange::locale::Locale;
use pretty_assertions::assert_eq;
use serde_json::{
    Value,
    json,
};

fn locales() -> Vec<Locale> {
    vec![
        Locale::new("loc-en", "en-US", "en", "eng", "eng", "English"),
        Locale::new("loc-no", "nb-NO", "nb", "nob", "nob", "Norwegian"),
    ]
}

fn base() -> Project {
    Project::new("proj-123", "jim", "org-123")
}

fn yaml(source: &str) -> Value {
    serde_yaml::from_str(source).unwrap()
}

fn import(document: &Value) -> ImportOutcome {
    import_translations(&locales(), None, &base(), CreatorSource::Import, document).unwrap()
}

fn persist(outcome: &ImportOutcome) -> ProjectGraph {
    let mut graph = ProjectGraph::new(base()).with_locales(locales());
    graph.apply_import(&outcome.import);
    graph
}

fn export(graph: &ProjectGraph) -> I18n {
    export_i18n(&graph.extend(&ExtendOptions::default()), &ExportOptions::default()).unwrap()
}

const DOCUMENT: &str = r#"
en:
  title: Translations
  general:
    hello: Hello
    friend: A friend
    friend_male: A boyfriend
    friend_male_one: One boyfriend
    onlyContext_formal: Greetings
    _private: Hidden
    form:
      submit: Submit {{count}} items
      meaning: The meaning of $t(life) is {{count}}
      nested: '$t(greeting, {"name": "Axl"})'
  errors:
    network:
      timeout: "Timed out after {{ seconds, number }} seconds"
nb:
  general:
    hello: Hei
    friend_female: En venninne
    form:
      submit: Send {{count}} ting
"#;

#[test]
fn test_export_reproduces_imported_document() {
    let document = yaml(DOCUMENT);

    let outcome = import(&document);
    let exported = export(&persist(&outcome));

    assert!(outcome.warnings.is_empty(), "{:?}", outcome.warnings);
    assert_eq!(exported.to_map(), document);
}

#[test]
fn test_reimport_changes_nothing() {
    let outcome = import(&yaml(DOCUMENT));
    let mut graph = persist(&outcome);

    let summary = graph.apply_import(&outcome.import);

    assert_eq!(summary.categories_created, 0);
    assert_eq!(summary.values_updated, 0);
    assert_eq!(summary.values_unchanged, 13);
}

#[test]
fn test_context_suffix_is_split_from_key() {
    let outcome = import(&yaml("en: { Approval: { thisIsFine_superb: Fantastic } }"));

    let translations = &outcome.import.categories["Approval"].translations;
    assert_eq!(translations.keys().collect::<Vec<_>>(), vec!["thisIsFine"]);
    let value = &translations["thisIsFine"].values["loc-en"];
    assert_eq!(value.context.get("superb").map(String::as_str), Some("Fantastic"));
    assert_eq!(value.value, "");
}

#[test]
fn test_empty_value_is_not_a_category() {
    let outcome = import(&yaml(
        r#"
en:
  Approval:
    Action: ""
    Action_MyContext: Value
"#,
    ));

    let keys: Vec<&String> = outcome.import.categories.keys().collect();
    assert_eq!(keys, vec!["Approval"]);
    let value = &outcome.import.categories["Approval"].translations["Action"].values["loc-en"];
    assert_eq!(value.context.get("MyContext").map(String::as_str), Some("Value"));
}

#[test]
fn test_variables_and_references_are_inferred() {
    let outcome = import(&json!({ "en": { "c": {
        "submit": "Submit {{count}} items",
        "meaning": "The meaning of $t(life) is {{count}}",
    } } }));

    let translations = &outcome.import.categories["c"].translations;
    assert_eq!(translations["submit"].variables.get("count"), Some(&json!(42)));
    assert_eq!(translations["meaning"].variables.get("count"), Some(&json!(42)));
    assert_eq!(translations["meaning"].references.get("life"), Some(&None));
}

#[test]
fn test_locale_resolution_is_case_sensitive() {
    let shouting = Locale::new("loc-b", "xx-XX", "xx", "xxx", "EN", "Shouting");
    let english = Locale::new("loc-a", "en-US", "en", "eng", "eng", "English");

    let outcome = import_translations(
        &[shouting, english],
        None,
        &base(),
        CreatorSource::Import,
        &json!({ "en": { "c": { "k": "v" } } }),
    )
    .unwrap();

    let values = &outcome.import.categories["c"].translations["k"].values;
    assert_eq!(values.keys().collect::<Vec<_>>(), vec!["loc-a"]);
}

#[test]
fn test_flatten_is_deterministic() {
    let document = yaml(DOCUMENT);

    let mut first = flatten(&document).unwrap();
    let mut second = flatten(&document).unwrap();
    sort_paths(&mut first);
    sort_paths(&mut second);

    assert_eq!(first, second);
    assert_eq!(first.len(), 14);
}

#[test]
fn test_leaf_directly_under_locale_exports_with_empty_key() {
    let outcome = import(&json!({ "en": "Hello" }));

    let root = &outcome.import.categories[ROOT_CATEGORY];
    assert_eq!(root.translations[""].values["loc-en"].value, "Hello");
    assert_eq!(export(&persist(&outcome)).to_map(), json!({ "en": { "": "Hello" } }));
}

#[test]
fn test_locale_hint_round_trip() {
    let hint = locales().into_iter().nth(1).unwrap();
    let document = yaml("general: { hello: Hei }");

    let outcome =
        import_translations(&[], Some(&hint), &base(), CreatorSource::Import, &document).unwrap();
    let exported = export(&persist(&outcome));

    assert_eq!(exported.to_map(), json!({ "nb": document }));
}

#[test]
fn test_export_merges_locales_into_one_tree() {
    let exported = export(&persist(&import(&yaml(DOCUMENT))));

    let merged = exported.merge_as_if_root_is_locale(Some(locales().as_slice())).unwrap();

    let hello = &merged.nodes["general"].nodes["hello"].value;
    assert_eq!(hello.get("loc-en").map(String::as_str), Some("Hello"));
    assert_eq!(hello.get("loc-no").map(String::as_str), Some("Hei"));
}

#[test]
fn test_hard_errors_abort_without_result() {
    let missing_creator = Project::new("proj-123", "", "org-123");

    let empty = import_translations(&locales(), None, &base(), CreatorSource::Import, &json!({}));
    let creator = import_translations(
        &locales(),
        None,
        &missing_creator,
        CreatorSource::Import,
        &json!({ "en": { "a": "b" } }),
    );
    let unknown = import_translations(
        &locales(),
        None,
        &base(),
        CreatorSource::Import,
        &json!({ "en": { "a": "b" }, "fr": { "a": "b" } }),
    );

    assert_eq!(empty, Err(ImportError::EmptyDocument));
    assert_eq!(creator, Err(ImportError::MissingBaseField("createdBy")));
    assert_eq!(
        unknown,
        Err(ImportError::UnresolvedLocale { segment: "fr".to_string(), path: "fr.a.b".to_string() })
    );
}

#[test]
fn test_titles_document_describes_imported_project() {
    let extended = persist(&import(&yaml(DOCUMENT))).extend(&ExtendOptions::default());
    let titles = yaml(
        r#"
general:
  hello: Hello
  form: Form fields
  form.submit: Submit button
errors.network: Network
"#,
    );

    let changes = describe_titles(&extended, &titles).unwrap();

    assert_eq!(changes, vec![
        TitleChange::CategoryTitle {
            category_key: "general.form".to_string(),
            previous: "Form".to_string(),
            title: "Form fields".to_string(),
        },
        TitleChange::TranslationTitle {
            category_key: "general.form".to_string(),
            translation_key: "submit".to_string(),
            previous: "Submit".to_string(),
            title: "Submit button".to_string(),
        },
    ]);
}
