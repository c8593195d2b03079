//! Translation key and context splitting.

/// Splits a translation key candidate into the key and its context suffix.
///
/// Leading separators belong to the key. The rest is split on its last
/// separator; a trailing separator yields no context.
///
/// ```
/// use i18n_interchange::importer::key::split_key_and_context;
///
/// assert_eq!(split_key_and_context("thisIsFine_superb", "_"), ("thisIsFine", Some("superb")));
/// assert_eq!(split_key_and_context("_private", "_"), ("_private", None));
/// ```
#[must_use]
pub fn split_key_and_context<'a>(candidate: &'a str, separator: &str) -> (&'a str, Option<&'a str>) {
    if separator.is_empty() {
        return (candidate, None);
    }
    let rest = candidate.trim_start_matches(separator);
    let leading = candidate.len() - rest.len();

    match rest.rsplit_once(separator) {
        Some((key, context)) if !key.is_empty() && !context.is_empty() => {
            let key_end = leading + key.len();
            candidate.get(..key_end).map_or((candidate, None), |key| (key, Some(context)))
        }
        _ => (candidate, None),
    }
}

/// Joins a translation key and a context suffix, inverting
/// [`split_key_and_context`].
#[must_use]
pub fn join_key_and_context(key: &str, context: &str, separator: &str) -> String {
    format!("{key}{separator}{context}")
}
