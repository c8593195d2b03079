//! Human-readable titles inferred from keys.

/// Infers a title from a key by splitting it into words at case boundaries
/// and separators.
///
/// ```
/// use i18n_interchange::importer::title::infer_title;
///
/// assert_eq!(infer_title("thisIsFine"), "This is fine");
/// assert_eq!(infer_title("x"), "X");
/// assert_eq!(infer_title(""), "Root");
/// ```
#[must_use]
pub fn infer_title(key: &str) -> String {
    if key.is_empty() {
        return "Root".to_string();
    }
    let mut chars = key.chars();
    if let (Some(only), None) = (chars.next(), chars.next()) {
        return only.to_uppercase().collect();
    }

    let sentence = split_words(key).join(" ");
    let mut chars = sentence.chars();
    chars.next().map_or_else(
        || key.to_string(),
        |first| first.to_uppercase().chain(chars).collect(),
    )
}

/// Lower-cased words of `key`. A new word starts after a separator
/// (`_`, `-`, `.`, whitespace), at a lower-to-upper case change, and before
/// the last capital of an acronym followed by lower case (`HTMLParser`).
fn split_words(key: &str) -> Vec<String> {
    let chars: Vec<char> = key.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (index, &c) in chars.iter().enumerate() {
        if c == '_' || c == '-' || c == '.' || c.is_whitespace() {
            flush(&mut words, &mut current);
            continue;
        }
        let previous = index.checked_sub(1).and_then(|i| chars.get(i)).copied();
        let next = chars.get(index + 1).copied();
        let boundary = c.is_uppercase()
            && previous.is_some_and(|p| {
                p.is_lowercase()
                    || p.is_ascii_digit()
                    || (p.is_uppercase() && next.is_some_and(char::is_lowercase))
            });
        if boundary {
            flush(&mut words, &mut current);
        }
        current.extend(c.to_lowercase());
    }
    flush(&mut words, &mut current);
    words
}

fn flush(words: &mut Vec<String>, current: &mut String) {
    if !current.is_empty() {
        words.push(std::mem::take(current));
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::empty("", "Root")]
    #[case::single_char("x", "X")]
    #[case::camel("thisIsFine", "This is fine")]
    #[case::leading_underscore("_strangeNonContext", "Strange non context")]
    #[case::snake("submit_button", "Submit button")]
    #[case::pascal("Approval", "Approval")]
    #[case::acronym("HTMLParser", "Html parser")]
    #[case::digits("step2Done", "Step2 done")]
    #[case::kebab("my-key", "My key")]
    #[case::separators_only("__", "__")]
    #[case::unicode("ålesundByen", "Ålesund byen")]
    fn test_infer_title(#[case] key: &str, #[case] expected: &str) {
        assert_eq!(infer_title(key), expected);
    }
}
