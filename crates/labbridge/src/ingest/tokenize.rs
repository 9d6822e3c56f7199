//! Export-file tokenization.
//!
//! Instruments wrap their payload in a single opening bracket and two
//! trailing characters. The slice rule here (drop exactly the first
//! character and the last two, then trim) is load-bearing: every
//! positional offset in the parsers assumes it.

/// Turn raw export text into the ordered top-level token sequence.
///
/// Empty fields between consecutive commas are preserved so positional
/// indices stay stable when an instrument leaves a field blank. A body
/// shorter than three characters, or one that trims to nothing, yields
/// an empty token list rather than an error.
pub fn tokenize_export(text: &str) -> Vec<String> {
    let body = strip_wrapping(text).trim();
    if body.is_empty() {
        return Vec::new();
    }
    body.split(',').map(str::to_string).collect()
}

/// Secondary entry point: split a single field on `|` (row-internal
/// columns) or `^` (composite codes), preserving empty parts.
pub fn split_field(field: &str, delim: char) -> Vec<&str> {
    field.split(delim).collect()
}

/// Drop exactly the first character and the last two.
fn strip_wrapping(text: &str) -> &str {
    let mut chars = text.chars();
    if chars.next().is_none() {
        return "";
    }
    let mut rest = chars.as_str().chars();
    if rest.next_back().is_none() {
        return "";
    }
    if rest.next_back().is_none() {
        return "";
    }
    rest.as_str()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_drops_first_and_last_two() {
        assert_eq!(tokenize_export("[a,b]X"), vec!["a", "b"]);
        assert_eq!(tokenize_export("(payload))"), vec!["payload"]);
    }

    #[test]
    fn test_empty_fields_are_preserved() {
        assert_eq!(tokenize_export("[a,,b]X"), vec!["a", "", "b"]);
        assert_eq!(tokenize_export("[,a,]XX"), vec!["", "a", ""]);
    }

    #[test]
    fn test_short_body_yields_empty_list() {
        assert_eq!(tokenize_export(""), Vec::<String>::new());
        assert_eq!(tokenize_export("a"), Vec::<String>::new());
        assert_eq!(tokenize_export("ab"), Vec::<String>::new());
        assert_eq!(tokenize_export("abc"), Vec::<String>::new());
    }

    #[test]
    fn test_whitespace_trimmed_after_slice() {
        assert_eq!(tokenize_export("[  a,b  \n]X"), vec!["a", "b"]);
        assert_eq!(tokenize_export("[   ]X"), Vec::<String>::new());
    }

    #[test]
    fn test_split_field_preserves_empties() {
        assert_eq!(split_field("a||b", '|'), vec!["a", "", "b"]);
        assert_eq!(split_field("^x^", '^'), vec!["", "x", ""]);
        assert_eq!(split_field("", '|'), vec![""]);
    }
}
