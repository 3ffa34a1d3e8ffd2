use crate::*;

/// Strips the matching boundary string quotes from the (already trimmed) `string`.
///
/// The quotes are only stripped if `string` starts and ends with the same supported quote character
/// and contains no unescaped (i.e. not preceded by an unescaped backslash (`'\'`)) occurrences of it inside.
/// Otherwise `string` is returned as-is, quotes included.
pub(crate) fn unquote<'a>(string: &'a str, options: &IniOptions) -> &'a str {
    let mut chars = string.chars();

    match (chars.next(), chars.next_back()) {
        (Some(first), Some(last)) if first == last && options.is_string_quote_char(first) => {
            // Quotes are ASCII.
            let inner = &string[1..string.len() - 1];

            if contains_unescaped(inner, first) {
                string
            } else {
                inner
            }
        }
        _ => string,
    }
}

/// Returns `true` if `string` contains the character `c` not preceded by an unescaped backslash (`'\'`).
pub(crate) fn contains_unescaped(string: &str, c: char) -> bool {
    let mut escaped = false;

    for current in string.chars() {
        if current == c && !escaped {
            return true;
        }

        escaped = (current == '\\') && !escaped;
    }

    false
}
