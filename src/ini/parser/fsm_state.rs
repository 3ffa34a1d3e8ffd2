use crate::*;

/// `.ini` line scanner quote FSM states.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum QuoteState {
    /// We are not inside a quoted string.
    /// Accept string quotes (`'"'` / `'\''`) (if supported) (-> InDoubleQuote / InSingleQuote),
    /// key-value separators (if we're looking for the key),
    /// inline comment delimiters (`';'` / `'#'`) (if supported) (-> end of line content),
    /// everything else.
    Normal,
    /// We opened a single-quoted string.
    /// Accept single quotes (`'\''`) (-> Normal),
    /// everything else, including double quotes, key-value separators and comment delimiters.
    InSingleQuote,
    /// We opened a double-quoted string.
    /// Accept double quotes (`'"'`) (-> Normal),
    /// everything else, including single quotes, key-value separators and comment delimiters.
    InDoubleQuote,
}

impl QuoteState {
    pub(crate) fn is_quoted(self) -> bool {
        self != QuoteState::Normal
    }

    /// Processes the next char `c`.
    /// Backslashes do not escape quotes here: the matching quote always closes the string.
    /// Returns the new state.
    pub(crate) fn process(self, c: char, options: &IniOptions) -> QuoteState {
        use QuoteState::*;

        match (self, c) {
            (Normal, '\'') if options.is_string_quote_char(c) => InSingleQuote,
            (Normal, '"') if options.is_string_quote_char(c) => InDoubleQuote,
            // Only the matching quote closes the string.
            (InSingleQuote, '\'') | (InDoubleQuote, '"') => Normal,
            _ => self,
        }
    }
}

/// Value part of a scanned physical line.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) struct ScannedValue<'l> {
    /// Value fragment with the comment and the line continuation, if any, removed.
    /// Trailing whitespace is trimmed unless the line ends inside an open quote.
    pub(crate) fragment: &'l str,
    /// Quote state at the end of the line.
    pub(crate) quote: QuoteState,
    /// Whether the value continues on the next line.
    pub(crate) continued: bool,
}

/// A scanned physical line which starts a new entry.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) struct ScannedKeyLine<'l> {
    /// Raw key, untrimmed and maybe quoted.
    pub(crate) key: &'l str,
    /// Byte offset of the key-value separator in the line.
    pub(crate) separator: usize,
    pub(crate) value: ScannedValue<'l>,
}

/// Scans a line which starts a new entry: locates the key and the start of the value.
/// On error returns the error and the byte offset in the line where it was detected.
pub(crate) fn scan_key_line<'l>(
    line: &'l str,
    options: &IniOptions,
) -> Result<ScannedKeyLine<'l>, (IniErrorKind, usize)> {
    let (separator, content_end, value) = scan(line, QuoteState::Normal, true, options);

    match separator {
        Some(separator) => Ok(ScannedKeyLine {
            key: &line[..separator],
            separator,
            value,
        }),
        // The scan stopped at the comment / end of line without finding the separator.
        None => Err((IniErrorKind::ExpectedKeyEquals, content_end)),
    }
}

/// Scans a line which continues the value of the pending entry,
/// starting in the `quote` state the previous line ended in.
pub(crate) fn scan_continuation_line<'l>(
    line: &'l str,
    quote: QuoteState,
    options: &IniOptions,
) -> ScannedValue<'l> {
    scan(line, quote, false, options).2
}

/// Returns the byte offset of the first unquoted key-value separator, if `find_separator` is `true` and one was found,
/// the byte offset where the line content ends (i.e. the comment starts, or the line length),
/// and the scanned value.
/// If `find_separator` is `true` but no separator was found, the returned fragment is empty.
fn scan<'l>(
    line: &'l str,
    mut quote: QuoteState,
    find_separator: bool,
    options: &IniOptions,
) -> (Option<usize>, usize, ScannedValue<'l>) {
    let mut separator = None;
    let mut content_end = line.len();

    for (idx, c) in line.char_indices() {
        if !quote.is_quoted() {
            if find_separator && separator.is_none() && options.is_key_value_separator_char(c) {
                separator = Some(idx);
                continue;
            }

            // Open quotes suppress comments for the rest of the line.
            if options.is_inline_comment_char(c) {
                content_end = idx;
                break;
            }
        }

        quote = quote.process(c, options);
    }

    let value_start = match separator {
        // Separators are ASCII.
        Some(separator) => separator + 1,
        None if find_separator => content_end,
        None => 0,
    };

    let mut fragment = &line[value_start..content_end];
    let mut continued = false;

    if options.line_continuation {
        let trimmed = fragment.trim_end();
        let backslashes = trimmed.len() - trimmed.trim_end_matches('\\').len();

        // An even number of trailing backslashes is a sequence of escaped backslashes.
        if backslashes % 2 == 1 {
            continued = true;
            fragment = &trimmed[..trimmed.len() - 1];
        }
    }

    if !quote.is_quoted() {
        fragment = fragment.trim_end();
    }

    (
        separator,
        content_end,
        ScannedValue {
            fragment,
            quote,
            continued,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(fragment: &str, quote: QuoteState, continued: bool) -> ScannedValue<'_> {
        ScannedValue {
            fragment,
            quote,
            continued,
        }
    }

    #[test]
    fn quote_fsm() {
        let options = IniOptions::default();

        let mut quote = QuoteState::Normal;

        quote = quote.process('"', &options);
        assert_eq!(quote, QuoteState::InDoubleQuote);

        // Non-matching quote is a normal character.
        quote = quote.process('\'', &options);
        assert_eq!(quote, QuoteState::InDoubleQuote);

        // Backslash does not escape the closing quote.
        quote = quote.process('\\', &options);
        assert_eq!(quote, QuoteState::InDoubleQuote);
        quote = quote.process('"', &options);
        assert_eq!(quote, QuoteState::Normal);

        // Nor the opening one.
        quote = quote.process('\\', &options);
        assert_eq!(quote, QuoteState::Normal);
        quote = quote.process('\'', &options);
        assert_eq!(quote, QuoteState::InSingleQuote);

        // Disabled quote characters never open a string.
        let options = IniOptions {
            string_quotes: IniStringQuote::Double,
            ..Default::default()
        };
        assert_eq!(
            QuoteState::Normal.process('\'', &options),
            QuoteState::Normal
        );
    }

    #[test]
    fn key_line() {
        let options = IniOptions::default();

        let scanned = scan_key_line("k = hello world ; note", &options).unwrap();
        assert_eq!(scanned.key, "k ");
        assert_eq!(scanned.separator, 2);
        assert_eq!(
            scanned.value,
            value(" hello world", QuoteState::Normal, false)
        );

        // Only the first separator ends the key.
        let scanned = scan_key_line("a=b=c", &options).unwrap();
        assert_eq!(scanned.key, "a");
        assert_eq!(scanned.value.fragment, "b=c");

        // Quoted separator is a part of the key.
        let scanned = scan_key_line("\"a=b\" = c", &options).unwrap();
        assert_eq!(scanned.key, "\"a=b\" ");
        assert_eq!(scanned.value.fragment, " c");
    }

    #[test]
    fn key_line_without_separator() {
        let options = IniOptions::default();

        assert_eq!(
            scan_key_line("key", &options).err().unwrap(),
            (IniErrorKind::ExpectedKeyEquals, 3)
        );
        // Separator in the comment.
        assert_eq!(
            scan_key_line("key ; = value", &options).err().unwrap(),
            (IniErrorKind::ExpectedKeyEquals, 4)
        );
        // Separator in the unbalanced quoted string.
        assert_eq!(
            scan_key_line("'key = value", &options).err().unwrap(),
            (IniErrorKind::ExpectedKeyEquals, 12)
        );
    }

    #[test]
    fn comments_in_quotes() {
        let options = IniOptions::default();

        let scanned = scan_key_line("k = \"semi;colon # hash\" ; comment", &options).unwrap();
        assert_eq!(
            scanned.value,
            value(" \"semi;colon # hash\"", QuoteState::Normal, false)
        );

        // Unbalanced quote - the rest of the line is the value.
        let scanned = scan_key_line("k = \"quoted start ; still value ", &options).unwrap();
        assert_eq!(
            scanned.value,
            value(
                " \"quoted start ; still value ",
                QuoteState::InDoubleQuote,
                false
            )
        );

        // Comments disabled inline.
        let options = IniOptions {
            inline_comments: false,
            ..Default::default()
        };
        let scanned = scan_key_line("k = a ; b", &options).unwrap();
        assert_eq!(scanned.value.fragment, " a ; b");
    }

    #[test]
    fn continuation() {
        let options = IniOptions::default();

        let scanned = scan_key_line("k = line1 \\", &options).unwrap();
        assert_eq!(scanned.value, value(" line1", QuoteState::Normal, true));

        // Comment after the backslash.
        let scanned = scan_key_line("k = line1 \\ ; comment", &options).unwrap();
        assert_eq!(scanned.value, value(" line1", QuoteState::Normal, true));

        // Whitespace before the backslash is kept inside quotes.
        let scanned = scan_key_line("k = \"line1   \\  ", &options).unwrap();
        assert_eq!(
            scanned.value,
            value(" \"line1   ", QuoteState::InDoubleQuote, true)
        );

        // Quote after a backslash closes the string.
        let scanned = scan_key_line("k = \"C:\\temp\\\" ; comment", &options).unwrap();
        assert_eq!(
            scanned.value,
            value(" \"C:\\temp\\\"", QuoteState::Normal, false)
        );

        // Escaped backslash.
        let scanned = scan_key_line("k = a\\\\", &options).unwrap();
        assert_eq!(scanned.value, value(" a\\\\", QuoteState::Normal, false));

        // Continuation disabled.
        let options = IniOptions {
            line_continuation: false,
            ..Default::default()
        };
        let scanned = scan_key_line("k = a \\", &options).unwrap();
        assert_eq!(scanned.value, value(" a \\", QuoteState::Normal, false));
    }

    #[test]
    fn continuation_line() {
        let options = IniOptions::default();

        // Carried open quote suppresses comments and closes on the matching quote.
        assert_eq!(
            scan_continuation_line("  still ; quoted' ; comment", QuoteState::InSingleQuote, &options),
            value("  still ; quoted'", QuoteState::Normal, false)
        );

        // No key is looked for on continuation lines.
        assert_eq!(
            scan_continuation_line("a = b \\", QuoteState::Normal, &options),
            value("a = b", QuoteState::Normal, true)
        );

        // Comment-only continuation line ends the value.
        assert_eq!(
            scan_continuation_line("; comment", QuoteState::Normal, &options),
            value("", QuoteState::Normal, false)
        );
    }
}
