mod classify;
mod fsm_state;
mod lines;

use {
    crate::*,
    classify::*,
    fsm_state::*,
    lines::*,
    static_assertions::assert_impl_all,
    tracing::{debug, trace},
};

/// An entry whose key was parsed, but the value of which may still continue on the following line(s).
struct PendingEntry {
    key: String,
    /// Value accumulated so far, untrimmed and maybe quoted.
    value: String,
    /// Quote state at the end of the last accumulated line.
    quote: QuoteState,
    /// Position of the key in the source string.
    /// Used for error reporting.
    line: u32,
    column: u32,
}

/// Persistent state used to communicate information between the lines of the `.ini` source.
struct IniParserPersistentState {
    /// Current section, if any.
    section: Option<String>,
    /// Entry the value of which continues on the next line, if any.
    pending: Option<PendingEntry>,
    /// Number of values added to the config.
    num_values: usize,
}

impl IniParserPersistentState {
    fn new() -> Self {
        Self {
            section: None,
            pending: None,
            num_values: 0,
        }
    }

    /// Processes a key / value or a continuation `line`.
    fn process_content<C: IniConfig>(
        &mut self,
        line_number: u32,
        line: &str,
        config: &mut C,
        options: &IniOptions,
    ) -> Result<(), IniError> {
        use IniErrorKind::*;

        let key_offset = line.len() - line.trim_start().len();

        // Values are only ever pending in a section.
        let section = match self.section.as_deref() {
            Some(section) => section,
            None => {
                return Err(IniParser::error(
                    line_number,
                    line,
                    (KeyBeforeSection, key_offset),
                ))
            }
        };

        let (entry, continued) = match self.pending.take() {
            // Continue the pending value.
            Some(mut entry) => {
                if line[key_offset..].starts_with('[') {
                    trace!(
                        section,
                        key = %entry.key,
                        line = line_number,
                        "section header continues the pending value"
                    );
                }

                let scanned = scan_continuation_line(line, entry.quote, options);

                append_fragment(&mut entry.value, scanned.fragment, entry.quote);
                entry.quote = scanned.quote;

                (entry, scanned.continued)
            }
            // Start a new entry.
            None => {
                let scanned = scan_key_line(line, options)
                    .map_err(|err| IniParser::error(line_number, line, err))?;

                let key = unquote(scanned.key.trim(), options);

                if key.is_empty() {
                    return Err(IniParser::error(
                        line_number,
                        line,
                        (EmptyKey, scanned.separator),
                    ));
                }

                let mut value = String::new();
                append_fragment(&mut value, scanned.value.fragment, QuoteState::Normal);

                (
                    PendingEntry {
                        key: key.into(),
                        value,
                        quote: scanned.value.quote,
                        line: line_number,
                        column: column(line, key_offset),
                    },
                    scanned.value.continued,
                )
            }
        };

        if continued {
            self.pending = Some(entry);
        } else if add_entry(section, entry, config, options)? {
            self.num_values += 1;
        }

        Ok(())
    }

    /// Adds the pending entry, if any, to the config.
    /// Called on blank lines and at the end of the source, which terminate the continued value.
    fn flush<C: IniConfig>(&mut self, config: &mut C, options: &IniOptions) -> Result<(), IniError> {
        if let (Some(section), Some(entry)) = (self.section.as_deref(), self.pending.take()) {
            trace!(section, key = %entry.key, line = entry.line, "flushing unterminated continued value");

            if add_entry(section, entry, config, options)? {
                self.num_values += 1;
            }
        }

        Ok(())
    }
}

/// Unquotes the accumulated value and adds it to the config's `section`,
/// according to the duplicate key policy.
/// Returns `true` if the value was added.
fn add_entry<C: IniConfig>(
    section: &str,
    entry: PendingEntry,
    config: &mut C,
    options: &IniOptions,
) -> Result<bool, IniError> {
    let is_key_unique = !config.contains_key(section, &entry.key);

    if !is_key_unique {
        match options.duplicate_keys {
            IniDuplicateKeys::Forbid => {
                return Err(IniError {
                    line: entry.line,
                    column: entry.column,
                    error: IniErrorKind::DuplicateKey,
                });
            }
            IniDuplicateKeys::First => {
                trace!(section, key = %entry.key, line = entry.line, "skipping duplicate key");
                return Ok(false);
            }
            IniDuplicateKeys::Last => {}
        }
    }

    let value = unquote(entry.value.trim(), options);

    trace!(section, key = %entry.key, value, line = entry.line, "parsed value");

    config.add_value(section, &entry.key, value.into(), !is_key_unique);

    Ok(true)
}

/// Appends the value `fragment` of a physical line to the accumulated `value`.
/// `quote` is the quote state at the start of the fragment.
/// Fragments which start outside of quotes are trimmed and joined with a single space;
/// fragments which start inside an open quote are appended verbatim.
fn append_fragment(value: &mut String, fragment: &str, quote: QuoteState) {
    if quote.is_quoted() {
        value.push_str(fragment);
        return;
    }

    let fragment = fragment.trim_start();

    if fragment.is_empty() {
        return;
    }

    if !value.is_empty() {
        value.push(' ');
    }

    value.push_str(fragment);
}

/// Returns the 1-based char column of the byte `offset` in the `line`.
fn column(line: &str, offset: usize) -> u32 {
    line[..offset].chars().count() as u32 + 1
}

/// Parses the `.ini` config string, using the user-provided parsing options
/// and the [`event handler`](trait.IniConfig.html) object.
#[derive(Clone, Debug)]
pub struct IniParser<'s> {
    /// Source `.ini` string.
    source: &'s str,
    /// Parsing options as provided by the user.
    options: IniOptions,
}

assert_impl_all!(IniParser<'static>: Send, Sync);

impl<'s> IniParser<'s> {
    /// Creates a new [`parser`](struct.IniParser.html) from the `.ini` config `string`
    /// using default parsing options.
    pub fn new(string: &'s str) -> Self {
        Self {
            source: string,
            options: Default::default(),
        }
    }

    /// Sets the valid comment delimiter character(s).
    /// If [`None`](struct.IniCommentDelimiter.html#associatedconstant.None), comments are not supported.
    ///
    /// Default: [`Semicolon`](struct.IniCommentDelimiter.html#associatedconstant.Semicolon) |
    /// [`NumberSign`](struct.IniCommentDelimiter.html#associatedconstant.NumberSign).
    pub fn comments(mut self, comments: IniCommentDelimiter) -> Self {
        self.options.comments = comments;
        self
    }

    /// Sets whether inline comments (i.e. those which don't begin at the start of the line) are supported.
    /// If [`comments`](#method.comments) is [`None`](struct.IniCommentDelimiter.html#associatedconstant.None), this value is ignored.
    ///
    /// Default: `true`.
    pub fn inline_comments(mut self, inline_comments: bool) -> Self {
        self.options.inline_comments = inline_comments;
        self
    }

    /// Sets the valid key-value separator character(s).
    /// If no flag is set, [`Equals`](struct.IniKeyValueSeparator.html#associatedconstant.Equals) is assumed.
    ///
    /// Default: [`Equals`](struct.IniKeyValueSeparator.html#associatedconstant.Equals).
    pub fn key_value_separator(mut self, key_value_separator: IniKeyValueSeparator) -> Self {
        self.options.key_value_separator = key_value_separator;
        self
    }

    /// Sets the valid string quote character(s).
    /// If [`None`](struct.IniStringQuote.html#associatedconstant.None), quoted strings are not supported.
    ///
    /// Default: [`Single`](struct.IniStringQuote.html#associatedconstant.Single) |
    /// [`Double`](struct.IniStringQuote.html#associatedconstant.Double).
    pub fn string_quotes(mut self, string_quotes: IniStringQuote) -> Self {
        self.options.string_quotes = string_quotes;
        self
    }

    /// Sets whether a backslash (`'\'`) at the end of the line (after the inline comment, if any, is removed)
    /// continues the value on the next line.
    ///
    /// Default: `true`.
    pub fn line_continuation(mut self, line_continuation: bool) -> Self {
        self.options.line_continuation = line_continuation;
        self
    }

    /// Sets the duplicate key handling policy.
    ///
    /// Default: [`Last`](enum.IniDuplicateKeys.html#variant.Last).
    pub fn duplicate_keys(mut self, duplicate_keys: IniDuplicateKeys) -> Self {
        self.options.duplicate_keys = duplicate_keys;
        self
    }

    /// Consumes the parser and tries to parse the `.ini` config string, calling the methods on the passed `config` event handler.
    pub fn parse<C: IniConfig>(self, config: &mut C) -> Result<(), IniError> {
        let mut options = self.options;
        options.validate();

        let mut state = IniParserPersistentState::new();

        for (line_number, line) in IniLines::new(self.source) {
            match classify(line, state.pending.is_some(), &options)
                .map_err(|err| Self::error(line_number, line, err))?
            {
                IniLine::Blank => state.flush(config, &options)?,
                // Never returned while a value is pending.
                IniLine::Section(section) => {
                    debug!(section, line = line_number, "section");

                    state.section = Some(section.into());
                }
                IniLine::Content => state.process_content(line_number, line, config, &options)?,
            }
        }

        state.flush(config, &options)?;

        debug!(values = state.num_values, "parsed `.ini` config");

        Ok(())
    }

    /// Error helper method.
    /// `offset` is the byte offset in the `line` where the error was detected.
    fn error(line_number: u32, line: &str, (error, offset): (IniErrorKind, usize)) -> IniError {
        IniError {
            line: line_number,
            column: column(line, offset),
            error,
        }
    }
}
