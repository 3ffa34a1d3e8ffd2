#![allow(non_upper_case_globals)]

use bitflags::bitflags;

bitflags! {
    /// Flags which specify which characters are valid `.ini` config comment delimiters.
    pub struct IniCommentDelimiter: u8 {
        /// Comments not supported.
        const None = 0b00;
        /// `;`
        const Semicolon = 0b01;
        /// `#`
        const NumberSign = 0b10;
    }
}

bitflags! {
    /// Flags which specify which characters are valid `.ini` config key / value separators.
    pub struct IniKeyValueSeparator: u8 {
        /// `=`
        const Equals = 0b01;
        /// `:`
        const Colon = 0b10;
    }
}

bitflags! {
    /// Flags which specify which characters are valid `.ini` config quoted string delimiters.
    pub struct IniStringQuote: u8 {
        /// Quoted strings not supported.
        const None = 0b00;
        /// `'`
        const Single = 0b01;
        /// `"`
        const Double = 0b10;
    }
}

/// Controls how duplicate keys, if any, are handled in the sections of the `.ini` config.
///
/// Sections themselves are always merged: a repeated `[section]` header
/// simply continues adding keys to the same section.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum IniDuplicateKeys {
    /// Do not allow duplicate keys.
    Forbid,
    /// Use the first encountered instance of the key in the section,
    /// skip all following ones.
    First,
    /// Use the last encountered instance of the key in the section,
    /// overwriting all prior, if any.
    Last,
}

/// Configuration options for the `.ini` parser.
#[derive(Clone, Copy, Debug)]
pub(crate) struct IniOptions {
    /// Valid comment delimiter character(s).
    /// If [`None`](struct.IniCommentDelimiter.html#associatedconstant.None), comments are not supported.
    ///
    /// Default: [`Semicolon`](struct.IniCommentDelimiter.html#associatedconstant.Semicolon) |
    /// [`NumberSign`](struct.IniCommentDelimiter.html#associatedconstant.NumberSign).
    pub(crate) comments: IniCommentDelimiter,
    /// Whether inline comments (i.e. those which don't begin at the start of the line) are supported.
    /// If `comments` is [`None`](struct.IniCommentDelimiter.html#associatedconstant.None), this value is ignored.
    ///
    /// Default: `true`.
    pub(crate) inline_comments: bool,
    /// Valid key-value separator character(s).
    /// If no flag is set, [`Equals`](struct.IniKeyValueSeparator.html#associatedconstant.Equals) is assumed.
    ///
    /// Default: [`Equals`](struct.IniKeyValueSeparator.html#associatedconstant.Equals).
    pub(crate) key_value_separator: IniKeyValueSeparator,
    /// Valid string quote character(s).
    /// If [`None`](struct.IniStringQuote.html#associatedconstant.None), quoted strings are not supported
    /// and quote characters are treated as normal characters.
    ///
    /// Default: [`Single`](struct.IniStringQuote.html#associatedconstant.Single) |
    /// [`Double`](struct.IniStringQuote.html#associatedconstant.Double).
    pub(crate) string_quotes: IniStringQuote,
    /// Whether a backslash (`'\'`) at the end of the line continues the value on the next line.
    ///
    /// Default: `true`.
    pub(crate) line_continuation: bool,
    /// Duplicate key handling policy.
    ///
    /// Default: [`Last`](enum.IniDuplicateKeys.html#variant.Last).
    pub(crate) duplicate_keys: IniDuplicateKeys,
}

impl Default for IniOptions {
    fn default() -> Self {
        Self {
            comments: IniCommentDelimiter::Semicolon | IniCommentDelimiter::NumberSign,
            inline_comments: true,
            key_value_separator: IniKeyValueSeparator::Equals,
            string_quotes: IniStringQuote::Single | IniStringQuote::Double,
            line_continuation: true,
            duplicate_keys: IniDuplicateKeys::Last,
        }
    }
}

impl IniOptions {
    pub(crate) fn is_comment_char(&self, c: char) -> bool {
        match c {
            ';' => self.comments.contains(IniCommentDelimiter::Semicolon),
            '#' => self.comments.contains(IniCommentDelimiter::NumberSign),
            _ => false,
        }
    }

    pub(crate) fn is_inline_comment_char(&self, c: char) -> bool {
        self.inline_comments && self.is_comment_char(c)
    }

    pub(crate) fn is_key_value_separator_char(&self, c: char) -> bool {
        match c {
            '=' => self
                .key_value_separator
                .contains(IniKeyValueSeparator::Equals),
            ':' => self.key_value_separator.contains(IniKeyValueSeparator::Colon),
            _ => false,
        }
    }

    pub(crate) fn is_string_quote_char(&self, c: char) -> bool {
        match c {
            '\'' => self.string_quotes.contains(IniStringQuote::Single),
            '"' => self.string_quotes.contains(IniStringQuote::Double),
            _ => false,
        }
    }

    /// Must have some key-value separator - if none provided by the user, use `Equals`.
    pub(crate) fn validate(&mut self) {
        if self.key_value_separator.is_empty() {
            self.key_value_separator = IniKeyValueSeparator::Equals;
        }
    }
}
