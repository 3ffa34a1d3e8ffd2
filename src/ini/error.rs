use thiserror::Error;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Error)]
pub enum IniErrorKind {
    /// A key / value line was encountered before any section header.
    #[error("Key / value line encountered before any section header.")]
    KeyBeforeSection,
    /// Malformed section header - missing section end delimiter,
    /// comment before the section end delimiter, empty section name
    /// or unexpected characters after the section end delimiter.
    #[error("Malformed or empty section header.")]
    InvalidSectionHeader,
    /// A line starting a new key has no (unquoted) key-value separator.
    #[error("Expected a key-value separator.")]
    ExpectedKeyEquals,
    /// Empty keys are invalid.
    #[error("Empty keys are invalid.")]
    EmptyKey,
    /// Duplicate key encountered and is not allowed by options.
    #[error("Duplicate key encountered and is not allowed by options.")]
    DuplicateKey,
}

/// An error returned by the INI parser.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Error)]
#[error("INI parse error. Line: {line}, column: {column}. {error}")]
pub struct IniError {
    /// Line in the source string where the error occured.
    pub line: u32,
    /// Column in the source string where the error occured.
    pub column: u32,
    /// Actual error.
    pub error: IniErrorKind,
}

/// An error returned by `to_ini_string`.
#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum ToIniStringError {
    /// The composite key has no section part (no `'.'`).
    /// Contains the composite key.
    #[error("Composite key \"{0}\" has no section.")]
    MissingSection(String),
    /// The string contains a line break, or needs quoting but contains both quote characters.
    /// Contains the string.
    #[error("String \"{0}\" cannot be represented in an `.ini` config.")]
    UnrepresentableString(String),
    /// General write error (out of memory?).
    #[error("General write error (out of memory?).")]
    WriteError,
}

impl From<std::fmt::Error> for ToIniStringError {
    fn from(_: std::fmt::Error) -> Self {
        ToIniStringError::WriteError
    }
}
