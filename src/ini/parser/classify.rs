use {super::fsm_state::QuoteState, crate::*};

/// Kind of a physical `.ini` line.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum IniLine<'l> {
    /// Empty / whitespace-only line, or a line comment.
    Blank,
    /// Section header; contains the trimmed and unquoted section name.
    Section(&'l str),
    /// Key / value line, or a continuation of the pending value.
    Content,
}

/// Classifies the physical `line`.
/// If `pending` is `true`, a value continued from the previous line is pending,
/// and anything but a whitespace-only line is its continuation.
/// On error returns the error and the byte offset in the line where it was detected.
pub(crate) fn classify<'l>(
    line: &'l str,
    pending: bool,
    options: &IniOptions,
) -> Result<IniLine<'l>, (IniErrorKind, usize)> {
    let trimmed = line.trim_start();

    let first = match trimmed.chars().next() {
        Some(first) => first,
        None => return Ok(IniLine::Blank),
    };

    if pending {
        Ok(IniLine::Content)
    } else if options.is_comment_char(first) {
        Ok(IniLine::Blank)
    } else if first == '[' {
        let start = line.len() - trimmed.len() + 1;
        parse_section_header(line, start, options).map(IniLine::Section)
    } else {
        Ok(IniLine::Content)
    }
}

/// Parses the section name, starting at byte offset `start` (right after the section start delimiter).
/// The name ends at the first unquoted section end delimiter (`']'`),
/// which may only be followed by whitespace or an inline comment.
fn parse_section_header<'l>(
    line: &'l str,
    start: usize,
    options: &IniOptions,
) -> Result<&'l str, (IniErrorKind, usize)> {
    use IniErrorKind::*;

    let body = &line[start..];

    let mut quote = QuoteState::Normal;
    let mut end = None;

    for (idx, c) in body.char_indices() {
        if !quote.is_quoted() {
            if c == ']' {
                end = Some(idx);
                break;
            }

            if options.is_inline_comment_char(c) {
                return Err((InvalidSectionHeader, start + idx));
            }
        }

        quote = quote.process(c, options);
    }

    let end = end.ok_or((InvalidSectionHeader, line.len()))?;

    let name = unquote(body[..end].trim(), options);

    if name.is_empty() {
        return Err((InvalidSectionHeader, start + end));
    }

    let rest = body[end + 1..].trim_start();

    match rest.chars().next() {
        None => Ok(name),
        Some(c) if options.is_inline_comment_char(c) => Ok(name),
        Some(_) => Err((InvalidSectionHeader, line.len() - rest.len())),
    }
}
