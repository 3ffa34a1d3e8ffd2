use memchr::memchr2;

/// Splits the `.ini` source string into physical lines.
///
/// A line is terminated by `'\n'`, `'\r'` or `"\r\n"`; the terminator is not part of the line.
/// A terminator at the very end of the source does not produce an extra empty line,
/// and an empty source produces no lines at all.
///
/// Yields `(line number, line)` tuples; line numbers start at `1`.
/// Cloning the iterator forks the iteration at the current position.
#[derive(Clone, Debug)]
pub(crate) struct IniLines<'s> {
    rest: &'s str,
    line: u32,
}

impl<'s> IniLines<'s> {
    pub(crate) fn new(source: &'s str) -> Self {
        Self {
            rest: source,
            line: 0,
        }
    }
}

impl<'s> Iterator for IniLines<'s> {
    type Item = (u32, &'s str);

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }

        let bytes = self.rest.as_bytes();

        // Both terminators are ASCII, so the split is always on a char boundary.
        let line = match memchr2(b'\r', b'\n', bytes) {
            Some(idx) => {
                let terminator_len = if bytes[idx] == b'\r' && bytes.get(idx + 1) == Some(&b'\n') {
                    2
                } else {
                    1
                };

                let line = &self.rest[..idx];
                self.rest = &self.rest[idx + terminator_len..];
                line
            }
            None => std::mem::take(&mut self.rest),
        };

        self.line += 1;

        Some((self.line, line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(source: &str) -> Vec<(u32, &str)> {
        IniLines::new(source).collect()
    }

    #[test]
    fn empty() {
        assert!(lines("").is_empty());
    }

    #[test]
    fn terminators() {
        assert_eq!(
            lines("a\nb\rc\r\nd"),
            vec![(1, "a"), (2, "b"), (3, "c"), (4, "d")]
        );
        // Trailing terminator - no extra line.
        assert_eq!(lines("a\r\n"), vec![(1, "a")]);
        // `"\n\r"` is two line breaks.
        assert_eq!(lines("a\n\rb"), vec![(1, "a"), (2, ""), (3, "b")]);
        assert_eq!(lines("\n"), vec![(1, "")]);
        assert_eq!(lines("\r\n\r\n"), vec![(1, ""), (2, "")]);
    }

    #[test]
    fn restartable() {
        let mut iter = IniLines::new("a\nb\nc");
        iter.next();

        let fork = iter.clone();

        assert_eq!(iter.collect::<Vec<_>>(), vec![(2, "b"), (3, "c")]);
        assert_eq!(fork.collect::<Vec<_>>(), vec![(2, "b"), (3, "c")]);

        // A fresh iterator over the same source starts from the beginning again.
        assert_eq!(IniLines::new("a\nb\nc").count(), 3);
    }

    #[test]
    fn unicode() {
        assert_eq!(
            lines("ключ = значение\r\n日本"),
            vec![(1, "ключ = значение"), (2, "日本")]
        );
    }
}
