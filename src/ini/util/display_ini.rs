use {
    crate::*,
    std::fmt::Write,
};

/// Where in the `.ini` line a string is written; determines which characters force it to be quoted.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum IniStringKind {
    Section,
    Key,
    Value,
}

impl IniStringKind {
    /// Returns `true` if the `string` must be quoted to be parsed back verbatim
    /// by the parser with default options.
    fn needs_quotes(self, string: &str) -> bool {
        let is_special = |c: char| match c {
            ';' | '#' | '\'' | '"' => true,
            '=' | ':' => self != IniStringKind::Value,
            ']' => self == IniStringKind::Section,
            _ => false,
        };

        string.starts_with(char::is_whitespace)
            || string.ends_with(char::is_whitespace)
            // Line continuation.
            || (self == IniStringKind::Value && string.ends_with('\\'))
            // Section header.
            || (self == IniStringKind::Key && string.starts_with('['))
            || string.chars().any(is_special)
    }
}

/// Writes the `string` to the writer `w`, enclosing it in string quotes if necessary.
/// Prefers double quotes (`'"'`) and falls back to single quotes (`'\''`)
/// if `string` contains double quotes.
fn write_ini_string<W: Write>(
    w: &mut W,
    string: &str,
    kind: IniStringKind,
) -> Result<(), ToIniStringError> {
    use ToIniStringError::*;

    if string.contains(|c: char| c == '\n' || c == '\r') {
        return Err(UnrepresentableString(string.into()));
    }

    if !kind.needs_quotes(string) {
        w.write_str(string)?;
        return Ok(());
    }

    let quote = if !string.contains('"') {
        '"'
    } else if !string.contains('\'') {
        '\''
    } else {
        return Err(UnrepresentableString(string.into()));
    };

    write!(w, "{}{}{}", quote, string, quote)?;

    Ok(())
}

/// Writes the `section` header line to the writer `w`.
pub(crate) fn write_ini_section<W: Write>(w: &mut W, section: &str) -> Result<(), ToIniStringError> {
    if section.is_empty() {
        return Err(ToIniStringError::UnrepresentableString(section.into()));
    }

    w.write_char('[')?;
    write_ini_string(w, section, IniStringKind::Section)?;
    writeln!(w, "]")?;

    Ok(())
}

/// Writes the `key` / `value` line to the writer `w`.
pub(crate) fn write_ini_key_value<W: Write>(
    w: &mut W,
    key: &str,
    value: &str,
) -> Result<(), ToIniStringError> {
    if key.is_empty() {
        return Err(ToIniStringError::UnrepresentableString(key.into()));
    }

    write_ini_string(w, key, IniStringKind::Key)?;
    w.write_str(" = ")?;
    write_ini_string(w, value, IniStringKind::Value)?;
    writeln!(w)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_value(key: &str, value: &str) -> Result<String, ToIniStringError> {
        let mut result = String::new();
        write_ini_key_value(&mut result, key, value)?;
        Ok(result)
    }

    #[test]
    fn quoting() {
        assert_eq!(key_value("a", "b c").unwrap(), "a = b c\n");
        assert_eq!(key_value("a", "").unwrap(), "a = \n");
        assert_eq!(key_value("a", "x=y").unwrap(), "a = x=y\n");
        assert_eq!(key_value("a=b", "c").unwrap(), "\"a=b\" = c\n");
        assert_eq!(key_value("[a", "c").unwrap(), "\"[a\" = c\n");
        assert_eq!(key_value("a", " b;").unwrap(), "a = \" b;\"\n");
        assert_eq!(key_value("a", "say \"hi\"").unwrap(), "a = 'say \"hi\"'\n");
        assert_eq!(key_value("a", "c:\\").unwrap(), "a = \"c:\\\"\n");
        assert_eq!(key_value("c\\", "d").unwrap(), "c\\ = d\n");
        assert_eq!(key_value("a=\\", "b").unwrap(), "\"a=\\\" = b\n");

        let mut section = String::new();
        write_ini_section(&mut section, "a]b").unwrap();
        assert_eq!(section, "[\"a]b\"]\n");
    }

    #[test]
    fn unrepresentable() {
        assert_eq!(
            key_value("a", "b\nc").err().unwrap(),
            ToIniStringError::UnrepresentableString("b\nc".into())
        );
        assert_eq!(
            key_value("a", "'b' \"c\"").err().unwrap(),
            ToIniStringError::UnrepresentableString("'b' \"c\"".into())
        );
        assert_eq!(
            key_value("", "b").err().unwrap(),
            ToIniStringError::UnrepresentableString("".into())
        );
    }
}
