//! Échappement des valeurs TEXT iCalendar.

/// Échappe `\`, `,`, `;` et les fins de ligne (`\n` littéral).
///
/// L'antislash passe en premier pour ne pas doubler les échappements suivants.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push_str("\\\\"),
            ',' => out.push_str("\\,"),
            ';' => out.push_str("\\;"),
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push_str("\\n");
            }
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out
}

/// Inverse de [`escape_text`] (les fins de ligne reviennent en `\n`).
pub fn unescape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') | Some('N') => out.push('\n'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_each_special() {
        assert_eq!(escape_text(r"a\b"), r"a\\b");
        assert_eq!(escape_text("a,b;c"), r"a\,b\;c");
        assert_eq!(escape_text("l1\nl2\r\nl3"), r"l1\nl2\nl3");
    }

    #[test]
    fn backslash_first() {
        // un `\n` littéral déjà présent ne doit pas devenir un saut de ligne
        assert_eq!(escape_text(r"\n"), r"\\n");
        assert_eq!(unescape_text(&escape_text(r"\n")), r"\n");
    }

    #[test]
    fn round_trip() {
        let raw = "CHECK-IN 07:00z (08:00 LT)\nDuty: A;B, C\\D\n";
        let escaped = escape_text(raw);
        assert!(!escaped.contains('\n'));
        assert!(!escaped.contains('\r'));
        assert_eq!(unescape_text(&escaped), raw);
    }
}
