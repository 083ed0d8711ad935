//! Field metadata in `key:"value"` form.
//!
//! A tag is a space-separated list of `key:"value"` pairs. Values are
//! double-quoted and may contain the escapes `\\`, `\"`, `\'`, `\n`, `\r`
//! and `\t`. Scanning stops at the first malformed pair; everything before
//! it stays readable.

use std::fmt;

/// Key holding the serialized name of a field (`json:"name,omitempty"`).
pub const DISPLAY_NAME_KEY: &str = "json";

/// Raw metadata attached to one record field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tag(String);

impl Tag {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Value stored under `key`, unquoted. `Some("")` when the key is
    /// present with an empty value.
    pub fn lookup(&self, key: &str) -> Option<String> {
        self.pairs()
            .find(|(name, _)| *name == key)
            .and_then(|(_, quoted)| unquote(quoted))
    }

    /// Alternate name from the `json` key, ignoring options after the
    /// first comma. `None` when absent, empty or `-`.
    pub fn display_name(&self) -> Option<String> {
        let raw = self.lookup(DISPLAY_NAME_KEY)?;
        let name = raw.split(',').next().unwrap_or_default();
        if name.is_empty() || name == "-" {
            None
        } else {
            Some(name.to_string())
        }
    }

    fn pairs(&self) -> Pairs<'_> {
        Pairs { rest: &self.0 }
    }
}

impl From<&str> for Tag {
    fn from(raw: &str) -> Self {
        Tag::new(raw)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Iterator over `(key, quoted value)` pairs.
struct Pairs<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Pairs<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.rest.trim_start_matches(' ');
        let key_len = rest
            .find(|c: char| c <= ' ' || c == ':' || c == '"' || c == '\u{7f}')
            .unwrap_or(rest.len());
        if key_len == 0 || !rest[key_len..].starts_with(":\"") {
            self.rest = "";
            return None;
        }
        let key = &rest[..key_len];
        let quoted_start = key_len + 1;
        let bytes = rest.as_bytes();

        let mut i = quoted_start + 1;
        while i < bytes.len() && bytes[i] != b'"' {
            if bytes[i] == b'\\' {
                i += 1;
            }
            i += 1;
        }
        if i >= bytes.len() {
            self.rest = "";
            return None;
        }

        let quoted = &rest[quoted_start..=i];
        self.rest = &rest[i + 1..];
        Some((key, quoted))
    }
}

fn unquote(quoted: &str) -> Option<String> {
    let inner = quoted.strip_prefix('"')?.strip_suffix('"')?;
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let escaped = match chars.next()? {
            '\\' => '\\',
            '"' => '"',
            '\'' => '\'',
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            _ => return None,
        };
        out.push(escaped);
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_finds_each_pair() {
        let tag = Tag::new(r#"json:"count" minimum:"5" maximum:"500""#);
        assert_eq!(tag.lookup("minimum").as_deref(), Some("5"));
        assert_eq!(tag.lookup("maximum").as_deref(), Some("500"));
        assert_eq!(tag.lookup("json").as_deref(), Some("count"));
        assert_eq!(tag.lookup("default"), None);
    }

    #[test]
    fn lookup_unescapes_values() {
        let tag = Tag::new(r#"pattern-strip:"\\.[a-z]+\"x""#);
        assert_eq!(tag.lookup("pattern-strip").as_deref(), Some(r#"\.[a-z]+"x"#));
    }

    #[test]
    fn empty_value_is_present() {
        let tag = Tag::new(r#"default:"""#);
        assert_eq!(tag.lookup("default").as_deref(), Some(""));
    }

    #[test]
    fn malformed_tail_keeps_earlier_pairs() {
        let tag = Tag::new(r#"minimum:"1" broken maximum:"9""#);
        assert_eq!(tag.lookup("minimum").as_deref(), Some("1"));
        assert_eq!(tag.lookup("maximum"), None);

        let unterminated = Tag::new(r#"minimum:"1"#);
        assert_eq!(unterminated.lookup("minimum"), None);
    }

    #[test]
    fn unknown_escape_hides_value() {
        let tag = Tag::new(r#"choice:"a\qb""#);
        assert_eq!(tag.lookup("choice"), None);
    }

    #[test]
    fn display_name_strips_options() {
        assert_eq!(
            Tag::new(r#"json:"user_id,omitempty""#).display_name().as_deref(),
            Some("user_id")
        );
        assert_eq!(Tag::new(r#"json:"-""#).display_name(), None);
        assert_eq!(Tag::new(r#"json:",omitempty""#).display_name(), None);
        assert_eq!(Tag::new("").display_name(), None);
    }

    #[test]
    fn non_ascii_values_survive() {
        let tag = Tag::new(r#"default:"Без описания" json:"описание""#);
        assert_eq!(tag.lookup("default").as_deref(), Some("Без описания"));
        assert_eq!(tag.display_name().as_deref(), Some("описание"));
    }
}
