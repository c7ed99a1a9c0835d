//! The backslash escaping used inside quoted keys and values.
//!
//! Only `\` and `"` are ever escaped, but unescaping accepts a backslash in
//! front of _any_ character and keeps just that character. PostgreSQL reads
//! hstore text the same way, so this has to stay permissive.

use std::borrow::Cow;
use std::fmt::{self, Display, Write as _};

const fn needs_escape(b: u8) -> bool {
    matches!(b, b'\\' | b'"')
}

/// Escapes `\` and `"` by prefixing each with a `\`.
///
/// Returns the input unchanged (borrowed) when there is nothing to escape.
///
/// # Examples
///
/// ```
/// assert_eq!(serde_hstore::escape(r#"say "hi""#), r#"say \"hi\""#);
/// assert_eq!(serde_hstore::escape(r"C:\temp"), r"C:\\temp");
/// ```
pub fn escape(raw: &str) -> Cow<'_, str> {
    if !raw.bytes().any(needs_escape) {
        return Cow::Borrowed(raw);
    }

    Cow::Owned(Escape(raw).to_string())
}

/// Byte string version of [`escape`].
///
/// Since both escaped characters are ASCII, this agrees with [`escape`] on any
/// ASCII-compatible encoding of the same text.
pub fn escape_bytes(raw: &[u8]) -> Cow<'_, [u8]> {
    let extra = raw.iter().filter(|&&b| needs_escape(b)).count();
    if extra == 0 {
        return Cow::Borrowed(raw);
    }

    let mut out = Vec::with_capacity(raw.len() + extra);
    for &b in raw {
        if needs_escape(b) {
            out.push(b'\\');
        }
        out.push(b);
    }

    Cow::Owned(out)
}

/// Reverses [`escape`], replacing every backslash-prefixed character with the
/// character alone.
///
/// The character after a backslash is always taken literally, whatever it is.
/// A single backslash at the very end has nothing to escape and is kept.
///
/// # Examples
///
/// ```
/// assert_eq!(serde_hstore::unescape(r#"abc\"def\\ghi\ajkl"#), r#"abc"def\ghiajkl"#);
/// ```
pub fn unescape(escaped: &str) -> Cow<'_, str> {
    let Some(first) = escaped.find('\\') else {
        return Cow::Borrowed(escaped);
    };

    let (head, tail) = escaped.split_at(first);
    let mut out = String::with_capacity(escaped.len());
    out.push_str(head);

    let mut chars = tail.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            out.push(chars.next().unwrap_or('\\'));
        } else {
            out.push(c);
        }
    }

    Cow::Owned(out)
}

/// Byte string version of [`unescape`].
pub fn unescape_bytes(escaped: &[u8]) -> Cow<'_, [u8]> {
    if !escaped.contains(&b'\\') {
        return Cow::Borrowed(escaped);
    }

    let mut out = Vec::with_capacity(escaped.len());
    let mut bytes = escaped.iter().copied();
    while let Some(b) = bytes.next() {
        if b == b'\\' {
            out.push(bytes.next().unwrap_or(b'\\'));
        } else {
            out.push(b);
        }
    }

    Cow::Owned(out)
}

/// [`Display`]s a [`str`] in its escaped form without allocating.
///
/// This is what [`escape`] uses when it has to produce a new string, and what
/// [`PairWriter`](crate::PairWriter) writes quoted tokens with.
#[derive(Debug, Clone, Copy)]
pub struct Escape<'a>(pub &'a str);

impl Display for Escape<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for part in self.0.split_inclusive(['\\', '"']) {
            match part.as_bytes().last() {
                Some(&last) if needs_escape(last) => {
                    let (head, tail) = part.split_at(part.len() - 1);
                    f.write_str(head)?;
                    f.write_char('\\')?;
                    f.write_str(tail)?;
                },
                _ => f.write_str(part)?,
            }
        }

        Ok(())
    }
}
