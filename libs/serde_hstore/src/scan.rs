//! Scans hstore text into key-value pairs.
//!
//! The grammar of a single pair is, in order:
//!
//! 1. a key, either a double-quoted run in which a backslash escapes the next
//!    character, or a bare run of non-whitespace up to `=>`, `:` or whitespace
//! 2. optional whitespace, then `=>` or `:`
//! 3. optional whitespace, then a value: a double-quoted run, the bare token
//!    `NULL` in any case if only whitespace follows it up to the next `,`,
//!    or a bare run up to the next unescaped `,`
//! 4. optional whitespace and a `,`, unless the input ends
//!
//! Only whitespace may appear between pairs. Everything else makes the input
//! malformed and the error points at the first byte that isn't accounted for.

use std::borrow::Cow;
use std::iter::FusedIterator;

use crate::error::{Error, Result};
use crate::escape::unescape;

/// A pair as borrowed from the scanned text.
///
/// Keys and values are only owned if they contained escape sequences.
pub type RawPair<'a> = (Cow<'a, str>, Option<Cow<'a, str>>);

/// Lazily scans pairs out of hstore text.
///
/// Returned by [`decode_lazy`]. Each call to [`next`](Iterator::next) scans
/// exactly one pair. The first error ends the iteration; when collecting into a
/// [`Result`], that means no partial output.
///
/// # Examples
///
/// ```
/// let mut pairs = serde_hstore::decode_lazy(r#"a=>1, b => 2, c => null, d => "NULL""#);
/// let (key, value) = pairs.next().unwrap().unwrap();
/// assert_eq!((key.as_ref(), value.as_deref()), ("a", Some("1")));
/// assert_eq!(pairs.count(), 3);
/// ```
#[derive(Debug, Clone)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Pairs<'a> {
    text: &'a str,
    pos: usize,
    needs_comma: bool,
    done: bool,
}

impl<'a> Pairs<'a> {
    /// Creates a scanner over `text`.
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            pos: 0,
            needs_comma: false,
            done: false,
        }
    }

    /// Gets the byte offset up to which the text has been consumed.
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// Gets the text that has not been scanned yet.
    pub fn remainder(&self) -> &'a str {
        &self.text[self.pos..]
    }

    fn fail(&mut self, offset: usize) -> Error {
        self.done = true;
        log::debug!("malformed hstore input at byte {offset} of {}", self.text.len());
        Error::Malformed { offset }
    }

    fn scan_next(&mut self) -> Option<Result<RawPair<'a>>> {
        let gap = self.pos;
        let rest = &self.text[gap..];
        let trimmed = rest.trim_start();
        if trimmed.is_empty() {
            self.pos = self.text.len();
            self.done = true;
            return None;
        }

        if self.needs_comma {
            return Some(Err(self.fail(gap)));
        }

        let mut cursor = Cursor {
            text: self.text,
            pos: self.text.len() - trimmed.len(),
        };

        match cursor.pair() {
            Some(scanned) => {
                self.pos = cursor.pos;
                self.needs_comma = !scanned.terminated;
                Some(Ok((scanned.key, scanned.value)))
            },
            None => Some(Err(self.fail(gap))),
        }
    }
}

impl<'a> Iterator for Pairs<'a> {
    type Item = Result<RawPair<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        self.scan_next()
    }
}

impl FusedIterator for Pairs<'_> {}

/// Lazily decodes hstore text.
///
/// See [`Pairs`] for details.
pub fn decode_lazy(text: &str) -> Pairs<'_> {
    Pairs::new(text)
}

/// Decodes hstore text into any collection of owned pairs.
///
/// Collecting into a map collapses duplicate keys; the last value wins.
/// Collecting into a [`Vec`] keeps every pair in order.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
///
/// let map: HashMap<String, Option<String>> = serde_hstore::decode(r#""a"=>"1", "b"=>NULL"#)?;
/// assert_eq!(map["a"].as_deref(), Some("1"));
/// assert_eq!(map["b"], None);
///
/// let list: Vec<_> = serde_hstore::decode("a=>1, a=>2")?;
/// assert_eq!(list.len(), 2);
/// # Ok::<(), serde_hstore::Error>(())
/// ```
///
/// # Errors
///
/// Returns [`Error::Malformed`] if the text isn't well-formed hstore. No
/// partial collection is returned in that case.
pub fn decode<C>(text: &str) -> Result<C>
where
    C: FromIterator<(String, Option<String>)>,
{
    decode_lazy(text).map(|pair| pair.map(into_owned)).collect()
}

/// Converts a [`RawPair`] into an owned pair.
pub fn into_owned((key, value): RawPair<'_>) -> (String, Option<String>) {
    (key.into_owned(), value.map(Cow::into_owned))
}

#[derive(Debug)]
struct Scanned<'a> {
    key: Cow<'a, str>,
    value: Option<Cow<'a, str>>,
    terminated: bool,
}

/// Position within the text while scanning a single pair.
///
/// Every method either advances past what it matched or leaves the position
/// where it was.
#[derive(Debug)]
struct Cursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    fn is_end(&self) -> bool {
        self.pos == self.text.len()
    }

    fn skip_whitespace(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn eat(&mut self, token: &str) -> bool {
        let matched = self.rest().starts_with(token);
        if matched {
            self.pos += token.len();
        }
        matched
    }

    fn pair(&mut self) -> Option<Scanned<'a>> {
        let key = match self.quoted() {
            Some(key) => unescape(key),
            None if self.rest().starts_with('"') => return None,
            None => Cow::Borrowed(self.bare_key()?),
        };

        self.skip_whitespace();
        if !self.eat("=>") && !self.eat(":") {
            return None;
        }
        self.skip_whitespace();

        // quoting wins over the null keyword: `"NULL"` is text
        let value = if let Some(value) = self.quoted() {
            Some(unescape(value))
        } else if self.rest().starts_with('"') {
            return None;
        } else if self.null() {
            None
        } else {
            Some(Cow::Borrowed(self.bare_value()?))
        };

        let before_comma = self.pos;
        self.skip_whitespace();
        let terminated = if self.eat(",") {
            true
        } else {
            // don't swallow whitespace before whatever comes next
            self.pos = before_comma;
            self.is_end()
        };

        Some(Scanned {
            key,
            value,
            terminated,
        })
    }

    /// Scans a quoted run and returns its still escaped content.
    fn quoted(&mut self) -> Option<&'a str> {
        let rest = self.rest();
        let body = rest.strip_prefix('"')?;

        let mut chars = body.char_indices();
        while let Some((index, c)) = chars.next() {
            match c {
                '\\' => _ = chars.next(),
                '"' => {
                    // opening quote, content, closing quote
                    self.pos += index + 2;
                    return Some(&body[..index]);
                },
                _ => {},
            }
        }

        None
    }

    /// Scans a bare key, which ends at whitespace or a separator.
    fn bare_key(&mut self) -> Option<&'a str> {
        let rest = self.rest();
        let end = rest
            .char_indices()
            .find(|&(index, c)| c.is_whitespace() || c == ':' || rest[index..].starts_with("=>"))
            .map_or(rest.len(), |(index, _)| index);

        if end == 0 {
            return None;
        }

        self.pos += end;
        Some(&rest[..end])
    }

    /// Scans a bare value, which runs up to the next unescaped `,`.
    fn bare_value(&mut self) -> Option<&'a str> {
        let rest = self.rest();
        let mut end = rest.len();

        let mut chars = rest.char_indices();
        while let Some((index, c)) = chars.next() {
            match c {
                '\\' => _ = chars.next(),
                ',' => {
                    end = index;
                    break;
                },
                _ => {},
            }
        }

        if end == 0 {
            return None;
        }

        self.pos += end;
        Some(&rest[..end])
    }

    /// Scans the `NULL` keyword. It must be the whole value, so only
    /// whitespace may follow it before the next `,` or the end.
    fn null(&mut self) -> bool {
        let rest = self.rest();
        let Some(word) = rest.get(..4) else {
            return false;
        };

        let after = rest[4..].trim_start();
        let ends_token = after.is_empty() || after.starts_with(',');

        let matched = word.eq_ignore_ascii_case("null") && ends_token;
        if matched {
            self.pos += 4;
        }
        matched
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(text: &str) -> Result<Vec<(String, Option<String>)>> {
        decode(text)
    }

    fn pair(key: &str, value: Option<&str>) -> (String, Option<String>) {
        (key.to_owned(), value.map(str::to_owned))
    }

    fn malformed_at(text: &str) -> usize {
        match scan(text) {
            Err(Error::Malformed { offset }) => offset,
            other => panic!("expected malformed error for {text:?}, got {other:?}"),
        }
    }

    #[test]
    fn empty_and_whitespace() {
        assert!(scan("").expect("empty is valid").is_empty(), "empty input");
        assert!(scan(" \t\n ").expect("whitespace is valid").is_empty(), "whitespace input");
    }

    #[test]
    fn single_pair() {
        assert_eq!(
            scan(r#""key" => "value""#).expect("valid"),
            [pair("key", Some("value"))],
            "quoted pair with spaces"
        );
        assert_eq!(
            scan(r#""key"=>"value""#).expect("valid"),
            [pair("key", Some("value"))],
            "compact pair"
        );
    }

    #[test]
    fn bare_tokens_and_colon() {
        assert_eq!(
            scan(r#"a=>1, b => 2, c => null, d => "NULL""#).expect("valid"),
            [
                pair("a", Some("1")),
                pair("b", Some("2")),
                pair("c", None),
                pair("d", Some("NULL")),
            ],
            "mixed bare and quoted"
        );
        assert_eq!(
            scan(r#""key" => NULL, "key2": "value2""#).expect("valid"),
            [pair("key", None), pair("key2", Some("value2"))],
            "colon separator"
        );
        assert_eq!(
            scan("a:b=>c").expect("valid"),
            [pair("a", Some("b=>c"))],
            "bare key ends at first separator"
        );
    }

    #[test]
    fn separators_inside_quotes() {
        assert_eq!(
            scan(r#""a=>1"=>"\"b\"=>2","#).expect("valid"),
            [pair("a=>1", Some(r#""b"=>2"#))],
            "separators and quotes inside quoted tokens"
        );
    }

    #[test]
    fn escaped_quote_at_end() {
        assert_eq!(
            scan(r#""failing"=>"some test \\\"""#).expect("valid"),
            [pair("failing", Some(r#"some test \""#))],
            "escaped backslash then escaped quote"
        );
    }

    #[test]
    fn null_needs_whole_token() {
        assert_eq!(
            scan("k=>NULLx").expect("valid"),
            [pair("k", Some("NULLx"))],
            "NULL prefix is a bare value"
        );
        assert_eq!(scan("k=>nUlL").expect("valid"), [pair("k", None)], "any case");
        assert_eq!(scan("k=>NULL ").expect("valid"), [pair("k", None)], "trailing space");
        assert_eq!(
            scan("k=>NULL x").expect("valid"),
            [pair("k", Some("NULL x"))],
            "NULL followed by more text is a bare value"
        );
        assert_eq!(
            scan("k=>NULL , j=>1").expect("valid"),
            [pair("k", None), pair("j", Some("1"))],
            "whitespace before the comma"
        );
    }

    #[test]
    fn bare_value_keeps_escapes() {
        assert_eq!(
            scan(r"k=>a\,b, x=>y").expect("valid"),
            [pair("k", Some(r"a\,b")), pair("x", Some("y"))],
            "escaped comma does not end bare value"
        );
    }

    #[test]
    fn empty_quoted_tokens() {
        assert_eq!(
            scan(r#"""=>"""#).expect("valid"),
            [pair("", Some(""))],
            "empty quoted key and value are empty strings"
        );
    }

    #[test]
    fn borrowed_unless_escaped() {
        let mut pairs = decode_lazy(r#""plain"=>"esc\"aped""#);
        let (key, value) = pairs.next().expect("one pair").expect("valid");
        assert!(matches!(key, Cow::Borrowed("plain")), "plain key is borrowed");
        assert!(
            matches!(value, Some(Cow::Owned(ref v)) if v == "esc\"aped"),
            "escaped value is owned"
        );
        assert!(pairs.next().is_none(), "no more pairs");
    }

    #[test]
    fn malformed_offsets() {
        assert_eq!(malformed_at(r#""a"=>"1" garbage"#), 8, "garbage after first pair");
        assert_eq!(malformed_at(r#"garbage "a"=>"1""#), 0, "garbage before first pair");
        assert_eq!(malformed_at(r#""a"=>"1", "b"=>"2" x"#), 18, "garbage after last pair");
        assert_eq!(malformed_at(r#""a"=>"1" "b"=>"2""#), 8, "missing comma");
        assert_eq!(malformed_at(r#""a"=>"unterminated"#), 0, "unterminated value");
        assert_eq!(malformed_at(r#""a"=>"1", "b" x"#), 9, "key without separator");
        assert_eq!(malformed_at(r#""a"=>"1", "b"#), 9, "unterminated key");
        assert_eq!(malformed_at("a=>"), 0, "missing value");
        assert_eq!(malformed_at("=>1"), 0, "missing key");
    }

    #[test]
    fn fused_after_error() {
        let mut pairs = decode_lazy(r#""a"=>"1" garbage, "b"=>"2""#);
        assert!(pairs.next().is_some_and(|p| p.is_ok()), "first pair is fine");
        assert!(pairs.next().is_some_and(|p| p.is_err()), "then the error");
        assert!(pairs.next().is_none(), "then nothing");
    }

    #[test]
    fn offset_tracks_progress() {
        let mut pairs = decode_lazy(r#""a"=>"1", "b"=>"2""#);
        assert_eq!(pairs.offset(), 0, "nothing consumed");
        _ = pairs.next();
        assert_eq!(pairs.offset(), 9, "first pair and its comma");
        assert_eq!(pairs.remainder(), r#" "b"=>"2""#, "second pair left");
    }
}
