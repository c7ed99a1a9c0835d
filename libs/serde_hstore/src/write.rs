//! Writes key-value pairs in canonical hstore form.

use std::fmt;

use crate::escape::Escape;

/// Writes pairs as hstore text to a [`fmt::Write`].
///
/// Output is canonical: every key is quoted, every value is quoted or the bare
/// token `NULL`, and pairs are joined by a single `,` with nothing trailing.
///
/// # Examples
///
/// ```
/// use serde_hstore::PairWriter;
///
/// let mut writer = PairWriter::new(String::new());
/// writer.write_pair("a", Some("1")).unwrap();
/// writer.write_pair(r#"say "hi""#, None).unwrap();
/// assert_eq!(writer.into_inner(), r#""a"=>"1","say \"hi\""=>NULL"#);
/// ```
#[derive(Debug)]
pub struct PairWriter<W> {
    out: W,
    first: bool,
}

impl<W: fmt::Write> PairWriter<W> {
    /// Creates a writer that appends to `out`.
    pub fn new(out: W) -> Self {
        Self { out, first: true }
    }

    /// Writes a single pair. A [`None`] value is written as `NULL`.
    ///
    /// # Errors
    ///
    /// Only fails if the underlying writer does.
    pub fn write_pair(&mut self, key: &str, value: Option<&str>) -> fmt::Result {
        if !std::mem::take(&mut self.first) {
            self.out.write_char(',')?;
        }

        write!(self.out, "\"{}\"=>", Escape(key))?;
        match value {
            Some(value) => write!(self.out, "\"{}\"", Escape(value)),
            None => self.out.write_str("NULL"),
        }
    }

    /// Whether no pair has been written yet.
    pub fn is_empty(&self) -> bool {
        self.first
    }

    /// Gets a reference to the inner writer.
    pub fn as_writer(&mut self) -> &mut W {
        &mut self.out
    }

    /// Unwraps the pair writer into its inner writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Encodes text pairs to hstore text.
///
/// This is the plain counterpart to [`to_string`](crate::to_string) for when
/// keys and values already are text. Pairs are written in iteration order and
/// duplicates are kept.
///
/// # Examples
///
/// ```
/// let text = serde_hstore::encode([("name", Some("Norge/Noreg")), ("capital", None)]);
/// assert_eq!(text, r#""name"=>"Norge/Noreg","capital"=>NULL"#);
///
/// assert_eq!(serde_hstore::encode::<_, &str, &str>([]), "");
/// ```
pub fn encode<I, K, V>(pairs: I) -> String
where
    I: IntoIterator<Item = (K, Option<V>)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut writer = PairWriter::new(String::new());
    for (key, value) in pairs {
        writer
            .write_pair(key.as_ref(), value.as_ref().map(V::as_ref))
            .expect("writing to String cannot fail");
    }

    writer.into_inner()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_pair() {
        assert_eq!(
            encode([("my_key", Some("my_value"))]),
            r#""my_key"=>"my_value""#,
            "one quoted pair"
        );
        assert_eq!(encode([("my_key", None::<&str>)]), r#""my_key"=>NULL"#, "null value");
    }

    #[test]
    fn escapes_keys_and_values() {
        assert_eq!(
            encode([(r#"my_"quoted"_key"#, Some(r#"my_"quoted"_value"#))]),
            r#""my_\"quoted\"_key"=>"my_\"quoted\"_value""#,
            "quotes"
        );
        assert_eq!(
            encode([(r"my_\escaped\_key", Some(r"my_\escaped\_value"))]),
            r#""my_\\escaped\\_key"=>"my_\\escaped\\_value""#,
            "backslashes"
        );
    }

    #[test]
    fn joins_without_trailing_comma() {
        let pairs = [("key", Some("value")), ("k", Some("v")), ("k", None)];
        assert_eq!(
            encode(pairs),
            r#""key"=>"value","k"=>"v","k"=>NULL"#,
            "comma joined, duplicates kept"
        );
    }

    #[test]
    fn empty_strings_stay_quoted() {
        assert_eq!(encode([("", Some(""))]), r#"""=>"""#, "empty key and value");
    }

    #[test]
    fn writer_tracks_emptiness() {
        let mut writer = PairWriter::new(String::new());
        assert!(writer.is_empty(), "fresh writer is empty");
        writer.write_pair("a", None).expect("string write");
        assert!(!writer.is_empty(), "writer has a pair");
        assert_eq!(writer.as_writer().as_str(), r#""a"=>NULL"#, "inner writer holds output");
    }
}
