//! Implementations of the subcommands.
//!
//! Each of these reads its input fully from a byte slice and writes the output
//! to a writer, so they don't care where either comes from.

use std::io::{self, Write};

use anyhow::{Context as _, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_hstore::{Decoder, Encoder, TextEncoding};
use serde_json::Value;

/// Input accepted by `encode`: a JSON object or an array of `[key, value]`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum JsonPairs {
    Map(IndexMap<String, Value>),
    List(Vec<(Value, Value)>),
}

#[derive(Debug, Clone, Copy)]
pub struct EncodeOptions {
    pub encoding: TextEncoding,
    pub coerce: bool,
    pub text: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct DecodeOptions {
    pub encoding: TextEncoding,
    pub pairs: bool,
    pub pretty: bool,
}

pub fn encode<W: Write>(input: &[u8], options: EncodeOptions, mut out: W) -> Result<()> {
    let pairs: JsonPairs = serde_json::from_slice(input)
        .context("input must be a JSON object or an array of [key, value] pairs")?;

    let mut encoder = Encoder::new().encoding(options.encoding);
    if options.coerce {
        encoder = encoder
            .key_map(|k| k.to_string())
            .value_map(|v| Some(v.to_string()));
    }

    log::debug!("encoding to {} with {encoder:?}", options.encoding);
    if options.text {
        let text = encoder.to_string(&pairs).context("cannot encode input")?;
        out.write_all(text.as_bytes())?;
    } else {
        encoder.to_writer(&mut out, &pairs).context("cannot encode input")?;
    }

    Ok(out.flush()?)
}

pub fn decode<W: Write>(input: &[u8], options: DecodeOptions, mut out: W) -> Result<()> {
    let decoder = Decoder::new().encoding(options.encoding);
    log::debug!("decoding from {}", options.encoding);

    if options.pairs {
        let pairs: Vec<(String, Option<String>)> =
            decoder.decode(input).context("cannot decode input")?;
        write_json(&mut out, &pairs, options.pretty)?;
    } else {
        let map: IndexMap<String, Option<String>> =
            decoder.decode(input).context("cannot decode input")?;
        write_json(&mut out, &map, options.pretty)?;
    }

    writeln!(out)?;
    Ok(out.flush()?)
}

pub fn escape<W: Write>(text: &str, mut out: W) -> io::Result<()> {
    out.write_all(serde_hstore::escape(text).as_bytes())?;
    out.flush()
}

pub fn unescape<W: Write>(text: &str, mut out: W) -> io::Result<()> {
    out.write_all(serde_hstore::unescape(text).as_bytes())?;
    out.flush()
}

fn write_json<W, T>(out: W, value: &T, pretty: bool) -> Result<()>
where
    W: Write,
    T: Serialize,
{
    if pretty {
        serde_json::to_writer_pretty(out, value)?;
    } else {
        serde_json::to_writer(out, value)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(label: &str) -> TextEncoding {
        TextEncoding::for_label(label).expect("known label")
    }

    fn run_encode(input: &str, coerce: bool) -> Result<String> {
        let mut out = Vec::new();
        let options = EncodeOptions {
            encoding: TextEncoding::utf_8(),
            coerce,
            text: false,
        };
        encode(input.as_bytes(), options, &mut out)?;
        Ok(String::from_utf8(out).expect("utf-8 output"))
    }

    fn run_decode(input: &str, pairs: bool) -> Result<String> {
        let mut out = Vec::new();
        let options = DecodeOptions {
            encoding: TextEncoding::utf_8(),
            pairs,
            pretty: false,
        };
        decode(input.as_bytes(), options, &mut out)?;
        Ok(String::from_utf8(out).expect("utf-8 output"))
    }

    #[test]
    fn encode_object_and_list() {
        assert_eq!(
            run_encode(r#"{"b": "2", "a": null}"#, false).expect("text object"),
            r#""b"=>"2","a"=>NULL"#,
            "object order kept"
        );
        assert_eq!(
            run_encode(r#"[["k", "1"], ["k", null]]"#, false).expect("text list"),
            r#""k"=>"1","k"=>NULL"#,
            "duplicates kept"
        );
    }

    #[test]
    fn encode_needs_coerce_for_numbers() {
        let err = run_encode(r#"{"a": 1}"#, false).expect_err("number without coerce");
        assert!(format!("{err:#}").contains(r#""a""#), "names the key: {err:#}");

        assert_eq!(
            run_encode(r#"[[1, 2.5], ["t", true]]"#, true).expect("coerced"),
            r#""1"=>"2.5","t"=>"true""#,
            "numbers and bools formatted"
        );
        run_encode(r#"{"a": [1]}"#, true).expect_err("nested arrays are never allowed");
    }

    #[test]
    fn encode_in_other_encoding() {
        let options = EncodeOptions {
            encoding: label("utf-16le"),
            coerce: false,
            text: false,
        };
        let mut out = Vec::new();
        encode(br#"{"a": "b"}"#, options, &mut out).expect("utf-16");
        assert_eq!(out.len(), r#""a"=>"b""#.len() * 2, "two bytes per char");

        let mut text = Vec::new();
        encode(br#"{"a": "b"}"#, EncodeOptions { text: true, ..options }, &mut text)
            .expect("text output");
        assert_eq!(text, br#""a"=>"b""#, "text ignores the encoding");
    }

    #[test]
    fn decode_to_json() {
        assert_eq!(
            run_decode(r#"a=>1, b=>NULL, a=>3"#, false).expect("valid"),
            "{\"a\":\"3\",\"b\":null}\n",
            "object, last value wins"
        );
        assert_eq!(
            run_decode(r#"a=>1, b=>NULL, a=>3"#, true).expect("valid"),
            "[[\"a\",\"1\"],[\"b\",null],[\"a\",\"3\"]]\n",
            "pairs keep duplicates"
        );
    }

    #[test]
    fn decode_errors() {
        let err = run_decode(r#""a"=>"1" garbage"#, false).expect_err("malformed");
        assert!(
            format!("{err:#}").contains("position 8"),
            "reports the offset: {err:#}"
        );

        let mut out = Vec::new();
        let options = DecodeOptions {
            encoding: TextEncoding::utf_8(),
            pairs: false,
            pretty: false,
        };
        let err = decode(b"\"a\"=>\"\xff\"", options, &mut out).expect_err("bad utf-8");
        assert!(
            err.downcast_ref::<serde_hstore::Error>()
                .is_some_and(|e| e.kind() == serde_hstore::ErrorKind::Decode),
            "decode error kind: {err:#}"
        );
    }

    #[test]
    fn escape_both_ways() {
        let mut out = Vec::new();
        escape(r#"say "hi" \o/"#, &mut out).expect("vec write");
        assert_eq!(out, br#"say \"hi\" \\o/"#, "escaped");

        let mut back = Vec::new();
        unescape(r#"say \"hi\" \\o/"#, &mut back).expect("vec write");
        assert_eq!(back, br#"say "hi" \o/"#, "unescaped");
    }
}
