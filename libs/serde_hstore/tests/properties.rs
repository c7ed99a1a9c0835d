#![allow(unused_crate_dependencies)]
use std::collections::HashMap;

use serde_hstore::{Encoder, Error, ErrorKind, Scalar};

type Pairs = Vec<(String, Option<String>)>;

fn pairs(items: &[(&str, Option<&str>)]) -> Pairs {
    items
        .iter()
        .map(|&(k, v)| (k.to_owned(), v.map(str::to_owned)))
        .collect()
}

const SAMPLES: &[&str] = &[
    "",
    "plain",
    r#"""#,
    r"\",
    r#"\""#,
    r#"say "hi" \o/"#,
    "multi\nline\ttext",
    "\u{d64d}\u{1f980}",
    r"\\\\",
];

#[test]
fn escape_laws() {
    for &sample in SAMPLES {
        let escaped = serde_hstore::escape(sample);
        assert_eq!(serde_hstore::unescape(&escaped), sample, "unescape reverses escape");
        assert!(escaped.len() >= sample.len(), "escape never shortens {sample:?}");
        assert_eq!(
            serde_hstore::escape_bytes(sample.as_bytes()),
            escaped.as_bytes(),
            "byte version agrees for {sample:?}"
        );

        if !sample.contains('\\') {
            assert_eq!(serde_hstore::unescape(sample), sample, "identity without backslashes");
        }
    }
}

#[test]
fn encode_then_decode() {
    let mut items = Vec::new();
    for (i, &key) in SAMPLES.iter().enumerate() {
        for &value in SAMPLES {
            let value = (i % 3 != 0).then_some(value);
            items.push((key, value));
        }
    }

    let expected = pairs(&items);
    let text = serde_hstore::encode(items.iter().copied());
    let actual: Pairs = serde_hstore::decode(&text).expect("encoded text must decode");
    assert_eq!(actual, expected, "pairs and duplicates preserved in order");
}

#[test]
fn empty_both_ways() {
    let decoded: Pairs = serde_hstore::decode("").expect("empty is valid");
    assert!(decoded.is_empty(), "no pairs from empty text");
    assert_eq!(
        serde_hstore::encode(Vec::<(String, Option<String>)>::new()),
        "",
        "no text from no pairs"
    );
}

#[test]
fn null_handling() {
    let decoded: Pairs = serde_hstore::decode(r#""key" => NULL"#).expect("valid");
    assert_eq!(decoded, pairs(&[("key", None)]), "bare NULL is absence");

    let decoded: Pairs = serde_hstore::decode(r#""key" => "NULL""#).expect("valid");
    assert_eq!(decoded, pairs(&[("key", Some("NULL"))]), "quoted NULL is text");

    let lower: Pairs = serde_hstore::decode("a=>null").expect("valid");
    let upper: Pairs = serde_hstore::decode("a=>NULL").expect("valid");
    assert_eq!(lower, upper, "NULL is case-insensitive");
}

#[test]
fn quote_and_backslash_survive() {
    let pairs_in = pairs(&[("k\"q", Some("v\\b"))]);
    let text = serde_hstore::to_string(&pairs_in).expect("text pairs");
    assert_eq!(text, r#""k\"q"=>"v\\b""#, "escaped on the wire");

    let decoded: Pairs = serde_hstore::from_str(&text).expect("valid");
    assert_eq!(decoded, pairs_in, "round trip");
}

#[test]
fn trailing_garbage() {
    let err = serde_hstore::decode::<Pairs>(r#""a"=>"1" garbage"#).expect_err("must fail");
    assert!(matches!(err, Error::Malformed { offset: 8 }), "offset 8, got {err:?}");
    assert_eq!(err.kind(), ErrorKind::Malformed, "malformed kind");
    assert_eq!(err.to_string(), "malformed hstore value: position 8", "message");
}

#[test]
fn invalid_utf8_is_decode_error() {
    let err = serde_hstore::from_slice::<HashMap<String, String>>(b"\"a\"=>\"\xc3\x28\"")
        .expect_err("must fail");
    assert_eq!(err.kind(), ErrorKind::Decode, "decode, not malformed: {err}");

    let err = serde_hstore::Decoder::new()
        .decode::<Pairs>(b"\xff")
        .expect_err("must fail");
    assert!(
        matches!(err, Error::Decode { position: 0, .. }),
        "position of the bad byte, got {err:?}"
    );
}

#[test]
fn coercion() {
    let err = serde_hstore::to_string(&[("a", 1)]).expect_err("must fail");
    assert_eq!(err.kind(), ErrorKind::Type, "type error");
    assert!(err.to_string().contains(r#""a""#), "names the key: {err}");

    let text = Encoder::new()
        .value_map(|v| Some(v.to_string()))
        .to_string(&[("a", 1)])
        .expect("value map given");
    assert_eq!(text, r#""a"=>"1""#, "formatted through the value map");

    let text = Encoder::new()
        .value_map(|v| matches!(v, Scalar::Bool(true)).then(|| "yes".to_owned()))
        .to_string(&[("t", true), ("f", false)])
        .expect("value map given");
    assert_eq!(text, r#""t"=>"yes","f"=>NULL"#, "None writes NULL");
}

#[test]
fn lazy_matches_eager() {
    let text = r#"a=>1, "b"=>"2", c=>NULL"#;
    let lazy: Pairs = serde_hstore::decode_lazy(text)
        .map(|pair| pair.map(|(k, v)| (k.into_owned(), v.map(Into::into))))
        .collect::<Result<_, _>>()
        .expect("valid");
    let eager: Pairs = serde_hstore::decode(text).expect("valid");
    assert_eq!(lazy, eager, "same pairs either way");
}
