//! # hstore for serde
//!
//! Encodes and decodes the text form of PostgreSQL's `hstore` type, a flat
//! collection of text keys with text or `NULL` values:
//!
//! ```text
//! "name"=>"Norge/Noreg", "capital"=>NULL, "say \"hi\""=>"back\\slash"
//! ```
//!
//! Output is always canonical: keys and values are quoted, backslashes and
//! quotes within them are escaped, and pairs are joined by `,` with nothing
//! trailing. Input may additionally use bare tokens, `:` instead of `=>`, any
//! whitespace between tokens, and `NULL` in any case. A quoted `"NULL"` is
//! text, not `NULL`.
//!
//! There are two layers:
//!
//! - [`encode`] and [`decode`] work on plain text pairs. [`decode_lazy`]
//!   scans one pair at a time and borrows from the input where it can.
//! - [`to_string`], [`to_vec`], [`from_str`], and [`from_slice`] go through
//!   serde. Maps, structs, and sequences of `(key, value)` pairs are supported.
//!   [`Encoder`] and [`Decoder`] configure non-text keys and values and the
//!   text encoding of the bytes.
//!
//! ```
//! use std::collections::BTreeMap;
//!
//! let text = r#""a"=>"1", b => NULL"#;
//! let map: BTreeMap<String, Option<u32>> = serde_hstore::from_str(text)?;
//! assert_eq!(map["a"], Some(1));
//! assert_eq!(map["b"], None);
//!
//! let back = serde_hstore::Encoder::new()
//!     .value_map(|v| Some(v.to_string()))
//!     .to_string(&map)?;
//! assert_eq!(back, r#""a"=>"1","b"=>NULL"#);
//! # Ok::<(), serde_hstore::Error>(())
//! ```

// for benchmarks
#[cfg(test)]
use criterion as _;

pub mod coerce;
pub mod de;
mod encoding;
mod error;
mod escape;
mod scan;
pub mod ser;
mod write;

pub use coerce::{KeyMap, Scalar, ValueMap};
pub use de::{Decoder, Deserializer, from_reader, from_slice, from_str};
pub use encoding::TextEncoding;
pub use error::{Error, ErrorKind, Result};
pub use escape::{Escape, escape, escape_bytes, unescape, unescape_bytes};
pub use scan::{Pairs, RawPair, decode, decode_lazy};
pub use ser::{Encoder, Serializer, to_string, to_vec, to_writer};
pub use write::{PairWriter, encode};
