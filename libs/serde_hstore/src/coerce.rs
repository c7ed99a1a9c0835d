//! Types for turning non-text keys and values into text while encoding.
//!
//! hstore only stores text. The [`Encoder`](crate::Encoder) refuses anything
//! else unless it was given a function to convert it with:
//!
//! ```
//! use serde_hstore::Encoder;
//!
//! let pairs = [("a", 1), ("b", 2)];
//! assert!(serde_hstore::to_string(&pairs).is_err());
//!
//! let text = Encoder::new()
//!     .value_map(|v| Some(v.to_string()))
//!     .to_string(&pairs)
//!     .unwrap();
//! assert_eq!(text, r#""a"=>"1","b"=>"2""#);
//! ```

use std::fmt;

/// A non-text key or value met by the encoder.
#[derive(Debug, Clone, Copy, PartialEq)]
#[non_exhaustive]
pub enum Scalar {
    Bool(bool),
    I64(i64),
    U64(u64),
    I128(i128),
    U128(u128),
    F32(f32),
    F64(f64),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => v.fmt(f),
            Self::I64(v) => v.fmt(f),
            Self::U64(v) => v.fmt(f),
            Self::I128(v) => v.fmt(f),
            Self::U128(v) => v.fmt(f),
            Self::F32(v) => v.fmt(f),
            Self::F64(v) => v.fmt(f),
        }
    }
}

/// Converts a non-text key to text.
pub type KeyMap = dyn Fn(Scalar) -> String + Send + Sync;

/// Converts a non-text value to text, or to `NULL` by returning [`None`].
pub type ValueMap = dyn Fn(Scalar) -> Option<String> + Send + Sync;
