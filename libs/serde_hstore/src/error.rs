//! Error handling types.
//!
//! Like other serde data formats, encoding and decoding share one error type.

use std::{fmt, io};

use serde_core::{de, ser};

use crate::coerce::Scalar;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Potential errors to encounter when encoding or decoding hstore data.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Another reason provided by the object implementation.
    #[error("{0}")]
    Custom(String),
    /// The error originated from the [`io::Write`] implementation.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// The input bytes were not valid in the declared text encoding.
    #[error("input is not valid {encoding}: invalid data at byte {position}")]
    Decode {
        encoding: &'static str,
        position: usize,
    },
    /// The output text contained a character the text encoding cannot
    /// represent.
    #[error("{character:?} cannot be represented in {encoding}")]
    Unmappable {
        encoding: &'static str,
        character: char,
    },
    /// No text encoding with this label exists.
    #[error("unknown text encoding {0:?}")]
    UnknownEncoding(String),

    /// The input is not well-formed hstore text. The offset is the byte
    /// position in the decoded text where the malformed region starts.
    #[error("malformed hstore value: position {offset}")]
    Malformed { offset: usize },
    /// A deserialized value stopped reading before all pairs were consumed.
    #[error("trailing pairs past the end of the deserialized value")]
    TrailingPairs,

    /// A key was not text and no key map was provided.
    #[error("key {0} is not a string")]
    KeyNotString(Scalar),
    /// A value was not text and no value map was provided.
    #[error("value {value} of key {key:?} is not a string")]
    ValueNotString { key: String, value: Scalar },
    /// A key was `None` or otherwise empty.
    #[error("keys cannot be NULL")]
    NullKey,
    /// A value was of a shape that hstore cannot store, f.e. a nested map.
    #[error("{0} cannot be encoded as hstore")]
    Unsupported(&'static str),
    /// A sequence element meant as a key-value pair had the wrong length.
    #[error("expected a key-value pair, got {0} element(s)")]
    PairLength(usize),
}

/// Broad classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Bytes could not be converted to or from text.
    Decode,
    /// The hstore text itself is malformed.
    Malformed,
    /// A key or value passed to the encoder had an unusable type.
    Type,
    /// Any other error, f.e. from I/O or a custom serde message.
    Other,
}

impl Error {
    /// Gets the broad kind of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Decode { .. } | Self::Unmappable { .. } | Self::UnknownEncoding(_) => {
                ErrorKind::Decode
            },
            Self::Malformed { .. } | Self::TrailingPairs => ErrorKind::Malformed,
            Self::KeyNotString(_)
            | Self::ValueNotString { .. }
            | Self::NullKey
            | Self::Unsupported(_)
            | Self::PairLength(_) => ErrorKind::Type,
            Self::Custom(_) | Self::Io(_) => ErrorKind::Other,
        }
    }
}

impl ser::Error for Error {
    fn custom<T>(msg: T) -> Self
    where
        T: fmt::Display,
    {
        Self::Custom(msg.to_string())
    }
}

impl de::Error for Error {
    fn custom<T>(msg: T) -> Self
    where
        T: fmt::Display,
    {
        Self::Custom(msg.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let err = Error::ValueNotString {
            key: "a".to_owned(),
            value: Scalar::I64(1),
        };
        assert_eq!(err.to_string(), r#"value 1 of key "a" is not a string"#, "value message");
        assert_eq!(err.kind(), ErrorKind::Type, "value kind");

        let err = Error::KeyNotString(Scalar::Bool(true));
        assert_eq!(err.to_string(), "key true is not a string", "key message");

        let err = Error::Malformed { offset: 8 };
        assert_eq!(err.to_string(), "malformed hstore value: position 8", "malformed message");
        assert_eq!(err.kind(), ErrorKind::Malformed, "malformed kind");
    }
}
