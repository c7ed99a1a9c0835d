//! Conversion between hstore text and the bytes it is stored as.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use encoding_rs::{DecoderResult, EncoderResult, Encoding, UTF_8, UTF_16BE, UTF_16LE};

use crate::error::{Error, Result};

/// A text encoding used to turn bytes into hstore text and back.
///
/// Encodings are looked up by their [WHATWG label], f.e. `"utf-8"`,
/// `"utf-16le"`, or `"latin1"`. Unlike [`Encoding::decode`], conversions never
/// substitute replacement characters: invalid input is an error.
///
/// The default is UTF-8.
///
/// [WHATWG label]: <https://encoding.spec.whatwg.org/#names-and-labels>
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct TextEncoding(&'static Encoding);

impl TextEncoding {
    /// UTF-8, the default.
    #[must_use]
    pub fn utf_8() -> Self {
        Self(UTF_8)
    }

    /// Looks up an encoding by label. Labels are case-insensitive.
    #[must_use]
    pub fn for_label(label: &str) -> Option<Self> {
        Encoding::for_label(label.trim().as_bytes()).map(Self)
    }

    /// Gets the canonical name of the encoding.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.0.name()
    }

    /// Decodes `bytes` to text.
    ///
    /// UTF-8 input is borrowed. No BOM sniffing is performed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] with the byte offset of the first malformed
    /// sequence if `bytes` isn't valid in this encoding.
    pub fn decode(self, bytes: &[u8]) -> Result<Cow<'_, str>> {
        if self.0 == UTF_8 {
            return match std::str::from_utf8(bytes) {
                Ok(text) => Ok(Cow::Borrowed(text)),
                Err(err) => Err(self.decode_error(err.valid_up_to())),
            };
        }

        let mut decoder = self.0.new_decoder_without_bom_handling();
        let capacity = decoder
            .max_utf8_buffer_length_without_replacement(bytes.len())
            .unwrap_or(bytes.len());
        let mut text = String::with_capacity(capacity);

        let mut read = 0;
        loop {
            let (result, n) =
                decoder.decode_to_string_without_replacement(&bytes[read..], &mut text, true);
            read += n;

            match result {
                DecoderResult::InputEmpty => return Ok(Cow::Owned(text)),
                DecoderResult::OutputFull => text.reserve(bytes.len() - read + 4),
                DecoderResult::Malformed(len, after) => {
                    let position = read
                        .saturating_sub(usize::from(after))
                        .saturating_sub(usize::from(len));
                    return Err(self.decode_error(position));
                },
            }
        }
    }

    /// Encodes `text` to bytes.
    ///
    /// UTF-8 output is borrowed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unmappable`] if `text` contains a character this
    /// encoding cannot represent.
    pub fn encode(self, text: &str) -> Result<Cow<'_, [u8]>> {
        // encoding_rs only decodes UTF-16, its encoders output UTF-8 for it
        if self.0 == UTF_8 {
            return Ok(Cow::Borrowed(text.as_bytes()));
        }
        if self.0 == UTF_16LE {
            return Ok(Cow::Owned(text.encode_utf16().flat_map(u16::to_le_bytes).collect()));
        }
        if self.0 == UTF_16BE {
            return Ok(Cow::Owned(text.encode_utf16().flat_map(u16::to_be_bytes).collect()));
        }

        let mut encoder = self.0.new_encoder();
        let capacity = encoder
            .max_buffer_length_from_utf8_without_replacement(text.len())
            .unwrap_or(text.len());
        let mut bytes = Vec::with_capacity(capacity);

        let mut read = 0;
        loop {
            let (result, n) =
                encoder.encode_from_utf8_to_vec_without_replacement(&text[read..], &mut bytes, true);
            read += n;

            match result {
                EncoderResult::InputEmpty => return Ok(Cow::Owned(bytes)),
                EncoderResult::OutputFull => bytes.reserve(text.len() - read + 4),
                EncoderResult::Unmappable(character) => {
                    return Err(Error::Unmappable {
                        encoding: self.name(),
                        character,
                    });
                },
            }
        }
    }

    fn decode_error(self, position: usize) -> Error {
        log::trace!("rejected {} input at byte {position}", self.name());
        Error::Decode {
            encoding: self.name(),
            position,
        }
    }
}

impl Default for TextEncoding {
    fn default() -> Self {
        Self::utf_8()
    }
}

impl fmt::Debug for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TextEncoding").field(&self.name()).finish()
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TextEncoding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::for_label(s).ok_or_else(|| Error::UnknownEncoding(s.to_owned()))
    }
}
