//! Exposes a deserializer and deserialization helper methods.

use std::borrow::Cow;
use std::io;

use serde_core::de::{self, IntoDeserializer as _};
use serde_core::forward_to_deserialize_any;

use crate::encoding::TextEncoding;
use crate::error::{Error, Result};
use crate::scan::{Pairs, into_owned};

/// Deserializes a value from hstore text.
///
/// Maps and structs read pairs by key, sequences read `(key, value)` tuples.
/// Text values are parsed on request, so a field typed as [`u32`] accepts the
/// value `"42"`. `NULL` is [`None`].
///
/// # Examples
///
/// ```
/// #[derive(serde::Deserialize)]
/// struct Animal {
///     name: String,
///     legs: u8,
///     wings: Option<u8>,
/// }
///
/// let animal: Animal = serde_hstore::from_str(r#""name"=>"Hedgehog", "legs"=>"4", "wings"=>NULL"#)?;
/// assert_eq!(animal.name, "Hedgehog");
/// assert_eq!(animal.legs, 4);
/// assert_eq!(animal.wings, None);
/// # Ok::<(), serde_hstore::Error>(())
/// ```
///
/// # Errors
///
/// Fails if the text is malformed, if the value doesn't match the pairs, or if
/// the value stopped reading before the last pair.
pub fn from_str<'de, T>(text: &'de str) -> Result<T>
where
    T: de::Deserialize<'de>,
{
    let mut de = Deserializer::new(text);
    let value = T::deserialize(&mut de)?;
    de.end()?;
    Ok(value)
}

/// Deserializes a value from hstore bytes in UTF-8.
///
/// Use a [`Decoder`] for other encodings.
///
/// # Errors
///
/// Same as [`from_str`], and also fails with [`Error::Decode`] if the bytes
/// aren't valid UTF-8.
pub fn from_slice<T>(bytes: &[u8]) -> Result<T>
where
    T: de::DeserializeOwned,
{
    Decoder::new().deserialize(bytes)
}

/// Deserializes a value from hstore bytes in UTF-8 read from a [`io::Read`].
///
/// The reader is read to its end before anything is decoded.
///
/// # Errors
///
/// Same as [`from_slice`], and also fails with [`Error::Io`] if reading fails.
pub fn from_reader<T, R>(reader: R) -> Result<T>
where
    T: de::DeserializeOwned,
    R: io::Read,
{
    Decoder::new().deserialize_reader(reader)
}

/// Decodes hstore bytes in a configurable text encoding.
///
/// # Examples
///
/// ```
/// use serde_hstore::{Decoder, TextEncoding};
///
/// let decoder = Decoder::new().encoding(TextEncoding::for_label("latin1").unwrap());
/// let pairs: Vec<_> = decoder.decode(b"\"caf\xe9\"=>NULL")?;
/// assert_eq!(pairs, [("caf\u{e9}".to_owned(), None)]);
/// # Ok::<(), serde_hstore::Error>(())
/// ```
#[must_use]
#[derive(Debug, Default, Clone, Copy)]
pub struct Decoder {
    encoding: TextEncoding,
}

impl Decoder {
    /// Creates a decoder for UTF-8 input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the text encoding of the input bytes.
    pub fn encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Decodes bytes into any collection of owned pairs.
    ///
    /// See [`decode`](crate::decode) for the text equivalent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the bytes aren't valid in the encoding and
    /// [`Error::Malformed`] if the text isn't well-formed hstore.
    pub fn decode<C>(&self, bytes: &[u8]) -> Result<C>
    where
        C: FromIterator<(String, Option<String>)>,
    {
        let text = self.encoding.decode(bytes)?;
        Pairs::new(&text).map(|pair| pair.map(into_owned)).collect()
    }

    /// Deserializes a value from bytes.
    ///
    /// # Errors
    ///
    /// Same as [`from_str`], and also fails with [`Error::Decode`] if the
    /// bytes aren't valid in the encoding.
    pub fn deserialize<T>(&self, bytes: &[u8]) -> Result<T>
    where
        T: de::DeserializeOwned,
    {
        let text = self.encoding.decode(bytes)?;
        from_str(&text)
    }

    /// Deserializes a value from bytes read from a [`io::Read`].
    ///
    /// # Errors
    ///
    /// Same as [`Decoder::deserialize`], and also fails with [`Error::Io`] if
    /// reading fails.
    pub fn deserialize_reader<T, R>(&self, mut reader: R) -> Result<T>
    where
        T: de::DeserializeOwned,
        R: io::Read,
    {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        self.deserialize(&bytes)
    }
}

/// A deserializer for hstore text. The [`Deserializer`] trait is only
/// implemented by mutable reference.
///
/// [`Deserializer`]: serde_core::de::Deserializer
#[derive(Debug)]
pub struct Deserializer<'de> {
    pairs: Pairs<'de>,
}

impl<'de> Deserializer<'de> {
    /// Creates a new deserializer over hstore text.
    pub fn new(text: &'de str) -> Self {
        Self {
            pairs: Pairs::new(text),
        }
    }

    /// Ensures that every pair was consumed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TrailingPairs`] if there are pairs left, or the scan
    /// error if the rest of the text is malformed.
    pub fn end(&mut self) -> Result<()> {
        match self.pairs.next() {
            None => Ok(()),
            Some(Ok(_)) => Err(Error::TrailingPairs),
            Some(Err(err)) => Err(err),
        }
    }

    /// Gets the text that has not been read yet.
    pub fn remainder(&self) -> &'de str {
        self.pairs.remainder()
    }

    fn access(&mut self) -> PairAccess<'_, 'de> {
        PairAccess {
            deserializer: self,
            value: None,
        }
    }
}

// as with serializing, implementing this by mut avoids another layer of
// indirection for nested calls.
impl<'de> de::Deserializer<'de> for &mut Deserializer<'de> {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_map(visitor)
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_some(self)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_seq(self.access())
    }

    fn deserialize_tuple<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_map<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_map(self.access())
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_map(visitor)
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf enum identifier ignored_any
    }
}

/// Provides access to the pairs, either as map entries or as tuples.
struct PairAccess<'a, 'de> {
    deserializer: &'a mut Deserializer<'de>,
    value: Option<Option<Cow<'de, str>>>,
}

impl<'de> de::MapAccess<'de> for PairAccess<'_, 'de> {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        let Some((key, value)) = self.deserializer.pairs.next().transpose()? else {
            return Ok(None);
        };

        self.value = Some(value);
        seed.deserialize(TextDeserializer(key)).map(Some)
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        let value = self
            .value
            .take()
            .ok_or_else(|| <Error as de::Error>::custom("value requested before its key"))?;
        seed.deserialize(ValueDeserializer(value))
    }
}

impl<'de> de::SeqAccess<'de> for PairAccess<'_, 'de> {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        let Some((key, value)) = self.deserializer.pairs.next().transpose()? else {
            return Ok(None);
        };

        seed.deserialize(PairDeserializer {
            key: Some(key),
            value: Some(value),
        })
        .map(Some)
    }
}

/// Deserializes a single pair as a 2-element sequence.
struct PairDeserializer<'de> {
    key: Option<Cow<'de, str>>,
    value: Option<Option<Cow<'de, str>>>,
}

impl<'de> de::Deserializer<'de> for PairDeserializer<'de> {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_seq(self)
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf option unit unit_struct newtype_struct seq tuple
        tuple_struct map struct enum identifier ignored_any
    }
}

impl<'de> de::SeqAccess<'de> for PairDeserializer<'de> {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        if let Some(key) = self.key.take() {
            return seed.deserialize(TextDeserializer(key)).map(Some);
        }

        match self.value.take() {
            Some(value) => seed.deserialize(ValueDeserializer(value)).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(usize::from(self.key.is_some()) + usize::from(self.value.is_some()))
    }
}

/// Deserializes a value that may be `NULL`.
struct ValueDeserializer<'de>(Option<Cow<'de, str>>);

macro_rules! forward_value {
    ($($fn:ident($($arg:ident: $ty:ty),*);)*) => {$(
        fn $fn<V>(self, $($arg: $ty,)* visitor: V) -> Result<V::Value>
        where
            V: de::Visitor<'de>,
        {
            match self.0 {
                Some(text) => TextDeserializer(text).$fn($($arg,)* visitor),
                None => visitor.visit_none(),
            }
        }
    )*};
}

impl<'de> de::Deserializer<'de> for ValueDeserializer<'de> {
    type Error = Error;

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.0 {
            Some(text) => visitor.visit_some(TextDeserializer(text)),
            None => visitor.visit_none(),
        }
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.0 {
            Some(text) => TextDeserializer(text).deserialize_unit(visitor),
            None => visitor.visit_unit(),
        }
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    forward_value! {
        deserialize_any();
        deserialize_bool();
        deserialize_i8();
        deserialize_i16();
        deserialize_i32();
        deserialize_i64();
        deserialize_i128();
        deserialize_u8();
        deserialize_u16();
        deserialize_u32();
        deserialize_u64();
        deserialize_u128();
        deserialize_f32();
        deserialize_f64();
        deserialize_char();
        deserialize_str();
        deserialize_string();
        deserialize_bytes();
        deserialize_byte_buf();
        deserialize_unit_struct(name: &'static str);
        deserialize_seq();
        deserialize_tuple(len: usize);
        deserialize_tuple_struct(name: &'static str, len: usize);
        deserialize_map();
        deserialize_struct(name: &'static str, fields: &'static [&'static str]);
        deserialize_enum(name: &'static str, variants: &'static [&'static str]);
        deserialize_identifier();
        deserialize_ignored_any();
    }
}

/// Deserializes a key or non-`NULL` value.
struct TextDeserializer<'de>(Cow<'de, str>);

macro_rules! parse_text {
    ($($fn:ident => $visit:ident,)*) => {$(
        fn $fn<V>(self, visitor: V) -> Result<V::Value>
        where
            V: de::Visitor<'de>,
        {
            match self.0.parse() {
                Ok(v) => visitor.$visit(v),
                Err(_) => Err(de::Error::invalid_value(de::Unexpected::Str(&self.0), &visitor)),
            }
        }
    )*};
}

impl<'de> de::Deserializer<'de> for TextDeserializer<'de> {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.0 {
            Cow::Borrowed(text) => visitor.visit_borrowed_str(text),
            Cow::Owned(text) => visitor.visit_string(text),
        }
    }

    parse_text! {
        deserialize_bool => visit_bool,
        deserialize_i8 => visit_i8,
        deserialize_i16 => visit_i16,
        deserialize_i32 => visit_i32,
        deserialize_i64 => visit_i64,
        deserialize_i128 => visit_i128,
        deserialize_u8 => visit_u8,
        deserialize_u16 => visit_u16,
        deserialize_u32 => visit_u32,
        deserialize_u64 => visit_u64,
        deserialize_u128 => visit_u128,
        deserialize_f32 => visit_f32,
        deserialize_f64 => visit_f64,
        deserialize_char => visit_char,
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_some(self)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let variant: de::value::CowStrDeserializer<'de, Error> = self.0.into_deserializer();
        visitor.visit_enum(variant)
    }

    forward_to_deserialize_any! {
        str string bytes byte_buf unit unit_struct seq tuple tuple_struct map
        struct identifier ignored_any
    }
}
