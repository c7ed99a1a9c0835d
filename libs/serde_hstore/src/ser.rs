//! Exposes a serializer and serialization helper methods.

use std::{fmt, io};

use serde_core::ser;

use crate::coerce::{KeyMap, Scalar, ValueMap};
use crate::encoding::TextEncoding;
use crate::error::{Error, Result};
use crate::write::PairWriter;

/// Serializes a value to hstore bytes in UTF-8.
///
/// # Errors
///
/// Fails if the value isn't a map, struct, or sequence of pairs, or if a key or
/// value isn't text. Use an [`Encoder`] to convert non-text keys and values.
pub fn to_vec<T>(value: &T) -> Result<Vec<u8>>
where
    T: ?Sized + ser::Serialize,
{
    Encoder::new().to_vec(value)
}

/// Serializes a value to hstore text.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
///
/// let mut map = BTreeMap::new();
/// map.insert("name", Some("Hedgehog"));
/// map.insert("legs", None);
///
/// let text = serde_hstore::to_string(&map)?;
/// assert_eq!(text, r#""legs"=>NULL,"name"=>"Hedgehog""#);
/// # Ok::<(), serde_hstore::Error>(())
/// ```
///
/// # Errors
///
/// Same as [`to_vec`].
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + ser::Serialize,
{
    Encoder::new().to_string(value)
}

/// Serializes a value as hstore bytes in UTF-8 to a [`io::Write`].
///
/// # Errors
///
/// Same as [`to_vec`], and also fails if writing fails.
pub fn to_writer<T, W>(writer: W, value: &T) -> Result<()>
where
    T: ?Sized + ser::Serialize,
    W: io::Write,
{
    Encoder::new().to_writer(writer, value)
}

/// Configures how values are serialized to hstore.
///
/// Without further configuration, this only accepts text keys and text or
/// `NULL` values and produces UTF-8.
///
/// # Examples
///
/// ```
/// use serde_hstore::{Encoder, TextEncoding};
///
/// let encoder = Encoder::new()
///     .key_map(|k| k.to_string())
///     .value_map(|v| Some(v.to_string()))
///     .encoding(TextEncoding::for_label("utf-16le").unwrap());
///
/// let bytes = encoder.to_vec(&[(1, true)])?;
/// assert_eq!(bytes.len(), r#""1"=>"true""#.len() * 2);
/// # Ok::<(), serde_hstore::Error>(())
/// ```
#[must_use]
#[derive(Default)]
pub struct Encoder {
    key_map: Option<Box<KeyMap>>,
    value_map: Option<Box<ValueMap>>,
    encoding: TextEncoding,
}

impl Encoder {
    /// Creates an encoder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the function used to convert non-text keys.
    pub fn key_map<F>(mut self, map: F) -> Self
    where
        F: Fn(Scalar) -> String + Send + Sync + 'static,
    {
        self.key_map = Some(Box::new(map));
        self
    }

    /// Sets the function used to convert non-text values.
    ///
    /// Returning [`None`] from it writes `NULL`.
    pub fn value_map<F>(mut self, map: F) -> Self
    where
        F: Fn(Scalar) -> Option<String> + Send + Sync + 'static,
    {
        self.value_map = Some(Box::new(map));
        self
    }

    /// Sets the text encoding of the output bytes.
    ///
    /// It also applies to byte strings within the value, which are decoded
    /// with it before being escaped.
    pub fn encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Serializes a value to hstore text.
    ///
    /// The configured encoding only applies to byte strings in this case.
    ///
    /// # Errors
    ///
    /// Fails if the value cannot be represented as hstore.
    pub fn to_string<T>(&self, value: &T) -> Result<String>
    where
        T: ?Sized + ser::Serialize,
    {
        let mut ser = Serializer::new(self);
        value.serialize(&mut ser)?;
        Ok(ser.into_inner())
    }

    /// Serializes a value to hstore bytes in the configured encoding.
    ///
    /// # Errors
    ///
    /// Fails if the value cannot be represented as hstore or if the text
    /// contains characters the encoding cannot represent.
    pub fn to_vec<T>(&self, value: &T) -> Result<Vec<u8>>
    where
        T: ?Sized + ser::Serialize,
    {
        let text = self.to_string(value)?;
        if self.encoding == TextEncoding::utf_8() {
            return Ok(text.into_bytes());
        }

        Ok(self.encoding.encode(&text)?.into_owned())
    }

    /// Serializes a value as hstore bytes in the configured encoding to a
    /// [`io::Write`].
    ///
    /// # Errors
    ///
    /// Same as [`Encoder::to_vec`], and also fails if writing fails.
    pub fn to_writer<T, W>(&self, mut writer: W, value: &T) -> Result<()>
    where
        T: ?Sized + ser::Serialize,
        W: io::Write,
    {
        let bytes = self.to_vec(value)?;
        Ok(writer.write_all(&bytes)?)
    }
}

impl fmt::Debug for Encoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Encoder")
            .field("key_map", &self.key_map.is_some())
            .field("value_map", &self.value_map.is_some())
            .field("encoding", &self.encoding)
            .finish()
    }
}

/// A [`Serializer`] producing hstore text. The trait is only implemented by
/// `&mut`.
///
/// [`Serializer`]: serde_core::ser::Serializer
#[derive(Debug)]
pub struct Serializer<'e> {
    encoder: &'e Encoder,
    out: PairWriter<String>,
}

impl<'e> Serializer<'e> {
    /// Creates a serializer using the settings of `encoder`.
    pub fn new(encoder: &'e Encoder) -> Self {
        Self {
            encoder,
            out: PairWriter::new(String::new()),
        }
    }

    /// Unwraps the serializer into the text written so far.
    pub fn into_inner(self) -> String {
        self.out.into_inner()
    }

    fn atoms(&self) -> AtomSerializer {
        AtomSerializer {
            encoding: self.encoder.encoding,
        }
    }

    fn key_text(&self, key: Atom) -> Result<String> {
        match key {
            Atom::Text(key) => Ok(key),
            Atom::Null => Err(Error::NullKey),
            Atom::Scalar(key) => match &self.encoder.key_map {
                Some(map) => Ok(map(key)),
                None => Err(Error::KeyNotString(key)),
            },
        }
    }

    fn value_text(&self, key: &str, value: Atom) -> Result<Option<String>> {
        match value {
            Atom::Text(value) => Ok(Some(value)),
            Atom::Null => Ok(None),
            Atom::Scalar(value) => match &self.encoder.value_map {
                Some(map) => Ok(map(value)),
                None => Err(Error::ValueNotString {
                    key: key.to_owned(),
                    value,
                }),
            },
        }
    }

    fn push(&mut self, key: Atom, value: Atom) -> Result<()> {
        let key = self.key_text(key)?;
        let value = self.value_text(&key, value)?;
        self.out
            .write_pair(&key, value.as_deref())
            .map_err(<Error as ser::Error>::custom)
    }
}

fn unsupported<T>(what: &'static str) -> Result<T> {
    Err(Error::Unsupported(what))
}

impl<'a, 'e> ser::Serializer for &'a mut Serializer<'e> {
    type Ok = ();
    type Error = Error;

    type SerializeSeq = SerializePairs<'a, 'e>;
    type SerializeTuple = SerializePairs<'a, 'e>;
    type SerializeTupleStruct = SerializePairs<'a, 'e>;
    type SerializeTupleVariant = ser::Impossible<(), Error>;
    type SerializeMap = SerializeMap<'a, 'e>;
    type SerializeStruct = SerializeMap<'a, 'e>;
    type SerializeStructVariant = ser::Impossible<(), Error>;

    fn serialize_bool(self, _v: bool) -> Result<()> {
        unsupported("a single bool")
    }

    fn serialize_i64(self, _v: i64) -> Result<()> {
        unsupported("a single number")
    }

    fn serialize_u64(self, _v: u64) -> Result<()> {
        unsupported("a single number")
    }

    fn serialize_i128(self, _v: i128) -> Result<()> {
        unsupported("a single number")
    }

    fn serialize_u128(self, _v: u128) -> Result<()> {
        unsupported("a single number")
    }

    fn serialize_i8(self, v: i8) -> Result<()> {
        self.serialize_i64(v.into())
    }

    fn serialize_i16(self, v: i16) -> Result<()> {
        self.serialize_i64(v.into())
    }

    fn serialize_i32(self, v: i32) -> Result<()> {
        self.serialize_i64(v.into())
    }

    fn serialize_u8(self, v: u8) -> Result<()> {
        self.serialize_u64(v.into())
    }

    fn serialize_u16(self, v: u16) -> Result<()> {
        self.serialize_u64(v.into())
    }

    fn serialize_u32(self, v: u32) -> Result<()> {
        self.serialize_u64(v.into())
    }

    fn serialize_f32(self, _v: f32) -> Result<()> {
        unsupported("a single number")
    }

    fn serialize_f64(self, _v: f64) -> Result<()> {
        unsupported("a single number")
    }

    fn serialize_char(self, _v: char) -> Result<()> {
        unsupported("a single string")
    }

    fn serialize_str(self, _v: &str) -> Result<()> {
        unsupported("a single string")
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<()> {
        unsupported("a single byte string")
    }

    fn serialize_none(self) -> Result<()> {
        unsupported("a missing value")
    }

    fn serialize_some<T>(self, value: &T) -> Result<()>
    where
        T: ?Sized + ser::Serialize,
    {
        value.serialize(self)
    }

    // no pairs at all
    fn serialize_unit(self) -> Result<()> {
        Ok(())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<()> {
        Ok(())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
    ) -> Result<()> {
        unsupported("a single enum variant")
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + ser::Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<()>
    where
        T: ?Sized + ser::Serialize,
    {
        unsupported("an enum variant with data")
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Ok(SerializePairs(self))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Ok(SerializePairs(self))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Ok(SerializePairs(self))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        unsupported("an enum variant with data")
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Ok(SerializeMap {
            ser: self,
            key: None,
        })
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Ok(SerializeMap {
            ser: self,
            key: None,
        })
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        unsupported("an enum variant with data")
    }
}

/// Serializes map entries and struct fields as pairs.
#[doc(hidden)]
pub struct SerializeMap<'a, 'e> {
    ser: &'a mut Serializer<'e>,
    key: Option<Atom>,
}

impl ser::SerializeMap for SerializeMap<'_, '_> {
    type Ok = ();
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + ser::Serialize,
    {
        self.key = Some(key.serialize(self.ser.atoms())?);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + ser::Serialize,
    {
        let key = self
            .key
            .take()
            .ok_or_else(|| <Error as ser::Error>::custom("value serialized before its key"))?;
        let value = value.serialize(self.ser.atoms())?;
        self.ser.push(key, value)
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

impl ser::SerializeStruct for SerializeMap<'_, '_> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + ser::Serialize,
    {
        let value = value.serialize(self.ser.atoms())?;
        self.ser.push(Atom::Text(key.to_owned()), value)
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

/// Serializes a sequence of 2-element pairs.
#[doc(hidden)]
pub struct SerializePairs<'a, 'e>(&'a mut Serializer<'e>);

impl SerializePairs<'_, '_> {
    fn pair<T>(&mut self, pair: &T) -> Result<()>
    where
        T: ?Sized + ser::Serialize,
    {
        let (key, value) = pair.serialize(PairSerializer {
            atoms: self.0.atoms(),
        })?;
        self.0.push(key, value)
    }
}

impl ser::SerializeSeq for SerializePairs<'_, '_> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + ser::Serialize,
    {
        self.pair(value)
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

impl ser::SerializeTuple for SerializePairs<'_, '_> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + ser::Serialize,
    {
        self.pair(value)
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

impl ser::SerializeTupleStruct for SerializePairs<'_, '_> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + ser::Serialize,
    {
        self.pair(value)
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

/// A key or value reduced to what hstore can tell apart.
#[derive(Debug)]
enum Atom {
    Text(String),
    Null,
    Scalar(Scalar),
}

/// Serializes a single key or value.
#[derive(Debug, Clone, Copy)]
struct AtomSerializer {
    encoding: TextEncoding,
}

impl ser::Serializer for AtomSerializer {
    type Ok = Atom;
    type Error = Error;

    type SerializeSeq = ser::Impossible<Atom, Error>;
    type SerializeTuple = ser::Impossible<Atom, Error>;
    type SerializeTupleStruct = ser::Impossible<Atom, Error>;
    type SerializeTupleVariant = ser::Impossible<Atom, Error>;
    type SerializeMap = ser::Impossible<Atom, Error>;
    type SerializeStruct = ser::Impossible<Atom, Error>;
    type SerializeStructVariant = ser::Impossible<Atom, Error>;

    fn serialize_bool(self, v: bool) -> Result<Atom> {
        Ok(Atom::Scalar(Scalar::Bool(v)))
    }

    fn serialize_i8(self, v: i8) -> Result<Atom> {
        self.serialize_i64(v.into())
    }

    fn serialize_i16(self, v: i16) -> Result<Atom> {
        self.serialize_i64(v.into())
    }

    fn serialize_i32(self, v: i32) -> Result<Atom> {
        self.serialize_i64(v.into())
    }

    fn serialize_i64(self, v: i64) -> Result<Atom> {
        Ok(Atom::Scalar(Scalar::I64(v)))
    }

    fn serialize_i128(self, v: i128) -> Result<Atom> {
        Ok(Atom::Scalar(Scalar::I128(v)))
    }

    fn serialize_u8(self, v: u8) -> Result<Atom> {
        self.serialize_u64(v.into())
    }

    fn serialize_u16(self, v: u16) -> Result<Atom> {
        self.serialize_u64(v.into())
    }

    fn serialize_u32(self, v: u32) -> Result<Atom> {
        self.serialize_u64(v.into())
    }

    fn serialize_u64(self, v: u64) -> Result<Atom> {
        Ok(Atom::Scalar(Scalar::U64(v)))
    }

    fn serialize_u128(self, v: u128) -> Result<Atom> {
        Ok(Atom::Scalar(Scalar::U128(v)))
    }

    fn serialize_f32(self, v: f32) -> Result<Atom> {
        Ok(Atom::Scalar(Scalar::F32(v)))
    }

    fn serialize_f64(self, v: f64) -> Result<Atom> {
        Ok(Atom::Scalar(Scalar::F64(v)))
    }

    fn serialize_char(self, v: char) -> Result<Atom> {
        Ok(Atom::Text(v.into()))
    }

    fn serialize_str(self, v: &str) -> Result<Atom> {
        Ok(Atom::Text(v.to_owned()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Atom> {
        Ok(Atom::Text(self.encoding.decode(v)?.into_owned()))
    }

    fn serialize_none(self) -> Result<Atom> {
        Ok(Atom::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Atom>
    where
        T: ?Sized + ser::Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Atom> {
        Ok(Atom::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Atom> {
        Ok(Atom::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Atom> {
        Ok(Atom::Text(variant.to_owned()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Atom>
    where
        T: ?Sized + ser::Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<Atom>
    where
        T: ?Sized + ser::Serialize,
    {
        unsupported("a nested enum variant with data")
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        unsupported("a nested sequence")
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        unsupported("a nested sequence")
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        unsupported("a nested sequence")
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        unsupported("a nested enum variant with data")
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        unsupported("a nested map")
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        unsupported("a nested struct")
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        unsupported("a nested enum variant with data")
    }

    fn collect_str<T>(self, value: &T) -> Result<Atom>
    where
        T: ?Sized + fmt::Display,
    {
        Ok(Atom::Text(value.to_string()))
    }
}

/// Serializes a sequence element that should be a key-value pair.
#[derive(Debug)]
struct PairSerializer {
    atoms: AtomSerializer,
}

impl PairSerializer {
    fn elements(self, len: Option<usize>) -> Result<PairElements> {
        match len {
            Some(len) if len != 2 => Err(Error::PairLength(len)),
            _ => Ok(PairElements {
                atoms: self.atoms,
                key: None,
                value: None,
                len: 0,
            }),
        }
    }
}

macro_rules! not_a_pair {
    ($($fn:ident($($arg:ty),*);)*) => {$(
        fn $fn(self, $(_: $arg),*) -> Result<Self::Ok> {
            unsupported("a sequence element that isn't a pair")
        }
    )*};
}

impl ser::Serializer for PairSerializer {
    type Ok = (Atom, Atom);
    type Error = Error;

    type SerializeSeq = PairElements;
    type SerializeTuple = PairElements;
    type SerializeTupleStruct = PairElements;
    type SerializeTupleVariant = ser::Impossible<Self::Ok, Error>;
    type SerializeMap = ser::Impossible<Self::Ok, Error>;
    type SerializeStruct = ser::Impossible<Self::Ok, Error>;
    type SerializeStructVariant = ser::Impossible<Self::Ok, Error>;

    not_a_pair! {
        serialize_bool(bool);
        serialize_i8(i8);
        serialize_i16(i16);
        serialize_i32(i32);
        serialize_i64(i64);
        serialize_i128(i128);
        serialize_u8(u8);
        serialize_u16(u16);
        serialize_u32(u32);
        serialize_u64(u64);
        serialize_u128(u128);
        serialize_f32(f32);
        serialize_f64(f64);
        serialize_char(char);
        serialize_str(&str);
        serialize_bytes(&[u8]);
        serialize_none();
        serialize_unit();
        serialize_unit_struct(&'static str);
        serialize_unit_variant(&'static str, u32, &'static str);
    }

    fn serialize_some<T>(self, value: &T) -> Result<Self::Ok>
    where
        T: ?Sized + ser::Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Self::Ok>
    where
        T: ?Sized + ser::Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<Self::Ok>
    where
        T: ?Sized + ser::Serialize,
    {
        unsupported("a sequence element that isn't a pair")
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<Self::SerializeSeq> {
        self.elements(len)
    }

    fn serialize_tuple(self, len: usize) -> Result<Self::SerializeTuple> {
        self.elements(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        self.elements(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        unsupported("a sequence element that isn't a pair")
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        unsupported("a sequence element that isn't a pair")
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        unsupported("a sequence element that isn't a pair")
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        unsupported("a sequence element that isn't a pair")
    }
}

/// Collects the two elements of a pair.
#[derive(Debug)]
struct PairElements {
    atoms: AtomSerializer,
    key: Option<Atom>,
    value: Option<Atom>,
    len: usize,
}

impl PairElements {
    fn element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + ser::Serialize,
    {
        match self.len {
            0 => self.key = Some(value.serialize(self.atoms)?),
            1 => self.value = Some(value.serialize(self.atoms)?),
            _ => {},
        }

        self.len += 1;
        Ok(())
    }

    fn finish(self) -> Result<(Atom, Atom)> {
        match (self.key, self.value) {
            (Some(key), Some(value)) if self.len == 2 => Ok((key, value)),
            _ => Err(Error::PairLength(self.len)),
        }
    }
}

impl ser::SerializeSeq for PairElements {
    type Ok = (Atom, Atom);
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + ser::Serialize,
    {
        self.element(value)
    }

    fn end(self) -> Result<Self::Ok> {
        self.finish()
    }
}

impl ser::SerializeTuple for PairElements {
    type Ok = (Atom, Atom);
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + ser::Serialize,
    {
        self.element(value)
    }

    fn end(self) -> Result<Self::Ok> {
        self.finish()
    }
}

impl ser::SerializeTupleStruct for PairElements {
    type Ok = (Atom, Atom);
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + ser::Serialize,
    {
        self.element(value)
    }

    fn end(self) -> Result<Self::Ok> {
        self.finish()
    }
}
