// Copyright notice and licensing information.
// These lines indicate the copyright of the software and its licensing terms.
// SPDX-License-Identifier: Apache-2.0 OR MIT indicates dual licensing under Apache 2.0 or MIT licenses.
// Copyright © 2024 Serde YML, Seamless YAML Serialization for Rust. All rights reserved.

//! Opt-in representations for enum fields, plugged in with
//! `#[serde(with = "...")]`.
//!
//! By default an enum variant is written as a YAML tag on its content
//! (`!Variant value`), which is how [`crate::ser::Serializer`] and
//! [`crate::value::ser::Serializer`] both work. Some formats instead
//! expect the "singleton map" convention, where a variant is a
//! one-entry mapping from the variant name to its content
//! (`Variant: value`). The modules here retrofit that convention onto
//! a single field without changing how the rest of the value is
//! serialized.
//!
//! - [`singleton_map`] applies the convention to the annotated field.
//! - [`singleton_map_optional`] is the same, meant for `Option<Enum>`
//!   fields, so `None` keeps serializing as plain `null`.
//! - [`singleton_map_with`] is the same, for use alongside another
//!   `with` module on the variant's own payload.
//! - [`singleton_map_recursive`] additionally applies the convention
//!   to every enum reachable underneath the annotated field, not just
//!   the field's own type.

use crate::value::{Value, ValueSerializer};
use serde::de::{
    self, Deserialize, DeserializeSeed, Deserializer, EnumAccess, IntoDeserializer, MapAccess,
    VariantAccess, Visitor,
};
use serde::ser::{
    self, Serialize, SerializeMap, SerializeSeq, SerializeStruct, SerializeStructVariant,
    SerializeTuple, SerializeTupleStruct, SerializeTupleVariant,
};
use std::fmt;

/// Serializes a value using the single-entry-map convention for enum
/// variants: `Enum::Variant(v)` becomes `{Variant: v}` instead of
/// `!Variant v`.
pub mod singleton_map {
    use super::*;

    /// Serializes `value` through `serializer`, singleton-mapping the
    /// outermost enum (if any) it contains.
    pub fn serialize<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: ?Sized + Serialize,
        S: ser::Serializer,
    {
        value.serialize(SingletonMap {
            delegate: serializer,
            recursive: false,
        })
    }

    /// Deserializes a `T` through `deserializer`, accepting the
    /// single-entry-map convention for its outermost enum (if any).
    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        T::deserialize(SingletonMap {
            delegate: deserializer,
            recursive: false,
        })
    }
}

/// Like [`singleton_map`], written for `Option<Enum>` fields: `None`
/// still serializes as bare `null` and deserializes from it.
pub mod singleton_map_optional {
    pub use super::singleton_map::{deserialize, serialize};
}

/// Like [`singleton_map`], for use on a field that also carries its
/// own `with` attribute on the variant's payload type.
pub mod singleton_map_with {
    pub use super::singleton_map::{deserialize, serialize};
}

/// Like [`singleton_map`], but the single-entry-map convention also
/// applies to every enum nested underneath the annotated field, not
/// only the field's own type.
pub mod singleton_map_recursive {
    use super::*;

    /// Serializes `value` through `serializer`, singleton-mapping
    /// every enum reachable underneath it.
    pub fn serialize<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: ?Sized + Serialize,
        S: ser::Serializer,
    {
        value.serialize(SingletonMap {
            delegate: serializer,
            recursive: true,
        })
    }

    /// Deserializes a `T` through `deserializer`, accepting the
    /// single-entry-map convention for every enum reachable
    /// underneath it.
    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        T::deserialize(SingletonMap {
            delegate: deserializer,
            recursive: true,
        })
    }
}

/// Wraps a delegate `Serializer`/`Deserializer`, changing only how
/// enum variants with data are represented.
struct SingletonMap<D> {
    delegate: D,
    recursive: bool,
}

/// Materializes `value` into a [`Value`], routing it back through
/// `SingletonMap` first when `recursive` is set so nested enums pick
/// up the same treatment.
fn to_value_for_with<T, E>(value: &T, recursive: bool) -> Result<Value, E>
where
    T: ?Sized + Serialize,
    E: ser::Error,
{
    if recursive {
        value.serialize(SingletonMap {
            delegate: ValueSerializer,
            recursive: true,
        })
    } else {
        crate::value::to_value(value)
    }
    .map_err(E::custom)
}

// ---------------------------------------------------------------------
// Serializer
// ---------------------------------------------------------------------

impl<S> ser::Serializer for SingletonMap<S>
where
    S: ser::Serializer,
{
    type Ok = S::Ok;
    type Error = S::Error;
    type SerializeSeq = SeqWrapper<S::SerializeSeq>;
    type SerializeTuple = SeqWrapper<S::SerializeTuple>;
    type SerializeTupleStruct = SeqWrapper<S::SerializeTupleStruct>;
    type SerializeTupleVariant = TupleVariantAsMap<S>;
    type SerializeMap = MapWrapper<S::SerializeMap>;
    type SerializeStruct = StructWrapper<S::SerializeStruct>;
    type SerializeStructVariant = StructVariantAsMap<S>;

    fn serialize_bool(self, v: bool) -> Result<Self::Ok, Self::Error> {
        self.delegate.serialize_bool(v)
    }

    fn serialize_i8(self, v: i8) -> Result<Self::Ok, Self::Error> {
        self.delegate.serialize_i8(v)
    }

    fn serialize_i16(self, v: i16) -> Result<Self::Ok, Self::Error> {
        self.delegate.serialize_i16(v)
    }

    fn serialize_i32(self, v: i32) -> Result<Self::Ok, Self::Error> {
        self.delegate.serialize_i32(v)
    }

    fn serialize_i64(self, v: i64) -> Result<Self::Ok, Self::Error> {
        self.delegate.serialize_i64(v)
    }

    fn serialize_i128(self, v: i128) -> Result<Self::Ok, Self::Error> {
        self.delegate.serialize_i128(v)
    }

    fn serialize_u8(self, v: u8) -> Result<Self::Ok, Self::Error> {
        self.delegate.serialize_u8(v)
    }

    fn serialize_u16(self, v: u16) -> Result<Self::Ok, Self::Error> {
        self.delegate.serialize_u16(v)
    }

    fn serialize_u32(self, v: u32) -> Result<Self::Ok, Self::Error> {
        self.delegate.serialize_u32(v)
    }

    fn serialize_u64(self, v: u64) -> Result<Self::Ok, Self::Error> {
        self.delegate.serialize_u64(v)
    }

    fn serialize_u128(self, v: u128) -> Result<Self::Ok, Self::Error> {
        self.delegate.serialize_u128(v)
    }

    fn serialize_f32(self, v: f32) -> Result<Self::Ok, Self::Error> {
        self.delegate.serialize_f32(v)
    }

    fn serialize_f64(self, v: f64) -> Result<Self::Ok, Self::Error> {
        self.delegate.serialize_f64(v)
    }

    fn serialize_char(self, v: char) -> Result<Self::Ok, Self::Error> {
        self.delegate.serialize_char(v)
    }

    fn serialize_str(self, v: &str) -> Result<Self::Ok, Self::Error> {
        self.delegate.serialize_str(v)
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Self::Ok, Self::Error> {
        self.delegate.serialize_bytes(v)
    }

    fn serialize_none(self) -> Result<Self::Ok, Self::Error> {
        self.delegate.serialize_none()
    }

    fn serialize_some<T>(self, value: &T) -> Result<Self::Ok, Self::Error>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Self::Ok, Self::Error> {
        self.delegate.serialize_unit()
    }

    fn serialize_unit_struct(self, name: &'static str) -> Result<Self::Ok, Self::Error> {
        self.delegate.serialize_unit_struct(name)
    }

    fn serialize_unit_variant(
        self,
        name: &'static str,
        variant_index: u32,
        variant: &'static str,
    ) -> Result<Self::Ok, Self::Error> {
        self.delegate
            .serialize_unit_variant(name, variant_index, variant)
    }

    fn serialize_newtype_struct<T>(
        self,
        name: &'static str,
        value: &T,
    ) -> Result<Self::Ok, Self::Error>
    where
        T: ?Sized + Serialize,
    {
        if self.recursive {
            value.serialize(SingletonMap {
                delegate: self.delegate,
                recursive: true,
            })
        } else {
            self.delegate.serialize_newtype_struct(name, value)
        }
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Self::Ok, Self::Error>
    where
        T: ?Sized + Serialize,
    {
        let value = to_value_for_with(value, self.recursive)?;
        let mut map = self.delegate.serialize_map(Some(1))?;
        map.serialize_entry(variant, &value)?;
        map.end()
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<Self::SerializeSeq, Self::Error> {
        Ok(SeqWrapper {
            inner: self.delegate.serialize_seq(len)?,
            recursive: self.recursive,
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<Self::SerializeTuple, Self::Error> {
        Ok(SeqWrapper {
            inner: self.delegate.serialize_tuple(len)?,
            recursive: self.recursive,
        })
    }

    fn serialize_tuple_struct(
        self,
        name: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleStruct, Self::Error> {
        Ok(SeqWrapper {
            inner: self.delegate.serialize_tuple_struct(name, len)?,
            recursive: self.recursive,
        })
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleVariant, Self::Error> {
        Ok(TupleVariantAsMap {
            delegate: self.delegate,
            variant,
            elements: Vec::with_capacity(len),
            recursive: self.recursive,
        })
    }

    fn serialize_map(self, len: Option<usize>) -> Result<Self::SerializeMap, Self::Error> {
        Ok(MapWrapper {
            inner: self.delegate.serialize_map(len)?,
            recursive: self.recursive,
        })
    }

    fn serialize_struct(
        self,
        name: &'static str,
        len: usize,
    ) -> Result<Self::SerializeStruct, Self::Error> {
        Ok(StructWrapper {
            inner: self.delegate.serialize_struct(name, len)?,
            recursive: self.recursive,
        })
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<Self::SerializeStructVariant, Self::Error> {
        Ok(StructVariantAsMap {
            delegate: self.delegate,
            variant,
            map: crate::mapping::Mapping::with_capacity(len),
            recursive: self.recursive,
        })
    }

    fn collect_str<T>(self, value: &T) -> Result<Self::Ok, Self::Error>
    where
        T: ?Sized + fmt::Display,
    {
        self.delegate.collect_str(value)
    }

    fn is_human_readable(&self) -> bool {
        self.delegate.is_human_readable()
    }
}

/// Passes a nested value back through `SingletonMap` before handing it
/// to the real element/value serializer, so recursion keeps applying
/// underneath sequences, tuples, and maps.
struct Recurse<'a, T: ?Sized> {
    value: &'a T,
}

impl<'a, T: ?Sized + Serialize> Serialize for Recurse<'a, T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        self.value.serialize(SingletonMap {
            delegate: serializer,
            recursive: true,
        })
    }
}

/// Wraps a `SerializeSeq`/`SerializeTuple`/`SerializeTupleStruct` to
/// recurse into elements when asked to.
struct SeqWrapper<T> {
    inner: T,
    recursive: bool,
}

impl<T> SerializeSeq for SeqWrapper<T>
where
    T: SerializeSeq,
{
    type Ok = T::Ok;
    type Error = T::Error;

    fn serialize_element<U>(&mut self, value: &U) -> Result<(), Self::Error>
    where
        U: ?Sized + Serialize,
    {
        if self.recursive {
            self.inner.serialize_element(&Recurse { value })
        } else {
            self.inner.serialize_element(value)
        }
    }

    fn end(self) -> Result<Self::Ok, Self::Error> {
        self.inner.end()
    }
}

impl<T> SerializeTuple for SeqWrapper<T>
where
    T: SerializeTuple,
{
    type Ok = T::Ok;
    type Error = T::Error;

    fn serialize_element<U>(&mut self, value: &U) -> Result<(), Self::Error>
    where
        U: ?Sized + Serialize,
    {
        if self.recursive {
            self.inner.serialize_element(&Recurse { value })
        } else {
            self.inner.serialize_element(value)
        }
    }

    fn end(self) -> Result<Self::Ok, Self::Error> {
        self.inner.end()
    }
}

impl<T> SerializeTupleStruct for SeqWrapper<T>
where
    T: SerializeTupleStruct,
{
    type Ok = T::Ok;
    type Error = T::Error;

    fn serialize_field<U>(&mut self, value: &U) -> Result<(), Self::Error>
    where
        U: ?Sized + Serialize,
    {
        if self.recursive {
            self.inner.serialize_field(&Recurse { value })
        } else {
            self.inner.serialize_field(value)
        }
    }

    fn end(self) -> Result<Self::Ok, Self::Error> {
        self.inner.end()
    }
}

/// Wraps a `SerializeMap` to recurse into keys and values.
struct MapWrapper<T> {
    inner: T,
    recursive: bool,
}

impl<T> SerializeMap for MapWrapper<T>
where
    T: SerializeMap,
{
    type Ok = T::Ok;
    type Error = T::Error;

    fn serialize_key<U>(&mut self, key: &U) -> Result<(), Self::Error>
    where
        U: ?Sized + Serialize,
    {
        if self.recursive {
            self.inner.serialize_key(&Recurse { value: key })
        } else {
            self.inner.serialize_key(key)
        }
    }

    fn serialize_value<U>(&mut self, value: &U) -> Result<(), Self::Error>
    where
        U: ?Sized + Serialize,
    {
        if self.recursive {
            self.inner.serialize_value(&Recurse { value })
        } else {
            self.inner.serialize_value(value)
        }
    }

    fn end(self) -> Result<Self::Ok, Self::Error> {
        self.inner.end()
    }
}

/// Wraps a `SerializeStruct` to recurse into field values.
struct StructWrapper<T> {
    inner: T,
    recursive: bool,
}

impl<T> SerializeStruct for StructWrapper<T>
where
    T: SerializeStruct,
{
    type Ok = T::Ok;
    type Error = T::Error;

    fn serialize_field<U>(&mut self, key: &'static str, value: &U) -> Result<(), Self::Error>
    where
        U: ?Sized + Serialize,
    {
        if self.recursive {
            self.inner.serialize_field(key, &Recurse { value })
        } else {
            self.inner.serialize_field(key, value)
        }
    }

    fn skip_field(&mut self, key: &'static str) -> Result<(), Self::Error> {
        self.inner.skip_field(key)
    }

    fn end(self) -> Result<Self::Ok, Self::Error> {
        self.inner.end()
    }
}

/// Buffers a tuple variant's fields and emits them as the single value
/// of a one-entry map keyed by the variant name.
struct TupleVariantAsMap<S> {
    delegate: S,
    variant: &'static str,
    elements: Vec<Value>,
    recursive: bool,
}

impl<S> SerializeTupleVariant for TupleVariantAsMap<S>
where
    S: ser::Serializer,
{
    type Ok = S::Ok;
    type Error = S::Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<(), Self::Error>
    where
        T: ?Sized + Serialize,
    {
        self.elements.push(to_value_for_with(value, self.recursive)?);
        Ok(())
    }

    fn end(self) -> Result<Self::Ok, Self::Error> {
        let mut map = self.delegate.serialize_map(Some(1))?;
        map.serialize_entry(self.variant, &Value::Sequence(self.elements))?;
        map.end()
    }
}

/// Buffers a struct variant's fields and emits them as the single
/// value of a one-entry map keyed by the variant name.
struct StructVariantAsMap<S> {
    delegate: S,
    variant: &'static str,
    map: crate::mapping::Mapping,
    recursive: bool,
}

impl<S> SerializeStructVariant for StructVariantAsMap<S>
where
    S: ser::Serializer,
{
    type Ok = S::Ok;
    type Error = S::Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<(), Self::Error>
    where
        T: ?Sized + Serialize,
    {
        let value = to_value_for_with(value, self.recursive)?;
        self.map.insert(Value::String(key.to_owned()), value);
        Ok(())
    }

    fn skip_field(&mut self, _key: &'static str) -> Result<(), Self::Error> {
        Ok(())
    }

    fn end(self) -> Result<Self::Ok, Self::Error> {
        let mut map = self.delegate.serialize_map(Some(1))?;
        map.serialize_entry(self.variant, &Value::Mapping(self.map))?;
        map.end()
    }
}

// ---------------------------------------------------------------------
// Deserializer
// ---------------------------------------------------------------------

macro_rules! forward_simple {
    ($($method:ident)*) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value, Self::Error>
            where
                V: Visitor<'de>,
            {
                self.delegate.$method(visitor)
            }
        )*
    };
}

impl<'de, D> Deserializer<'de> for SingletonMap<D>
where
    D: Deserializer<'de>,
{
    type Error = D::Error;

    forward_simple! {
        deserialize_any deserialize_bool deserialize_i8 deserialize_i16 deserialize_i32
        deserialize_i64 deserialize_i128 deserialize_u8 deserialize_u16 deserialize_u32
        deserialize_u64 deserialize_u128 deserialize_f32 deserialize_f64 deserialize_char
        deserialize_str deserialize_string deserialize_bytes deserialize_byte_buf
        deserialize_unit deserialize_seq deserialize_map deserialize_identifier
        deserialize_ignored_any
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        self.delegate.deserialize_option(OptionVisitor {
            visitor,
            recursive: self.recursive,
        })
    }

    fn deserialize_unit_struct<V>(
        self,
        name: &'static str,
        visitor: V,
    ) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        self.delegate.deserialize_unit_struct(name, visitor)
    }

    fn deserialize_newtype_struct<V>(
        self,
        name: &'static str,
        visitor: V,
    ) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        self.delegate.deserialize_newtype_struct(name, visitor)
    }

    fn deserialize_tuple<V>(self, len: usize, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        self.delegate.deserialize_tuple(len, visitor)
    }

    fn deserialize_tuple_struct<V>(
        self,
        name: &'static str,
        len: usize,
        visitor: V,
    ) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        self.delegate.deserialize_tuple_struct(name, len, visitor)
    }

    fn deserialize_struct<V>(
        self,
        name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        self.delegate.deserialize_struct(name, fields, visitor)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        self.delegate.deserialize_any(EnumFromAny {
            visitor,
            recursive: self.recursive,
        })
    }

    fn is_human_readable(&self) -> bool {
        self.delegate.is_human_readable()
    }
}

/// Rewraps the value deserializer handed to `visit_some` so an
/// `Option<Enum>` field's `Some` case keeps the singleton-map
/// treatment.
struct OptionVisitor<V> {
    visitor: V,
    recursive: bool,
}

impl<'de, V> Visitor<'de> for OptionVisitor<V>
where
    V: Visitor<'de>,
{
    type Value = V::Value;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.visitor.expecting(formatter)
    }

    fn visit_none<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        self.visitor.visit_none()
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        self.visitor.visit_none()
    }

    fn visit_some<S>(self, deserializer: S) -> Result<Self::Value, S::Error>
    where
        S: Deserializer<'de>,
    {
        self.visitor.visit_some(SingletonMap {
            delegate: deserializer,
            recursive: self.recursive,
        })
    }
}

/// Accepts either a bare string (a unit variant) or a one-entry map
/// (a variant carrying data) wherever a derived `Deserialize` impl
/// calls `deserialize_enum`.
struct EnumFromAny<V> {
    visitor: V,
    recursive: bool,
}

impl<'de, V> Visitor<'de> for EnumFromAny<V>
where
    V: Visitor<'de>,
{
    type Value = V::Value;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.visitor.expecting(formatter)
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        self.visitor.visit_enum(v.to_owned().into_deserializer())
    }

    fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        self.visitor.visit_enum(v.into_deserializer())
    }

    fn visit_map<A>(self, map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        self.visitor.visit_enum(SingletonMapAccess {
            map,
            recursive: self.recursive,
        })
    }
}

/// `EnumAccess` over a one-entry map, reading the single key as the
/// variant name.
struct SingletonMapAccess<A> {
    map: A,
    recursive: bool,
}

impl<'de, A> EnumAccess<'de> for SingletonMapAccess<A>
where
    A: MapAccess<'de>,
{
    type Error = A::Error;
    type Variant = SingletonMapVariantAccess<A>;

    fn variant_seed<T>(mut self, seed: T) -> Result<(T::Value, Self::Variant), Self::Error>
    where
        T: DeserializeSeed<'de>,
    {
        let key = self.map.next_key_seed(seed)?.ok_or_else(|| {
            de::Error::custom("expected exactly one key in a singleton-map enum representation")
        })?;
        Ok((
            key,
            SingletonMapVariantAccess {
                map: self.map,
                recursive: self.recursive,
            },
        ))
    }
}

/// `VariantAccess` over a one-entry map's single value.
struct SingletonMapVariantAccess<A> {
    map: A,
    recursive: bool,
}

impl<'de, A> VariantAccess<'de> for SingletonMapVariantAccess<A>
where
    A: MapAccess<'de>,
{
    type Error = A::Error;

    fn unit_variant(self) -> Result<(), Self::Error> {
        Err(de::Error::custom(
            "expected a unit variant, represented as a string, but found a map entry",
        ))
    }

    fn newtype_variant_seed<T>(mut self, seed: T) -> Result<T::Value, Self::Error>
    where
        T: DeserializeSeed<'de>,
    {
        let value: Value = self.map.next_value()?;
        if self.recursive {
            seed.deserialize(SingletonMap {
                delegate: value,
                recursive: true,
            })
            .map_err(de::Error::custom)
        } else {
            seed.deserialize(value).map_err(de::Error::custom)
        }
    }

    fn tuple_variant<V>(mut self, _len: usize, visitor: V) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        let value: Value = self.map.next_value()?;
        if self.recursive {
            SingletonMap {
                delegate: value,
                recursive: true,
            }
            .deserialize_seq(visitor)
            .map_err(de::Error::custom)
        } else {
            value.deserialize_seq(visitor).map_err(de::Error::custom)
        }
    }

    fn struct_variant<V>(
        mut self,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, Self::Error>
    where
        V: Visitor<'de>,
    {
        let value: Value = self.map.next_value()?;
        if self.recursive {
            SingletonMap {
                delegate: value,
                recursive: true,
            }
            .deserialize_map(visitor)
            .map_err(de::Error::custom)
        } else {
            value.deserialize_map(visitor).map_err(de::Error::custom)
        }
    }
}
