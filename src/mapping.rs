// Copyright notice and licensing information.
// These lines indicate the copyright of the software and its licensing terms.
// SPDX-License-Identifier: Apache-2.0 OR MIT indicates dual licensing under Apache 2.0 or MIT licenses.
// Copyright © 2024 Serde YML, Seamless YAML Serialization for Rust. All rights reserved.

//! A YAML mapping and its iterator types, backed by an order-preserving
//! map so that round-tripping a document keeps keys in their original
//! order.

use crate::value::Value;
use indexmap::IndexMap;
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt::{self, Debug};
use std::iter::FromIterator;
use std::ops::IndexMut;

/// A YAML mapping in which the key-value pairs keep the order they were
/// inserted in, so serializing a `Mapping` back to YAML reproduces the
/// original key order rather than a hashed one.
#[derive(Clone, Default, Eq, PartialEq)]
pub struct Mapping {
    map: IndexMap<Value, Value>,
}

impl Mapping {
    /// Creates an empty `Mapping`.
    #[inline]
    pub fn new() -> Self {
        Mapping {
            map: IndexMap::new(),
        }
    }

    /// Creates an empty `Mapping` with the given initial capacity.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Mapping {
            map: IndexMap::with_capacity(capacity),
        }
    }

    /// Reserves capacity for at least `additional` more elements.
    #[inline]
    pub fn reserve(&mut self, additional: usize) {
        self.map.reserve(additional);
    }

    /// Shrinks the capacity of the mapping as much as possible.
    #[inline]
    pub fn shrink_to_fit(&mut self) {
        self.map.shrink_to_fit();
    }

    /// Inserts a key-value pair, returning the old value if the key was
    /// already present.
    #[inline]
    pub fn insert(&mut self, k: Value, v: Value) -> Option<Value> {
        self.map.insert(k, v)
    }

    /// Checks if the mapping contains the given key.
    #[inline]
    pub fn contains_key<I: Index>(&self, index: I) -> bool {
        index.index_into(self).is_some()
    }

    /// Returns a reference to the value held by the given key, if any.
    #[inline]
    pub fn get<I: Index>(&self, index: I) -> Option<&Value> {
        index.index_into(self)
    }

    /// Returns a mutable reference to the value held by the given key,
    /// if any.
    #[inline]
    pub fn get_mut<I: Index>(&mut self, index: I) -> Option<&mut Value> {
        index.index_into_mut(self)
    }

    /// Gets the given key's entry for in-place manipulation.
    #[inline]
    pub fn entry(&mut self, k: Value) -> Entry<'_> {
        match self.map.entry(k) {
            indexmap::map::Entry::Occupied(occupied) => {
                Entry::Occupied(OccupiedEntry { occupied })
            }
            indexmap::map::Entry::Vacant(vacant) => Entry::Vacant(VacantEntry { vacant }),
        }
    }

    /// Removes and returns the value held by the given key, if the key
    /// was present. The entry that previously occupied that position is
    /// shifted into its place (i.e. insertion order of the remaining
    /// entries is preserved).
    #[inline]
    pub fn remove<I: Index>(&mut self, index: I) -> Option<Value> {
        index.remove_from(self)
    }

    /// Removes and returns the key-value pair held by the given key, if
    /// the key was present.
    #[inline]
    pub fn remove_entry<I: Index>(&mut self, index: I) -> Option<(Value, Value)> {
        match index.index_into(self) {
            Some(_) => self.map.shift_remove_entry(&index.into_value()),
            None => None,
        }
    }

    /// Returns the number of key-value pairs in the mapping.
    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns true if the mapping contains no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Clears the mapping, removing all entries.
    #[inline]
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Returns a double-ended iterator visiting the key-value pairs in
    /// insertion order.
    #[inline]
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            iter: self.map.iter(),
        }
    }

    /// Returns a double-ended iterator visiting the key-value pairs in
    /// insertion order, with mutable references to the values.
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_> {
        IterMut {
            iter: self.map.iter_mut(),
        }
    }

    /// Returns a double-ended iterator visiting the keys in insertion
    /// order.
    #[inline]
    pub fn keys(&self) -> Keys<'_> {
        Keys {
            iter: self.map.keys(),
        }
    }

    /// Returns a double-ended iterator visiting the values in insertion
    /// order.
    #[inline]
    pub fn values(&self) -> Values<'_> {
        Values {
            iter: self.map.values(),
        }
    }

    /// Returns a double-ended iterator visiting the values in insertion
    /// order, with mutable access.
    #[inline]
    pub fn values_mut(&mut self) -> ValuesMut<'_> {
        ValuesMut {
            iter: self.map.values_mut(),
        }
    }

    /// Retains only the entries for which `keep` returns true.
    #[inline]
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&Value, &mut Value) -> bool,
    {
        self.map.retain(|k, v| keep(k, v));
    }

    /// Sorts the mapping's entries by key.
    #[inline]
    pub fn sort_keys(&mut self) {
        self.map.sort_keys();
    }
}

/// Trait used to abstract over `Mapping::get`/`insert`/`remove` by either
/// a `&Value` or a `&str` key.
pub trait Index: private::Sealed {
    #[doc(hidden)]
    fn index_into(&self, v: &Mapping) -> Option<&Value>;
    #[doc(hidden)]
    fn index_into_mut(&self, v: &mut Mapping) -> Option<&mut Value>;
    #[doc(hidden)]
    fn remove_from(&self, v: &mut Mapping) -> Option<Value>;
    #[doc(hidden)]
    fn into_value(&self) -> Value;
}

impl Index for Value {
    fn index_into(&self, v: &Mapping) -> Option<&Value> {
        v.map.get(self)
    }
    fn index_into_mut(&self, v: &mut Mapping) -> Option<&mut Value> {
        v.map.get_mut(self)
    }
    fn remove_from(&self, v: &mut Mapping) -> Option<Value> {
        v.map.shift_remove(self)
    }
    fn into_value(&self) -> Value {
        self.clone()
    }
}

impl Index for &Value {
    fn index_into(&self, v: &Mapping) -> Option<&Value> {
        v.map.get(*self)
    }
    fn index_into_mut(&self, v: &mut Mapping) -> Option<&mut Value> {
        v.map.get_mut(*self)
    }
    fn remove_from(&self, v: &mut Mapping) -> Option<Value> {
        v.map.shift_remove(*self)
    }
    fn into_value(&self) -> Value {
        (*self).clone()
    }
}

impl Index for str {
    fn index_into(&self, v: &Mapping) -> Option<&Value> {
        v.map.get(self)
    }
    fn index_into_mut(&self, v: &mut Mapping) -> Option<&mut Value> {
        v.map.get_mut(self)
    }
    fn remove_from(&self, v: &mut Mapping) -> Option<Value> {
        v.map.shift_remove(self)
    }
    fn into_value(&self) -> Value {
        Value::String(self.to_owned())
    }
}

impl Index for &str {
    fn index_into(&self, v: &Mapping) -> Option<&Value> {
        v.map.get(*self)
    }
    fn index_into_mut(&self, v: &mut Mapping) -> Option<&mut Value> {
        v.map.get_mut(*self)
    }
    fn remove_from(&self, v: &mut Mapping) -> Option<Value> {
        v.map.shift_remove(*self)
    }
    fn into_value(&self) -> Value {
        Value::String((*self).to_owned())
    }
}

impl Index for String {
    fn index_into(&self, v: &Mapping) -> Option<&Value> {
        v.map.get(self.as_str())
    }
    fn index_into_mut(&self, v: &mut Mapping) -> Option<&mut Value> {
        v.map.get_mut(self.as_str())
    }
    fn remove_from(&self, v: &mut Mapping) -> Option<Value> {
        v.map.shift_remove(self.as_str())
    }
    fn into_value(&self) -> Value {
        Value::String(self.clone())
    }
}

mod private {
    pub trait Sealed {}
    impl Sealed for crate::Value {}
    impl Sealed for &crate::Value {}
    impl Sealed for str {}
    impl Sealed for &str {}
    impl Sealed for String {}
}

impl<I> std::ops::Index<I> for Mapping
where
    I: Index,
{
    type Output = Value;

    fn index(&self, index: I) -> &Value {
        index.index_into(self).unwrap_or(&Value::Null)
    }
}

impl<I> IndexMut<I> for Mapping
where
    I: Index,
{
    fn index_mut(&mut self, index: I) -> &mut Value {
        if index.index_into(self).is_none() {
            self.insert(index.into_value(), Value::Null);
        }
        index.index_into_mut(self).unwrap()
    }
}

impl Debug for Mapping {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("Mapping ")?;
        let mut debug = formatter.debug_map();
        for (k, v) in self {
            match k {
                // A string key is printed as a bare quoted string rather
                // than wrapped in `String(...)`, matching how the key
                // reads in the original YAML.
                Value::String(s) => {
                    debug.key(&format_args!("{:?}", s));
                }
                other => {
                    debug.key(other);
                }
            }
            debug.value(v);
        }
        debug.finish()
    }
}

impl FromIterator<(Value, Value)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (Value, Value)>>(iter: I) -> Self {
        Mapping {
            map: IndexMap::from_iter(iter),
        }
    }
}

impl Extend<(Value, Value)> for Mapping {
    fn extend<I: IntoIterator<Item = (Value, Value)>>(&mut self, iter: I) {
        self.map.extend(iter);
    }
}

impl IntoIterator for Mapping {
    type Item = (Value, Value);
    type IntoIter = IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            iter: self.map.into_iter(),
        }
    }
}

/// Owning iterator over the entries of a `Mapping`.
pub struct IntoIter {
    iter: indexmap::map::IntoIter<Value, Value>,
}

impl Iterator for IntoIter {
    type Item = (Value, Value);
    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next()
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl DoubleEndedIterator for IntoIter {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.iter.next_back()
    }
}

impl ExactSizeIterator for IntoIter {
    fn len(&self) -> usize {
        self.iter.len()
    }
}

impl<'a> IntoIterator for &'a Mapping {
    type Item = (&'a Value, &'a Value);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Borrowing iterator over the entries of a `Mapping`.
pub struct Iter<'a> {
    iter: indexmap::map::Iter<'a, Value, Value>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a Value, &'a Value);
    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next()
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.iter.next_back()
    }
}

impl ExactSizeIterator for Iter<'_> {
    fn len(&self) -> usize {
        self.iter.len()
    }
}

impl<'a> IntoIterator for &'a mut Mapping {
    type Item = (&'a Value, &'a mut Value);
    type IntoIter = IterMut<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// Borrowing iterator over the entries of a `Mapping`, with mutable
/// access to the values.
pub struct IterMut<'a> {
    iter: indexmap::map::IterMut<'a, Value, Value>,
}

impl<'a> Iterator for IterMut<'a> {
    type Item = (&'a Value, &'a mut Value);
    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next()
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl DoubleEndedIterator for IterMut<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.iter.next_back()
    }
}

impl ExactSizeIterator for IterMut<'_> {
    fn len(&self) -> usize {
        self.iter.len()
    }
}

/// Iterator visiting the keys of a `Mapping` in insertion order.
pub struct Keys<'a> {
    iter: indexmap::map::Keys<'a, Value, Value>,
}

impl<'a> Iterator for Keys<'a> {
    type Item = &'a Value;
    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next()
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl DoubleEndedIterator for Keys<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.iter.next_back()
    }
}

impl ExactSizeIterator for Keys<'_> {
    fn len(&self) -> usize {
        self.iter.len()
    }
}

/// Iterator visiting the values of a `Mapping` in insertion order.
pub struct Values<'a> {
    iter: indexmap::map::Values<'a, Value, Value>,
}

impl<'a> Iterator for Values<'a> {
    type Item = &'a Value;
    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next()
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl DoubleEndedIterator for Values<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.iter.next_back()
    }
}

impl ExactSizeIterator for Values<'_> {
    fn len(&self) -> usize {
        self.iter.len()
    }
}

/// Iterator visiting the values of a `Mapping` in insertion order, with
/// mutable access.
pub struct ValuesMut<'a> {
    iter: indexmap::map::ValuesMut<'a, Value, Value>,
}

impl<'a> Iterator for ValuesMut<'a> {
    type Item = &'a mut Value;
    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next()
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl DoubleEndedIterator for ValuesMut<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.iter.next_back()
    }
}

impl ExactSizeIterator for ValuesMut<'_> {
    fn len(&self) -> usize {
        self.iter.len()
    }
}

/// A view into a single occupied or vacant entry of a `Mapping`.
pub enum Entry<'a> {
    /// An occupied entry.
    Occupied(OccupiedEntry<'a>),
    /// A vacant entry.
    Vacant(VacantEntry<'a>),
}

impl<'a> Entry<'a> {
    /// Ensures the entry is occupied, inserting `default` if vacant, and
    /// returns a mutable reference to the value.
    pub fn or_insert(self, default: Value) -> &'a mut Value {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default),
        }
    }

    /// Ensures the entry is occupied, inserting the value returned by
    /// `default` if vacant, and returns a mutable reference to the
    /// value.
    pub fn or_insert_with<F: FnOnce() -> Value>(self, default: F) -> &'a mut Value {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default()),
        }
    }
}

/// An occupied entry in a `Mapping`.
pub struct OccupiedEntry<'a> {
    occupied: indexmap::map::OccupiedEntry<'a, Value, Value>,
}

impl<'a> OccupiedEntry<'a> {
    /// Returns a reference to the entry's value.
    pub fn get(&self) -> &Value {
        self.occupied.get()
    }

    /// Returns a mutable reference to the entry's value.
    pub fn get_mut(&mut self) -> &mut Value {
        self.occupied.get_mut()
    }

    /// Converts into a mutable reference to the entry's value with the
    /// entry's lifetime.
    pub fn into_mut(self) -> &'a mut Value {
        self.occupied.into_mut()
    }

    /// Replaces the entry's value, returning the old one.
    pub fn insert(&mut self, value: Value) -> Value {
        self.occupied.insert(value)
    }

    /// Removes the entry, returning its value. Shifts the remaining
    /// entries to keep insertion order.
    pub fn shift_remove(self) -> Value {
        self.occupied.shift_remove()
    }
}

/// A vacant entry in a `Mapping`.
pub struct VacantEntry<'a> {
    vacant: indexmap::map::VacantEntry<'a, Value, Value>,
}

impl<'a> VacantEntry<'a> {
    /// Inserts a value into the vacant entry, returning a mutable
    /// reference to it.
    pub fn insert(self, value: Value) -> &'a mut Value {
        self.vacant.insert(value)
    }
}

impl Serialize for Mapping {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map_serializer = serializer.serialize_map(Some(self.len()))?;
        for (k, v) in self {
            map_serializer.serialize_entry(k, v)?;
        }
        map_serializer.end()
    }
}

impl<'de> Deserialize<'de> for Mapping {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct MappingVisitor;

        impl<'de> Visitor<'de> for MappingVisitor {
            type Value = Mapping;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a YAML mapping")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Mapping, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut mapping = Mapping::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((k, v)) = map.next_entry()? {
                    mapping.insert(k, v);
                }
                Ok(mapping)
            }
        }

        deserializer.deserialize_map(MappingVisitor)
    }
}
