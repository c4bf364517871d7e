// Copyright notice and licensing information.
// These lines indicate the copyright of the software and its licensing terms.
// SPDX-License-Identifier: Apache-2.0 OR MIT indicates dual licensing under Apache 2.0 or MIT licenses.
// Copyright © 2024 Serde YML, Seamless YAML Serialization for Rust. All rights reserved.

//! Deprecated `Decoder`/`Encoder` façade kept for source compatibility
//! with callers migrating from an older surface. New code should use
//! [`crate::Deserializer`]/[`crate::Serializer`] directly, or the
//! [`crate::from_str`]/[`crate::from_slice`]/[`crate::from_reader`] and
//! [`crate::to_string`]/[`crate::to_writer`] free functions.

#![allow(deprecated)]

use crate::de::Deserializer;
use crate::modules::error::Result;
use crate::ser::Serializer;
use serde::{de::Deserialize, ser::Serialize};
use std::io;

/// A thin wrapper around [`Deserializer`] for callers migrating from an
/// older `Decoder`-shaped API.
#[deprecated(since = "0.0.5", note = "use `Deserializer` or the `from_*` free functions instead")]
pub struct Decoder<'de> {
    inner: Deserializer<'de>,
}

impl std::fmt::Debug for Decoder<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Decoder").finish_non_exhaustive()
    }
}

impl<'de> Decoder<'de> {
    /// Builds a decoder reading from a `&str`.
    pub fn new(input: &'de str) -> Self {
        Decoder {
            inner: Deserializer::from_str(input),
        }
    }

    /// Builds a decoder reading from a byte slice.
    pub fn from_slice(input: &'de [u8]) -> Self {
        Decoder {
            inner: Deserializer::from_slice(input),
        }
    }

    /// Decodes the wrapped input into `T`.
    pub fn decode<T>(self) -> Result<T>
    where
        T: Deserialize<'de>,
    {
        T::deserialize(self.inner)
    }
}

/// A thin wrapper around [`Serializer`] for callers migrating from an
/// older `Encoder`-shaped API.
#[deprecated(since = "0.0.5", note = "use `Serializer` or the `to_*` free functions instead")]
pub struct Encoder<W> {
    inner: Serializer<W>,
}

impl<W> std::fmt::Debug for Encoder<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Encoder").finish_non_exhaustive()
    }
}

impl<W> Encoder<W>
where
    W: io::Write + 'static,
{
    /// Builds an encoder writing to `writer`.
    pub fn new(writer: W) -> Self {
        Encoder {
            inner: Serializer::new(writer),
        }
    }

    /// Encodes `value` into the wrapped writer.
    pub fn encode<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(&mut self.inner)?;
        Ok(())
    }

    /// Finishes emission and hands the underlying writer back.
    pub fn into_inner(self) -> Result<W> {
        self.inner.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decoder_decodes_a_simple_value() {
        let decoder = Decoder::new("42");
        let value: i32 = decoder.decode().unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn encoder_encodes_a_simple_value() {
        let mut encoder = Encoder::new(Vec::new());
        encoder.encode(&42).unwrap();
        let bytes = encoder.into_inner().unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "42\n");
    }
}
