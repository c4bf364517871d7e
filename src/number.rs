// Copyright notice and licensing information.
// These lines indicate the copyright of the software and its licensing terms.
// SPDX-License-Identifier: Apache-2.0 OR MIT indicates dual licensing under Apache 2.0 or MIT licenses.
// Copyright © 2024 Serde YML, Seamless YAML Serialization for Rust. All rights reserved.

use crate::modules::error::{self, Error, ErrorImpl};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt::{self, Debug, Display};
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Represents a YAML number, preserving whether it was parsed as a
/// positive integer, a negative integer, or a float.
///
/// Equality and ordering treat `.nan` as equal to itself, matching the
/// comparison behavior of scalars read back out of YAML rather than the
/// IEEE 754 behavior of the underlying `f64`.
#[derive(Clone, Copy)]
pub struct Number {
    n: N,
}

#[derive(Clone, Copy, Debug)]
enum N {
    PosInt(u64),
    /// Always less than zero.
    NegInt(i64),
    /// Always finite.
    Float(f64),
}

impl Number {
    /// Returns true if this is an integer between `i64::MIN` and `i64::MAX`.
    #[inline]
    pub fn is_i64(&self) -> bool {
        match self.n {
            N::PosInt(v) => v <= i64::MAX as u64,
            N::NegInt(_) => true,
            N::Float(_) => false,
        }
    }

    /// Returns true if this is an integer between zero and `u64::MAX`.
    #[inline]
    pub fn is_u64(&self) -> bool {
        matches!(self.n, N::PosInt(_))
    }

    /// Returns true if this is a floating point number.
    #[inline]
    pub fn is_f64(&self) -> bool {
        matches!(self.n, N::Float(_))
    }

    /// If this value fits in an `i64`, returns it. Returns `None` otherwise.
    #[inline]
    pub fn as_i64(&self) -> Option<i64> {
        match self.n {
            N::PosInt(v) => i64::try_from(v).ok(),
            N::NegInt(v) => Some(v),
            N::Float(_) => None,
        }
    }

    /// If this value fits in a `u64`, returns it. Returns `None` otherwise.
    #[inline]
    pub fn as_u64(&self) -> Option<u64> {
        match self.n {
            N::PosInt(v) => Some(v),
            N::NegInt(_) | N::Float(_) => None,
        }
    }

    /// Represents this number as `f64`, regardless of underlying
    /// representation, losing precision if necessary.
    #[inline]
    pub fn as_f64(&self) -> Option<f64> {
        match self.n {
            N::PosInt(v) => Some(v as f64),
            N::NegInt(v) => Some(v as f64),
            N::Float(v) => Some(v),
        }
    }

    /// Returns true if this number is `NaN`.
    #[inline]
    pub fn is_nan(&self) -> bool {
        matches!(self.n, N::Float(v) if v.is_nan())
    }

    /// Returns true if this number is positive or negative infinity.
    #[inline]
    pub fn is_infinite(&self) -> bool {
        matches!(self.n, N::Float(v) if v.is_infinite())
    }
}

macro_rules! signed_from {
    ($($ty:ty)*) => {
        $(
            impl From<$ty> for Number {
                #[inline]
                fn from(i: $ty) -> Self {
                    let i = i as i64;
                    let n = if i < 0 { N::NegInt(i) } else { N::PosInt(i as u64) };
                    Number { n }
                }
            }
        )*
    };
}

macro_rules! unsigned_from {
    ($($ty:ty)*) => {
        $(
            impl From<$ty> for Number {
                #[inline]
                fn from(u: $ty) -> Self {
                    Number { n: N::PosInt(u as u64) }
                }
            }
        )*
    };
}

signed_from!(i8 i16 i32 i64 isize);
unsigned_from!(u8 u16 u32 u64 usize);

impl From<f32> for Number {
    #[inline]
    fn from(f: f32) -> Self {
        Number { n: N::Float(f as f64) }
    }
}

impl From<f64> for Number {
    #[inline]
    fn from(f: f64) -> Self {
        Number { n: N::Float(f) }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self.n, other.n) {
            (N::PosInt(a), N::PosInt(b)) => a == b,
            (N::NegInt(a), N::NegInt(b)) => a == b,
            (N::Float(a), N::Float(b)) => a == b || (a.is_nan() && b.is_nan()),
            _ => false,
        }
    }
}

impl Eq for Number {}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self.n, other.n) {
            (N::PosInt(a), N::PosInt(b)) => a.partial_cmp(&b),
            (N::NegInt(a), N::NegInt(b)) => a.partial_cmp(&b),
            (N::PosInt(_), N::NegInt(_)) => Some(Ordering::Greater),
            (N::NegInt(_), N::PosInt(_)) => Some(Ordering::Less),
            (N::Float(a), N::Float(b)) => {
                if a.is_nan() && b.is_nan() {
                    Some(Ordering::Equal)
                } else {
                    a.partial_cmp(&b)
                }
            }
            (N::Float(a), _) => a.partial_cmp(&other.as_f64().unwrap()),
            (_, N::Float(b)) => self.as_f64().unwrap().partial_cmp(&b),
        }
    }
}

impl Hash for Number {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self.n {
            N::PosInt(v) => v.hash(state),
            N::NegInt(v) => v.hash(state),
            N::Float(v) => {
                if v.is_nan() {
                    u64::MAX.hash(state);
                } else {
                    v.to_bits().hash(state);
                }
            }
        }
    }
}

impl Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.n {
            N::PosInt(v) => Display::fmt(&v, f),
            N::NegInt(v) => Display::fmt(&v, f),
            N::Float(v) => {
                if v.is_nan() {
                    f.write_str(".nan")
                } else if v.is_infinite() {
                    f.write_str(if v > 0.0 { ".inf" } else { "-.inf" })
                } else {
                    Display::fmt(&v, f)
                }
            }
        }
    }
}

impl Debug for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Number({})", self)
    }
}

impl FromStr for Number {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s {
            ".inf" | ".Inf" | ".INF" | "+.inf" | "+.Inf" | "+.INF" => {
                return Ok(Number::from(f64::INFINITY))
            }
            "-.inf" | "-.Inf" | "-.INF" => {
                return Ok(Number::from(f64::NEG_INFINITY))
            }
            ".nan" | ".NaN" | ".NAN" => return Ok(Number::from(f64::NAN)),
            _ => {}
        }
        if let Ok(u) = s.parse::<u64>() {
            return Ok(Number { n: N::PosInt(u) });
        }
        if let Ok(i) = s.parse::<i64>() {
            return Ok(Number::from(i));
        }
        if let Ok(f) = s.parse::<f64>() {
            return Ok(Number::from(f));
        }
        Err(error::new(ErrorImpl::FailedToParseNumber))
    }
}

impl Serialize for Number {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.n {
            N::PosInt(v) => serializer.serialize_u64(v),
            N::NegInt(v) => serializer.serialize_i64(v),
            N::Float(v) => serializer.serialize_f64(v),
        }
    }
}

impl<'de> Deserialize<'de> for Number {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct NumberVisitor;

        impl de::Visitor<'_> for NumberVisitor {
            type Value = Number;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a YAML number")
            }

            fn visit_i64<E>(self, v: i64) -> Result<Number, E> {
                Ok(Number::from(v))
            }

            fn visit_u64<E>(self, v: u64) -> Result<Number, E> {
                Ok(Number { n: N::PosInt(v) })
            }

            fn visit_f64<E>(self, v: f64) -> Result<Number, E> {
                Ok(Number::from(v))
            }

            fn visit_str<E>(self, v: &str) -> Result<Number, E>
            where
                E: de::Error,
            {
                v.parse().map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_any(NumberVisitor)
    }
}
