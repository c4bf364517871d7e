// Copyright notice and licensing information.
// These lines indicate the copyright of the software and its licensing terms.
// SPDX-License-Identifier: Apache-2.0 OR MIT indicates dual licensing under Apache 2.0 or MIT licenses.
// Copyright © 2024 Serde YML, Seamless YAML Serialization for Rust. All rights reserved.

//! A YAML value carrying a custom `!tag`, and the `Tag` type used to
//! name it.

use crate::value::Value;
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt::{self, Debug, Display};
use std::hash::{Hash, Hasher};
use std::str;

/// A custom tag on a YAML node, e.g. the `!Variant` in `!Variant 0`.
///
/// The leading `!` is stripped; `Tag::new("Variant")` and the tag
/// written in a document as `!Variant` compare equal.
#[derive(Clone)]
pub struct Tag {
    /// The tag text, without its leading `!`.
    pub string: String,
}

impl Tag {
    /// Builds a new tag from its name, stripping a leading `!` if
    /// present.
    pub fn new(string: impl Into<String>) -> Self {
        let string = string.into();
        Tag {
            string: nobang(&string).to_owned(),
        }
    }

    pub(crate) fn starts_with(&self, prefix: &str) -> bool {
        self.string.starts_with(prefix)
    }
}

impl TryFrom<&[u8]> for Tag {
    type Error = str::Utf8Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let s = str::from_utf8(bytes)?;
        Ok(Tag::new(s))
    }
}

impl PartialEq for Tag {
    fn eq(&self, other: &Self) -> bool {
        self.string == other.string
    }
}

impl Eq for Tag {}

impl PartialOrd for Tag {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Tag {
    fn cmp(&self, other: &Self) -> Ordering {
        self.string.cmp(&other.string)
    }
}

impl Hash for Tag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.string.hash(state);
    }
}

impl Display for Tag {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "!{}", self.string)
    }
}

impl Debug for Tag {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "!{}", self.string)
    }
}

/// A YAML value together with the `!tag` that was attached to it.
#[derive(Clone, PartialEq)]
pub struct TaggedValue {
    /// The tag attached to `value`.
    pub tag: Tag,
    /// The tagged node itself.
    pub value: Value,
}

impl TaggedValue {
    /// Clones this tagged value.
    ///
    /// A plain `clone()` is also available via `#[derive(Clone)]`; this
    /// method exists for parity with call sites that prefer an explicit
    /// name over the trait method.
    pub fn copy(&self) -> Self {
        self.clone()
    }
}

impl Debug for TaggedValue {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = formatter.debug_struct("TaggedValue");
        debug.field("tag", &format_args!("{}", self.tag));
        debug.field("value", &self.value);
        debug.finish()
    }
}

/// Strips a leading `!` from a tag's textual representation, if
/// present.
pub fn nobang(maybe_banged: &str) -> &str {
    maybe_banged.strip_prefix('!').unwrap_or(maybe_banged)
}

#[allow(dead_code)]
pub(crate) fn cow_nobang(maybe_banged: Cow<str>) -> Cow<str> {
    match maybe_banged {
        Cow::Borrowed(s) => Cow::Borrowed(nobang(s)),
        Cow::Owned(s) => Cow::Owned(nobang(&s).to_owned()),
    }
}
