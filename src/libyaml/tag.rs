use std::fmt::{self, Debug};
use std::ops::Deref;

/// A resolved YAML tag, as it appears on a parser event.
#[derive(Clone, Ord, PartialOrd, Eq, PartialEq)]
pub struct Tag(Box<[u8]>);

impl Tag {
    /// The core schema tag for `null`.
    pub const NULL: &'static str = "tag:yaml.org,2002:null";
    /// The core schema tag for booleans.
    pub const BOOL: &'static str = "tag:yaml.org,2002:bool";
    /// The core schema tag for integers.
    pub const INT: &'static str = "tag:yaml.org,2002:int";
    /// The core schema tag for floating point numbers.
    pub const FLOAT: &'static str = "tag:yaml.org,2002:float";
    /// The core schema tag for strings.
    pub const STR: &'static str = "tag:yaml.org,2002:str";
    /// The core schema tag for binary data.
    pub const BINARY: &'static str = "tag:yaml.org,2002:binary";
    /// The tag YAML assigns to merge keys (`<<`).
    pub const MERGE: &'static str = "tag:yaml.org,2002:merge";
    /// The tag YAML assigns to the `=` value key.
    pub const VALUE: &'static str = "tag:yaml.org,2002:value";

    /// Builds a tag from its fully resolved string form, e.g.
    /// `"tag:yaml.org,2002:str"`.
    pub fn new(tag: &str) -> Self {
        Tag(tag.as_bytes().into())
    }

    /// Returns whether this tag's bytes begin with `prefix`.
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.0.starts_with(prefix.as_bytes())
    }
}

impl PartialEq<str> for Tag {
    fn eq(&self, other: &str) -> bool {
        *self.0 == *other.as_bytes()
    }
}

impl Deref for Tag {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Debug for Tag {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        Debug::fmt(&String::from_utf8_lossy(&self.0), formatter)
    }
}
