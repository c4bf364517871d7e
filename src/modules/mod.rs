//! Shared infrastructure used by both the load and dump paths: the
//! crate's error type and the path tracker used to describe where in a
//! document a deserialization error occurred.

pub mod error;
pub mod path;
