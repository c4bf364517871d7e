// Copyright notice and licensing information.
// These lines indicate the copyright of the software and its licensing terms.
// SPDX-License-Identifier: Apache-2.0 OR MIT indicates dual licensing under Apache 2.0 or MIT licenses.
// Copyright © 2024 Serde YML, Seamless YAML Serialization for Rust. All rights reserved.

//! Configuration shared by the load and dump paths: indentation, line
//! width, the scalar-quoting tiebreak, the construction-time
//! `known-fields`/`unique-keys` checks, and the amplification policy
//! override.
//!
//! [`Options`] is a consuming combinator builder, the way
//! [`crate::libyaml::emitter::Emitter`]'s own `set_indent`/`set_width`/
//! `set_canonical` setters are chained by [`crate::ser::Serializer`]:
//! each method takes `self` and hands back `Self`, so a preset can be
//! built once and further overridden left to right.

use std::fmt::{self, Debug};
use std::sync::Arc;

/// Line break style used when writing YAML output.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum LineBreak {
    /// `\n`.
    Lf,
    /// `\r`.
    Cr,
    /// `\r\n`.
    CrLf,
}

/// Which quote style the representer prefers when a scalar could be
/// written either plain or quoted and a tiebreak is needed.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum QuotePreference {
    /// Prefer single quotes.
    Single,
    /// Prefer double quotes.
    Double,
    /// The legacy tiebreak: double quotes only when the scalar needs an
    /// escape single quotes cannot express.
    Legacy,
}

/// Overrides the default alias-amplification envelope described by
/// [`crate::modules::error::ErrorImpl::RepetitionLimitExceeded`]'s
/// guard: given `(alias_count, total_constructed_nodes)`, return
/// whether construction should continue.
pub type AliasingRestrictionFn = Arc<dyn Fn(usize, usize) -> bool + Send + Sync>;

/// The full set of load/dump options, built with a consuming
/// combinator API: `Options::default().indent(4).canonical(true)`.
#[derive(Clone)]
#[non_exhaustive]
pub struct Options {
    pub(crate) indent: i32,
    pub(crate) compact_seq_indent: bool,
    pub(crate) line_width: i32,
    pub(crate) unicode: bool,
    pub(crate) canonical: bool,
    pub(crate) line_break: LineBreak,
    pub(crate) explicit_start: bool,
    pub(crate) explicit_end: bool,
    pub(crate) flow_simple_coll: bool,
    pub(crate) known_fields: bool,
    pub(crate) single_document: bool,
    pub(crate) unique_keys: bool,
    pub(crate) quote_preference: QuotePreference,
    pub(crate) aliasing_restriction_fn: Option<AliasingRestrictionFn>,
    pub(crate) all_documents: bool,
    pub(crate) stream_nodes: bool,
}

impl Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("indent", &self.indent)
            .field("compact_seq_indent", &self.compact_seq_indent)
            .field("line_width", &self.line_width)
            .field("unicode", &self.unicode)
            .field("canonical", &self.canonical)
            .field("line_break", &self.line_break)
            .field("explicit_start", &self.explicit_start)
            .field("explicit_end", &self.explicit_end)
            .field("flow_simple_coll", &self.flow_simple_coll)
            .field("known_fields", &self.known_fields)
            .field("single_document", &self.single_document)
            .field("unique_keys", &self.unique_keys)
            .field("quote_preference", &self.quote_preference)
            .field(
                "aliasing_restriction_fn",
                &self.aliasing_restriction_fn.as_ref().map(|_| "<fn>"),
            )
            .field("all_documents", &self.all_documents)
            .field("stream_nodes", &self.stream_nodes)
            .finish()
    }
}

impl Default for Options {
    /// The library's baseline defaults: 2-space indent, non-compact
    /// sequences, unbounded line width, Unicode literal output. This is
    /// the same baseline the `v4` preset starts from, minus its compact
    /// sequence indentation.
    fn default() -> Self {
        Options {
            indent: 2,
            compact_seq_indent: false,
            line_width: -1,
            unicode: true,
            canonical: false,
            line_break: LineBreak::Lf,
            explicit_start: false,
            explicit_end: false,
            flow_simple_coll: false,
            known_fields: false,
            single_document: false,
            unique_keys: false,
            quote_preference: QuotePreference::Legacy,
            aliasing_restriction_fn: None,
            all_documents: false,
            stream_nodes: false,
        }
    }
}

impl Options {
    /// The `v2` preset: 2-space indent, non-compact sequences.
    pub fn v2() -> Self {
        Options::default()
    }

    /// The `v3` preset: 4-space indent, non-compact sequences.
    pub fn v3() -> Self {
        Options::default().indent(4)
    }

    /// The `v4` preset: 2-space indent, compact sequences.
    pub fn v4() -> Self {
        Options::default().compact_seq_indent(true)
    }

    /// Sets the indentation step, clamped to the valid `2..=9` range.
    pub fn indent(mut self, indent: i32) -> Self {
        self.indent = indent.clamp(2, 9);
        self
    }

    /// Whether block sequence items are indented flush with their
    /// parent mapping key instead of one step further in.
    pub fn compact_seq_indent(mut self, compact: bool) -> Self {
        self.compact_seq_indent = compact;
        self
    }

    /// Sets the soft line width the emitter wraps long lines at;
    /// `-1` disables wrapping.
    pub fn line_width(mut self, width: i32) -> Self {
        self.line_width = width;
        self
    }

    /// Whether non-ASCII characters are written literally (`true`) or
    /// escaped (`false`).
    pub fn unicode(mut self, unicode: bool) -> Self {
        self.unicode = unicode;
        self
    }

    /// Whether to emit in JSON-like canonical form.
    pub fn canonical(mut self, canonical: bool) -> Self {
        self.canonical = canonical;
        self
    }

    /// Sets the line break style.
    pub fn line_break(mut self, line_break: LineBreak) -> Self {
        self.line_break = line_break;
        self
    }

    /// Whether to always emit the `---` document-start marker.
    pub fn explicit_start(mut self, explicit: bool) -> Self {
        self.explicit_start = explicit;
        self
    }

    /// Whether to always emit the `...` document-end marker.
    pub fn explicit_end(mut self, explicit: bool) -> Self {
        self.explicit_end = explicit;
        self
    }

    /// Whether collections containing only scalars may be forced to
    /// flow style (`[a, b]`/`{a: b}`).
    pub fn flow_simple_coll(mut self, flow: bool) -> Self {
        self.flow_simple_coll = flow;
        self
    }

    /// Whether an unrecognized struct field is a hard construction
    /// error instead of being silently ignored.
    pub fn known_fields(mut self, known_fields: bool) -> Self {
        self.known_fields = known_fields;
        self
    }

    /// Whether loading stops after the first document in a stream.
    pub fn single_document(mut self, single: bool) -> Self {
        self.single_document = single;
        self
    }

    /// Whether a repeated mapping key is a hard construction error
    /// instead of last-write-wins.
    pub fn unique_keys(mut self, unique: bool) -> Self {
        self.unique_keys = unique;
        self
    }

    /// Sets the scalar-quoting tiebreak.
    pub fn quote_preference(mut self, preference: QuotePreference) -> Self {
        self.quote_preference = preference;
        self
    }

    /// Overrides the alias-amplification policy. The callback receives
    /// `(alias_count, total_constructed_nodes)` and returns whether
    /// construction may continue.
    pub fn aliasing_restriction_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(usize, usize) -> bool + Send + Sync + 'static,
    {
        self.aliasing_restriction_fn = Some(Arc::new(f));
        self
    }

    /// Whether the whole stream loads/dumps as a single sequence of
    /// documents rather than one document at a time.
    pub fn all_documents(mut self, all: bool) -> Self {
        self.all_documents = all;
        self
    }

    /// Whether stream-boundary nodes (carrying `%YAML`/`%TAG`
    /// directives) are exposed to the caller instead of being consumed
    /// internally.
    pub fn stream_nodes(mut self, expose: bool) -> Self {
        self.stream_nodes = expose;
        self
    }

    /// The default alias-amplification envelope: tolerant below 400,000
    /// total constructed nodes, linearly tightening to a hard stop at
    /// 4,000,000.
    pub fn default_aliasing_restriction(alias_count: usize, total_constructed: usize) -> bool {
        const TOLERANT_BELOW: usize = 400_000;
        const HARD_STOP_AT: usize = 4_000_000;
        if total_constructed < TOLERANT_BELOW {
            return true;
        }
        if total_constructed >= HARD_STOP_AT {
            return false;
        }
        let span = (HARD_STOP_AT - TOLERANT_BELOW) as f64;
        let progress = (total_constructed - TOLERANT_BELOW) as f64 / span;
        let allowed_ratio = 1.0 - progress;
        (alias_count as f64) <= allowed_ratio * (total_constructed as f64)
    }

    /// Runs the configured (or default) amplification check.
    pub fn allows_amplification(&self, alias_count: usize, total_constructed: usize) -> bool {
        match &self.aliasing_restriction_fn {
            Some(f) => f(alias_count, total_constructed),
            None => Self::default_aliasing_restriction(alias_count, total_constructed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indent_clamps_to_the_valid_range() {
        assert_eq!(Options::default().indent(0).indent, 2);
        assert_eq!(Options::default().indent(20).indent, 9);
        assert_eq!(Options::default().indent(3).indent, 3);
    }

    #[test]
    fn presets_differ_in_indent_and_compactness() {
        assert_eq!(Options::v2().indent, 2);
        assert!(!Options::v2().compact_seq_indent);
        assert_eq!(Options::v3().indent, 4);
        assert_eq!(Options::v4().indent, 2);
        assert!(Options::v4().compact_seq_indent);
    }

    #[test]
    fn options_override_left_to_right() {
        let opts = Options::v3().indent(5);
        assert_eq!(opts.indent, 5);
    }

    #[test]
    fn amplification_is_tolerant_below_the_threshold() {
        assert!(Options::default_aliasing_restriction(100_000, 399_999));
    }

    #[test]
    fn amplification_hard_stops_at_the_ceiling() {
        assert!(!Options::default_aliasing_restriction(1, 4_000_000));
    }

    #[test]
    fn amplification_tightens_linearly_between_the_envelope_bounds() {
        let midpoint = 400_000 + (4_000_000 - 400_000) / 2;
        assert!(Options::default_aliasing_restriction(1, midpoint));
        assert!(!Options::default_aliasing_restriction(midpoint, midpoint));
    }

    #[test]
    fn a_custom_aliasing_restriction_fn_overrides_the_default() {
        let opts = Options::default().aliasing_restriction_fn(|_, _| false);
        assert!(!opts.allows_amplification(0, 0));
    }
}
