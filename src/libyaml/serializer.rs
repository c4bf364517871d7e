// Copyright notice and licensing information.
// These lines indicate the copyright of the software and its licensing terms.
// SPDX-License-Identifier: Apache-2.0 OR MIT indicates dual licensing under Apache 2.0 or MIT licenses.
// Copyright © 2024 Serde YML, Seamless YAML Serialization for Rust. All rights reserved.

//! Emits a [`Document`] node-graph as an event stream: a reference-count
//! pre-pass decides which nodes need an anchor, a synthetic-name pass
//! names the ones that did not already carry one from the source
//! document, and a depth-first walk pushes the resulting events into an
//! [`Emitter`].
//!
//! This is the node-graph counterpart to [`crate::ser::Serializer`],
//! which instead walks a `serde::Serialize` value directly without ever
//! materializing a [`Node`] arena.

use crate::libyaml::emitter::Emitter;
use crate::libyaml::error::EmitterError;
use crate::libyaml::tag::Tag;
use crate::libyaml::{Break, Encoding, Event};
use crate::node::{Document, NodeData, NodeId};
use crate::options::{LineBreak, Options};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::io;
use std::rc::Rc;

/// A `std::io::Write` adapter over a writer shared (via `Rc<RefCell<_>>`)
/// between the `Serializer` and the `Emitter` it drives, so the writer
/// can be handed back to the caller through [`Serializer::finish`] once
/// emission finishes.
struct SharedWriter<W> {
    inner: Rc<RefCell<Option<W>>>,
}

impl<W: io::Write> io::Write for SharedWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.inner.borrow_mut().as_mut() {
            Some(writer) => writer.write(buf),
            None => Err(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "write after Serializer::finish",
            )),
        }
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        match self.inner.borrow_mut().as_mut() {
            Some(writer) => writer.write_all(buf),
            None => Err(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "write after Serializer::finish",
            )),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.inner.borrow_mut().as_mut() {
            Some(writer) => writer.flush(),
            None => Ok(()),
        }
    }
}

/// Drives an [`Emitter`] from a [`Document`]'s node graph.
pub struct Serializer<W> {
    emitter: Emitter<'static>,
    writer: Rc<RefCell<Option<W>>>,
    options: Options,
}

impl<W> std::fmt::Debug for Serializer<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Serializer").finish_non_exhaustive()
    }
}

impl<W> Serializer<W>
where
    W: io::Write + 'static,
{
    /// Creates a serializer writing the stream header to `writer`, using
    /// the default [`Options`].
    pub fn new(writer: W) -> Result<Self, EmitterError> {
        Self::with_options(writer, Options::default())
    }

    /// Creates a serializer writing the stream header to `writer`,
    /// applying `options`'s indent/width/canonical/unicode/line-break
    /// settings to the underlying [`Emitter`] before anything is emitted.
    pub fn with_options(writer: W, options: Options) -> Result<Self, EmitterError> {
        let writer = Rc::new(RefCell::new(Some(writer)));
        let shared = SharedWriter {
            inner: Rc::clone(&writer),
        };
        let mut emitter = Emitter::new(shared);
        emitter.set_indent(options.indent);
        emitter.set_canonical(options.canonical);
        emitter.set_width(options.line_width);
        emitter.set_unicode(options.unicode);
        emitter.set_break(match options.line_break {
            LineBreak::Lf => Break::Ln,
            LineBreak::Cr => Break::Cr,
            LineBreak::CrLf => Break::CrLn,
        });
        emitter.emit(Event::stream_start(Encoding::Utf8))?;
        Ok(Serializer {
            emitter,
            writer,
            options,
        })
    }

    /// Emits one document from its node graph.
    pub fn serialize_document(&mut self, document: &Document) -> Result<(), EmitterError> {
        self.emitter.emit(Event::document_start(
            None,
            &[],
            !self.options.explicit_start,
        ))?;
        if let Some(root) = document.root() {
            let (anchors, _order) = assign_anchors(document, root);
            let mut emitted = HashSet::new();
            self.emit_node(document, root, &anchors, &mut emitted)?;
        }
        self.emitter
            .emit(Event::document_end(!self.options.explicit_end))
    }

    /// Emits STREAM-END, flushes, and hands the underlying writer back
    /// to the caller.
    pub fn finish(mut self) -> Result<W, EmitterError> {
        self.emitter.emit(Event::stream_end())?;
        self.emitter.flush().map_err(EmitterError::from)?;
        drop(self.emitter);
        Rc::try_unwrap(self.writer)
            .ok()
            .and_then(|cell| cell.into_inner())
            .ok_or_else(|| EmitterError::Problem("writer already taken"))
    }

    fn emit_node(
        &mut self,
        document: &Document,
        id: NodeId,
        anchors: &HashMap<NodeId, String>,
        emitted: &mut HashSet<NodeId>,
    ) -> Result<(), EmitterError> {
        if let Some(name) = anchors.get(&id) {
            if !emitted.insert(id) {
                return self.emitter.emit(Event::alias(name));
            }
        } else {
            emitted.insert(id);
        }

        let node = document.get(id);
        let anchor = anchors.get(&id).map(String::as_str);
        match &node.data {
            NodeData::Alias(target) => self.emit_node(document, *target, anchors, emitted),
            NodeData::Scalar { tag, value, style } => self.emitter.emit(Event::scalar(
                anchor,
                Some(tag_str(tag)),
                value,
                false,
                false,
                *style,
            )),
            NodeData::Sequence { tag, items, style } => {
                self.emitter
                    .emit(Event::sequence_start(anchor, Some(tag_str(tag)), false, *style))?;
                for item in items {
                    self.emit_node(document, *item, anchors, emitted)?;
                }
                self.emitter.emit(Event::sequence_end())
            }
            NodeData::Mapping { tag, pairs, style } => {
                self.emitter
                    .emit(Event::mapping_start(anchor, Some(tag_str(tag)), false, *style))?;
                for (key, value) in pairs {
                    self.emit_node(document, *key, anchors, emitted)?;
                    self.emit_node(document, *value, anchors, emitted)?;
                }
                self.emitter.emit(Event::mapping_end())
            }
        }
    }
}

fn tag_str(tag: &Tag) -> &str {
    std::str::from_utf8(tag).unwrap_or(Tag::STR)
}

/// Walks every node reachable from `root`, recording how many distinct
/// incoming references each one has and the order each was first seen
/// in. A node referenced more than once needs an anchor to round-trip;
/// a node's own existing anchor (from the source document) is kept,
/// otherwise a synthetic `a`, `b`, ... `z`, `aa`, ... name is minted in
/// first-seen order.
fn assign_anchors(document: &Document, root: NodeId) -> (HashMap<NodeId, String>, Vec<NodeId>) {
    let mut counts = HashMap::new();
    let mut order = Vec::new();
    count_references(document, root, &mut counts, &mut order);

    let mut anchors = HashMap::new();
    let mut next_synthetic = 0usize;
    for id in &order {
        let shared = counts[id] > 1;
        let is_alias = matches!(document.get(*id).data, NodeData::Alias(_));
        if shared && !is_alias {
            let name = document.get(*id).anchor.clone().unwrap_or_else(|| {
                let name = synthetic_name(next_synthetic);
                next_synthetic += 1;
                name
            });
            anchors.insert(*id, name);
        }
    }
    (anchors, order)
}

fn count_references(
    document: &Document,
    id: NodeId,
    counts: &mut HashMap<NodeId, usize>,
    order: &mut Vec<NodeId>,
) {
    let count = counts.entry(id).or_insert(0);
    *count += 1;
    if *count > 1 {
        return;
    }
    order.push(id);
    match &document.get(id).data {
        NodeData::Scalar { .. } => {}
        NodeData::Alias(target) => count_references(document, *target, counts, order),
        NodeData::Sequence { items, .. } => {
            for item in items {
                count_references(document, *item, counts, order);
            }
        }
        NodeData::Mapping { pairs, .. } => {
            for (key, value) in pairs {
                count_references(document, *key, counts, order);
                count_references(document, *value, counts, order);
            }
        }
    }
}

/// Base-26 letter names in the style libyaml-compatible emitters use for
/// synthesized anchors: `a`, `b`, ... `z`, `aa`, `ab`, ...
fn synthetic_name(mut index: usize) -> String {
    let mut letters = Vec::new();
    loop {
        let digit = (index % 26) as u8;
        letters.push(b'a' + digit);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    letters.reverse();
    String::from_utf8(letters).expect("ascii letters are valid utf-8")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthetic_names_follow_the_spreadsheet_column_sequence() {
        assert_eq!(synthetic_name(0), "a");
        assert_eq!(synthetic_name(25), "z");
        assert_eq!(synthetic_name(26), "aa");
        assert_eq!(synthetic_name(27), "ab");
        assert_eq!(synthetic_name(51), "az");
        assert_eq!(synthetic_name(52), "ba");
    }

    #[test]
    fn a_node_referenced_twice_is_anchored_once() {
        use crate::node::Node;

        let mut document = Document::new();
        let leaf = document.push(Node::new(
            NodeData::Scalar {
                tag: Tag::new(crate::libyaml::STR_TAG),
                value: "shared".to_owned(),
                style: crate::libyaml::ScalarStyle::Plain,
            },
            Default::default(),
        ));
        let seq = document.push(Node::new(
            NodeData::Sequence {
                tag: Tag::new(crate::libyaml::SEQ_TAG),
                items: vec![leaf, leaf],
                style: crate::libyaml::SequenceStyle::Block,
            },
            Default::default(),
        ));
        document.set_root(seq);

        let (anchors, order) = assign_anchors(&document, seq);
        assert_eq!(anchors.get(&leaf).map(String::as_str), Some("a"));
        assert!(anchors.get(&seq).is_none());
        assert_eq!(order, vec![seq, leaf]);
    }

    #[test]
    fn an_unshared_node_gets_no_anchor() {
        use crate::node::Node;

        let mut document = Document::new();
        let leaf = document.push(Node::new(
            NodeData::Scalar {
                tag: Tag::new(crate::libyaml::STR_TAG),
                value: "lonely".to_owned(),
                style: crate::libyaml::ScalarStyle::Plain,
            },
            Default::default(),
        ));
        document.set_root(leaf);

        let (anchors, _order) = assign_anchors(&document, leaf);
        assert!(anchors.is_empty());
    }
}
