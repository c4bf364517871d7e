// Copyright notice and licensing information.
// These lines indicate the copyright of the software and its licensing terms.
// SPDX-License-Identifier: Apache-2.0 OR MIT indicates dual licensing under Apache 2.0 or MIT licenses.
// Copyright © 2024 Serde YML, Seamless YAML Serialization for Rust. All rights reserved.

//! Builds the [`crate::node::Document`] node-graph from a [`Parser`]'s
//! event stream, resolving implicit tags via [`super::resolver`] along
//! the way.
//!
//! This mirrors [`crate::loader::Loader`]'s event-draining loop, but
//! instead of flattening events into a `Vec` for the deserializer to
//! walk directly, it assembles the nested [`Node`] arena that the
//! representer/serializer path and any node-graph-level consumer need.

use crate::comment::{Comment, CommentPlugin, CommentPosition};
use crate::libyaml::error::Mark;
use crate::libyaml::parser::{Event as ParserEvent, Parser, Scalar as ParserScalar};
use crate::libyaml::resolver;
use crate::libyaml::tag::Tag;
use crate::libyaml::{ComposerError, DEFAULT_MAPPING_TAG, DEFAULT_SEQUENCE_TAG, MappingStyle, ScalarStyle, SequenceStyle};
use crate::node::{Document, Node, NodeData, NodeId};

/// Drives a [`Parser`] to build one [`Document`] at a time.
pub struct Composer<'r> {
    parser: Option<Parser<'r>>,
    parsed_document_count: usize,
}

impl std::fmt::Debug for Composer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Composer")
            .field("parsed_document_count", &self.parsed_document_count)
            .finish_non_exhaustive()
    }
}

/// A sequence or mapping whose start event has been seen but whose end
/// event has not: its children accumulate here until it closes.
enum Open {
    Sequence {
        tag: Tag,
        anchor: Option<String>,
        style: SequenceStyle,
        mark: Mark,
        items: Vec<NodeId>,
        /// Head comments seen before this collection's start event,
        /// delivered to the comment plugin once the collection's own
        /// node id is known at its end event.
        head_comments: Vec<Comment>,
    },
    Mapping {
        tag: Tag,
        anchor: Option<String>,
        style: MappingStyle,
        mark: Mark,
        pairs: Vec<(NodeId, NodeId)>,
        pending_key: Option<NodeId>,
        head_comments: Vec<Comment>,
    },
}

impl<'r> Composer<'r> {
    /// Builds a composer driving `parser`.
    pub fn new(parser: Parser<'r>) -> Self {
        Composer {
            parser: Some(parser),
            parsed_document_count: 0,
        }
    }

    /// Composes the next document in the stream, or `None` once the
    /// stream is exhausted.
    pub fn next_document(&mut self) -> Result<Option<Document>, ComposerError> {
        self.compose(None)
    }

    /// Composes the next document, reporting every comment encountered
    /// along the way to `plugin` at the fixed points
    /// [`CommentPlugin::on_event`]/[`CommentPlugin::on_node_created`]/
    /// [`CommentPlugin::after_mapping_pair`]/[`CommentPlugin::at_collection_end`]
    /// describe.
    pub fn next_document_with_comments(
        &mut self,
        plugin: &mut dyn CommentPlugin,
    ) -> Result<Option<Document>, ComposerError> {
        self.compose(Some(plugin))
    }

    fn compose(
        &mut self,
        mut plugin: Option<&mut dyn CommentPlugin>,
    ) -> Result<Option<Document>, ComposerError> {
        let parser = match &mut self.parser {
            Some(parser) => parser,
            None => return Ok(None),
        };

        let first = self.parsed_document_count == 0;
        self.parsed_document_count += 1;

        let mut document = Document::new();
        let mut stack: Vec<Open> = Vec::new();
        let mut last_node: Option<NodeId> = None;
        // Head comments scanned in the gap before a StreamStart/DocumentStart
        // event: there is no node yet for them to precede, so they carry
        // forward to whatever the first real event turns out to be.
        let mut carried_head: Vec<Comment> = Vec::new();

        loop {
            let (event, mark) = parser.next()?;
            let comments = parser.take_comments();
            for comment in &comments {
                if let Some(plugin) = plugin.as_deref_mut() {
                    plugin.on_event(comment);
                }
            }
            let (head_this_event, line): (Vec<Comment>, Vec<Comment>) = comments
                .into_iter()
                .partition(|c| c.position == CommentPosition::Head);
            carried_head.extend(head_this_event);
            let mut head = std::mem::take(&mut carried_head);
            if let (Some(plugin), Some(node)) = (plugin.as_deref_mut(), last_node) {
                for comment in &line {
                    plugin.on_node_created(node, comment);
                }
            }

            match event {
                ParserEvent::StreamStart => {
                    carried_head = head;
                    continue;
                }
                ParserEvent::StreamEnd => {
                    self.parser = None;
                    if let Some(plugin) = plugin.as_deref_mut() {
                        for comment in &head {
                            plugin.at_collection_end(None, comment);
                        }
                    }
                    return Ok(match document.root() {
                        Some(_) => Some(document),
                        None if first => {
                            let id = document.push(Node::new(
                                NodeData::Scalar {
                                    tag: Tag::new(crate::libyaml::NULL_TAG),
                                    value: String::new(),
                                    style: ScalarStyle::Plain,
                                },
                                mark,
                            ));
                            document.set_root(id);
                            Some(document)
                        }
                        None => None,
                    });
                }
                ParserEvent::DocumentStart => {
                    carried_head = head;
                    continue;
                }
                ParserEvent::DocumentEnd => {
                    if let Some(plugin) = plugin.as_deref_mut() {
                        for comment in &head {
                            plugin.at_collection_end(None, comment);
                        }
                    }
                    return Ok(Some(document));
                }
                ParserEvent::Alias(name) => {
                    let target = document.anchor(&name).ok_or(ComposerError::Problem {
                        problem: "found undefined alias",
                        mark,
                    })?;
                    let id = document.push(Node::new(NodeData::Alias(target), mark));
                    if let Some(plugin) = plugin.as_deref_mut() {
                        for comment in &head {
                            plugin.on_node_created(id, comment);
                        }
                    }
                    Self::attach(&mut stack, &mut document, id)?;
                    last_node = Some(id);
                }
                ParserEvent::Scalar(scalar) => {
                    let id = Self::compose_scalar(&mut document, scalar, mark);
                    if let Some(plugin) = plugin.as_deref_mut() {
                        for comment in &head {
                            plugin.on_node_created(id, comment);
                        }
                    }
                    Self::attach(&mut stack, &mut document, id)?;
                    last_node = Some(id);
                }
                ParserEvent::SequenceStart(start) => {
                    let tag = start.tag.unwrap_or_else(|| Tag::new(DEFAULT_SEQUENCE_TAG));
                    stack.push(Open::Sequence {
                        tag,
                        anchor: start.anchor,
                        style: SequenceStyle::Any,
                        mark,
                        items: Vec::new(),
                        head_comments: std::mem::take(&mut head),
                    });
                }
                ParserEvent::SequenceEnd => {
                    let open = stack.pop().ok_or(ComposerError::Problem {
                        problem: "unexpected sequence end",
                        mark,
                    })?;
                    let (tag, anchor, style, items, start_mark, own_head) = match open {
                        Open::Sequence {
                            tag,
                            anchor,
                            style,
                            mark,
                            items,
                            head_comments,
                        } => (tag, anchor, style, items, mark, head_comments),
                        Open::Mapping { mark, .. } => {
                            return Err(ComposerError::Problem {
                                problem: "sequence end did not match an open mapping",
                                mark,
                            });
                        }
                    };
                    let mut node = Node::new(NodeData::Sequence { tag, items, style }, start_mark);
                    node.anchor = anchor;
                    let id = document.push(node);
                    if let Some(plugin) = plugin.as_deref_mut() {
                        for comment in &own_head {
                            plugin.on_node_created(id, comment);
                        }
                        for comment in &head {
                            plugin.at_collection_end(Some(id), comment);
                        }
                    }
                    Self::attach(&mut stack, &mut document, id)?;
                    last_node = Some(id);
                }
                ParserEvent::MappingStart(start) => {
                    let tag = start.tag.unwrap_or_else(|| Tag::new(DEFAULT_MAPPING_TAG));
                    stack.push(Open::Mapping {
                        tag,
                        anchor: start.anchor,
                        style: MappingStyle::Any,
                        mark,
                        pairs: Vec::new(),
                        pending_key: None,
                        head_comments: std::mem::take(&mut head),
                    });
                }
                ParserEvent::MappingEnd => {
                    let open = stack.pop().ok_or(ComposerError::Problem {
                        problem: "unexpected mapping end",
                        mark,
                    })?;
                    let (tag, anchor, style, pairs, start_mark, own_head) = match open {
                        Open::Mapping {
                            tag,
                            anchor,
                            style,
                            pairs,
                            pending_key,
                            mark,
                            head_comments,
                        } => {
                            if pending_key.is_some() {
                                return Err(ComposerError::Problem {
                                    problem: "mapping ended with a key but no value",
                                    mark,
                                });
                            }
                            (tag, anchor, style, pairs, mark, head_comments)
                        }
                        Open::Sequence { mark, .. } => {
                            return Err(ComposerError::Problem {
                                problem: "mapping end did not match an open sequence",
                                mark,
                            });
                        }
                    };
                    let pairs_for_plugin = plugin.is_some().then(|| pairs.clone());
                    let mut node =
                        Node::new(NodeData::Mapping { tag, pairs, style }, start_mark);
                    node.anchor = anchor;
                    let id = document.push(node);
                    if let Some(plugin) = plugin.as_deref_mut() {
                        for comment in &own_head {
                            plugin.on_node_created(id, comment);
                        }
                        for comment in &head {
                            plugin.at_collection_end(Some(id), comment);
                        }
                        for (key, value) in pairs_for_plugin.iter().flatten() {
                            plugin.after_mapping_pair(id, *key, *value);
                        }
                    }
                    Self::attach(&mut stack, &mut document, id)?;
                    last_node = Some(id);
                }
            }
        }
    }

    fn compose_scalar(document: &mut Document, scalar: ParserScalar<'r>, mark: Mark) -> NodeId {
        let value = String::from_utf8_lossy(&scalar.value).into_owned();
        let plain = scalar.style == ScalarStyle::Plain;
        let tag = scalar
            .tag
            .unwrap_or_else(|| Tag::new(resolver::resolve_scalar_tag(&value, plain)));
        let mut node = Node::new(
            NodeData::Scalar {
                tag,
                value,
                style: scalar.style,
            },
            mark,
        );
        node.anchor = scalar.anchor;
        document.push(node)
    }

    /// Attaches a just-closed node to its parent container, or sets it
    /// as the document root when the stack is empty.
    fn attach(stack: &mut [Open], document: &mut Document, id: NodeId) -> Result<(), ComposerError> {
        match stack.last_mut() {
            None => {
                document.set_root(id);
                Ok(())
            }
            Some(Open::Sequence { items, .. }) => {
                items.push(id);
                Ok(())
            }
            Some(Open::Mapping {
                pending_key, pairs, ..
            }) => {
                match pending_key.take() {
                    None => *pending_key = Some(id),
                    Some(key) => pairs.push((key, id)),
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compose(input: &str) -> Document {
        let parser = Parser::new(std::borrow::Cow::Borrowed(input.as_bytes()));
        let mut composer = Composer::new(parser);
        composer
            .next_document()
            .expect("parse")
            .expect("one document")
    }

    #[test]
    fn composes_a_plain_scalar() {
        let document = compose("hello\n");
        let root = document.root().expect("root");
        match &document.get(root).data {
            NodeData::Scalar { value, tag, .. } => {
                assert_eq!(value, "hello");
                assert!(tag.starts_with(crate::libyaml::STR_TAG));
            }
            _ => panic!("expected scalar"),
        }
    }

    #[test]
    fn composes_nested_collections() {
        let document = compose("a:\n  - 1\n  - 2\n");
        let root = document.root().expect("root");
        match &document.get(root).data {
            NodeData::Mapping { pairs, .. } => {
                assert_eq!(pairs.len(), 1);
                let (_, value) = pairs[0];
                match &document.get(value).data {
                    NodeData::Sequence { items, .. } => assert_eq!(items.len(), 2),
                    _ => panic!("expected sequence"),
                }
            }
            _ => panic!("expected mapping"),
        }
    }

    #[test]
    fn resolves_anchors_and_aliases_within_a_document() {
        let document = compose("a: &x 1\nb: *x\n");
        let root = document.root().expect("root");
        match &document.get(root).data {
            NodeData::Mapping { pairs, .. } => {
                let (_, a_value) = pairs[0];
                let (_, b_value) = pairs[1];
                assert!(matches!(document.get(b_value).data, NodeData::Alias(id) if id == a_value));
            }
            _ => panic!("expected mapping"),
        }
    }

    #[test]
    fn rejects_an_undefined_alias() {
        let parser = Parser::new(std::borrow::Cow::Borrowed(b"*missing\n" as &[u8]));
        let mut composer = Composer::new(parser);
        assert!(composer.next_document().is_err());
    }

    #[test]
    fn an_empty_stream_composes_a_single_null_document() {
        let parser = Parser::new(std::borrow::Cow::Borrowed(b"" as &[u8]));
        let mut composer = Composer::new(parser);
        let document = composer.next_document().expect("parse").expect("document");
        let root = document.root().expect("root");
        match &document.get(root).data {
            NodeData::Scalar { tag, .. } => assert!(tag.starts_with(crate::libyaml::NULL_TAG)),
            _ => panic!("expected scalar"),
        }
    }

    #[test]
    fn a_head_comment_attaches_to_the_node_it_precedes() {
        use crate::comment::HistoricalCommentPlugin;

        let parser = Parser::new(std::borrow::Cow::Borrowed(
            b"# explains the next field\nname: value\n" as &[u8],
        ));
        let mut composer = Composer::new(parser);
        let mut plugin = HistoricalCommentPlugin::new();
        let document = composer
            .next_document_with_comments(&mut plugin)
            .expect("parse")
            .expect("document");

        let root = document.root().expect("root");
        let (key, _value) = match &document.get(root).data {
            NodeData::Mapping { pairs, .. } => pairs[0],
            _ => panic!("expected mapping"),
        };
        assert_eq!(
            plugin.head_comments(),
            &[(key, "explains the next field".to_owned())]
        );
    }

    #[test]
    fn a_line_comment_attaches_to_the_preceding_scalar() {
        use crate::comment::HistoricalCommentPlugin;

        let parser = Parser::new(std::borrow::Cow::Borrowed(
            b"name: value # trailing note\n" as &[u8],
        ));
        let mut composer = Composer::new(parser);
        let mut plugin = HistoricalCommentPlugin::new();
        let document = composer
            .next_document_with_comments(&mut plugin)
            .expect("parse")
            .expect("document");

        let root = document.root().expect("root");
        let (_key, value) = match &document.get(root).data {
            NodeData::Mapping { pairs, .. } => pairs[0],
            _ => panic!("expected mapping"),
        };
        assert_eq!(
            plugin.line_comments(),
            &[(value, "trailing note".to_owned())]
        );
    }

    #[test]
    fn a_comment_at_the_end_of_a_sequence_is_a_foot_comment() {
        use crate::comment::HistoricalCommentPlugin;

        let parser = Parser::new(std::borrow::Cow::Borrowed(
            b"- 1\n- 2\n# closing remark\n" as &[u8],
        ));
        let mut composer = Composer::new(parser);
        let mut plugin = HistoricalCommentPlugin::new();
        let document = composer
            .next_document_with_comments(&mut plugin)
            .expect("parse")
            .expect("document");

        let root = document.root().expect("root");
        assert!(matches!(document.get(root).data, NodeData::Sequence { .. }));
        assert_eq!(
            plugin.foot_comments(),
            &[(root, "closing remark".to_owned())]
        );
    }
}
