// Copyright notice and licensing information.
// These lines indicate the copyright of the software and its licensing terms.
// SPDX-License-Identifier: Apache-2.0 OR MIT indicates dual licensing under Apache 2.0 or MIT licenses.
// Copyright © 2024 Serde YML, Seamless YAML Serialization for Rust. All rights reserved.

//! The node-graph intermediate representation shared by the load path
//! (built by [`crate::libyaml::composer`]) and the dump path (built by
//! [`crate::libyaml::serializer`]'s representer step).
//!
//! Nodes live in a [`Document`]'s arena rather than behind pointers or
//! `Rc`s: a [`NodeId`] is a plain index, `Copy` and cheap to carry
//! around, and a `visited: HashSet<NodeId>` is all a recursive walk
//! needs to stay cycle-safe in the presence of anchors/aliases.

use crate::libyaml::error::Mark;
use crate::libyaml::tag::Tag;
use crate::libyaml::{MappingStyle, ScalarStyle, SequenceStyle};
use std::collections::HashMap;

/// An index into a [`Document`]'s node arena.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) fn new(index: usize) -> Self {
        NodeId(index as u32)
    }

    /// The arena index this id refers to.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// The content of a single node in the graph.
#[derive(Clone, Debug)]
pub enum NodeData {
    /// A scalar leaf: its resolved or explicit tag, its literal text,
    /// and the style it was written/should be written in.
    Scalar {
        /// The node's tag, e.g. `tag:yaml.org,2002:int`.
        tag: Tag,
        /// The scalar's literal text.
        value: String,
        /// The scalar style it was parsed from, or should be emitted in.
        style: ScalarStyle,
    },
    /// An ordered sequence of child nodes.
    Sequence {
        /// The node's tag, e.g. `tag:yaml.org,2002:seq`.
        tag: Tag,
        /// The sequence's elements, in order.
        items: Vec<NodeId>,
        /// The sequence style it was parsed from, or should be emitted in.
        style: SequenceStyle,
    },
    /// An ordered list of key/value node pairs.
    Mapping {
        /// The node's tag, e.g. `tag:yaml.org,2002:map`.
        tag: Tag,
        /// The mapping's key/value pairs, in order.
        pairs: Vec<(NodeId, NodeId)>,
        /// The mapping style it was parsed from, or should be emitted in.
        style: MappingStyle,
    },
    /// A back-reference to a previously defined, anchored node.
    Alias(NodeId),
}

/// One node in a [`Document`]'s arena: its content plus the source
/// position and anchor name it carried, if any.
#[derive(Clone, Debug)]
pub struct Node {
    /// The node's content.
    pub data: NodeData,
    /// Where this node began in the source (or a default `Mark` for a
    /// node built programmatically for the dump path).
    pub mark: Mark,
    /// The anchor name this node was defined under, if any.
    pub anchor: Option<String>,
}

impl Node {
    /// Builds a node with no anchor, at the given mark.
    pub fn new(data: NodeData, mark: Mark) -> Self {
        Node {
            data,
            mark,
            anchor: None,
        }
    }
}

/// A single YAML document's node-graph: an arena of [`Node`]s, the id
/// of the root node, and the anchor table in effect while composing
/// (or serializing) it.
///
/// The anchor table is reset per document, matching the scanner/parser's
/// own per-document anchor scoping.
#[derive(Clone, Debug, Default)]
pub struct Document {
    nodes: Vec<Node>,
    root: Option<NodeId>,
    anchors: HashMap<String, NodeId>,
}

impl Document {
    /// Builds an empty document.
    pub fn new() -> Self {
        Document::default()
    }

    /// Appends `node` to the arena, registering its anchor if it has
    /// one, and returns the id it was assigned.
    pub fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        if let Some(anchor) = &node.anchor {
            self.anchors.insert(anchor.clone(), id);
        }
        self.nodes.push(node);
        id
    }

    /// Looks up a node by id.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this document's [`push`](Self::push).
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// Looks up a node by id, mutably.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this document's [`push`](Self::push).
    pub fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    /// The document's root node, if one has been set.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Records `id` as the document's root.
    pub fn set_root(&mut self, id: NodeId) {
        self.root = Some(id);
    }

    /// Looks up a previously registered anchor by name.
    pub fn anchor(&self, name: &str) -> Option<NodeId> {
        self.anchors.get(name).copied()
    }

    /// The number of nodes in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the arena holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Visits `id` and every node reachable from it exactly once,
    /// following `Alias` nodes without re-descending into a node
    /// already seen on this walk.
    pub fn walk(&self, id: NodeId, visit: &mut dyn FnMut(NodeId, &Node)) {
        let mut visited = std::collections::HashSet::new();
        self.walk_inner(id, visit, &mut visited);
    }

    fn walk_inner(
        &self,
        id: NodeId,
        visit: &mut dyn FnMut(NodeId, &Node),
        visited: &mut std::collections::HashSet<NodeId>,
    ) {
        if !visited.insert(id) {
            return;
        }
        let node = self.get(id);
        visit(id, node);
        match &node.data {
            NodeData::Scalar { .. } | NodeData::Alias(_) => {}
            NodeData::Sequence { items, .. } => {
                for item in items {
                    self.walk_inner(*item, visit, visited);
                }
            }
            NodeData::Mapping { pairs, .. } => {
                for (key, value) in pairs {
                    self.walk_inner(*key, visit, visited);
                    self.walk_inner(*value, visit, visited);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libyaml::tag::Tag;

    #[test]
    fn push_assigns_increasing_ids() {
        let mut doc = Document::new();
        let a = doc.push(Node::new(
            NodeData::Scalar {
                tag: Tag::new(crate::libyaml::STR_TAG),
                value: "a".to_owned(),
                style: ScalarStyle::Plain,
            },
            Mark::default(),
        ));
        let b = doc.push(Node::new(
            NodeData::Scalar {
                tag: Tag::new(crate::libyaml::STR_TAG),
                value: "b".to_owned(),
                style: ScalarStyle::Plain,
            },
            Mark::default(),
        ));
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(doc.len(), 2);
    }

    #[test]
    fn anchors_resolve_to_the_node_that_defined_them() {
        let mut doc = Document::new();
        let mut scalar = Node::new(
            NodeData::Scalar {
                tag: Tag::new(crate::libyaml::STR_TAG),
                value: "anchored".to_owned(),
                style: ScalarStyle::Plain,
            },
            Mark::default(),
        );
        scalar.anchor = Some("x".to_owned());
        let id = doc.push(scalar);
        assert_eq!(doc.anchor("x"), Some(id));
        assert_eq!(doc.anchor("missing"), None);
    }

    #[test]
    fn walk_visits_each_aliased_node_once() {
        let mut doc = Document::new();
        let mut leaf = Node::new(
            NodeData::Scalar {
                tag: Tag::new(crate::libyaml::STR_TAG),
                value: "shared".to_owned(),
                style: ScalarStyle::Plain,
            },
            Mark::default(),
        );
        leaf.anchor = Some("shared".to_owned());
        let leaf_id = doc.push(leaf);
        let seq = doc.push(Node::new(
            NodeData::Sequence {
                tag: Tag::new(crate::libyaml::SEQ_TAG),
                items: vec![leaf_id, leaf_id],
                style: SequenceStyle::Block,
            },
            Mark::default(),
        ));
        doc.set_root(seq);

        let mut visited = Vec::new();
        doc.walk(seq, &mut |id, _node| visited.push(id));
        assert_eq!(visited, vec![seq, leaf_id]);
    }
}
