// Copyright notice and licensing information.
// These lines indicate the copyright of the software and its licensing terms.
// SPDX-License-Identifier: Apache-2.0 OR MIT indicates dual licensing under Apache 2.0 or MIT licenses.
// Copyright © 2024 Serde YML, Seamless YAML Serialization for Rust. All rights reserved.

//! The comment plugin capability: a set of hooks the composer and
//! serializer call at fixed points so a plugin can attach comment text
//! to the node it belongs with, instead of the pipeline discarding it
//! the way a plain YAML parser does.
//!
//! [`HistoricalCommentPlugin`] is the in-tree reference implementation:
//! a head comment attaches to the node immediately following it, a line
//! comment attaches to the node on the same line, and a foot comment
//! attaches to the node (or collection) immediately preceding it.

use crate::libyaml::error::Mark;
use crate::node::NodeId;

/// Where a comment sits relative to the node it will be attached to.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum CommentPosition {
    /// On its own line(s) immediately before the node it describes.
    Head,
    /// Trailing on the same line as the node it describes.
    Line,
    /// On its own line(s) immediately after the node, or after the last
    /// entry of a collection before it closes.
    Foot,
}

/// A single comment as seen by the plugin, before it has been attached
/// to a node.
#[derive(Clone, Debug)]
pub struct Comment {
    /// The comment's text, without its leading `#` or trailing newline.
    pub text: String,
    /// Where the comment sits relative to its eventual owner.
    pub position: CommentPosition,
    /// Where the comment started in the source.
    pub mark: Mark,
}

/// Hook points a comment-aware composer/serializer calls into while
/// building or walking the node graph.
///
/// Each method may attach the comment however the plugin sees fit and
/// return `true`, or return `false` to signal "no special handling,
/// apply the default behavior" (which for the built-in pipeline is to
/// drop the comment, since the core scanner does not retain comment
/// text in its tokens).
pub trait CommentPlugin {
    /// Called as each event is produced by the parser, before the
    /// composer turns it into a node.
    fn on_event(&mut self, _comment: &Comment) -> bool {
        false
    }

    /// Called as the composer creates a node, with the id it was just
    /// assigned.
    fn on_node_created(&mut self, _node: NodeId, _comment: &Comment) -> bool {
        false
    }

    /// Called after each key/value pair of a mapping has been composed.
    fn after_mapping_pair(&mut self, _mapping: NodeId, _key: NodeId, _value: NodeId) -> bool {
        false
    }

    /// Called when a collection or document closes, with the id of the
    /// collection (`None` for the document itself).
    fn at_collection_end(&mut self, _collection: Option<NodeId>, _comment: &Comment) -> bool {
        false
    }
}

/// The reference [`CommentPlugin`]: migrates comments the way a human
/// reading the source would expect.
///
/// - [`CommentPosition::Head`] comments attach to the node that follows
///   them.
/// - [`CommentPosition::Line`] comments attach to the node that shares
///   their line.
/// - [`CommentPosition::Foot`] comments attach to the node (or the
///   collection, if the comment falls at its end) that precedes them.
#[derive(Default, Debug)]
pub struct HistoricalCommentPlugin {
    head: Vec<(NodeId, String)>,
    line: Vec<(NodeId, String)>,
    foot: Vec<(NodeId, String)>,
    pending_head: Vec<String>,
}

impl HistoricalCommentPlugin {
    /// Builds an empty plugin with no comments recorded yet.
    pub fn new() -> Self {
        HistoricalCommentPlugin::default()
    }

    /// The head comments attached so far, in attachment order.
    pub fn head_comments(&self) -> &[(NodeId, String)] {
        &self.head
    }

    /// The line comments attached so far, in attachment order.
    pub fn line_comments(&self) -> &[(NodeId, String)] {
        &self.line
    }

    /// The foot comments attached so far, in attachment order.
    pub fn foot_comments(&self) -> &[(NodeId, String)] {
        &self.foot
    }
}

impl CommentPlugin for HistoricalCommentPlugin {
    fn on_event(&mut self, comment: &Comment) -> bool {
        if comment.position == CommentPosition::Head {
            self.pending_head.push(comment.text.clone());
            true
        } else {
            false
        }
    }

    fn on_node_created(&mut self, node: NodeId, comment: &Comment) -> bool {
        match comment.position {
            CommentPosition::Head => {
                for text in self.pending_head.drain(..) {
                    self.head.push((node, text));
                }
                true
            }
            CommentPosition::Line => {
                self.line.push((node, comment.text.clone()));
                true
            }
            CommentPosition::Foot => false,
        }
    }

    fn at_collection_end(&mut self, collection: Option<NodeId>, comment: &Comment) -> bool {
        if comment.position != CommentPosition::Foot {
            return false;
        }
        if let Some(node) = collection {
            self.foot.push((node, comment.text.clone()));
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comment(text: &str, position: CommentPosition) -> Comment {
        Comment {
            text: text.to_owned(),
            position,
            mark: Mark::default(),
        }
    }

    #[test]
    fn head_comments_migrate_to_the_following_node() {
        let mut plugin = HistoricalCommentPlugin::new();
        plugin.on_event(&comment("explains the next field", CommentPosition::Head));
        let node = NodeId::new(0);
        plugin.on_node_created(node, &comment("", CommentPosition::Head));
        assert_eq!(plugin.head_comments(), &[(node, "explains the next field".to_owned())]);
    }

    #[test]
    fn line_comments_attach_to_the_current_node() {
        let mut plugin = HistoricalCommentPlugin::new();
        let node = NodeId::new(0);
        plugin.on_node_created(node, &comment("trailing note", CommentPosition::Line));
        assert_eq!(plugin.line_comments(), &[(node, "trailing note".to_owned())]);
    }

    #[test]
    fn foot_comments_attach_to_the_preceding_collection() {
        let mut plugin = HistoricalCommentPlugin::new();
        let collection = NodeId::new(0);
        plugin.at_collection_end(Some(collection), &comment("end note", CommentPosition::Foot));
        assert_eq!(plugin.foot_comments(), &[(collection, "end note".to_owned())]);
    }
}
