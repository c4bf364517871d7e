// Copyright notice and licensing information.
// These lines indicate the copyright of the software and its licensing terms.
// SPDX-License-Identifier: Apache-2.0 OR MIT indicates dual licensing under Apache 2.0 or MIT licenses.
// Copyright © 2024 Serde YML, Seamless YAML Serialization for Rust. All rights reserved.

#[cfg(test)]
mod tests {
    use serde_yml::comment::{Comment, CommentPlugin, CommentPosition, HistoricalCommentPlugin};
    use serde_yml::libyaml::error::Mark;
    use serde_yml::libyaml::tag::Tag;
    use serde_yml::libyaml::ScalarStyle;
    use serde_yml::node::{Document, Node, NodeData, NodeId};

    fn comment(text: &str, position: CommentPosition) -> Comment {
        Comment {
            text: text.to_owned(),
            position,
            mark: Mark::default(),
        }
    }

    fn some_node_id(document: &mut Document) -> NodeId {
        document.push(Node::new(
            NodeData::Scalar {
                tag: Tag::new(serde_yml::libyaml::STR_TAG),
                value: "x".to_owned(),
                style: ScalarStyle::Plain,
            },
            Mark::default(),
        ))
    }

    #[test]
    fn a_head_comment_migrates_to_the_node_that_follows_it() {
        let mut document = Document::new();
        let node = some_node_id(&mut document);
        let mut plugin = HistoricalCommentPlugin::new();
        plugin.on_event(&comment("describes the field below", CommentPosition::Head));
        let attached = plugin.on_node_created(node, &comment("", CommentPosition::Head));
        assert!(attached);
        assert_eq!(
            plugin.head_comments(),
            &[(node, "describes the field below".to_owned())]
        );
    }

    #[test]
    fn a_line_comment_stays_with_its_own_node() {
        let mut document = Document::new();
        let node = some_node_id(&mut document);
        let mut plugin = HistoricalCommentPlugin::new();
        plugin.on_node_created(node, &comment("inline note", CommentPosition::Line));
        assert_eq!(plugin.line_comments(), &[(node, "inline note".to_owned())]);
    }

    #[test]
    fn a_foot_comment_attaches_to_the_collection_it_closes() {
        let mut document = Document::new();
        let collection = some_node_id(&mut document);
        let mut plugin = HistoricalCommentPlugin::new();
        let attached =
            plugin.at_collection_end(Some(collection), &comment("trailer", CommentPosition::Foot));
        assert!(attached);
        assert_eq!(plugin.foot_comments(), &[(collection, "trailer".to_owned())]);
    }

    #[test]
    fn a_foot_comment_with_no_enclosing_collection_is_left_to_default_handling() {
        let mut plugin = HistoricalCommentPlugin::new();
        let attached = plugin.at_collection_end(None, &comment("trailer", CommentPosition::Foot));
        assert!(!attached);
    }

    #[test]
    fn the_default_plugin_methods_decline_every_hook() {
        struct Noop;
        impl CommentPlugin for Noop {}

        let mut document = Document::new();
        let a = some_node_id(&mut document);
        let b = some_node_id(&mut document);
        let c = some_node_id(&mut document);

        let mut plugin = Noop;
        assert!(!plugin.on_event(&comment("x", CommentPosition::Head)));
        assert!(!plugin.on_node_created(a, &comment("x", CommentPosition::Line)));
        assert!(!plugin.after_mapping_pair(a, b, c));
        assert!(!plugin.at_collection_end(None, &comment("x", CommentPosition::Foot)));
    }
}
