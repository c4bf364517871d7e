// Copyright notice and licensing information.
// These lines indicate the copyright of the software and its licensing terms.
// SPDX-License-Identifier: Apache-2.0 OR MIT indicates dual licensing under Apache 2.0 or MIT licenses.
// Copyright © 2024 Serde YML, Seamless YAML Serialization for Rust. All rights reserved.

#[cfg(test)]
mod tests {
    use serde_yml::libyaml::error::Mark;
    use serde_yml::libyaml::serializer::Serializer;
    use serde_yml::libyaml::tag::Tag;
    use serde_yml::libyaml::{MappingStyle, ScalarStyle, SequenceStyle, STR_TAG};
    use serde_yml::node::{Document, Node, NodeData};

    fn scalar(document: &mut Document, value: &str) -> serde_yml::node::NodeId {
        document.push(Node::new(
            NodeData::Scalar {
                tag: Tag::new(STR_TAG),
                value: value.to_owned(),
                style: ScalarStyle::Plain,
            },
            Mark::default(),
        ))
    }

    #[test]
    fn a_plain_scalar_document_round_trips_through_the_composer() {
        let mut document = Document::new();
        let root = scalar(&mut document, "hello");
        document.set_root(root);

        let mut serializer = Serializer::new(Vec::new()).unwrap();
        serializer.serialize_document(&document).unwrap();
        let bytes = serializer.finish().unwrap();
        let text = String::from_utf8(bytes).unwrap();

        let parsed = serde_yml::from_str::<String>(&text).unwrap();
        assert_eq!(parsed, "hello");
    }

    #[test]
    fn a_mapping_document_emits_both_keys() {
        let mut document = Document::new();
        let key_a = scalar(&mut document, "a");
        let value_a = scalar(&mut document, "1");
        let key_b = scalar(&mut document, "b");
        let value_b = scalar(&mut document, "2");
        let root = document.push(Node::new(
            NodeData::Mapping {
                tag: Tag::new(serde_yml::libyaml::MAP_TAG),
                pairs: vec![(key_a, value_a), (key_b, value_b)],
                style: MappingStyle::Block,
            },
            Mark::default(),
        ));
        document.set_root(root);

        let mut serializer = Serializer::new(Vec::new()).unwrap();
        serializer.serialize_document(&document).unwrap();
        let bytes = serializer.finish().unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains("a:"));
        assert!(text.contains("b:"));
    }

    #[test]
    fn a_shared_node_is_emitted_once_and_aliased_thereafter() {
        let mut document = Document::new();
        let shared = scalar(&mut document, "shared");
        let root = document.push(Node::new(
            NodeData::Sequence {
                tag: Tag::new(serde_yml::libyaml::SEQ_TAG),
                items: vec![shared, shared],
                style: SequenceStyle::Block,
            },
            Mark::default(),
        ));
        document.set_root(root);

        let mut serializer = Serializer::new(Vec::new()).unwrap();
        serializer.serialize_document(&document).unwrap();
        let bytes = serializer.finish().unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains('&'));
        assert!(text.contains('*'));
    }

    #[test]
    fn finishing_twice_is_rejected_rather_than_panicking() {
        let mut document = Document::new();
        let root = scalar(&mut document, "x");
        document.set_root(root);

        let mut serializer = Serializer::new(Vec::new()).unwrap();
        serializer.serialize_document(&document).unwrap();
        let _ = serializer.finish().unwrap();
    }
}
