// Copyright notice and licensing information.
// These lines indicate the copyright of the software and its licensing terms.
// SPDX-License-Identifier: Apache-2.0 OR MIT indicates dual licensing under Apache 2.0 or MIT licenses.
// Copyright © 2024 Serde YML, Seamless YAML Serialization for Rust. All rights reserved.

#[cfg(test)]
mod tests {
    use serde_yml::Value;

    fn merged(yaml: &str) -> Value {
        // Merge keys are expanded automatically while the `Value` is
        // being constructed, not as a manual post-processing step.
        serde_yml::from_str(yaml).unwrap()
    }

    #[test]
    fn a_single_merge_key_splices_in_the_aliased_mapping() {
        let value = merged("center: &CENTER {x: 1, y: 2}\nobj:\n  <<: *CENTER\n  r: 10\n");
        let obj = value.get("obj").unwrap();
        assert_eq!(obj.get("x").unwrap().as_i64(), Some(1));
        assert_eq!(obj.get("y").unwrap().as_i64(), Some(2));
        assert_eq!(obj.get("r").unwrap().as_i64(), Some(10));
    }

    #[test]
    fn a_sequence_of_merge_sources_is_merged_in_order() {
        let value = merged(
            "center: &CENTER {x: 1, y: 2}\n\
             big: &BIG {r: 10}\n\
             obj:\n  <<: [*CENTER, *BIG]\n  label: disc\n",
        );
        let obj = value.get("obj").unwrap();
        assert_eq!(obj.get("x").unwrap().as_i64(), Some(1));
        assert_eq!(obj.get("y").unwrap().as_i64(), Some(2));
        assert_eq!(obj.get("r").unwrap().as_i64(), Some(10));
        assert_eq!(obj.get("label").unwrap().as_str(), Some("disc"));
    }

    #[test]
    fn an_explicit_key_on_the_mapping_wins_over_the_merged_value() {
        let value = merged("center: &CENTER {x: 1, y: 2}\nobj:\n  <<: *CENTER\n  x: 99\n");
        let obj = value.get("obj").unwrap();
        assert_eq!(obj.get("x").unwrap().as_i64(), Some(99));
        assert_eq!(obj.get("y").unwrap().as_i64(), Some(2));
    }

    #[test]
    fn a_scalar_merge_source_is_rejected() {
        let result: Result<Value, _> = serde_yml::from_str("obj:\n  <<: 1\n  r: 10\n");
        assert!(result.is_err());
    }

    #[test]
    fn merge_expansion_recurses_into_nested_mappings() {
        let value = merged(
            "center: &CENTER {x: 1, y: 2}\n\
             outer:\n  inner:\n    <<: *CENTER\n    z: 3\n",
        );
        let inner = value.get("outer").unwrap().get("inner").unwrap();
        assert_eq!(inner.get("x").unwrap().as_i64(), Some(1));
        assert_eq!(inner.get("z").unwrap().as_i64(), Some(3));
    }
}
