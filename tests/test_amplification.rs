// Copyright notice and licensing information.
// These lines indicate the copyright of the software and its licensing terms.
// SPDX-License-Identifier: Apache-2.0 OR MIT indicates dual licensing under Apache 2.0 or MIT licenses.
// Copyright © 2024 Serde YML, Seamless YAML Serialization for Rust. All rights reserved.

#[cfg(test)]
mod tests {
    use serde_yml::options::Options;
    use serde_yml::Value;

    /// A "billion laughs"-style document: each layer aliases the previous
    /// one several times, so the fully expanded tree grows exponentially
    /// with the layer count even though the source text stays tiny.
    fn billion_laughs(layers: usize, fan_out: usize) -> String {
        let mut yaml = String::new();
        yaml.push_str("a0: &a0 [x, x]\n");
        for layer in 1..layers {
            let prev = layer - 1;
            yaml.push_str(&format!("a{layer}: &a{layer} ["));
            for i in 0..fan_out {
                if i > 0 {
                    yaml.push_str(", ");
                }
                yaml.push_str(&format!("*a{prev}"));
            }
            yaml.push_str("]\n");
        }
        yaml
    }

    #[test]
    fn a_deeply_amplifying_alias_tree_is_rejected_rather_than_exhausting_memory() {
        let yaml = billion_laughs(20, 6);
        let result: Result<Value, _> = serde_yml::from_str(&yaml);
        assert!(result.is_err());
    }

    #[test]
    fn a_modestly_aliased_document_still_loads_successfully() {
        let yaml = "a: &x 1\nb: *x\nc: *x\n";
        let value: Value = serde_yml::from_str(yaml).unwrap();
        assert_eq!(value.get("b").unwrap().as_i64(), Some(1));
        assert_eq!(value.get("c").unwrap().as_i64(), Some(1));
    }

    #[test]
    fn the_default_envelope_is_tolerant_at_small_scale_and_strict_at_the_ceiling() {
        assert!(Options::default_aliasing_restriction(3, 100));
        assert!(!Options::default_aliasing_restriction(4_000_000, 4_000_000));
    }

    #[test]
    fn the_envelope_tightens_monotonically_between_the_tolerant_and_strict_bounds() {
        let ratio_allowed_at = |total: usize| {
            // Largest alias_count still accepted at this total, found by
            // the same linear-interpolation rule `default_aliasing_restriction`
            // applies between the 400_000 and 4_000_000 bounds.
            (0..=total)
                .rev()
                .find(|&aliases| Options::default_aliasing_restriction(aliases, total))
                .unwrap_or(0)
        };
        let early = ratio_allowed_at(500_000);
        let late = ratio_allowed_at(3_500_000);
        assert!(late <= early, "allowance should not loosen as total grows");
    }
}
