// Copyright notice and licensing information.
// These lines indicate the copyright of the software and its licensing terms.
// SPDX-License-Identifier: Apache-2.0 OR MIT indicates dual licensing under Apache 2.0 or MIT licenses.
// Copyright © 2024 Serde YML, Seamless YAML Serialization for Rust. All rights reserved.

#[cfg(test)]
mod tests {
    use serde_yml::options::{LineBreak, Options, QuotePreference};

    #[test]
    fn default_options_match_the_v2_preset() {
        let default = Options::default();
        let v2 = Options::v2();
        assert_eq!(format!("{:?}", default), format!("{:?}", v2));
    }

    #[test]
    fn presets_compose_with_individual_overrides_left_to_right() {
        let opts = Options::v3().indent(2).canonical(true);
        assert_eq!(format!("{:?}", opts.clone().indent(2)), format!("{:?}", opts));
    }

    #[test]
    fn out_of_range_indent_is_clamped_not_rejected() {
        let opts = Options::default().indent(1);
        assert!(format!("{:?}", opts).contains("indent: 2"));
        let opts = Options::default().indent(100);
        assert!(format!("{:?}", opts).contains("indent: 9"));
    }

    #[test]
    fn line_break_and_quote_preference_are_independently_settable() {
        let opts = Options::default()
            .line_break(LineBreak::CrLf)
            .quote_preference(QuotePreference::Single);
        let debug = format!("{:?}", opts);
        assert!(debug.contains("CrLf"));
        assert!(debug.contains("Single"));
    }

    #[test]
    fn the_default_amplification_envelope_tightens_toward_the_ceiling() {
        assert!(Options::default_aliasing_restriction(10, 1_000));
        assert!(!Options::default_aliasing_restriction(4_000_000, 4_000_000));
    }

    #[test]
    fn a_custom_amplification_fn_is_honored() {
        let opts = Options::default().aliasing_restriction_fn(|aliases, _total| aliases < 3);
        assert!(opts.allows_amplification(2, 10_000_000));
        assert!(!opts.allows_amplification(3, 10_000_000));
    }
}
