// Copyright notice and licensing information.
// These lines indicate the copyright of the software and its licensing terms.
// SPDX-License-Identifier: Apache-2.0 OR MIT indicates dual licensing under Apache 2.0 or MIT licenses.
// Copyright © 2024 Serde YML, Seamless YAML Serialization for Rust. All rights reserved.

//! Implicit-tag inference for plain scalars: the core schema's
//! null/bool/int/float forms, used by the [`super::composer`] when
//! tagging loaded scalars and by the representer when deciding whether
//! an emitted scalar needs an explicit tag to round-trip.

use crate::de::parse_f64;
use crate::libyaml::{BOOL_TAG, FLOAT_TAG, INT_TAG, NULL_TAG, STR_TAG, TIMESTAMP_TAG};

/// Infers the core-schema tag a plain scalar would implicitly receive.
///
/// Quoted scalars are never implicitly resolved away from `!!str`, so
/// callers should pass `plain = false` for any non-plain style.
pub fn resolve_scalar_tag(value: &str, plain: bool) -> &'static str {
    if !plain {
        return STR_TAG;
    }
    if is_null(value) {
        NULL_TAG
    } else if is_bool(value).is_some() {
        BOOL_TAG
    } else if is_int(value) {
        INT_TAG
    } else if parse_f64(value).is_some() {
        FLOAT_TAG
    } else if is_timestamp(value) {
        TIMESTAMP_TAG
    } else {
        STR_TAG
    }
}

/// Whether `value` is one of the core schema's spellings of `null`.
pub fn is_null(value: &str) -> bool {
    matches!(value, "null" | "Null" | "NULL" | "~" | "")
}

/// Whether `value` is one of the core schema's spellings of a bool,
/// and if so which one.
pub fn is_bool(value: &str) -> Option<bool> {
    match value {
        "true" | "True" | "TRUE" => Some(true),
        "false" | "False" | "FALSE" => Some(false),
        _ => None,
    }
}

/// Whether `value` matches one of the core schema's integer forms:
/// decimal (`[-+]?[0-9_]+`), binary (`0b[01_]+`), octal (`0o[0-7_]+`
/// preferred, bare `0[0-7_]+` tolerated for compatibility), or
/// hexadecimal (`0x[0-9a-fA-F_]+`). Digit separators (`_`) are accepted
/// in every form, and the decimal form places no restriction on
/// leading zeros.
pub fn is_int(value: &str) -> bool {
    let unsigned = value
        .strip_prefix(['+', '-'])
        .unwrap_or(value);
    if unsigned.is_empty() {
        return false;
    }
    if let Some(rest) = unsigned.strip_prefix("0x") {
        return !rest.is_empty()
            && rest.bytes().all(|b| b.is_ascii_hexdigit() || b == b'_');
    }
    if let Some(rest) = unsigned.strip_prefix("0o") {
        return !rest.is_empty()
            && rest.bytes().all(|b| (b'0'..=b'7').contains(&b) || b == b'_');
    }
    if let Some(rest) = unsigned.strip_prefix("0b") {
        return !rest.is_empty()
            && rest.bytes().all(|b| b == b'0' || b == b'1' || b == b'_');
    }
    unsigned.bytes().all(|b| b.is_ascii_digit() || b == b'_')
        && unsigned.bytes().any(|b| b.is_ascii_digit())
}

/// Whether `value` is an ISO-8601-shaped timestamp: a bare date
/// (`YYYY-MM-DD`), an RFC3339 timestamp with optional fractional
/// seconds and zone offset, or the same with a space in place of the
/// `T` separator.
pub fn is_timestamp(value: &str) -> bool {
    fn all_digits(s: &[u8]) -> bool {
        !s.is_empty() && s.iter().all(u8::is_ascii_digit)
    }

    let bytes = value.as_bytes();
    if bytes.len() < 10
        || !all_digits(&bytes[0..4])
        || bytes[4] != b'-'
        || !all_digits(&bytes[5..7])
        || bytes[7] != b'-'
        || !all_digits(&bytes[8..10])
    {
        return false;
    }
    if value.len() == 10 {
        return true;
    }
    let rest = &value[10..];
    let rest = rest
        .strip_prefix('T')
        .or_else(|| rest.strip_prefix('t'))
        .or_else(|| rest.strip_prefix(' '));
    let Some(rest) = rest else {
        return false;
    };
    let rest = rest.trim_start_matches(' ');
    let time = rest.as_bytes();
    if time.len() < 8
        || !all_digits(&time[0..2])
        || time[2] != b':'
        || !all_digits(&time[3..5])
        || time[5] != b':'
        || !all_digits(&time[6..8])
    {
        return false;
    }
    let mut tail = &rest[8..];
    if let Some(frac) = tail.strip_prefix('.') {
        let digit_len = frac.bytes().take_while(u8::is_ascii_digit).count();
        if digit_len == 0 {
            return false;
        }
        tail = &frac[digit_len..];
    }
    if tail.is_empty() || tail.eq_ignore_ascii_case("z") {
        return true;
    }
    let tail = tail.trim_start_matches(' ');
    let offset = tail.as_bytes();
    offset.len() == 6
        && (offset[0] == b'+' || offset[0] == b'-')
        && all_digits(&offset[1..3])
        && offset[3] == b':'
        && all_digits(&offset[4..6])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_null_forms() {
        for value in ["null", "Null", "NULL", "~", ""] {
            assert_eq!(resolve_scalar_tag(value, true), NULL_TAG);
        }
    }

    #[test]
    fn resolves_bool_forms() {
        assert_eq!(resolve_scalar_tag("true", true), BOOL_TAG);
        assert_eq!(resolve_scalar_tag("False", true), BOOL_TAG);
    }

    #[test]
    fn resolves_int_forms() {
        assert_eq!(resolve_scalar_tag("42", true), INT_TAG);
        assert_eq!(resolve_scalar_tag("-0x1F", true), INT_TAG);
        assert_eq!(resolve_scalar_tag("0o17", true), INT_TAG);
    }

    #[test]
    fn resolves_float_forms() {
        assert_eq!(resolve_scalar_tag("3.14", true), FLOAT_TAG);
        assert_eq!(resolve_scalar_tag(".inf", true), FLOAT_TAG);
    }

    #[test]
    fn leading_zero_digits_resolve_as_int_per_the_decimal_form() {
        // The core schema's decimal regex ([-+]?[0-9_]+) has no leading-zero
        // restriction, and bare octal (0[0-7_]+) is tolerated too.
        assert_eq!(resolve_scalar_tag("007", true), INT_TAG);
        assert_eq!(resolve_scalar_tag("0009", true), INT_TAG);
    }

    #[test]
    fn digit_separators_are_accepted_in_every_numeric_form() {
        assert_eq!(resolve_scalar_tag("1_000_000", true), INT_TAG);
        assert_eq!(resolve_scalar_tag("0x1_F", true), INT_TAG);
        assert_eq!(resolve_scalar_tag("0o1_7", true), INT_TAG);
        assert_eq!(resolve_scalar_tag("0b1_01", true), INT_TAG);
    }

    #[test]
    fn resolves_timestamp_forms() {
        assert_eq!(resolve_scalar_tag("2024-01-02", true), TIMESTAMP_TAG);
        assert_eq!(
            resolve_scalar_tag("2024-01-02T03:04:05Z", true),
            TIMESTAMP_TAG
        );
        assert_eq!(
            resolve_scalar_tag("2024-01-02T03:04:05.123+02:00", true),
            TIMESTAMP_TAG
        );
        assert_eq!(
            resolve_scalar_tag("2024-01-02 03:04:05", true),
            TIMESTAMP_TAG
        );
    }

    #[test]
    fn quoted_scalars_never_resolve_away_from_str() {
        assert_eq!(resolve_scalar_tag("true", false), STR_TAG);
        assert_eq!(resolve_scalar_tag("42", false), STR_TAG);
    }

    #[test]
    fn anything_else_is_a_string() {
        assert_eq!(resolve_scalar_tag("hello world", true), STR_TAG);
    }
}
