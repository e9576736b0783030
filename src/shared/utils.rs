//! Utility functions and helpers

/// Decode a hex-encoded label into UTF-8 text.
///
/// On-chain domain labels arrive as hex-encoded byte strings. This is a
/// best-effort convenience decoder, not a validating one: malformed hex or
/// invalid UTF-8 returns the input unchanged.
pub fn decode_hex_label(raw: &str) -> String {
    match hex::decode(raw) {
        Ok(bytes) => match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(_) => raw.to_string(),
        },
        Err(_) => raw.to_string(),
    }
}

/// Percentage change of `current` relative to `previous`, rounded to one
/// decimal place.
///
/// A zero baseline has no meaningful rate: returns `Some(100.0)` when there
/// is new activity and `None` when both windows are empty.
pub fn pct_change(current: u64, previous: u64) -> Option<f64> {
    if previous == 0 {
        if current > 0 {
            return Some(100.0);
        }
        return None;
    }
    let delta = current as f64 - previous as f64;
    Some((delta / previous as f64 * 1000.0).round() / 10.0)
}

/// Convert mutez (1e-6 tez) to whole tez.
pub fn mutez_to_tez(mutez: u64) -> f64 {
    mutez as f64 / 1_000_000.0
}

/// Round to two decimal places for display output.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// True if the string consists solely of hex digit characters.
pub fn looks_like_hex(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_hex_label() {
        assert_eq!(decode_hex_label("74657374"), "test");
        assert_eq!(decode_hex_label("616c696365"), "alice");
    }

    #[test]
    fn test_decode_hex_label_malformed_is_identity() {
        // Non-hex input comes back unchanged, and decoding is idempotent
        assert_eq!(decode_hex_label("not-hex!"), "not-hex!");
        assert_eq!(decode_hex_label("abc"), "abc"); // odd length
        assert_eq!(decode_hex_label(""), "");
        // Valid hex but invalid UTF-8
        assert_eq!(decode_hex_label("ff"), "ff");
    }

    #[test]
    fn test_pct_change() {
        assert_eq!(pct_change(5, 4), Some(25.0));
        assert_eq!(pct_change(3, 4), Some(-25.0));
        assert_eq!(pct_change(1, 3), Some(-66.7)); // rounded to one decimal
        assert_eq!(pct_change(10, 10), Some(0.0));
    }

    #[test]
    fn test_pct_change_zero_baseline() {
        assert_eq!(pct_change(0, 0), None);
        assert_eq!(pct_change(7, 0), Some(100.0));
    }

    #[test]
    fn test_mutez_to_tez() {
        assert_eq!(mutez_to_tez(1_000_000), 1.0);
        assert_eq!(mutez_to_tez(2_500_000), 2.5);
        assert_eq!(mutez_to_tez(0), 0.0);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(1.005), 1.01);
        assert_eq!(round2(3.14159), 3.14);
    }

    #[test]
    fn test_looks_like_hex() {
        assert!(looks_like_hex("74657374"));
        assert!(looks_like_hex("DEADbeef"));
        assert!(!looks_like_hex("alice.tez"));
        assert!(!looks_like_hex(""));
    }
}
