//! Short Code Minting
//!
//! Generates the public report identifiers: `MR-<base36 millis>-<rand4>`,
//! e.g. `MR-MB3K2Z9F-7QXT`. The millisecond timestamp makes codes sortable
//! by creation time; the random suffix covers two codes minted in the same
//! millisecond. Collisions are astronomically unlikely but the store still
//! reports them as `DuplicateShortCode` rather than crashing.

use chrono::Utc;
use rand::Rng;

const BASE36: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const SUFFIX_LEN: usize = 4;

/// Mint a new short code.
pub fn mint_short_code() -> String {
    let millis = Utc::now().timestamp_millis().max(0) as u64;
    format!("MR-{}-{}", to_base36(millis), random_suffix())
}

fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE36[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).expect("base36 digits are ASCII")
}

fn random_suffix() -> String {
    let mut rng = rand::thread_rng();
    (0..SUFFIX_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_code_shape() {
        let code = mint_short_code();
        let parts: Vec<&str> = code.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "MR");
        assert!(!parts[1].is_empty());
        assert_eq!(parts[2].len(), SUFFIX_LEN);
        assert!(code
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '-'));
    }

    #[test]
    fn test_base36_encoding() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "Z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(46655), "ZZZ");
    }

    #[test]
    fn test_codes_are_distinct() {
        let codes: std::collections::HashSet<String> =
            (0..16).map(|_| mint_short_code()).collect();
        assert_eq!(codes.len(), 16);
    }
}
