//! Common regex patterns for order sheet extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Price patterns, in priority order
    pub static ref PRICE_MILLION: Regex = Regex::new(
        r"(?i)(\d+[,.]?\d*)\s*jt\b"
    ).unwrap();

    pub static ref PRICE_THOUSAND: Regex = Regex::new(
        r"(?i)(\d+[,.]?\d*)\s*rb\b"
    ).unwrap();

    pub static ref PRICE_GROUPED: Regex = Regex::new(
        r"(\d{1,3}(?:\.\d{3})+(?:,\d+)?)"
    ).unwrap();

    // Separately spaced parenthetical at the end of an item name
    pub static ref ITEM_TRAILING_NOTE: Regex = Regex::new(
        r"\s+\([^)]*\)\s*$"
    ).unwrap();

    // Leading ordinal marker ("1. Name")
    pub static ref ORDINAL_MARKER: Regex = Regex::new(
        r"^\d+\.\s*"
    ).unwrap();

    // Quantity override: (+10 box), (+ 11 pack), (+2)
    pub static ref QUANTITY_OVERRIDE: Regex = Regex::new(
        r"(?i)\(\+\s*(\d+)\s*\w*\)"
    ).unwrap();

    // Content shape reserved for quantity overrides
    pub static ref QUANTITY_SHAPE: Regex = Regex::new(
        r"^\+\s*\d+"
    ).unwrap();

    // Any non-empty parenthetical group
    pub static ref PAREN_GROUP: Regex = Regex::new(
        r"\(([^)]+)\)"
    ).unwrap();

    // Acknowledgement cleanup, applied in this order
    pub static ref OK_BEFORE_PAREN: Regex = Regex::new(
        r"(?i)\s+ok\s*\("
    ).unwrap();

    pub static ref PAREN_THEN_OK: Regex = Regex::new(
        r"(?i)\s*\([^)]*\)\s*ok\s*$"
    ).unwrap();

    pub static ref PAREN_GLUED_OK: Regex = Regex::new(
        r"(?i)\s*\([^)]*\)ok\s*$"
    ).unwrap();

    pub static ref TRAILING_PAREN: Regex = Regex::new(
        r"\s*\([^)]*\)\s*$"
    ).unwrap();

    pub static ref TRAILING_OK: Regex = Regex::new(
        r"(?i)\s+ok\s*$"
    ).unwrap();

    pub static ref WHITESPACE_RUN: Regex = Regex::new(
        r"\s+"
    ).unwrap();

    // Indonesian phone shapes. Every pattern captures the number in group 1.
    pub static ref PHONE_PATTERNS: Vec<Regex> = [
        // +62 812-3456-7890 (3-4-4)
        r"(\+62\s+\d{3}-\d{4}-\d{4})",
        // +62 812-3456-789 (3-4-3)
        r"(\+62\s+\d{3}-\d{4}-\d{3})",
        // +62 812-345-678 (3-3-3)
        r"(\+62\s+\d{3}-\d{3}-\d{3})",
        // +62 81-1234-5678 (2-4-4)
        r"(\+62\s+\d{2}-\d{4}-\d{4})",
        // +62 812 3456 7890
        r"(\+62\s+\d{3}\s+\d{4}\s+\d{4})",
        // +62 81 1234 5678
        r"(\+62\s+\d{2}\s+\d{4}\s+\d{4})",
        // +62 with separated groups
        r"(\+62\s+\d{2,3}[-.\s]\d{3,4}[-.\s]\d{3,4}(?:[-.\s]\d{3,4})?)",
        // +62 general
        r"(\+62\s*\d{2,3}[-.\s]?\d{3,4}[-.\s]?\d{3,4}(?:[-.\s]?\d{3,4})?)",
        // 0812-3456-7890, 0812 3456 7890, 0812.3456.789
        r"(0\d{2,3}[-.\s]?\d{3,4}[-.\s]?\d{3,4}(?:[-.\s]?\d{3,4})?)",
        // 081234567890 followed by whitespace or end of line
        r"(0\d{10,12})(?:\s|$)",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).unwrap())
    .collect();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_patterns_compile() {
        assert_eq!(PHONE_PATTERNS.len(), 10);
    }

    #[test]
    fn test_quantity_shape() {
        assert!(QUANTITY_SHAPE.is_match("+10 box"));
        assert!(QUANTITY_SHAPE.is_match("+ 3"));
        assert!(!QUANTITY_SHAPE.is_match("urgent"));
        assert!(!QUANTITY_SHAPE.is_match("red +2"));
    }
}
