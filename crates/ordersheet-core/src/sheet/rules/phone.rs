//! Indonesian phone number detection and normalization.
//!
//! Two independent normal forms exist. The display form is what a bill
//! shows (`+62 812-3456-7890`); the comparison form (`081234567890`) is used
//! only to build customer identity keys.

use super::patterns::PHONE_PATTERNS;
use super::{ExtractionMatch, FieldExtractor};

/// Country prefix used for display.
pub const COUNTRY_PREFIX: &str = "+62";

/// Phone number extractor.
///
/// Every phone shape is searched; the candidate ending furthest to the right
/// wins, since names occasionally contain digit runs of their own.
pub struct PhoneExtractor;

impl PhoneExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PhoneExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for PhoneExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        // `>=` so that on equal ends the later candidate wins.
        self.extract_all(text)
            .into_iter()
            .reduce(|best, candidate| if candidate.end >= best.end { candidate } else { best })
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results = Vec::new();

        for pattern in PHONE_PATTERNS.iter() {
            for caps in pattern.captures_iter(text) {
                if let Some(number) = caps.get(1) {
                    results.push(ExtractionMatch::from_regex(number.as_str().to_string(), number));
                }
            }
        }

        results
    }
}

/// Render a phone token for display.
///
/// Local numbers (`0812...`) with 10 to 12 digits are rewritten as
/// `+62 XXX-XXXX-...`. Anything else, including numbers already written with
/// `+62`, is kept as written.
pub fn normalize_phone_display(raw: &str) -> String {
    let raw = raw.trim();
    if !raw.starts_with('0') {
        return raw.to_string();
    }

    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() < 10 {
        return raw.to_string();
    }

    let national = &digits[1..];
    match national.len() {
        9..=11 => format!(
            "{} {}-{}-{}",
            COUNTRY_PREFIX,
            &national[0..3],
            &national[3..7],
            &national[7..]
        ),
        _ => raw.to_string(),
    }
}

/// Reduce a phone token to a canonical local form for identity comparison.
///
/// Keeps digits and `+`, rewrites a leading `+62` or `62` to `0`, and makes
/// sure the result starts with `0`. Blank input yields an empty string.
pub fn normalize_phone_comparison(raw: &str) -> String {
    if raw.trim().is_empty() {
        return String::new();
    }

    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect();

    let local = if let Some(rest) = cleaned.strip_prefix("+62") {
        format!("0{}", rest)
    } else if let Some(rest) = cleaned.strip_prefix("62") {
        format!("0{}", rest)
    } else {
        cleaned
    };

    if local.starts_with('0') {
        local
    } else {
        format!("0{}", local)
    }
}
