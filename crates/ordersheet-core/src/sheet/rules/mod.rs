//! Rule-based field extractors for order sheet lines.

pub mod customer;
pub mod identity;
pub mod item_name;
pub mod marker;
pub mod patterns;
pub mod phone;
pub mod price;
pub mod unicode;

pub use customer::{CustomerEntry, CustomerFieldExtractor};
pub use identity::{customer_key, NO_PHONE_KEY_PREFIX};
pub use item_name::{remove_item_note, sanitize_item_name, strip_price};
pub use marker::{classify_line, ClassifiedLine, LineMarker};
pub use phone::{normalize_phone_comparison, normalize_phone_display, PhoneExtractor};
pub use price::{extract_price, PriceExtractor, PriceMatch, PriceNotation};
pub use unicode::normalize_unicode;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the winning occurrence of the field.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract every candidate occurrence, in evaluation order.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// A value extracted from a span of the source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Byte offset where the matched token starts.
    pub start: usize,
    /// Byte offset one past the end of the matched token.
    pub end: usize,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, start: usize, end: usize, source: impl Into<String>) -> Self {
        Self {
            value,
            start,
            end,
            source: source.into(),
        }
    }

    /// Build a match from a regex match, keeping its span and text.
    pub fn from_regex(value: T, m: regex::Match<'_>) -> Self {
        Self::new(value, m.start(), m.end(), m.as_str())
    }
}
