//! Price extraction for item lines.
//!
//! Three notations are recognized, tried strictly in priority order:
//! `3,4jt` (millions), `195rb` (thousands) and grouped long numbers such as
//! `1.989.000`. The first family whose pattern is found and whose numeral
//! converts cleanly wins, even if a later family would also match.

use std::str::FromStr;

use regex::Regex;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::patterns::{PRICE_GROUPED, PRICE_MILLION, PRICE_THOUSAND};
use super::{ExtractionMatch, FieldExtractor};

/// Notation family a price was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceNotation {
    /// `<number>jt`, multiplied by 1,000,000.
    Million,
    /// `<number>rb`, multiplied by 1,000.
    Thousand,
    /// `1.989.000` with `.` grouping thousands and `,` as decimal separator.
    Grouped,
}

impl PriceNotation {
    /// Evaluation order. Later families are more permissive.
    pub const PRIORITY: [PriceNotation; 3] = [Self::Million, Self::Thousand, Self::Grouped];

    /// Pattern recognizing this notation; group 1 holds the numeral.
    pub fn pattern(self) -> &'static Regex {
        match self {
            Self::Million => &*PRICE_MILLION,
            Self::Thousand => &*PRICE_THOUSAND,
            Self::Grouped => &*PRICE_GROUPED,
        }
    }

    /// Convert the captured numeral to an integer amount, truncating any
    /// fraction. Returns `None` when the numeral does not convert.
    pub fn interpret(self, numeral: &str) -> Option<u64> {
        let (normalized, multiplier) = match self {
            Self::Million => (suffix_numeral(numeral), Decimal::from(1_000_000u32)),
            Self::Thousand => (suffix_numeral(numeral), Decimal::from(1_000u32)),
            Self::Grouped => (numeral.replace('.', "").replace(',', "."), Decimal::ONE),
        };

        let value = Decimal::from_str(&normalized).ok()?;
        value.checked_mul(multiplier)?.trunc().to_u64()
    }
}

/// `3,4` and `3.4` both mean three point four; a dangling separator is dropped.
fn suffix_numeral(numeral: &str) -> String {
    numeral.replace(',', ".").trim_end_matches('.').to_string()
}

/// A detected price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceMatch {
    /// Amount in the smallest currency unit.
    pub amount: u64,
    /// Notation family that produced the amount.
    pub notation: PriceNotation,
}

/// Price field extractor.
pub struct PriceExtractor;

impl PriceExtractor {
    pub fn new() -> Self {
        Self
    }

    fn extract_notation(
        &self,
        notation: PriceNotation,
        text: &str,
    ) -> Option<ExtractionMatch<PriceMatch>> {
        let caps = notation.pattern().captures(text)?;
        let full_match = caps.get(0)?;

        match notation.interpret(&caps[1]) {
            Some(amount) => Some(ExtractionMatch::from_regex(
                PriceMatch { amount, notation },
                full_match,
            )),
            None => {
                trace!("Rejected {:?} numeral '{}'", notation, &caps[1]);
                None
            }
        }
    }
}

impl Default for PriceExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for PriceExtractor {
    type Output = ExtractionMatch<PriceMatch>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        PriceNotation::PRIORITY
            .into_iter()
            .find_map(|notation| self.extract_notation(notation, text))
    }

    /// One candidate per notation family that matches, in priority order.
    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        PriceNotation::PRIORITY
            .into_iter()
            .filter_map(|notation| self.extract_notation(notation, text))
            .collect()
    }
}

/// Extract a price amount from text.
pub fn extract_price(text: &str) -> Option<u64> {
    PriceExtractor::new().extract(text).map(|m| m.value.amount)
}
