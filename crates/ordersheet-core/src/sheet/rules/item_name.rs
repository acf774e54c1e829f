//! Canonical item names from item lines.

use super::patterns::ITEM_TRAILING_NOTE;
use super::price::{PriceExtractor, PriceMatch};
use super::{ExtractionMatch, FieldExtractor};

/// Produce the canonical name of an item line.
///
/// The detected price token is removed first, then a separately spaced
/// parenthetical that followed the price is dropped as a remark. Parentheses
/// glued to a word (`Towel(red)`) or written before the price stay part of
/// the name.
pub fn sanitize_item_name(line: &str) -> String {
    let line = line.trim();
    match PriceExtractor::new().extract(line) {
        Some(price) => {
            let (name, price_at) = strip_price(line, &price);
            remove_item_note(&name, price_at)
        }
        None => line.to_string(),
    }
}

/// Remove the matched price token and the whitespace before it.
///
/// Returns the joined text and the byte offset where the post-price
/// remainder begins in it.
pub fn strip_price(line: &str, price: &ExtractionMatch<PriceMatch>) -> (String, usize) {
    let before = line[..price.start].trim_end();
    let after = &line[price.end..];

    let joined = format!("{}{}", before, after);
    let trimmed = joined.trim_start();
    let offset = before.len().saturating_sub(joined.len() - trimmed.len());

    (trimmed.trim_end().to_string(), offset)
}

/// Drop a trailing ` (remark)` if it starts at or after `from`.
///
/// `from` is the offset where the text after the price began, so only a
/// remark written after the price is dropped. A spaced parenthetical before
/// the price is part of the product name: `Towel (red) 109rb` is the item
/// `Towel (red)`, while `Towel 125rb (note)` is `Towel`.
pub fn remove_item_note(name: &str, from: usize) -> String {
    match ITEM_TRAILING_NOTE.find(name) {
        Some(m) if m.start() >= from => name[..m.start()].trim().to_string(),
        _ => name.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn price_of(line: &str) -> ExtractionMatch<PriceMatch> {
        PriceExtractor::new().extract(line).unwrap()
    }

    #[test]
    fn test_strip_price_only() {
        let line = "Towel (red) 109rb";
        let (name, _) = strip_price(line, &price_of(line));
        assert_eq!(name, "Towel (red)");
    }

    #[test]
    fn test_plain_name() {
        assert_eq!(sanitize_item_name("Box of crackers 150rb"), "Box of crackers");
        assert_eq!(
            sanitize_item_name("Product name isi 40 pcs 439rb"),
            "Product name isi 40 pcs"
        );
        assert_eq!(sanitize_item_name("Rice cooker 1.989.000"), "Rice cooker");
        assert_eq!(sanitize_item_name("Kulkas 2 pintu 3,4jt"), "Kulkas 2 pintu");
    }

    #[test]
    fn test_note_after_price_dropped() {
        assert_eq!(sanitize_item_name("Towel 125rb (note)"), "Towel");
        assert_eq!(sanitize_item_name("Towel 125rb (PO 2 minggu)  "), "Towel");
    }

    #[test]
    fn test_parenthetical_before_price_kept() {
        assert_eq!(sanitize_item_name("Towel (red) 109rb"), "Towel (red)");
        assert_eq!(sanitize_item_name("Towel(red) 109rb"), "Towel(red)");
        assert_eq!(
            sanitize_item_name("Tas coklat (kulit) 350rb"),
            "Tas coklat (kulit)"
        );
    }

    #[test]
    fn test_glued_note_after_price_kept() {
        assert_eq!(sanitize_item_name("Towel 125rb(note)"), "Towel(note)");
    }

    #[test]
    fn test_price_first() {
        assert_eq!(sanitize_item_name("150rb Sendal jepit (grosir)"), "Sendal jepit");
    }

    #[test]
    fn test_middle_parenthetical_kept() {
        assert_eq!(
            sanitize_item_name("Tas (kulit) coklat 350rb"),
            "Tas (kulit) coklat"
        );
    }
}
