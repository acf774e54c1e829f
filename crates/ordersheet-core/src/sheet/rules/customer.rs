//! Customer field extraction from the body of a customer line.
//!
//! Fields are peeled off in a fixed order, each step consuming only what it
//! recognizes:
//!
//! 1. quantity override `(+10 box)`
//! 2. free-text note, checked lines only
//! 3. "ok" acknowledgement cleanup
//! 4. name / phone split
//!
//! Quantity must run before note extraction: `(+10 box)` is itself a
//! parenthetical and would otherwise be taken for a note.

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::identity::customer_key;
use super::marker::ClassifiedLine;
use super::patterns::{
    OK_BEFORE_PAREN, PAREN_GLUED_OK, PAREN_GROUP, PAREN_THEN_OK, QUANTITY_OVERRIDE,
    QUANTITY_SHAPE, TRAILING_OK, TRAILING_PAREN, WHITESPACE_RUN,
};
use super::phone::{normalize_phone_display, PhoneExtractor};
use super::FieldExtractor;
use crate::models::sheet::{Customer, Purchase};

/// Fields parsed from one customer line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerEntry {
    /// Whether the line was marked `- [x]`.
    pub checked: bool,
    /// Display name.
    pub name: String,
    /// Display phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Ordered quantity, 1 unless overridden.
    pub quantity: u32,
    /// Note with its parentheses. Only extracted for checked lines.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl CustomerEntry {
    pub fn identity_key(&self) -> String {
        customer_key(&self.name, self.phone.as_deref())
    }

    /// Registry record for this customer.
    pub fn to_customer(&self) -> Customer {
        Customer::new(self.identity_key(), self.name.clone(), self.phone.clone())
    }

    /// Purchase record for the current item.
    pub fn to_purchase(&self) -> Purchase {
        Purchase::new(self.identity_key(), self.quantity, self.note.clone())
    }
}

/// Customer field extractor.
pub struct CustomerFieldExtractor {
    phones: PhoneExtractor,
}

impl CustomerFieldExtractor {
    pub fn new() -> Self {
        Self {
            phones: PhoneExtractor::new(),
        }
    }

    /// Extract customer fields from a classified line.
    pub fn extract(&self, line: &ClassifiedLine<'_>) -> CustomerEntry {
        self.extract_body(line.body, line.is_checked())
    }

    /// Extract customer fields from marker-free body text.
    pub fn extract_body(&self, body: &str, checked: bool) -> CustomerEntry {
        let (quantity, text) = extract_quantity(body);

        let (note, text) = if checked {
            extract_note(&text)
        } else {
            (None, text)
        };

        let text = strip_acknowledgement(&text);
        let (name, phone) = self.split_name_phone(&text);

        CustomerEntry {
            checked,
            name,
            phone: phone.map(|p| normalize_phone_display(&p)),
            quantity: quantity.unwrap_or(1),
            note,
        }
    }

    /// Split text at the rightmost phone candidate.
    ///
    /// Returns the trimmed name and the raw phone token, if any.
    pub fn split_name_phone(&self, text: &str) -> (String, Option<String>) {
        match self.phones.extract(text) {
            Some(phone) => (
                text[..phone.start].trim().to_string(),
                Some(phone.value.trim().to_string()),
            ),
            None => (text.trim().to_string(), None),
        }
    }
}

impl Default for CustomerFieldExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Find a `(+N unit)` quantity override and remove every such token.
///
/// A count too large for `u32` saturates. A zero count is not an override,
/// but the token is still removed so it can never be read as a note.
pub fn extract_quantity(text: &str) -> (Option<u32>, String) {
    let Some(caps) = QUANTITY_OVERRIDE.captures(text) else {
        return (None, text.trim().to_string());
    };

    // The pattern only captures ASCII digits, so a parse failure is overflow.
    let count = caps[1].parse::<u32>().unwrap_or(u32::MAX);
    let quantity = Some(count).filter(|q| *q > 0);
    if quantity.is_none() {
        trace!("Zero quantity override '{}' ignored", &caps[0]);
    }
    let cleaned = QUANTITY_OVERRIDE.replace_all(text, "");

    (quantity, collapse_whitespace(&cleaned))
}

/// Take the rightmost parenthetical that is not quantity-shaped as the note.
pub fn extract_note(text: &str) -> (Option<String>, String) {
    let groups: Vec<_> = PAREN_GROUP.captures_iter(text).collect();

    for caps in groups.iter().rev() {
        let content = caps[1].trim();
        if content.is_empty() || QUANTITY_SHAPE.is_match(content) {
            continue;
        }

        let Some(whole) = caps.get(0) else {
            continue;
        };
        let cleaned = format!(
            "{} {}",
            text[..whole.start()].trim(),
            text[whole.end()..].trim()
        );
        return (Some(format!("({})", content)), collapse_whitespace(&cleaned));
    }

    (None, text.to_string())
}

/// Strip the "ok" acknowledgement convention and any leftover trailing
/// parenthetical.
pub fn strip_acknowledgement(text: &str) -> String {
    let rules: [(&Regex, &str); 5] = [
        // "Name ok (x)" -> "Name (x)"
        (&*OK_BEFORE_PAREN, " ("),
        // "Name (x) ok" -> "Name"
        (&*PAREN_THEN_OK, ""),
        // "Name (x)ok" -> "Name"
        (&*PAREN_GLUED_OK, ""),
        // "Name (x)" -> "Name"
        (&*TRAILING_PAREN, ""),
        // "Name ok" -> "Name"
        (&*TRAILING_OK, ""),
    ];

    rules
        .iter()
        .fold(collapse_whitespace(text), |acc, (pattern, replacement)| {
            collapse_whitespace(&pattern.replace_all(&acc, *replacement))
        })
}

fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text.trim(), " ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::rules::marker::classify_line;
    use pretty_assertions::assert_eq;

    fn extract(line: &str) -> CustomerEntry {
        CustomerFieldExtractor::new().extract(&classify_line(line))
    }

    #[test]
    fn test_checked_with_international_phone() {
        let entry = extract("- [x] Alice +62 811-2222-3333");
        assert_eq!(
            entry,
            CustomerEntry {
                checked: true,
                name: "Alice".to_string(),
                phone: Some("+62 811-2222-3333".to_string()),
                quantity: 1,
                note: None,
            }
        );
    }

    #[test]
    fn test_quantity_and_note() {
        let entry = extract("- [x] Carol (+3 box) 0813-4444-5555 (urgent)");
        assert_eq!(entry.name, "Carol");
        assert_eq!(entry.phone.as_deref(), Some("+62 813-4444-5555"));
        assert_eq!(entry.quantity, 3);
        assert_eq!(entry.note.as_deref(), Some("(urgent)"));
    }

    #[test]
    fn test_quantity_is_never_a_note() {
        let entry = extract("- [x] Dodi (+10 box)");
        assert_eq!(entry.quantity, 10);
        assert_eq!(entry.note, None);
        assert_eq!(entry.name, "Dodi");

        let entry = extract("- [x] Dodi (+ 11 pack) (merah)");
        assert_eq!(entry.quantity, 11);
        assert_eq!(entry.note.as_deref(), Some("(merah)"));
    }

    #[test]
    fn test_rightmost_note_wins() {
        let (note, rest) = extract_note("Eva (biru) 0812-1111-2222 (kirim besok)");
        assert_eq!(note.as_deref(), Some("(kirim besok)"));
        assert_eq!(rest, "Eva (biru) 0812-1111-2222");
    }

    #[test]
    fn test_unchecked_has_no_note() {
        let entry = extract("- [ ] Bob 0812-1111-2222 (nanti)");
        assert!(!entry.checked);
        assert_eq!(entry.note, None);
        assert_eq!(entry.name, "Bob");
        assert_eq!(entry.phone.as_deref(), Some("+62 812-1111-2222"));
    }

    #[test]
    fn test_unchecked_still_parses_quantity() {
        let entry = extract("1. Fajar (+2 pcs) 081234567890");
        assert!(!entry.checked);
        assert_eq!(entry.quantity, 2);
        assert_eq!(entry.phone.as_deref(), Some("+62 812-3456-7890"));
    }

    #[test]
    fn test_zero_quantity_defaults_to_one() {
        let (quantity, rest) = extract_quantity("Gita (+0 box)");
        assert_eq!(quantity, None);
        assert_eq!(rest, "Gita");
        assert_eq!(extract("- [x] Gita (+0 box)").quantity, 1);
    }

    #[test]
    fn test_oversized_quantity_saturates() {
        let (quantity, rest) = extract_quantity("Hana (+99999999999 box)");
        assert_eq!(quantity, Some(u32::MAX));
        assert_eq!(rest, "Hana");

        let entry = extract("- [x] Hana (+99999999999 box) 0812-1111-2222");
        assert_eq!(entry.quantity, u32::MAX);
        assert_eq!(entry.note, None);
    }

    #[test]
    fn test_acknowledgement_cleanup() {
        assert_eq!(strip_acknowledgement("Hadi ok"), "Hadi");
        assert_eq!(strip_acknowledgement("Hadi OK"), "Hadi");
        assert_eq!(strip_acknowledgement("Hadi (lunas) ok"), "Hadi");
        assert_eq!(strip_acknowledgement("Hadi (lunas)ok"), "Hadi");
        assert_eq!(strip_acknowledgement("Hadi ok (lunas)"), "Hadi");
        assert_eq!(strip_acknowledgement("Hadi  Wijaya   0812"), "Hadi Wijaya 0812");
        assert_eq!(strip_acknowledgement("Okta"), "Okta");
    }

    #[test]
    fn test_ok_around_phone() {
        let entry = extract("- [x] Indah 0812-3456-7890 ok");
        assert_eq!(entry.name, "Indah");
        assert_eq!(entry.phone.as_deref(), Some("+62 812-3456-7890"));
    }

    #[test]
    fn test_no_phone() {
        let entry = extract("- [x] Joko");
        assert_eq!(entry.name, "Joko");
        assert_eq!(entry.phone, None);
        assert_eq!(entry.identity_key(), "NO_PHONE_joko");
    }

    #[test]
    fn test_to_purchase_and_customer() {
        let entry = extract("- [x] Kiki (+2 box) +62 812-3456-7890 (pink)");
        let customer = entry.to_customer();
        let purchase = entry.to_purchase();

        assert_eq!(customer.key, "081234567890_kiki");
        assert_eq!(customer.name, "Kiki");
        assert_eq!(purchase.customer_key, customer.key);
        assert_eq!(purchase.quantity, 2);
        assert_eq!(purchase.notes.as_deref(), Some("(pink)"));
    }
}
