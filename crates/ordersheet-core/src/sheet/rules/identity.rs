//! Customer identity keys.

use super::phone::normalize_phone_comparison;

/// Key prefix for customers without a phone number.
pub const NO_PHONE_KEY_PREFIX: &str = "NO_PHONE_";

/// Derive the deduplication key for a customer.
///
/// With a phone, the key is the comparison form of the phone plus the
/// lowercased name. Without one, the lowercased name alone decides, so two
/// phone-less customers written with the same name are the same customer.
pub fn customer_key(name: &str, phone: Option<&str>) -> String {
    let name = name.trim().to_lowercase();
    let phone = phone.map(normalize_phone_comparison).unwrap_or_default();

    if phone.is_empty() {
        format!("{}{}", NO_PHONE_KEY_PREFIX, name)
    } else {
        format!("{}_{}", phone, name)
    }
}
