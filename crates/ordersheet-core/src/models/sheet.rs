//! Order sheet data models: items, purchases and customer identities.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A complete parsed order sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSheet {
    /// Items in order of first appearance.
    pub items: Vec<Item>,

    /// Every checked customer, keyed by identity key.
    pub customers: CustomerRegistry,
}

/// A sellable product entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Canonical name with the price token and trailing note removed.
    pub name: String,

    /// Unit price in the smallest currency unit.
    pub price: u64,

    /// Confirmed orders, in document order.
    pub purchases: Vec<Purchase>,
}

/// One customer's recorded order of an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Purchase {
    /// Identity key of the ordering customer in the registry.
    pub customer_key: String,

    /// Ordered quantity (at least 1).
    pub quantity: u32,

    /// Free-text note with its parentheses, e.g. `"(urgent)"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A customer identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Deduplication key derived from name and phone.
    pub key: String,

    /// Display name, original casing preserved.
    pub name: String,

    /// Display phone number (`+62 XXX-XXXX-XXXX`), if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Mapping from identity key to customer.
///
/// The first record stored under a key wins; later upserts are no-ops.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerRegistry {
    customers: BTreeMap<String, Customer>,
}

impl Item {
    /// Create an item with no purchases yet.
    pub fn new(name: impl Into<String>, price: u64) -> Self {
        Self {
            name: name.into(),
            price,
            purchases: Vec::new(),
        }
    }

    /// Total units ordered across all purchases.
    pub fn total_quantity(&self) -> u64 {
        self.purchases.iter().map(|p| u64::from(p.quantity)).sum()
    }

    /// Total revenue for this item.
    pub fn revenue(&self) -> u64 {
        self.purchases
            .iter()
            .map(|p| p.subtotal(self.price))
            .fold(0u64, u64::saturating_add)
    }
}

impl Purchase {
    pub fn new(customer_key: impl Into<String>, quantity: u32, notes: Option<String>) -> Self {
        Self {
            customer_key: customer_key.into(),
            quantity,
            notes,
        }
    }

    /// Item name with this purchase's note appended, as shown on a bill.
    pub fn label(&self, item: &Item) -> String {
        match &self.notes {
            Some(notes) => format!("{} {}", item.name, notes),
            None => item.name.clone(),
        }
    }

    /// Price times quantity.
    pub fn subtotal(&self, unit_price: u64) -> u64 {
        unit_price.saturating_mul(u64::from(self.quantity))
    }
}

impl Customer {
    pub fn new(key: impl Into<String>, name: impl Into<String>, phone: Option<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            phone,
        }
    }
}

impl CustomerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a customer unless its key is already present.
    ///
    /// Returns `true` if the record was inserted.
    pub fn upsert(&mut self, customer: Customer) -> bool {
        if self.customers.contains_key(&customer.key) {
            return false;
        }
        self.customers.insert(customer.key.clone(), customer);
        true
    }

    pub fn get(&self, key: &str) -> Option<&Customer> {
        self.customers.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.customers.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Customer> {
        self.customers.values()
    }

    /// Customers sorted case-insensitively by display name.
    pub fn sorted_by_name(&self) -> Vec<&Customer> {
        let mut customers: Vec<&Customer> = self.customers.values().collect();
        customers.sort_by_key(|c| c.name.to_lowercase());
        customers
    }
}

impl OrderSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of purchases across all items.
    pub fn purchase_count(&self) -> usize {
        self.items.iter().map(|i| i.purchases.len()).sum()
    }

    /// Total revenue across all items.
    pub fn total_revenue(&self) -> u64 {
        self.items
            .iter()
            .map(Item::revenue)
            .fold(0u64, u64::saturating_add)
    }

    /// Check model invariants and return any issues found.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        for item in &self.items {
            for purchase in &item.purchases {
                if !self.customers.contains(&purchase.customer_key) {
                    issues.push(format!(
                        "Purchase of '{}' references unknown customer '{}'",
                        item.name, purchase.customer_key
                    ));
                }
                if purchase.quantity == 0 {
                    issues.push(format!("Purchase of '{}' has zero quantity", item.name));
                }
            }
        }

        issues
    }
}
