//! Aggregations over a parsed order sheet.
//!
//! These produce plain data for billing and sales reports. Rankings are
//! stable: ties keep the order in which entries first appeared.

use std::collections::HashMap;

use serde::Serialize;

use crate::models::sheet::{Customer, OrderSheet};

/// One line on a customer's bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BillingLine {
    /// Item name with the purchase note appended.
    pub label: String,
    pub quantity: u64,
    pub unit_price: u64,
    pub subtotal: u64,
}

/// Everything one customer owes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerBill {
    pub customer: Customer,
    /// Lines sorted by label.
    pub lines: Vec<BillingLine>,
    pub total: u64,
}

/// Total spend of one customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerSpend {
    pub customer: Customer,
    pub total: u64,
}

/// Units sold of one item name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemQuantity {
    pub name: String,
    pub quantity: u64,
}

/// Revenue of one item name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemRevenue {
    pub name: String,
    pub quantity: u64,
    pub unit_price: u64,
    pub revenue: u64,
}

/// Sheet-wide revenue figures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RevenueSummary {
    pub total_revenue: u64,
    /// Distinct item names with at least one unit sold.
    pub items_sold: usize,
    pub total_quantity: u64,
    /// Customers in the registry.
    pub total_customers: usize,
    /// Per-item revenue, highest first.
    pub items: Vec<ItemRevenue>,
}

/// Build one bill per customer, sorted by name ignoring case.
///
/// Purchases of the same item with the same note are merged into one line.
pub fn billing(sheet: &OrderSheet) -> Vec<CustomerBill> {
    let mut lines_by_customer: HashMap<&str, Vec<BillingLine>> = HashMap::new();

    for item in &sheet.items {
        for purchase in &item.purchases {
            let label = purchase.label(item);
            let lines = lines_by_customer
                .entry(purchase.customer_key.as_str())
                .or_default();

            match lines
                .iter_mut()
                .find(|l| l.label == label && l.unit_price == item.price)
            {
                Some(line) => {
                    line.quantity += u64::from(purchase.quantity);
                    line.subtotal = line.subtotal.saturating_add(purchase.subtotal(item.price));
                }
                None => lines.push(BillingLine {
                    label,
                    quantity: u64::from(purchase.quantity),
                    unit_price: item.price,
                    subtotal: purchase.subtotal(item.price),
                }),
            }
        }
    }

    sheet
        .customers
        .sorted_by_name()
        .into_iter()
        .filter_map(|customer| {
            let mut lines = lines_by_customer.remove(customer.key.as_str())?;
            lines.sort_by(|a, b| a.label.cmp(&b.label));
            let total = lines
                .iter()
                .map(|l| l.subtotal)
                .fold(0u64, u64::saturating_add);
            Some(CustomerBill {
                customer: customer.clone(),
                lines,
                total,
            })
        })
        .collect()
}

/// Customers ranked by total spend, highest first.
pub fn top_spenders(sheet: &OrderSheet, limit: usize) -> Vec<CustomerSpend> {
    let mut order: Vec<&str> = Vec::new();
    let mut totals: HashMap<&str, u64> = HashMap::new();

    for item in &sheet.items {
        for purchase in &item.purchases {
            let key = purchase.customer_key.as_str();
            let total = totals.entry(key).or_insert_with(|| {
                order.push(key);
                0
            });
            *total = total.saturating_add(purchase.subtotal(item.price));
        }
    }

    let mut ranked: Vec<CustomerSpend> = order
        .into_iter()
        .filter_map(|key| {
            let customer = sheet.customers.get(key)?.clone();
            Some(CustomerSpend {
                customer,
                total: totals[key],
            })
        })
        .collect();

    ranked.sort_by(|a, b| b.total.cmp(&a.total));
    ranked.truncate(limit);
    ranked
}

/// Item names ranked by units sold, highest first.
pub fn top_items(sheet: &OrderSheet, limit: usize) -> Vec<ItemQuantity> {
    let mut ranked: Vec<ItemQuantity> = Vec::new();

    for item in &sheet.items {
        let quantity = item.total_quantity();
        if quantity == 0 {
            continue;
        }
        match ranked.iter_mut().find(|r| r.name == item.name) {
            Some(entry) => entry.quantity += quantity,
            None => ranked.push(ItemQuantity {
                name: item.name.clone(),
                quantity,
            }),
        }
    }

    ranked.sort_by(|a, b| b.quantity.cmp(&a.quantity));
    ranked.truncate(limit);
    ranked
}

/// Revenue totals and a per-item breakdown.
///
/// Items sharing a name are reported together at the first listed price.
pub fn revenue(sheet: &OrderSheet) -> RevenueSummary {
    let mut items: Vec<ItemRevenue> = Vec::new();

    for item in &sheet.items {
        let quantity = item.total_quantity();
        if quantity == 0 {
            continue;
        }
        let item_revenue = item.revenue();
        match items.iter_mut().find(|r| r.name == item.name) {
            Some(entry) => {
                entry.quantity += quantity;
                entry.revenue = entry.revenue.saturating_add(item_revenue);
            }
            None => items.push(ItemRevenue {
                name: item.name.clone(),
                quantity,
                unit_price: item.price,
                revenue: item_revenue,
            }),
        }
    }

    items.sort_by(|a, b| b.revenue.cmp(&a.revenue));

    RevenueSummary {
        total_revenue: items.iter().map(|i| i.revenue).fold(0u64, u64::saturating_add),
        items_sold: items.len(),
        total_quantity: items.iter().map(|i| i.quantity).sum(),
        total_customers: sheet.customers.len(),
        items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::{OrderSheetParser, SheetParser};
    use pretty_assertions::assert_eq;

    const SHEET: &str = "Teh melati 20rb
- [x] Ani 0812-1111-2222
- [x] Budi (+3 pcs) 0813-2222-3333
- [x] Ani 0812-1111-2222 (tawar)
Kopi bubuk 35rb
- [x] budi (+2 pcs) 0813-2222-3333
- [ ] Citra 0814-3333-4444
Gula 1 kg 15rb
- [x] Dewi
Teh melati 20rb
- [x] Ani 0812-1111-2222
";

    fn sheet() -> OrderSheet {
        SheetParser::new().parse(SHEET).sheet
    }

    #[test]
    fn test_billing_merges_and_sorts() {
        let bills = billing(&sheet());
        let names: Vec<&str> = bills.iter().map(|b| b.customer.name.as_str()).collect();
        assert_eq!(names, vec!["Ani", "Budi", "Dewi"]);

        let ani = &bills[0];
        assert_eq!(
            ani.lines,
            vec![
                BillingLine {
                    label: "Teh melati".to_string(),
                    quantity: 2,
                    unit_price: 20_000,
                    subtotal: 40_000,
                },
                BillingLine {
                    label: "Teh melati (tawar)".to_string(),
                    quantity: 1,
                    unit_price: 20_000,
                    subtotal: 20_000,
                },
            ]
        );
        assert_eq!(ani.total, 60_000);

        let budi = &bills[1];
        assert_eq!(budi.total, 3 * 20_000 + 2 * 35_000);
    }

    #[test]
    fn test_top_spenders() {
        let ranked = top_spenders(&sheet(), 2);
        let totals: Vec<(&str, u64)> = ranked
            .iter()
            .map(|s| (s.customer.name.as_str(), s.total))
            .collect();
        assert_eq!(totals, vec![("Budi", 130_000), ("Ani", 60_000)]);
    }

    #[test]
    fn test_top_items() {
        let ranked = top_items(&sheet(), 5);
        assert_eq!(
            ranked,
            vec![
                ItemQuantity { name: "Teh melati".into(), quantity: 6 },
                ItemQuantity { name: "Kopi bubuk".into(), quantity: 2 },
                ItemQuantity { name: "Gula 1 kg".into(), quantity: 1 },
            ]
        );
    }

    #[test]
    fn test_revenue() {
        let summary = revenue(&sheet());
        assert_eq!(summary.total_revenue, 6 * 20_000 + 2 * 35_000 + 15_000);
        assert_eq!(summary.items_sold, 3);
        assert_eq!(summary.total_quantity, 9);
        assert_eq!(summary.total_customers, 3);
        assert_eq!(summary.items[0].name, "Teh melati");
        assert_eq!(summary.items[0].revenue, 120_000);
    }

    #[test]
    fn test_empty_sheet() {
        let empty = OrderSheet::new();
        assert!(billing(&empty).is_empty());
        assert!(top_spenders(&empty, 5).is_empty());
        assert!(top_items(&empty, 5).is_empty());
        assert_eq!(revenue(&empty), RevenueSummary::default());
    }
}
