//! Order price calculator
//!
//! ```text
//! unit      = effective price (override or catalog) + Σ modifier deltas
//! line      = unit × quantity
//! subtotal  = Σ line            (sent and unsent lines alike)
//! tax       = subtotal × rate   (rounded to cents)
//! total     = max(0, subtotal + tax − discount)
//! ```

use super::money::{round_money, to_decimal, to_f64};
use crate::core::Config;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::order::OrderItem;

/// Default flat tax rate
pub const DEFAULT_TAX_RATE: f64 = Config::DEFAULT_TAX_RATE;

/// Computed order totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub subtotal: f64,
    pub tax: f64,
    pub discount: f64,
    pub total: f64,
}

/// Per-unit price including modifier deltas
///
/// Saturates instead of overflowing; `price` is called on every cart change.
pub fn unit_price(item: &OrderItem) -> Decimal {
    item.selected_modifiers
        .iter()
        .map(|m| to_decimal(m.price_delta))
        .fold(to_decimal(item.effective_unit_price()), Decimal::saturating_add)
}

/// Line total: unit price × quantity
pub fn line_total(item: &OrderItem) -> Decimal {
    unit_price(item).saturating_mul(Decimal::from(item.quantity))
}

/// Price a list of line items
///
/// Pure and idempotent: identical input always yields identical output.
pub fn price(items: &[OrderItem], discount: f64, tax_rate: f64) -> PriceBreakdown {
    let subtotal = round_money(
        items
            .iter()
            .map(line_total)
            .fold(Decimal::ZERO, Decimal::saturating_add),
    );
    let tax = round_money(subtotal.saturating_mul(to_decimal(tax_rate)));
    let discount_dec = to_decimal(discount);
    let total = subtotal
        .saturating_add(tax)
        .saturating_sub(discount_dec)
        .max(Decimal::ZERO);

    PriceBreakdown {
        subtotal: to_f64(subtotal),
        tax: to_f64(tax),
        discount: to_f64(discount_dec),
        total: to_f64(total),
    }
}

/// Price with the default 8% tax rate
pub fn price_default(items: &[OrderItem], discount: f64) -> PriceBreakdown {
    price(items, discount, DEFAULT_TAX_RATE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::order::{PriceOverride, SelectedModifier};

    fn line(price: f64, quantity: i32) -> OrderItem {
        OrderItem {
            line_id: "l1".to_string(),
            item_id: "1".to_string(),
            name: "Item".to_string(),
            category: "Pizza".to_string(),
            allergens: vec![],
            price,
            quantity,
            selected_modifiers: vec![],
            notes: None,
            seat: 1,
            is_sent_to_kitchen: false,
            price_override: None,
        }
    }

    fn modifier(id: &str, delta: f64) -> SelectedModifier {
        SelectedModifier {
            group_id: "g".to_string(),
            id: id.to_string(),
            name: id.to_string(),
            price_delta: delta,
        }
    }

    #[test]
    fn test_margherita_times_two() {
        let items = vec![line(12.99, 2)];
        let totals = price_default(&items, 0.0);
        assert_eq!(totals.subtotal, 25.98);
        assert_eq!(totals.tax, 2.08);
        assert_eq!(totals.total, 28.06);
    }

    #[test]
    fn test_deterministic() {
        let mut item = line(9.99, 3);
        item.selected_modifiers = vec![modifier("cheese", 1.25), modifier("bacon", 0.75)];
        let items = vec![item, line(2.5, 1)];
        let a = price(&items, 3.0, 0.08);
        let b = price(&items, 3.0, 0.08);
        assert_eq!(a, b);
    }

    #[test]
    fn test_total_never_negative() {
        // subtotal 10.00, tax 0.80, discount 50 → 0.00
        let items = vec![line(10.0, 1)];
        let totals = price_default(&items, 50.0);
        assert_eq!(totals.subtotal, 10.0);
        assert_eq!(totals.tax, 0.8);
        assert_eq!(totals.discount, 50.0);
        assert_eq!(totals.total, 0.0);
    }

    #[test]
    fn test_modifiers_multiply_by_quantity() {
        let mut item = line(10.0, 3);
        item.selected_modifiers = vec![modifier("large", 2.0)];
        let totals = price(&[item], 0.0, 0.0);
        assert_eq!(totals.subtotal, 36.0);
        assert_eq!(totals.total, 36.0);
    }

    #[test]
    fn test_negative_modifier_delta() {
        let mut item = line(10.0, 1);
        item.selected_modifiers = vec![modifier("no-cheese", -1.5)];
        let totals = price(&[item], 0.0, 0.0);
        assert_eq!(totals.subtotal, 8.5);
    }

    #[test]
    fn test_override_replaces_catalog_price() {
        let mut item = line(12.99, 1);
        item.price_override = Some(PriceOverride {
            override_price: 9.99,
            original_price: 12.99,
            reason: "Manager comp".to_string(),
        });
        item.selected_modifiers = vec![modifier("extra", 1.0)];
        let totals = price(&[item], 0.0, 0.0);
        assert_eq!(totals.subtotal, 10.99);
    }

    #[test]
    fn test_sent_and_unsent_lines_both_count() {
        let mut sent = line(5.0, 1);
        sent.is_sent_to_kitchen = true;
        let totals = price(&[sent, line(5.0, 1)], 0.0, 0.0);
        assert_eq!(totals.subtotal, 10.0);
    }

    #[test]
    fn test_empty_cart() {
        let totals = price_default(&[], 0.0);
        assert_eq!(totals, PriceBreakdown::default());
    }

    #[test]
    fn test_huge_modifier_saturates() {
        let mut item = line(9.99, 9999);
        item.selected_modifiers = vec![modifier("gold", 1e25)];
        let totals = price(&[item.clone(), item], 0.0, 0.08);
        assert!(totals.subtotal.is_finite());
        assert!(totals.total >= totals.subtotal);
    }
}
