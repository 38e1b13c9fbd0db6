//! Recall-and-append merge
//!
//! Lines are matched by `line_id`:
//! - sent lines of the order are kept as they are (frozen)
//! - unsent order lines take the cart's version
//! - unsent order lines missing from the cart were removed by the operator
//! - cart lines unknown to the order are appended

use shared::order::OrderItem;
use std::collections::HashMap;

/// Merge result
#[derive(Debug, Clone, PartialEq)]
pub struct Merged {
    pub items: Vec<OrderItem>,
    pub appended: usize,
    pub dropped: usize,
}

pub fn merge_lines(existing: &[OrderItem], cart: Vec<OrderItem>) -> Merged {
    let existing_ids: HashMap<&str, bool> = existing
        .iter()
        .map(|l| (l.line_id.as_str(), l.is_sent_to_kitchen))
        .collect();

    let mut from_cart: HashMap<String, OrderItem> = HashMap::new();
    let mut appended_lines = Vec::new();
    for line in cart {
        if existing_ids.contains_key(line.line_id.as_str()) {
            from_cart.insert(line.line_id.clone(), line);
        } else {
            appended_lines.push(line);
        }
    }

    let mut items = Vec::with_capacity(existing.len() + appended_lines.len());
    let mut dropped = 0;
    for line in existing {
        if line.is_sent_to_kitchen {
            items.push(line.clone());
        } else if let Some(updated) = from_cart.remove(&line.line_id) {
            items.push(updated);
        } else {
            dropped += 1;
        }
    }

    let appended = appended_lines.len();
    items.extend(appended_lines);
    Merged {
        items,
        appended,
        dropped,
    }
}
