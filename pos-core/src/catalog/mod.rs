//! Menu Catalog
//!
//! Immutable menu supplied once at startup. No write path.

mod category;

pub use category::{CATEGORY_ORDER, category_priority, compare_categories};

use crate::utils::validation::{MAX_NAME_LEN, MAX_PRICE, MAX_SHORT_TEXT_LEN, validate_required_text};
use serde::Serialize;
use shared::error::{AppError, ErrorCode};
use shared::models::MenuItem;
use shared::order::DispatchType;
use std::collections::{HashMap, HashSet};

/// Category with item count (menu sidebar)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    pub name: String,
    pub count: usize,
}

/// Immutable menu catalog
#[derive(Debug, Clone, Default)]
pub struct MenuCatalog {
    items: Vec<MenuItem>,
    by_id: HashMap<String, usize>,
}

impl MenuCatalog {
    pub fn new(items: Vec<MenuItem>) -> Self {
        let by_id = items
            .iter()
            .enumerate()
            .map(|(idx, item)| (item.id.clone(), idx))
            .collect();
        Self { items, by_id }
    }

    /// Load from a JSON array of menu items
    pub fn from_json(json: &str) -> Result<Self, AppError> {
        let items: Vec<MenuItem> = serde_json::from_str(json).map_err(|e| {
            AppError::with_message(ErrorCode::InvalidRequest, format!("Invalid menu JSON: {e}"))
        })?;
        let mut seen = HashSet::new();
        for item in &items {
            validate_item(item)?;
            if !seen.insert(item.id.as_str()) {
                return Err(AppError::with_message(
                    ErrorCode::ValidationFailed,
                    format!("Duplicate menu item id {}", item.id),
                )
                .with_detail("item_id", item.id.clone()));
            }
        }
        tracing::info!(items = items.len(), "Menu catalog loaded");
        Ok(Self::new(items))
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&MenuItem> {
        self.by_id.get(id).map(|&idx| &self.items[idx])
    }

    /// Stock ceiling for an item id (None = unlimited or unknown)
    pub fn stock_of(&self, id: &str) -> Option<i32> {
        self.get(id).and_then(|item| item.stock)
    }

    pub fn find_by_barcode(&self, barcode: &str) -> Option<&MenuItem> {
        let code = barcode.trim();
        if code.is_empty() {
            return None;
        }
        self.items
            .iter()
            .find(|item| item.barcode.as_deref() == Some(code))
    }

    /// Items sellable for a dispatch type
    pub fn available_for(&self, dispatch_type: DispatchType) -> impl Iterator<Item = &MenuItem> {
        self.items
            .iter()
            .filter(move |item| item.is_available_for(dispatch_type))
    }

    /// Categories sellable for a dispatch type, in course order, with counts
    pub fn categories_for(&self, dispatch_type: DispatchType) -> Vec<CategorySummary> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for item in self.available_for(dispatch_type) {
            *counts.entry(item.category.as_str()).or_default() += 1;
        }
        let mut categories: Vec<CategorySummary> = counts
            .into_iter()
            .map(|(name, count)| CategorySummary {
                name: name.to_string(),
                count,
            })
            .collect();
        categories.sort_by(|a, b| compare_categories(&a.name, &b.name));
        categories
    }

    /// Case-insensitive name match or barcode substring match
    pub fn search(&self, dispatch_type: DispatchType, query: &str) -> Vec<&MenuItem> {
        let needle = query.trim().to_lowercase();
        self.available_for(dispatch_type)
            .filter(|item| {
                needle.is_empty()
                    || item.name.to_lowercase().contains(&needle)
                    || item
                        .barcode
                        .as_deref()
                        .is_some_and(|b| b.contains(query.trim()))
            })
            .collect()
    }
}

fn out_of_range(item: &MenuItem, message: String) -> AppError {
    AppError::with_message(ErrorCode::ValueOutOfRange, message).with_detail("item_id", item.id.clone())
}

fn validate_item(item: &MenuItem) -> Result<(), AppError> {
    validate_required_text(&item.id, "id", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&item.name, "name", MAX_NAME_LEN)?;
    if !item.price.is_finite() || item.price < 0.0 || item.price > MAX_PRICE {
        return Err(out_of_range(item, format!("Invalid price {} for {}", item.price, item.name)));
    }
    if let Some(stock) = item.stock
        && stock < 0
    {
        return Err(out_of_range(item, format!("Invalid stock {} for {}", stock, item.name)));
    }
    // Deltas may be negative (discounted options) but stay within the price bound
    for modifier in item.modifier_groups.iter().flat_map(|g| &g.modifiers) {
        if !modifier.price_delta.is_finite() || modifier.price_delta.abs() > MAX_PRICE {
            return Err(out_of_range(
                item,
                format!(
                    "Invalid price delta {} for modifier {}",
                    modifier.price_delta, modifier.id
                ),
            ));
        }
    }
    Ok(())
}
