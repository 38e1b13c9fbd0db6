//! Menu Model

use crate::order::DispatchType;
use serde::{Deserialize, Serialize};

/// Modifier group selection mode
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// Exactly one modifier of the group
    Single,
    /// Zero to many modifiers of the group
    Multiple,
}

/// A single add-on or choice
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Modifier {
    pub id: String,
    pub name: String,
    /// Price delta applied per unit (may be negative)
    #[serde(default)]
    pub price_delta: f64,
}

/// Named set of modifiers attached to a menu item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModifierGroup {
    pub id: String,
    pub name: String,
    pub selection: SelectionMode,
    pub modifiers: Vec<Modifier>,
}

impl ModifierGroup {
    /// Whether the modifier belongs to this group
    pub fn contains(&self, modifier_id: &str) -> bool {
        self.modifiers.iter().any(|m| m.id == modifier_id)
    }

    /// 单选组默认项：优先零差价选项，否则取第一个
    ///
    /// Multiple-selection groups have no default.
    pub fn default_modifier(&self) -> Option<&Modifier> {
        match self.selection {
            SelectionMode::Single => self
                .modifiers
                .iter()
                .find(|m| m.price_delta == 0.0)
                .or_else(|| self.modifiers.first()),
            SelectionMode::Multiple => None,
        }
    }
}

/// Menu item - immutable reference data owned by the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    /// Catalog unit price
    pub price: f64,
    pub category: String,
    /// Stock ceiling (None = unlimited)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
    #[serde(default)]
    pub allergens: Vec<String>,
    /// Dispatch types this item may be sold for (None = all)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_for: Option<Vec<DispatchType>>,
    #[serde(default)]
    pub modifier_groups: Vec<ModifierGroup>,
}

impl MenuItem {
    /// Items with modifier groups must go through the configuration flow
    pub fn has_modifiers(&self) -> bool {
        !self.modifier_groups.is_empty()
    }

    pub fn is_available_for(&self, dispatch_type: DispatchType) -> bool {
        self.available_for
            .as_ref()
            .is_none_or(|types| types.contains(&dispatch_type))
    }

    /// Find the group owning a modifier id
    pub fn group_of(&self, modifier_id: &str) -> Option<&ModifierGroup> {
        self.modifier_groups.iter().find(|g| g.contains(modifier_id))
    }

    /// Find a modifier by id together with its group
    pub fn find_modifier(&self, modifier_id: &str) -> Option<(&ModifierGroup, &Modifier)> {
        self.modifier_groups.iter().find_map(|g| {
            g.modifiers
                .iter()
                .find(|m| m.id == modifier_id)
                .map(|m| (g, m))
        })
    }
}
