//! Shared types for order composition

use crate::models::{DeliveryAddress, MenuItem, Modifier, ModifierGroup};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Dispatch
// ============================================================================

/// 出餐方式：顾客如何拿到订单
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DispatchType {
    /// 堂食
    DineIn,
    /// 到店自取
    Collection,
    /// 外带
    TakeOut,
    /// 外送
    Delivery,
    /// 扫码自助点单
    QrOrder,
}

impl DispatchType {
    pub const ALL: [DispatchType; 5] = [
        Self::DineIn,
        Self::Collection,
        Self::TakeOut,
        Self::Delivery,
        Self::QrOrder,
    ];

    /// Display label used on tickets and lists
    pub fn label(&self) -> &'static str {
        match self {
            Self::DineIn => "Dine-In",
            Self::Collection => "Collection",
            Self::TakeOut => "Takeaway",
            Self::Delivery => "Delivery",
            Self::QrOrder => "QR Order",
        }
    }
}

impl fmt::Display for DispatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Validated dispatch details, one variant per dispatch family
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DispatchDetails {
    /// DINE_IN
    DineIn { table: u32, guests: u32 },
    /// TAKE_OUT / COLLECTION
    Pickup {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        phone: Option<String>,
    },
    /// DELIVERY
    Delivery {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        phone: Option<String>,
        address: DeliveryAddress,
    },
    /// QR_ORDER (customer self-service, nothing entered at the terminal)
    SelfService,
}

impl DispatchDetails {
    pub fn table(&self) -> Option<u32> {
        match self {
            Self::DineIn { table, .. } => Some(*table),
            _ => None,
        }
    }

    pub fn guests(&self) -> Option<u32> {
        match self {
            Self::DineIn { guests, .. } => Some(*guests),
            _ => None,
        }
    }

    pub fn customer_name(&self) -> Option<&str> {
        match self {
            Self::Pickup { name, .. } | Self::Delivery { name, .. } => Some(name.as_str()),
            _ => None,
        }
    }

    pub fn customer_phone(&self) -> Option<&str> {
        match self {
            Self::Pickup { phone, .. } | Self::Delivery { phone, .. } => phone.as_deref(),
            _ => None,
        }
    }

    pub fn delivery_address(&self) -> Option<&DeliveryAddress> {
        match self {
            Self::Delivery { address, .. } => Some(address),
            _ => None,
        }
    }

    /// Ticket header: "Table 5", the customer name, or "Guest"
    pub fn ticket_label(&self) -> String {
        match self {
            Self::DineIn { table, .. } => format!("Table {}", table),
            Self::Pickup { name, .. } | Self::Delivery { name, .. } => name.clone(),
            Self::SelfService => "Guest".to_string(),
        }
    }
}

// ============================================================================
// Payment
// ============================================================================

/// 支付状态（仅为操作员选择的分类，不涉及真实支付）
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
}

// ============================================================================
// Line Items
// ============================================================================

/// Selected modifier snapshot (carries its group for selection rules)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SelectedModifier {
    pub group_id: String,
    pub id: String,
    pub name: String,
    pub price_delta: f64,
}

impl SelectedModifier {
    pub fn from_catalog(group: &ModifierGroup, modifier: &Modifier) -> Self {
        Self {
            group_id: group.id.clone(),
            id: modifier.id.clone(),
            name: modifier.name.clone(),
            price_delta: modifier.price_delta,
        }
    }
}

/// Manual price override (audited)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceOverride {
    pub override_price: f64,
    /// Catalog price at the time of the override
    pub original_price: f64,
    pub reason: String,
}

/// A line in a cart or order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    /// Line identity (stable across recall and re-commit)
    pub line_id: String,
    /// Menu item ID
    pub item_id: String,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub allergens: Vec<String>,
    /// Catalog unit price snapshot
    pub price: f64,
    pub quantity: i32,
    #[serde(default)]
    pub selected_modifiers: Vec<SelectedModifier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// 0 = shared course, 1..N = diner seat
    #[serde(default)]
    pub seat: u32,
    #[serde(default)]
    pub is_sent_to_kitchen: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_override: Option<PriceOverride>,
}

impl OrderItem {
    /// New unsent line for a menu item, quantity 1, no modifiers
    pub fn from_menu_item(item: &MenuItem, seat: u32) -> Self {
        Self {
            line_id: crate::util::new_id(),
            item_id: item.id.clone(),
            name: item.name.clone(),
            category: item.category.clone(),
            allergens: item.allergens.clone(),
            price: item.price,
            quantity: 1,
            selected_modifiers: Vec::new(),
            notes: None,
            seat,
            is_sent_to_kitchen: false,
            price_override: None,
        }
    }

    /// Override price if present, else catalog price
    pub fn effective_unit_price(&self) -> f64 {
        self.price_override
            .as_ref()
            .map_or(self.price, |o| o.override_price)
    }

    /// Line without modifiers or notes (eligible for quantity merging)
    pub fn is_plain(&self) -> bool {
        self.selected_modifiers.is_empty()
            && self.notes.as_deref().is_none_or(|n| n.trim().is_empty())
    }

    pub fn has_modifier(&self, modifier_id: &str) -> bool {
        self.selected_modifiers.iter().any(|m| m.id == modifier_id)
    }

    pub fn modifier_names(&self) -> Vec<String> {
        self.selected_modifiers
            .iter()
            .map(|m| m.name.clone())
            .collect()
    }
}
