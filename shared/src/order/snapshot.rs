//! Order record and status machine
//!
//! `Order` is the canonical record owned by the orders manager. Surfaces
//! (POS, kitchen display, order list, bills) only ever see clones of it.

use super::types::{DispatchDetails, DispatchType, OrderItem, PaymentStatus};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Order status
///
/// NEW → PREPARING → READY → COMPLETED, CANCELLED from any non-terminal state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    New,
    Preparing,
    Ready,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// COMPLETED and CANCELLED are terminal
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Next step on the forward path (None for terminal states)
    pub fn next(&self) -> Option<OrderStatus> {
        match self {
            Self::New => Some(Self::Preparing),
            Self::Preparing => Some(Self::Ready),
            Self::Ready => Some(Self::Completed),
            Self::Completed | Self::Cancelled => None,
        }
    }

    /// 厨房队列优先级：NEW(0) < PREPARING(1) < READY(2)
    pub fn kitchen_priority(&self) -> Option<u8> {
        match self {
            Self::New => Some(0),
            Self::Preparing => Some(1),
            Self::Ready => Some(2),
            Self::Completed | Self::Cancelled => None,
        }
    }

    /// Whether moving to `to` follows the declared state machine
    pub fn can_transition_to(&self, to: OrderStatus) -> bool {
        if self.is_terminal() {
            return false;
        }
        to == Self::Cancelled || self.next() == Some(to)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Preparing => "Preparing",
            Self::Ready => "Ready",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Order - created on commit, never deleted
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    /// Order ID (assigned by the manager)
    pub id: String,
    /// Session-unique, strictly increasing
    pub order_number: u64,
    pub items: Vec<OrderItem>,
    pub dispatch_type: DispatchType,
    pub details: DispatchDetails,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub subtotal: f64,
    pub tax: f64,
    #[serde(default)]
    pub discount: f64,
    pub total: f64,
    /// Creation timestamp (Unix millis)
    pub created_at: i64,
    /// Last update timestamp (Unix millis)
    pub updated_at: i64,
}

impl Order {
    /// Held = parked for later: payment pending and not cancelled
    pub fn is_held(&self) -> bool {
        self.payment_status == PaymentStatus::Pending && self.status != OrderStatus::Cancelled
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn has_sent_items(&self) -> bool {
        self.items.iter().any(|i| i.is_sent_to_kitchen)
    }

    pub fn sent_items(&self) -> impl Iterator<Item = &OrderItem> {
        self.items.iter().filter(|i| i.is_sent_to_kitchen)
    }

    pub fn customer_name(&self) -> Option<&str> {
        self.details.customer_name()
    }

    pub fn table(&self) -> Option<u32> {
        self.details.table()
    }
}
