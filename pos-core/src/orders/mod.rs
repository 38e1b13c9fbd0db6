//! Orders module
//!
//! - [`OrdersManager`] - owns the canonical order set (commit / hold / advance / recall / cancel)
//! - [`merge`] - recall-and-append line merging
//! - [`OrderFilter`] - order list / bills queries

pub mod manager;
pub mod merge;
pub mod query;

pub use manager::{ManagerError, OrdersManager};
pub use query::{OrderFilter, StatusFilter};

use crate::dispatch::DispatchDraft;
use shared::order::{DispatchDetails, DispatchType, OrderItem, PaymentStatus};

/// Everything `OrdersManager::commit` needs from the sales terminal
#[derive(Debug, Clone)]
pub struct CommitRequest {
    pub items: Vec<OrderItem>,
    pub dispatch_type: DispatchType,
    pub discount: f64,
    /// Raw details, validated inside commit
    pub details: DispatchDraft,
    pub payment_status: PaymentStatus,
    /// Set when the cart was recalled from an existing order
    pub existing_order_id: Option<String>,
    pub send_to_kitchen: bool,
}

/// Mutable copy of an order, loaded back into the cart
#[derive(Debug, Clone, PartialEq)]
pub struct RecallDraft {
    pub order_id: String,
    pub order_number: u64,
    pub items: Vec<OrderItem>,
    pub dispatch_type: DispatchType,
    pub details: DispatchDetails,
    pub discount: f64,
    pub payment_status: PaymentStatus,
}
