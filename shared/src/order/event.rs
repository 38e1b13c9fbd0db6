//! Order change notifications
//!
//! Broadcast by the orders manager after every successful mutation. Read
//! models (kitchen queue, order list, bills) re-project on receipt.

use super::snapshot::OrderStatus;
use serde::{Deserialize, Serialize};

/// Event payload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderEventPayload {
    /// New order committed
    OrderCreated { sent_to_kitchen: bool },
    /// Existing order re-committed (recall-and-append)
    OrderUpdated {
        appended_lines: usize,
        sent_to_kitchen: bool,
    },
    /// Status set through `advance`
    StatusChanged { from: OrderStatus, to: OrderStatus },
    /// Order cancelled
    OrderCancelled {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
    },
}

/// Order event with global sequence
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderEvent {
    /// Global, strictly increasing per manager
    pub sequence: u64,
    pub order_id: String,
    pub order_number: u64,
    /// Status after the mutation
    pub status: OrderStatus,
    /// Unix millis
    pub timestamp: i64,
    pub payload: OrderEventPayload,
}
