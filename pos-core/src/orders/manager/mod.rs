//! OrdersManager - canonical order set and status machine
//!
//! All writes go through one `RwLock`-guarded book, so the manager can be
//! shared (`Arc<OrdersManager>`) between the sales terminal, kitchen display,
//! order list and bills surfaces.
//!
//! # Commit Flow
//!
//! ```text
//! commit(request)
//!     ├─ 1. Validate cart (non-empty, quantities, discount)
//!     ├─ 2. Resolve dispatch details (ValidationError blocks the commit)
//!     ├─ 3. Take the write lock
//!     ├─ 4. New order: next order number, status NEW
//!     │     Existing order: merge lines by line_id (sent lines frozen),
//!     │     rejected only when cancelled
//!     ├─ 5. Mark lines sent, NEW → PREPARING when sending
//!     ├─ 6. Recompute totals
//!     ├─ 7. Broadcast OrderEvent
//!     └─ 8. Audit
//! ```

mod error;
pub use error::*;

use super::merge::merge_lines;
use super::query::OrderFilter;
use super::{CommitRequest, RecallDraft};
use crate::audit::{AuditAction, AuditService, AuditSeverity};
use crate::core::Config;
use crate::dispatch;
use crate::kitchen::{self, KitchenTicket};
use crate::pricing;
use crate::utils::validation::{MAX_NOTE_LEN, MAX_QUANTITY, validate_text_len};
use parking_lot::RwLock;
use shared::order::{
    Order, OrderEvent, OrderEventPayload, OrderStatus, PaymentStatus,
};
use shared::util::{new_id, now_millis};
use std::sync::Arc;
use tokio::sync::broadcast;

/// Default event broadcast channel capacity
const DEFAULT_EVENT_CAPACITY: usize = 1024;

/// Mutable book behind the lock
#[derive(Debug)]
struct Book {
    /// Orders in creation order
    orders: Vec<Order>,
    next_order_number: u64,
    sequence: u64,
}

impl Book {
    fn position(&self, order_id: &str) -> Result<usize, ManagerError> {
        self.orders
            .iter()
            .position(|o| o.id == order_id)
            .ok_or_else(|| ManagerError::OrderNotFound(order_id.to_string()))
    }

    fn next_sequence(&mut self) -> u64 {
        self.sequence += 1;
        self.sequence
    }
}

fn terminal_error(order: &Order) -> ManagerError {
    match order.status {
        OrderStatus::Completed => ManagerError::OrderAlreadyCompleted(order.id.clone()),
        _ => ManagerError::OrderAlreadyCancelled(order.id.clone()),
    }
}

/// OrdersManager
pub struct OrdersManager {
    book: RwLock<Book>,
    event_tx: broadcast::Sender<OrderEvent>,
    audit: Option<Arc<AuditService>>,
    tax_rate: f64,
}

impl std::fmt::Debug for OrdersManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrdersManager")
            .field("orders", &self.book.read().orders.len())
            .field("event_tx", &"<broadcast::Sender>")
            .field("tax_rate", &self.tax_rate)
            .finish_non_exhaustive()
    }
}

impl Default for OrdersManager {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl OrdersManager {
    pub fn new(config: &Config) -> Self {
        let capacity = if config.event_capacity == 0 {
            DEFAULT_EVENT_CAPACITY
        } else {
            config.event_capacity
        };
        let (event_tx, _) = broadcast::channel(capacity);
        Self {
            book: RwLock::new(Book {
                orders: Vec::new(),
                next_order_number: config.first_order_number,
                sequence: 0,
            }),
            event_tx,
            audit: None,
            tax_rate: config.tax_rate,
        }
    }

    pub fn with_audit(mut self, audit: Arc<AuditService>) -> Self {
        self.audit = Some(audit);
        self
    }

    /// Subscribe to order change notifications
    pub fn subscribe(&self) -> broadcast::Receiver<OrderEvent> {
        self.event_tx.subscribe()
    }

    pub fn tax_rate(&self) -> f64 {
        self.tax_rate
    }

    /// Next status on the forward path
    pub fn next_status(status: OrderStatus) -> Option<OrderStatus> {
        status.next()
    }

    // ========== Commands ==========

    /// Commit a cart as a new order, or onto the order it was recalled from
    pub fn commit(&self, request: CommitRequest) -> Result<Order, ManagerError> {
        if request.items.is_empty() {
            return Err(ManagerError::EmptyCart);
        }
        if !request.discount.is_finite() || request.discount < 0.0 {
            return Err(ManagerError::InvalidDiscount(format!(
                "{} (must be a non-negative number)",
                request.discount
            )));
        }
        if let Some(line) = request
            .items
            .iter()
            .find(|l| l.quantity < 1 || l.quantity > MAX_QUANTITY)
        {
            return Err(ManagerError::Validation(format!(
                "Invalid quantity {} for {}",
                line.quantity, line.name
            )));
        }
        let details = dispatch::resolve(request.dispatch_type, &request.details)?;

        let now = now_millis();
        let mut book = self.book.write();

        let (order, payload) = match &request.existing_order_id {
            Some(order_id) => {
                let idx = book.position(order_id)?;
                let order = &mut book.orders[idx];
                // Completed orders still take payment and late lines, their status stays
                if order.status == OrderStatus::Cancelled {
                    return Err(terminal_error(order));
                }

                let merged = merge_lines(&order.items, request.items);
                order.items = merged.items;
                order.dispatch_type = request.dispatch_type;
                order.details = details;
                order.discount = request.discount;
                order.payment_status = request.payment_status;
                if request.send_to_kitchen {
                    order.items.iter_mut().for_each(|l| l.is_sent_to_kitchen = true);
                    if order.status == OrderStatus::New {
                        order.status = OrderStatus::Preparing;
                    }
                }
                apply_totals(order, self.tax_rate);
                order.updated_at = now;

                tracing::info!(
                    order_id = %order.id,
                    order_number = order.order_number,
                    appended = merged.appended,
                    dropped = merged.dropped,
                    sent = request.send_to_kitchen,
                    "Order updated"
                );
                (
                    order.clone(),
                    OrderEventPayload::OrderUpdated {
                        appended_lines: merged.appended,
                        sent_to_kitchen: request.send_to_kitchen,
                    },
                )
            }
            None => {
                let order_number = book.next_order_number;
                book.next_order_number += 1;

                let mut items = request.items;
                items
                    .iter_mut()
                    .for_each(|l| l.is_sent_to_kitchen = request.send_to_kitchen);
                let mut order = Order {
                    id: new_id(),
                    order_number,
                    items,
                    dispatch_type: request.dispatch_type,
                    details,
                    status: OrderStatus::New,
                    payment_status: request.payment_status,
                    subtotal: 0.0,
                    tax: 0.0,
                    discount: request.discount,
                    total: 0.0,
                    created_at: now,
                    updated_at: now,
                };
                apply_totals(&mut order, self.tax_rate);
                book.orders.push(order.clone());

                tracing::info!(
                    order_id = %order.id,
                    order_number,
                    dispatch = %order.dispatch_type,
                    total = order.total,
                    sent = request.send_to_kitchen,
                    "Order created"
                );
                (
                    order,
                    OrderEventPayload::OrderCreated {
                        sent_to_kitchen: request.send_to_kitchen,
                    },
                )
            }
        };

        self.broadcast(&mut book, &order, payload);
        drop(book);

        self.audit(
            AuditAction::OrderCommitted,
            AuditSeverity::Low,
            &order,
            serde_json::json!({
                "order_number": order.order_number,
                "total": order.total,
                "sent_to_kitchen": request.send_to_kitchen,
                "payment_status": order.payment_status,
            }),
        );
        Ok(order)
    }

    /// Park an order for later: never sent, payment pending
    pub fn hold(&self, mut request: CommitRequest) -> Result<Order, ManagerError> {
        request.send_to_kitchen = false;
        request.payment_status = PaymentStatus::Pending;
        self.commit(request)
    }

    /// Set status unconditionally
    ///
    /// Moves off the forward path (backwards, or out of a terminal state)
    /// are applied but logged as warnings.
    pub fn advance(&self, order_id: &str, new_status: OrderStatus) -> Result<Order, ManagerError> {
        let mut book = self.book.write();
        let idx = book.position(order_id)?;
        let order = &mut book.orders[idx];
        let from = order.status;
        if from == new_status {
            return Ok(order.clone());
        }
        if !from.can_transition_to(new_status) {
            tracing::warn!(
                order_id = %order.id,
                order_number = order.order_number,
                from = %from,
                to = %new_status,
                "Status change off the forward path"
            );
        }
        order.status = new_status;
        order.updated_at = now_millis();
        let order = order.clone();

        tracing::info!(order_id = %order.id, from = %from, to = %new_status, "Order status changed");
        self.broadcast(
            &mut book,
            &order,
            OrderEventPayload::StatusChanged {
                from,
                to: new_status,
            },
        );
        drop(book);

        let severity = if from.can_transition_to(new_status) {
            AuditSeverity::Low
        } else {
            AuditSeverity::Medium
        };
        self.audit(
            AuditAction::OrderStatusChanged,
            severity,
            &order,
            serde_json::json!({
                "order_number": order.order_number,
                "from": from,
                "to": new_status,
            }),
        );
        Ok(order)
    }

    /// Cancel a non-terminal order
    pub fn cancel(&self, order_id: &str, reason: Option<&str>) -> Result<Order, ManagerError> {
        let reason = reason
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(str::to_string);
        if let Some(r) = &reason {
            validate_text_len(r, "reason", MAX_NOTE_LEN)
                .map_err(|e| ManagerError::Validation(e.message))?;
        }

        let mut book = self.book.write();
        let idx = book.position(order_id)?;
        let order = &mut book.orders[idx];
        if order.is_terminal() {
            return Err(terminal_error(order));
        }
        let from = order.status;
        order.status = OrderStatus::Cancelled;
        order.updated_at = now_millis();
        let order = order.clone();

        tracing::info!(order_id = %order.id, order_number = order.order_number, "Order cancelled");
        self.broadcast(
            &mut book,
            &order,
            OrderEventPayload::OrderCancelled {
                reason: reason.clone(),
            },
        );
        drop(book);

        self.audit(
            AuditAction::OrderCancelled,
            AuditSeverity::High,
            &order,
            serde_json::json!({
                "order_number": order.order_number,
                "from": from,
                "reason": reason,
                "total": order.total,
            }),
        );
        Ok(order)
    }

    /// Mutable draft of a held order for the cart
    ///
    /// Completed orders can be recalled (payment after service); cancelled
    /// orders cannot.
    pub fn recall(&self, order_id: &str) -> Result<RecallDraft, ManagerError> {
        let book = self.book.read();
        let order = &book.orders[book.position(order_id)?];
        if order.status == OrderStatus::Cancelled {
            return Err(terminal_error(order));
        }
        tracing::debug!(order_id = %order.id, order_number = order.order_number, "Order recalled");
        Ok(RecallDraft {
            order_id: order.id.clone(),
            order_number: order.order_number,
            items: order.items.clone(),
            dispatch_type: order.dispatch_type,
            details: order.details.clone(),
            discount: order.discount,
            payment_status: order.payment_status,
        })
    }

    // ========== Queries ==========

    /// All orders in creation order
    pub fn snapshot(&self) -> Vec<Order> {
        self.book.read().orders.clone()
    }

    pub fn get(&self, order_id: &str) -> Option<Order> {
        self.book
            .read()
            .orders
            .iter()
            .find(|o| o.id == order_id)
            .cloned()
    }

    pub fn get_by_number(&self, order_number: u64) -> Option<Order> {
        self.book
            .read()
            .orders
            .iter()
            .find(|o| o.order_number == order_number)
            .cloned()
    }

    /// Payment pending and not cancelled, newest first
    pub fn held_orders(&self) -> Vec<Order> {
        self.query(&OrderFilter::default())
            .into_iter()
            .filter(Order::is_held)
            .collect()
    }

    /// Filtered orders, newest first
    pub fn query(&self, filter: &OrderFilter) -> Vec<Order> {
        let book = self.book.read();
        let mut orders: Vec<Order> = book
            .orders
            .iter()
            .filter(|o| filter.matches(o))
            .cloned()
            .collect();
        orders.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.order_number.cmp(&a.order_number))
        });
        orders
    }

    /// Kitchen queue projection of the current order set
    pub fn kitchen_queue(&self) -> Vec<KitchenTicket> {
        let book = self.book.read();
        kitchen::project(&book.orders)
    }

    // ========== Internals ==========

    fn broadcast(&self, book: &mut Book, order: &Order, payload: OrderEventPayload) {
        let event = OrderEvent {
            sequence: book.next_sequence(),
            order_id: order.id.clone(),
            order_number: order.order_number,
            status: order.status,
            timestamp: order.updated_at,
            payload,
        };
        // No subscribers is fine
        let _ = self.event_tx.send(event);
    }

    fn audit(
        &self,
        action: AuditAction,
        severity: AuditSeverity,
        order: &Order,
        details: serde_json::Value,
    ) {
        if let Some(audit) = &self.audit {
            audit.order_event(action, severity, &order.id, details);
        }
    }
}

fn apply_totals(order: &mut Order, tax_rate: f64) {
    let breakdown = pricing::price(&order.items, order.discount, tax_rate);
    order.subtotal = breakdown.subtotal;
    order.tax = breakdown.tax;
    order.discount = breakdown.discount;
    order.total = breakdown.total;
}

#[cfg(test)]
mod tests;
