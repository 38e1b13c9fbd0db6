//! KitchenFeed - kitchen display read model
//!
//! Subscribes to order change notifications and re-projects the queue on
//! every event instead of polling.

use std::sync::Arc;
use tokio::sync::broadcast;

use super::KitchenTicket;
use crate::orders::OrdersManager;
use shared::order::OrderEvent;

pub struct KitchenFeed {
    orders: Arc<OrdersManager>,
    rx: broadcast::Receiver<OrderEvent>,
    tickets: Vec<KitchenTicket>,
    last_sequence: u64,
}

impl std::fmt::Debug for KitchenFeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KitchenFeed")
            .field("tickets", &self.tickets.len())
            .field("last_sequence", &self.last_sequence)
            .finish_non_exhaustive()
    }
}

impl KitchenFeed {
    pub fn new(orders: Arc<OrdersManager>) -> Self {
        let rx = orders.subscribe();
        let tickets = orders.kitchen_queue();
        Self {
            orders,
            rx,
            tickets,
            last_sequence: 0,
        }
    }

    /// Current queue
    pub fn tickets(&self) -> &[KitchenTicket] {
        &self.tickets
    }

    /// Sequence of the last event applied
    pub fn last_sequence(&self) -> u64 {
        self.last_sequence
    }

    /// Wait for the next order change and re-project
    ///
    /// Returns `None` once the manager is gone.
    pub async fn changed(&mut self) -> Option<&[KitchenTicket]> {
        match self.rx.recv().await {
            Ok(event) => {
                self.last_sequence = event.sequence;
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "Kitchen feed lagged, re-projecting");
            }
            Err(broadcast::error::RecvError::Closed) => return None,
        }
        self.refresh();
        Some(self.tickets.as_slice())
    }

    /// Re-project from the current order set
    pub fn refresh(&mut self) {
        self.tickets = self.orders.kitchen_queue();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures;
    use crate::core::Config;
    use crate::dispatch::DispatchDraft;
    use crate::orders::CommitRequest;
    use shared::order::{DispatchType, OrderItem, OrderStatus, PaymentStatus};

    fn request(send: bool) -> CommitRequest {
        CommitRequest {
            items: vec![OrderItem::from_menu_item(&fixtures::margherita(), 0)],
            dispatch_type: DispatchType::DineIn,
            discount: 0.0,
            details: DispatchDraft::dine_in("3", ""),
            payment_status: PaymentStatus::Pending,
            existing_order_id: None,
            send_to_kitchen: send,
        }
    }

    #[tokio::test]
    async fn test_feed_reprojects_on_change() {
        let orders = Arc::new(OrdersManager::new(&Config::with_overrides(0.08, 101)));
        let mut feed = KitchenFeed::new(orders.clone());
        assert!(feed.tickets().is_empty());

        let order = orders.commit(request(true)).unwrap();
        let tickets = feed.changed().await.unwrap();
        assert_eq!(tickets.len(), 1);
        assert_eq!(tickets[0].label, "Table 3");

        orders.advance(&order.id, OrderStatus::Completed).unwrap();
        assert!(feed.changed().await.unwrap().is_empty());
        assert_eq!(feed.last_sequence(), 2);
    }

    #[tokio::test]
    async fn test_held_order_not_on_feed() {
        let orders = Arc::new(OrdersManager::new(&Config::with_overrides(0.08, 101)));
        let mut feed = KitchenFeed::new(orders.clone());
        orders.hold(request(false)).unwrap();
        assert!(feed.changed().await.unwrap().is_empty());
    }
}
