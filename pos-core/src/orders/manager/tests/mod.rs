use super::*;
use crate::catalog::fixtures;
use crate::dispatch::DispatchDraft;
use crate::orders::StatusFilter;
use shared::order::{DispatchType, OrderItem};

fn create_test_manager() -> OrdersManager {
    OrdersManager::new(&Config::with_overrides(0.08, 101))
}

fn pizza_line(quantity: i32) -> OrderItem {
    let mut line = OrderItem::from_menu_item(&fixtures::margherita(), 0);
    line.quantity = quantity;
    line
}

fn bread_line(seat: u32) -> OrderItem {
    OrderItem::from_menu_item(&fixtures::garlic_bread(), seat)
}

fn dine_in_request(items: Vec<OrderItem>, send_to_kitchen: bool) -> CommitRequest {
    CommitRequest {
        items,
        dispatch_type: DispatchType::DineIn,
        discount: 0.0,
        details: DispatchDraft::dine_in("5", "2"),
        payment_status: PaymentStatus::Pending,
        existing_order_id: None,
        send_to_kitchen,
    }
}

/// Commit onto an existing order from its recall draft plus extra lines
fn recommit(
    manager: &OrdersManager,
    order_id: &str,
    extra: Vec<OrderItem>,
    send_to_kitchen: bool,
) -> Result<Order, ManagerError> {
    let draft = manager.recall(order_id)?;
    let mut items = draft.items;
    items.extend(extra);
    manager.commit(CommitRequest {
        items,
        dispatch_type: draft.dispatch_type,
        discount: draft.discount,
        details: DispatchDraft::from_details(&draft.details),
        payment_status: draft.payment_status,
        existing_order_id: Some(draft.order_id),
        send_to_kitchen,
    })
}
