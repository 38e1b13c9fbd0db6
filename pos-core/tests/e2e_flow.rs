//! End-to-end order flow across cart, dispatch, orders and kitchen

use std::sync::Arc;

use pos_core::audit::{AuditAction, MemoryAuditSink};
use pos_core::dispatch::InMemoryDirectory;
use pos_core::{
    AddOutcome, CartError, Config, DispatchDraft, DraftField, ItemConfigurator, ManagerError,
    MenuCatalog, OrderFilter, OverrideRequest, PosState, StatusFilter, price,
};
use shared::models::{Operator, OperatorRole};
use shared::order::{DispatchType, OrderItem, OrderStatus, PaymentStatus};

const MENU: &str = r#"[
    {"id":"1","name":"Margherita Pizza","price":12.99,"category":"Pizza","stock":20,
     "barcode":"1001","allergens":["Dairy","Gluten"]},
    {"id":"10","name":"Garlic Bread with Cheese","price":4.99,"category":"Starters","stock":3},
    {"id":"3","name":"Classic Cheeseburger","price":9.99,"category":"Burgers","stock":10,
     "modifier_groups":[
        {"id":"cook","name":"Cook","selection":"single","modifiers":[
            {"id":"cook-rare","name":"Rare","price_delta":0.5},
            {"id":"cook-medium","name":"Medium","price_delta":0.0}]},
        {"id":"extras","name":"Extras","selection":"multiple","modifiers":[
            {"id":"extra-bacon","name":"Bacon","price_delta":1.5}]}
     ]}
]"#;

fn state() -> (PosState, MemoryAuditSink, tokio::task::JoinHandle<()>) {
    let sink = MemoryAuditSink::new();
    let (state, worker) = PosState::initialize(
        Config::with_overrides(0.08, 101),
        MenuCatalog::from_json(MENU).unwrap(),
        Arc::new(InMemoryDirectory::default()),
        sink.clone(),
    );
    (state, sink, worker)
}

#[tokio::test]
async fn test_margherita_dine_in_to_kitchen() {
    let (state, _sink, _worker) = state();
    let pizza = state.catalog.get("1").unwrap().clone();

    let mut cart = state.new_cart();
    cart.set_dispatch_type(DispatchType::DineIn);
    cart.add_simple(&pizza, 0);
    cart.add_simple(&pizza, 0);

    let totals = cart.totals();
    assert_eq!(totals.subtotal, 25.98);
    assert_eq!(totals.tax, 2.08);
    assert_eq!(totals.total, 28.06);

    let mut form = state.new_dispatch_form(DispatchType::DineIn);
    form.edit(DraftField::Table, "5");

    // Held first, then recalled and sent
    let held = state
        .orders
        .hold(cart.commit_request(form.draft().clone(), PaymentStatus::Pending, false))
        .unwrap();
    assert_eq!(held.status, OrderStatus::New);
    assert!(state.orders.kitchen_queue().is_empty());

    let mut feed = state.kitchen_feed();
    cart.clear();
    let draft = state.orders.recall(&held.id).unwrap();
    cart.load_recalled(&draft);
    form.load_details(draft.dispatch_type, &draft.details);
    let sent = state
        .orders
        .commit(cart.commit_request(form.draft().clone(), PaymentStatus::Pending, true))
        .unwrap();

    assert_eq!(sent.id, held.id);
    assert_eq!(sent.status, OrderStatus::Preparing);
    assert_eq!(sent.total, 28.06);

    let tickets = feed.changed().await.unwrap();
    assert_eq!(tickets.len(), 1);
    assert_eq!(tickets[0].label, "Table 5");
    assert_eq!(tickets[0].courses[0].category, "Pizza");
    assert_eq!(tickets[0].courses[0].lines[0].quantity, 2);
}

#[test]
fn test_pricing_is_deterministic_and_floored() {
    let catalog = MenuCatalog::from_json(MENU).unwrap();
    let mut line = OrderItem::from_menu_item(catalog.get("1").unwrap(), 0);
    line.quantity = 3;
    let items = vec![line];
    assert_eq!(price(&items, 1.5, 0.08), price(&items, 1.5, 0.08));

    let mut ten = OrderItem::from_menu_item(catalog.get("1").unwrap(), 0);
    ten.price = 10.0;
    let floored = price(&[ten], 50.0, 0.08);
    assert_eq!(floored.subtotal, 10.0);
    assert_eq!(floored.tax, 0.8);
    assert_eq!(floored.total, 0.0);
}

#[tokio::test]
async fn test_stock_ceiling_counts_sent_lines() {
    let (state, _sink, _worker) = state();
    let bread = state.catalog.get("10").unwrap().clone();

    let mut cart = state.new_cart();
    cart.add_simple(&bread, 0);
    cart.add_simple(&bread, 0);
    let order = state
        .orders
        .commit(cart.commit_request(DispatchDraft::dine_in("2", ""), PaymentStatus::Pending, true))
        .unwrap();

    cart.clear();
    cart.load_recalled(&state.orders.recall(&order.id).unwrap());
    assert!(matches!(cart.add_simple(&bread, 1), AddOutcome::Added { .. }));
    // 2 sent + 1 unsent = stock 3
    assert_eq!(cart.add_simple(&bread, 1), AddOutcome::StockLimited);
    assert_eq!(cart.quantity_of("10"), 3);
}

#[tokio::test]
async fn test_sent_lines_are_frozen_after_recall() {
    let (state, _sink, _worker) = state();
    let pizza = state.catalog.get("1").unwrap().clone();

    let mut cart = state.new_cart();
    cart.add_simple(&pizza, 0);
    let order = state
        .orders
        .commit(cart.commit_request(DispatchDraft::dine_in("4", ""), PaymentStatus::Pending, true))
        .unwrap();

    cart.clear();
    cart.load_recalled(&state.orders.recall(&order.id).unwrap());
    let line_id = cart.lines()[0].line_id.clone();
    cart.update_quantity(&line_id, 3).unwrap();
    cart.set_note(&line_id, "no basil").unwrap();
    assert!(!cart.remove_line(&line_id));
    assert_eq!(cart.lines()[0].quantity, 1);
    assert!(cart.lines()[0].notes.is_none());
}

#[tokio::test]
async fn test_override_gate_and_audit() {
    let (state, sink, worker) = state();
    let pizza = state.catalog.get("1").unwrap().clone();

    let mut cart = state.new_cart();
    cart.set_operator(Some(Operator::new("m1", "Sam", OperatorRole::Manager)));
    let AddOutcome::Added { line_id } = cart.add_simple(&pizza, 0) else {
        panic!("expected a new line");
    };

    assert!(matches!(
        cart.override_price(&line_id, "9.99", "ok"),
        Err(CartError::InvalidOverride(_))
    ));
    assert!(matches!(
        cart.override_price(&line_id, "cheap", "Manager comp"),
        Err(CartError::InvalidOverride(_))
    ));
    cart.override_price(&line_id, "9.99", "Manager comp").unwrap();
    assert_eq!(cart.totals().subtotal, 9.99);

    drop(cart);
    drop(state);
    worker.await.unwrap();

    let entries = sink.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].action, AuditAction::PriceOverride);
    assert_eq!(entries[0].details["action"], "Price Override");
    assert_eq!(entries[0].details["original_price"], 12.99);
    assert_eq!(entries[0].details["new_price"], 9.99);
    assert_eq!(entries[0].details["reason"], "Manager comp");
}

#[tokio::test]
async fn test_configured_burger_with_override() {
    let (state, _sink, _worker) = state();
    let mut cart = state.new_cart();
    cart.set_operator(Some(Operator::new("a1", "Root", OperatorRole::Admin)));

    let burger = state.catalog.get("3").unwrap();
    let mut cfg = ItemConfigurator::new(burger, 1);
    cfg.select("cook-rare").unwrap();
    cfg.select("extra-bacon").unwrap();
    assert_eq!(cfg.unit_price_preview(), 11.99);
    cfg.request_override(OverrideRequest::new("8.00", "Loyalty reward"));
    let line = cfg.build(cart.operator()).unwrap();
    cart.add_configured(line).unwrap();

    // Override replaces the base price, modifier deltas still apply
    assert_eq!(cart.totals().subtotal, 10.0);
}

#[tokio::test]
async fn test_dine_in_details_validation() {
    let (state, _sink, _worker) = state();
    let pizza = state.catalog.get("1").unwrap().clone();
    let mut cart = state.new_cart();
    cart.add_simple(&pizza, 0);

    let err = state
        .orders
        .commit(cart.commit_request(DispatchDraft::dine_in("", ""), PaymentStatus::Pending, false))
        .unwrap_err();
    assert!(err.is_validation());
    assert!(matches!(err, ManagerError::Dispatch(_)));

    let order = state
        .orders
        .commit(cart.commit_request(DispatchDraft::dine_in("12", ""), PaymentStatus::Pending, false))
        .unwrap();
    assert_eq!(order.table(), Some(12));
    assert_eq!(order.details.guests(), Some(1));
}

#[tokio::test]
async fn test_kitchen_order_by_status_then_age() {
    let (state, _sink, _worker) = state();
    let pizza = state.catalog.get("1").unwrap().clone();
    let mut cart = state.new_cart();
    cart.add_simple(&pizza, 0);

    let commit = |table: &str| {
        state
            .orders
            .commit(cart.commit_request(DispatchDraft::dine_in(table, ""), PaymentStatus::Pending, true))
            .unwrap()
    };
    let first = commit("1");
    let second = commit("2");
    let third = commit("3");
    state.orders.advance(&first.id, OrderStatus::Ready).unwrap();
    state.orders.advance(&third.id, OrderStatus::Preparing).unwrap();

    let order: Vec<String> = state
        .orders
        .kitchen_queue()
        .into_iter()
        .map(|t| t.order_id)
        .collect();
    assert_eq!(order, vec![second.id, third.id, first.id]);
}

#[tokio::test]
async fn test_order_list_queries() {
    let (state, _sink, _worker) = state();
    let pizza = state.catalog.get("1").unwrap().clone();
    let mut cart = state.new_cart();
    cart.add_simple(&pizza, 0);

    cart.set_dispatch_type(DispatchType::TakeOut);
    let pickup = state
        .orders
        .commit(cart.commit_request(DispatchDraft::pickup("Liam Walsh", ""), PaymentStatus::Paid, true))
        .unwrap();
    cart.set_dispatch_type(DispatchType::QrOrder);
    let qr = state
        .orders
        .hold(cart.commit_request(DispatchDraft::new(), PaymentStatus::Pending, false))
        .unwrap();

    let found = state.orders.query(&OrderFilter::default().search("liam"));
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, pickup.id);

    let held = state.orders.held_orders();
    assert_eq!(held.len(), 1);
    assert_eq!(held[0].id, qr.id);

    state.orders.advance(&pickup.id, OrderStatus::Completed).unwrap();
    let active = state
        .orders
        .query(&OrderFilter::default().status(StatusFilter::Active));
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id, qr.id);
}
