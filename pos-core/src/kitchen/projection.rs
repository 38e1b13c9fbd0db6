//! 厨房队列投影
//!
//! 纯函数：从订单集合推导厨房出单队列。
//!
//! - 只包含至少有一条已送厨行、且未完成/未取消的订单
//! - 排序：NEW < PREPARING < READY，再按创建时间升序，订单号兜底
//! - 每张单只显示已送厨的行，按菜品分类分组（分类按固定优先级，前菜优先），
//!   组内按座位号升序

use serde::{Deserialize, Serialize};
use shared::order::{DispatchType, Order, OrderItem, OrderStatus};

use crate::catalog::compare_categories;

/// Ticket magnitude shown on the kitchen card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketSize {
    /// ≤ 2 items
    Snack,
    /// ≤ 5 items
    Meal,
    Feast,
}

impl TicketSize {
    pub fn from_item_count(count: i32) -> Self {
        match count {
            ..=2 => Self::Snack,
            3..=5 => Self::Meal,
            _ => Self::Feast,
        }
    }
}

/// One sent line on a ticket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KitchenLine {
    pub line_id: String,
    pub name: String,
    pub quantity: i32,
    /// 0 = shared
    pub seat: u32,
    pub modifiers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub allergens: Vec<String>,
}

impl From<&OrderItem> for KitchenLine {
    fn from(item: &OrderItem) -> Self {
        Self {
            line_id: item.line_id.clone(),
            name: item.name.clone(),
            quantity: item.quantity,
            seat: item.seat,
            modifiers: item.modifier_names(),
            notes: item.notes.clone(),
            allergens: item.allergens.clone(),
        }
    }
}

/// Category group on a ticket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KitchenCourse {
    pub category: String,
    pub lines: Vec<KitchenLine>,
}

/// Kitchen ticket (one per order)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KitchenTicket {
    pub order_id: String,
    pub order_number: u64,
    pub status: OrderStatus,
    pub dispatch_type: DispatchType,
    /// "Table 5", customer name, or "Guest"
    pub label: String,
    pub created_at: i64,
    /// Σ quantity of sent lines
    pub item_count: i32,
    pub size: TicketSize,
    pub courses: Vec<KitchenCourse>,
}

impl KitchenTicket {
    /// Whole seconds since the order was created (never negative)
    pub fn elapsed_secs(&self, now_millis: i64) -> i64 {
        ((now_millis - self.created_at) / 1000).max(0)
    }

    /// Elapsed time as "mm:ss"
    pub fn elapsed_label(&self, now_millis: i64) -> String {
        let secs = self.elapsed_secs(now_millis);
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }

    /// Local wall-clock time the order came in ("HH:MM")
    pub fn created_time(&self) -> String {
        chrono::DateTime::from_timestamp_millis(self.created_at)
            .map(|dt| dt.with_timezone(&chrono::Local).format("%H:%M").to_string())
            .unwrap_or_else(|| self.created_at.to_string())
    }

    /// Whether any sent line carries an allergen
    pub fn has_allergens(&self) -> bool {
        self.courses
            .iter()
            .flat_map(|c| &c.lines)
            .any(|l| !l.allergens.is_empty())
    }
}

fn ticket(order: &Order) -> KitchenTicket {
    let mut courses: Vec<KitchenCourse> = Vec::new();
    for item in order.sent_items() {
        match courses.iter_mut().find(|c| c.category == item.category) {
            Some(course) => course.lines.push(KitchenLine::from(item)),
            None => courses.push(KitchenCourse {
                category: item.category.clone(),
                lines: vec![KitchenLine::from(item)],
            }),
        }
    }
    courses.sort_by(|a, b| compare_categories(&a.category, &b.category));
    for course in &mut courses {
        // Stable: lines of the same seat keep entry order
        course.lines.sort_by_key(|l| l.seat);
    }

    let item_count: i32 = order.sent_items().map(|i| i.quantity).sum();
    KitchenTicket {
        order_id: order.id.clone(),
        order_number: order.order_number,
        status: order.status,
        dispatch_type: order.dispatch_type,
        label: order.details.ticket_label(),
        created_at: order.created_at,
        item_count,
        size: TicketSize::from_item_count(item_count),
        courses,
    }
}

/// Project the order set into the sorted kitchen queue
pub fn project(orders: &[Order]) -> Vec<KitchenTicket> {
    let mut queue: Vec<(&Order, u8)> = orders
        .iter()
        .filter(|o| o.has_sent_items())
        .filter_map(|o| o.status.kitchen_priority().map(|p| (o, p)))
        .collect();
    queue.sort_by(|(a, pa), (b, pb)| {
        pa.cmp(pb)
            .then_with(|| a.created_at.cmp(&b.created_at))
            .then_with(|| a.order_number.cmp(&b.order_number))
    });
    queue.into_iter().map(|(o, _)| ticket(o)).collect()
}
