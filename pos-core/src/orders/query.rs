//! Order list / bills filtering

use serde::{Deserialize, Serialize};
use shared::order::{DispatchType, Order, OrderStatus, PaymentStatus};

/// Status filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", content = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusFilter {
    #[default]
    All,
    /// Not COMPLETED / CANCELLED
    Active,
    Only(OrderStatus),
}

impl StatusFilter {
    pub fn matches(&self, status: OrderStatus) -> bool {
        match self {
            Self::All => true,
            Self::Active => !status.is_terminal(),
            Self::Only(s) => *s == status,
        }
    }
}

/// Order list query
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderFilter {
    /// Order number, customer name/phone or table
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default)]
    pub status: StatusFilter,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dispatch_type: Option<DispatchType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<PaymentStatus>,
    /// created_at lower bound (Unix millis, inclusive)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub since: Option<i64>,
    /// created_at upper bound (Unix millis, inclusive)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub until: Option<i64>,
}

impl OrderFilter {
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    pub fn status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    pub fn dispatch_type(mut self, dispatch_type: DispatchType) -> Self {
        self.dispatch_type = Some(dispatch_type);
        self
    }

    pub fn payment_status(mut self, payment_status: PaymentStatus) -> Self {
        self.payment_status = Some(payment_status);
        self
    }

    pub fn between(mut self, since: Option<i64>, until: Option<i64>) -> Self {
        self.since = since;
        self.until = until;
        self
    }

    pub fn matches(&self, order: &Order) -> bool {
        self.status.matches(order.status)
            && self.dispatch_type.is_none_or(|d| d == order.dispatch_type)
            && self.payment_status.is_none_or(|p| p == order.payment_status)
            && self.since.is_none_or(|t| order.created_at >= t)
            && self.until.is_none_or(|t| order.created_at <= t)
            && self.matches_text(order)
    }

    fn matches_text(&self, order: &Order) -> bool {
        let Some(raw) = self.search.as_deref() else {
            return true;
        };
        let needle = raw.trim().trim_start_matches('#').to_lowercase();
        if needle.is_empty() {
            return true;
        }

        order.order_number.to_string().contains(&needle)
            || order
                .customer_name()
                .is_some_and(|n| n.to_lowercase().contains(&needle))
            || order
                .details
                .customer_phone()
                .is_some_and(|p| p.contains(&needle))
            || order
                .table()
                .is_some_and(|t| needle == t.to_string() || needle == format!("table {t}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::order::DispatchDetails;

    fn order(number: u64, status: OrderStatus, details: DispatchDetails, created_at: i64) -> Order {
        let dispatch_type = match details {
            DispatchDetails::DineIn { .. } => DispatchType::DineIn,
            DispatchDetails::Pickup { .. } => DispatchType::TakeOut,
            DispatchDetails::Delivery { .. } => DispatchType::Delivery,
            DispatchDetails::SelfService => DispatchType::QrOrder,
        };
        Order {
            id: format!("o-{number}"),
            order_number: number,
            items: vec![],
            dispatch_type,
            details,
            status,
            payment_status: PaymentStatus::Pending,
            subtotal: 0.0,
            tax: 0.0,
            discount: 0.0,
            total: 0.0,
            created_at,
            updated_at: created_at,
        }
    }

    fn dine_in(table: u32) -> DispatchDetails {
        DispatchDetails::DineIn { table, guests: 2 }
    }

    fn pickup(name: &str) -> DispatchDetails {
        DispatchDetails::Pickup {
            name: name.to_string(),
            phone: Some("0871234567".to_string()),
        }
    }

    #[test]
    fn test_status_filter() {
        let completed = order(101, OrderStatus::Completed, dine_in(1), 0);
        let ready = order(102, OrderStatus::Ready, dine_in(2), 0);
        let active = OrderFilter::default().status(StatusFilter::Active);
        assert!(!active.matches(&completed));
        assert!(active.matches(&ready));
        let only = OrderFilter::default().status(StatusFilter::Only(OrderStatus::Completed));
        assert!(only.matches(&completed));
        assert!(OrderFilter::default().matches(&completed));
    }

    #[test]
    fn test_search() {
        let table = order(105, OrderStatus::New, dine_in(5), 0);
        let named = order(231, OrderStatus::New, pickup("Liam Walsh"), 0);

        assert!(OrderFilter::default().search("#105").matches(&table));
        assert!(OrderFilter::default().search("table 5").matches(&table));
        assert!(!OrderFilter::default().search("table 50").matches(&table));
        assert!(OrderFilter::default().search("walsh").matches(&named));
        assert!(OrderFilter::default().search("087123").matches(&named));
        assert!(!OrderFilter::default().search("walsh").matches(&table));
        assert!(OrderFilter::default().search("  ").matches(&table));
    }

    #[test]
    fn test_window_and_dispatch() {
        let o = order(101, OrderStatus::New, pickup("Liam"), 1_000);
        assert!(OrderFilter::default().between(Some(1_000), Some(2_000)).matches(&o));
        assert!(!OrderFilter::default().between(Some(1_001), None).matches(&o));
        assert!(!OrderFilter::default().between(None, Some(999)).matches(&o));
        assert!(OrderFilter::default().dispatch_type(DispatchType::TakeOut).matches(&o));
        assert!(!OrderFilter::default().dispatch_type(DispatchType::Delivery).matches(&o));
        assert!(!OrderFilter::default().payment_status(PaymentStatus::Paid).matches(&o));
    }

    #[test]
    fn test_filter_serde() {
        let json = r#"{"status":{"mode":"ONLY","status":"READY"},"search":"101"}"#;
        let filter: OrderFilter = serde_json::from_str(json).unwrap();
        assert_eq!(filter.status, StatusFilter::Only(OrderStatus::Ready));
        assert_eq!(filter.search.as_deref(), Some("101"));
    }
}
