//! CRM customer directory (read-only)

use shared::models::Customer;
use shared::util::normalize_postcode;

/// CRM lookup provider
pub trait CustomerDirectory: Send + Sync {
    fn lookup_by_phone(&self, phone: &str) -> Option<Customer>;
    fn lookup_by_postcode(&self, postcode: &str) -> Option<Customer>;
}

/// Digits only, so "087 123 4567" matches "0871234567"
fn phone_key(phone: &str) -> String {
    phone.chars().filter(char::is_ascii_digit).collect()
}

/// In-memory directory loaded at startup
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    customers: Vec<Customer>,
}

impl InMemoryDirectory {
    pub fn new(customers: Vec<Customer>) -> Self {
        Self { customers }
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }
}

impl CustomerDirectory for InMemoryDirectory {
    fn lookup_by_phone(&self, phone: &str) -> Option<Customer> {
        let key = phone_key(phone);
        if key.is_empty() {
            return None;
        }
        self.customers
            .iter()
            .find(|c| phone_key(&c.phone) == key)
            .cloned()
    }

    fn lookup_by_postcode(&self, postcode: &str) -> Option<Customer> {
        if normalize_postcode(postcode).is_empty() {
            return None;
        }
        self.customers
            .iter()
            .find(|c| c.has_postcode(postcode))
            .cloned()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use shared::models::{Customer, DeliveryAddress};

    pub fn aoife() -> Customer {
        Customer {
            id: "c1".to_string(),
            name: "Aoife Byrne".to_string(),
            phone: "087 123 4567".to_string(),
            email: None,
            addresses: vec![DeliveryAddress {
                postcode: "D02 X285".to_string(),
                line1: "1 Main St".to_string(),
                line2: Some("Apt 4".to_string()),
                city: "Dublin".to_string(),
            }],
            total_orders: 12,
            total_spent: 310.5,
            last_order_at: None,
            notes: Some("Ring twice".to_string()),
        }
    }
}
