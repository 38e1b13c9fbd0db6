//! Customer Model (CRM record, read-only to the order core)

use crate::util::normalize_postcode;
use serde::{Deserialize, Serialize};

/// Delivery address
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct DeliveryAddress {
    /// Postcode / Eircode
    #[serde(alias = "eircode")]
    pub postcode: String,
    pub line1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line2: Option<String>,
    pub city: String,
}

/// CRM customer profile, keyed by phone
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub addresses: Vec<DeliveryAddress>,
    #[serde(default)]
    pub total_orders: i32,
    #[serde(default)]
    pub total_spent: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_order_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Customer {
    /// Whether any saved address matches the postcode (whitespace/case-insensitive)
    pub fn has_postcode(&self, code: &str) -> bool {
        let wanted = normalize_postcode(code);
        !wanted.is_empty()
            && self
                .addresses
                .iter()
                .any(|a| normalize_postcode(&a.postcode) == wanted)
    }

    /// Address used for auto-fill (first saved)
    pub fn primary_address(&self) -> Option<&DeliveryAddress> {
        self.addresses.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_postcode_ignores_spacing_and_case() {
        let customer = Customer {
            id: "c1".to_string(),
            name: "Aoife".to_string(),
            phone: "0871234567".to_string(),
            email: None,
            addresses: vec![DeliveryAddress {
                postcode: "D02 X285".to_string(),
                line1: "1 Main St".to_string(),
                line2: None,
                city: "Dublin".to_string(),
            }],
            total_orders: 3,
            total_spent: 54.2,
            last_order_at: None,
            notes: None,
        };
        assert!(customer.has_postcode("d02x285"));
        assert!(!customer.has_postcode("D02"));
        assert!(!customer.has_postcode("  "));
    }

    #[test]
    fn test_address_accepts_eircode_alias() {
        let json = r#"{"eircode":"A65 F4E2","line1":"2 Quay","city":"Cork"}"#;
        let addr: DeliveryAddress = serde_json::from_str(json).unwrap();
        assert_eq!(addr.postcode, "A65 F4E2");
    }
}
