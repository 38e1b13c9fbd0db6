//! Dispatch draft with per-field provenance
//!
//! Every field remembers who wrote it last. Auto-fill (CRM, address
//! resolution) only writes fields the operator has not edited, so a late
//! lookup never clobbers user input.

use serde::{Deserialize, Serialize};
use shared::order::DispatchDetails;
use std::collections::HashMap;

/// Editable dispatch field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftField {
    Table,
    Guests,
    CustomerName,
    Phone,
    Postcode,
    Line1,
    Line2,
    City,
}

impl DraftField {
    pub fn key(&self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Guests => "guests",
            Self::CustomerName => "customer_name",
            Self::Phone => "phone",
            Self::Postcode => "postcode",
            Self::Line1 => "line1",
            Self::Line2 => "line2",
            Self::City => "city",
        }
    }
}

/// Who last wrote a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldSource {
    User,
    AutoFill,
}

/// Raw dispatch form input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchDraft {
    values: HashMap<DraftField, String>,
    sources: HashMap<DraftField, FieldSource>,
}

impl DispatchDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dine_in(table: &str, guests: &str) -> Self {
        let mut draft = Self::new();
        draft.set(DraftField::Table, table);
        draft.set(DraftField::Guests, guests);
        draft
    }

    pub fn pickup(name: &str, phone: &str) -> Self {
        let mut draft = Self::new();
        draft.set(DraftField::CustomerName, name);
        draft.set(DraftField::Phone, phone);
        draft
    }

    pub fn delivery(name: &str, phone: &str, postcode: &str, line1: &str, city: &str) -> Self {
        let mut draft = Self::pickup(name, phone);
        draft.set(DraftField::Postcode, postcode);
        draft.set(DraftField::Line1, line1);
        draft.set(DraftField::City, city);
        draft
    }

    /// Rebuild a draft from committed details (recall); fields count as user input
    pub fn from_details(details: &DispatchDetails) -> Self {
        let mut draft = Self::new();
        match details {
            DispatchDetails::DineIn { table, guests } => {
                draft.set(DraftField::Table, &table.to_string());
                draft.set(DraftField::Guests, &guests.to_string());
            }
            DispatchDetails::Pickup { name, phone } => {
                draft.set(DraftField::CustomerName, name);
                draft.set(DraftField::Phone, phone.as_deref().unwrap_or_default());
            }
            DispatchDetails::Delivery {
                name,
                phone,
                address,
            } => {
                draft.set(DraftField::CustomerName, name);
                draft.set(DraftField::Phone, phone.as_deref().unwrap_or_default());
                draft.set(DraftField::Postcode, &address.postcode);
                draft.set(DraftField::Line1, &address.line1);
                draft.set(DraftField::Line2, address.line2.as_deref().unwrap_or_default());
                draft.set(DraftField::City, &address.city);
            }
            DispatchDetails::SelfService => {}
        }
        draft
    }

    pub fn get(&self, field: DraftField) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or_default()
    }

    /// Trimmed value, None when blank
    pub fn value(&self, field: DraftField) -> Option<&str> {
        let v = self.get(field).trim();
        (!v.is_empty()).then_some(v)
    }

    pub fn source(&self, field: DraftField) -> Option<FieldSource> {
        self.sources.get(&field).copied()
    }

    /// Operator edit (always wins)
    pub fn set(&mut self, field: DraftField, value: &str) {
        self.values.insert(field, value.to_string());
        self.sources.insert(field, FieldSource::User);
    }

    /// Advisory write; skipped when the operator has typed into the field
    ///
    /// Returns whether the value was written.
    pub fn autofill(&mut self, field: DraftField, value: &str) -> bool {
        let user_owned =
            self.source(field) == Some(FieldSource::User) && !self.get(field).trim().is_empty();
        if user_owned || value.trim().is_empty() {
            return false;
        }
        self.values.insert(field, value.to_string());
        self.sources.insert(field, FieldSource::AutoFill);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_autofill_never_overwrites_user_edit() {
        let mut draft = DispatchDraft::new();
        draft.set(DraftField::CustomerName, "Niamh");
        assert!(!draft.autofill(DraftField::CustomerName, "Aoife"));
        assert_eq!(draft.get(DraftField::CustomerName), "Niamh");

        assert!(draft.autofill(DraftField::City, "Dublin"));
        assert_eq!(draft.source(DraftField::City), Some(FieldSource::AutoFill));
        // Auto-filled values may be refreshed by a later lookup
        assert!(draft.autofill(DraftField::City, "Cork"));
        draft.set(DraftField::City, "Galway");
        assert!(!draft.autofill(DraftField::City, "Cork"));
    }

    #[test]
    fn test_cleared_user_field_accepts_autofill() {
        let mut draft = DispatchDraft::new();
        draft.set(DraftField::Line1, "  ");
        assert!(draft.autofill(DraftField::Line1, "1 Main St"));
    }

    #[test]
    fn test_from_details_round_trip_values() {
        let draft = DispatchDraft::from_details(&DispatchDetails::DineIn {
            table: 5,
            guests: 3,
        });
        assert_eq!(draft.value(DraftField::Table), Some("5"));
        assert_eq!(draft.value(DraftField::Guests), Some("3"));
        assert_eq!(draft.value(DraftField::Phone), None);
    }
}
