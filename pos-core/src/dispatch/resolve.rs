//! Dispatch details validation
//!
//! Turns a raw draft into typed `DispatchDetails` for the chosen dispatch
//! type. This is the gate every commit goes through.

use super::{DispatchDraft, DispatchError, DraftField};
use crate::utils::validation::{MAX_ADDRESS_LEN, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN};
use shared::models::DeliveryAddress;
use shared::order::{DispatchDetails, DispatchType};

fn required<'a>(
    draft: &'a DispatchDraft,
    field: DraftField,
    label: &str,
    max_len: usize,
) -> Result<&'a str, DispatchError> {
    let value = draft
        .value(field)
        .ok_or_else(|| DispatchError::validation(field, format!("{label} is required")))?;
    limit(field, label, value, max_len)?;
    Ok(value)
}

fn optional<'a>(
    draft: &'a DispatchDraft,
    field: DraftField,
    label: &str,
    max_len: usize,
) -> Result<Option<&'a str>, DispatchError> {
    match draft.value(field) {
        Some(value) => limit(field, label, value, max_len).map(|_| Some(value)),
        None => Ok(None),
    }
}

fn limit(field: DraftField, label: &str, value: &str, max_len: usize) -> Result<(), DispatchError> {
    if value.chars().count() > max_len {
        return Err(DispatchError::validation(
            field,
            format!("{label} is too long (max {max_len} characters)"),
        ));
    }
    Ok(())
}

/// Validate the draft for a dispatch type
///
/// - DINE_IN: table required (positive whole number); guests default to 1
///   when missing, non-numeric or zero
/// - TAKE_OUT / COLLECTION: customer name required, phone optional
/// - DELIVERY: postcode, address line 1, city and customer name required
/// - QR_ORDER: nothing required
pub fn resolve(
    dispatch_type: DispatchType,
    draft: &DispatchDraft,
) -> Result<DispatchDetails, DispatchError> {
    match dispatch_type {
        DispatchType::DineIn => {
            let raw = required(draft, DraftField::Table, "Table number", MAX_SHORT_TEXT_LEN)?;
            let table = raw.parse::<u32>().ok().filter(|t| *t > 0).ok_or_else(|| {
                DispatchError::validation(
                    DraftField::Table,
                    "Table number must be a positive whole number",
                )
            })?;
            let guests = draft
                .value(DraftField::Guests)
                .and_then(|g| g.parse::<u32>().ok())
                .filter(|g| *g > 0)
                .unwrap_or(1);
            Ok(DispatchDetails::DineIn { table, guests })
        }
        DispatchType::TakeOut | DispatchType::Collection => {
            let name = required(draft, DraftField::CustomerName, "Customer name", MAX_NAME_LEN)?;
            let phone = optional(draft, DraftField::Phone, "Phone", MAX_SHORT_TEXT_LEN)?;
            Ok(DispatchDetails::Pickup {
                name: name.to_string(),
                phone: phone.map(str::to_string),
            })
        }
        DispatchType::Delivery => {
            let postcode = required(draft, DraftField::Postcode, "Postcode", MAX_SHORT_TEXT_LEN)?;
            let line1 = required(draft, DraftField::Line1, "Address line 1", MAX_ADDRESS_LEN)?;
            let city = required(draft, DraftField::City, "City", MAX_NAME_LEN)?;
            let name = required(draft, DraftField::CustomerName, "Customer name", MAX_NAME_LEN)?;
            let phone = optional(draft, DraftField::Phone, "Phone", MAX_SHORT_TEXT_LEN)?;
            let line2 = optional(draft, DraftField::Line2, "Address line 2", MAX_ADDRESS_LEN)?;
            Ok(DispatchDetails::Delivery {
                name: name.to_string(),
                phone: phone.map(str::to_string),
                address: DeliveryAddress {
                    postcode: postcode.to_uppercase(),
                    line1: line1.to_string(),
                    line2: line2.map(str::to_string),
                    city: city.to_string(),
                },
            })
        }
        DispatchType::QrOrder => Ok(DispatchDetails::SelfService),
    }
}
