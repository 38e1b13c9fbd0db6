use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Cart errors
#[derive(Debug, Error, PartialEq)]
pub enum CartError {
    #[error("{0}")]
    Validation(String),

    #[error("Not enough stock for {item}: requested {requested}, available {available}")]
    StockExceeded {
        item: String,
        requested: i32,
        available: i32,
    },

    #[error("Menu item not found: {0}")]
    ItemNotFound(String),

    #[error("Cart line not found: {0}")]
    LineNotFound(String),

    #[error("Modifier not found: {0}")]
    ModifierNotFound(String),

    #[error("Price override not allowed: {0}")]
    OverrideNotAllowed(String),

    #[error("Invalid price override: {0}")]
    InvalidOverride(String),
}

impl From<CartError> for AppError {
    fn from(err: CartError) -> Self {
        let message = err.to_string();
        match err {
            CartError::Validation(_) => AppError::validation(message),
            CartError::StockExceeded {
                item,
                requested,
                available,
            } => AppError::with_message(ErrorCode::StockExceeded, message)
                .with_detail("item", item)
                .with_detail("requested", requested)
                .with_detail("available", available),
            CartError::ItemNotFound(id) => {
                AppError::with_message(ErrorCode::ProductNotFound, message).with_detail("item_id", id)
            }
            CartError::LineNotFound(id) => {
                AppError::with_message(ErrorCode::LineNotFound, message).with_detail("line_id", id)
            }
            CartError::ModifierNotFound(id) => {
                AppError::with_message(ErrorCode::ModifierNotFound, message)
                    .with_detail("modifier_id", id)
            }
            CartError::OverrideNotAllowed(_) => {
                AppError::with_message(ErrorCode::PriceOverrideNotAllowed, message)
            }
            CartError::InvalidOverride(_) => {
                AppError::with_message(ErrorCode::InvalidPriceOverride, message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_exceeded_carries_details() {
        let err: AppError = CartError::StockExceeded {
            item: "Margherita Pizza".to_string(),
            requested: 3,
            available: 2,
        }
        .into();
        assert_eq!(err.code, ErrorCode::StockExceeded);
        assert_eq!(err.detail("available").and_then(|v| v.as_i64()), Some(2));
        assert!(err.message.contains("requested 3"));
    }

    #[test]
    fn test_override_errors_map_to_codes() {
        let err: AppError = CartError::InvalidOverride("bad".into()).into();
        assert_eq!(err.code, ErrorCode::InvalidPriceOverride);
        let err: AppError = CartError::OverrideNotAllowed("cashier".into()).into();
        assert_eq!(err.code, ErrorCode::PriceOverrideNotAllowed);
    }
}
