use crate::dispatch::DispatchError;
use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Manager errors
#[derive(Debug, Error, PartialEq)]
pub enum ManagerError {
    #[error("{0}")]
    Validation(String),

    #[error("Cart is empty")]
    EmptyCart,

    #[error("Invalid discount: {0}")]
    InvalidDiscount(String),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error("Order not found: {0}")]
    OrderNotFound(String),

    #[error("Order already completed: {0}")]
    OrderAlreadyCompleted(String),

    #[error("Order already cancelled: {0}")]
    OrderAlreadyCancelled(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

impl ManagerError {
    /// Commit / cancel / recall on a terminal order
    pub fn is_invalid_operation(&self) -> bool {
        matches!(
            self,
            Self::OrderAlreadyCompleted(_) | Self::OrderAlreadyCancelled(_) | Self::InvalidOperation(_)
        )
    }

    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::EmptyCart | Self::InvalidDiscount(_) | Self::Dispatch(_)
        )
    }
}

impl From<ManagerError> for AppError {
    fn from(err: ManagerError) -> Self {
        match err {
            ManagerError::Validation(msg) => AppError::validation(msg),
            ManagerError::EmptyCart => AppError::new(ErrorCode::EmptyCart),
            ManagerError::InvalidDiscount(msg) => AppError::with_message(
                ErrorCode::InvalidDiscount,
                format!("Invalid discount: {}", msg),
            ),
            ManagerError::Dispatch(e) => e.into(),
            ManagerError::OrderNotFound(id) => {
                AppError::with_message(ErrorCode::OrderNotFound, format!("Order not found: {}", id))
                    .with_detail("order_id", id)
            }
            ManagerError::OrderAlreadyCompleted(id) => AppError::with_message(
                ErrorCode::OrderAlreadyCompleted,
                format!("Order already completed: {}", id),
            )
            .with_detail("order_id", id),
            ManagerError::OrderAlreadyCancelled(id) => AppError::with_message(
                ErrorCode::OrderAlreadyCancelled,
                format!("Order already cancelled: {}", id),
            )
            .with_detail("order_id", id),
            ManagerError::InvalidOperation(msg) => {
                AppError::with_message(ErrorCode::InvalidRequest, msg)
            }
        }
    }
}
