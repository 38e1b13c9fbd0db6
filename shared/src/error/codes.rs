//! Unified error codes for the POS order core
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 2xxx: Permission errors
//! - 4xxx: Order errors
//! - 6xxx: Product errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility with the presentation surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Invalid request
    InvalidRequest = 5,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Operator role may not override prices
    PriceOverrideNotAllowed = 2010,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Order already completed
    OrderAlreadyCompleted = 4002,
    /// Order already cancelled
    OrderAlreadyCancelled = 4003,
    /// Cart has no lines
    EmptyCart = 4004,
    /// Cart line index out of range
    LineNotFound = 4005,
    /// Discount is negative or not a number
    InvalidDiscount = 4007,
    /// Dispatch details incomplete for the dispatch type
    DispatchDetailsInvalid = 4008,

    // ==================== 6xxx: Product ====================
    /// Menu item not found
    ProductNotFound = 6001,
    /// Requested quantity exceeds remaining stock
    StockExceeded = 6002,
    /// Price override rejected (reason or price invalid)
    InvalidPriceOverride = 6003,
    /// Modifier not found on the menu item
    ModifierNotFound = 6004,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
}

impl ErrorCode {
    /// Get the numeric code
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Default human-readable message
    pub const fn message(&self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Unknown => "Unknown error",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::InvalidRequest => "Invalid request",
            Self::RequiredField => "Required field missing",
            Self::ValueOutOfRange => "Value out of range",

            Self::PermissionDenied => "Permission denied",
            Self::PriceOverrideNotAllowed => "Price override requires a manager",

            Self::OrderNotFound => "Order not found",
            Self::OrderAlreadyCompleted => "Order already completed",
            Self::OrderAlreadyCancelled => "Order already cancelled",
            Self::EmptyCart => "Cart is empty",
            Self::LineNotFound => "Cart line not found",
            Self::InvalidDiscount => "Invalid discount",
            Self::DispatchDetailsInvalid => "Dispatch details incomplete",

            Self::ProductNotFound => "Menu item not found",
            Self::StockExceeded => "Not enough stock",
            Self::InvalidPriceOverride => "Invalid price override",
            Self::ModifierNotFound => "Modifier not found",

            Self::InternalError => "Internal error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when converting an unknown u16 into [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            0 => Self::Success,
            1 => Self::Unknown,
            2 => Self::ValidationFailed,
            3 => Self::NotFound,
            5 => Self::InvalidRequest,
            7 => Self::RequiredField,
            8 => Self::ValueOutOfRange,
            2001 => Self::PermissionDenied,
            2010 => Self::PriceOverrideNotAllowed,
            4001 => Self::OrderNotFound,
            4002 => Self::OrderAlreadyCompleted,
            4003 => Self::OrderAlreadyCancelled,
            4004 => Self::EmptyCart,
            4005 => Self::LineNotFound,
            4007 => Self::InvalidDiscount,
            4008 => Self::DispatchDetailsInvalid,
            6001 => Self::ProductNotFound,
            6002 => Self::StockExceeded,
            6003 => Self::InvalidPriceOverride,
            6004 => Self::ModifierNotFound,
            9001 => Self::InternalError,
            other => return Err(InvalidErrorCode(other)),
        };
        Ok(code)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::OrderNotFound.code(), 4001);
        assert_eq!(ErrorCode::StockExceeded.code(), 6002);
        assert_eq!(ErrorCode::InternalError.code(), 9001);
    }

    #[test]
    fn test_try_from_valid() {
        assert_eq!(ErrorCode::try_from(6002), Ok(ErrorCode::StockExceeded));
        assert_eq!(ErrorCode::try_from(4008), Ok(ErrorCode::DispatchDetailsInvalid));
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(4999), Err(InvalidErrorCode(4999)));
        // Sent lines are silent no-ops, no error code for them
        assert_eq!(ErrorCode::try_from(4006), Err(InvalidErrorCode(4006)));
    }

    #[test]
    fn test_serialize_as_number() {
        let json = serde_json::to_string(&ErrorCode::OrderNotFound).unwrap();
        assert_eq!(json, "4001");
        let code: ErrorCode = serde_json::from_str("6003").unwrap();
        assert_eq!(code, ErrorCode::InvalidPriceOverride);
        assert!(serde_json::from_str::<ErrorCode>("12345").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(ErrorCode::ValidationFailed.to_string(), "E0002");
        assert_eq!(ErrorCode::OrderNotFound.to_string(), "E4001");
    }
}
