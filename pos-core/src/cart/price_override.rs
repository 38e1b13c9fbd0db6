//! 改价校验
//!
//! 改价必须满足：操作员为经理或管理员、原因去空白后至少 3 个字符、
//! 价格可解析为有限数且在 [0, MAX_PRICE] 范围内。

use super::CartError;
use crate::pricing::money::parse_amount;
use crate::utils::validation::{MAX_NOTE_LEN, MAX_PRICE};
use shared::models::Operator;
use shared::order::PriceOverride;

/// Minimum override reason length (after trimming)
pub const MIN_REASON_LEN: usize = 3;

/// Override request as typed by the operator
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OverrideRequest {
    pub price_text: String,
    pub reason: String,
}

impl OverrideRequest {
    pub fn new(price_text: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            price_text: price_text.into(),
            reason: reason.into(),
        }
    }
}

/// Only managers and admins may override
pub fn ensure_can_override(operator: Option<&Operator>) -> Result<(), CartError> {
    match operator {
        Some(op) if op.can_override_price() => Ok(()),
        Some(op) => Err(CartError::OverrideNotAllowed(format!(
            "{} ({:?}) cannot override prices",
            op.name, op.role
        ))),
        None => Err(CartError::OverrideNotAllowed(
            "no operator signed in".to_string(),
        )),
    }
}

fn check_reason(reason: &str) -> Result<String, CartError> {
    let trimmed = reason.trim();
    if trimmed.chars().count() < MIN_REASON_LEN {
        return Err(CartError::InvalidOverride(format!(
            "reason must be at least {} characters",
            MIN_REASON_LEN
        )));
    }
    if trimmed.chars().count() > MAX_NOTE_LEN {
        return Err(CartError::InvalidOverride(format!(
            "reason is too long (max {} characters)",
            MAX_NOTE_LEN
        )));
    }
    Ok(trimmed.to_string())
}

fn check_price(price: f64) -> Result<f64, CartError> {
    if !price.is_finite() {
        return Err(CartError::InvalidOverride("price must be a number".to_string()));
    }
    if price < 0.0 {
        return Err(CartError::InvalidOverride("price must not be negative".to_string()));
    }
    if price > MAX_PRICE {
        return Err(CartError::InvalidOverride(format!(
            "price exceeds maximum allowed value {}",
            MAX_PRICE
        )));
    }
    Ok(price)
}

/// Validate an override request against the catalog price
pub fn parse_override(
    operator: Option<&Operator>,
    request: &OverrideRequest,
    original_price: f64,
) -> Result<PriceOverride, CartError> {
    ensure_can_override(operator)?;
    let reason = check_reason(&request.reason)?;
    let price = parse_amount(&request.price_text)
        .ok_or_else(|| CartError::InvalidOverride("price must be a number".to_string()))?;
    let override_price = check_price(price)?;
    Ok(PriceOverride {
        override_price,
        original_price,
        reason,
    })
}

/// Re-check an override already attached to a line
pub fn check_attached(
    operator: Option<&Operator>,
    attached: &PriceOverride,
) -> Result<(), CartError> {
    ensure_can_override(operator)?;
    check_reason(&attached.reason)?;
    check_price(attached.override_price)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::OperatorRole;

    fn manager() -> Operator {
        Operator::new("op-1", "Sam", OperatorRole::Manager)
    }

    #[test]
    fn test_accepts_manager_comp() {
        let ov = parse_override(
            Some(&manager()),
            &OverrideRequest::new("9.99", "Manager comp"),
            12.99,
        )
        .unwrap();
        assert_eq!(ov.override_price, 9.99);
        assert_eq!(ov.original_price, 12.99);
        assert_eq!(ov.reason, "Manager comp");
    }

    #[test]
    fn test_rejects_short_reason() {
        let err = parse_override(Some(&manager()), &OverrideRequest::new("9.99", " ok "), 12.99)
            .unwrap_err();
        assert!(matches!(err, CartError::InvalidOverride(_)));
    }

    #[test]
    fn test_rejects_non_numeric_price() {
        for text in ["abc", "", "NaN", "inf", "-1"] {
            let err = parse_override(Some(&manager()), &OverrideRequest::new(text, "Comped"), 12.99)
                .unwrap_err();
            assert!(matches!(err, CartError::InvalidOverride(_)), "{text}");
        }
    }

    #[test]
    fn test_rejects_cashier_and_missing_operator() {
        let cashier = Operator::new("op-2", "Jo", OperatorRole::Cashier);
        let req = OverrideRequest::new("1.00", "Regular customer");
        assert!(matches!(
            parse_override(Some(&cashier), &req, 5.0),
            Err(CartError::OverrideNotAllowed(_))
        ));
        assert!(matches!(
            parse_override(None, &req, 5.0),
            Err(CartError::OverrideNotAllowed(_))
        ));
    }

    #[test]
    fn test_zero_price_allowed() {
        let admin = Operator::new("op-3", "Root", OperatorRole::Admin);
        let ov = parse_override(Some(&admin), &OverrideRequest::new("0", "On the house"), 4.99)
            .unwrap();
        assert_eq!(ov.override_price, 0.0);
    }
}
