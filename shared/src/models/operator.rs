//! Operator Model

use serde::{Deserialize, Serialize};

/// Staff role at the terminal
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperatorRole {
    Manager,
    Cashier,
    Chef,
    Admin,
}

/// Authenticated operator (PIN lookup happens outside the core)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Operator {
    pub id: String,
    pub name: String,
    pub role: OperatorRole,
}

impl Operator {
    pub fn new(id: impl Into<String>, name: impl Into<String>, role: OperatorRole) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role,
        }
    }

    /// 只有经理和管理员可以改价
    pub fn can_override_price(&self) -> bool {
        matches!(self.role, OperatorRole::Manager | OperatorRole::Admin)
    }
}
