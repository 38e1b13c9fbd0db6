//! 审计日志类型定义

use serde::{Deserialize, Serialize};

/// 审计操作类型（枚举，非自由文本）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    // ═══ 购物车 ═══
    /// 手动改价
    PriceOverride,

    // ═══ 订单 ═══
    /// 订单提交（新建或追加）
    OrderCommitted,
    /// 订单状态变更
    OrderStatusChanged,
    /// 订单取消
    OrderCancelled,
}

impl AuditAction {
    /// Human readable action name carried in the audit record
    pub fn label(&self) -> &'static str {
        match self {
            Self::PriceOverride => "Price Override",
            Self::OrderCommitted => "Order Committed",
            Self::OrderStatusChanged => "Order Status Changed",
            Self::OrderCancelled => "Order Cancelled",
        }
    }
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// 严重程度
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditSeverity {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for AuditSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => f.write_str("low"),
            Self::Medium => f.write_str("medium"),
            Self::High => f.write_str("high"),
        }
    }
}

/// 发送到 AuditService 的日志请求
#[derive(Debug, Clone)]
pub struct AuditLogRequest {
    pub action: AuditAction,
    pub severity: AuditSeverity,
    /// 资源类型（如 "order", "cart_line"）
    pub resource_type: String,
    pub resource_id: String,
    pub operator_id: Option<String>,
    pub operator_name: Option<String>,
    pub details: serde_json::Value,
}

/// 审计日志条目（不可变）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuditEntry {
    /// 递增序列号（每个 worker 内唯一）
    pub id: u64,
    /// 时间戳（Unix 毫秒）
    pub timestamp: i64,
    pub action: AuditAction,
    pub severity: AuditSeverity,
    pub resource_type: String,
    pub resource_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator_name: Option<String>,
    /// 结构化详情（JSON）
    pub details: serde_json::Value,
}
