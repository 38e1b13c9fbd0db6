//! 审计日志服务
//!
//! 通过有界 mpsc 通道把日志请求交给后台 worker。写入方永不阻塞：
//! 通道满或已关闭时只记录 warn，不向调用方返回错误。

use std::sync::Arc;
use tokio::sync::mpsc;

use super::types::{AuditAction, AuditLogRequest, AuditSeverity};
use shared::models::Operator;

/// 审计日志服务
#[derive(Debug, Clone)]
pub struct AuditService {
    tx: mpsc::Sender<AuditLogRequest>,
}

impl AuditService {
    /// 创建审计服务，返回服务与 worker 使用的接收端
    pub fn new(buffer_size: usize) -> (Arc<Self>, mpsc::Receiver<AuditLogRequest>) {
        let (tx, rx) = mpsc::channel(buffer_size.max(1));
        (Arc::new(Self { tx }), rx)
    }

    /// 写入审计日志（fire-and-forget）
    pub fn log(&self, req: AuditLogRequest) {
        let action = req.action;
        match self.tx.try_send(req) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(_)) => {
                tracing::warn!(action = %action, "Audit channel full, entry dropped");
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                tracing::warn!(action = %action, "Audit channel closed, entry dropped");
            }
        }
    }

    /// Accepted manual price override on a cart line
    pub fn price_override(
        &self,
        operator: Option<&Operator>,
        line_id: &str,
        item_name: &str,
        original_price: f64,
        new_price: f64,
        reason: &str,
    ) {
        self.log(AuditLogRequest {
            action: AuditAction::PriceOverride,
            severity: AuditSeverity::Medium,
            resource_type: "cart_line".to_string(),
            resource_id: line_id.to_string(),
            operator_id: operator.map(|o| o.id.clone()),
            operator_name: operator.map(|o| o.name.clone()),
            details: serde_json::json!({
                "action": AuditAction::PriceOverride.label(),
                "item": item_name,
                "original_price": original_price,
                "new_price": new_price,
                "reason": reason,
            }),
        });
    }

    /// Order event with the given action against `order_id`
    pub fn order_event(
        &self,
        action: AuditAction,
        severity: AuditSeverity,
        order_id: &str,
        details: serde_json::Value,
    ) {
        self.log(AuditLogRequest {
            action,
            severity,
            resource_type: "order".to_string(),
            resource_id: order_id.to_string(),
            operator_id: None,
            operator_name: None,
            details,
        });
    }
}
