//! 审计日志后台 Worker
//!
//! 从 mpsc 通道消费 AuditLogRequest，交给 AuditSink。
//! 通道关闭时自动退出。

use parking_lot::Mutex;
use std::sync::Arc;

use super::types::{AuditEntry, AuditLogRequest, AuditSeverity};

/// 审计日志落地点（持久化在核心之外）
pub trait AuditSink: Send + Sync {
    fn record(&self, entry: &AuditEntry);
}

/// Writes every entry to the tracing log
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn record(&self, entry: &AuditEntry) {
        match entry.severity {
            AuditSeverity::High => tracing::warn!(
                audit_id = entry.id,
                action = %entry.action,
                resource_id = %entry.resource_id,
                details = %entry.details,
                "Audit"
            ),
            _ => tracing::info!(
                audit_id = entry.id,
                action = %entry.action,
                severity = %entry.severity,
                resource_id = %entry.resource_id,
                details = %entry.details,
                "Audit"
            ),
        }
    }
}

/// Keeps entries in memory (order list history view, tests)
#[derive(Debug, Default, Clone)]
pub struct MemoryAuditSink {
    entries: Arc<Mutex<Vec<AuditEntry>>>,
}

impl MemoryAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<AuditEntry> {
        self.entries.lock().clone()
    }
}

impl AuditSink for MemoryAuditSink {
    fn record(&self, entry: &AuditEntry) {
        self.entries.lock().push(entry.clone());
    }
}

/// 审计日志后台 Worker
pub struct AuditWorker<S: AuditSink> {
    sink: S,
    next_id: u64,
}

impl<S: AuditSink> AuditWorker<S> {
    pub fn new(sink: S) -> Self {
        Self { sink, next_id: 1 }
    }

    /// 运行 worker（阻塞直到通道关闭）
    pub async fn run(mut self, mut rx: tokio::sync::mpsc::Receiver<AuditLogRequest>) {
        tracing::info!("Audit log worker started");

        while let Some(req) = rx.recv().await {
            let entry = self.stamp(req);
            self.sink.record(&entry);
            tracing::debug!(audit_id = entry.id, action = %entry.action, "Audit entry recorded");
        }

        tracing::info!("Audit log channel closed, worker stopping");
    }

    fn stamp(&mut self, req: AuditLogRequest) -> AuditEntry {
        let id = self.next_id;
        self.next_id += 1;
        AuditEntry {
            id,
            timestamp: shared::util::now_millis(),
            action: req.action,
            severity: req.severity,
            resource_type: req.resource_type,
            resource_id: req.resource_id,
            operator_id: req.operator_id,
            operator_name: req.operator_name,
            details: req.details,
        }
    }
}
