//! 审计日志模块
//!
//! - `types`: AuditAction / AuditSeverity / AuditEntry
//! - `service`: fire-and-forget 写入端
//! - `worker`: 后台消费并交给 AuditSink

mod service;
mod types;
mod worker;

pub use service::AuditService;
pub use types::{AuditAction, AuditEntry, AuditLogRequest, AuditSeverity};
pub use worker::{AuditSink, AuditWorker, MemoryAuditSink, TracingAuditSink};
