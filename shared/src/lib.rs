//! Shared types for the POS order core
//!
//! Serializable data model consumed by the engine (`pos-core`) and by every
//! presentation surface: menu catalog records, CRM customers, orders and
//! their dispatch details, plus the unified error codes.

pub mod error;
pub mod models;
pub mod order;
pub mod util;

// Re-exports
pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use serde::{Deserialize, Serialize};
