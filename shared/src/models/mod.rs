//! Data models
//!
//! Reference data the order core reads but never writes: the menu catalog,
//! CRM customer records and the operator at the terminal.

pub mod customer;
pub mod menu;
pub mod operator;

// Re-exports
pub use customer::*;
pub use menu::*;
pub use operator::*;
