//! Order types
//!
//! - Line items and dispatch details (`types`)
//! - The canonical order record and its status machine (`snapshot`)
//! - Change notifications broadcast after every mutation (`event`)

pub mod event;
pub mod snapshot;
pub mod types;

// Re-exports
pub use event::{OrderEvent, OrderEventPayload};
pub use snapshot::{Order, OrderStatus};
pub use types::*;
