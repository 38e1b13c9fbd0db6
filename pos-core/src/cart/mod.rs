//! Cart
//!
//! - `CartBuilder`: the sales terminal's in-progress line collection
//! - `ItemConfigurator`: modifier / note / seat / override dialog state
//! - price override gate

mod builder;
mod configurator;
mod error;
pub mod price_override;

pub use builder::{AddOutcome, CartBuilder};
pub use configurator::{ItemConfigurator, apply_selection, default_selection, validate_selection};
pub use error::CartError;
pub use price_override::OverrideRequest;
