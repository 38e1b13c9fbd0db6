//! Pricing Engine
//!
//! Pure pricing of line items: called on every cart mutation for live
//! display and again by the orders manager on commit.

mod calculator;
pub mod money;

pub use calculator::*;
