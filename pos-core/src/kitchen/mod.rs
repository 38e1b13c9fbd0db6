//! Kitchen display
//!
//! - [`project`] - pure queue projection
//! - [`KitchenFeed`] - event-driven re-projection for the kitchen screen

mod feed;
mod projection;

pub use feed::KitchenFeed;
pub use projection::{KitchenCourse, KitchenLine, KitchenTicket, TicketSize, project};
