//! Dispatch details
//!
//! - `DispatchDraft`: raw form input with per-field provenance
//! - `resolve`: draft → typed `DispatchDetails` (commit gate)
//! - `DispatchForm`: CRM auto-fill and async address lookups
//! - `CustomerDirectory` / `AddressResolver`: external collaborators

mod directory;
mod draft;
mod error;
mod form;
pub mod lookup;
mod resolve;

pub use directory::{CustomerDirectory, InMemoryDirectory};
pub use draft::{DispatchDraft, DraftField, FieldSource};
pub use error::DispatchError;
pub use form::{DispatchForm, LookupOutcome, LookupTicket, PostcodeLookup};
pub use lookup::{AddressResolver, PartialAddress, ResolveError};
pub use resolve::resolve;
