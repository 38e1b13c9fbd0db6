//! Free-text address resolution (external service)

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lookup timeout before falling back to manual entry
pub const LOOKUP_TIMEOUT_MS: u64 = 5_000;

/// Postcodes shorter than this are not looked up
pub const MIN_POSTCODE_LEN: usize = 3;

/// Partial address returned by the resolver
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialAddress {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postcode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

impl PartialAddress {
    pub fn is_empty(&self) -> bool {
        self.postcode.is_none() && self.line1.is_none() && self.line2.is_none() && self.city.is_none()
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("No address found for '{0}'")]
    NotFound(String),

    #[error("Address service unavailable: {0}")]
    Unavailable(String),
}

/// Address resolution provider
#[async_trait]
pub trait AddressResolver: Send + Sync {
    async fn resolve(&self, query: &str) -> Result<PartialAddress, ResolveError>;
}
