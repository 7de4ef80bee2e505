//! Strongly-typed identifiers.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a catalog product.
///
/// Catalog ids come from whatever system owns the catalog (ERP, spreadsheet,
/// mock list), so this wraps an opaque string rather than a UUID. Ordering is
/// lexical, which is what callers get when they sort forecasts "by product".
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create an identifier, rejecting empty or whitespace-only input.
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::invalid_id("ProductId: must not be empty"));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the wrapped value is usable as an id.
    ///
    /// Values built through `new`/`from_str` always are; values arriving via
    /// serde are not checked on the way in.
    pub fn is_valid(&self) -> bool {
        !self.0.trim().is_empty()
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ProductId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
