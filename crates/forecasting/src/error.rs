use thiserror::Error;

use stockcast_catalog::Product;
use stockcast_core::{DomainError, ProductId};

pub type ForecastResult<T> = Result<T, ForecastError>;

/// Failure of a forecasting computation.
///
/// All variants are deterministic conditions on the input; retrying the same
/// call with the same input fails the same way.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ForecastError {
    /// The historical series is empty or too short for trend detection.
    #[error("insufficient history for product {product_id}: {points} point(s), need at least {required}")]
    InsufficientData {
        product_id: ProductId,
        points: usize,
        required: usize,
    },

    /// The product failed validation (negative stock, price, ...).
    #[error("invalid product {product_id}: {reason}")]
    InvalidProduct { product_id: ProductId, reason: String },

    /// Generator/engine settings are unusable (zero cadence, a window outside
    /// `1..=3650` days) or push a date past the calendar.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}

impl ForecastError {
    pub fn invalid_settings(msg: impl Into<String>) -> Self {
        Self::InvalidSettings(msg.into())
    }

    /// Stable machine-readable code (used by the HTTP layer and batch reports).
    pub fn code(&self) -> &'static str {
        match self {
            ForecastError::InsufficientData { .. } => "forecast_unavailable",
            ForecastError::InvalidProduct { .. } => "invalid_product",
            ForecastError::InvalidSettings(_) => "invalid_settings",
        }
    }
}

/// Validate a product, mapping the domain error into `InvalidProduct`.
pub(crate) fn ensure_valid(product: &Product) -> ForecastResult<()> {
    product.validate().map_err(|e| {
        let reason = match e {
            DomainError::Validation(msg) | DomainError::InvalidId(msg) | DomainError::Conflict(msg) => msg,
        };
        ForecastError::InvalidProduct {
            product_id: product.id.clone(),
            reason,
        }
    })
}
