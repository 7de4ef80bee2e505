use serde::{Deserialize, Serialize};

use stockcast_core::{DomainError, Entity, ProductId};

/// A catalog product with its current stock position.
///
/// Numeric fields are signed so that negative input from collaborators
/// (uploads, external catalogs) can be represented and rejected by `validate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub sku: String,
    /// Unit price in currency units.
    pub price: f64,
    /// Units currently on hand.
    pub stock: i64,
    /// Stock level at or below which the product counts as low-stock.
    pub reorder_point: i64,
    pub supplier: String,
    pub lead_time_days: i64,
}

impl Product {
    /// Check the numeric invariants the forecasting core relies on.
    pub fn validate(&self) -> Result<(), DomainError> {
        if !self.id.is_valid() {
            return Err(DomainError::invalid_id("product id cannot be empty"));
        }
        if !self.price.is_finite() {
            return Err(DomainError::validation("price must be a finite number"));
        }
        if self.price < 0.0 {
            return Err(DomainError::validation("price cannot be negative"));
        }
        if self.stock < 0 {
            return Err(DomainError::validation("stock cannot be negative"));
        }
        if self.reorder_point < 0 {
            return Err(DomainError::validation("reorder point cannot be negative"));
        }
        if self.lead_time_days < 0 {
            return Err(DomainError::validation("lead time cannot be negative"));
        }
        Ok(())
    }

    /// At or below the reorder point.
    pub fn is_low_stock(&self) -> bool {
        self.stock <= self.reorder_point
    }

    /// `price * stock` for this product.
    pub fn inventory_value(&self) -> f64 {
        self.price * self.stock as f64
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
