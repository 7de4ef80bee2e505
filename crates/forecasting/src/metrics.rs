//! Catalog-wide summary numbers.

use serde::{Deserialize, Serialize};
use tracing::debug;

use stockcast_catalog::Product;
use stockcast_core::RandomSource;

use crate::error::{ForecastResult, ensure_valid};
use crate::model::ProductForecast;

/// Dashboard summary. Recomputed on every call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryMetrics {
    pub total_products: usize,
    /// Products with `stock <= reorder_point`.
    pub low_stock_count: usize,
    /// Sum of `price * stock`.
    pub total_inventory_value: f64,
    /// Placeholder figure in `[300, 500)`. Use
    /// [`MetricsAggregator::average_forecast_demand`] for a derived value.
    pub average_monthly_demand: u32,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsAggregator;

impl MetricsAggregator {
    /// Summarize `products`. Fails on the first invalid product.
    pub fn summarize<R>(&self, products: &[Product], rng: &mut R) -> ForecastResult<SummaryMetrics>
    where
        R: RandomSource + ?Sized,
    {
        for p in products {
            ensure_valid(p)?;
        }

        let total_products = products.len();
        let low_stock_count = products.iter().filter(|p| p.is_low_stock()).count();
        let total_inventory_value: f64 = products.iter().map(Product::inventory_value).sum();
        let average_monthly_demand = 300 + rng.below(200);

        debug!(total_products, low_stock_count, total_inventory_value, "summary metrics computed");

        Ok(SummaryMetrics {
            total_products,
            low_stock_count,
            total_inventory_value,
            average_monthly_demand,
        })
    }

    /// Mean `forecasted_demand_total` across forecasts (one horizon's worth
    /// of demand per product). `None` for an empty slice.
    pub fn average_forecast_demand(&self, forecasts: &[ProductForecast]) -> Option<f64> {
        if forecasts.is_empty() {
            return None;
        }
        let total: u64 = forecasts.iter().map(|f| f.forecasted_demand_total).sum();
        Some(total as f64 / forecasts.len() as f64)
    }
}
