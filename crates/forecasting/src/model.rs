use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use stockcast_core::ProductId;

/// One sampled day of observed (or synthesized) demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoricalPoint {
    pub date: NaiveDate,
    pub actual_quantity: u32,
}

impl HistoricalPoint {
    pub fn new(date: NaiveDate, actual_quantity: u32) -> Self {
        Self {
            date,
            actual_quantity,
        }
    }
}

/// One projected day, with a heuristic confidence band.
///
/// Invariant: `lower_bound <= forecast_quantity <= upper_bound`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub forecast_quantity: u32,
    pub lower_bound: u32,
    pub upper_bound: u32,
}

/// Coarse direction of recent demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Increase,
    Decrease,
    Stable,
}

impl Trend {
    /// Classify a percentage change. Values exactly at `±threshold` are stable.
    pub fn classify(trend_percent: f64, threshold: f64) -> Self {
        if trend_percent > threshold {
            Trend::Increase
        } else if trend_percent < -threshold {
            Trend::Decrease
        } else {
            Trend::Stable
        }
    }

    /// Human-facing label.
    pub fn label(&self) -> &'static str {
        match self {
            Trend::Increase => "Increasing",
            Trend::Decrease => "Decreasing",
            Trend::Stable => "Stable",
        }
    }
}

impl core::fmt::Display for Trend {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            Trend::Increase => "increase",
            Trend::Decrease => "decrease",
            Trend::Stable => "stable",
        };
        f.write_str(s)
    }
}

/// Forecast view for one product. Recomputed per request, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductForecast {
    pub product_id: ProductId,
    pub product_name: String,
    pub current_stock: i64,
    pub reorder_point: i64,
    /// Sum of `forecast_quantity` over the emitted forecast points.
    pub forecasted_demand_total: u64,
    pub recommended_order_quantity: u64,
    pub trend: Trend,
    /// Mock confidence score in `[85, 94]`; not derived from the bound math.
    pub confidence_percent: u8,
    pub historical: Vec<HistoricalPoint>,
    pub forecast: Vec<ForecastPoint>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_boundaries_are_stable() {
        assert_eq!(Trend::classify(5.0, 5.0), Trend::Stable);
        assert_eq!(Trend::classify(-5.0, 5.0), Trend::Stable);
        assert_eq!(Trend::classify(0.0, 5.0), Trend::Stable);
        assert_eq!(Trend::classify(5.0001, 5.0), Trend::Increase);
        assert_eq!(Trend::classify(-5.0001, 5.0), Trend::Decrease);
    }

    #[test]
    fn trend_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Trend::Increase).unwrap(), "\"increase\"");
        assert_eq!(Trend::Decrease.to_string(), "decrease");
        assert_eq!(Trend::Stable.label(), "Stable");
    }
}
