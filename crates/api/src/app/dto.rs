use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use stockcast_core::ProductId;
use stockcast_forecasting::{ChartPoint, ProductForecast, Trend};
use stockcast_infra::BatchReport;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Default, Deserialize)]
pub struct ForecastsQuery {
    /// `input` (default), `product`, or `order`.
    pub sort: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AlertsQuery {
    pub limit: Option<usize>,
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize, Deserialize)]
pub struct ForecastFailure {
    pub product_id: ProductId,
    pub error: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BatchReportResponse {
    pub run_id: String,
    pub generated_at: DateTime<Utc>,
    pub as_of: NaiveDate,
    pub seed: u64,
    pub forecasts: Vec<ProductForecast>,
    pub failures: Vec<ForecastFailure>,
}

impl From<BatchReport> for BatchReportResponse {
    fn from(report: BatchReport) -> Self {
        let mut forecasts = Vec::with_capacity(report.outcomes.len());
        let mut failures = Vec::new();
        for o in report.outcomes {
            match o.result {
                Ok(f) => forecasts.push(f),
                Err(e) => failures.push(ForecastFailure {
                    product_id: o.product_id,
                    error: e.code().to_string(),
                    message: e.to_string(),
                }),
            }
        }
        Self {
            run_id: report.run_id.to_string(),
            generated_at: report.generated_at,
            as_of: report.as_of,
            seed: report.seed,
            forecasts,
            failures,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AlertResponse {
    pub product_id: ProductId,
    pub product_name: String,
    pub current_stock: i64,
    pub reorder_point: i64,
    pub recommended_order_quantity: u64,
    pub trend: Trend,
    pub trend_label: String,
}

impl From<&ProductForecast> for AlertResponse {
    fn from(f: &ProductForecast) -> Self {
        Self {
            product_id: f.product_id.clone(),
            product_name: f.product_name.clone(),
            current_stock: f.current_stock,
            reorder_point: f.reorder_point,
            recommended_order_quantity: f.recommended_order_quantity,
            trend: f.trend,
            trend_label: f.trend.label().to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChartResponse {
    pub product_id: ProductId,
    pub product_name: String,
    pub trend: Trend,
    pub confidence_percent: u8,
    pub points: Vec<ChartPoint>,
}
