//! `stockcast-forecasting`
//!
//! **Responsibility:** the demand-forecasting core.
//!
//! - Synthesizes a per-product demand history (`history`).
//! - Classifies the trend and projects a forward forecast with widening
//!   confidence bounds (`engine`).
//! - Turns projected demand into a reorder recommendation (`reorder`).
//! - Aggregates catalog-wide summary numbers (`metrics`).
//!
//! Everything here is synchronous and side-effect free. Noise comes from an
//! injected [`RandomSource`](stockcast_core::RandomSource); there is no
//! ambient RNG, clock, or shared state.

pub mod attention;
pub mod chart;
pub mod engine;
pub mod error;
pub mod history;
pub mod metrics;
pub mod model;
pub mod pipeline;
pub mod reorder;

pub use attention::{DEFAULT_ATTENTION_LIMIT, attention_list, needs_attention};
pub use chart::{ChartPoint, SeriesKind, chart_series};
pub use engine::{
    EngineSettings, ForecastEngine, MAX_HORIZON_DAYS, MIN_HISTORY_POINTS, confidence_factor, trend_percent,
};
pub use error::{ForecastError, ForecastResult};
pub use history::{HistoricalSeriesGenerator, HistorySettings, MAX_LOOKBACK_DAYS};
pub use metrics::{MetricsAggregator, SummaryMetrics};
pub use model::{ForecastPoint, HistoricalPoint, ProductForecast, Trend};
pub use pipeline::ForecastPipeline;
pub use reorder::ReorderAdvisor;
