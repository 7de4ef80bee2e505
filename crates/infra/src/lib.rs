//! Infrastructure layer: batch execution and the collaborator-facing entry
//! points.
//!
//! The forecasting core is synchronous and per-product. This crate fans it out
//! over a catalog (worker threads, per-product outcomes, reproducible seeds)
//! and offers an async wrapper for callers living on a tokio runtime.

pub mod batch;
pub mod service;

pub use batch::{
    BatchConfig, BatchError, BatchReport, ForecastRunner, ProductOutcome, RunId, SortOrder,
};
pub use service::{ForecastService, ServiceError, compute_forecasts, compute_summary_metrics};
