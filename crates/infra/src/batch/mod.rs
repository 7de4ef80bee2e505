//! Batch forecasting across a catalog.

mod runner;
mod types;

pub use runner::ForecastRunner;
pub use types::{BatchConfig, BatchError, BatchReport, ProductOutcome, RunId, SortOrder};
