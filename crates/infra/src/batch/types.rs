//! Batch configuration and report types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use stockcast_core::ProductId;
use stockcast_forecasting::{EngineSettings, ForecastError, HistorySettings, ProductForecast};

/// Identifier of one batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(pub Uuid);

impl RunId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Presentation order of a batch's outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Same order as the input products.
    #[default]
    Input,
    /// Lexical product id.
    ProductId,
    /// Largest recommended order first; failures last.
    RecommendedOrderDesc,
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "input" => Ok(SortOrder::Input),
            "product" | "product_id" => Ok(SortOrder::ProductId),
            "order" | "recommended_order" => Ok(SortOrder::RecommendedOrderDesc),
            other => Err(format!("unknown sort order '{other}' (expected input, product, order)")),
        }
    }
}

/// Batch runner configuration.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Upper bound on worker threads.
    pub max_workers: usize,
    /// Base seed. `None` draws a fresh one per run (reported back).
    pub seed: Option<u64>,
    /// Reference date for history synthesis. `None` means today (UTC).
    pub as_of: Option<NaiveDate>,
    pub history: HistorySettings,
    pub engine: EngineSettings,
    pub sort: SortOrder,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_workers: 4,
            seed: None,
            as_of: None,
            history: HistorySettings::default(),
            engine: EngineSettings::default(),
            sort: SortOrder::Input,
        }
    }
}

impl BatchConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_as_of(mut self, as_of: NaiveDate) -> Self {
        self.as_of = Some(as_of);
        self
    }

    pub fn with_max_workers(mut self, max: usize) -> Self {
        self.max_workers = max;
        self
    }

    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_history(mut self, history: HistorySettings) -> Self {
        self.history = history;
        self
    }

    pub fn with_engine(mut self, engine: EngineSettings) -> Self {
        self.engine = engine;
        self
    }
}

/// Forecast outcome for one product of a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductOutcome {
    /// Position of the product in the batch input.
    pub index: usize,
    pub product_id: ProductId,
    pub result: Result<ProductForecast, ForecastError>,
}

impl ProductOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    pub fn forecast(&self) -> Option<&ProductForecast> {
        self.result.as_ref().ok()
    }

    pub fn error(&self) -> Option<&ForecastError> {
        self.result.as_ref().err()
    }
}

/// Result of one batch run.
#[derive(Debug, Clone)]
pub struct BatchReport {
    pub run_id: RunId,
    pub generated_at: DateTime<Utc>,
    pub as_of: NaiveDate,
    /// Seed the run used; pass it back in to reproduce the run.
    pub seed: u64,
    pub outcomes: Vec<ProductOutcome>,
}

impl BatchReport {
    pub fn forecasts(&self) -> impl Iterator<Item = &ProductForecast> {
        self.outcomes.iter().filter_map(ProductOutcome::forecast)
    }

    pub fn failures(&self) -> impl Iterator<Item = &ProductOutcome> {
        self.outcomes.iter().filter(|o| !o.is_ok())
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    pub fn into_forecasts(self) -> Vec<ProductForecast> {
        self.outcomes.into_iter().filter_map(|o| o.result.ok()).collect()
    }
}

#[derive(Debug, Error)]
pub enum BatchError {
    /// The blocking task running the batch did not complete.
    #[error("forecast batch task failed: {0}")]
    Join(String),
}
