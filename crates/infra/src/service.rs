//! Collaborator-facing entry points.

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use stockcast_catalog::{Catalog, Product};
use stockcast_core::{ProductId, SeededRandom};
use stockcast_forecasting::{
    ForecastError, ForecastPipeline, ForecastResult, MetricsAggregator, ProductForecast, SummaryMetrics,
    attention_list,
};

use crate::batch::{BatchConfig, BatchError, BatchReport, ForecastRunner, ProductOutcome, SortOrder};

/// Forecast every product with default settings.
///
/// One outcome per product, in input order. A product that cannot be
/// forecast yields an `Err` outcome; the others are unaffected.
pub fn compute_forecasts(products: &[Product]) -> Vec<ProductOutcome> {
    ForecastRunner::default().run(products).outcomes
}

/// Catalog summary with a non-reproducible placeholder demand figure.
pub fn compute_summary_metrics(products: &[Product]) -> ForecastResult<SummaryMetrics> {
    MetricsAggregator.summarize(products, &mut SeededRandom::from_entropy())
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("product {0} not found")]
    NotFound(ProductId),

    #[error(transparent)]
    Forecast(#[from] ForecastError),

    #[error(transparent)]
    Batch(#[from] BatchError),
}

/// A catalog plus the batch settings used to forecast it.
///
/// Stateless between calls: every method recomputes from the catalog.
#[derive(Debug, Clone)]
pub struct ForecastService {
    catalog: Catalog,
    config: BatchConfig,
}

impl ForecastService {
    pub fn new(catalog: Catalog, config: BatchConfig) -> Self {
        Self { catalog, config }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Forecast the whole catalog.
    pub fn forecast_all(&self, sort: SortOrder) -> BatchReport {
        let config = self.config.clone().with_sort(sort);
        ForecastRunner::new(config).run(self.catalog.products())
    }

    /// Forecast a single product.
    ///
    /// With a fixed seed this matches the product's entry in `forecast_all`.
    pub fn forecast_one(&self, id: &ProductId) -> Result<ProductForecast, ServiceError> {
        let (index, product) = self
            .catalog
            .iter()
            .enumerate()
            .find(|(_, p)| &p.id == id)
            .ok_or_else(|| ServiceError::NotFound(id.clone()))?;

        let seed = self.config.seed.unwrap_or_else(rand::random::<u64>);
        let as_of = self.config.as_of.unwrap_or_else(|| chrono::Utc::now().date_naive());
        let pipeline = ForecastPipeline::new(self.config.history, self.config.engine);

        debug!(product_id = %id, index, seed, "single product forecast");
        let mut rng = SeededRandom::derive(seed, index as u64);
        Ok(pipeline.run(product, as_of, &mut rng)?)
    }

    /// Catalog summary. The placeholder demand figure is seeded when the
    /// service has a seed.
    pub fn summary(&self) -> ForecastResult<SummaryMetrics> {
        let mut rng = match self.config.seed {
            Some(seed) => SeededRandom::from_seed(seed),
            None => SeededRandom::from_entropy(),
        };
        MetricsAggregator.summarize(self.catalog.products(), &mut rng)
    }

    /// The products most in need of a purchase order, largest order first.
    pub fn alerts(&self, limit: usize) -> Vec<ProductForecast> {
        let report = self.forecast_all(SortOrder::Input);
        let forecasts: Vec<ProductForecast> = report.into_forecasts();
        attention_list(&forecasts, limit).into_iter().cloned().collect()
    }

    /// Run `f` against this service on tokio's blocking pool.
    pub async fn blocking<T, F>(self: Arc<Self>, f: F) -> Result<T, ServiceError>
    where
        F: FnOnce(&ForecastService) -> T + Send + 'static,
        T: Send + 'static,
    {
        tokio::task::spawn_blocking(move || f(&self))
            .await
            .map_err(|e| ServiceError::Batch(BatchError::Join(e.to_string())))
    }
}
