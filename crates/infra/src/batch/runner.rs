//! Thread fan-out for per-product forecasts.

use std::cmp::Ordering;
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use chrono::Utc;
use tracing::{debug, info, warn};

use stockcast_catalog::Product;
use stockcast_core::SeededRandom;
use stockcast_forecasting::ForecastPipeline;

use super::types::{BatchConfig, BatchError, BatchReport, ProductOutcome, RunId, SortOrder};

/// Runs the forecasting pipeline over many products.
///
/// - Fan-out: products are split into contiguous chunks, one scoped thread per
///   chunk, at most `max_workers` threads.
/// - Isolation: a failing product yields an `Err` outcome; the rest of the
///   batch is unaffected.
/// - Reproducibility: product `i` draws from `SeededRandom::derive(seed, i)`,
///   so the same seed gives the same report regardless of worker count.
#[derive(Debug, Clone, Default)]
pub struct ForecastRunner {
    config: BatchConfig,
}

impl ForecastRunner {
    pub fn new(config: BatchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Forecast every product.
    pub fn run(&self, products: &[Product]) -> BatchReport {
        let run_id = RunId::new();
        let seed = self.config.seed.unwrap_or_else(rand::random::<u64>);
        let as_of = self.config.as_of.unwrap_or_else(|| Utc::now().date_naive());
        let pipeline = ForecastPipeline::new(self.config.history, self.config.engine);
        let started = Instant::now();

        info!(run_id = %run_id, products = products.len(), seed, as_of = %as_of, "forecast batch started");

        let mut outcomes = fan_out(products, self.config.max_workers, |index, product| {
            let mut rng = SeededRandom::derive(seed, index as u64);
            ProductOutcome {
                index,
                product_id: product.id.clone(),
                result: pipeline.run(product, as_of, &mut rng),
            }
        });

        for o in &outcomes {
            if let Some(e) = o.error() {
                warn!(run_id = %run_id, product_id = %o.product_id, error = %e, "forecast unavailable");
            }
        }

        sort_outcomes(&mut outcomes, self.config.sort);

        let report = BatchReport {
            run_id,
            generated_at: Utc::now(),
            as_of,
            seed,
            outcomes,
        };

        info!(
            run_id = %run_id,
            succeeded = report.succeeded(),
            failed = report.failed(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "forecast batch finished"
        );

        report
    }

    /// Run the batch on tokio's blocking pool.
    pub async fn run_async(self: Arc<Self>, products: Vec<Product>) -> Result<BatchReport, BatchError> {
        tokio::task::spawn_blocking(move || self.run(&products))
            .await
            .map_err(|e| BatchError::Join(e.to_string()))
    }
}

/// Apply `work` to every product across scoped threads; results come back in
/// input order.
fn fan_out<F>(products: &[Product], max_workers: usize, work: F) -> Vec<ProductOutcome>
where
    F: Fn(usize, &Product) -> ProductOutcome + Sync,
{
    if products.is_empty() {
        return Vec::new();
    }

    let workers = max_workers.clamp(1, products.len());
    let chunk_size = products.len().div_ceil(workers);
    debug!(workers, chunk_size, "fanning out forecasts");

    if workers == 1 {
        return products.iter().enumerate().map(|(i, p)| work(i, p)).collect();
    }

    let work = &work;
    let mut outcomes: Vec<ProductOutcome> = thread::scope(|s| {
        let handles: Vec<_> = products
            .chunks(chunk_size)
            .enumerate()
            .map(|(chunk, slice)| {
                let offset = chunk * chunk_size;
                s.spawn(move || {
                    slice
                        .iter()
                        .enumerate()
                        .map(|(i, p)| work(offset + i, p))
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        handles
            .into_iter()
            .flat_map(|h| match h.join() {
                Ok(chunk) => chunk,
                Err(panic) => std::panic::resume_unwind(panic),
            })
            .collect()
    });

    outcomes.sort_by_key(|o| o.index);
    outcomes
}

fn sort_outcomes(outcomes: &mut [ProductOutcome], order: SortOrder) {
    match order {
        SortOrder::Input => outcomes.sort_by_key(|o| o.index),
        SortOrder::ProductId => outcomes.sort_by(|a, b| a.product_id.cmp(&b.product_id)),
        SortOrder::RecommendedOrderDesc => outcomes.sort_by(|a, b| match (a.forecast(), b.forecast()) {
            (Some(x), Some(y)) => y.recommended_order_quantity.cmp(&x.recommended_order_quantity),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => a.index.cmp(&b.index),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use stockcast_catalog::Catalog;
    use stockcast_core::ProductId;
    use stockcast_forecasting::{ForecastError, HistorySettings};

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()
    }

    fn config() -> BatchConfig {
        BatchConfig::default().with_seed(42).with_as_of(as_of())
    }

    fn bad_product() -> Product {
        let mut p = Catalog::sample().products()[0].clone();
        p.id = ProductId::new("bad").unwrap();
        p.stock = -10;
        p
    }

    #[test]
    fn one_outcome_per_product_in_input_order() {
        let catalog = Catalog::sample();
        let report = ForecastRunner::new(config()).run(catalog.products());

        assert_eq!(report.outcomes.len(), 10);
        assert_eq!(report.succeeded(), 10);
        assert_eq!(report.seed, 42);
        for (i, (o, p)) in report.outcomes.iter().zip(catalog.iter()).enumerate() {
            assert_eq!(o.index, i);
            assert_eq!(o.product_id, p.id);
        }
    }

    #[test]
    fn worker_count_does_not_change_results() {
        let catalog = Catalog::sample();
        let single = ForecastRunner::new(config().with_max_workers(1)).run(catalog.products());
        let many = ForecastRunner::new(config().with_max_workers(8)).run(catalog.products());

        let a: Vec<_> = single.outcomes.into_iter().map(|o| o.result).collect();
        let b: Vec<_> = many.outcomes.into_iter().map(|o| o.result).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn failing_product_does_not_abort_the_batch() {
        let mut products = Catalog::sample().into_products();
        products.insert(3, bad_product());

        let report = ForecastRunner::new(config()).run(&products);
        assert_eq!(report.outcomes.len(), 11);
        assert_eq!(report.failed(), 1);

        let failed = report.failures().next().unwrap();
        assert_eq!(failed.index, 3);
        assert!(matches!(failed.error(), Some(ForecastError::InvalidProduct { .. })));
    }

    #[test]
    fn insufficient_history_is_reported_per_product() {
        let cfg = config().with_history(HistorySettings::new(14, 7).unwrap());
        let report = ForecastRunner::new(cfg).run(Catalog::sample().products());
        assert_eq!(report.failed(), 10);
        assert!(report
            .failures()
            .all(|o| matches!(o.error(), Some(ForecastError::InsufficientData { points: 2, .. }))));
    }

    #[test]
    fn sorts_by_recommended_order_with_failures_last() {
        let mut products = Catalog::sample().into_products();
        products.insert(0, bad_product());

        let report = ForecastRunner::new(config().with_sort(SortOrder::RecommendedOrderDesc)).run(&products);
        let orders: Vec<u64> = report.forecasts().map(|f| f.recommended_order_quantity).collect();
        assert!(orders.windows(2).all(|w| w[0] >= w[1]));
        assert!(!report.outcomes.last().unwrap().is_ok());
    }

    #[test]
    fn sorts_by_product_id() {
        let report = ForecastRunner::new(config().with_sort(SortOrder::ProductId)).run(Catalog::sample().products());
        let ids: Vec<&str> = report.outcomes.iter().map(|o| o.product_id.as_str()).collect();
        assert_eq!(ids, vec!["1", "10", "2", "3", "4", "5", "6", "7", "8", "9"]);
    }

    #[test]
    fn empty_input_yields_empty_report() {
        let report = ForecastRunner::new(config()).run(&[]);
        assert!(report.outcomes.is_empty());
        assert_eq!(report.succeeded(), 0);
    }

    #[test]
    fn parses_sort_order() {
        assert_eq!("order".parse::<SortOrder>(), Ok(SortOrder::RecommendedOrderDesc));
        assert_eq!("Product".parse::<SortOrder>(), Ok(SortOrder::ProductId));
        assert!("price".parse::<SortOrder>().is_err());
    }

    #[tokio::test]
    async fn async_wrapper_matches_sync_run() {
        let runner = Arc::new(ForecastRunner::new(config()));
        let products = Catalog::sample().into_products();

        let sync = runner.run(&products);
        let r = Arc::clone(&runner).run_async(products).await.unwrap();

        let a: Vec<_> = sync.outcomes.into_iter().map(|o| o.result).collect();
        let b: Vec<_> = r.outcomes.into_iter().map(|o| o.result).collect();
        assert_eq!(a, b);
    }
}
