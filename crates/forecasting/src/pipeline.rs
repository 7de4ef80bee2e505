use chrono::NaiveDate;

use stockcast_catalog::Product;
use stockcast_core::RandomSource;

use crate::engine::{EngineSettings, ForecastEngine};
use crate::error::ForecastResult;
use crate::history::{HistoricalSeriesGenerator, HistorySettings};
use crate::model::ProductForecast;

/// History synthesis followed by forecasting, for a single product.
///
/// This is the per-product unit of work the batch runner fans out. It holds
/// only settings, so one pipeline can be shared across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct ForecastPipeline {
    generator: HistoricalSeriesGenerator,
    engine: ForecastEngine,
}

impl ForecastPipeline {
    pub fn new(history: HistorySettings, engine: EngineSettings) -> Self {
        Self {
            generator: HistoricalSeriesGenerator::new(history),
            engine: ForecastEngine::new(engine),
        }
    }

    pub fn generator(&self) -> &HistoricalSeriesGenerator {
        &self.generator
    }

    pub fn engine(&self) -> &ForecastEngine {
        &self.engine
    }

    /// Synthesize `product`'s history as of `as_of` and forecast from it.
    pub fn run<R>(&self, product: &Product, as_of: NaiveDate, rng: &mut R) -> ForecastResult<ProductForecast>
    where
        R: RandomSource + ?Sized,
    {
        let historical = self.generator.generate(&product.id, as_of, rng);
        self.engine.forecast(product, historical, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ForecastError;
    use stockcast_catalog::Catalog;
    use stockcast_core::SeededRandom;

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()
    }

    #[test]
    fn forecasts_every_sample_product() {
        let pipeline = ForecastPipeline::default();
        for (i, p) in Catalog::sample().iter().enumerate() {
            let mut rng = SeededRandom::derive(11, i as u64);
            let fc = pipeline.run(p, as_of(), &mut rng).unwrap();
            assert_eq!(fc.product_id, p.id);
            assert_eq!(fc.historical.len(), 26);
            assert_eq!(fc.forecast.len(), 10);
            assert!(fc.forecast[0].date > fc.historical.last().unwrap().date);
        }
    }

    #[test]
    fn short_lookback_surfaces_insufficient_data() {
        // 28 / 7 = 4 points, one short of the trend window.
        let pipeline = ForecastPipeline::new(HistorySettings::new(28, 7).unwrap(), EngineSettings::default());
        let product = Catalog::sample().products()[0].clone();
        let err = pipeline
            .run(&product, as_of(), &mut SeededRandom::from_seed(1))
            .unwrap_err();
        assert!(matches!(err, ForecastError::InsufficientData { points: 4, .. }));
    }

    #[test]
    fn works_through_a_trait_object() {
        let pipeline = ForecastPipeline::default();
        let product = Catalog::sample().products()[1].clone();
        let mut seeded = SeededRandom::from_seed(5);
        let rng: &mut dyn RandomSource = &mut seeded;
        assert!(pipeline.run(&product, as_of(), rng).is_ok());
    }
}
