//! Trend detection and forward projection.

use chrono::Duration;
use tracing::debug;

use stockcast_catalog::Product;
use stockcast_core::RandomSource;

use crate::error::{ForecastError, ForecastResult, ensure_valid};
use crate::model::{ForecastPoint, HistoricalPoint, ProductForecast, Trend};
use crate::reorder::ReorderAdvisor;

/// Points averaged at each end of the history for trend detection.
pub const MIN_HISTORY_POINTS: usize = 5;

/// Longest accepted forecast horizon.
pub const MAX_HORIZON_DAYS: u32 = 3650;

const CONFIDENCE_BASE: f64 = 0.05;
const CONFIDENCE_STEP: f64 = 0.01;

/// Engine settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineSettings {
    horizon_days: u32,
    sample_every_n_days: u32,
    trend_threshold_percent: f64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            horizon_days: 30,
            sample_every_n_days: 3,
            trend_threshold_percent: 5.0,
        }
    }
}

impl EngineSettings {
    pub fn new(horizon_days: u32, sample_every_n_days: u32) -> ForecastResult<Self> {
        if horizon_days == 0 {
            return Err(ForecastError::invalid_settings("horizon_days must be >= 1"));
        }
        if horizon_days > MAX_HORIZON_DAYS {
            return Err(ForecastError::invalid_settings(format!(
                "horizon_days must be <= {MAX_HORIZON_DAYS}"
            )));
        }
        if sample_every_n_days == 0 {
            return Err(ForecastError::invalid_settings(
                "forecast sample_every_n_days must be >= 1",
            ));
        }
        Ok(Self {
            horizon_days,
            sample_every_n_days,
            ..Self::default()
        })
    }

    pub fn with_trend_threshold(mut self, percent: f64) -> ForecastResult<Self> {
        if !(percent.is_finite() && percent >= 0.0) {
            return Err(ForecastError::invalid_settings(
                "trend threshold must be a finite non-negative number",
            ));
        }
        self.trend_threshold_percent = percent;
        Ok(self)
    }

    pub fn horizon_days(&self) -> u32 {
        self.horizon_days
    }

    pub fn sample_every_n_days(&self) -> u32 {
        self.sample_every_n_days
    }

    pub fn trend_threshold_percent(&self) -> f64 {
        self.trend_threshold_percent
    }
}

/// Percentage change between the mean of the first and last
/// `MIN_HISTORY_POINTS` quantities.
///
/// The two windows overlap when the series is shorter than twice the window.
/// A zero first-window mean yields 0.
pub fn trend_percent(historical: &[HistoricalPoint]) -> f64 {
    let window = MIN_HISTORY_POINTS.min(historical.len());
    if window == 0 {
        return 0.0;
    }

    let first_avg = mean_quantity(&historical[..window]);
    let last_avg = mean_quantity(&historical[historical.len() - window..]);

    if first_avg == 0.0 {
        return 0.0;
    }
    (last_avg - first_avg) / first_avg * 100.0
}

/// Half-width of the confidence band, as a fraction, `i` days out.
pub fn confidence_factor(day: u32) -> f64 {
    CONFIDENCE_BASE + f64::from(day) * CONFIDENCE_STEP
}

/// Projects demand forward from a history.
///
/// Model (per day `i` in `[1, horizon]`):
/// - start from the last observed quantity;
/// - scale linearly towards the full historical trend at the horizon;
/// - multiply by noise in `[0.9, 1.1)`;
/// - band = `value * (1 ± (0.05 + i * 0.01))`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ForecastEngine {
    settings: EngineSettings,
    advisor: ReorderAdvisor,
}

impl ForecastEngine {
    pub fn new(settings: EngineSettings) -> Self {
        Self {
            settings,
            advisor: ReorderAdvisor,
        }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Build the forecast view for `product` from its `historical` series.
    ///
    /// Draw order on `rng`: one noise draw per horizon day, then the
    /// confidence score.
    pub fn forecast<R>(
        &self,
        product: &Product,
        historical: Vec<HistoricalPoint>,
        rng: &mut R,
    ) -> ForecastResult<ProductForecast>
    where
        R: RandomSource + ?Sized,
    {
        ensure_valid(product)?;

        let Some(last) = historical.last().copied() else {
            return Err(insufficient(product, 0));
        };
        if historical.len() < MIN_HISTORY_POINTS {
            return Err(insufficient(product, historical.len()));
        }

        let trend_pct = trend_percent(&historical);
        let trend = Trend::classify(trend_pct, self.settings.trend_threshold_percent);

        let forecast = self.project(&last, trend_pct, rng)?;
        let forecasted_demand_total: u64 = forecast.iter().map(|p| u64::from(p.forecast_quantity)).sum();
        let recommended_order_quantity = self.advisor.recommend(product, forecasted_demand_total);

        // Mock score; independent of the band math.
        let confidence_percent = 85 + rng.below(10) as u8;

        debug!(
            product_id = %product.id,
            trend = %trend,
            trend_percent = trend_pct,
            forecasted_demand_total,
            recommended_order_quantity,
            "forecast computed"
        );

        Ok(ProductForecast {
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            current_stock: product.stock,
            reorder_point: product.reorder_point,
            forecasted_demand_total,
            recommended_order_quantity,
            trend,
            confidence_percent,
            historical,
            forecast,
        })
    }

    fn project<R>(
        &self,
        last: &HistoricalPoint,
        trend_pct: f64,
        rng: &mut R,
    ) -> ForecastResult<Vec<ForecastPoint>>
    where
        R: RandomSource + ?Sized,
    {
        let horizon = self.settings.horizon_days;
        let cadence = self.settings.sample_every_n_days;
        let last_actual = f64::from(last.actual_quantity);

        let mut points = Vec::with_capacity((horizon / cadence) as usize);
        for i in 1..=horizon {
            let progress = f64::from(i) / f64::from(horizon);
            let trend_factor = 1.0 + (trend_pct / 100.0) * progress;
            let random_factor = rng.uniform(0.9, 1.1);
            let value = non_negative_round(last_actual * trend_factor * random_factor);

            let cf = confidence_factor(i);
            let lower = non_negative_round(f64::from(value) * (1.0 - cf));
            let upper = non_negative_round(f64::from(value) * (1.0 + cf));

            if i % cadence == 0 {
                let date = last
                    .date
                    .checked_add_signed(Duration::days(i64::from(i)))
                    .ok_or_else(|| {
                        ForecastError::invalid_settings(format!(
                            "forecast date {} + {i} days is out of range",
                            last.date
                        ))
                    })?;
                points.push(ForecastPoint {
                    date,
                    forecast_quantity: value,
                    lower_bound: lower,
                    upper_bound: upper,
                });
            }
        }
        Ok(points)
    }
}

fn insufficient(product: &Product, points: usize) -> ForecastError {
    ForecastError::InsufficientData {
        product_id: product.id.clone(),
        points,
        required: MIN_HISTORY_POINTS,
    }
}

fn mean_quantity(points: &[HistoricalPoint]) -> f64 {
    let sum: f64 = points.iter().map(|p| f64::from(p.actual_quantity)).sum();
    sum / points.len() as f64
}

/// Round half away from zero, clamped to `[0, u32::MAX]`.
fn non_negative_round(x: f64) -> u32 {
    if !x.is_finite() || x <= 0.0 {
        return 0;
    }
    x.round() as u32
}
