//! Synthetic demand history.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use tracing::{debug, warn};

use stockcast_core::{ProductId, RandomSource};

use crate::error::{ForecastError, ForecastResult};
use crate::model::HistoricalPoint;

const WEEKEND_MULTIPLIER: f64 = 0.6;
const WEEKDAY_MULTIPLIER: f64 = 1.2;
/// Per-day upward drift built into the synthetic series.
const DAILY_DRIFT: f64 = 0.001;

/// Longest accepted history window.
pub const MAX_LOOKBACK_DAYS: u32 = 3650;

/// Generator settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistorySettings {
    lookback_days: u32,
    sample_every_n_days: u32,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            lookback_days: 180,
            sample_every_n_days: 7,
        }
    }
}

impl HistorySettings {
    pub fn new(lookback_days: u32, sample_every_n_days: u32) -> ForecastResult<Self> {
        if lookback_days == 0 {
            return Err(ForecastError::invalid_settings("lookback_days must be >= 1"));
        }
        if lookback_days > MAX_LOOKBACK_DAYS {
            return Err(ForecastError::invalid_settings(format!(
                "lookback_days must be <= {MAX_LOOKBACK_DAYS}"
            )));
        }
        if sample_every_n_days == 0 {
            return Err(ForecastError::invalid_settings(
                "history sample_every_n_days must be >= 1",
            ));
        }
        Ok(Self {
            lookback_days,
            sample_every_n_days,
        })
    }

    pub fn lookback_days(&self) -> u32 {
        self.lookback_days
    }

    pub fn sample_every_n_days(&self) -> u32 {
        self.sample_every_n_days
    }

    /// Number of points `generate` emits: `ceil(lookback / cadence)`.
    pub fn expected_len(&self) -> usize {
        self.lookback_days.div_ceil(self.sample_every_n_days) as usize
    }
}

/// Synthesizes a weekly-sampled demand history for a product.
///
/// Model (per day `i` in `[0, lookback)`):
/// - base quantity `B` drawn once per call in `[20, 50)`;
/// - weekday/weekend seasonality (1.2 / 0.6);
/// - mild upward drift `1 + i * 0.001`;
/// - noise in `[0.7, 1.3)`.
///
/// Noise is drawn for every day, including the ones that are not emitted, so
/// the sampling cadence does not change the underlying daily series.
#[derive(Debug, Clone, Copy, Default)]
pub struct HistoricalSeriesGenerator {
    settings: HistorySettings,
}

impl HistoricalSeriesGenerator {
    pub fn new(settings: HistorySettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &HistorySettings {
        &self.settings
    }

    /// Generate the series ending just before `as_of`.
    ///
    /// The first point is dated `as_of - lookback_days`. An `as_of` too close
    /// to the start of the calendar yields an empty series.
    pub fn generate<R>(&self, product_id: &ProductId, as_of: NaiveDate, rng: &mut R) -> Vec<HistoricalPoint>
    where
        R: RandomSource + ?Sized,
    {
        let lookback = self.settings.lookback_days;
        let cadence = self.settings.sample_every_n_days;
        let Some(start) = as_of.checked_sub_signed(Duration::days(i64::from(lookback))) else {
            warn!(product_id = %product_id, %as_of, lookback, "history window starts before the calendar");
            return Vec::new();
        };

        let base = f64::from(20 + rng.below(30));

        let mut points = Vec::with_capacity(self.settings.expected_len());
        for i in 0..lookback {
            let date = start + Duration::days(i64::from(i));

            let week_multiplier = match date.weekday() {
                Weekday::Sat | Weekday::Sun => WEEKEND_MULTIPLIER,
                _ => WEEKDAY_MULTIPLIER,
            };
            let trend_factor = 1.0 + f64::from(i) * DAILY_DRIFT;
            let random_factor = rng.uniform(0.7, 1.3);

            let quantity = (base * week_multiplier * trend_factor * random_factor).round();

            if i % cadence == 0 {
                points.push(HistoricalPoint::new(date, quantity.max(0.0) as u32));
            }
        }

        debug!(product_id = %product_id, base, points = points.len(), "synthesized demand history");
        points
    }
}
