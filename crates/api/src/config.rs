//! Environment-driven configuration.

use std::net::SocketAddr;
use std::str::FromStr;

use thiserror::Error;

use stockcast_forecasting::{EngineSettings, ForecastResult, HistorySettings};
use stockcast_infra::BatchConfig;

pub const BIND_ADDR_ENV: &str = "STOCKCAST_BIND_ADDR";
pub const SEED_ENV: &str = "STOCKCAST_SEED";
pub const MAX_WORKERS_ENV: &str = "STOCKCAST_MAX_WORKERS";
pub const HORIZON_DAYS_ENV: &str = "STOCKCAST_HORIZON_DAYS";
pub const LOOKBACK_DAYS_ENV: &str = "STOCKCAST_LOOKBACK_DAYS";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key}={value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    /// Fixed seed makes every response reproducible.
    pub seed: Option<u64>,
    pub max_workers: usize,
    pub horizon_days: u32,
    pub lookback_days: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            seed: None,
            max_workers: 4,
            horizon_days: 30,
            lookback_days: 180,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (unset keys keep their defaults).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            bind_addr: parse(&lookup, BIND_ADDR_ENV)?.unwrap_or(defaults.bind_addr),
            seed: parse(&lookup, SEED_ENV)?,
            max_workers: parse(&lookup, MAX_WORKERS_ENV)?.unwrap_or(defaults.max_workers),
            horizon_days: parse(&lookup, HORIZON_DAYS_ENV)?.unwrap_or(defaults.horizon_days),
            lookback_days: parse(&lookup, LOOKBACK_DAYS_ENV)?.unwrap_or(defaults.lookback_days),
        })
    }

    /// Forecast batch settings derived from this config.
    pub fn batch_config(&self) -> ForecastResult<BatchConfig> {
        let history = HistorySettings::new(
            self.lookback_days,
            HistorySettings::default().sample_every_n_days(),
        )?;
        let engine = EngineSettings::new(
            self.horizon_days,
            EngineSettings::default().sample_every_n_days(),
        )?;

        let mut batch = BatchConfig::default()
            .with_max_workers(self.max_workers)
            .with_history(history)
            .with_engine(engine);
        if let Some(seed) = self.seed {
            batch = batch.with_seed(seed);
        }
        Ok(batch)
    }
}

fn parse<T, F>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw.trim().parse::<T>().map(Some).map_err(|e| ConfigError::Invalid {
            key,
            value: raw.clone(),
            reason: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.bind_addr.port(), 8080);
    }

    #[test]
    fn reads_overrides() {
        let cfg = AppConfig::from_lookup(lookup(&[
            (BIND_ADDR_ENV, "127.0.0.1:9000"),
            (SEED_ENV, "42"),
            (MAX_WORKERS_ENV, "2"),
            (HORIZON_DAYS_ENV, "60"),
        ]))
        .unwrap();
        assert_eq!(cfg.bind_addr.port(), 9000);
        assert_eq!(cfg.seed, Some(42));
        assert_eq!(cfg.max_workers, 2);

        let batch = cfg.batch_config().unwrap();
        assert_eq!(batch.seed, Some(42));
        assert_eq!(batch.engine.horizon_days(), 60);
        assert_eq!(batch.history.lookback_days(), 180);
    }

    #[test]
    fn rejects_garbage() {
        let err = AppConfig::from_lookup(lookup(&[(SEED_ENV, "forty-two")])).unwrap_err();
        let ConfigError::Invalid { key, .. } = err;
        assert_eq!(key, SEED_ENV);
    }

    #[test]
    fn zero_horizon_is_rejected_when_building_settings() {
        let cfg = AppConfig::from_lookup(lookup(&[(HORIZON_DAYS_ENV, "0")])).unwrap();
        assert!(cfg.batch_config().is_err());
    }

    #[test]
    fn oversized_windows_are_rejected_when_building_settings() {
        let cfg = AppConfig::from_lookup(lookup(&[(HORIZON_DAYS_ENV, "4294967295")])).unwrap();
        assert!(cfg.batch_config().is_err());

        let cfg = AppConfig::from_lookup(lookup(&[(LOOKBACK_DAYS_ENV, "100000")])).unwrap();
        assert!(cfg.batch_config().is_err());
    }
}
