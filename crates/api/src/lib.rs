//! HTTP API: exposes catalog forecasts and summary metrics as JSON.
//!
//! This is a collaborator of the forecasting core, not part of it: it owns the
//! (in-memory) catalog, reads configuration, and maps results and errors onto
//! HTTP.

pub mod app;
pub mod config;
