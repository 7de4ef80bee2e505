//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: response DTOs and mapping from forecasting types
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use stockcast_infra::ForecastService;

pub mod dto;
pub mod errors;
pub mod routes;

/// Build the full HTTP router (public entrypoint used by `main.rs` and tests).
pub fn build_app(service: Arc<ForecastService>) -> Router {
    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .layer(ServiceBuilder::new().layer(Extension(service)))
}
