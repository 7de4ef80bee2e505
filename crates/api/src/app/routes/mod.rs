use axum::Router;

pub mod forecasts;
pub mod metrics;
pub mod products;
pub mod system;

/// Router for all data endpoints.
pub fn router() -> Router {
    Router::new()
        .merge(products::router())
        .merge(forecasts::router())
        .merge(metrics::router())
}
