use std::sync::Arc;

use axum::{Json, Router, extract::Extension, response::IntoResponse, routing::get};

use stockcast_infra::ForecastService;

use crate::app::errors;

pub fn router() -> Router {
    Router::new().route("/metrics/summary", get(get_summary))
}

pub async fn get_summary(Extension(service): Extension<Arc<ForecastService>>) -> axum::response::Response {
    match service.summary() {
        Ok(metrics) => Json(metrics).into_response(),
        Err(e) => errors::forecast_error_to_response(e),
    }
}
