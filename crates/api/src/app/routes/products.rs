use std::sync::Arc;

use axum::{Json, Router, extract::Extension, response::IntoResponse, routing::get};

use stockcast_infra::ForecastService;

pub fn router() -> Router {
    Router::new().route("/products", get(list_products))
}

pub async fn list_products(Extension(service): Extension<Arc<ForecastService>>) -> impl IntoResponse {
    Json(service.catalog().clone())
}
