use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use tracing::info;

use stockcast_core::ProductId;
use stockcast_forecasting::{DEFAULT_ATTENTION_LIMIT, chart_series};
use stockcast_infra::{ForecastService, SortOrder};

use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/forecasts", get(list_forecasts))
        .route("/forecasts/:id", get(get_forecast))
        .route("/forecasts/:id/chart", get(get_forecast_chart))
        .route("/alerts", get(list_alerts))
}

pub async fn list_forecasts(
    Extension(service): Extension<Arc<ForecastService>>,
    Query(query): Query<dto::ForecastsQuery>,
) -> axum::response::Response {
    let sort = match query.sort.as_deref().map(str::parse::<SortOrder>).transpose() {
        Ok(sort) => sort.unwrap_or_default(),
        Err(msg) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_sort", msg),
    };

    match service.blocking(move |s| s.forecast_all(sort)).await {
        Ok(report) => {
            info!(run_id = %report.run_id, failed = report.failed(), "served forecast batch");
            Json(dto::BatchReportResponse::from(report)).into_response()
        }
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn get_forecast(
    Extension(service): Extension<Arc<ForecastService>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match service.blocking(move |s| s.forecast_one(&id)).await {
        Ok(Ok(forecast)) => Json(forecast).into_response(),
        Ok(Err(e)) | Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn get_forecast_chart(
    Extension(service): Extension<Arc<ForecastService>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match service.blocking(move |s| s.forecast_one(&id)).await {
        Ok(Ok(forecast)) => Json(dto::ChartResponse {
            points: chart_series(&forecast),
            product_id: forecast.product_id,
            product_name: forecast.product_name,
            trend: forecast.trend,
            confidence_percent: forecast.confidence_percent,
        })
        .into_response(),
        Ok(Err(e)) | Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn list_alerts(
    Extension(service): Extension<Arc<ForecastService>>,
    Query(query): Query<dto::AlertsQuery>,
) -> axum::response::Response {
    let limit = query.limit.unwrap_or(DEFAULT_ATTENTION_LIMIT);

    match service.blocking(move |s| s.alerts(limit)).await {
        Ok(alerts) => {
            let body: Vec<dto::AlertResponse> = alerts.iter().map(dto::AlertResponse::from).collect();
            Json(body).into_response()
        }
        Err(e) => errors::service_error_to_response(e),
    }
}

fn parse_id(raw: &str) -> Result<ProductId, axum::response::Response> {
    ProductId::new(raw).map_err(|e| errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", e.to_string()))
}
