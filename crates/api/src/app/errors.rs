use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use stockcast_forecasting::ForecastError;
use stockcast_infra::ServiceError;

pub fn forecast_error_to_response(err: ForecastError) -> axum::response::Response {
    let status = match err {
        ForecastError::InsufficientData { .. } | ForecastError::InvalidProduct { .. } => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        ForecastError::InvalidSettings(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    json_error(status, err.code(), err.to_string())
}

pub fn service_error_to_response(err: ServiceError) -> axum::response::Response {
    match err {
        ServiceError::NotFound(id) => {
            json_error(StatusCode::NOT_FOUND, "not_found", format!("product {id} not found"))
        }
        ServiceError::Forecast(e) => forecast_error_to_response(e),
        ServiceError::Batch(e) => json_error(StatusCode::INTERNAL_SERVER_ERROR, "batch_failed", e.to_string()),
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
