use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use http::StatusCode;

pub mod bakery_items;
pub mod orders;

use crate::service::ServiceError;
use crate::ServiceState;

pub fn router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .nest("/bakery-items", bakery_items::router(state.clone()))
        .nest("/orders", orders::router(state.clone()))
        .with_state(state)
}

/// A body that is missing or fails to parse is passed on as `None`, so the
/// service reports it as a validation failure.
pub(crate) fn body<T>(body: Result<Json<T>, JsonRejection>) -> Option<T> {
    match body {
        Ok(Json(value)) => Some(value),
        Err(rejection) => {
            tracing::debug!(reason = %rejection, "unusable request body");
            None
        }
    }
}

pub(crate) fn error_body(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(serde_json::json!({ "error": message.into() }))).into_response()
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        match &self {
            ServiceError::Validation(message) => error_body(StatusCode::BAD_REQUEST, message),
            ServiceError::NotFound(message) => error_body(StatusCode::NOT_FOUND, message),
            ServiceError::Internal { message, .. } if self.is_conflict() => {
                error_body(StatusCode::CONFLICT, message)
            }
            ServiceError::Internal { message, .. } => error_body(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Internal server error: {}", message),
            ),
        }
    }
}
