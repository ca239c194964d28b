use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use skyfare_core::CoreError;
use skyfare_order::DraftError;

#[derive(Debug)]
pub enum AppError {
    ValidationError(String),
    NotFoundError(String),
    InternalServerError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFoundError(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Validation failures surface their message; anything else is internal.
impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ValidationError(e) => AppError::ValidationError(e.to_string()),
            other => AppError::InternalServerError(other.to_string()),
        }
    }
}

impl From<DraftError> for AppError {
    fn from(err: DraftError) -> Self {
        match err {
            DraftError::Storage(e) => e.into(),
            DraftError::Encode(e) => AppError::InternalServerError(e.to_string()),
            rejected @ (DraftError::FareNotOnRow { .. }
            | DraftError::Selection(_)
            | DraftError::MissingInboundRow
            | DraftError::InvalidTravellers(_)) => AppError::ValidationError(rejected.to_string()),
        }
    }
}
