use crate::app_error::AppError;
use axum::Json;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the error before it gets converted into a status response.
        tracing::error!(error = ?self, "Request failed");

        match self {
            AppError::MissingApiKey => error_resp(
                StatusCode::UNAUTHORIZED,
                "Missing API key",
                "Please provide X-API-Key header",
            ),
            AppError::InvalidApiKey => error_resp(
                StatusCode::UNAUTHORIZED,
                "Invalid API key",
                "The provided API key is invalid or inactive",
            ),
            AppError::NotFound => error_resp(
                StatusCode::NOT_FOUND,
                "Not found",
                "The requested resource does not exist",
            ),
            AppError::InvalidInput(msg) => {
                error_resp(StatusCode::BAD_REQUEST, "Invalid input", &msg)
            }
            AppError::Database(_) | AppError::Internal(_) => error_resp(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal error",
                "An internal error occurred",
            ),
        }
    }
}

fn error_resp(status: StatusCode, error: &str, message: &str) -> Response {
    let body = serde_json::json!({ "error": error, "message": message });
    (status, Json(body)).into_response()
}
