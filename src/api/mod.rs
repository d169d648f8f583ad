pub mod search;
pub mod show;
pub mod suggest;

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};

use crate::backend::BackendError;
use crate::state::AppState;

/// All API routes.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/suggest", post(suggest::suggest))
        .route("/api/search", post(search::search))
        .route("/api/show", post(show::show))
        .with_state(state)
}

/// Handler error: a status code and a message, sent as `{"error": message}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// Map a backend failure. Unavailability keeps its own status and message;
    /// anything else becomes a 500 with `generic` (or the error text when
    /// `generic` is `None`).
    pub fn from_backend(err: &BackendError, generic: Option<&str>) -> Self {
        match err {
            BackendError::Unhealthy(_) => Self::new(
                StatusCode::SERVICE_UNAVAILABLE,
                "Quran search server is not running. Please start the Python server first.",
            ),
            BackendError::Timeout => Self::new(
                StatusCode::GATEWAY_TIMEOUT,
                "Request timed out. Please try again.",
            ),
            BackendError::Unreachable(_) => Self::new(
                StatusCode::SERVICE_UNAVAILABLE,
                "Failed to connect to Quran search server.",
            ),
            other => Self::internal(generic.map(str::to_string).unwrap_or_else(|| other.to_string())),
        }
    }
}

impl From<BackendError> for ApiError {
    fn from(err: BackendError) -> Self {
        Self::from_backend(&err, None)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(serde_json::json!({ "error": self.message })),
        )
            .into_response()
    }
}

/// Body that failed to parse as the expected JSON: report as a bad request.
pub(crate) fn invalid_body(rejection: JsonRejection, message: &str) -> ApiError {
    tracing::debug!("Rejected request body: {rejection}");
    ApiError::bad_request(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_errors_keep_distinct_statuses() {
        let timeout = ApiError::from(BackendError::Timeout);
        let down = ApiError::from(BackendError::Unreachable("refused".into()));
        let unhealthy = ApiError::from(BackendError::Unhealthy(500));
        let bad = ApiError::from(BackendError::Status {
            status: 422,
            body: "bad encoder".into(),
        });

        assert_eq!(timeout.status, StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(down.status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(unhealthy.status, StatusCode::SERVICE_UNAVAILABLE);
        assert_ne!(down.message, unhealthy.message);
        assert_eq!(bad.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(bad.message.contains("bad encoder"));
    }

    #[test]
    fn test_generic_message_overrides_other_failures_only() {
        let decode = ApiError::from_backend(&BackendError::Decode("eof".into()), Some("oops"));
        assert_eq!(decode.message, "oops");
        let timeout = ApiError::from_backend(&BackendError::Timeout, Some("oops"));
        assert_eq!(timeout.status, StatusCode::GATEWAY_TIMEOUT);
    }
}
