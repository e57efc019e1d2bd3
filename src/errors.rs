use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("database error: {0}")]
    Persistence(#[from] rusqlite::Error),

    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("payment processor error: {0}")]
    Upstream(String),

    #[error(
        "payment intent {payment_intent_id} was created but the booking was not recorded ({reason}); manual reconciliation required"
    )]
    Unreconciled {
        payment_intent_id: String,
        reason: String,
    },

    #[error("invalid request: {0}")]
    Validation(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Handler-boundary failure: always a 500 with a fixed headline and the
    /// error display as details.
    pub fn into_failure(self, headline: &str) -> Response {
        tracing::error!(error = %self, "{headline}");
        let body = serde_json::json!({
            "error": headline,
            "details": self.to_string(),
        });
        (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(body)).into_response()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "request failed");
        let body = serde_json::json!({ "error": self.to_string() });
        (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(body)).into_response()
    }
}
