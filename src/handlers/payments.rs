use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::errors::AppError;
use crate::models::{ConfirmPaymentRequest, CreatePaymentIntentRequest};
use crate::services::checkout::{self, Confirmation};
use crate::state::AppState;

const CREATE_FAILED: &str = "Failed to create payment intent";
const CONFIRM_FAILED: &str = "Failed to confirm payment";

// POST /create-payment-intent
pub async fn create_payment_intent(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreatePaymentIntentRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(p) => p,
        Err(e) => return AppError::Validation(e.body_text()).into_failure(CREATE_FAILED),
    };

    match checkout::initiate(&state, request).await {
        Ok(created) => (StatusCode::OK, Json(created)).into_response(),
        Err(e) => e.into_failure(CREATE_FAILED),
    }
}

// POST /confirm-payment
pub async fn confirm_payment(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ConfirmPaymentRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(p) => p,
        Err(e) => return AppError::Validation(e.body_text()).into_failure(CONFIRM_FAILED),
    };

    match checkout::confirm(&state, &request.payment_intent_id).await {
        Ok(Confirmation::Succeeded(details)) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "message": "Payment successful",
                "paymentDetails": details,
            })),
        )
            .into_response(),
        Ok(Confirmation::NotCompleted { status }) => (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({
                "message": "Payment not completed",
                "status": status,
            })),
        )
            .into_response(),
        Err(e) => e.into_failure(CONFIRM_FAILED),
    }
}
