pub mod bookings;
pub mod health;
pub mod payments;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route(
            "/create-payment-intent",
            post(payments::create_payment_intent),
        )
        .route("/confirm-payment", post(payments::confirm_payment))
        .route("/test-bookings", get(bookings::list_bookings))
        .with_state(state)
}
