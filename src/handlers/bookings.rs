use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use crate::errors::AppError;
use crate::models::Booking;
use crate::services::checkout;
use crate::state::AppState;

// GET /test-bookings
pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Booking>>, AppError> {
    Ok(Json(checkout::list_bookings(&state)?))
}
