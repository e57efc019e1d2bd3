use std::sync::Arc;

use crate::errors::AppError;
use crate::models::{
    Booking, CreatePaymentIntentRequest, CreatePaymentIntentResponse, FinalStatus, NewBooking,
    PaymentDetails, PaymentIntentRequest, StatusUpdate,
};
use crate::services::payments::{from_minor_units, to_minor_units};
use crate::state::AppState;

/// Result of checking a payment intent with the processor.
#[derive(Debug)]
pub enum Confirmation {
    Succeeded(PaymentDetails),
    NotCompleted { status: String },
}

pub async fn initiate(
    state: &Arc<AppState>,
    request: CreatePaymentIntentRequest,
) -> Result<CreatePaymentIntentResponse, AppError> {
    let CreatePaymentIntentRequest {
        amount,
        customer_email,
        booking_details,
    } = request;

    let customer_email = required("customerEmail", customer_email)?;
    let service_type = required("bookingDetails.serviceType", booking_details.service_type)?;
    let from_location = required("bookingDetails.fromLocation", booking_details.from_location)?;
    let to_location = booking_details
        .to_location
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
    let minor_amount = to_minor_units(amount)?;

    let intent = state
        .payments
        .create_payment_intent(&PaymentIntentRequest {
            amount: minor_amount,
            currency: state.config.currency.clone(),
            receipt_email: customer_email.clone(),
            metadata: vec![
                ("customerEmail".to_string(), customer_email.clone()),
                ("bookingType".to_string(), service_type.clone()),
                ("pickupLocation".to_string(), from_location.clone()),
            ],
        })
        .await
        .map_err(|e| AppError::Upstream(format!("{e:#}")))?;

    tracing::info!(
        payment_intent_id = %intent.id,
        amount = minor_amount,
        currency = %intent.currency,
        "payment intent created"
    );

    let booking = NewBooking {
        payment_intent_id: intent.id.clone(),
        service_type,
        from_location,
        to_location,
        customer_email,
        amount,
    };

    // The intent already exists upstream; a failed write leaves it orphaned and
    // must be surfaced for manual reconciliation rather than cancelled here.
    if let Err(e) = state.store.create(&booking) {
        tracing::error!(
            payment_intent_id = %intent.id,
            error = %e,
            "booking write failed after payment intent creation"
        );
        return Err(AppError::Unreconciled {
            payment_intent_id: intent.id,
            reason: e.to_string(),
        });
    }

    Ok(CreatePaymentIntentResponse {
        client_secret: intent.client_secret,
        payment_intent_id: intent.id,
        metadata: intent.metadata,
    })
}

pub async fn confirm(
    state: &Arc<AppState>,
    payment_intent_id: &str,
) -> Result<Confirmation, AppError> {
    let payment_intent_id = payment_intent_id.trim();
    if payment_intent_id.is_empty() {
        return Err(AppError::Validation("paymentIntentId is required".to_string()));
    }

    let intent = state
        .payments
        .retrieve_payment_intent(payment_intent_id)
        .await
        .map_err(|e| AppError::Upstream(format!("{e:#}")))?;

    let target = if intent.is_succeeded() {
        FinalStatus::Completed
    } else {
        FinalStatus::Failed
    };

    match state.store.update_status(payment_intent_id, target)? {
        StatusUpdate::Updated => {
            tracing::info!(payment_intent_id, status = ?target, "booking settled");
        }
        StatusUpdate::Unchanged => {
            tracing::debug!(payment_intent_id, "booking already settled");
        }
        StatusUpdate::Conflict { current } => {
            tracing::warn!(
                payment_intent_id,
                current = current.as_str(),
                processor_status = %intent.status,
                "booking already settled with a different status"
            );
        }
        StatusUpdate::NotFound => {
            tracing::warn!(payment_intent_id, "no booking for payment intent");
        }
    }

    if intent.is_succeeded() {
        Ok(Confirmation::Succeeded(PaymentDetails {
            id: intent.id,
            amount: from_minor_units(intent.amount),
            status: intent.status,
            metadata: intent.metadata,
        }))
    } else {
        Ok(Confirmation::NotCompleted {
            status: intent.status,
        })
    }
}

pub fn list_bookings(state: &Arc<AppState>) -> Result<Vec<Booking>, AppError> {
    state.store.list_all()
}

fn required(field: &str, value: String) -> Result<String, AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::Validation(format!("{field} is required")));
    }
    Ok(value.to_string())
}
