use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Processor status value that marks a charge as captured.
pub const SUCCEEDED: &str = "succeeded";

/// The processor's view of an in-progress charge attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    pub amount: i64,
    #[serde(default)]
    pub currency: String,
    pub status: String,
    pub client_secret: Option<String>,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl PaymentIntent {
    pub fn is_succeeded(&self) -> bool {
        self.status == SUCCEEDED
    }
}

/// Parameters for a new payment intent, amount already in minor units.
#[derive(Debug, Clone)]
pub struct PaymentIntentRequest {
    pub amount: i64,
    pub currency: String,
    pub receipt_email: String,
    pub metadata: Vec<(String, String)>,
}

// POST /create-payment-intent

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentIntentRequest {
    pub amount: Decimal,
    pub customer_email: String,
    pub booking_details: BookingDetails,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDetails {
    pub service_type: String,
    pub from_location: String,
    #[serde(default)]
    pub to_location: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentIntentResponse {
    pub client_secret: Option<String>,
    pub payment_intent_id: String,
    pub metadata: HashMap<String, String>,
}

// POST /confirm-payment

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmPaymentRequest {
    pub payment_intent_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaymentDetails {
    pub id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub status: String,
    pub metadata: HashMap<String, String>,
}
