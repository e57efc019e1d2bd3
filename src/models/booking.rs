use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: i64,
    pub payment_intent_id: String,
    pub service_type: String,
    pub from_location: String,
    pub to_location: Option<String>,
    pub customer_email: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub status: BookingStatus,
    pub created_at: NaiveDateTime,
}

/// Fields supplied by the caller when a booking is first recorded. The id,
/// status and creation time are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub payment_intent_id: String,
    pub service_type: String,
    pub from_location: String,
    pub to_location: Option<String>,
    pub customer_email: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Completed,
    Failed,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Completed => "completed",
            BookingStatus::Failed => "failed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(BookingStatus::Pending),
            "completed" => Some(BookingStatus::Completed),
            "failed" => Some(BookingStatus::Failed),
            _ => None,
        }
    }
}

/// A status a pending booking may be settled into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinalStatus {
    Completed,
    Failed,
}

impl From<FinalStatus> for BookingStatus {
    fn from(status: FinalStatus) -> Self {
        match status {
            FinalStatus::Completed => BookingStatus::Completed,
            FinalStatus::Failed => BookingStatus::Failed,
        }
    }
}

/// Outcome of settling a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusUpdate {
    /// The booking was pending and now carries the requested status.
    Updated,
    /// The booking already carried the requested status.
    Unchanged,
    /// The booking was already settled with the other final status.
    Conflict { current: BookingStatus },
    /// No booking references the payment intent.
    NotFound,
}
