pub mod stripe;

use async_trait::async_trait;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::errors::AppError;
use crate::models::{PaymentIntent, PaymentIntentRequest};

#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    async fn create_payment_intent(
        &self,
        request: &PaymentIntentRequest,
    ) -> anyhow::Result<PaymentIntent>;

    async fn retrieve_payment_intent(&self, id: &str) -> anyhow::Result<PaymentIntent>;
}

/// Converts a major-unit amount (e.g. dollars) to the processor's integer
/// minor units, rounding half away from zero.
pub fn to_minor_units(amount: Decimal) -> Result<i64, AppError> {
    if amount <= Decimal::ZERO {
        return Err(AppError::Validation(format!(
            "amount must be positive, got {amount}"
        )));
    }

    amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .ok_or_else(|| AppError::Validation(format!("amount {amount} is out of range")))?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or_else(|| AppError::Validation(format!("amount {amount} is out of range")))
}

pub fn from_minor_units(minor: i64) -> Decimal {
    Decimal::new(minor, 2)
}
