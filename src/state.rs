use std::sync::Arc;

use crate::config::AppConfig;
use crate::db::BookingStore;
use crate::services::payments::PaymentProcessor;

pub struct AppState {
    pub store: Arc<BookingStore>,
    pub config: AppConfig,
    pub payments: Box<dyn PaymentProcessor>,
}
