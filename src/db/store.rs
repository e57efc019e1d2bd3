use std::sync::{Mutex, MutexGuard};

use chrono::{NaiveDateTime, Utc};
use rusqlite::Connection;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{Booking, BookingStatus, FinalStatus, NewBooking, StatusUpdate};

/// Owner of the single booking database connection.
///
/// Opened once at startup and shared by reference with every request; calls
/// are serialized on the connection mutex.
pub struct BookingStore {
    conn: Mutex<Connection>,
}

impl BookingStore {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    pub fn open(path: &str) -> anyhow::Result<Self> {
        Ok(Self::new(super::init_db(path)?))
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, AppError> {
        self.conn
            .lock()
            .map_err(|_| AppError::Internal("booking store lock poisoned".to_string()))
    }

    /// Records a pending booking and returns its id. Fails with
    /// `ConstraintViolation` if the payment intent already has a booking.
    pub fn create(&self, booking: &NewBooking) -> Result<i64, AppError> {
        self.create_at(booking, Utc::now().naive_utc())
    }

    pub(crate) fn create_at(
        &self,
        booking: &NewBooking,
        created_at: NaiveDateTime,
    ) -> Result<i64, AppError> {
        let conn = self.conn()?;
        let id = queries::insert_booking(&conn, booking, created_at)?;
        tracing::info!(
            booking_id = id,
            payment_intent_id = %booking.payment_intent_id,
            "booking recorded"
        );
        Ok(id)
    }

    pub fn update_status(
        &self,
        payment_intent_id: &str,
        status: FinalStatus,
    ) -> Result<StatusUpdate, AppError> {
        let target = BookingStatus::from(status);
        let conn = self.conn()?;

        if queries::settle_booking(&conn, payment_intent_id, target)? > 0 {
            return Ok(StatusUpdate::Updated);
        }

        let outcome = match queries::get_booking_by_payment_intent(&conn, payment_intent_id)? {
            None => StatusUpdate::NotFound,
            Some(b) if b.status == target => StatusUpdate::Unchanged,
            Some(b) => StatusUpdate::Conflict { current: b.status },
        };
        Ok(outcome)
    }

    /// All bookings, newest first.
    pub fn list_all(&self) -> Result<Vec<Booking>, AppError> {
        let conn = self.conn()?;
        queries::get_all_bookings(&conn)
    }

    pub fn find_by_payment_intent(&self, payment_intent_id: &str) -> Result<Option<Booking>, AppError> {
        let conn = self.conn()?;
        queries::get_booking_by_payment_intent(&conn, payment_intent_id)
    }

    pub fn close(self) -> anyhow::Result<()> {
        let conn = self
            .conn
            .into_inner()
            .map_err(|_| anyhow::anyhow!("booking store lock poisoned"))?;
        conn.close().map_err(|(_, e)| e)?;
        tracing::info!("database connection closed");
        Ok(())
    }
}
