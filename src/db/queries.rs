use std::str::FromStr;

use chrono::NaiveDateTime;
use rusqlite::{params, Connection, ErrorCode, OptionalExtension};
use rust_decimal::Decimal;

use crate::errors::AppError;
use crate::models::{Booking, BookingStatus, NewBooking};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

const BOOKING_COLUMNS: &str = "id, payment_intent_id, service_type, from_location, to_location, customer_email, amount, status, created_at";

pub fn insert_booking(
    conn: &Connection,
    booking: &NewBooking,
    created_at: NaiveDateTime,
) -> Result<i64, AppError> {
    let created_at = created_at.format(TIMESTAMP_FORMAT).to_string();

    let result = conn.execute(
        "INSERT INTO bookings (payment_intent_id, service_type, from_location, to_location, customer_email, amount, status, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            booking.payment_intent_id,
            booking.service_type,
            booking.from_location,
            booking.to_location,
            booking.customer_email,
            booking.amount.to_string(),
            BookingStatus::Pending.as_str(),
            created_at,
        ],
    );

    match result {
        Ok(_) => Ok(conn.last_insert_rowid()),
        Err(rusqlite::Error::SqliteFailure(e, _)) if e.code == ErrorCode::ConstraintViolation => {
            Err(AppError::ConstraintViolation(format!(
                "a booking for payment intent {} already exists",
                booking.payment_intent_id
            )))
        }
        Err(e) => Err(e.into()),
    }
}

/// Moves a pending booking to `status`. Returns the number of rows changed;
/// settled bookings are never touched.
pub fn settle_booking(
    conn: &Connection,
    payment_intent_id: &str,
    status: BookingStatus,
) -> Result<usize, AppError> {
    let count = conn.execute(
        "UPDATE bookings SET status = ?1 WHERE payment_intent_id = ?2 AND status = ?3",
        params![status.as_str(), payment_intent_id, BookingStatus::Pending.as_str()],
    )?;
    Ok(count)
}

pub fn get_booking_by_payment_intent(
    conn: &Connection,
    payment_intent_id: &str,
) -> Result<Option<Booking>, AppError> {
    let sql = format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE payment_intent_id = ?1");
    let row = conn
        .query_row(&sql, params![payment_intent_id], parse_booking_row)
        .optional()?;
    Ok(row)
}

pub fn get_all_bookings(conn: &Connection) -> Result<Vec<Booking>, AppError> {
    let sql = format!("SELECT {BOOKING_COLUMNS} FROM bookings ORDER BY created_at DESC, id DESC");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], parse_booking_row)?;

    let mut bookings = vec![];
    for row in rows {
        bookings.push(row?);
    }
    Ok(bookings)
}

fn parse_booking_row(row: &rusqlite::Row) -> rusqlite::Result<Booking> {
    let amount_str: String = row.get(6)?;
    let status_str: String = row.get(7)?;
    let created_at_str: String = row.get(8)?;

    let amount = Decimal::from_str(&amount_str).map_err(|e| conversion_error(6, e))?;
    let status = BookingStatus::parse(&status_str).ok_or_else(|| {
        conversion_error(7, format!("unknown booking status: {status_str}"))
    })?;
    let created_at = NaiveDateTime::parse_from_str(&created_at_str, TIMESTAMP_FORMAT)
        .map_err(|e| conversion_error(8, e))?;

    Ok(Booking {
        id: row.get(0)?,
        payment_intent_id: row.get(1)?,
        service_type: row.get(2)?,
        from_location: row.get(3)?,
        to_location: row.get(4)?,
        customer_email: row.get(5)?,
        amount,
        status,
        created_at,
    })
}

fn conversion_error<E>(column: usize, err: E) -> rusqlite::Error
where
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    rusqlite::Error::FromSqlConversionFailure(column, rusqlite::types::Type::Text, err.into())
}
