//! Flat Records
//!
//! Films, showtimes and reservations travel as semicolon-delimited,
//! positional strings. Fields are never escaped, so a field value can't
//! contain the delimiter.

use std::{fmt, num::NonZeroU32, str::FromStr};

use rust_decimal::Decimal;
use smallvec::SmallVec;
use thiserror::Error;

/// Field delimiter shared by every record kind.
pub const DELIMITER: char = ';';

/// The kind of record being parsed, used for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    /// `id;title;description;durationMinutes;genre;basePrice`
    Film,

    /// `filmId;datetime;room;totalSeats`
    Showtime,

    /// `showtimeId;customerId;seatNumber;price`
    ReservationRequest,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Film => f.write_str("film"),
            RecordKind::Showtime => f.write_str("showtime"),
            RecordKind::ReservationRequest => f.write_str("reservation request"),
        }
    }
}

/// Errors raised while parsing a flat record.
#[derive(Debug, Error, PartialEq)]
pub enum RecordError {
    /// The record did not split into the expected number of fields.
    #[error("{kind} record expects {expected} fields, found {found}")]
    FieldCount {
        /// Record being parsed
        kind: RecordKind,
        /// Number of fields the record format defines
        expected: usize,
        /// Number of fields actually present
        found: usize,
    },

    /// A numeric field could not be parsed.
    #[error("{kind} record field `{field}` is not a valid number: {value:?}")]
    InvalidNumber {
        /// Record being parsed
        kind: RecordKind,
        /// Field name
        field: &'static str,
        /// Raw field value
        value: String,
    },

    /// A numeric field parsed but falls outside its allowed range.
    #[error("{kind} record field `{field}` is out of range: {value:?}")]
    InvalidValue {
        /// Record being parsed
        kind: RecordKind,
        /// Field name
        field: &'static str,
        /// Raw field value
        value: String,
    },
}

/// Split a record into exactly `N` positional fields.
///
/// # Errors
///
/// Returns [`RecordError::FieldCount`] if the record has more or fewer fields.
pub fn split_fields<const N: usize>(
    record: &str,
    kind: RecordKind,
) -> Result<[&str; N], RecordError> {
    let fields: SmallVec<[&str; 6]> = record.split(DELIMITER).collect();

    <[&str; N]>::try_from(fields.as_slice())
        .ok()
        .ok_or(RecordError::FieldCount {
            kind,
            expected: N,
            found: fields.len(),
        })
}

/// Parse a numeric field, tagging failures with the record kind and field name.
pub(crate) fn parse_number<T: FromStr>(
    value: &str,
    kind: RecordKind,
    field: &'static str,
) -> Result<T, RecordError> {
    value.parse().ok().ok_or_else(|| RecordError::InvalidNumber {
        kind,
        field,
        value: value.to_owned(),
    })
}

/// Parse a non-negative decimal amount.
pub(crate) fn parse_price(
    value: &str,
    kind: RecordKind,
    field: &'static str,
) -> Result<Decimal, RecordError> {
    let price: Decimal = parse_number(value, kind, field)?;

    if price.is_sign_negative() && !price.is_zero() {
        return Err(RecordError::InvalidValue {
            kind,
            field,
            value: value.to_owned(),
        });
    }

    Ok(price)
}

/// Parse a strictly positive count.
pub(crate) fn parse_positive(
    value: &str,
    kind: RecordKind,
    field: &'static str,
) -> Result<NonZeroU32, RecordError> {
    let count: u32 = parse_number(value, kind, field)?;

    NonZeroU32::new(count).ok_or_else(|| RecordError::InvalidValue {
        kind,
        field,
        value: value.to_owned(),
    })
}

/// A parsed showtime record: `filmId;datetime;room;totalSeats`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowtimeRecord {
    /// Film being screened
    pub film_id: String,

    /// Date and time, kept verbatim
    pub starts_at: String,

    /// Room identifier
    pub room: String,

    /// Seats available in the room
    pub total_seats: NonZeroU32,
}

impl ShowtimeRecord {
    /// Parse a showtime record.
    ///
    /// # Errors
    ///
    /// Returns a [`RecordError`] on a wrong field count, a non-numeric seat
    /// count or a seat count of zero.
    pub fn parse(record: &str) -> Result<Self, RecordError> {
        let kind = RecordKind::Showtime;
        let [film_id, starts_at, room, total_seats] = split_fields(record, kind)?;

        Ok(Self {
            film_id: film_id.to_owned(),
            starts_at: starts_at.to_owned(),
            room: room.to_owned(),
            total_seats: parse_positive(total_seats, kind, "totalSeats")?,
        })
    }
}

impl fmt::Display for ShowtimeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{};{};{};{}",
            self.film_id, self.starts_at, self.room, self.total_seats
        )
    }
}

/// A parsed reservation request: `showtimeId;customerId;seatNumber;price`.
///
/// The seat number is kept signed so that zero and negative seats reach the
/// seat inventory and come back as an out-of-range outcome rather than a
/// parse failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationRequest {
    /// Showtime to reserve a seat for
    pub showtime_id: String,

    /// Customer making the reservation
    pub customer_id: String,

    /// Requested seat number
    pub seat_number: i64,

    /// Price charged for the ticket
    pub price: Decimal,
}

impl ReservationRequest {
    /// Parse a reservation request.
    ///
    /// # Errors
    ///
    /// Returns a [`RecordError`] on a wrong field count or a non-numeric
    /// seat number or price.
    pub fn parse(request: &str) -> Result<Self, RecordError> {
        let kind = RecordKind::ReservationRequest;
        let [showtime_id, customer_id, seat_number, price] = split_fields(request, kind)?;

        Ok(Self {
            showtime_id: showtime_id.to_owned(),
            customer_id: customer_id.to_owned(),
            seat_number: parse_number(seat_number, kind, "seatNumber")?,
            price: parse_number(price, kind, "price")?,
        })
    }
}

/// A persisted reservation: `showtimeId;customerId;seatNumber;price`.
///
/// The reservation identifier is the storage key and is not repeated in the
/// record itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationRecord {
    /// Showtime the seat belongs to
    pub showtime_id: String,

    /// Customer holding the seat
    pub customer_id: String,

    /// Reserved seat
    pub seat_number: u32,

    /// Price charged
    pub price: Decimal,
}

impl fmt::Display for ReservationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{};{};{};{}",
            self.showtime_id, self.customer_id, self.seat_number, self.price
        )
    }
}
