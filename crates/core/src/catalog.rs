//! Catalog
//!
//! Orchestrates film creation and seat reservations on top of a
//! [`CinemaStore`]. Malformed records are returned as [`RecordError`]s;
//! business refusals (unknown showtime, taken seat) come back as `Ok`
//! messages.

use std::collections::hash_map::Entry;

use rustc_hash::FxHashMap;
use tracing::{Span, info};

use crate::{
    films::PricedItem,
    records::{RecordError, ReservationRecord, ReservationRequest, ShowtimeRecord},
    showtimes::{SeatReservation, Showtime},
    store::CinemaStore,
    strategies::CreationStrategy,
};

/// Catalog facade over a store and the seat inventory of every showtime.
#[derive(Debug)]
pub struct Catalog<S> {
    store: S,
    showtimes: FxHashMap<String, Showtime>,
}

impl<S: CinemaStore> Catalog<S> {
    /// Creates a catalog backed by `store`.
    pub fn new(store: S) -> Self {
        Self {
            store,
            showtimes: FxHashMap::default(),
        }
    }

    /// The backing store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consume the catalog, returning the backing store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Build a film with `strategy`, persist it and log the addition.
    ///
    /// Returns a confirmation message containing the film identifier.
    ///
    /// # Errors
    ///
    /// Returns a [`RecordError`] if the film record is malformed or its price
    /// cannot be adjusted without overflowing.
    #[tracing::instrument(
        name = "catalog.add_film",
        skip(self, strategy),
        fields(strategy = strategy.name(), film_id = tracing::field::Empty),
        err
    )]
    pub fn add_film(
        &mut self,
        record: &str,
        strategy: &CreationStrategy,
    ) -> Result<String, RecordError> {
        let film = strategy.create_item(record)?;

        let id = self.store.add_film_record(film.to_record());

        Span::current().record("film_id", tracing::field::display(&id));

        self.store.log_event(&format!("Film added: {id}"));

        Ok(format!("Film added successfully. ID: {id}"))
    }

    /// Persist a showtime and open its seat inventory.
    ///
    /// Returns a confirmation message containing the generated identifier.
    ///
    /// # Errors
    ///
    /// Returns a [`RecordError`] if the showtime record is malformed.
    #[tracing::instrument(
        name = "catalog.add_showtime",
        skip(self),
        fields(showtime_id = tracing::field::Empty),
        err
    )]
    pub fn add_showtime(&mut self, record: &str) -> Result<String, RecordError> {
        let parsed = ShowtimeRecord::parse(record)?;

        let id = self.store.add_showtime(record.to_owned());

        Span::current().record("showtime_id", tracing::field::display(&id));

        self.showtimes
            .insert(id.clone(), Showtime::from_record(id.clone(), parsed));

        self.store.log_event(&format!("Showtime added: {id}"));

        Ok(format!("Showtime added successfully. ID: {id}"))
    }

    /// List the showtimes screening a film.
    #[tracing::instrument(name = "catalog.schedule", skip(self))]
    pub fn schedule(&self, film_id: &str) -> String {
        let ids = self.store.showtimes_for_film(film_id);

        if ids.is_empty() {
            return format!("No showtimes for film: {film_id}");
        }

        let lines: String = ids
            .iter()
            .filter_map(|id| {
                self.store
                    .find_showtime(id)
                    .map(|record| format!("  - Showtime {id}: {record}\n"))
            })
            .collect();

        format!("Schedule for film {film_id}:\n{lines}")
    }

    /// Reserve a seat from a `showtimeId;customerId;seatNumber;price` request.
    ///
    /// The seat is claimed in the showtime's inventory before anything is
    /// persisted, so a seat is never sold twice. Unknown showtimes and
    /// refused seats produce an error message and no reservation record.
    ///
    /// # Errors
    ///
    /// Returns a [`RecordError`] if the request is malformed, or if the stored
    /// showtime record cannot be parsed.
    #[tracing::instrument(
        name = "catalog.reserve_seat",
        skip(self),
        fields(reservation_id = tracing::field::Empty),
        err
    )]
    pub fn reserve_seat(&mut self, request: &str) -> Result<String, RecordError> {
        let request = ReservationRequest::parse(request)?;
        let showtime_id = request.showtime_id.as_str();

        let Some(showtime) = self.inventory(showtime_id)? else {
            info!(showtime_id, "reservation refused: unknown showtime");

            return Ok(format!("Error: showtime with ID {showtime_id} does not exist"));
        };

        let seat_number = match showtime.reserve_seat(request.seat_number) {
            SeatReservation::Reserved(seat) => seat,
            SeatReservation::OutOfRange => {
                info!(
                    showtime_id,
                    seat = request.seat_number,
                    "reservation refused: seat out of range"
                );

                return Ok(format!(
                    "Error: seat {} is out of range for showtime {showtime_id}",
                    request.seat_number
                ));
            }
            SeatReservation::AlreadyTaken => {
                info!(
                    showtime_id,
                    seat = request.seat_number,
                    "reservation refused: seat taken"
                );

                return Ok(format!(
                    "Error: seat {} is already taken for showtime {showtime_id}",
                    request.seat_number
                ));
            }
        };

        let record = ReservationRecord {
            showtime_id: request.showtime_id.clone(),
            customer_id: request.customer_id.clone(),
            seat_number,
            price: request.price,
        };

        let id = self.store.add_reservation(record.to_string());

        Span::current().record("reservation_id", tracing::field::display(&id));

        self.store.log_event(&format!(
            "Ticket reserved: {id} for customer: {}",
            request.customer_id
        ));

        Ok(format!(
            "Reservation completed successfully. ID: {id}, price: {} PLN",
            request.price
        ))
    }

    /// Free seats of a showtime in ascending order, or `None` if the
    /// showtime does not exist.
    ///
    /// # Errors
    ///
    /// Returns a [`RecordError`] if the stored showtime record cannot be parsed.
    pub fn free_seats(&mut self, showtime_id: &str) -> Result<Option<Vec<u32>>, RecordError> {
        Ok(self
            .inventory(showtime_id)?
            .map(|showtime| showtime.free_seats().collect()))
    }

    /// Seat inventory for a showtime known to the catalog.
    pub fn showtime(&self, showtime_id: &str) -> Option<&Showtime> {
        self.showtimes.get(showtime_id)
    }

    /// Resolve a showtime through the store, opening its inventory on first
    /// use when the record was written by someone else.
    fn inventory(&mut self, showtime_id: &str) -> Result<Option<&mut Showtime>, RecordError> {
        let Some(record) = self.store.find_showtime(showtime_id) else {
            return Ok(None);
        };

        let showtime = match self.showtimes.entry(showtime_id.to_owned()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let parsed = ShowtimeRecord::parse(&record)?;

                entry.insert(Showtime::from_record(showtime_id, parsed))
            }
        };

        Ok(Some(showtime))
    }
}
