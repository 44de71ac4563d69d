//! Cinema Store
//!
//! Key-value persistence for flat film, showtime and reservation records,
//! plus the event log.

#[cfg(test)]
use mockall::automock;
use rustc_hash::FxHashMap;
use tracing::info;

use crate::records::DELIMITER;

/// Tracing target for logged catalog events.
pub const EVENT_TARGET: &str = "cinema::events";

/// Persistence consumed by the catalog.
#[cfg_attr(test, automock)]
pub trait CinemaStore {
    /// Look up a film record by identifier.
    fn find_film(&self, id: &str) -> Option<String>;

    /// Store a film record, keyed by its first field, and return that key.
    fn add_film_record(&mut self, record: String) -> String;

    /// Look up a showtime record by identifier.
    fn find_showtime(&self, id: &str) -> Option<String>;

    /// Identifiers of every showtime screening a film, in insertion order.
    fn showtimes_for_film(&self, film_id: &str) -> Vec<String>;

    /// Store a showtime record and return its generated identifier.
    fn add_showtime(&mut self, record: String) -> String;

    /// Look up a reservation record by identifier.
    fn find_reservation(&self, id: &str) -> Option<String>;

    /// Store a reservation record and return its generated identifier.
    fn add_reservation(&mut self, record: String) -> String;

    /// Append an entry to the event log.
    fn log_event(&mut self, event: &str);
}

/// Process-lifetime, in-memory store.
///
/// Showtime identifiers are `S1`, `S2`, ... and reservation identifiers are
/// `R1`, `R2`, ..., never reused.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    films: FxHashMap<String, String>,
    showtimes: FxHashMap<String, String>,
    showtime_order: Vec<String>,
    reservations: FxHashMap<String, String>,
    showtime_seq: u64,
    reservation_seq: u64,
    events: Vec<String>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Logged events, oldest first
    pub fn events(&self) -> &[String] {
        &self.events
    }

    /// Number of stored reservations
    pub fn reservation_count(&self) -> usize {
        self.reservations.len()
    }
}

impl CinemaStore for InMemoryStore {
    fn find_film(&self, id: &str) -> Option<String> {
        self.films.get(id).cloned()
    }

    fn add_film_record(&mut self, record: String) -> String {
        let id = record
            .split_once(DELIMITER)
            .map_or(record.as_str(), |(id, _)| id)
            .to_owned();

        self.films.insert(id.clone(), record);

        id
    }

    fn find_showtime(&self, id: &str) -> Option<String> {
        self.showtimes.get(id).cloned()
    }

    fn showtimes_for_film(&self, film_id: &str) -> Vec<String> {
        self.showtime_order
            .iter()
            .filter(|id| {
                self.showtimes.get(id.as_str()).is_some_and(|record| {
                    record
                        .split(DELIMITER)
                        .next()
                        .is_some_and(|field| field == film_id)
                })
            })
            .cloned()
            .collect()
    }

    fn add_showtime(&mut self, record: String) -> String {
        self.showtime_seq += 1;

        let id = format!("S{}", self.showtime_seq);

        self.showtimes.insert(id.clone(), record);
        self.showtime_order.push(id.clone());

        id
    }

    fn find_reservation(&self, id: &str) -> Option<String> {
        self.reservations.get(id).cloned()
    }

    fn add_reservation(&mut self, record: String) -> String {
        self.reservation_seq += 1;

        let id = format!("R{}", self.reservation_seq);

        self.reservations.insert(id.clone(), record);

        id
    }

    fn log_event(&mut self, event: &str) {
        info!(target: EVENT_TARGET, event, "catalog event");

        self.events.push(event.to_owned());
    }
}
