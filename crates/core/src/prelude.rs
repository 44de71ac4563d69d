//! Cinema prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    catalog::Catalog,
    films::{Film, PricedItem},
    pricing::{Adjustment, PricedFilm, PricingError},
    records::{RecordError, RecordKind, ReservationRecord, ReservationRequest, ShowtimeRecord},
    showtimes::{SeatReservation, Showtime},
    store::{CinemaStore, InMemoryStore},
    strategies::CreationStrategy,
};
