//! Showtime Seat Inventory

use std::{collections::BTreeSet, num::NonZeroU32};

use crate::records::ShowtimeRecord;

/// Outcome of a seat reservation attempt.
///
/// A refused seat is an expected business outcome, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum SeatReservation {
    /// The seat was free and is now occupied.
    Reserved(u32),

    /// The seat number is outside `1..=total_seats`.
    OutOfRange,

    /// The seat is already occupied.
    AlreadyTaken,
}

impl SeatReservation {
    /// Whether the seat was reserved
    pub fn is_reserved(self) -> bool {
        matches!(self, SeatReservation::Reserved(_))
    }
}

/// A scheduled screening and the seats currently occupied for it.
///
/// Occupied seats always lie within `1..=total_seats`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Showtime {
    id: String,
    film_id: String,
    starts_at: String,
    room: String,
    total_seats: NonZeroU32,
    occupied: BTreeSet<u32>,
}

impl Showtime {
    /// Creates a showtime with every seat free.
    pub fn new(
        id: impl Into<String>,
        film_id: impl Into<String>,
        starts_at: impl Into<String>,
        room: impl Into<String>,
        total_seats: NonZeroU32,
    ) -> Self {
        Self {
            id: id.into(),
            film_id: film_id.into(),
            starts_at: starts_at.into(),
            room: room.into(),
            total_seats,
            occupied: BTreeSet::new(),
        }
    }

    /// Creates a showtime from a parsed record and its assigned identifier.
    pub fn from_record(id: impl Into<String>, record: ShowtimeRecord) -> Self {
        Self::new(
            id,
            record.film_id,
            record.starts_at,
            record.room,
            record.total_seats,
        )
    }

    /// Showtime identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Film being screened
    pub fn film_id(&self) -> &str {
        &self.film_id
    }

    /// Date and time of the screening
    pub fn starts_at(&self) -> &str {
        &self.starts_at
    }

    /// Room identifier
    pub fn room(&self) -> &str {
        &self.room
    }

    /// Number of seats in the room
    pub fn total_seats(&self) -> NonZeroU32 {
        self.total_seats
    }

    /// Reserve a seat.
    ///
    /// Refuses seats outside `1..=total_seats` and seats that are already
    /// occupied; a refusal leaves occupancy unchanged.
    pub fn reserve_seat(&mut self, seat: i64) -> SeatReservation {
        let Some(seat) = self.seat_in_range(seat) else {
            return SeatReservation::OutOfRange;
        };

        if self.occupied.insert(seat) {
            SeatReservation::Reserved(seat)
        } else {
            SeatReservation::AlreadyTaken
        }
    }

    /// Release a seat. Releasing a free or out-of-range seat does nothing.
    pub fn release_seat(&mut self, seat: i64) {
        if let Some(seat) = self.seat_in_range(seat) {
            self.occupied.remove(&seat);
        }
    }

    /// Whether a seat is currently occupied
    pub fn is_occupied(&self, seat: u32) -> bool {
        self.occupied.contains(&seat)
    }

    /// Free seats in ascending order, computed from current occupancy.
    pub fn free_seats(&self) -> impl Iterator<Item = u32> + '_ {
        (1..=self.total_seats.get()).filter(|seat| !self.occupied.contains(seat))
    }

    /// Occupied seats in ascending order.
    pub fn occupied_seats(&self) -> impl Iterator<Item = u32> + '_ {
        self.occupied.iter().copied()
    }

    fn seat_in_range(&self, seat: i64) -> Option<u32> {
        u32::try_from(seat)
            .ok()
            .filter(|seat| (1..=self.total_seats.get()).contains(seat))
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn showtime(total: u32) -> Result<Showtime, &'static str> {
        let total = NonZeroU32::new(total).ok_or("seat count must be positive")?;

        Ok(Showtime::new("S1", "F1", "2024-12-20 18:00", "Room1", total))
    }

    fn assert_partition(showtime: &Showtime) -> TestResult {
        let total = usize::try_from(showtime.total_seats().get())?;
        let free = showtime.free_seats().count();
        let occupied = showtime.occupied_seats().count();

        assert_eq!(free + occupied, total, "free and occupied must cover all seats");

        Ok(())
    }

    #[test]
    fn new_showtime_has_every_seat_free() -> TestResult {
        let showtime = showtime(5)?;

        assert_eq!(showtime.free_seats().collect::<Vec<_>>(), [1, 2, 3, 4, 5]);
        assert_eq!(showtime.occupied_seats().count(), 0);
        assert_partition(&showtime)?;

        Ok(())
    }

    #[test]
    fn reserve_seat_occupies_it() -> TestResult {
        let mut showtime = showtime(3)?;

        assert_eq!(showtime.reserve_seat(2), SeatReservation::Reserved(2));
        assert!(showtime.is_occupied(2));
        assert_eq!(showtime.free_seats().collect::<Vec<_>>(), [1, 3]);
        assert_partition(&showtime)?;

        Ok(())
    }

    #[test]
    fn reserve_seat_refuses_out_of_range() -> TestResult {
        let mut showtime = showtime(10)?;

        for seat in [-1, 0, 11, 100, i64::MAX, i64::MIN] {
            assert_eq!(
                showtime.reserve_seat(seat),
                SeatReservation::OutOfRange,
                "seat {seat} should be out of range"
            );
        }

        assert_eq!(showtime.occupied_seats().count(), 0);

        Ok(())
    }

    #[test]
    fn reserve_seat_accepts_bounds() -> TestResult {
        let mut showtime = showtime(10)?;

        assert!(showtime.reserve_seat(1).is_reserved());
        assert!(showtime.reserve_seat(10).is_reserved());

        Ok(())
    }

    #[test]
    fn reserve_occupied_seat_is_refused_without_change() -> TestResult {
        let mut showtime = showtime(2)?;

        assert!(showtime.reserve_seat(1).is_reserved());
        assert_eq!(showtime.free_seats().collect::<Vec<_>>(), [2]);

        assert_eq!(showtime.reserve_seat(1), SeatReservation::AlreadyTaken);
        assert!(!showtime.reserve_seat(1).is_reserved());
        assert_eq!(showtime.free_seats().collect::<Vec<_>>(), [2]);
        assert_eq!(showtime.occupied_seats().collect::<Vec<_>>(), [1]);

        Ok(())
    }

    #[test]
    fn release_then_reserve_succeeds() -> TestResult {
        let mut showtime = showtime(4)?;

        assert!(showtime.reserve_seat(3).is_reserved());
        showtime.release_seat(3);

        assert!(!showtime.is_occupied(3));
        assert_eq!(showtime.reserve_seat(3), SeatReservation::Reserved(3));
        assert_partition(&showtime)?;

        Ok(())
    }

    #[test]
    fn release_free_or_out_of_range_seat_is_noop() -> TestResult {
        let mut showtime = showtime(4)?;

        assert!(showtime.reserve_seat(2).is_reserved());
        let before = showtime.clone();

        showtime.release_seat(1);
        showtime.release_seat(0);
        showtime.release_seat(-7);
        showtime.release_seat(99);

        assert_eq!(showtime, before);

        Ok(())
    }

    #[test]
    fn free_seats_reflect_latest_occupancy() -> TestResult {
        let mut showtime = showtime(6)?;

        for seat in [5, 1, 3] {
            assert!(showtime.reserve_seat(seat).is_reserved());
        }

        assert_eq!(showtime.free_seats().collect::<Vec<_>>(), [2, 4, 6]);

        showtime.release_seat(1);

        assert_eq!(showtime.free_seats().collect::<Vec<_>>(), [1, 2, 4, 6]);
        assert_eq!(showtime.occupied_seats().collect::<Vec<_>>(), [3, 5]);
        assert_partition(&showtime)?;

        Ok(())
    }

    #[test]
    fn partition_holds_through_mixed_operations() -> TestResult {
        let mut showtime = showtime(7)?;
        let operations: [(bool, i64); 10] = [
            (true, 1),
            (true, 7),
            (true, 7),
            (false, 1),
            (true, 0),
            (true, 4),
            (false, 9),
            (true, 1),
            (false, 4),
            (true, 8),
        ];

        for (reserve, seat) in operations {
            if reserve {
                let _outcome = showtime.reserve_seat(seat);
            } else {
                showtime.release_seat(seat);
            }

            assert_partition(&showtime)?;
        }

        assert_eq!(showtime.occupied_seats().collect::<Vec<_>>(), [1, 7]);

        Ok(())
    }

    #[test]
    fn from_record_keeps_record_fields() -> TestResult {
        let record = ShowtimeRecord::parse("F1;2024-12-21 19:00;Room2;80")?;
        let showtime = Showtime::from_record("S7", record);

        assert_eq!(showtime.id(), "S7");
        assert_eq!(showtime.film_id(), "F1");
        assert_eq!(showtime.starts_at(), "2024-12-21 19:00");
        assert_eq!(showtime.room(), "Room2");
        assert_eq!(showtime.total_seats().get(), 80);

        Ok(())
    }
}
