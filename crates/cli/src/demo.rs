//! Demo walkthrough
//!
//! Replays a scenario against a catalog and reports each step.

use std::io;

use anyhow::Context;
use cinema::{
    catalog::Catalog,
    films::{Film, PricedItem},
    pricing::PricedFilm,
    store::CinemaStore,
};
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Style, Theme,
        object::{Columns, Rows},
    },
};

use crate::scenario::Scenario;

/// Run the full walkthrough: films, showtimes, schedule, reservations and
/// ticket pricing.
///
/// # Errors
///
/// Returns an error if the scenario contains a malformed record, or if
/// writing to `out` fails.
pub fn run<S: CinemaStore>(
    scenario: &Scenario,
    catalog: &mut Catalog<S>,
    out: &mut impl io::Write,
) -> anyhow::Result<()> {
    heading(out, "Adding films")?;
    write_results(out, &scenario.add_films(catalog)?)?;
    write_film_table(out, scenario, catalog)?;

    heading(out, "Adding showtimes")?;
    write_results(out, &scenario.add_showtimes(catalog)?)?;

    heading(out, "Schedule")?;
    for film_id in &scenario.schedule {
        writeln!(out, "{}", catalog.schedule(film_id))?;
    }

    heading(out, "Reservations")?;
    write_results(out, &scenario.reserve(catalog)?)?;
    write_seat_table(out, scenario, catalog)?;

    if let Some(showcase) = &scenario.showcase {
        heading(out, "Ticket pricing")?;

        let film = Film::from_record(&showcase.record).context("invalid showcase film")?;
        let vip = showcase.vip.adjustment()?;
        let promotion = showcase.promotion.adjustment();

        let tiers = [
            ("Standard", PricedFilm::new(film.clone())),
            ("VIP", PricedFilm::new(film.clone()).then(vip.clone())?),
            (
                "Promotional",
                PricedFilm::new(film.clone()).then(promotion.clone())?,
            ),
            (
                "VIP, then promotion",
                PricedFilm::new(film.clone())
                    .then(vip.clone())?
                    .then(promotion.clone())?,
            ),
            (
                "Promotion, then VIP",
                PricedFilm::new(film).then(promotion)?.then(vip)?,
            ),
        ];

        write_pricing_table(out, &tiers)?;
    }

    Ok(())
}

/// Print the schedule of a single film.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn schedule<S: CinemaStore>(
    catalog: &Catalog<S>,
    film_id: &str,
    out: &mut impl io::Write,
) -> io::Result<()> {
    writeln!(out, "{}", catalog.schedule(film_id))
}

/// Print the free seats of a showtime.
///
/// # Errors
///
/// Returns an error if the stored showtime is malformed, or if writing to
/// `out` fails.
pub fn seats<S: CinemaStore>(
    catalog: &mut Catalog<S>,
    showtime_id: &str,
    out: &mut impl io::Write,
) -> anyhow::Result<()> {
    match catalog.free_seats(showtime_id)? {
        Some(free) => {
            let seats = free
                .iter()
                .map(u32::to_string)
                .collect::<Vec<_>>()
                .join(", ");

            writeln!(
                out,
                "Showtime {showtime_id}: {} free seat(s): {seats}",
                free.len()
            )?;
        }
        None => writeln!(out, "Error: showtime with ID {showtime_id} does not exist")?,
    }

    Ok(())
}

/// Print one `Result:` line per catalog message.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_results(out: &mut impl io::Write, messages: &[String]) -> io::Result<()> {
    for message in messages {
        writeln!(out, "Result: {message}")?;
    }

    Ok(())
}

fn heading(out: &mut impl io::Write, title: &str) -> io::Result<()> {
    writeln!(out, "\n=== {title} ===")
}

fn write_film_table<S: CinemaStore>(
    out: &mut impl io::Write,
    scenario: &Scenario,
    catalog: &Catalog<S>,
) -> anyhow::Result<()> {
    let mut builder = Builder::default();

    builder.push_record(["ID", "Title", "Genre", "Minutes", "Price", "Description"]);

    for entry in &scenario.films {
        let id = Film::from_record(&entry.record)?.id().to_owned();

        let Some(stored) = catalog.store().find_film(&id) else {
            continue;
        };

        let film = Film::from_record(&stored)
            .with_context(|| format!("stored film {id} is malformed"))?;

        builder.push_record([
            film.id().to_owned(),
            film.title().to_owned(),
            film.genre().to_owned(),
            film.duration_minutes().to_string(),
            format!("{:.2}", film.price()),
            film.description().into_owned(),
        ]);
    }

    write_table(out, builder, 4..5)
}

fn write_seat_table<S: CinemaStore>(
    out: &mut impl io::Write,
    scenario: &Scenario,
    catalog: &mut Catalog<S>,
) -> anyhow::Result<()> {
    let mut builder = Builder::default();

    builder.push_record(["Showtime", "Film", "Starts", "Room", "Free", "Occupied"]);

    for entry in &scenario.films {
        let film_id = Film::from_record(&entry.record)?.id().to_owned();

        for showtime_id in catalog.store().showtimes_for_film(&film_id) {
            // Opens the inventory if the showtime was stored elsewhere.
            catalog.free_seats(&showtime_id)?;

            let Some(showtime) = catalog.showtime(&showtime_id) else {
                continue;
            };

            builder.push_record([
                showtime.id().to_owned(),
                showtime.film_id().to_owned(),
                showtime.starts_at().to_owned(),
                showtime.room().to_owned(),
                showtime.free_seats().count().to_string(),
                showtime.occupied_seats().count().to_string(),
            ]);
        }
    }

    write_table(out, builder, 4..6)
}

fn write_pricing_table(
    out: &mut impl io::Write,
    tiers: &[(&str, PricedFilm)],
) -> anyhow::Result<()> {
    let mut builder = Builder::default();

    builder.push_record(["Tier", "Price", "Description"]);

    for (tier, item) in tiers {
        builder.push_record([
            (*tier).to_owned(),
            format!("{:.2}", item.price()),
            item.description().into_owned(),
        ]);
    }

    write_table(out, builder, 1..2)
}

fn write_table(
    out: &mut impl io::Write,
    builder: Builder,
    numeric: std::ops::Range<usize>,
) -> anyhow::Result<()> {
    let mut table = builder.build();

    table.with(Theme::from(Style::modern_rounded()));
    table.modify(Columns::new(numeric), Alignment::right());
    table.modify(Rows::first(), Alignment::center());

    writeln!(out, "{table}")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use cinema::store::InMemoryStore;
    use testresult::TestResult;

    use super::*;

    fn render(scenario: &Scenario) -> Result<String, Box<dyn std::error::Error>> {
        let mut catalog = Catalog::new(InMemoryStore::new());
        let mut out = Vec::new();

        run(scenario, &mut catalog, &mut out)?;

        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn builtin_walkthrough_reports_every_step() -> TestResult {
        let output = render(&Scenario::load(None)?)?;

        assert!(output.contains("=== Adding films ==="));
        assert!(output.contains("Result: Film added successfully. ID: 1"));
        assert!(output.contains("Result: Showtime added successfully. ID: S3"));
        assert!(output.contains("Schedule for film 1:"));
        assert!(output.contains("No showtimes for film: 3"));
        assert!(output.contains("Result: Reservation completed successfully. ID: R1"));
        assert!(output.contains("Result: Error: seat 15 is already taken for showtime S1"));
        assert!(output.contains("Result: Error: seat 120 is out of range for showtime S3"));
        assert!(output.contains("Result: Error: showtime with ID S9 does not exist"));

        Ok(())
    }

    #[test]
    fn pricing_table_shows_order_dependent_prices() -> TestResult {
        let output = render(&Scenario::load(None)?)?;

        assert!(output.contains("=== Ticket pricing ==="));
        assert!(output.contains("Test description [VIP: Premium seats, Free popcorn, Meet the makers]"));
        assert!(output.contains("Test description [PROMO: Weekend special -20%]"));
        let row = |tier: &str| {
            output
                .lines()
                .find(|line| line.contains(tier))
                .unwrap_or_default()
        };

        // (30 + 15) * 0.8
        assert!(
            row("VIP, then promotion").contains("36.00"),
            "unexpected row: {}",
            row("VIP, then promotion")
        );
        // 30 * 0.8 + 15
        assert!(
            row("Promotion, then VIP").contains("39.00"),
            "unexpected row: {}",
            row("Promotion, then VIP")
        );
        assert!(row("Standard").contains("30.00"), "unexpected row: {}", row("Standard"));

        Ok(())
    }

    #[test]
    fn walkthrough_without_showcase_skips_pricing() -> TestResult {
        let scenario = Scenario::from_yaml(
            "films:\n  - record: \"1;Inception;Mind-bending thriller;148;Sci-Fi;25.50\"\n",
        )?;

        let output = render(&scenario)?;

        assert!(output.contains("Inception"));
        assert!(!output.contains("Ticket pricing"));

        Ok(())
    }

    #[test]
    fn seats_lists_free_seats() -> TestResult {
        let mut catalog = Catalog::new(InMemoryStore::new());
        catalog.add_showtime("1;2024-12-20 18:00;Room1;3")?;
        catalog.reserve_seat("S1;K001;2;25.50")?;

        let mut out = Vec::new();
        seats(&mut catalog, "S1", &mut out)?;

        assert_eq!(
            String::from_utf8(out)?,
            "Showtime S1: 2 free seat(s): 1, 3\n"
        );

        Ok(())
    }

    #[test]
    fn seats_reports_unknown_showtime() -> TestResult {
        let mut catalog = Catalog::new(InMemoryStore::new());

        let mut out = Vec::new();
        seats(&mut catalog, "S7", &mut out)?;

        assert_eq!(
            String::from_utf8(out)?,
            "Error: showtime with ID S7 does not exist\n"
        );

        Ok(())
    }
}
