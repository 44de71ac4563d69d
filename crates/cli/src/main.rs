//! Cinema catalog CLI

use std::io::{self, Write};

use anyhow::Context;
use cinema::{catalog::Catalog, store::InMemoryStore};
use tracing::info;

use crate::{
    config::{CliConfig, Command},
    logging::init_subscriber,
    scenario::Scenario,
};

mod config;
mod demo;
mod logging;
mod scenario;

fn main() -> anyhow::Result<()> {
    let config = CliConfig::load()?;

    init_subscriber(&config.logging)?;

    let scenario = Scenario::load(config.scenario.as_deref()).context("failed to load scenario")?;

    info!(
        films = scenario.films.len(),
        showtimes = scenario.showtimes.len(),
        "scenario loaded"
    );

    let mut catalog = Catalog::new(InMemoryStore::new());
    let mut out = io::stdout().lock();

    match config.command {
        Command::Demo => demo::run(&scenario, &mut catalog, &mut out)?,
        Command::Schedule { film_id } => {
            scenario.populate(&mut catalog)?;
            demo::schedule(&catalog, &film_id, &mut out)?;
        }
        Command::Reserve { requests } => {
            scenario.populate(&mut catalog)?;

            let messages = requests
                .iter()
                .map(|request| catalog.reserve_seat(request))
                .collect::<Result<Vec<_>, _>>()?;

            demo::write_results(&mut out, &messages)?;
        }
        Command::Seats { showtime_id } => {
            scenario.populate(&mut catalog)?;
            demo::seats(&mut catalog, &showtime_id, &mut out)?;
        }
        Command::AddFilm(args) => {
            scenario.populate(&mut catalog)?;

            let message = catalog.add_film(&args.record, &args.strategy()?)?;

            demo::write_results(&mut out, &[message])?;
        }
    }

    out.flush()?;

    Ok(())
}
