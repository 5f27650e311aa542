// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! # rr-fixtures
//!
//! Plans round-robin fixtures for a data set stored as a JSON snapshot.
//!
//! ```text
//! rr-fixtures plan --input league.json --round 1 --output league.json
//! rr-fixtures plan --input league.json --tournament 5 --keep-existing
//! ```
//!
//! The planned matches are printed as JSON on standard output; log lines go
//! to standard error. Without `--output` nothing is written back. `RUST_LOG`
//! takes precedence over `-v`/`-q`.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::{Result, eyre::Context};
use rr_fixtures::{InMemoryRepository, MatchPlanner, PlanOutcome, PlanningSettings};
use rr_fixtures_domain::{GroupingStrategy, RefereeType, RoundId, TournamentId};
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_log::AsTrace;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    let filter = EnvFilter::builder()
        .with_default_directive(args.log_level().into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    match args.run() {
        Ok(()) => (),
        Err(err) => {
            tracing::error!("{err:#}");
            std::process::exit(1);
        }
    }
    Ok(())
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

impl Args {
    fn run(self) -> Result<()> {
        match self.command {
            Command::Plan(plan) => plan.run(),
        }
    }

    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }
}

#[derive(Clone, Debug, Subcommand)]
enum Command {
    /// Plan the fixtures of a round or a whole tournament
    #[command(visible_alias = "p")]
    Plan(PlanArgs),
}

#[derive(Clone, Debug, clap::Args)]
struct PlanArgs {
    /// Snapshot with settings, teams, rounds and stored matches
    #[arg(short, long)]
    input: PathBuf,

    /// Plan a single round
    #[arg(short, long, conflicts_with = "tournament", required_unless_present = "tournament")]
    round: Option<i64>,

    /// Plan every round of a tournament
    #[arg(short, long)]
    tournament: Option<i64>,

    /// Keep stored matches and only add missing fixtures
    #[arg(long)]
    keep_existing: bool,

    /// Include the dates generated from home slots in the report
    #[arg(long)]
    show_generated: bool,

    /// Write the updated snapshot here
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Override the IANA time zone from the snapshot
    #[arg(long)]
    time_zone: Option<String>,

    /// Override the referee type (`None`, `Home`, `Guest`, `OtherFromRound`)
    #[arg(long)]
    referee_type: Option<RefereeType>,

    /// Override the grouping strategy (`NoGrouping`, `AlternatingFill`, `LeastGroupsPossible`)
    #[arg(long)]
    grouping: Option<GroupingStrategy>,

    /// Override the planned match duration in minutes
    #[arg(long)]
    match_minutes: Option<u32>,
}

impl PlanArgs {
    fn run(self) -> Result<()> {
        let json = std::fs::read_to_string(&self.input)
            .wrap_err_with(|| format!("reading {}", self.input.display()))?;
        let repository = InMemoryRepository::from_json(&json)
            .wrap_err_with(|| format!("parsing {}", self.input.display()))?;
        let settings = self.settings(repository.settings()?);
        info!(
            time_zone = %settings.time_zone,
            referee = %settings.referee_type,
            grouping = %settings.grouping_strategy,
            "Loaded {}",
            self.input.display()
        );

        let planner = MatchPlanner::new(&repository, settings);
        let mut outcome = match (self.round, self.tournament) {
            (Some(round), _) => {
                planner.generate_fixtures_for_round(RoundId(round), self.keep_existing)?
            }
            (None, Some(tournament)) => planner
                .generate_fixtures_for_tournament(TournamentId(tournament), self.keep_existing)?,
            (None, None) => PlanOutcome::default(),
        };
        let undated = outcome
            .matches
            .iter()
            .filter(|m| m.planned_start.is_none())
            .count();
        info!(matches = outcome.matches.len(), undated, "Planning finished");

        if !self.show_generated {
            outcome.generated_dates.clear();
        }
        println!("{}", serde_json::to_string_pretty(&outcome)?);

        if let Some(output) = &self.output {
            std::fs::write(output, repository.to_json()?)
                .wrap_err_with(|| format!("writing {}", output.display()))?;
            info!("Wrote {}", output.display());
        }
        Ok(())
    }

    fn settings(&self, mut settings: PlanningSettings) -> PlanningSettings {
        if let Some(time_zone) = &self.time_zone {
            settings.time_zone.clone_from(time_zone);
        }
        if let Some(referee_type) = self.referee_type {
            settings.referee_type = referee_type;
        }
        if let Some(grouping) = self.grouping {
            settings.grouping_strategy = grouping;
        }
        if let Some(minutes) = self.match_minutes {
            settings.planned_duration_of_match_minutes = minutes;
        }
        settings
    }
}
