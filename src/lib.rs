//! League Core - Monte Carlo simulation of the remainder of a football league season.
//!
//! Team scoring statistics are aggregated from completed matches, every pending fixture
//! is replayed many times from those statistics, and the resulting final tables are
//! reduced to title, qualification and relegation probabilities. Optional Python bindings
//! are available through the `python` feature.

pub mod config;
pub mod constants;
pub mod error;
pub mod fixtures;
pub mod league;
pub mod matches;
pub mod pipeline;
pub mod sampler;
pub mod season;
pub mod standings;
pub mod stats;
pub mod team;

#[cfg(feature = "python")]
pub mod python;

pub use config::{SimulationConfig, ZoneConfig};
pub use constants::{DEFAULT_TRIALS, MIN_GOAL_RATE, NOISE_SCALE};
pub use error::{MatchError, SimulationError};
pub use fixtures::{next_round, pending_fixtures, Fixture, FixtureReport};
pub use league::LeagueConfig;
pub use matches::{ingest, ingest_json, Ingested, Match, MatchStatus, RawMatchRecord, TeamId};
pub use pipeline::{simulate_league, simulate_league_until};
pub use sampler::{OutcomeSampler, PoissonNoiseSampler};
pub use season::{Ranking, SeasonSimulator, SimulationRun, Tallies};
pub use standings::{current_table, summarize, ProbabilitySummary, TableRow};
pub use stats::{aggregate_stats, check_registry, StatsMap, StatsReport};
pub use team::TeamSeasonStats;

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// Python module definition
#[cfg(feature = "python")]
#[pymodule]
fn league_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(python::simulate_league, m)?)?;
    m.add_function(wrap_pyfunction!(python::current_table, m)?)?;

    // Constants
    m.add("DEFAULT_TRIALS", DEFAULT_TRIALS)?;
    m.add("MIN_GOAL_RATE", MIN_GOAL_RATE)?;
    m.add("NOISE_SCALE", NOISE_SCALE)?;

    Ok(())
}
