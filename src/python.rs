//! Python bindings. Inputs and outputs are JSON strings in the shapes the Rust types
//! (de)serialise to, with match records in the provider's raw form.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::config::SimulationConfig;
use crate::league::LeagueConfig;
use crate::matches::ingest_json;
use crate::pipeline;
use crate::standings;

fn value_error(err: impl std::fmt::Display) -> PyErr {
    PyValueError::new_err(err.to_string())
}

/// Simulate the remaining season of one league.
///
/// Returns the probability summary as JSON.
#[pyfunction]
#[pyo3(signature = (matches_json, league_json, config_json = None))]
pub fn simulate_league(
    py: Python<'_>,
    matches_json: &str,
    league_json: &str,
    config_json: Option<&str>,
) -> PyResult<String> {
    let matches = ingest_json(matches_json).map_err(value_error)?.matches;
    let league: LeagueConfig = serde_json::from_str(league_json).map_err(value_error)?;
    let config: SimulationConfig = match config_json {
        Some(json) => serde_json::from_str(json).map_err(value_error)?,
        None => SimulationConfig::default(),
    };

    let summary = py
        .allow_threads(|| pipeline::simulate_league(&matches, &league, &config))
        .map_err(value_error)?;
    serde_json::to_string(&summary).map_err(value_error)
}

/// Current table of one league from completed matches, as JSON.
#[pyfunction]
pub fn current_table(matches_json: &str, league_json: &str) -> PyResult<String> {
    let matches = ingest_json(matches_json).map_err(value_error)?.matches;
    let league: LeagueConfig = serde_json::from_str(league_json).map_err(value_error)?;
    let table = standings::current_table(&matches, &league.id);
    serde_json::to_string(&table).map_err(value_error)
}
