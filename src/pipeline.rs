use std::sync::atomic::AtomicBool;

use tracing::info;

use crate::config::SimulationConfig;
use crate::error::SimulationError;
use crate::fixtures::{next_round, pending_fixtures};
use crate::league::LeagueConfig;
use crate::matches::Match;
use crate::sampler::PoissonNoiseSampler;
use crate::season::SeasonSimulator;
use crate::standings::{current_table, overview, summarize, ProbabilitySummary};
use crate::stats::{aggregate_stats, check_registry};

/// Simulate the rest of a league season and summarise the outcome probabilities.
///
/// Any error aborts the whole league; no summary is produced from a partial or corrupted
/// set of trials.
pub fn simulate_league(
    matches: &[Match],
    league: &LeagueConfig,
    config: &SimulationConfig,
) -> Result<ProbabilitySummary, SimulationError> {
    simulate_league_until(matches, league, config, &AtomicBool::new(false))
}

/// Like `simulate_league`, but stops early once `abort` is set. The summary then reports
/// the completed trial count and `complete = false`.
pub fn simulate_league_until(
    matches: &[Match],
    league: &LeagueConfig,
    config: &SimulationConfig,
    abort: &AtomicBool,
) -> Result<ProbabilitySummary, SimulationError> {
    config.validate()?;
    let zones = league.zones_or(config.zones);
    info!("{}: starting simulation", league.name);

    let stats = aggregate_stats(matches, &league.id).stats;
    check_registry(&stats, league)?;
    let fixtures = pending_fixtures(matches, &league.id).fixtures;

    let simulator = SeasonSimulator::new(
        &stats,
        &fixtures,
        zones,
        PoissonNoiseSampler::from_config(config),
    )?
    .with_progress_interval(config.progress_interval);
    let run = simulator.run_until(config.trials, config.seed, abort)?;

    let table = current_table(matches, &league.id);
    let overview = overview(
        matches,
        &league.id,
        fixtures.len(),
        next_round(matches, &league.id),
    );
    info!(
        "{}: {} of {} trials complete",
        league.name,
        run.trials_completed(),
        run.trials_requested
    );
    Ok(summarize(&league.id, &run, table, overview))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_league() -> (LeagueConfig, Vec<Match>) {
        let league = LeagueConfig::new("Test League", "Test", &["A", "B", "C"]);
        let matches = vec![
            Match::completed("Test League", 1, "A", "B", 2, 0),
            Match::completed("Test League", 1, "C", "A", 1, 1),
            Match::completed("Test League", 2, "B", "C", 0, 3),
            Match::pending("Test League", 3, "B", "A"),
            Match::pending("Test League", 3, "A", "C"),
            Match::pending("Test League", 4, "C", "B"),
        ];
        (league, matches)
    }

    #[test]
    fn test_seeded_summary_reproducible() {
        let (league, matches) = small_league();
        let config = SimulationConfig::default().with_trials(2_000).with_seed(17);
        let first = simulate_league(&matches, &league, &config).unwrap();
        let second = simulate_league(&matches, &league, &config).unwrap();
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
        assert_eq!(first.trials, 2_000);
        assert_eq!(first.seed, 17);
        assert!(first.complete);
        assert_eq!(first.overview.pending_fixtures, 3);
        assert_eq!(first.overview.next_round, 3);
        assert_eq!(first.table[0].team, "C");
    }

    #[test]
    fn test_registry_team_without_matches_is_fatal() {
        let (_, matches) = small_league();
        let league = LeagueConfig::new("Test League", "Test", &["A", "B", "C", "D"]);
        let config = SimulationConfig::default().with_trials(10).with_seed(1);
        assert_eq!(
            simulate_league(&matches, &league, &config),
            Err(SimulationError::InsufficientStatistics("D".to_string()))
        );
    }

    #[test]
    fn test_invalid_config_is_fatal() {
        let (league, matches) = small_league();
        let config = SimulationConfig::default().with_trials(0);
        assert!(matches!(
            simulate_league(&matches, &league, &config),
            Err(SimulationError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_season_over_matches_real_table() {
        let (league, matches) = small_league();
        let played: Vec<Match> = matches.into_iter().filter(|m| m.home_goals.is_some()).collect();
        let config = SimulationConfig::default().with_trials(100).with_seed(3);
        let summary = simulate_league(&played, &league, &config).unwrap();
        assert_eq!(summary.overview.pending_fixtures, 0);
        // A and C level on 4; simulated ties go by team id
        assert_eq!(summary.title["A"], 100.0);
        assert_eq!(summary.positions["C"], vec![0.0, 100.0, 0.0]);
        assert_eq!(summary.relegation["B"], 0.0);
    }
}
