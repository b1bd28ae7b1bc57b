//! Reduction of completed matches into per-team scoring statistics.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::error::{MatchError, SimulationError};
use crate::league::LeagueConfig;
use crate::matches::{Match, MatchStatus, TeamId};
use crate::team::{TeamRecord, TeamSeasonStats};

/// Per-team statistics of one league, keyed and ordered by team id.
pub type StatsMap = BTreeMap<TeamId, TeamSeasonStats>;

#[derive(Clone, Debug, Default)]
pub struct StatsReport {
    pub stats: StatsMap,

    /// League matches skipped because their score was malformed
    pub malformed: Vec<MatchError>,
}

/// Aggregate the completed matches of `league` into team statistics.
///
/// Matches from other leagues and pending matches are ignored. Malformed matches are
/// excluded and reported. Teams without a completed match do not appear in the result.
pub fn aggregate_stats(matches: &[Match], league: &str) -> StatsReport {
    let mut records: BTreeMap<TeamId, TeamRecord> = BTreeMap::new();
    let mut malformed = Vec::new();

    for m in matches.iter().filter(|m| m.in_league(league)) {
        match m.status() {
            Ok(MatchStatus::Completed { home_goals, away_goals }) => {
                records
                    .entry(m.home.clone())
                    .or_default()
                    .record(home_goals, away_goals);
                records
                    .entry(m.away.clone())
                    .or_default()
                    .record(away_goals, home_goals);
            }
            Ok(MatchStatus::Pending) => {}
            Err(err) => malformed.push(err),
        }
    }

    if !malformed.is_empty() {
        warn!("{league}: excluded {} malformed matches from statistics", malformed.len());
    }

    let stats: StatsMap = records
        .into_iter()
        .map(|(team, record)| {
            let stats = record.finish(team.clone());
            (team, stats)
        })
        .collect();
    debug!("{league}: statistics for {} teams", stats.len());

    StatsReport { stats, malformed }
}

/// Every registered team must have statistics to be simulated.
pub fn check_registry(stats: &StatsMap, league: &LeagueConfig) -> Result<(), SimulationError> {
    match league.teams.iter().find(|team| !stats.contains_key(*team)) {
        Some(team) => Err(SimulationError::InsufficientStatistics(team.clone())),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEAGUE: &str = "Brazilian Serie A";

    #[test]
    fn test_symmetric_update() {
        let matches = vec![Match::completed(LEAGUE, 1, "Home", "Away", 2, 1)];
        let report = aggregate_stats(&matches, LEAGUE);
        let home = &report.stats["Home"];
        let away = &report.stats["Away"];

        assert_eq!((home.games_played, home.points, home.goals_for, home.goals_against), (1, 3, 2, 1));
        assert_eq!((away.games_played, away.points, away.goals_for, away.goals_against), (1, 0, 1, 2));
        assert_eq!(home.wins, 1);
        assert_eq!(away.losses, 1);
    }

    #[test]
    fn test_filters_other_leagues_and_pending() {
        let matches = vec![
            Match::completed(LEAGUE, 1, "A", "B", 1, 1),
            Match::completed("Brazilian Serie B", 1, "A", "C", 5, 0),
            Match::pending(LEAGUE, 2, "A", "D"),
        ];
        let report = aggregate_stats(&matches, LEAGUE);
        assert_eq!(report.stats.len(), 2);
        assert!(!report.stats.contains_key("C"));
        assert!(!report.stats.contains_key("D"));
        assert_eq!(report.stats["A"].draws, 1);
        assert_eq!(report.stats["A"].points, 1);
    }

    #[test]
    fn test_malformed_excluded() {
        let mut partial = Match::pending(LEAGUE, 2, "A", "B");
        partial.away_goals = Some(3);
        let matches = vec![Match::completed(LEAGUE, 1, "A", "B", 0, 2), partial];
        let report = aggregate_stats(&matches, LEAGUE);
        assert_eq!(report.malformed.len(), 1);
        assert_eq!(report.stats["B"].games_played, 1);
    }

    #[test]
    fn test_registry_check() {
        let matches = vec![Match::completed(LEAGUE, 1, "A", "B", 0, 0)];
        let report = aggregate_stats(&matches, LEAGUE);

        let complete = LeagueConfig::new(LEAGUE, "A", &["A", "B"]);
        assert!(check_registry(&report.stats, &complete).is_ok());

        let missing = LeagueConfig::new(LEAGUE, "A", &["A", "B", "C"]);
        assert_eq!(
            check_registry(&report.stats, &missing),
            Err(SimulationError::InsufficientStatistics("C".to_string()))
        );
    }
}
