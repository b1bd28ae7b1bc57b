//! Probability summary of a Monte Carlo run, and the real table of played matches.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::constants::{round1, round2};
use crate::matches::{Match, MatchStatus, TeamId};
use crate::season::SimulationRun;
use crate::stats::aggregate_stats;

/// One row of the current league table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TableRow {
    pub team: TeamId,
    pub points: u32,
    pub played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i64,
}

/// League-wide figures over the played matches.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Overview {
    pub completed_matches: usize,
    pub mean_goals: f64,
    pub pending_fixtures: usize,
    pub next_round: u32,
}

/// Per-team outcome probabilities in percent, rounded to one decimal.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProbabilitySummary {
    pub league: String,

    /// Trials the probabilities are computed over
    pub trials: u64,
    pub trials_requested: usize,
    pub complete: bool,
    pub seed: u64,

    pub title: BTreeMap<TeamId, f64>,
    pub qualification: BTreeMap<TeamId, f64>,
    pub strict_qualification: BTreeMap<TeamId, f64>,
    pub relegation: BTreeMap<TeamId, f64>,

    /// Probability of each final rank, rank 1 first
    pub positions: BTreeMap<TeamId, Vec<f64>>,

    pub expected_points: BTreeMap<TeamId, f64>,
    pub table: Vec<TableRow>,
    pub overview: Overview,
}

/// Real table of `league` from completed matches, by points, then wins, then goal
/// difference, all descending. Remaining ties are ordered by team id.
pub fn current_table(matches: &[Match], league: &str) -> Vec<TableRow> {
    let mut table: Vec<TableRow> = aggregate_stats(matches, league)
        .stats
        .into_values()
        .map(|s| TableRow {
            goal_difference: s.goal_difference(),
            team: s.team,
            points: s.points,
            played: s.games_played,
            wins: s.wins,
            draws: s.draws,
            losses: s.losses,
            goals_for: s.goals_for,
            goals_against: s.goals_against,
        })
        .collect();
    table.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then(b.wins.cmp(&a.wins))
            .then(b.goal_difference.cmp(&a.goal_difference))
            .then(a.team.cmp(&b.team))
    });
    table
}

/// Completed-match count and mean goals per match.
pub fn overview(matches: &[Match], league: &str, pending_fixtures: usize, next_round: u32) -> Overview {
    let (completed, goals) = matches
        .iter()
        .filter(|m| m.in_league(league))
        .filter_map(|m| match m.status() {
            Ok(MatchStatus::Completed { home_goals, away_goals }) => Some(home_goals + away_goals),
            _ => None,
        })
        .fold((0usize, 0u64), |(n, total), goals| (n + 1, total + goals as u64));
    Overview {
        completed_matches: completed,
        mean_goals: if completed > 0 {
            round2(goals as f64 / completed as f64)
        } else {
            0.0
        },
        pending_fixtures,
        next_round,
    }
}

fn percent(count: u64, trials: u64) -> f64 {
    if trials == 0 {
        0.0
    } else {
        round1(count as f64 / trials as f64 * 100.0)
    }
}

/// Turn run tallies into percentages. The denominator is the number of trials actually
/// completed, which an aborted run reports alongside the requested count.
pub fn summarize(league: &str, run: &SimulationRun, table: Vec<TableRow>, overview: Overview) -> ProbabilitySummary {
    let tallies = &run.tallies;
    let trials = tallies.trials;
    let by_team = |counts: &[u64]| -> BTreeMap<TeamId, f64> {
        run.teams
            .iter()
            .zip(counts)
            .map(|(team, &count)| (team.clone(), percent(count, trials)))
            .collect()
    };

    let title: BTreeMap<TeamId, f64> = run
        .teams
        .iter()
        .enumerate()
        .map(|(i, team)| (team.clone(), percent(tallies.titles(i), trials)))
        .collect();
    let positions: BTreeMap<TeamId, Vec<f64>> = run
        .teams
        .iter()
        .zip(&tallies.positions)
        .map(|(team, counts)| (team.clone(), counts.iter().map(|&c| percent(c, trials)).collect()))
        .collect();
    let expected_points: BTreeMap<TeamId, f64> = run
        .teams
        .iter()
        .zip(&tallies.points)
        .map(|(team, &total)| {
            let mean = if trials == 0 { 0.0 } else { total as f64 / trials as f64 };
            (team.clone(), round1(mean))
        })
        .collect();

    ProbabilitySummary {
        league: league.to_string(),
        trials,
        trials_requested: run.trials_requested,
        complete: run.is_complete(),
        seed: run.seed,
        title,
        qualification: by_team(&tallies.qualification[..]),
        strict_qualification: by_team(&tallies.strict_qualification[..]),
        relegation: by_team(&tallies.relegation[..]),
        positions,
        expected_points,
        table,
        overview,
    }
}
