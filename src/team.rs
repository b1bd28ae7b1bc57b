use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

use crate::constants::{match_points, DRAW_POINTS, WIN_POINTS};
use crate::matches::TeamId;

/// Season-to-date record and scoring statistics of one team.
///
/// Standard deviations are sample standard deviations over per-match goals, and are
/// defined as 0 when the team has played at most one match.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct TeamSeasonStats {
    pub team: TeamId,
    pub games_played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub points: u32,
    pub mean_goals_for: f64,
    pub mean_goals_against: f64,
    pub sd_goals_for: f64,
    pub sd_goals_against: f64,
}

impl TeamSeasonStats {
    pub fn goal_difference(&self) -> i64 {
        self.goals_for as i64 - self.goals_against as i64
    }
}

impl std::fmt::Display for TeamSeasonStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} pts ({}-{}-{}) | gf {:.2}±{:.2} | ga {:.2}±{:.2}",
            self.team,
            self.points,
            self.wins,
            self.draws,
            self.losses,
            self.mean_goals_for,
            self.sd_goals_for,
            self.mean_goals_against,
            self.sd_goals_against
        )
    }
}

/// Per-match goal history of a team while its statistics are being collected.
#[derive(Clone, Debug, Default)]
pub(crate) struct TeamRecord {
    scored: Vec<f64>,
    conceded: Vec<f64>,
    wins: u32,
    draws: u32,
    losses: u32,
}

impl TeamRecord {
    pub(crate) fn record(&mut self, goals_for: u32, goals_against: u32) {
        self.scored.push(goals_for as f64);
        self.conceded.push(goals_against as f64);
        match match_points(goals_for, goals_against) {
            WIN_POINTS => self.wins += 1,
            DRAW_POINTS => self.draws += 1,
            _ => self.losses += 1,
        }
    }

    pub(crate) fn finish(self, team: TeamId) -> TeamSeasonStats {
        let games_played = self.scored.len() as u32;
        TeamSeasonStats {
            team,
            games_played,
            wins: self.wins,
            draws: self.draws,
            losses: self.losses,
            goals_for: self.scored.iter().sum::<f64>() as u32,
            goals_against: self.conceded.iter().sum::<f64>() as u32,
            points: WIN_POINTS * self.wins + DRAW_POINTS * self.draws,
            mean_goals_for: self.scored.iter().mean(),
            mean_goals_against: self.conceded.iter().mean(),
            sd_goals_for: sample_std_dev(&self.scored),
            sd_goals_against: sample_std_dev(&self.conceded),
        }
    }
}

fn sample_std_dev(values: &[f64]) -> f64 {
    if values.len() <= 1 {
        0.0
    } else {
        values.iter().std_dev()
    }
}
