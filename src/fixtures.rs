use serde::Serialize;
use tracing::{debug, warn};

use crate::error::MatchError;
use crate::matches::{Match, MatchStatus, TeamId};

/// A scheduled league match without a result.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Fixture {
    pub home: TeamId,
    pub away: TeamId,
    pub round: u32,
    pub date: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct FixtureReport {
    /// Pending fixtures in corpus order
    pub fixtures: Vec<Fixture>,

    pub malformed: Vec<MatchError>,
}

/// Extract the pending fixtures of `league`.
pub fn pending_fixtures(matches: &[Match], league: &str) -> FixtureReport {
    let mut report = FixtureReport::default();
    for m in matches.iter().filter(|m| m.in_league(league)) {
        match m.status() {
            Ok(MatchStatus::Pending) => report.fixtures.push(Fixture {
                home: m.home.clone(),
                away: m.away.clone(),
                round: m.round,
                date: m.date.clone(),
            }),
            Ok(MatchStatus::Completed { .. }) => {}
            Err(err) => report.malformed.push(err),
        }
    }
    if !report.malformed.is_empty() {
        warn!("{league}: {} matches with a partial score are neither played nor pending", report.malformed.len());
    }
    debug!("{league}: {} pending fixtures", report.fixtures.len());
    report
}

/// The next round to be played: the earliest pending round after the last round with a
/// result, or the round after the last played one when nothing later is pending.
pub fn next_round(matches: &[Match], league: &str) -> u32 {
    let mut last_played = 0;
    let mut pending = Vec::new();
    for m in matches.iter().filter(|m| m.in_league(league) && m.round > 0) {
        match m.status() {
            Ok(MatchStatus::Completed { .. }) => last_played = last_played.max(m.round),
            Ok(MatchStatus::Pending) => pending.push(m.round),
            Err(_) => {}
        }
    }
    pending
        .into_iter()
        .filter(|&round| round > last_played)
        .min()
        .unwrap_or(last_played + 1)
}
