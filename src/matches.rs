//! Match records as delivered by the data provider, and their typed form.
//!
//! The provider reports scores and rounds either as JSON numbers or as strings, and uses
//! `null` for matches that have not been played yet.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::error::MatchError;

/// Team identifier, the provider's team name.
pub type TeamId = String;

/// A provider match record, before validation.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct RawMatchRecord {
    #[serde(rename = "strHomeTeam", default)]
    pub home_team: Option<String>,

    #[serde(rename = "strAwayTeam", default)]
    pub away_team: Option<String>,

    #[serde(rename = "intHomeScore", default)]
    pub home_score: Option<Value>,

    #[serde(rename = "intAwayScore", default)]
    pub away_score: Option<Value>,

    #[serde(rename = "intRound", default)]
    pub round: Option<Value>,

    #[serde(rename = "strLeague", default)]
    pub league: Option<String>,

    #[serde(rename = "dateEvent", default)]
    pub date: Option<String>,
}

/// A single league match, completed or pending.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Match {
    pub home: TeamId,
    pub away: TeamId,
    pub home_goals: Option<u32>,
    pub away_goals: Option<u32>,
    pub round: u32,
    pub league: String,
    #[serde(default)]
    pub date: Option<String>,
}

/// Whether a match has been played.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchStatus {
    Completed { home_goals: u32, away_goals: u32 },
    Pending,
}

impl Match {
    /// Create a played match.
    pub fn completed(
        league: &str,
        round: u32,
        home: &str,
        away: &str,
        home_goals: u32,
        away_goals: u32,
    ) -> Self {
        Match {
            home: home.to_string(),
            away: away.to_string(),
            home_goals: Some(home_goals),
            away_goals: Some(away_goals),
            round,
            league: league.to_string(),
            date: None,
        }
    }

    /// Create a scheduled match without a result.
    pub fn pending(league: &str, round: u32, home: &str, away: &str) -> Self {
        Match {
            home: home.to_string(),
            away: away.to_string(),
            home_goals: None,
            away_goals: None,
            round,
            league: league.to_string(),
            date: None,
        }
    }

    /// Classify the match. Exactly one recorded score is malformed.
    pub fn status(&self) -> Result<MatchStatus, MatchError> {
        match (self.home_goals, self.away_goals) {
            (Some(home_goals), Some(away_goals)) => Ok(MatchStatus::Completed {
                home_goals,
                away_goals,
            }),
            (None, None) => Ok(MatchStatus::Pending),
            _ => Err(MatchError::PartialScore {
                home: self.home.clone(),
                away: self.away.clone(),
            }),
        }
    }

    pub fn in_league(&self, league: &str) -> bool {
        self.league == league
    }
}

impl TryFrom<RawMatchRecord> for Match {
    type Error = MatchError;

    fn try_from(raw: RawMatchRecord) -> Result<Self, Self::Error> {
        let home = raw
            .home_team
            .filter(|name| !name.is_empty())
            .ok_or(MatchError::MissingTeam("home"))?;
        let away = raw
            .away_team
            .filter(|name| !name.is_empty())
            .ok_or(MatchError::MissingTeam("away"))?;

        let home_goals = parse_score(raw.home_score.as_ref(), &home, &away)?;
        let away_goals = parse_score(raw.away_score.as_ref(), &home, &away)?;
        let round = raw
            .round
            .as_ref()
            .and_then(|value| parse_count(value).ok().flatten())
            .unwrap_or(0);

        Ok(Match {
            home,
            away,
            home_goals,
            away_goals,
            round,
            league: raw.league.unwrap_or_default(),
            date: raw.date,
        })
    }
}

fn parse_score(value: Option<&Value>, home: &str, away: &str) -> Result<Option<u32>, MatchError> {
    match value {
        None => Ok(None),
        Some(value) => parse_count(value).map_err(|raw| MatchError::InvalidScore {
            home: home.to_string(),
            away: away.to_string(),
            value: raw,
        }),
    }
}

/// Parse a non-negative integer carried as a number or a string. `null` and the empty
/// string mean "absent"; anything else that is not a non-negative integer is returned as
/// the offending text.
fn parse_count(value: &Value) -> Result<Option<u32>, String> {
    match value {
        Value::Null => Ok(None),
        Value::Number(number) => number
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .map(Some)
            .ok_or_else(|| number.to_string()),
        Value::String(text) => {
            let text = text.trim();
            if text.is_empty() {
                Ok(None)
            } else {
                text.parse::<u32>().map(Some).map_err(|_| text.to_string())
            }
        }
        other => Err(other.to_string()),
    }
}

/// Result of converting raw provider records into matches.
#[derive(Debug, Default)]
pub struct Ingested {
    pub matches: Vec<Match>,
    pub excluded: Vec<MatchError>,
}

/// Convert raw records, dropping the ones that fail validation.
pub fn ingest(records: impl IntoIterator<Item = RawMatchRecord>) -> Ingested {
    let mut ingested = Ingested::default();
    for record in records {
        match Match::try_from(record) {
            Ok(m) => ingested.matches.push(m),
            Err(err) => ingested.excluded.push(err),
        }
    }
    if !ingested.excluded.is_empty() {
        warn!(
            "excluded {} malformed match records (first: {})",
            ingested.excluded.len(),
            ingested.excluded[0]
        );
    }
    ingested
}

/// Parse a JSON array of provider records.
pub fn ingest_json(json: &str) -> Result<Ingested, serde_json::Error> {
    let records: Vec<RawMatchRecord> = serde_json::from_str(json)?;
    Ok(ingest(records))
}
