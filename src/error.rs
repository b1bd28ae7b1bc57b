use thiserror::Error;

/// A match record that cannot be used as either a result or a fixture.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("{home} vs {away}: only one score recorded")]
    PartialScore { home: String, away: String },

    #[error("{home} vs {away}: invalid score {value:?}")]
    InvalidScore {
        home: String,
        away: String,
        value: String,
    },

    #[error("match record without {0} team")]
    MissingTeam(&'static str),
}

/// Conditions that abort a league simulation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error("no completed matches for team {0}")]
    InsufficientStatistics(String),

    #[error("non-finite or negative sample {value} for {team}")]
    NonFiniteSample { team: String, value: f64 },

    #[error("invalid distribution parameter for {team}: {reason}")]
    InvalidParameter { team: String, reason: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
