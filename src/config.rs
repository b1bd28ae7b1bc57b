use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_TRIALS, MIN_GOAL_RATE, NOISE_SCALE, PROGRESS_INTERVAL, QUALIFICATION_RANK,
    RELEGATION_RANK, STRICT_QUALIFICATION_RANK,
};
use crate::error::SimulationError;

/// Rank boundaries of the outcome zones. Ranks are 1-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ZoneConfig {
    /// Ranks `1..=qualification` count toward the qualification zone
    pub qualification: usize,

    /// Ranks `1..=strict_qualification` count toward the stricter zone (promotion, direct entry)
    pub strict_qualification: usize,

    /// Ranks `relegation..` count toward the relegation zone
    pub relegation: usize,
}

impl Default for ZoneConfig {
    fn default() -> Self {
        ZoneConfig {
            qualification: QUALIFICATION_RANK,
            strict_qualification: STRICT_QUALIFICATION_RANK,
            relegation: RELEGATION_RANK,
        }
    }
}

impl ZoneConfig {
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.qualification == 0 || self.strict_qualification == 0 || self.relegation == 0 {
            return Err(SimulationError::InvalidConfig(
                "zone boundaries are 1-based ranks".to_string(),
            ));
        }
        if self.strict_qualification > self.qualification {
            return Err(SimulationError::InvalidConfig(format!(
                "strict qualification rank {} exceeds qualification rank {}",
                self.strict_qualification, self.qualification
            )));
        }
        if self.qualification >= self.relegation {
            return Err(SimulationError::InvalidConfig(format!(
                "qualification rank {} overlaps relegation rank {}",
                self.qualification, self.relegation
            )));
        }
        Ok(())
    }

    pub fn is_qualification(&self, rank: usize) -> bool {
        rank <= self.qualification
    }

    pub fn is_strict_qualification(&self, rank: usize) -> bool {
        rank <= self.strict_qualification
    }

    pub fn is_relegation(&self, rank: usize) -> bool {
        rank >= self.relegation
    }
}

/// Monte Carlo run parameters.
///
/// Without a `seed` every run draws fresh entropy and results are not reproducible; the
/// chosen base seed is logged so a run can still be replayed.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub trials: usize,
    pub seed: Option<u64>,
    pub zones: ZoneConfig,

    /// Lower bound for a side's Poisson rate
    pub min_goal_rate: f64,

    /// Fraction of the standard deviation used for the Gaussian noise term
    pub noise_scale: f64,

    pub progress_interval: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            trials: DEFAULT_TRIALS,
            seed: None,
            zones: ZoneConfig::default(),
            min_goal_rate: MIN_GOAL_RATE,
            noise_scale: NOISE_SCALE,
            progress_interval: PROGRESS_INTERVAL,
        }
    }
}

impl SimulationConfig {
    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.trials == 0 {
            return Err(SimulationError::InvalidConfig("trial count must be positive".to_string()));
        }
        if !(self.min_goal_rate.is_finite() && self.min_goal_rate > 0.0) {
            return Err(SimulationError::InvalidConfig(format!(
                "minimum goal rate must be positive, got {}",
                self.min_goal_rate
            )));
        }
        if !(self.noise_scale.is_finite() && self.noise_scale >= 0.0) {
            return Err(SimulationError::InvalidConfig(format!(
                "noise scale must be non-negative, got {}",
                self.noise_scale
            )));
        }
        self.zones.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SimulationConfig::default();
        assert_eq!(config.trials, 300_000);
        assert_eq!(config.seed, None);
        assert_eq!(config.zones.qualification, 6);
        assert_eq!(config.zones.strict_qualification, 4);
        assert_eq!(config.zones.relegation, 17);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: SimulationConfig =
            serde_json::from_str(r#"{"trials": 1000, "seed": 7, "zones": {"relegation": 18}}"#)
                .unwrap();
        assert_eq!(config.trials, 1000);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.zones.relegation, 18);
        assert_eq!(config.zones.qualification, 6);
        assert_eq!(config.noise_scale, 0.5);
    }

    #[test]
    fn test_overlapping_zones_rejected() {
        let zones = ZoneConfig {
            qualification: 10,
            strict_qualification: 4,
            relegation: 10,
        };
        assert!(matches!(zones.validate(), Err(SimulationError::InvalidConfig(_))));
    }

    #[test]
    fn test_zero_trials_rejected() {
        assert!(SimulationConfig::default().with_trials(0).validate().is_err());
    }

    #[test]
    fn test_twenty_team_zones_disjoint() {
        let zones = ZoneConfig::default();
        for rank in 1..=20 {
            assert!(!(zones.is_qualification(rank) && zones.is_relegation(rank)));
            if (7..=16).contains(&rank) {
                assert!(!zones.is_qualification(rank) && !zones.is_relegation(rank));
            }
        }
    }
}
