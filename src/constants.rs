/// Points awarded for a win
pub const WIN_POINTS: u32 = 3;

/// Points awarded to each side in a draw
pub const DRAW_POINTS: u32 = 1;

/// Default number of Monte Carlo trials per league
pub const DEFAULT_TRIALS: usize = 300_000;

/// Floor for the expected goal rate of a side, keeps the Poisson rate strictly positive
pub const MIN_GOAL_RATE: f64 = 0.1;

/// Multiplier applied to a side's standard deviation for the Gaussian noise term
pub const NOISE_SCALE: f64 = 0.5;

/// Trials between progress reports
pub const PROGRESS_INTERVAL: usize = 30_000;

/// Ranks at or above this count toward the qualification zone
pub const QUALIFICATION_RANK: usize = 6;

/// Ranks at or above this count toward the stricter qualification zone
pub const STRICT_QUALIFICATION_RANK: usize = 4;

/// Ranks at or below this count toward the relegation zone
pub const RELEGATION_RANK: usize = 17;

/// Points earned by one side for a final score.
pub fn match_points(goals_for: u32, goals_against: u32) -> u32 {
    match goals_for.cmp(&goals_against) {
        std::cmp::Ordering::Greater => WIN_POINTS,
        std::cmp::Ordering::Equal => DRAW_POINTS,
        std::cmp::Ordering::Less => 0,
    }
}

/// Round a percentage to one decimal place
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Round to two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
