use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};

use crate::config::ZoneConfig;
use crate::constants::{match_points, PROGRESS_INTERVAL};
use crate::error::SimulationError;
use crate::fixtures::Fixture;
use crate::matches::TeamId;
use crate::sampler::OutcomeSampler;
use crate::stats::StatsMap;
use crate::team::TeamSeasonStats;

/// One team's place in a simulated final table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RankedTeam {
    pub team: TeamId,
    pub points: u32,
}

/// Final table of one trial, best first.
///
/// Teams level on points are ordered by team id, ascending. Goal difference is not
/// simulated and plays no part.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ranking {
    pub entries: Vec<RankedTeam>,
}

impl Ranking {
    /// 1-based rank of a team.
    pub fn rank_of(&self, team: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.team == team).map(|i| i + 1)
    }
}

/// Per-team counters accumulated over trials. Teams are indexed in team id order.
///
/// Merging is plain integer addition, so tallies from any partition of the trials combine
/// to the same totals.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tallies {
    pub trials: u64,

    /// `positions[team][rank - 1]`: number of trials finishing at `rank`
    pub positions: Vec<Vec<u64>>,

    pub qualification: Vec<u64>,
    pub strict_qualification: Vec<u64>,
    pub relegation: Vec<u64>,

    /// Sum of final points over all trials
    pub points: Vec<u64>,
}

impl Tallies {
    pub fn new(teams: usize) -> Self {
        Tallies {
            trials: 0,
            positions: vec![vec![0; teams]; teams],
            qualification: vec![0; teams],
            strict_qualification: vec![0; teams],
            relegation: vec![0; teams],
            points: vec![0; teams],
        }
    }

    /// Count one trial. `order` lists team indices best first.
    fn record(&mut self, order: &[usize], points: &[u32], zones: &ZoneConfig) {
        self.trials += 1;
        for (i, &team) in order.iter().enumerate() {
            let rank = i + 1;
            self.positions[team][i] += 1;
            self.points[team] += points[team] as u64;
            if zones.is_qualification(rank) {
                self.qualification[team] += 1;
            }
            if zones.is_strict_qualification(rank) {
                self.strict_qualification[team] += 1;
            }
            if zones.is_relegation(rank) {
                self.relegation[team] += 1;
            }
        }
    }

    pub fn merge(mut self, other: Tallies) -> Tallies {
        self.trials += other.trials;
        for (mine, theirs) in self.positions.iter_mut().zip(&other.positions) {
            add_into(mine, theirs);
        }
        add_into(&mut self.qualification, &other.qualification);
        add_into(&mut self.strict_qualification, &other.strict_qualification);
        add_into(&mut self.relegation, &other.relegation);
        add_into(&mut self.points, &other.points);
        self
    }

    pub fn titles(&self, team: usize) -> u64 {
        self.positions[team].first().copied().unwrap_or(0)
    }
}

fn add_into(target: &mut [u64], source: &[u64]) {
    for (t, s) in target.iter_mut().zip(source) {
        *t += s;
    }
}

/// Outcome of a Monte Carlo run.
#[derive(Clone, Debug)]
pub struct SimulationRun {
    /// Team ids, in the index order used by `tallies`
    pub teams: Vec<TeamId>,
    pub tallies: Tallies,
    pub trials_requested: usize,

    /// Base seed; trial `i` uses `seed + i`
    pub seed: u64,
}

impl SimulationRun {
    pub fn trials_completed(&self) -> u64 {
        self.tallies.trials
    }

    pub fn is_complete(&self) -> bool {
        self.tallies.trials == self.trials_requested as u64
    }
}

/// Replays the remaining fixtures of a league many times over.
///
/// Statistics and fixtures are fixed at construction and shared read-only by all trials.
/// Each trial owns its running point totals and its random generator.
pub struct SeasonSimulator<S: OutcomeSampler> {
    teams: Vec<TeamSeasonStats>,
    fixtures: Vec<(usize, usize)>,
    zones: ZoneConfig,
    sampler: S,
    progress_interval: usize,
}

impl<S: OutcomeSampler> SeasonSimulator<S> {
    /// Every team in `stats` takes part. A fixture naming a team without statistics
    /// cannot be simulated and fails with `InsufficientStatistics`.
    pub fn new(
        stats: &StatsMap,
        fixtures: &[Fixture],
        zones: ZoneConfig,
        sampler: S,
    ) -> Result<Self, SimulationError> {
        zones.validate()?;
        let teams: Vec<TeamSeasonStats> = stats.values().cloned().collect();
        let index_of = |team: &str| {
            teams
                .binary_search_by(|t| t.team.as_str().cmp(team))
                .map_err(|_| SimulationError::InsufficientStatistics(team.to_string()))
        };
        let fixtures = fixtures
            .iter()
            .map(|f| -> Result<(usize, usize), SimulationError> {
                Ok((index_of(f.home.as_str())?, index_of(f.away.as_str())?))
            })
            .collect::<Result<Vec<_>, _>>()?;

        if teams.len() < zones.relegation {
            debug!(
                "{} teams, relegation rank {} is never reached",
                teams.len(),
                zones.relegation
            );
        }

        Ok(SeasonSimulator {
            teams,
            fixtures,
            zones,
            sampler,
            progress_interval: PROGRESS_INTERVAL,
        })
    }

    pub fn with_progress_interval(mut self, progress_interval: usize) -> Self {
        self.progress_interval = progress_interval.max(1);
        self
    }

    pub fn team_ids(&self) -> Vec<TeamId> {
        self.teams.iter().map(|t| t.team.clone()).collect()
    }

    pub fn fixture_count(&self) -> usize {
        self.fixtures.len()
    }

    /// Play out every fixture once, leaving final totals in `points`.
    fn play<R: Rng + ?Sized>(&self, rng: &mut R, points: &mut Vec<u32>) -> Result<(), SimulationError> {
        points.clear();
        points.extend(self.teams.iter().map(|t| t.points));

        for &(home, away) in &self.fixtures {
            let (home_goals, away_goals) =
                self.sampler.sample(&self.teams[home], &self.teams[away], rng)?;
            points[home] += match_points(home_goals, away_goals);
            points[away] += match_points(away_goals, home_goals);
        }
        Ok(())
    }

    /// Team indices ordered by descending points, ties by index (team id order).
    fn order(&self, points: &[u32]) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.teams.len()).collect();
        order.sort_by(|&a, &b| points[b].cmp(&points[a]).then(a.cmp(&b)));
        order
    }

    /// Simulate a single trial.
    pub fn simulate_once<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Ranking, SimulationError> {
        let mut points = Vec::with_capacity(self.teams.len());
        self.play(rng, &mut points)?;
        let entries = self
            .order(&points)
            .into_iter()
            .map(|i| RankedTeam {
                team: self.teams[i].team.clone(),
                points: points[i],
            })
            .collect();
        Ok(Ranking { entries })
    }

    /// Run `trials` trials. Without a seed, a base seed is drawn from entropy and logged.
    pub fn run_simulations(
        &self,
        trials: usize,
        seed: Option<u64>,
    ) -> Result<SimulationRun, SimulationError> {
        self.run_until(trials, seed, &AtomicBool::new(false))
    }

    /// Like `run_simulations`, stopping at the next progress boundary once `abort` is set.
    /// The returned run then carries fewer completed trials than requested.
    pub fn run_until(
        &self,
        trials: usize,
        seed: Option<u64>,
        abort: &AtomicBool,
    ) -> Result<SimulationRun, SimulationError> {
        let seed = match seed {
            Some(s) => s,
            None => {
                let s = ChaCha8Rng::from_entropy().gen::<u64>();
                info!("no seed configured, drawn base seed {s}");
                s
            }
        };
        info!(
            "simulating {trials} trials over {} fixtures and {} teams",
            self.fixtures.len(),
            self.teams.len()
        );

        let n = self.teams.len();
        let mut tallies = Tallies::new(n);
        let mut done = 0;
        while done < trials {
            if abort.load(Ordering::Relaxed) {
                warn!("aborted after {done} of {trials} trials");
                break;
            }
            let end = (done + self.progress_interval).min(trials);
            let chunk = (done..end)
                .into_par_iter()
                .try_fold(
                    || (Tallies::new(n), Vec::with_capacity(n)),
                    |(mut tallies, mut points), trial| {
                        let mut rng = ChaCha8Rng::seed_from_u64(seed.wrapping_add(trial as u64));
                        self.play(&mut rng, &mut points)?;
                        tallies.record(&self.order(&points), &points, &self.zones);
                        Ok::<_, SimulationError>((tallies, points))
                    },
                )
                .map(|acc| acc.map(|(tallies, _)| tallies))
                .try_reduce(|| Tallies::new(n), |a, b| Ok(a.merge(b)))?;
            tallies = tallies.merge(chunk);
            done = end;
            info!("trial {done}/{trials}");
        }

        Ok(SimulationRun {
            teams: self.team_ids(),
            tallies,
            trials_requested: trials,
            seed,
        })
    }
}
