//! Batch simulation: many seeded runs in parallel with aggregated statistics
//!
//! Each run gets its own `GameState` and controller, so runs share nothing and
//! rayon can spread them across threads. Results come back in seed order.

use crate::game::{
    Autopilot, EndReason, GameState, HeuristicController, NullHost, PlayerController, RandomController,
    RunSummary, VerbosityLevel,
};
use rayon::prelude::*;
use serde::Serialize;

/// Controller used for every run in a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ControllerKind {
    Random,
    Heuristic,
}

impl ControllerKind {
    fn build(self, seed: u64) -> Box<dyn PlayerController> {
        match self {
            ControllerKind::Random => Box::new(RandomController::with_seed(seed.wrapping_add(0x1234_5678_9ABC_DEF0))),
            ControllerKind::Heuristic => Box::new(HeuristicController::new()),
        }
    }
}

/// Aggregated results of a batch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchStats {
    pub controller: ControllerKind,
    pub runs: usize,
    pub max_rounds: usize,
    /// Runs that cleared `max_rounds` rounds
    pub completed_runs: usize,
    pub lost_runs: usize,
    pub mean_rounds_cleared: f64,
    pub best_rounds_cleared: usize,
    pub mean_best_score: f64,
    pub mean_gold: f64,
    pub summaries: Vec<RunSummary>,
}

impl BatchStats {
    /// Fraction of runs that reached the round cap
    pub fn completion_rate(&self) -> f64 {
        if self.runs == 0 {
            0.0
        } else {
            self.completed_runs as f64 / self.runs as f64
        }
    }

    fn from_summaries(controller: ControllerKind, max_rounds: usize, summaries: Vec<RunSummary>) -> Self {
        let runs = summaries.len();
        let mean = |f: &dyn Fn(&RunSummary) -> f64| {
            if runs == 0 {
                0.0
            } else {
                summaries.iter().map(f).sum::<f64>() / runs as f64
            }
        };
        let mean_rounds_cleared = mean(&|s| s.rounds_cleared as f64);
        let mean_best_score = mean(&|s| s.best_round_score as f64);
        let mean_gold = mean(&|s| s.gold as f64);

        BatchStats {
            controller,
            runs,
            max_rounds,
            completed_runs: summaries.iter().filter(|s| s.end_reason == EndReason::RoundCap).count(),
            lost_runs: summaries.iter().filter(|s| s.end_reason == EndReason::RunLost).count(),
            mean_rounds_cleared,
            best_rounds_cleared: summaries.iter().map(|s| s.rounds_cleared).max().unwrap_or(0),
            mean_best_score,
            mean_gold,
            summaries,
        }
    }
}

/// Seed for run `index` of a batch started from `base_seed`
pub fn run_seed(base_seed: u64, index: usize) -> u64 {
    base_seed.wrapping_add((index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// Play one silent run
pub fn run_one(seed: u64, kind: ControllerKind, max_rounds: usize) -> RunSummary {
    let mut game = GameState::new(seed);
    game.logger.set_verbosity(VerbosityLevel::Silent);
    let mut controller = kind.build(seed);
    Autopilot::new(controller.as_mut())
        .with_max_rounds(max_rounds)
        .run(&mut game, &mut NullHost)
}

/// Run `runs` seeded runs in parallel and aggregate them
pub fn run_batch(base_seed: u64, runs: usize, kind: ControllerKind, max_rounds: usize) -> BatchStats {
    let summaries: Vec<RunSummary> = (0..runs)
        .into_par_iter()
        .map(|i| run_one(run_seed(base_seed, i), kind, max_rounds))
        .collect();
    BatchStats::from_summaries(kind, max_rounds, summaries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_is_in_seed_order() {
        let stats = run_batch(3, 4, ControllerKind::Random, 2);
        assert_eq!(stats.runs, 4);
        let seeds: Vec<u64> = stats.summaries.iter().map(|s| s.seed).collect();
        let expected: Vec<u64> = (0..4).map(|i| run_seed(3, i)).collect();
        assert_eq!(seeds, expected);
    }

    #[test]
    fn test_batch_matches_sequential_runs() {
        let stats = run_batch(9, 3, ControllerKind::Heuristic, 2);
        for (i, summary) in stats.summaries.iter().enumerate() {
            assert_eq!(*summary, run_one(run_seed(9, i), ControllerKind::Heuristic, 2));
        }
    }

    #[test]
    fn test_aggregates() {
        let stats = run_batch(1, 5, ControllerKind::Random, 1);
        assert!(stats.completed_runs + stats.lost_runs <= stats.runs);
        assert!(stats.best_rounds_cleared <= 1);
        assert!(stats.mean_rounds_cleared <= 1.0);
        assert!((0.0..=1.0).contains(&stats.completion_rate()));
    }

    #[test]
    fn test_empty_batch() {
        let stats = run_batch(0, 0, ControllerKind::Random, 3);
        assert_eq!(stats.runs, 0);
        assert_eq!(stats.mean_gold, 0.0);
        assert_eq!(stats.completion_rate(), 0.0);
    }
}
