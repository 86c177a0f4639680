//! Automated runs
//!
//! Drives a whole run with a [`PlayerController`]: moves, tarots, and shop
//! visits, until the run is lost or a round cap is reached.

use crate::game::controller::{PlayerController, ShopAction};
use crate::game::flow::RunLoop;
use crate::game::host::GameHost;
use crate::game::phase::RunPhase;
use crate::game::GameState;
use serde::Serialize;
use std::time::{Duration, Instant};

/// Why an automated run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    /// The run was lost
    RunLost,
    /// The requested number of rounds was cleared
    RoundCap,
    /// The controller had no move to make
    NoMoves,
    /// Safety cap on player moves was hit
    StepLimit,
}

/// Result of one automated run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub seed: u64,
    pub controller: String,
    pub rounds_cleared: usize,
    pub turns_played: u32,
    pub moves_made: u32,
    pub gold: u32,
    pub best_round_score: i64,
    pub cards_owned: usize,
    pub end_reason: EndReason,
}

/// Run driver
pub struct Autopilot<'c> {
    controller: &'c mut dyn PlayerController,
    max_rounds: usize,
    max_moves: u32,
    max_shop_actions: usize,
}

impl<'c> Autopilot<'c> {
    pub fn new(controller: &'c mut dyn PlayerController) -> Self {
        Autopilot {
            controller,
            max_rounds: 10,
            max_moves: 5_000,
            max_shop_actions: 8,
        }
    }

    /// Stop after this many cleared rounds
    pub fn with_max_rounds(mut self, rounds: usize) -> Self {
        self.max_rounds = rounds;
        self
    }

    pub fn with_max_moves(mut self, moves: u32) -> Self {
        self.max_moves = moves;
        self
    }

    /// Reset `game` and play a full run against `host`
    pub fn run(&mut self, game: &mut GameState, host: &mut dyn GameHost) -> RunSummary {
        let seed = game.seed;
        let mut run = RunLoop::new(game, host);
        run.reset_run();

        // submissions are spaced one virtual second apart so the
        // duplicate-input guard never swallows a repeated move
        let clock = Instant::now();
        let mut moves_made: u32 = 0;
        let mut rounds_cleared = 0;
        let mut turns_played = 0;
        let mut best_round_score = 0;

        let end_reason = loop {
            match run.game.phase {
                RunPhase::RunLost => {
                    turns_played += run.game.turn;
                    break EndReason::RunLost;
                }
                RunPhase::Shop => {
                    rounds_cleared += 1;
                    turns_played += run.game.turn;
                    best_round_score = best_round_score.max(run.game.round_score);
                    if rounds_cleared >= self.max_rounds {
                        break EndReason::RoundCap;
                    }
                    self.visit_shop(&mut run);
                    if run.leave_shop().is_err() {
                        break EndReason::NoMoves;
                    }
                }
                RunPhase::AwaitingPlayerInput => {
                    if moves_made >= self.max_moves {
                        turns_played += run.game.turn;
                        break EndReason::StepLimit;
                    }
                    if let Some(index) = self.controller.choose_tarot(&run.view()) {
                        run.use_tarot(index);
                        if run.game.phase != RunPhase::AwaitingPlayerInput {
                            continue;
                        }
                    }
                    let Some((from, to)) = self.controller.choose_move(&run.view()) else {
                        turns_played += run.game.turn;
                        break EndReason::NoMoves;
                    };
                    moves_made += 1;
                    let at = clock + Duration::from_secs(moves_made as u64);
                    if !run.submit_player_move_at(&from.to_key(), &to.to_key(), at) {
                        turns_played += run.game.turn;
                        break EndReason::NoMoves;
                    }
                }
            }
        };

        let game = &*run.game;
        game.logger.minimal(&format!(
            "{} run over after {} round(s): {:?}",
            self.controller.name(),
            rounds_cleared,
            end_reason
        ));
        RunSummary {
            seed,
            controller: self.controller.name().to_string(),
            rounds_cleared,
            turns_played,
            moves_made,
            gold: game.gold,
            best_round_score,
            cards_owned: game.owned_jokers.len() + game.owned_planets.len() + game.owned_vouchers.len(),
            end_reason,
        }
    }

    fn visit_shop(&mut self, run: &mut RunLoop) {
        for _ in 0..self.max_shop_actions {
            let action = self.controller.choose_shop_action(&run.view());
            let done = match action {
                ShopAction::Buy(slot) => run.buy_offer(slot).is_err(),
                ShopAction::Reroll => run.reroll_shop().is_err(),
                ShopAction::Leave => true,
            };
            if done {
                break;
            }
        }
    }
}
