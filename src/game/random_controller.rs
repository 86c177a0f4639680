//! Random controller for baseline runs
//!
//! Picks uniformly among legal moves and affordable shop cards. Seeded, so a
//! run driven by it is reproducible.

use crate::core::Square;
use crate::game::controller::{PlayerController, ShopAction};
use crate::game::view::GameStateView;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;

/// A controller that makes random choices
pub struct RandomController {
    rng: ChaCha12Rng,
}

impl RandomController {
    /// Create a random controller with a seeded RNG
    pub fn with_seed(seed: u64) -> Self {
        RandomController {
            rng: ChaCha12Rng::seed_from_u64(seed),
        }
    }
}

impl PlayerController for RandomController {
    fn name(&self) -> &str {
        "random"
    }

    fn choose_move(&mut self, view: &GameStateView) -> Option<(Square, Square)> {
        let moves = view.player_moves();
        moves
            .choose(&mut self.rng)
            .map(|(piece, mv)| (Square::new(piece.x, piece.y), Square::new(mv.x, mv.y)))
    }

    fn choose_tarot(&mut self, view: &GameStateView) -> Option<usize> {
        let owned = view.owned_tarots().len();
        if owned > 0 && self.rng.gen_bool(0.25) {
            Some(self.rng.gen_range(0..owned))
        } else {
            None
        }
    }

    fn choose_shop_action(&mut self, view: &GameStateView) -> ShopAction {
        let affordable = view.affordable_offers();
        match affordable.choose(&mut self.rng) {
            Some(&slot) if self.rng.gen_bool(0.5) => ShopAction::Buy(slot),
            _ => ShopAction::Leave,
        }
    }
}
