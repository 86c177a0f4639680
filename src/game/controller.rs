//! Player controller trait
//!
//! The autopilot asks a controller for every player decision: which move to
//! submit, whether to use a tarot first, and what to do in the shop. A
//! controller only ever sees a read-only [`GameStateView`].

use crate::core::Square;
use crate::game::view::GameStateView;

/// A decision in the shop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShopAction {
    /// Buy the card in this offer slot
    Buy(usize),
    Reroll,
    /// Close the shop and start the next round
    Leave,
}

/// Decision maker for the player side of a run
pub trait PlayerController {
    /// Short name used in summaries and the CLI
    fn name(&self) -> &str;

    /// Pick a move as (origin, destination); `None` gives up the run
    fn choose_move(&mut self, view: &GameStateView) -> Option<(Square, Square)>;

    /// Optionally pick an owned tarot to use before the next move
    fn choose_tarot(&mut self, _view: &GameStateView) -> Option<usize> {
        None
    }

    fn choose_shop_action(&mut self, view: &GameStateView) -> ShopAction;
}
