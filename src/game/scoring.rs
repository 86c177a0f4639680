//! Chips, mult, and round score

use crate::cards::{run_joker_hooks, Hook};
use crate::core::{keys, PieceType, Side, Square};
use crate::game::GameState;
use serde::Serialize;

/// Flat chips for delivering check
pub const CHECK_CHIPS: i64 = 40;
/// Flat chips for delivering checkmate
pub const CHECKMATE_CHIPS: i64 = 200;
/// Bonus chips per net piece of material advantage at finalization
pub const MATERIAL_ADVANTAGE_CHIPS: i64 = 5;
/// Flat chips from Fortress Mentality at finalization
pub const FORTRESS_CHIPS: i64 = 20;
/// Extra chips for a knight capture with Cavalry Charge
pub const CAVALRY_CHIPS: i64 = 20;

/// A chip award with its source, reported to the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreEvent {
    pub chips: i64,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub square: Option<Square>,
}

impl ScoreEvent {
    pub fn new(chips: i64, source: impl Into<String>) -> Self {
        ScoreEvent {
            chips,
            source: source.into(),
            square: None,
        }
    }

    pub fn at(mut self, square: Square) -> Self {
        self.square = Some(square);
        self
    }
}

/// Chips for the player capturing `captured` with `capturer`
///
/// Doubled by Blitz Tactics on the first action of the turn; Cavalry Charge
/// adds a flat bonus for knights after doubling.
pub fn chips_for_capture(game: &GameState, capturer: PieceType, captured: PieceType) -> i64 {
    let mut chips = captured.capture_chips();
    if game.mods.has_flag(keys::BLITZ_TACTICS) && game.actions_taken_this_turn == 0 {
        chips *= 2;
    }
    if capturer == PieceType::Knight && game.mods.has_flag(keys::CAVALRY_CHARGE) {
        chips += CAVALRY_CHIPS;
    }
    chips
}

/// Recompute the running round score from chips and the accumulated mult
pub fn refresh_round_score(game: &mut GameState) {
    game.round_score = (game.total_chips as f64 * game.total_mult).floor() as i64;
}

pub fn add_chips(game: &mut GameState, chips: i64) {
    game.total_chips += chips;
    refresh_round_score(game);
}

pub fn add_mult(game: &mut GameState, mult: f64) {
    game.total_mult += mult;
    refresh_round_score(game);
}

/// Effective mult at finalization: Scholar's Mate multiplies by 1.5 when
/// check was delivered this round
pub fn calculate_round_mult(game: &GameState) -> f64 {
    let mut mult = game.total_mult;
    if game.mods.has_flag(keys::SCHOLARS_MATE) && game.delivered_check {
        mult *= 1.5;
    }
    mult
}

/// End-of-round bonus chip awards
pub fn calculate_bonus_chips(game: &GameState) -> Vec<ScoreEvent> {
    let mut events = Vec::new();
    if game.mods.has_flag(keys::MATERIAL_ADVANTAGE) {
        let advantage = game.count_side(Side::Player) as i64 - game.count_side(Side::Enemy) as i64;
        if advantage > 0 {
            events.push(ScoreEvent::new(
                advantage * MATERIAL_ADVANTAGE_CHIPS,
                "Material Advantage",
            ));
        }
    }
    if game.mods.has_flag(keys::FORTRESS_MENTALITY) {
        events.push(ScoreEvent::new(FORTRESS_CHIPS, "Fortress Mentality"));
    }
    events
}

/// Run score hooks, fold in bonus chips, and fix the final round score
///
/// Returns the bonus events so the caller can report them.
pub fn finalize_round_score(game: &mut GameState) -> Vec<ScoreEvent> {
    run_joker_hooks(game, Hook::Score, None);
    let mult = calculate_round_mult(game);
    let bonuses = calculate_bonus_chips(game);
    game.total_chips += bonuses.iter().map(|e| e.chips).sum::<i64>();
    game.round_score = (game.total_chips as f64 * mult).floor() as i64;
    bonuses
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_chips_by_type() {
        let game = GameState::new(0);
        assert_eq!(chips_for_capture(&game, PieceType::Rook, PieceType::Pawn), 10);
        assert_eq!(chips_for_capture(&game, PieceType::Rook, PieceType::Queen), 90);
        assert_eq!(chips_for_capture(&game, PieceType::Knight, PieceType::King), 200);
    }

    #[test]
    fn test_blitz_only_on_first_action() {
        let mut game = GameState::new(0);
        game.mods.add_flag(keys::BLITZ_TACTICS);
        assert_eq!(chips_for_capture(&game, PieceType::Rook, PieceType::Pawn), 20);
        game.actions_taken_this_turn = 1;
        assert_eq!(chips_for_capture(&game, PieceType::Rook, PieceType::Pawn), 10);
    }

    #[test]
    fn test_cavalry_after_blitz() {
        let mut game = GameState::new(0);
        game.mods.add_flag(keys::BLITZ_TACTICS);
        game.mods.add_flag(keys::CAVALRY_CHARGE);
        assert_eq!(chips_for_capture(&game, PieceType::Knight, PieceType::Bishop), 80);
        assert_eq!(chips_for_capture(&game, PieceType::Bishop, PieceType::Bishop), 60);
    }

    #[test]
    fn test_finalize_without_bonuses() {
        let mut game = GameState::new(0);
        add_chips(&mut game, 55);
        add_mult(&mut game, 0.5);
        assert_eq!(game.round_score, 82);
        let bonuses = finalize_round_score(&mut game);
        assert!(bonuses.is_empty());
        assert_eq!(game.round_score, 82);
    }

    #[test]
    fn test_scholars_mate_needs_check() {
        let mut game = GameState::new(0);
        game.mods.add_flag(keys::SCHOLARS_MATE);
        add_chips(&mut game, 100);
        finalize_round_score(&mut game);
        assert_eq!(game.round_score, 100);

        game.delivered_check = true;
        finalize_round_score(&mut game);
        assert_eq!(game.round_score, 150);
        // the multiplier is not folded into total_mult
        assert_eq!(game.total_mult, 1.0);
    }

    #[test]
    fn test_bonus_chips_fold_in_before_multiply() {
        let mut game = GameState::new(0);
        game.mods.add_flag(keys::MATERIAL_ADVANTAGE);
        game.mods.add_flag(keys::FORTRESS_MENTALITY);
        game.spawn_piece(Side::Player, PieceType::King, 0, 5);
        game.spawn_piece(Side::Player, PieceType::Rook, 1, 5);
        game.spawn_piece(Side::Player, PieceType::Pawn, 2, 4);
        game.spawn_piece(Side::Enemy, PieceType::King, 5, 0);
        game.total_mult = 2.0;
        add_chips(&mut game, 10);

        let bonuses = finalize_round_score(&mut game);
        assert_eq!(bonuses.len(), 2);
        assert_eq!(bonuses[0].chips, 10);
        assert_eq!(bonuses[1].chips, 20);
        assert_eq!(game.total_chips, 40);
        assert_eq!(game.round_score, 80);
    }

    #[test]
    fn test_material_disadvantage_awards_nothing() {
        let mut game = GameState::new(0);
        game.mods.add_flag(keys::MATERIAL_ADVANTAGE);
        game.spawn_piece(Side::Enemy, PieceType::King, 5, 0);
        assert!(calculate_bonus_chips(&game).is_empty());
    }
}
