//! Static position evaluation for the enemy search
//!
//! Scores are from the enemy's perspective: positive values favor the enemy,
//! negative values favor the player. The search maximizes for the enemy.

use crate::core::{Piece, Side};
use crate::rules::Rules;

/// Magnitude returned for a checkmated side
pub const MATE_SCORE: f64 = 100_000.0;

/// Adjustment applied when a side's king is under attack
pub const CHECK_PENALTY: f64 = 0.5;

/// Signed material balance, enemy-positive
pub fn material_balance(pieces: &[Piece]) -> f64 {
    pieces
        .iter()
        .map(|p| {
            let value = p.kind.material_value() as f64;
            match p.side {
                Side::Enemy => value,
                Side::Player => -value,
            }
        })
        .sum()
}

/// Evaluate a position
///
/// Checkmate of either side dominates everything else. Otherwise the score
/// is the material balance, nudged by half a pawn against whichever side
/// is in check.
pub fn evaluate_position(rules: &Rules, pieces: &[Piece]) -> f64 {
    if rules.is_checkmate(Side::Player, pieces) {
        return MATE_SCORE;
    }
    if rules.is_checkmate(Side::Enemy, pieces) {
        return -MATE_SCORE;
    }

    let mut score = material_balance(pieces);
    if rules.is_king_in_check(Side::Player, pieces) {
        score += CHECK_PENALTY;
    }
    if rules.is_king_in_check(Side::Enemy, pieces) {
        score -= CHECK_PENALTY;
    }
    score
}
