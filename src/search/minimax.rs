//! Depth-limited minimax with alpha-beta pruning
//!
//! The search never touches the live position: every explored move builds a
//! fresh `Vec<Piece>` with [`apply_move_on`] and recurses on that copy.

use crate::core::{Move, Piece, Side};
use crate::rules::{apply_move_on, MoveList, Rules};
use crate::search::evaluator::evaluate_position;

/// Minimax value of `pieces` searched `depth` plies deep
///
/// `maximizing_enemy` selects the side to move: the enemy maximizes, the
/// player minimizes. Call with `f64::NEG_INFINITY`/`f64::INFINITY` for a
/// full window.
pub fn minimax(
    rules: &Rules,
    pieces: &[Piece],
    depth: u32,
    maximizing_enemy: bool,
    mut alpha: f64,
    mut beta: f64,
) -> f64 {
    if depth == 0
        || rules.is_checkmate(Side::Player, pieces)
        || rules.is_checkmate(Side::Enemy, pieces)
    {
        return evaluate_position(rules, pieces);
    }

    let side = if maximizing_enemy { Side::Enemy } else { Side::Player };
    let moves = rules.all_legal_moves_for_side(side, pieces);
    if moves.is_empty() {
        return evaluate_position(rules, pieces);
    }

    if maximizing_enemy {
        let mut best = f64::NEG_INFINITY;
        for (piece, mv) in moves {
            let next = apply_move_on(pieces, piece.id, mv);
            let score = minimax(rules, &next, depth - 1, false, alpha, beta);
            if score > best {
                best = score;
            }
            if best > alpha {
                alpha = best;
            }
            if beta <= alpha {
                break;
            }
        }
        best
    } else {
        let mut best = f64::INFINITY;
        for (piece, mv) in moves {
            let next = apply_move_on(pieces, piece.id, mv);
            let score = minimax(rules, &next, depth - 1, true, alpha, beta);
            if score < best {
                best = score;
            }
            if best < beta {
                beta = best;
            }
            if beta <= alpha {
                break;
            }
        }
        best
    }
}

/// Minimax over the full window
pub fn search_value(rules: &Rules, pieces: &[Piece], depth: u32, maximizing_enemy: bool) -> f64 {
    minimax(rules, pieces, depth, maximizing_enemy, f64::NEG_INFINITY, f64::INFINITY)
}

/// Value of the position reached by moving `piece`, assuming the player
/// answers optimally at `ai_depth - 1`
pub fn score_enemy_move(rules: &Rules, piece: &Piece, mv: Move, pieces: &[Piece], ai_depth: u32) -> f64 {
    let next = apply_move_on(pieces, piece.id, mv);
    search_value(rules, &next, ai_depth.saturating_sub(1), false)
}

/// Pick the move for one enemy piece
///
/// With `ai_depth == 0` this is greedy: the first capture, else the move
/// closest to any player piece. Otherwise the highest-scoring move wins and
/// ties keep the earlier move.
pub fn choose_enemy_move(rules: &Rules, piece: &Piece, pieces: &[Piece], ai_depth: u32) -> Option<Move> {
    let legal = rules.legal_moves_for(piece, pieces);
    if legal.is_empty() {
        return None;
    }

    if ai_depth == 0 {
        if let Some(capture) = legal.iter().find(|m| m.capture) {
            return Some(*capture);
        }
        return Some(pick_greedy_move(&legal, pieces));
    }

    let mut best_move = legal[0];
    let mut best_score = f64::NEG_INFINITY;
    for mv in legal {
        let score = score_enemy_move(rules, piece, mv, pieces, ai_depth);
        if score > best_score {
            best_score = score;
            best_move = mv;
        }
    }
    Some(best_move)
}

/// Mirror of [`choose_enemy_move`] that picks the lowest-scoring move
pub fn choose_worst_enemy_move(rules: &Rules, piece: &Piece, pieces: &[Piece], ai_depth: u32) -> Option<Move> {
    let legal = rules.legal_moves_for(piece, pieces);
    let mut worst: Option<(Move, f64)> = None;
    for mv in legal {
        let score = score_enemy_move(rules, piece, mv, pieces, ai_depth);
        match worst {
            Some((_, s)) if s <= score => {}
            _ => worst = Some((mv, score)),
        }
    }
    worst.map(|(mv, _)| mv)
}

/// Move minimizing Manhattan distance to the nearest player piece
///
/// `moves` must be non-empty; with no player pieces the first move is taken.
pub fn pick_greedy_move(moves: &MoveList, pieces: &[Piece]) -> Move {
    let players: Vec<&Piece> = pieces.iter().filter(|p| p.side == Side::Player).collect();
    let nearest = |mv: &Move| -> i32 {
        players
            .iter()
            .map(|p| (p.x - mv.x).abs() + (p.y - mv.y).abs())
            .min()
            .unwrap_or(i32::MAX)
    };
    let mut best = moves[0];
    let mut best_distance = nearest(&best);
    for mv in moves.iter().skip(1) {
        let d = nearest(mv);
        if d < best_distance {
            best = *mv;
            best_distance = d;
        }
    }
    best
}
