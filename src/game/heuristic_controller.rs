//! Heuristic controller
//!
//! Greedy one-ply player: take the richest capture, else give check, else
//! close in on the enemy king. Spends gold on permanent cards, most
//! expensive first, and uses tarots as soon as it owns them.

use crate::core::{CardCategory, Move, Piece, Side, Square};
use crate::game::controller::{PlayerController, ShopAction};
use crate::game::view::GameStateView;
use crate::rules::{apply_move_on, piece_at};

/// Move ranking, compared lexicographically
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct MoveScore {
    capture_chips: i64,
    gives_check: bool,
    /// Negated Chebyshev distance to the enemy king, so closer sorts higher
    closeness: i32,
    /// The landing square is not attacked by the enemy
    safe: bool,
}

/// Heuristic player that makes decisions using evaluation functions
#[derive(Debug, Default, Clone)]
pub struct HeuristicController;

impl HeuristicController {
    pub fn new() -> Self {
        HeuristicController
    }

    fn score_move(&self, view: &GameStateView, piece: &Piece, mv: Move) -> MoveScore {
        let rules = view.rules();
        let pieces = view.pieces();
        let capture_chips = if mv.capture {
            piece_at(pieces, mv.x, mv.y)
                .map(|t| t.kind.capture_chips())
                .unwrap_or(0)
        } else {
            0
        };

        let next = apply_move_on(pieces, piece.id, mv);
        let gives_check = rules.is_king_in_check(Side::Enemy, &next);
        let safe = !rules.is_square_attacked(Side::Player, mv.x, mv.y, &next);

        // fogged kings give no direction
        let closeness = view
            .enemy_king()
            .map(|k| -((k.x - mv.x).abs().max((k.y - mv.y).abs())))
            .unwrap_or(0);

        MoveScore {
            capture_chips,
            gives_check,
            closeness,
            safe,
        }
    }
}

impl PlayerController for HeuristicController {
    fn name(&self) -> &str {
        "heuristic"
    }

    fn choose_move(&mut self, view: &GameStateView) -> Option<(Square, Square)> {
        let mut best: Option<(MoveScore, Piece, Move)> = None;
        for (piece, mv) in view.player_moves() {
            let score = self.score_move(view, &piece, mv);
            if best.as_ref().map_or(true, |(s, _, _)| score > *s) {
                best = Some((score, piece, mv));
            }
        }
        best.map(|(_, piece, mv)| (Square::new(piece.x, piece.y), Square::new(mv.x, mv.y)))
    }

    fn choose_tarot(&mut self, view: &GameStateView) -> Option<usize> {
        if view.owned_tarots().is_empty() {
            None
        } else {
            Some(0)
        }
    }

    fn choose_shop_action(&mut self, view: &GameStateView) -> ShopAction {
        let offer = view.shop_offer();
        view.affordable_offers()
            .into_iter()
            .filter(|&i| offer[i].category != CardCategory::Tarot || view.owned_tarots().is_empty())
            .max_by_key(|&i| (view.card_cost(offer[i]), std::cmp::Reverse(i)))
            .map(ShopAction::Buy)
            .unwrap_or(ShopAction::Leave)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::card_by_id;
    use crate::core::PieceType;
    use crate::game::GameState;

    fn board() -> GameState {
        let mut game = GameState::new(0);
        game.board_w = 8;
        game.board_h = 8;
        game.spawn_piece(Side::Player, PieceType::King, 0, 7);
        game.spawn_piece(Side::Enemy, PieceType::King, 7, 0);
        game
    }

    #[test]
    fn test_prefers_richest_capture() {
        let mut game = board();
        game.spawn_piece(Side::Player, PieceType::Rook, 3, 4);
        game.spawn_piece(Side::Enemy, PieceType::Pawn, 3, 2);
        game.spawn_piece(Side::Enemy, PieceType::Knight, 5, 4);
        let view = GameStateView::new(&game);
        let choice = HeuristicController::new().choose_move(&view);
        assert_eq!(choice, Some((Square::new(3, 4), Square::new(5, 4))));
    }

    #[test]
    fn test_prefers_check_without_captures() {
        let mut game = board();
        game.spawn_piece(Side::Player, PieceType::Rook, 3, 4);
        let view = GameStateView::new(&game);
        let (from, to) = HeuristicController::new().choose_move(&view).unwrap();
        assert_eq!(from, Square::new(3, 4));
        assert!(to == Square::new(3, 0) || to == Square::new(7, 4));
    }

    #[test]
    fn test_shop_buys_most_expensive_affordable() {
        let mut game = board();
        game.gold = 6;
        game.shop_offer = vec![
            card_by_id("opening_theory").unwrap(),
            card_by_id("pawn_storm").unwrap(),
            card_by_id("checkmate_scholar").unwrap(),
        ];
        let view = GameStateView::new(&game);
        assert_eq!(HeuristicController::new().choose_shop_action(&view), ShopAction::Buy(1));
    }

    #[test]
    fn test_shop_leaves_when_broke() {
        let mut game = board();
        game.shop_offer = vec![card_by_id("pawn_storm").unwrap()];
        let view = GameStateView::new(&game);
        assert_eq!(HeuristicController::new().choose_shop_action(&view), ShopAction::Leave);
    }
}
