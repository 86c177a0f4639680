//! Legality filter: pseudo-legal moves minus those that expose the mover's king

use crate::core::{Move, Piece, Side};
use crate::rules::movegen::{apply_move_on, MoveList, Rules};

impl<'a> Rules<'a> {
    /// Moves for `piece` that don't leave its own side in check
    pub fn legal_moves_for(&self, piece: &Piece, pieces: &[Piece]) -> MoveList {
        self.moves_for(piece, pieces)
            .into_iter()
            .filter(|mv| {
                let next = apply_move_on(pieces, piece.id, *mv);
                !self.is_king_in_check(piece.side, &next)
            })
            .collect()
    }

    /// Every legal (piece, move) pair for `side`, in position order
    pub fn all_legal_moves_for_side(&self, side: Side, pieces: &[Piece]) -> Vec<(Piece, Move)> {
        pieces
            .iter()
            .filter(|p| p.side == side)
            .flat_map(|piece| {
                self.legal_moves_for(piece, pieces)
                    .into_iter()
                    .map(move |mv| (*piece, mv))
            })
            .collect()
    }

    /// True if `side` has at least one legal move; cheaper than collecting them all
    pub fn has_any_legal_move(&self, side: Side, pieces: &[Piece]) -> bool {
        pieces
            .iter()
            .filter(|p| p.side == side)
            .any(|piece| !self.legal_moves_for(piece, pieces).is_empty())
    }

    /// In check with no legal moves. Stalemate is not distinguished.
    pub fn is_checkmate(&self, side: Side, pieces: &[Piece]) -> bool {
        self.is_king_in_check(side, pieces) && !self.has_any_legal_move(side, pieces)
    }
}
