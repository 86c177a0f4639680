//! Pseudo-legal move generation and attack detection
//!
//! Everything here is a pure function of (piece, board dimensions, modifiers,
//! position). Self-check is not considered; see `legality` for that.

use crate::core::{keys, Mods, Move, Piece, PieceId, PieceType, Side};
use smallvec::SmallVec;

/// Moves for a single piece; 16 covers almost every piece without spilling
pub type MoveList = SmallVec<[Move; 16]>;

/// Effectively unbounded slide range on a board capped at 8x8
const UNBOUNDED: i32 = 99;

/// Base range of the rook's bonus diagonal
const ROOK_DIAGONAL_RANGE: i32 = 2;

/// Extra range granted by the endgame specialist
const ENDGAME_BONUS: i32 = 2;

/// Endgame bonus applies below this many pieces on the board
const ENDGAME_PIECE_LIMIT: usize = 5;

const KNIGHT_JUMPS: [(i32, i32); 8] = [
    (1, 2),
    (2, 1),
    (-1, 2),
    (-2, 1),
    (1, -2),
    (2, -1),
    (-1, -2),
    (-2, -1),
];

const LONG_KNIGHT_JUMPS: [(i32, i32); 8] = [
    (1, 3),
    (3, 1),
    (-1, 3),
    (-3, 1),
    (1, -3),
    (3, -1),
    (-1, -3),
    (-3, -1),
];

pub(crate) const ORTHOGONAL: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
pub(crate) const DIAGONAL: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
pub(crate) const ALL_DIRECTIONS: [(i32, i32); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// Board dimensions plus the active modifier bag
#[derive(Debug, Clone, Copy)]
pub struct Rules<'a> {
    pub width: i32,
    pub height: i32,
    pub mods: &'a Mods,
}

impl<'a> Rules<'a> {
    pub fn new(width: i32, height: i32, mods: &'a Mods) -> Self {
        Rules { width, height, mods }
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    /// Pseudo-legal moves for `piece` in `pieces`
    pub fn moves_for(&self, piece: &Piece, pieces: &[Piece]) -> MoveList {
        let mut out = MoveList::new();
        let buffed = piece.side == Side::Player;
        let endgame_bonus = if buffed
            && self.mods.has_flag(keys::ENDGAME_SPECIALIST)
            && pieces.len() < ENDGAME_PIECE_LIMIT
        {
            ENDGAME_BONUS
        } else {
            0
        };

        match piece.kind {
            PieceType::Pawn => self.pawn_moves(piece, pieces, buffed, &mut out),
            PieceType::Knight => {
                for (dx, dy) in KNIGHT_JUMPS {
                    self.ray(piece, pieces, dx, dy, 1, &mut out);
                }
                if buffed && self.mods.knight_extended {
                    for (dx, dy) in LONG_KNIGHT_JUMPS {
                        self.ray(piece, pieces, dx, dy, 1, &mut out);
                    }
                }
            }
            PieceType::King => {
                let base = if buffed { self.mods.king_range.max(1) } else { 1 };
                let range = base + endgame_bonus;
                for (dx, dy) in ALL_DIRECTIONS {
                    self.ray(piece, pieces, dx, dy, range, &mut out);
                }
            }
            PieceType::Bishop => {
                if buffed && self.mods.bishop_guard_step {
                    for (dx, dy) in ORTHOGONAL {
                        self.ray(piece, pieces, dx, dy, 1, &mut out);
                    }
                }
                for (dx, dy) in DIAGONAL {
                    self.ray(piece, pieces, dx, dy, UNBOUNDED, &mut out);
                }
            }
            PieceType::Rook => {
                if buffed && self.mods.rook_diagonal {
                    for (dx, dy) in DIAGONAL {
                        self.ray(piece, pieces, dx, dy, ROOK_DIAGONAL_RANGE + endgame_bonus, &mut out);
                    }
                }
                for (dx, dy) in ORTHOGONAL {
                    self.ray(piece, pieces, dx, dy, UNBOUNDED, &mut out);
                }
            }
            PieceType::Queen => {
                for (dx, dy) in ORTHOGONAL.iter().chain(DIAGONAL.iter()) {
                    self.ray(piece, pieces, *dx, *dy, UNBOUNDED, &mut out);
                }
            }
        }

        out
    }

    fn pawn_moves(&self, piece: &Piece, pieces: &[Piece], buffed: bool, out: &mut MoveList) {
        let fy = piece.y + piece.side.forward();
        if self.in_bounds(piece.x, fy) && piece_at(pieces, piece.x, fy).is_none() {
            out.push(Move::quiet(piece.x, fy));
        }
        for nx in [piece.x - 1, piece.x + 1] {
            if !self.in_bounds(nx, fy) {
                continue;
            }
            if let Some(occ) = piece_at(pieces, nx, fy) {
                if occ.side != piece.side {
                    out.push(Move::capture(nx, fy));
                }
            }
        }

        if buffed && self.mods.pawn_side_step {
            for nx in [piece.x - 1, piece.x + 1] {
                if !self.in_bounds(nx, piece.y) {
                    continue;
                }
                match piece_at(pieces, nx, piece.y) {
                    None => out.push(Move::quiet(nx, piece.y)),
                    Some(occ) if occ.side != piece.side => out.push(Move::capture(nx, piece.y)),
                    Some(_) => {}
                }
            }
        }

        if buffed && self.mods.pawn_backward {
            let by = piece.y - piece.side.forward();
            if self.in_bounds(piece.x, by) && piece_at(pieces, piece.x, by).is_none() {
                out.push(Move::quiet(piece.x, by));
            }
        }
    }

    /// Walk from `piece` in (dx, dy) for up to `max_range` steps, stopping at
    /// the first occupant (captured only if it belongs to the other side)
    fn ray(&self, piece: &Piece, pieces: &[Piece], dx: i32, dy: i32, max_range: i32, out: &mut MoveList) {
        for step in 1..=max_range {
            let nx = piece.x + dx * step;
            let ny = piece.y + dy * step;
            if !self.in_bounds(nx, ny) {
                break;
            }
            match piece_at(pieces, nx, ny) {
                None => out.push(Move::quiet(nx, ny)),
                Some(occ) => {
                    if occ.side != piece.side {
                        out.push(Move::capture(nx, ny));
                    }
                    break;
                }
            }
        }
    }

    /// True if any piece not on `side` has a pseudo-legal capture onto (x, y)
    pub fn is_square_attacked(&self, side: Side, x: i32, y: i32, pieces: &[Piece]) -> bool {
        pieces.iter().filter(|p| p.side != side).any(|attacker| {
            self.moves_for(attacker, pieces)
                .iter()
                .any(|m| m.capture && m.x == x && m.y == y)
        })
    }

    /// A side without a king counts as in check
    pub fn is_king_in_check(&self, side: Side, pieces: &[Piece]) -> bool {
        match king_for_side(side, pieces) {
            Some(king) => self.is_square_attacked(side, king.x, king.y, pieces),
            None => true,
        }
    }
}

pub fn piece_at(pieces: &[Piece], x: i32, y: i32) -> Option<&Piece> {
    pieces.iter().find(|p| p.is_at(x, y))
}

pub fn king_for_side(side: Side, pieces: &[Piece]) -> Option<&Piece> {
    pieces.iter().find(|p| p.side == side && p.kind == PieceType::King)
}

/// New position with `id` relocated to the move target and any occupant of
/// the target removed. Unknown ids leave the position unchanged.
pub fn apply_move_on(pieces: &[Piece], id: PieceId, mv: Move) -> Vec<Piece> {
    if !pieces.iter().any(|p| p.id == id) {
        return pieces.to_vec();
    }
    pieces
        .iter()
        .filter(|p| p.id == id || !p.is_at(mv.x, mv.y))
        .map(|p| {
            if p.id == id {
                Piece { x: mv.x, y: mv.y, ..*p }
            } else {
                *p
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PieceId;

    fn piece(id: u32, side: Side, kind: PieceType, x: i32, y: i32) -> Piece {
        Piece::new(PieceId::new(id), side, kind, x, y)
    }

    fn targets(moves: &MoveList) -> Vec<(i32, i32)> {
        let mut v: Vec<_> = moves.iter().map(|m| (m.x, m.y)).collect();
        v.sort();
        v
    }

    #[test]
    fn test_player_pawn_forward_and_diagonal_capture() {
        let mods = Mods::new();
        let rules = Rules::new(6, 6, &mods);
        let pieces = vec![
            piece(0, Side::Player, PieceType::Pawn, 2, 4),
            piece(1, Side::Enemy, PieceType::Knight, 3, 3),
            piece(2, Side::Player, PieceType::Rook, 1, 3),
        ];
        let moves = rules.moves_for(&pieces[0], &pieces);
        assert_eq!(targets(&moves), vec![(2, 3), (3, 3)]);
        assert!(moves.iter().any(|m| m.x == 3 && m.capture));
    }

    #[test]
    fn test_enemy_pawn_ignores_player_mods() {
        let mut mods = Mods::new();
        mods.pawn_side_step = true;
        mods.pawn_backward = true;
        let rules = Rules::new(6, 6, &mods);
        let pieces = vec![piece(0, Side::Enemy, PieceType::Pawn, 2, 2)];
        let moves = rules.moves_for(&pieces[0], &pieces);
        assert_eq!(targets(&moves), vec![(2, 3)]);
    }

    #[test]
    fn test_pawn_side_step_and_backward() {
        let mut mods = Mods::new();
        mods.pawn_side_step = true;
        mods.pawn_backward = true;
        let rules = Rules::new(6, 6, &mods);
        let pieces = vec![
            piece(0, Side::Player, PieceType::Pawn, 2, 3),
            piece(1, Side::Enemy, PieceType::Pawn, 1, 3),
        ];
        let moves = rules.moves_for(&pieces[0], &pieces);
        assert_eq!(targets(&moves), vec![(1, 3), (2, 2), (2, 4), (3, 3)]);
        assert!(moves.iter().find(|m| m.x == 1 && m.y == 3).unwrap().capture);
        // backward move never captures
        assert!(!moves.iter().find(|m| m.y == 4).unwrap().capture);
    }

    #[test]
    fn test_knight_extended_jumps() {
        let mut mods = Mods::new();
        let pieces = vec![piece(0, Side::Player, PieceType::Knight, 4, 4)];
        let base = Rules::new(8, 8, &mods).moves_for(&pieces[0], &pieces).len();
        mods.knight_extended = true;
        let extended = Rules::new(8, 8, &mods).moves_for(&pieces[0], &pieces).len();
        assert_eq!(base, 8);
        assert_eq!(extended, 16);
    }

    #[test]
    fn test_bishop_guard_step() {
        let mut mods = Mods::new();
        mods.bishop_guard_step = true;
        let rules = Rules::new(3, 3, &mods);
        let pieces = vec![piece(0, Side::Player, PieceType::Bishop, 1, 1)];
        let moves = rules.moves_for(&pieces[0], &pieces);
        assert_eq!(moves.len(), 8);
    }

    #[test]
    fn test_rook_diagonal_range_and_endgame_bonus() {
        let mut mods = Mods::new();
        mods.rook_diagonal = true;
        let pieces = vec![piece(0, Side::Player, PieceType::Rook, 0, 0)];
        let rules = Rules::new(8, 8, &mods);
        let diag: Vec<_> = rules
            .moves_for(&pieces[0], &pieces)
            .into_iter()
            .filter(|m| m.x == m.y)
            .collect();
        assert_eq!(diag.len(), 2);

        mods.add_flag(keys::ENDGAME_SPECIALIST);
        let rules = Rules::new(8, 8, &mods);
        let diag: Vec<_> = rules
            .moves_for(&pieces[0], &pieces)
            .into_iter()
            .filter(|m| m.x == m.y)
            .collect();
        assert_eq!(diag.len(), 4);
    }

    #[test]
    fn test_king_range_slides_and_stops() {
        let mut mods = Mods::new();
        mods.king_range = 2;
        let rules = Rules::new(8, 8, &mods);
        let pieces = vec![
            piece(0, Side::Player, PieceType::King, 4, 4),
            piece(1, Side::Enemy, PieceType::Pawn, 4, 3),
            piece(2, Side::Player, PieceType::Pawn, 5, 4),
        ];
        let moves = rules.moves_for(&pieces[0], &pieces);
        // north: capture at distance 1 and stop
        assert!(moves.iter().any(|m| m.x == 4 && m.y == 3 && m.capture));
        assert!(!moves.iter().any(|m| m.x == 4 && m.y == 2));
        // east: blocked by own pawn
        assert!(!moves.iter().any(|m| m.y == 4 && m.x > 4));
        // west: two steps
        assert!(moves.iter().any(|m| m.x == 2 && m.y == 4));
    }

    #[test]
    fn test_enemy_king_is_single_step() {
        let mut mods = Mods::new();
        mods.king_range = 3;
        let rules = Rules::new(8, 8, &mods);
        let pieces = vec![piece(0, Side::Enemy, PieceType::King, 4, 4)];
        assert_eq!(rules.moves_for(&pieces[0], &pieces).len(), 8);
    }

    #[test]
    fn test_missing_king_is_in_check() {
        let mods = Mods::new();
        let rules = Rules::new(8, 8, &mods);
        let pieces = vec![piece(0, Side::Player, PieceType::King, 0, 7)];
        assert!(rules.is_king_in_check(Side::Enemy, &pieces));
        assert!(!rules.is_king_in_check(Side::Player, &pieces));
    }

    #[test]
    fn test_apply_move_on_removes_captured() {
        let pieces = vec![
            piece(0, Side::Player, PieceType::Rook, 0, 0),
            piece(1, Side::Enemy, PieceType::Pawn, 0, 3),
        ];
        let next = apply_move_on(&pieces, PieceId::new(0), Move::capture(0, 3));
        assert_eq!(next.len(), 1);
        assert!(next[0].is_at(0, 3));
        // original untouched
        assert_eq!(pieces.len(), 2);
        assert!(pieces[0].is_at(0, 0));
    }

    #[test]
    fn test_apply_move_on_unknown_id() {
        let pieces = vec![piece(0, Side::Player, PieceType::Rook, 0, 0)];
        let next = apply_move_on(&pieces, PieceId::new(9), Move::quiet(1, 1));
        assert_eq!(next, pieces);
    }
}
