//! Main game state structure

use crate::core::{CardDefinition, IdGen, Mods, Move, Piece, PieceId, PieceType, Side, Square};
use crate::game::phase::RunPhase;
use crate::game::rounds::{Boss, Difficulty, Objective};
use crate::game::GameLogger;
use crate::rules::{king_for_side, MoveList, Rules};
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use std::time::Instant;

/// Tarot slots at the start of a run
pub const DEFAULT_MAX_TAROTS: usize = 3;
/// Cards offered per shop visit at the start of a run
pub const DEFAULT_SHOP_CARDS: usize = 3;
/// Reroll price at the start of a run
pub const DEFAULT_REROLL_COST: u32 = 3;

/// Complete run state
///
/// The single mutable root of the engine. Only the run state machine
/// (`game::flow`) and the card effect handlers it invokes write to it;
/// everything else reads it or works on copies of `pieces`.
#[derive(Debug, Clone)]
pub struct GameState {
    // --- round-scoped ---
    /// Zero-based round index
    pub round: usize,
    /// One-based turn counter within the round
    pub turn: u32,
    pub board_w: i32,
    pub board_h: i32,
    /// The live position
    pub pieces: Vec<Piece>,
    pub capture_count: u32,
    pub delivered_check: bool,
    /// Player actions remaining this turn
    pub actions_left: i32,
    /// Actions carried over into the next player turn
    pub queued_actions: i32,
    /// Player moves applied since the current turn started
    pub actions_taken_this_turn: u32,
    pub objective: Objective,
    pub target: u32,
    pub turn_limit: u32,
    pub enemy_actions: u32,
    pub ai_depth: u32,
    pub ai_difficulty: Difficulty,
    pub last_move: Option<(Square, Square)>,
    pub freeze_enemy_phase: bool,
    pub boss: Option<Boss>,
    pub fog_of_war: bool,
    pub pawn_immune_turns: u32,
    pub mirror_mods: bool,

    // --- input dedupe ---
    pub last_input_sig: Option<String>,
    pub last_input_at: Option<Instant>,

    // --- run-scoped ---
    pub game_over: bool,
    pub phase: RunPhase,
    pub mods: Mods,
    pub gold: u32,
    pub total_chips: i64,
    pub total_mult: f64,
    pub round_score: i64,
    pub score_target: i64,
    pub max_tarots: usize,
    pub shop_cards: usize,
    pub reroll_cost: u32,
    pub base_reroll_cost: u32,
    pub owned_jokers: Vec<&'static CardDefinition>,
    pub owned_tarots: Vec<&'static CardDefinition>,
    pub owned_planets: Vec<&'static str>,
    pub owned_vouchers: Vec<&'static str>,
    /// Ids of every permanent card bought this run
    pub upgrades: Vec<&'static str>,
    /// Cards currently on offer while in the shop
    pub shop_offer: Vec<&'static CardDefinition>,

    /// Seed the run was started with
    pub seed: u64,
    /// Random number generator for spawns, the shop and random card effects
    pub rng: ChaCha12Rng,
    /// Piece id allocator, never rewound within a run
    pub ids: IdGen,
    /// Centralized logger for run events
    pub logger: GameLogger,
}

impl GameState {
    /// Create a new state with run-scoped defaults; call `RunLoop::reset_run`
    /// to populate the first round
    pub fn new(seed: u64) -> Self {
        GameState {
            round: 0,
            turn: 1,
            board_w: 6,
            board_h: 6,
            pieces: Vec::new(),
            capture_count: 0,
            delivered_check: false,
            actions_left: 0,
            queued_actions: 0,
            actions_taken_this_turn: 0,
            objective: Objective::CaptureCount,
            target: 0,
            turn_limit: 0,
            enemy_actions: 1,
            ai_depth: 1,
            ai_difficulty: Difficulty::Easy,
            last_move: None,
            freeze_enemy_phase: false,
            boss: None,
            fog_of_war: false,
            pawn_immune_turns: 0,
            mirror_mods: false,
            last_input_sig: None,
            last_input_at: None,
            game_over: false,
            phase: RunPhase::AwaitingPlayerInput,
            mods: Mods::new(),
            gold: 0,
            total_chips: 0,
            total_mult: 1.0,
            round_score: 0,
            score_target: 0,
            max_tarots: DEFAULT_MAX_TAROTS,
            shop_cards: DEFAULT_SHOP_CARDS,
            reroll_cost: DEFAULT_REROLL_COST,
            base_reroll_cost: DEFAULT_REROLL_COST,
            owned_jokers: Vec::new(),
            owned_tarots: Vec::new(),
            owned_planets: Vec::new(),
            owned_vouchers: Vec::new(),
            upgrades: Vec::new(),
            shop_offer: Vec::new(),
            seed,
            rng: ChaCha12Rng::seed_from_u64(seed),
            ids: IdGen::new(),
            logger: GameLogger::new(),
        }
    }

    /// Reseed the RNG for deterministic replay
    pub fn seed_rng(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = ChaCha12Rng::seed_from_u64(seed);
    }

    /// Move rules for the current board and modifiers
    pub fn rules(&self) -> Rules<'_> {
        Rules::new(self.board_w, self.board_h, &self.mods)
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.board_w && y < self.board_h
    }

    pub fn piece_at(&self, x: i32, y: i32) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.is_at(x, y))
    }

    pub fn is_empty(&self, x: i32, y: i32) -> bool {
        self.piece_at(x, y).is_none()
    }

    pub fn get_piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.id == id)
    }

    pub fn get_piece_mut(&mut self, id: PieceId) -> Option<&mut Piece> {
        self.pieces.iter_mut().find(|p| p.id == id)
    }

    /// Remove a piece from the live position, returning it
    pub fn remove_piece(&mut self, id: PieceId) -> Option<Piece> {
        let idx = self.pieces.iter().position(|p| p.id == id)?;
        Some(self.pieces.remove(idx))
    }

    /// Add a new piece with a fresh id
    pub fn spawn_piece(&mut self, side: Side, kind: PieceType, x: i32, y: i32) -> PieceId {
        let id = self.ids.next_id();
        self.pieces.push(Piece::new(id, side, kind, x, y));
        id
    }

    pub fn pieces_of(&self, side: Side) -> impl Iterator<Item = &Piece> {
        self.pieces.iter().filter(move |p| p.side == side)
    }

    pub fn count_side(&self, side: Side) -> usize {
        self.pieces_of(side).count()
    }

    pub fn king(&self, side: Side) -> Option<&Piece> {
        king_for_side(side, &self.pieces)
    }

    /// Legal moves for a player piece in the live position, minus captures
    /// of enemy pawns while pawn immunity is active
    pub fn player_legal_moves(&self, piece: &Piece) -> MoveList {
        let mut moves = self.rules().legal_moves_for(piece, &self.pieces);
        if piece.side == Side::Player && self.pawn_immune_turns > 0 {
            moves.retain(|mv| !self.is_immune_target(*mv));
        }
        moves
    }

    fn is_immune_target(&self, mv: Move) -> bool {
        mv.capture
            && self
                .piece_at(mv.x, mv.y)
                .map(|p| p.side == Side::Enemy && p.kind == PieceType::Pawn)
                .unwrap_or(false)
    }

    pub fn is_in_check(&self, side: Side) -> bool {
        self.rules().is_king_in_check(side, &self.pieces)
    }

    pub fn is_checkmate(&self, side: Side) -> bool {
        self.rules().is_checkmate(side, &self.pieces)
    }

    /// Ids of everything the shop should no longer offer
    pub fn owned_ids(&self) -> Vec<&'static str> {
        let mut ids: Vec<&'static str> = self.owned_jokers.iter().map(|c| c.id).collect();
        ids.extend(self.owned_planets.iter().copied());
        ids.extend(self.owned_vouchers.iter().copied());
        ids.extend(self.upgrades.iter().copied());
        ids
    }

    pub fn owns_joker(&self, id: &str) -> bool {
        self.owned_jokers.iter().any(|c| c.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_defaults() {
        let game = GameState::new(7);
        assert_eq!(game.total_mult, 1.0);
        assert_eq!(game.max_tarots, 3);
        assert_eq!(game.shop_cards, 3);
        assert_eq!(game.reroll_cost, 3);
        assert_eq!(game.mods.king_range, 1);
        assert_eq!(game.phase, RunPhase::AwaitingPlayerInput);
    }

    #[test]
    fn test_spawn_and_remove() {
        let mut game = GameState::new(0);
        let a = game.spawn_piece(Side::Player, PieceType::King, 2, 5);
        let b = game.spawn_piece(Side::Enemy, PieceType::Pawn, 2, 1);
        assert_ne!(a, b);
        assert_eq!(game.count_side(Side::Enemy), 1);
        assert!(game.piece_at(2, 1).is_some());

        let removed = game.remove_piece(b).unwrap();
        assert_eq!(removed.kind, PieceType::Pawn);
        assert!(game.remove_piece(b).is_none());
        assert!(game.is_empty(2, 1));
    }

    #[test]
    fn test_pawn_immunity_filters_captures() {
        let mut game = GameState::new(0);
        game.board_w = 6;
        game.board_h = 6;
        game.spawn_piece(Side::Player, PieceType::King, 0, 5);
        game.spawn_piece(Side::Enemy, PieceType::King, 5, 0);
        let rook = game.spawn_piece(Side::Player, PieceType::Rook, 3, 5);
        game.spawn_piece(Side::Enemy, PieceType::Pawn, 3, 2);

        let piece = *game.get_piece(rook).unwrap();
        assert!(game.player_legal_moves(&piece).iter().any(|m| m.capture));

        game.pawn_immune_turns = 2;
        let moves = game.player_legal_moves(&piece);
        assert!(!moves.iter().any(|m| m.capture));
        // still slides up to the pawn
        assert!(moves.iter().any(|m| m.x == 3 && m.y == 3));
    }
}
