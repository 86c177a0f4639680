//! Read-only game state view
//!
//! Controllers and hosts inspect the run through [`GameStateView`]; nothing
//! here can mutate the state. [`BoardSnapshot`] is the serializable rendering
//! of the view that hosts receive as JSON.

use crate::core::{keys, CardCategory, CardDefinition, Move, Piece, Side, Square};
use crate::game::objectives::objective_text;
use crate::game::phase::RunPhase;
use crate::game::rounds::{Boss, Objective};
use crate::game::shop;
use crate::game::GameState;
use crate::rules::{board_string, inactive_squares};
use serde::Serialize;

/// Read-only view of the run for controllers and hosts
pub struct GameStateView<'a> {
    game: &'a GameState,
}

impl<'a> GameStateView<'a> {
    pub fn new(game: &'a GameState) -> Self {
        GameStateView { game }
    }

    pub fn phase(&self) -> RunPhase {
        self.game.phase
    }

    pub fn round(&self) -> usize {
        self.game.round
    }

    pub fn turn(&self) -> u32 {
        self.game.turn
    }

    pub fn actions_left(&self) -> i32 {
        self.game.actions_left
    }

    pub fn board_size(&self) -> (i32, i32) {
        (self.game.board_w, self.game.board_h)
    }

    pub fn objective(&self) -> Objective {
        self.game.objective
    }

    pub fn gold(&self) -> u32 {
        self.game.gold
    }

    pub fn owned_tarots(&self) -> &[&'static CardDefinition] {
        &self.game.owned_tarots
    }

    pub fn shop_offer(&self) -> &[&'static CardDefinition] {
        &self.game.shop_offer
    }

    pub fn reroll_cost(&self) -> u32 {
        self.game.reroll_cost
    }

    pub fn tarot_slots_free(&self) -> bool {
        self.game.owned_tarots.len() < self.game.max_tarots
    }

    /// Price of `card` after discounts
    pub fn card_cost(&self, card: &CardDefinition) -> u32 {
        shop::card_cost(self.game, card)
    }

    /// Offer slots the player can pay for and has room for
    pub fn affordable_offers(&self) -> Vec<usize> {
        self.game
            .shop_offer
            .iter()
            .enumerate()
            .filter(|(_, card)| shop::can_afford(self.game, card))
            .filter(|(_, card)| card.category != CardCategory::Tarot || self.tarot_slots_free())
            .map(|(i, _)| i)
            .collect()
    }

    /// Whether fog currently hides enemy pieces away from the player's army
    pub fn fog_active(&self) -> bool {
        self.game.fog_of_war && self.game.mods.counter(keys::SCOUTS_REVEAL) <= 0
    }

    /// Whether `piece` is visible to the player
    pub fn is_visible(&self, piece: &Piece) -> bool {
        if piece.side == Side::Player || !self.fog_active() {
            return true;
        }
        self.game
            .pieces_of(Side::Player)
            .any(|p| (p.x - piece.x).abs() <= 1 && (p.y - piece.y).abs() <= 1)
    }

    /// Pieces the player can see
    pub fn visible_pieces(&self) -> Vec<Piece> {
        self.game
            .pieces
            .iter()
            .filter(|p| self.is_visible(p))
            .copied()
            .collect()
    }

    /// Every legal player move, piece by piece in position order
    pub fn player_moves(&self) -> Vec<(Piece, Move)> {
        self.game
            .pieces_of(Side::Player)
            .flat_map(|p| {
                self.game
                    .player_legal_moves(p)
                    .into_iter()
                    .map(move |mv| (*p, mv))
            })
            .collect()
    }

    pub fn player_in_check(&self) -> bool {
        self.game.is_in_check(Side::Player)
    }

    /// Enemy king position, if the player can see it
    pub fn enemy_king(&self) -> Option<&Piece> {
        self.game.king(Side::Enemy).filter(|k| self.is_visible(k))
    }

    /// Rules for the current board, for lookahead by controllers
    pub fn rules(&self) -> crate::rules::Rules<'_> {
        self.game.rules()
    }

    /// Full position, for evaluating candidate moves
    pub fn pieces(&self) -> &[Piece] {
        &self.game.pieces
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        let visible = self.visible_pieces();
        let mut destinations = Vec::new();
        for piece in self.game.pieces_of(Side::Player) {
            let moves = self.game.player_legal_moves(piece);
            if moves.is_empty() {
                continue;
            }
            destinations.push(Destinations {
                from: Square::new(piece.x, piece.y).to_key(),
                to: moves.iter().map(|m| Square::new(m.x, m.y).to_key()).collect(),
            });
        }

        BoardSnapshot {
            phase: self.game.phase,
            round: self.game.round + 1,
            turn: self.game.turn,
            turn_limit: self.game.turn_limit,
            board_w: self.game.board_w,
            board_h: self.game.board_h,
            board: board_string(&visible),
            inactive: inactive_squares(self.game.board_w, self.game.board_h)
                .iter()
                .map(Square::to_key)
                .collect(),
            pieces: visible,
            destinations,
            in_check: self.player_in_check(),
            objective: objective_text(self.game),
            captures: self.game.capture_count,
            target: self.game.target,
            actions_left: self.game.actions_left,
            boss: self.game.boss,
            fog_of_war: self.fog_active(),
            mirror_mods: self.game.mirror_mods,
            gold: self.game.gold,
            chips: self.game.total_chips,
            mult: self.game.total_mult,
            round_score: self.game.round_score,
            score_target: self.game.score_target,
            jokers: self.game.owned_jokers.iter().map(|c| c.id).collect(),
            tarots: self.game.owned_tarots.iter().map(|c| c.id).collect(),
            planets: self.game.owned_planets.clone(),
            vouchers: self.game.owned_vouchers.clone(),
            shop: self.game.shop_offer.iter().map(|c| c.id).collect(),
        }
    }
}

/// Legal destinations for one player piece, as square keys
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Destinations {
    pub from: String,
    pub to: Vec<String>,
}

/// Everything a host needs to draw the board and the HUD
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardSnapshot {
    pub phase: RunPhase,
    /// One-based round number
    pub round: usize,
    pub turn: u32,
    pub turn_limit: u32,
    pub board_w: i32,
    pub board_h: i32,
    pub board: String,
    pub inactive: Vec<String>,
    pub pieces: Vec<Piece>,
    pub destinations: Vec<Destinations>,
    pub in_check: bool,
    pub objective: String,
    pub captures: u32,
    pub target: u32,
    pub actions_left: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boss: Option<Boss>,
    pub fog_of_war: bool,
    pub mirror_mods: bool,
    pub gold: u32,
    pub chips: i64,
    pub mult: f64,
    pub round_score: i64,
    pub score_target: i64,
    pub jokers: Vec<&'static str>,
    pub tarots: Vec<&'static str>,
    pub planets: Vec<&'static str>,
    pub vouchers: Vec<&'static str>,
    pub shop: Vec<&'static str>,
}
