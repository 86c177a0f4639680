//! Run state machine
//!
//! Drives rounds, player turns, enemy phases, and the shop. [`RunLoop`] is the
//! only writer of [`GameState`] during play; every mutation is followed by a
//! render request to the host.

/// Log search decisions only when the feature is on; the format! calls are
/// a measurable cost inside the enemy phase
macro_rules! log_search {
    ($self:expr, $($arg:tt)*) => {
        #[cfg(feature = "verbose-logging")]
        {
            $self.game.logger.verbose_in("enemy_search", &format!($($arg)*));
        }
        #[cfg(not(feature = "verbose-logging"))]
        {
            let _ = &$self;
            let _ = || format!($($arg)*);
        }
    };
}

use crate::cards::{apply_effect, run_joker_hooks, Hook};
use crate::core::{keys, CardDefinition, Move, Mods, Piece, PieceId, PieceType, Side, Square};
use crate::game::host::{GameEvent, GameHost};
use crate::game::objectives::{check_loss, check_round_win, objective_text};
use crate::game::phase::RunPhase;
use crate::game::rounds::{difficulty_for_depth, ai_depth_for_round, round_config, score_target_for_round, Boss, RoundConfig};
use crate::game::scoring::{self, CHECKMATE_CHIPS, CHECK_CHIPS};
use crate::game::shop;
use crate::game::state::{DEFAULT_MAX_TAROTS, DEFAULT_REROLL_COST, DEFAULT_SHOP_CARDS};
use crate::game::view::GameStateView;
use crate::game::GameState;
use crate::search::{choose_enemy_move, choose_worst_enemy_move, score_enemy_move};
use crate::{Result, RogueError};
use rand::seq::SliceRandom;
use rand::Rng;
use std::time::{Duration, Instant};

/// Identical submissions closer together than this are dropped
pub const INPUT_DEBOUNCE: Duration = Duration::from_millis(250);
/// Random placement attempts per piece before it is skipped
pub const SPAWN_ATTEMPTS: u32 = 200;

const PLAYER_ROSTER: [PieceType; 7] = [
    PieceType::King,
    PieceType::Queen,
    PieceType::Rook,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Pawn,
    PieceType::Pawn,
];

const ENEMY_POOL: [PieceType; 7] = [
    PieceType::Queen,
    PieceType::Rook,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Pawn,
    PieceType::Pawn,
    PieceType::Pawn,
];

/// Run state machine bound to a game state and a host
pub struct RunLoop<'a> {
    /// The game state
    pub game: &'a mut GameState,
    host: &'a mut dyn GameHost,
}

impl<'a> RunLoop<'a> {
    pub fn new(game: &'a mut GameState, host: &'a mut dyn GameHost) -> Self {
        RunLoop { game, host }
    }

    pub fn view(&self) -> GameStateView<'_> {
        GameStateView::new(self.game)
    }

    fn log(&mut self, message: &str) {
        self.game.logger.normal(message);
        self.host.log_line(message);
    }

    /// Round and run outcomes, visible at Minimal verbosity
    fn log_outcome(&mut self, message: &str) {
        self.game.logger.minimal(message);
        self.host.log_line(message);
    }

    fn render(&mut self) {
        self.host.render();
    }

    fn score(&mut self, chips: i64, square: Option<Square>) {
        scoring::add_chips(self.game, chips);
        self.host.on_event(&GameEvent::Score {
            chips,
            source: format!("+{} chips", chips),
            square,
        });
    }

    /// Start a fresh run: clear run-scoped state and set up round 1
    pub fn reset_run(&mut self) {
        let game = &mut *self.game;
        game.game_over = false;
        game.phase = RunPhase::AwaitingPlayerInput;
        game.upgrades.clear();
        game.last_move = None;
        game.mods = Mods::new();
        game.gold = 0;
        game.owned_jokers.clear();
        game.owned_tarots.clear();
        game.owned_planets.clear();
        game.owned_vouchers.clear();
        game.shop_offer.clear();
        game.total_chips = 0;
        game.total_mult = 1.0;
        game.round_score = 0;
        game.queued_actions = 0;
        game.max_tarots = DEFAULT_MAX_TAROTS;
        game.shop_cards = DEFAULT_SHOP_CARDS;
        game.base_reroll_cost = DEFAULT_REROLL_COST;
        self.setup_round(0);
    }

    /// Configure, populate, and open round `index`
    pub fn setup_round(&mut self, index: usize) {
        let config = round_config(index);
        {
            let game = &mut *self.game;
            game.round = index;
            game.turn = 1;
            game.capture_count = 0;
            game.delivered_check = false;
            game.board_w = config.board_w.min(crate::game::rounds::MAX_BOARD);
            game.board_h = config.board_h.min(crate::game::rounds::MAX_BOARD);
            game.objective = config.objective;
            game.target = config.target;
            game.turn_limit = config.turn_limit;
            game.enemy_actions = config.enemy_actions;
            let depth = config.ai_depth.unwrap_or_else(|| ai_depth_for_round(index));
            game.ai_depth = depth;
            game.ai_difficulty = config
                .ai_difficulty
                .unwrap_or_else(|| difficulty_for_depth(depth));
            game.pieces.clear();
            game.last_move = None;
            game.freeze_enemy_phase = game.mods.cryo_pulse;
            game.total_chips = 0;
            game.total_mult = 1.0;
            game.round_score = 0;
            game.score_target = score_target_for_round(index);
            game.reroll_cost = game.base_reroll_cost;
            game.fog_of_war = false;
            game.pawn_immune_turns = 0;
            game.mirror_mods = false;
            game.boss = config.boss;
            game.phase = RunPhase::AwaitingPlayerInput;
            game.shop_offer.clear();
        }

        if let Some(boss) = config.boss {
            self.apply_boss(boss);
        }

        self.spawn_squads(&config);
        run_joker_hooks(self.game, Hook::RoundStart, None);
        self.start_player_turn();

        let opening = format!(
            "Round {} begins ({}, AI depth {}). Objective: {}",
            index + 1,
            self.game.ai_difficulty,
            self.game.ai_depth,
            objective_text(self.game)
        );
        self.log(&opening);
        if let Some(boss) = self.game.boss {
            self.log(&format!("BOSS: {}: {}", boss.name(), boss.description()));
        }
        self.render();
    }

    fn apply_boss(&mut self, boss: Boss) {
        let game = &mut *self.game;
        match boss {
            Boss::Wall => game.pawn_immune_turns = 3,
            Boss::Mirror => game.mirror_mods = true,
            Boss::Clock => game.turn_limit = game.turn_limit.div_ceil(2).max(5),
            Boss::Fog => game.fog_of_war = true,
            // both act on spawning
            Boss::Swarm | Boss::Fortress => {}
        }
    }

    /// Player roster for the next round, including voucher changes
    pub fn player_roster(&self) -> Vec<PieceType> {
        let mods = &self.game.mods;
        let mut roster = PLAYER_ROSTER.to_vec();
        let extra = mods.counter(keys::EXTRA_PIECES).max(0) + mods.counter(keys::EXTRA_PAWNS).max(0);
        roster.extend(std::iter::repeat(PieceType::Pawn).take(extra as usize));

        if mods.has_flag(keys::VETERANS) {
            let mut replaced = 0;
            for kind in roster.iter_mut().rev() {
                if replaced == 2 {
                    break;
                }
                if *kind == PieceType::Pawn {
                    *kind = if replaced == 0 { PieceType::Knight } else { PieceType::Bishop };
                    replaced += 1;
                }
            }
        }
        roster
    }

    fn spawn_squads(&mut self, config: &RoundConfig) {
        let h = self.game.board_h;
        let player_band_start = (h - ((h + 2) / 3).max(2)).max(0);
        let enemy_band_end = (h / 3).max(1).min(h - 1);

        let roster = self.player_roster();
        self.place_pieces(Side::Player, &roster, player_band_start, h - 1);
        self.place_pieces(Side::Enemy, &[PieceType::King], 0, 0);

        let mut guards = 0;
        if config.boss == Some(Boss::Fortress) {
            guards = self.place_fortress_rooks(config.enemy_count.saturating_sub(1));
        }

        let extra_count = config.enemy_count.saturating_sub(1 + guards);
        let extra: Vec<PieceType> = (0..extra_count)
            .map(|_| *ENEMY_POOL.choose(&mut self.game.rng).unwrap_or(&PieceType::Pawn))
            .collect();
        self.place_pieces(Side::Enemy, &extra, 0, enemy_band_end);
    }

    /// Rooks orthogonally adjacent to the enemy king, at most two
    fn place_fortress_rooks(&mut self, budget: u32) -> u32 {
        let Some(king) = self.game.king(Side::Enemy).copied() else {
            return 0;
        };
        let mut placed = 0;
        for (dx, dy) in [(-1, 0), (1, 0), (0, 1), (0, -1)] {
            if placed >= budget.min(2) {
                break;
            }
            let (x, y) = (king.x + dx, king.y + dy);
            if self.game.in_bounds(x, y) && self.game.is_empty(x, y) {
                self.game.spawn_piece(Side::Enemy, PieceType::Rook, x, y);
                placed += 1;
            }
        }
        placed
    }

    /// Scatter `kinds` over rows `min_y..=max_y`; a piece that finds no free
    /// square within the attempt budget is dropped
    fn place_pieces(&mut self, side: Side, kinds: &[PieceType], min_y: i32, max_y: i32) {
        let w = self.game.board_w;
        for &kind in kinds {
            for _ in 0..SPAWN_ATTEMPTS {
                let x = self.game.rng.gen_range(0..w);
                let y = self.game.rng.gen_range(min_y..=max_y);
                if self.game.is_empty(x, y) {
                    self.game.spawn_piece(side, kind, x, y);
                    break;
                }
            }
        }
    }

    fn start_player_turn(&mut self) {
        self.game.last_input_sig = None;
        self.game.last_input_at = None;
        self.game.actions_left = 1 + self.game.mods.global_actions + self.game.queued_actions;
        self.game.queued_actions = 0;
        self.game.actions_taken_this_turn = 0;

        if self.game.mods.periodic_tempo && self.game.turn % 3 == 0 {
            self.game.actions_left += 1;
            self.log("Tempo Cycle grants +1 action.");
        }

        if self.game.mods.has_flag(keys::OPENING_THEORY) && self.game.turn == 1 {
            self.game.actions_left += 2;
            self.log("Opening Theory grants +2 actions.");
        }

        if self.game.mods.has_flag(keys::CASTLE_KEEP) && self.rook_guards_king() {
            self.game.actions_left += 1;
            self.log("Castle Keep grants +1 action.");
        }

        let debt = self.game.mods.counter(keys::OVERCHARGE_DEBT);
        if debt > 0 {
            self.game.actions_left = (self.game.actions_left - debt).max(1);
            self.game.mods.clear_counter(keys::OVERCHARGE_DEBT);
            self.log("Overcharge debt: -1 action.");
        }

        run_joker_hooks(self.game, Hook::TurnStart, None);

        if self.game.pawn_immune_turns > 0 {
            self.game.pawn_immune_turns -= 1;
        }
        if self.game.mods.counter(keys::SCOUTS_REVEAL) > 0 {
            self.game.mods.bump_counter(keys::SCOUTS_REVEAL, -1);
        }
    }

    fn rook_guards_king(&self) -> bool {
        let Some(king) = self.game.king(Side::Player) else {
            return false;
        };
        self.game
            .pieces_of(Side::Player)
            .any(|p| p.kind == PieceType::Rook && (p.x - king.x).abs() <= 1 && (p.y - king.y).abs() <= 1)
    }

    /// Submit a player move in board-address notation ("e2", "e4")
    ///
    /// Returns true if the move was applied. Declined input only re-renders.
    pub fn submit_player_move(&mut self, from: &str, to: &str) -> bool {
        self.submit_player_move_at(from, to, Instant::now())
    }

    /// [`Self::submit_player_move`] with an explicit submission time
    pub fn submit_player_move_at(&mut self, from: &str, to: &str, now: Instant) -> bool {
        if from == to {
            self.decline("origin and destination are the same square");
            return false;
        }
        let sig = format!("{}-{}", from, to);
        if let (Some(last_sig), Some(last_at)) = (&self.game.last_input_sig, self.game.last_input_at) {
            if *last_sig == sig && now.saturating_duration_since(last_at) < INPUT_DEBOUNCE {
                self.game.logger.verbose_in("declined_input", &format!("Duplicate submission {}", sig));
                self.render();
                return false;
            }
        }
        self.game.last_input_sig = Some(sig);
        self.game.last_input_at = Some(now);

        if self.game.game_over || !self.game.phase.accepts_moves() || self.game.actions_left <= 0 {
            self.decline("no move accepted right now");
            return false;
        }

        let (orig, dest) = match (Square::parse(from), Square::parse(to)) {
            (Ok(orig), Ok(dest)) => (orig, dest),
            (Err(e), _) | (_, Err(e)) => {
                self.decline(&e.to_string());
                return false;
            }
        };

        let Some(piece) = self.game.piece_at(orig.x, orig.y).copied() else {
            self.decline("no piece on origin square");
            return false;
        };
        if piece.side != Side::Player {
            self.decline("origin piece is not yours");
            return false;
        }
        let Some(mv) = self
            .game
            .player_legal_moves(&piece)
            .into_iter()
            .find(|m| m.x == dest.x && m.y == dest.y)
        else {
            self.decline("illegal destination");
            return false;
        };

        self.game.last_move = Some((orig, dest));
        self.apply_player_move(piece, mv);
        true
    }

    fn decline(&mut self, reason: &str) {
        self.game
            .logger
            .verbose_in("declined_input", &format!("Declined move: {}", reason));
        self.render();
    }

    fn apply_player_move(&mut self, piece: Piece, mv: Move) {
        let dest = Square::new(mv.x, mv.y);

        if let Some(target) = self.game.piece_at(mv.x, mv.y).copied() {
            if target.side != piece.side {
                self.resolve_player_capture(&piece, &target, dest);
            }
        }

        if let Some(p) = self.game.get_piece_mut(piece.id) {
            p.x = mv.x;
            p.y = mv.y;
        }
        self.game.last_move = Some((Square::new(piece.x, piece.y), dest));

        if piece.kind == PieceType::Pawn
            && mv.y <= 1
            && self.game.mods.has_flag(keys::BATTLEFIELD_PROMOTION)
        {
            if let Some(p) = self.game.get_piece_mut(piece.id) {
                p.kind = PieceType::Queen;
            }
            self.log("Battlefield Promotion: Pawn becomes Queen!");
        }

        if self.game.is_in_check(Side::Enemy) {
            self.game.delivered_check = true;
            if self.game.is_checkmate(Side::Enemy) {
                self.log("Checkmate on enemy king.");
                self.host.on_event(&GameEvent::Checkmate);
                self.score(CHECKMATE_CHIPS, Some(dest));
            } else {
                self.log("Check on enemy king.");
                self.host.on_event(&GameEvent::Check);
                self.score(CHECK_CHIPS, Some(dest));
            }
            run_joker_hooks(self.game, Hook::Check, None);
        }

        if check_round_win(self.game) {
            self.win_round();
            return;
        }

        self.game.actions_left -= 1;
        self.game.actions_taken_this_turn += 1;
        if self.game.actions_left <= 0 {
            self.enemy_phase();
            self.game.turn += 1;
            if check_loss(self.game) {
                self.lose_run();
                return;
            }
            self.start_player_turn();
        }
        self.render();
    }

    fn resolve_player_capture(&mut self, piece: &Piece, target: &Piece, dest: Square) {
        self.game.remove_piece(target.id);
        self.game.capture_count += 1;
        self.log(&format!("Captured enemy {}.", target.kind));
        self.host.on_event(&GameEvent::Captured {
            by: piece.kind,
            target: target.kind,
        });

        let chips = scoring::chips_for_capture(self.game, piece.kind, target.kind);
        self.score(chips, Some(dest));

        if piece.kind == PieceType::Knight && self.game.mods.knight_chain {
            self.game.actions_left += 1;
            self.log("Knight chain grants +1 action.");
        }

        let tyrant = self.game.mods.king_capture_actions;
        if piece.kind == PieceType::King && tyrant > 0 {
            self.game.actions_left += tyrant;
            self.log(&format!("Tyrant grants +{} actions.", tyrant));
        }

        if piece.kind == PieceType::Pawn && self.game.mods.has_flag(keys::PAWN_STORM) {
            // counted on the rank the pawn is leaving
            let same_rank = self
                .game
                .pieces_of(Side::Player)
                .filter(|p| p.kind == PieceType::Pawn && p.y == piece.y)
                .count();
            if same_rank >= 3 {
                self.game.actions_left += 1;
                self.log("Pawn Storm grants +1 action.");
            }
        }

        run_joker_hooks(self.game, Hook::Capture, Some(target));
    }

    fn win_round(&mut self) {
        let bonuses = scoring::finalize_round_score(self.game);
        for bonus in bonuses {
            self.host.on_event(&GameEvent::Score {
                chips: bonus.chips,
                source: bonus.source,
                square: bonus.square,
            });
        }
        let gold = shop::calculate_gold_earned(self.game);
        self.game.gold += gold.total();

        let summary = format!(
            "Round score: {} ({} chips x {} mult)",
            self.game.round_score, self.game.total_chips, self.game.total_mult
        );
        self.log_outcome(&summary);
        self.log_outcome(&format!(
            "Gold earned: +{}g (base {} + score {} + interest {})",
            gold.total(),
            gold.base,
            gold.score,
            gold.interest
        ));

        self.game.phase = RunPhase::Shop;
        self.game.shop_offer = shop::generate_shop_cards(self.game);
        self.host.show_shop();
        self.render();
    }

    fn lose_run(&mut self) {
        self.game.phase = RunPhase::RunLost;
        self.game.game_over = true;
        let round = self.game.round + 1;
        self.game
            .logger
            .minimal(&format!("Run lost on round {}, turn {}.", round, self.game.turn));
        self.host
            .show_game_over("Defeat", "You lost this run. Restart and try a different strategy.");
        self.render();
    }

    /// Let the enemy act up to `enemy_actions` times, each piece at most once
    pub fn enemy_phase(&mut self) {
        if self.game.freeze_enemy_phase {
            self.log("Cryo Pulse froze enemies for this phase.");
            self.game.freeze_enemy_phase = false;
            return;
        }

        let mut moved: Vec<PieceId> = Vec::new();
        let mut actions_taken = 0;
        for _ in 0..self.game.enemy_actions {
            let worst = self.game.mods.has_flag(keys::FORCE_WORST_MOVE);
            let Some((actor, mv, value)) = self.pick_enemy_action(&moved, worst) else {
                break;
            };
            if worst {
                self.game.mods.remove_flag(keys::FORCE_WORST_MOVE);
            }
            log_search!(
                self,
                "Enemy {} {} -> {} valued {:.2}",
                actor.kind,
                Square::new(actor.x, actor.y),
                Square::new(mv.x, mv.y),
                value
            );

            if let Some(target) = self.game.piece_at(mv.x, mv.y).copied() {
                if target.side == Side::Player {
                    self.game.remove_piece(target.id);
                    self.log(&format!("Enemy {} captured your {}.", actor.kind, target.kind));

                    if self.game.mods.has_flag(keys::BLOOD_SACRIFICE) {
                        scoring::add_mult(self.game, 0.5);
                        self.log("Blood Sacrifice: +0.5 mult.");
                    }
                    if self.game.mods.has_flag(keys::GAMBIT_ACCEPTED) {
                        self.game.queued_actions += 2;
                        self.log("Gambit Accepted: +2 actions next turn.");
                    }
                }
            }
            if let Some(p) = self.game.get_piece_mut(actor.id) {
                p.x = mv.x;
                p.y = mv.y;
            }
            self.game.last_move = Some((Square::new(actor.x, actor.y), Square::new(mv.x, mv.y)));
            moved.push(actor.id);
            actions_taken += 1;
        }

        let summary = format!(
            "Enemy phase: {} action{} ({}, AI depth {}).",
            actions_taken,
            if actions_taken == 1 { "" } else { "s" },
            self.game.ai_difficulty,
            self.game.ai_depth
        );
        self.log(&summary);
    }

    /// Best (or, with `worst`, the lowest-valued) actor and move for the next
    /// enemy action
    fn pick_enemy_action(&self, moved: &[PieceId], worst: bool) -> Option<(Piece, Move, f64)> {
        let rules = self.game.rules();
        let pieces = &self.game.pieces;
        let depth = self.game.ai_depth;

        let candidates: Vec<&Piece> = self
            .game
            .pieces_of(Side::Enemy)
            .filter(|p| !moved.contains(&p.id))
            .filter(|p| !rules.legal_moves_for(p, pieces).is_empty())
            .collect();
        if candidates.is_empty() {
            return None;
        }

        // the king joins the pool only while in check, or when nothing else can move
        let enemy_in_check = rules.is_king_in_check(Side::Enemy, pieces);
        let non_king: Vec<&Piece> = candidates
            .iter()
            .copied()
            .filter(|p| p.kind != PieceType::King)
            .collect();
        let pool = if !enemy_in_check && !non_king.is_empty() {
            non_king
        } else {
            candidates
        };

        let mut best: Option<(Piece, Move, f64)> = None;
        for actor in pool {
            let mv = if worst {
                choose_worst_enemy_move(&rules, actor, pieces, depth)
            } else {
                choose_enemy_move(&rules, actor, pieces, depth)
            };
            let Some(mv) = mv else {
                continue;
            };
            let value = score_enemy_move(&rules, actor, mv, pieces, depth);
            let better = match best {
                None => true,
                Some((_, _, v)) if worst => value < v,
                Some((_, _, v)) => value > v,
            };
            if better {
                best = Some((*actor, mv, value));
            }
        }
        best
    }

    /// Use the owned tarot at `index` during a player turn
    ///
    /// False if there is no tarot in that slot or the run is not waiting for
    /// a player move (shop, lost run).
    pub fn use_tarot(&mut self, index: usize) -> bool {
        if !self.game.phase.accepts_moves() || index >= self.game.owned_tarots.len() {
            return false;
        }
        let card: &'static CardDefinition = self.game.owned_tarots[index];
        if let Some(effect) = card.on_activate {
            apply_effect(self.game, effect, None);
            self.log(&format!("Used {}: {}", card.name, card.description));
        }
        self.game.owned_tarots.remove(index);
        self.render();
        true
    }

    fn require_shop(&self, action: &str) -> Result<()> {
        if self.game.phase != RunPhase::Shop {
            return Err(RogueError::InvalidAction(format!(
                "cannot {} outside the shop ({})",
                action, self.game.phase
            )));
        }
        Ok(())
    }

    /// Buy the card in offer slot `index`
    pub fn buy_offer(&mut self, index: usize) -> Result<&'static CardDefinition> {
        self.require_shop("buy")?;
        let card = shop::buy_offer(self.game, index)?;
        self.render();
        Ok(card)
    }

    /// Sell an owned joker by id, returning the refund
    pub fn sell_joker(&mut self, id: &str) -> Result<u32> {
        let refund = shop::sell_joker(self.game, id)?;
        self.render();
        Ok(refund)
    }

    pub fn reroll_shop(&mut self) -> Result<()> {
        self.require_shop("reroll")?;
        shop::reroll(self.game)?;
        self.render();
        Ok(())
    }

    /// Close the shop and start the next round
    pub fn leave_shop(&mut self) -> Result<()> {
        self.require_shop("leave")?;
        let next = self.game.round + 1;
        self.setup_round(next);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::card_by_id;
    use crate::game::host::RecordingHost;
    use crate::game::rounds::Objective;

    /// Empty 6x6 capture round with both kings placed
    fn staged(game: &mut GameState) {
        game.board_w = 6;
        game.board_h = 6;
        game.pieces.clear();
        game.objective = Objective::CaptureCount;
        game.target = 5;
        game.turn = 1;
        game.turn_limit = 20;
        game.capture_count = 0;
        game.ai_depth = 1;
        game.freeze_enemy_phase = false;
        game.phase = RunPhase::AwaitingPlayerInput;
        game.actions_left = 1;
        game.actions_taken_this_turn = 0;
        game.logger.enable_capture();
        game.spawn_piece(Side::Player, PieceType::King, 0, 5);
        game.spawn_piece(Side::Enemy, PieceType::King, 5, 0);
    }

    #[test]
    fn test_reset_run_sets_up_round_one() {
        let mut game = GameState::new(3);
        let mut host = RecordingHost::new();
        RunLoop::new(&mut game, &mut host).reset_run();

        assert_eq!(game.round, 0);
        assert_eq!((game.board_w, game.board_h), (6, 6));
        assert_eq!(game.actions_left, 1);
        assert_eq!(game.count_side(Side::Player), 7);
        assert_eq!(game.count_side(Side::Enemy), 5);
        assert_eq!(game.king(Side::Enemy).map(|k| k.y), Some(0));
        assert!(game.pieces_of(Side::Player).all(|p| p.y >= 4));
        assert!(game.pieces_of(Side::Enemy).all(|p| p.y <= 2));
        assert_eq!(
            host.lines[0],
            "Round 1 begins (Easy, AI depth 1). Objective: Capture 2 enemy pieces"
        );
        assert!(host.renders >= 1);
    }

    #[test]
    fn test_same_seed_same_layout() {
        let mut a = GameState::new(99);
        let mut b = GameState::new(99);
        RunLoop::new(&mut a, &mut RecordingHost::new()).reset_run();
        RunLoop::new(&mut b, &mut RecordingHost::new()).reset_run();
        assert_eq!(a.pieces, b.pieces);
    }

    #[test]
    fn test_veterans_roster() {
        let mut game = GameState::new(0);
        game.mods.add_flag(keys::VETERANS);
        game.mods.bump_counter(keys::EXTRA_PAWNS, 2);
        let mut host = RecordingHost::new();
        let run = RunLoop::new(&mut game, &mut host);
        let roster = run.player_roster();
        assert_eq!(roster.len(), 9);
        assert_eq!(roster[8], PieceType::Knight);
        assert_eq!(roster[7], PieceType::Bishop);
        assert_eq!(roster[6], PieceType::Pawn);
    }

    #[test]
    fn test_turn_start_bonuses() {
        let mut game = GameState::new(0);
        staged(&mut game);
        game.mods.add_flag(keys::OPENING_THEORY);
        game.mods.add_flag(keys::CASTLE_KEEP);
        game.mods.global_actions = 1;
        game.queued_actions = 2;
        game.spawn_piece(Side::Player, PieceType::Rook, 1, 4);
        let mut host = RecordingHost::new();
        let mut run = RunLoop::new(&mut game, &mut host);
        run.start_player_turn();
        // 1 + 1 global + 2 queued + 2 opening + 1 castle
        assert_eq!(run.game.actions_left, 7);
        assert_eq!(run.game.queued_actions, 0);
        assert!(host.lines.contains(&"Castle Keep grants +1 action.".to_string()));
    }

    #[test]
    fn test_overcharge_debt_floors_at_one() {
        let mut game = GameState::new(0);
        staged(&mut game);
        game.mods.set_counter(keys::OVERCHARGE_DEBT, 1);
        let mut host = RecordingHost::new();
        let mut run = RunLoop::new(&mut game, &mut host);
        run.start_player_turn();
        assert_eq!(run.game.actions_left, 1);
        assert_eq!(run.game.mods.counter(keys::OVERCHARGE_DEBT), 0);
    }

    #[test]
    fn test_declined_inputs_do_not_mutate() {
        let mut game = GameState::new(0);
        staged(&mut game);
        game.spawn_piece(Side::Enemy, PieceType::Pawn, 3, 1);
        let before = game.pieces.clone();
        let mut host = RecordingHost::new();
        let mut run = RunLoop::new(&mut game, &mut host);

        assert!(!run.submit_player_move("a1", "a1"));
        assert!(!run.submit_player_move("z9", "a2"));
        assert!(!run.submit_player_move("f8", "f7"));
        assert!(!run.submit_player_move("a1", "a5"));
        assert_eq!(run.game.pieces, before);
        assert_eq!(run.game.actions_left, 1);
        assert_eq!(host.renders, 4);
    }

    #[test]
    fn test_duplicate_submission_is_ignored() {
        let mut game = GameState::new(0);
        staged(&mut game);
        let mut host = RecordingHost::new();
        let mut run = RunLoop::new(&mut game, &mut host);
        let t0 = Instant::now();
        // a3 is the king's square; a1 is two rows away and illegal
        assert!(!run.submit_player_move_at("a3", "a1", t0));
        assert!(!run.submit_player_move_at("a3", "a1", t0 + Duration::from_millis(10)));
        assert!(!run.submit_player_move_at("a3", "a1", t0 + Duration::from_millis(400)));
        assert!(!run.submit_player_move_at("a3", "a3", t0 + Duration::from_millis(410)));
        let duplicates = run
            .game
            .logger
            .messages()
            .iter()
            .filter(|m| m.starts_with("Duplicate submission"))
            .count();
        assert_eq!(duplicates, 1);
        // every declined submission asks for a fresh render, duplicates included
        assert_eq!(host.renders, 4);
    }

    #[test]
    fn test_capture_scores_and_counts() {
        let mut game = GameState::new(0);
        staged(&mut game);
        game.actions_left = 2;
        game.spawn_piece(Side::Player, PieceType::Rook, 2, 5);
        game.spawn_piece(Side::Enemy, PieceType::Bishop, 2, 2);
        let mut host = RecordingHost::new();
        let mut run = RunLoop::new(&mut game, &mut host);
        assert!(run.submit_player_move("c3", "c6"));

        assert_eq!(game.capture_count, 1);
        assert_eq!(game.total_chips, 30);
        assert_eq!(game.actions_left, 1);
        assert_eq!(game.actions_taken_this_turn, 1);
        assert!(host.lines.contains(&"Captured enemy bishop.".to_string()));
        assert!(host.events.contains(&GameEvent::Captured {
            by: PieceType::Rook,
            target: PieceType::Bishop,
        }));
        assert_eq!(host.scored_chips(), 30);
    }

    #[test]
    fn test_check_awards_chips_and_wins_check_round() {
        let mut game = GameState::new(0);
        staged(&mut game);
        game.objective = Objective::Check;
        game.target = 1;
        game.spawn_piece(Side::Player, PieceType::Rook, 2, 5);
        let mut host = RecordingHost::new();
        let mut run = RunLoop::new(&mut game, &mut host);
        // rook to (2,0) checks the king on (5,0)
        assert!(run.submit_player_move("c3", "c8"));

        assert!(game.delivered_check);
        assert_eq!(game.phase, RunPhase::Shop);
        assert_eq!(game.total_chips, CHECK_CHIPS);
        assert_eq!(game.round_score, 40);
        assert_eq!(game.gold, 3);
        assert_eq!(game.shop_offer.len(), 3);
        assert_eq!(host.shops_shown, 1);
        assert!(host.events.contains(&GameEvent::Check));
        assert!(host.lines.contains(&"Round score: 40 (40 chips x 1 mult)".to_string()));
        assert!(host
            .lines
            .contains(&"Gold earned: +3g (base 3 + score 0 + interest 0)".to_string()));
    }

    #[test]
    fn test_battlefield_promotion() {
        let mut game = GameState::new(0);
        staged(&mut game);
        game.actions_left = 2;
        game.mods.add_flag(keys::BATTLEFIELD_PROMOTION);
        let pawn = game.spawn_piece(Side::Player, PieceType::Pawn, 1, 2);
        let mut host = RecordingHost::new();
        let mut run = RunLoop::new(&mut game, &mut host);
        assert!(run.submit_player_move("b6", "b7"));
        assert_eq!(game.get_piece(pawn).unwrap().kind, PieceType::Queen);
    }

    #[test]
    fn test_enemy_phase_freeze_skips_once() {
        let mut game = GameState::new(0);
        staged(&mut game);
        game.freeze_enemy_phase = true;
        game.spawn_piece(Side::Enemy, PieceType::Rook, 3, 0);
        let before = game.pieces.clone();
        let mut host = RecordingHost::new();
        let mut run = RunLoop::new(&mut game, &mut host);
        run.enemy_phase();
        assert_eq!(run.game.pieces, before);
        assert!(!run.game.freeze_enemy_phase);
        assert_eq!(host.lines, vec!["Cryo Pulse froze enemies for this phase."]);
    }

    #[test]
    fn test_enemy_capture_triggers_sacrifice_and_gambit() {
        let mut game = GameState::new(0);
        staged(&mut game);
        game.enemy_actions = 1;
        game.mods.add_flag(keys::BLOOD_SACRIFICE);
        game.mods.add_flag(keys::GAMBIT_ACCEPTED);
        game.spawn_piece(Side::Player, PieceType::Queen, 3, 3);
        game.spawn_piece(Side::Enemy, PieceType::Rook, 3, 0);
        let mut host = RecordingHost::new();
        let mut run = RunLoop::new(&mut game, &mut host);
        run.enemy_phase();

        assert!(game.pieces_of(Side::Player).all(|p| p.kind != PieceType::Queen));
        assert_eq!(game.total_mult, 1.5);
        assert_eq!(game.queued_actions, 2);
        assert!(host.lines.contains(&"Enemy rook captured your queen.".to_string()));
        assert_eq!(
            host.lines.last().unwrap(),
            "Enemy phase: 1 action (Easy, AI depth 1)."
        );
    }

    #[test]
    fn test_blunder_is_consumed_by_first_action() {
        let mut game = GameState::new(0);
        staged(&mut game);
        game.mods.add_flag(keys::FORCE_WORST_MOVE);
        game.spawn_piece(Side::Player, PieceType::Queen, 3, 3);
        game.spawn_piece(Side::Enemy, PieceType::Rook, 3, 0);
        let mut host = RecordingHost::new();
        let mut run = RunLoop::new(&mut game, &mut host);
        run.enemy_phase();
        assert!(!game.mods.has_flag(keys::FORCE_WORST_MOVE));
        // the queen survives a deliberately bad enemy move
        assert!(game.pieces_of(Side::Player).any(|p| p.kind == PieceType::Queen));
    }

    #[test]
    fn test_loss_on_turn_limit() {
        let mut game = GameState::new(0);
        staged(&mut game);
        game.turn_limit = 1;
        let mut host = RecordingHost::new();
        let mut run = RunLoop::new(&mut game, &mut host);
        assert!(run.submit_player_move("a3", "a4"));
        assert_eq!(game.phase, RunPhase::RunLost);
        assert!(game.game_over);
        assert_eq!(host.game_over.as_ref().map(|(t, _)| t.as_str()), Some("Defeat"));

        // terminal: further input is declined
        let mut host = RecordingHost::new();
        let mut run = RunLoop::new(&mut game, &mut host);
        assert!(!run.submit_player_move("a4", "a5"));
    }

    #[test]
    fn test_use_tarot() {
        let mut game = GameState::new(0);
        staged(&mut game);
        game.owned_tarots.push(card_by_id("time_walk").unwrap());
        game.actions_left = 0;
        let mut host = RecordingHost::new();
        let mut run = RunLoop::new(&mut game, &mut host);
        assert!(!run.use_tarot(3));
        assert!(run.use_tarot(0));
        assert_eq!(run.game.actions_left, 1);
        assert!(run.game.owned_tarots.is_empty());
        assert_eq!(host.lines, vec!["Used Time Walk: Refresh all actions this turn."]);
    }

    #[test]
    fn test_tarots_wait_for_a_player_turn() {
        let mut game = GameState::new(0);
        staged(&mut game);
        game.owned_tarots.push(card_by_id("overcharge").unwrap());
        game.phase = RunPhase::Shop;
        let mut host = RecordingHost::new();
        let mut run = RunLoop::new(&mut game, &mut host);
        assert!(!run.use_tarot(0));
        assert_eq!(run.game.owned_tarots.len(), 1);
        assert_eq!(run.game.mods.counter(keys::OVERCHARGE_DEBT), 0);
        assert_eq!(host.renders, 0);
    }

    #[test]
    fn test_enemy_king_stays_while_another_piece_can_move() {
        let mut game = GameState::new(0);
        staged(&mut game);
        let pawn = game.spawn_piece(Side::Enemy, PieceType::Pawn, 2, 1);
        let mut host = RecordingHost::new();
        RunLoop::new(&mut game, &mut host).enemy_phase();

        assert_eq!(game.king(Side::Enemy).map(|k| (k.x, k.y)), Some((5, 0)));
        assert!(game.get_piece(pawn).is_some_and(|p| p.y > 1));
    }

    #[test]
    fn test_enemy_king_in_check_joins_the_pool() {
        let mut game = GameState::new(0);
        staged(&mut game);
        // the knight can also take the checking rook; the king comes first in the pool
        let knight = game.spawn_piece(Side::Enemy, PieceType::Knight, 2, 1);
        game.spawn_piece(Side::Player, PieceType::Rook, 4, 0);
        let mut host = RecordingHost::new();
        RunLoop::new(&mut game, &mut host).enemy_phase();

        assert_eq!(game.king(Side::Enemy).map(|k| (k.x, k.y)), Some((4, 0)));
        assert_eq!(game.get_piece(knight).map(|p| (p.x, p.y)), Some((2, 1)));
        assert_eq!(game.count_side(Side::Player), 1);
        assert!(host.lines.contains(&"Enemy king captured your rook.".to_string()));
    }

    #[test]
    fn test_lone_enemy_king_moves_when_nothing_else_can() {
        let mut game = GameState::new(0);
        staged(&mut game);
        // the only other enemy piece is a pawn blocked head-on
        game.spawn_piece(Side::Enemy, PieceType::Pawn, 0, 1);
        game.spawn_piece(Side::Player, PieceType::Pawn, 0, 2);
        let mut host = RecordingHost::new();
        RunLoop::new(&mut game, &mut host).enemy_phase();

        assert_ne!(game.king(Side::Enemy).map(|k| (k.x, k.y)), Some((5, 0)));
    }

    #[test]
    fn test_shop_requires_shop_phase() {
        let mut game = GameState::new(0);
        staged(&mut game);
        game.gold = 50;
        let mut host = RecordingHost::new();
        let mut run = RunLoop::new(&mut game, &mut host);
        assert!(run.reroll_shop().is_err());
        assert!(run.leave_shop().is_err());
        assert_eq!(run.game.gold, 50);
    }

    #[test]
    fn test_leave_shop_sets_up_next_round() {
        let mut game = GameState::new(8);
        let mut host = RecordingHost::new();
        let mut run = RunLoop::new(&mut game, &mut host);
        run.reset_run();
        run.game.phase = RunPhase::Shop;
        run.leave_shop().unwrap();
        assert_eq!(game.round, 1);
        assert_eq!((game.board_w, game.board_h), (7, 7));
        assert_eq!(game.objective, Objective::Check);
        assert_eq!(game.phase, RunPhase::AwaitingPlayerInput);
    }

    #[test]
    fn test_boss_setup() {
        let mut game = GameState::new(4);
        let mut host = RecordingHost::new();
        let mut run = RunLoop::new(&mut game, &mut host);
        run.setup_round(5);
        assert_eq!(run.game.boss, Some(Boss::Mirror));
        assert!(run.game.mirror_mods);
        assert!(host.lines.contains(&"BOSS: The Mirror: Enemies copy your movement mods.".to_string()));

        let mut host = RecordingHost::new();
        let mut run = RunLoop::new(&mut game, &mut host);
        run.setup_round(8);
        // generated limit is 19, halved and rounded up
        assert_eq!(run.game.turn_limit, 10);

        run.setup_round(17);
        let king = *run.game.king(Side::Enemy).unwrap();
        let guards = run
            .game
            .pieces_of(Side::Enemy)
            .filter(|p| p.kind == PieceType::Rook && (p.x - king.x).abs() + (p.y - king.y).abs() == 1)
            .count();
        assert!(guards >= 1);
    }

    #[test]
    fn test_wall_boss_immunity_counts_down() {
        let mut game = GameState::new(4);
        let mut host = RecordingHost::new();
        let mut run = RunLoop::new(&mut game, &mut host);
        run.setup_round(20);
        assert_eq!(run.game.boss, Some(Boss::Wall));
        // set to 3, then the first turn start ticks it down
        assert_eq!(run.game.pawn_immune_turns, 2);
    }
}
