//! Effect handlers
//!
//! Resolves an [`Effect`] tag against the live game state. Every handler
//! no-ops when the pieces it needs are missing.

use crate::core::{CardDefinition, Effect, Piece, PieceId, PieceType, Side};
use crate::game::scoring;
use crate::game::GameState;
use crate::rules::movegen::ALL_DIRECTIONS;
use rand::Rng;

/// Joker lifecycle points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hook {
    RoundStart,
    TurnStart,
    Capture,
    Check,
    Score,
}

impl Hook {
    pub fn effect_of(self, card: &CardDefinition) -> Option<Effect> {
        match self {
            Hook::RoundStart => card.on_round_start,
            Hook::TurnStart => card.on_turn_start,
            Hook::Capture => card.on_capture,
            Hook::Check => card.on_check,
            Hook::Score => card.on_score,
        }
    }
}

/// Fire `hook` for every owned joker, in owned order
pub fn run_joker_hooks(game: &mut GameState, hook: Hook, captured: Option<&Piece>) {
    let effects: Vec<Effect> = game
        .owned_jokers
        .iter()
        .filter_map(|card| hook.effect_of(card))
        .collect();
    for effect in effects {
        apply_effect(game, effect, captured);
    }
}

/// Resolve one effect. `captured` is set only for capture hooks.
pub fn apply_effect(game: &mut GameState, effect: Effect, _captured: Option<&Piece>) {
    match effect {
        Effect::PawnSideStep => game.mods.pawn_side_step = true,
        Effect::PawnBackward => game.mods.pawn_backward = true,
        Effect::BishopGuardStep => game.mods.bishop_guard_step = true,
        Effect::BishopIgnoreBlock => game.mods.bishop_ignore_block = true,
        Effect::KnightChain => game.mods.knight_chain = true,
        Effect::KnightExtended => game.mods.knight_extended = true,
        Effect::RookDiagonal => game.mods.rook_diagonal = true,
        Effect::RookArtillery => game.mods.rook_artillery = true,
        Effect::GlobalAction => game.mods.global_actions += 1,
        Effect::PeriodicTempo => game.mods.periodic_tempo = true,
        Effect::CryoPulse => game.mods.cryo_pulse = true,
        Effect::KingRange(range) => game.mods.king_range = range,
        Effect::KingCaptureActions(n) => game.mods.king_capture_actions = n,
        Effect::QueenGold(n) => game.mods.queen_gold_gen += n,

        Effect::Flag(key) => game.mods.add_flag(key),
        Effect::AddCounter(key, n) => game.mods.bump_counter(key, n),
        Effect::SetCounter(key, n) => game.mods.set_counter(key, n),

        Effect::ShopCards(n) => game.shop_cards = n,
        Effect::TarotSlot => game.max_tarots += 1,

        Effect::EnPassant => en_passant(game),
        Effect::ForkLightning => fork_lightning(game),
        Effect::CastlingRush => castling_rush(game),
        Effect::PromotionDecree => {
            if let Some(pawn) = game
                .pieces
                .iter_mut()
                .find(|p| p.side == Side::Player && p.kind == PieceType::Pawn)
            {
                pawn.kind = PieceType::Queen;
            }
        }
        Effect::ShieldWall => game.freeze_enemy_phase = true,
        Effect::TimeWalk => game.actions_left = 1 + game.mods.global_actions,
        Effect::Retreat => retreat(game),
        Effect::KingsGambit => {
            if let Some(pawn) = first_of(game, Side::Player, PieceType::Pawn) {
                game.remove_piece(pawn);
                game.mods.king_range = game.mods.king_range.max(3);
            }
        }
        Effect::DoubleOrNothing => {
            game.total_chips *= 2;
            game.total_mult = (game.total_mult / 2.0).floor().max(1.0);
            scoring::refresh_round_score(game);
        }
        Effect::MirrorMatch => mirror_match(game),
        Effect::Consecration => consecration(game),
        Effect::Rally => rally(game),
        Effect::Overcharge => {
            game.actions_left += 3;
            game.mods.set_counter(crate::core::keys::OVERCHARGE_DEBT, 1);
        }
        Effect::Earthquake => earthquake(game),

        Effect::DesperadoActions => {
            if game.count_side(Side::Player) <= 3 {
                game.actions_left += 2;
                game.logger.verbose("Desperado grants +2 actions.");
            }
        }
        Effect::RookBattery => {
            let batteries = rook_battery_count(&game.pieces);
            if batteries > 0 {
                scoring::add_mult(game, 0.3 * batteries as f64);
            }
        }

        Effect::Noop => {}
    }
}

fn first_of(game: &GameState, side: Side, kind: PieceType) -> Option<PieceId> {
    game.pieces
        .iter()
        .find(|p| p.side == side && p.kind == kind)
        .map(|p| p.id)
}

/// Player pawn lands behind the first enemy pawn, which is captured. The
/// landing square must be on the board and free.
fn en_passant(game: &mut GameState) {
    let (Some(pawn_id), Some(victim)) = (
        first_of(game, Side::Player, PieceType::Pawn),
        game.pieces
            .iter()
            .find(|p| p.side == Side::Enemy && p.kind == PieceType::Pawn)
            .copied(),
    ) else {
        return;
    };
    let (tx, ty) = (victim.x, victim.y + 1);
    if !game.in_bounds(tx, ty) {
        return;
    }
    if let Some(occupant) = game.piece_at(tx, ty) {
        if occupant.id != pawn_id {
            return;
        }
    }
    game.remove_piece(victim.id);
    if let Some(pawn) = game.get_piece_mut(pawn_id) {
        pawn.x = tx;
        pawn.y = ty;
    }
    game.capture_count += 1;
}

const KNIGHT_JUMPS: [(i32, i32); 8] = [(1, 2), (2, 1), (-1, 2), (-2, 1), (1, -2), (2, -1), (-1, -2), (-2, -1)];

fn fork_lightning(game: &mut GameState) {
    let Some(knight) = game
        .pieces
        .iter()
        .find(|p| p.side == Side::Player && p.kind == PieceType::Knight)
        .copied()
    else {
        return;
    };
    let targets: Vec<PieceId> = KNIGHT_JUMPS
        .iter()
        .filter_map(|(dx, dy)| {
            game.piece_at(knight.x + dx, knight.y + dy)
                .filter(|p| p.side == Side::Enemy)
                .map(|p| p.id)
        })
        .collect();
    for id in &targets {
        game.remove_piece(*id);
    }
    game.capture_count += targets.len() as u32;
}

fn castling_rush(game: &mut GameState) {
    let king = first_of(game, Side::Player, PieceType::King);
    let rook = first_of(game, Side::Player, PieceType::Rook);
    let (Some(king), Some(rook)) = (king, rook) else {
        return;
    };
    let (Some(k), Some(r)) = (game.get_piece(king).copied(), game.get_piece(rook).copied()) else {
        return;
    };
    if let Some(p) = game.get_piece_mut(king) {
        p.x = r.x;
        p.y = r.y;
    }
    if let Some(p) = game.get_piece_mut(rook) {
        p.x = k.x;
        p.y = k.y;
    }
}

/// First non-king player piece returns to the back rank: same file if free,
/// else the first free back-rank square. +1 action only if it moved.
fn retreat(game: &mut GameState) {
    let Some(piece) = game
        .pieces
        .iter()
        .find(|p| p.side == Side::Player && p.kind != PieceType::King)
        .copied()
    else {
        return;
    };
    let back = game.board_h - 1;
    if piece.y == back {
        return;
    }
    let landing = if game.is_empty(piece.x, back) {
        Some(piece.x)
    } else {
        (0..game.board_w).find(|&x| game.is_empty(x, back))
    };
    let Some(x) = landing else {
        return;
    };
    if let Some(p) = game.get_piece_mut(piece.id) {
        p.x = x;
        p.y = back;
    }
    game.actions_left += 1;
}

const CLONE_ORDER: [PieceType; 5] = [
    PieceType::Queen,
    PieceType::Rook,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Pawn,
];

/// Clone the strongest non-king player piece onto the first free neighbor
fn mirror_match(game: &mut GameState) {
    let Some(best) = CLONE_ORDER.iter().find_map(|kind| {
        game.pieces
            .iter()
            .find(|p| p.side == Side::Player && p.kind == *kind)
            .copied()
    }) else {
        return;
    };
    for dy in -1..=1 {
        for dx in -1..=1 {
            let (nx, ny) = (best.x + dx, best.y + dy);
            if game.in_bounds(nx, ny) && game.is_empty(nx, ny) {
                game.spawn_piece(Side::Player, best.kind, nx, ny);
                return;
            }
        }
    }
}

fn consecration(game: &mut GameState) {
    let bishops: Vec<Piece> = game
        .pieces_of(Side::Player)
        .filter(|p| p.kind == PieceType::Bishop)
        .copied()
        .collect();
    let mut doomed: Vec<PieceId> = Vec::new();
    for bishop in &bishops {
        for (dx, dy) in ALL_DIRECTIONS {
            if let Some(enemy) = game
                .piece_at(bishop.x + dx, bishop.y + dy)
                .filter(|p| p.side == Side::Enemy)
            {
                if !doomed.contains(&enemy.id) {
                    doomed.push(enemy.id);
                }
            }
        }
    }
    for id in &doomed {
        game.remove_piece(*id);
    }
    game.capture_count += doomed.len() as u32;
}

/// Every player pawn steps one square toward y = 0 if that square is free,
/// in position order
fn rally(game: &mut GameState) {
    let pawns: Vec<PieceId> = game
        .pieces_of(Side::Player)
        .filter(|p| p.kind == PieceType::Pawn)
        .map(|p| p.id)
        .collect();
    for id in pawns {
        let Some(pawn) = game.get_piece(id).copied() else {
            continue;
        };
        let ny = pawn.y - 1;
        if ny >= 0 && game.is_empty(pawn.x, ny) {
            if let Some(p) = game.get_piece_mut(id) {
                p.y = ny;
            }
        }
    }
}

/// Each non-king enemy shifts one square in a random direction when the
/// destination is on the board and free
fn earthquake(game: &mut GameState) {
    let movers: Vec<PieceId> = game
        .pieces_of(Side::Enemy)
        .filter(|p| p.kind != PieceType::King)
        .map(|p| p.id)
        .collect();
    for id in movers {
        let (dx, dy) = ALL_DIRECTIONS[game.rng.gen_range(0..ALL_DIRECTIONS.len())];
        let Some(piece) = game.get_piece(id).copied() else {
            continue;
        };
        let (nx, ny) = (piece.x + dx, piece.y + dy);
        if game.in_bounds(nx, ny) && game.is_empty(nx, ny) {
            if let Some(p) = game.get_piece_mut(id) {
                p.x = nx;
                p.y = ny;
            }
        }
    }
}

/// Player rooks sharing a file or rank with another player rook
pub fn rook_battery_count(pieces: &[Piece]) -> usize {
    let rooks: Vec<&Piece> = pieces
        .iter()
        .filter(|p| p.side == Side::Player && p.kind == PieceType::Rook)
        .collect();
    rooks
        .iter()
        .filter(|r| rooks.iter().any(|o| o.id != r.id && (o.x == r.x || o.y == r.y)))
        .count()
}
