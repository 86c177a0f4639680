//! Run-persistent rule modifiers
//!
//! Well-known permanent rule changes get typed fields. Card-specific state that
//! doesn't warrant a field lives in two sparse collections: a set of opaque
//! string flags and a string -> integer counter map. Every key recognized by
//! the engine is listed in [`keys`] next to the card that sets it.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

/// Flag and counter keys understood by the engine
pub mod keys {
    // --- flags ---

    /// `battlefield_promotion`: player pawns entering the top two rows become queens
    pub const BATTLEFIELD_PROMOTION: &str = "battlefield_promotion";
    /// `bishop_pair_synergy`: recorded only, no move-generation effect
    pub const BISHOP_PAIR_SYNERGY: &str = "bishop_pair_synergy";
    /// `castle_keep`: +1 action at turn start when a rook touches the king
    pub const CASTLE_KEEP: &str = "castle_keep";
    /// `pawn_storm`: pawn capture with 3+ pawns on the rank grants +1 action
    pub const PAWN_STORM: &str = "pawn_storm";
    /// `scholars_mate`: x1.5 mult at finalization if check was delivered
    pub const SCHOLARS_MATE: &str = "scholars_mate";
    /// `material_advantage`: +5 chips per net piece advantage at finalization
    pub const MATERIAL_ADVANTAGE: &str = "material_advantage";
    /// `endgame_specialist`: +2 range for player sliders when < 5 pieces remain
    pub const ENDGAME_SPECIALIST: &str = "endgame_specialist";
    /// `opening_theory`: +2 actions on turn 1
    pub const OPENING_THEORY: &str = "opening_theory";
    /// `blood_sacrifice`: +0.5 mult whenever the enemy captures a player piece
    pub const BLOOD_SACRIFICE: &str = "blood_sacrifice";
    /// `blitz_tactics`: capture chips doubled on the first action of a turn
    pub const BLITZ_TACTICS: &str = "blitz_tactics";
    /// `fortress_mentality`: flat +20 chips at finalization
    pub const FORTRESS_MENTALITY: &str = "fortress_mentality";
    /// `cavalry_charge`: knight captures earn +20 chips
    pub const CAVALRY_CHARGE: &str = "cavalry_charge";
    /// `gambit_accepted`: +2 queued actions whenever the enemy captures a player piece
    pub const GAMBIT_ACCEPTED: &str = "gambit_accepted";
    /// `voucher_war_chest`: interest on held gold
    pub const WAR_CHEST: &str = "war_chest";
    /// `voucher_diplomat`: reroll cost never increases
    pub const DIPLOMAT: &str = "diplomat";
    /// `voucher_veterans`: the last two roster pawns become knight + bishop
    pub const VETERANS: &str = "veterans";
    /// `blunder`: the next enemy phase opens with its worst move
    pub const FORCE_WORST_MOVE: &str = "force_worst_move";

    // --- counters ---

    /// `voucher_reserves`: extra roster pawns (stacks +1)
    pub const EXTRA_PIECES: &str = "extra_pieces";
    /// `voucher_conscription`: extra roster pawns (stacks +2)
    pub const EXTRA_PAWNS: &str = "extra_pawns";
    /// `voucher_discount`: flat discount on shop prices (stacks +1)
    pub const SHOP_DISCOUNT: &str = "shop_discount";
    /// `overcharge`: actions removed from the next turn start
    pub const OVERCHARGE_DEBT: &str = "overcharge_debt";
    /// `scouts_report`: turns during which fog hides nothing
    pub const SCOUTS_REVEAL: &str = "scouts_reveal";
}

/// Modifier bag, reset only on run restart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mods {
    pub pawn_side_step: bool,
    pub pawn_backward: bool,
    pub bishop_guard_step: bool,
    pub bishop_ignore_block: bool,
    pub knight_chain: bool,
    pub knight_extended: bool,
    pub rook_diagonal: bool,
    pub rook_artillery: bool,
    pub global_actions: i32,
    pub periodic_tempo: bool,
    pub cryo_pulse: bool,
    /// Player king step range; 1 is a normal king
    pub king_range: i32,
    pub king_capture_actions: i32,
    pub queen_gold_gen: i32,
    pub flags: FxHashSet<String>,
    pub counters: FxHashMap<String, i32>,
}

impl Mods {
    pub fn new() -> Self {
        Mods {
            pawn_side_step: false,
            pawn_backward: false,
            bishop_guard_step: false,
            bishop_ignore_block: false,
            knight_chain: false,
            knight_extended: false,
            rook_diagonal: false,
            rook_artillery: false,
            global_actions: 0,
            periodic_tempo: false,
            cryo_pulse: false,
            king_range: 1,
            king_capture_actions: 0,
            queen_gold_gen: 0,
            flags: FxHashSet::default(),
            counters: FxHashMap::default(),
        }
    }

    pub fn has_flag(&self, key: &str) -> bool {
        self.flags.contains(key)
    }

    pub fn add_flag(&mut self, key: &str) {
        self.flags.insert(key.to_string());
    }

    /// Returns true if the flag was present
    pub fn remove_flag(&mut self, key: &str) -> bool {
        self.flags.remove(key)
    }

    /// Counter value, 0 when absent
    pub fn counter(&self, key: &str) -> i32 {
        self.counters.get(key).copied().unwrap_or(0)
    }

    pub fn set_counter(&mut self, key: &str, value: i32) {
        self.counters.insert(key.to_string(), value);
    }

    /// Add to a counter, creating it at 0 first
    pub fn bump_counter(&mut self, key: &str, delta: i32) {
        *self.counters.entry(key.to_string()).or_insert(0) += delta;
    }

    pub fn clear_counter(&mut self, key: &str) {
        self.counters.remove(key);
    }
}

impl Default for Mods {
    fn default() -> Self {
        Self::new()
    }
}
