//! Card definitions
//!
//! Cards are immutable static data. Behavior is attached as [`Effect`] tags
//! rather than closures; `cards::effects` resolves a tag against the live game
//! state. Ownership is tracked by the game state holding `&'static` references
//! or ids into the catalog.

use crate::core::PieceType;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardCategory {
    /// Persistent passive effect
    Joker,
    /// One-shot consumable
    Tarot,
    /// Permanent piece-type-wide upgrade
    Planet,
    /// Permanent meta/economic rule
    Voucher,
}

impl fmt::Display for CardCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CardCategory::Joker => "joker",
            CardCategory::Tarot => "tarot",
            CardCategory::Planet => "planet",
            CardCategory::Voucher => "voucher",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardRarity {
    Common,
    Uncommon,
    Rare,
    Legendary,
}

impl CardRarity {
    pub const ALL: [CardRarity; 4] = [
        CardRarity::Common,
        CardRarity::Uncommon,
        CardRarity::Rare,
        CardRarity::Legendary,
    ];

    /// Relative draw weight in the shop
    pub fn shop_weight(self) -> u32 {
        match self {
            CardRarity::Common => 60,
            CardRarity::Uncommon => 25,
            CardRarity::Rare => 12,
            CardRarity::Legendary => 3,
        }
    }
}

/// Implementation status; only `Cut` keeps a card out of the shop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardStatus {
    Implemented,
    Designed,
    Concept,
    Cut,
}

/// Effect kinds a card hook can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    // Typed rule changes
    PawnSideStep,
    PawnBackward,
    BishopGuardStep,
    BishopIgnoreBlock,
    KnightChain,
    KnightExtended,
    RookDiagonal,
    RookArtillery,
    GlobalAction,
    PeriodicTempo,
    CryoPulse,
    KingRange(i32),
    KingCaptureActions(i32),
    QueenGold(i32),

    // Sparse modifier state
    Flag(&'static str),
    AddCounter(&'static str, i32),
    SetCounter(&'static str, i32),

    // Economy / inventory
    ShopCards(usize),
    TarotSlot,

    // Consumables
    EnPassant,
    ForkLightning,
    CastlingRush,
    PromotionDecree,
    ShieldWall,
    TimeWalk,
    Retreat,
    KingsGambit,
    DoubleOrNothing,
    MirrorMatch,
    Consecration,
    Rally,
    Overcharge,
    Earthquake,

    // Event hooks
    DesperadoActions,
    RookBattery,

    /// Placeholder for concept cards with no playable rule yet
    Noop,
}

/// Catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CardDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub flavor_text: Option<&'static str>,
    pub category: CardCategory,
    pub rarity: CardRarity,
    pub cost: u32,
    pub piece_type: Option<PieceType>,
    pub tags: &'static [&'static str],
    pub status: CardStatus,
    #[serde(skip)]
    pub apply: Option<Effect>,
    #[serde(skip)]
    pub on_activate: Option<Effect>,
    #[serde(skip)]
    pub on_capture: Option<Effect>,
    #[serde(skip)]
    pub on_check: Option<Effect>,
    #[serde(skip)]
    pub on_round_start: Option<Effect>,
    #[serde(skip)]
    pub on_turn_start: Option<Effect>,
    #[serde(skip)]
    pub on_score: Option<Effect>,
}

impl CardDefinition {
    /// Start a catalog entry; defaults to common, 0 cost, implemented
    pub const fn new(
        id: &'static str,
        name: &'static str,
        description: &'static str,
        category: CardCategory,
    ) -> Self {
        CardDefinition {
            id,
            name,
            description,
            flavor_text: None,
            category,
            rarity: CardRarity::Common,
            cost: 0,
            piece_type: None,
            tags: &[],
            status: CardStatus::Implemented,
            apply: None,
            on_activate: None,
            on_capture: None,
            on_check: None,
            on_round_start: None,
            on_turn_start: None,
            on_score: None,
        }
    }

    pub const fn flavor(mut self, text: &'static str) -> Self {
        self.flavor_text = Some(text);
        self
    }

    pub const fn rarity(mut self, rarity: CardRarity) -> Self {
        self.rarity = rarity;
        self
    }

    pub const fn cost(mut self, cost: u32) -> Self {
        self.cost = cost;
        self
    }

    pub const fn piece(mut self, piece: PieceType) -> Self {
        self.piece_type = Some(piece);
        self
    }

    pub const fn tags(mut self, tags: &'static [&'static str]) -> Self {
        self.tags = tags;
        self
    }

    pub const fn status(mut self, status: CardStatus) -> Self {
        self.status = status;
        self
    }

    pub const fn on_apply(mut self, effect: Effect) -> Self {
        self.apply = Some(effect);
        self
    }

    pub const fn on_activate(mut self, effect: Effect) -> Self {
        self.on_activate = Some(effect);
        self
    }

    pub const fn on_capture(mut self, effect: Effect) -> Self {
        self.on_capture = Some(effect);
        self
    }

    pub const fn on_check(mut self, effect: Effect) -> Self {
        self.on_check = Some(effect);
        self
    }

    pub const fn on_round_start(mut self, effect: Effect) -> Self {
        self.on_round_start = Some(effect);
        self
    }

    pub const fn on_turn_start(mut self, effect: Effect) -> Self {
        self.on_turn_start = Some(effect);
        self
    }

    pub const fn on_score(mut self, effect: Effect) -> Self {
        self.on_score = Some(effect);
        self
    }

    pub fn is_consumable(&self) -> bool {
        self.category == CardCategory::Tarot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: CardDefinition = CardDefinition::new("sample", "Sample", "Does things.", CardCategory::Joker)
        .rarity(CardRarity::Rare)
        .cost(7)
        .piece(PieceType::Rook)
        .tags(&["test"])
        .on_apply(Effect::RookDiagonal);

    #[test]
    fn test_builder_fields() {
        assert_eq!(SAMPLE.rarity, CardRarity::Rare);
        assert_eq!(SAMPLE.cost, 7);
        assert_eq!(SAMPLE.piece_type, Some(PieceType::Rook));
        assert_eq!(SAMPLE.apply, Some(Effect::RookDiagonal));
        assert_eq!(SAMPLE.status, CardStatus::Implemented);
        assert!(SAMPLE.on_activate.is_none());
        assert!(!SAMPLE.is_consumable());
    }

    #[test]
    fn test_rarity_weights_sum() {
        let total: u32 = CardRarity::ALL.iter().map(|r| r.shop_weight()).sum();
        assert_eq!(total, 100);
    }
}
