//! The static card catalog
//!
//! Append-only. Entries are plain data; behavior is carried by [`Effect`]
//! tags and resolved in `cards::effects`.

use crate::core::{keys, CardCategory, CardDefinition, CardStatus, Effect, PieceType};
use rustc_hash::FxHashSet;

use crate::core::CardCategory::{Joker, Planet, Tarot, Voucher};
use crate::core::CardRarity::{Legendary, Rare, Uncommon};

pub static ALL_CARDS: &[CardDefinition] = &[
    // --- Jokers ---
    CardDefinition::new(
        "pawn_side_step",
        "Pawns: Side Step",
        "Pawns can move one tile sideways and capture sideways.",
        Joker,
    )
    .cost(4)
    .piece(PieceType::Pawn)
    .tags(&["movement", "pawn", "original"])
    .on_apply(Effect::PawnSideStep),
    CardDefinition::new(
        "bishop_guard",
        "Bishops: Guard Step",
        "Bishops can also move one tile orthogonally.",
        Joker,
    )
    .cost(4)
    .piece(PieceType::Bishop)
    .tags(&["movement", "bishop", "original"])
    .on_apply(Effect::BishopGuardStep),
    CardDefinition::new(
        "knight_chain",
        "Knights: Chain Capture",
        "Knight captures grant +1 action this turn.",
        Joker,
    )
    .rarity(Uncommon)
    .cost(5)
    .piece(PieceType::Knight)
    .tags(&["action", "knight", "capture", "original"])
    .on_apply(Effect::KnightChain),
    CardDefinition::new(
        "rook_diagonal",
        "Rooks: Diagonal Jets",
        "Rooks gain diagonal movement up to 2 squares.",
        Joker,
    )
    .rarity(Uncommon)
    .cost(5)
    .piece(PieceType::Rook)
    .tags(&["movement", "rook", "original"])
    .on_apply(Effect::RookDiagonal),
    CardDefinition::new(
        "double_command",
        "Global: Double Command",
        "You get +1 action every player turn.",
        Joker,
    )
    .rarity(Rare)
    .cost(7)
    .tags(&["action", "global", "original"])
    .on_apply(Effect::GlobalAction),
    CardDefinition::new(
        "tempo_cycle",
        "Global: Tempo Cycle",
        "Every 3rd player turn, gain +1 action.",
        Joker,
    )
    .cost(4)
    .tags(&["action", "global", "tempo", "original"])
    .on_apply(Effect::PeriodicTempo),
    CardDefinition::new(
        "cryo_pulse",
        "Power: Cryo Pulse",
        "At round start, freeze enemies for one enemy phase.",
        Joker,
    )
    .rarity(Uncommon)
    .cost(5)
    .tags(&["power", "freeze", "original"])
    .on_apply(Effect::CryoPulse),
    CardDefinition::new(
        "royal_reach",
        "Kings: Royal Reach",
        "King can move up to 2 squares in any direction.",
        Joker,
    )
    .rarity(Uncommon)
    .cost(5)
    .piece(PieceType::King)
    .tags(&["movement", "king", "original"])
    .on_apply(Effect::KingRange(2)),
    CardDefinition::new(
        "battlefield_promotion",
        "Battlefield Promotion",
        "Pawns reaching the last 2 rows promote to Queens.",
        Joker,
    )
    .flavor("Rise through the ranks.")
    .rarity(Rare)
    .cost(7)
    .piece(PieceType::Pawn)
    .tags(&["promotion", "pawn", "powerful"])
    .on_apply(Effect::Flag(keys::BATTLEFIELD_PROMOTION)),
    CardDefinition::new(
        "bishop_pair_synergy",
        "Bishop Pair Synergy",
        "When you have 2+ bishops, all bishops gain +2 diagonal range.",
        Joker,
    )
    .flavor("Two heads of the church.")
    .rarity(Uncommon)
    .cost(5)
    .piece(PieceType::Bishop)
    .tags(&["synergy", "bishop", "conditional"])
    .on_apply(Effect::Flag(keys::BISHOP_PAIR_SYNERGY)),
    CardDefinition::new(
        "castle_keep",
        "Castle Keep",
        "Rook adjacent to King grants +1 action per turn.",
        Joker,
    )
    .flavor("The throne's faithful guardian.")
    .rarity(Uncommon)
    .cost(5)
    .piece(PieceType::Rook)
    .tags(&["action", "rook", "king", "positional"])
    .on_apply(Effect::Flag(keys::CASTLE_KEEP)),
    CardDefinition::new(
        "pawn_storm",
        "Pawn Storm",
        "3+ pawns on the same rank all get +1 action when moving.",
        Joker,
    )
    .flavor("March together, fight together.")
    .rarity(Rare)
    .cost(6)
    .piece(PieceType::Pawn)
    .tags(&["synergy", "pawn", "positional"])
    .on_apply(Effect::Flag(keys::PAWN_STORM)),
    CardDefinition::new("scholars_mate", "Scholar's Mate", "Delivering check gives x1.5 mult.", Joker)
        .flavor("The ancient technique.")
        .rarity(Uncommon)
        .cost(5)
        .tags(&["scoring", "check", "mult"])
        .on_apply(Effect::Flag(keys::SCHOLARS_MATE)),
    CardDefinition::new(
        "material_advantage",
        "Material Advantage",
        "+5 chips per piece count advantage over enemy.",
        Joker,
    )
    .flavor("Numbers don't lie.")
    .cost(4)
    .tags(&["scoring", "chips", "material"])
    .on_apply(Effect::Flag(keys::MATERIAL_ADVANTAGE)),
    CardDefinition::new(
        "endgame_specialist",
        "Endgame Specialist",
        "When fewer than 5 total pieces remain, all yours get +2 movement range.",
        Joker,
    )
    .flavor("Mastery in the final moments.")
    .rarity(Rare)
    .cost(7)
    .tags(&["movement", "endgame", "conditional"])
    .on_apply(Effect::Flag(keys::ENDGAME_SPECIALIST)),
    CardDefinition::new(
        "queens_guard",
        "Queen's Guard",
        "Queen can't be captured if King is not in check.",
        Joker,
    )
    .flavor("Shielded by royal decree.")
    .rarity(Rare)
    .cost(8)
    .piece(PieceType::Queen)
    .tags(&["defense", "queen", "king"])
    .status(CardStatus::Designed)
    .on_apply(Effect::Flag("queens_guard")),
    CardDefinition::new(
        "grandmasters_eye",
        "Grandmaster's Eye",
        "See the enemy's next planned move.",
        Joker,
    )
    .flavor("Three moves ahead.")
    .rarity(Legendary)
    .cost(12)
    .tags(&["information", "legendary", "ai"])
    .status(CardStatus::Designed)
    .on_apply(Effect::Flag("grandmasters_eye")),
    CardDefinition::new(
        "opening_theory",
        "Opening Theory",
        "+2 actions on your first turn each round.",
        Joker,
    )
    .flavor("A strong opening sets the pace.")
    .cost(3)
    .tags(&["action", "tempo", "opening"])
    .on_apply(Effect::Flag(keys::OPENING_THEORY)),
    CardDefinition::new(
        "blood_sacrifice",
        "Blood Sacrifice",
        "Losing a piece grants x0.5 mult bonus.",
        Joker,
    )
    .flavor("Every loss fuels the flame.")
    .rarity(Uncommon)
    .cost(5)
    .tags(&["scoring", "mult", "sacrifice"])
    .on_apply(Effect::Flag(keys::BLOOD_SACRIFICE)),
    CardDefinition::new(
        "blitz_tactics",
        "Blitz Tactics",
        "Captures made on the first action of a turn earn double chips.",
        Joker,
    )
    .flavor("Strike first, strike hard.")
    .cost(4)
    .tags(&["scoring", "chips", "tempo"])
    .on_apply(Effect::Flag(keys::BLITZ_TACTICS)),
    CardDefinition::new(
        "fortress_mentality",
        "Fortress Mentality",
        "If your king hasn't moved this round, +20 chips per turn.",
        Joker,
    )
    .flavor("Stand your ground.")
    .cost(3)
    .piece(PieceType::King)
    .tags(&["scoring", "chips", "defensive", "king"])
    .on_apply(Effect::Flag(keys::FORTRESS_MENTALITY)),
    CardDefinition::new(
        "cavalry_charge",
        "Cavalry Charge",
        "Knight captures deal +20 bonus chips.",
        Joker,
    )
    .flavor("The thundering hooves.")
    .cost(4)
    .piece(PieceType::Knight)
    .tags(&["scoring", "chips", "knight", "capture"])
    .on_apply(Effect::Flag(keys::CAVALRY_CHARGE)),
    CardDefinition::new(
        "rook_battery",
        "Rook Battery",
        "Two rooks on the same file/rank grant x0.3 mult each.",
        Joker,
    )
    .flavor("Doubled and dangerous.")
    .rarity(Uncommon)
    .cost(5)
    .piece(PieceType::Rook)
    .tags(&["scoring", "mult", "rook", "synergy"])
    .status(CardStatus::Designed)
    .on_apply(Effect::Flag("rook_battery"))
    .on_score(Effect::RookBattery),
    CardDefinition::new(
        "gambit_accepted",
        "Gambit Accepted",
        "When you lose a piece, gain +2 actions next turn.",
        Joker,
    )
    .flavor("A calculated loss.")
    .rarity(Rare)
    .cost(6)
    .tags(&["action", "sacrifice", "gambit"])
    .on_apply(Effect::Flag(keys::GAMBIT_ACCEPTED)),
    // --- Tarots ---
    CardDefinition::new(
        "en_passant",
        "En Passant",
        "Teleport a pawn behind any enemy pawn and capture it.",
        Tarot,
    )
    .flavor("The sneakiest rule.")
    .rarity(Uncommon)
    .cost(4)
    .piece(PieceType::Pawn)
    .tags(&["movement", "capture", "pawn"])
    .status(CardStatus::Designed)
    .on_activate(Effect::EnPassant),
    CardDefinition::new(
        "fork_lightning",
        "Fork Lightning",
        "Your knight attacks all adjacent enemies simultaneously.",
        Tarot,
    )
    .flavor("Zeus smiles upon the cavalry.")
    .rarity(Rare)
    .cost(6)
    .piece(PieceType::Knight)
    .tags(&["capture", "knight", "aoe"])
    .status(CardStatus::Designed)
    .on_activate(Effect::ForkLightning),
    CardDefinition::new(
        "castling_rush",
        "Castling Rush",
        "Swap King and Rook positions instantly.",
        Tarot,
    )
    .flavor("A royal relocation.")
    .rarity(Uncommon)
    .cost(4)
    .tags(&["movement", "king", "rook", "positional"])
    .status(CardStatus::Designed)
    .on_activate(Effect::CastlingRush),
    CardDefinition::new(
        "promotion_decree",
        "Promotion Decree",
        "Upgrade any pawn to a queen immediately.",
        Tarot,
    )
    .flavor("By royal decree!")
    .rarity(Rare)
    .cost(6)
    .piece(PieceType::Pawn)
    .tags(&["promotion", "pawn", "powerful"])
    .on_activate(Effect::PromotionDecree),
    CardDefinition::new(
        "shield_wall",
        "Shield Wall",
        "All your pieces are immune for 1 enemy phase.",
        Tarot,
    )
    .flavor("Hold the line!")
    .rarity(Rare)
    .cost(7)
    .tags(&["defense", "immunity"])
    .on_activate(Effect::ShieldWall),
    CardDefinition::new("time_walk", "Time Walk", "Refresh all actions this turn.", Tarot)
        .flavor("Time bends to your will.")
        .rarity(Legendary)
        .cost(10)
        .tags(&["action", "powerful", "legendary"])
        .on_activate(Effect::TimeWalk),
    CardDefinition::new(
        "retreat",
        "Retreat",
        "Return any piece to the back rank, gain +1 action.",
        Tarot,
    )
    .flavor("A tactical withdrawal.")
    .cost(3)
    .tags(&["movement", "action", "safety"])
    .on_activate(Effect::Retreat),
    CardDefinition::new(
        "blunder",
        "Blunder",
        "Force the enemy to make their worst possible move.",
        Tarot,
    )
    .flavor("Everyone makes mistakes.")
    .rarity(Uncommon)
    .cost(5)
    .tags(&["ai", "disruption", "enemy"])
    .status(CardStatus::Designed)
    .on_activate(Effect::Flag(keys::FORCE_WORST_MOVE)),
    CardDefinition::new(
        "kings_gambit",
        "King's Gambit",
        "Sacrifice a pawn to give your king +3 action range this turn.",
        Tarot,
    )
    .flavor("The oldest trick in the book.")
    .rarity(Uncommon)
    .cost(4)
    .tags(&["sacrifice", "king", "pawn", "movement"])
    .on_activate(Effect::KingsGambit),
    CardDefinition::new(
        "scouts_report",
        "Scout's Report",
        "Reveal all enemy pieces for 3 turns (in fog rounds).",
        Tarot,
    )
    .flavor("Knowledge is power.")
    .cost(3)
    .tags(&["information", "fog", "reveal"])
    .status(CardStatus::Designed)
    .on_activate(Effect::SetCounter(keys::SCOUTS_REVEAL, 3)),
    CardDefinition::new(
        "double_or_nothing",
        "Double or Nothing",
        "Double your current chips, but halve your mult.",
        Tarot,
    )
    .flavor("Feeling lucky?")
    .rarity(Rare)
    .cost(5)
    .tags(&["scoring", "gamble", "chips", "mult"])
    .on_activate(Effect::DoubleOrNothing),
    CardDefinition::new("mirror_match", "Mirror Match", "Clone your strongest non-king piece.", Tarot)
        .flavor("Seeing double.")
        .rarity(Rare)
        .cost(7)
        .tags(&["summon", "clone", "powerful"])
        .status(CardStatus::Designed)
        .on_activate(Effect::MirrorMatch),
    CardDefinition::new(
        "consecration",
        "Consecration",
        "All enemy pieces adjacent to your bishops take damage (are captured).",
        Tarot,
    )
    .flavor("Holy ground.")
    .rarity(Legendary)
    .cost(10)
    .piece(PieceType::Bishop)
    .tags(&["capture", "bishop", "aoe", "legendary"])
    .status(CardStatus::Designed)
    .on_activate(Effect::Consecration),
    CardDefinition::new("rally", "Rally", "All pawns advance one square forward.", Tarot)
        .flavor("Forward, march!")
        .cost(3)
        .piece(PieceType::Pawn)
        .tags(&["movement", "pawn", "mass"])
        .on_activate(Effect::Rally),
    CardDefinition::new(
        "overcharge",
        "Overcharge",
        "Gain +3 actions this turn, but lose 1 action next turn.",
        Tarot,
    )
    .flavor("Burn bright, burn fast.")
    .rarity(Uncommon)
    .cost(4)
    .tags(&["action", "tempo", "tradeoff"])
    .on_activate(Effect::Overcharge),
    // --- Planets ---
    CardDefinition::new("planet_pawn", "Guerrilla", "Pawns can move backward 1 square.", Planet)
        .flavor("Retreat is just another advance.")
        .rarity(Uncommon)
        .cost(6)
        .piece(PieceType::Pawn)
        .tags(&["movement", "pawn", "permanent"])
        .on_apply(Effect::PawnBackward),
    CardDefinition::new("planet_knight", "Cavalry", "Knights also move in 3-1 L-shapes.", Planet)
        .flavor("Extended reach of the horse.")
        .rarity(Uncommon)
        .cost(6)
        .piece(PieceType::Knight)
        .tags(&["movement", "knight", "permanent"])
        .on_apply(Effect::KnightExtended),
    CardDefinition::new(
        "planet_bishop",
        "Inquisition",
        "Bishops ignore the first blocking piece in their path.",
        Planet,
    )
    .flavor("Nothing stands in the way of faith.")
    .rarity(Rare)
    .cost(7)
    .piece(PieceType::Bishop)
    .tags(&["movement", "bishop", "permanent"])
    .on_apply(Effect::BishopIgnoreBlock),
    CardDefinition::new(
        "planet_rook",
        "Artillery",
        "Rooks can capture 2 squares past their movement endpoint.",
        Planet,
    )
    .flavor("Long-range bombardment.")
    .rarity(Rare)
    .cost(7)
    .piece(PieceType::Rook)
    .tags(&["capture", "rook", "permanent"])
    .on_apply(Effect::RookArtillery),
    CardDefinition::new("planet_queen", "Sovereignty", "Queen generates +1 gold per round.", Planet)
        .flavor("The crown's treasury.")
        .rarity(Uncommon)
        .cost(6)
        .piece(PieceType::Queen)
        .tags(&["economy", "queen", "permanent"])
        .on_apply(Effect::QueenGold(1)),
    CardDefinition::new("planet_king", "Tyrant", "King captures grant +3 actions.", Planet)
        .flavor("The tyrant takes what he wants.")
        .rarity(Rare)
        .cost(8)
        .piece(PieceType::King)
        .tags(&["action", "king", "permanent", "capture"])
        .on_apply(Effect::KingCaptureActions(3)),
    // --- Vouchers ---
    CardDefinition::new("voucher_reserves", "Expanded Reserves", "+1 starting piece per round.", Voucher)
        .flavor("Reinforcements have arrived.")
        .rarity(Uncommon)
        .cost(6)
        .tags(&["meta", "pieces", "spawning"])
        .on_apply(Effect::AddCounter(keys::EXTRA_PIECES, 1)),
    CardDefinition::new(
        "voucher_war_chest",
        "War Chest",
        "Earn interest on held gold (1g per 5g held, max 5).",
        Voucher,
    )
    .flavor("Money makes money.")
    .rarity(Rare)
    .cost(8)
    .tags(&["economy", "gold", "interest"])
    .on_apply(Effect::Flag(keys::WAR_CHEST)),
    CardDefinition::new(
        "voucher_conscription",
        "Conscription",
        "Start each round with 2 extra pawns.",
        Voucher,
    )
    .flavor("Every citizen serves.")
    .cost(4)
    .piece(PieceType::Pawn)
    .tags(&["meta", "pawn", "spawning"])
    .on_apply(Effect::AddCounter(keys::EXTRA_PAWNS, 2)),
    CardDefinition::new(
        "voucher_intelligence",
        "Intelligence Network",
        "See 4 shop cards instead of 3.",
        Voucher,
    )
    .flavor("Eyes and ears everywhere.")
    .rarity(Uncommon)
    .cost(5)
    .tags(&["meta", "shop"])
    .on_apply(Effect::ShopCards(4)),
    CardDefinition::new("voucher_diplomat", "Diplomat", "Reroll cost stays fixed at 3g.", Voucher)
        .flavor("Friends in high places.")
        .rarity(Uncommon)
        .cost(5)
        .tags(&["meta", "shop", "reroll"])
        .on_apply(Effect::Flag(keys::DIPLOMAT)),
    CardDefinition::new("voucher_armory", "Armory", "+1 consumable (tarot) slot.", Voucher)
        .flavor("A well-stocked arsenal.")
        .rarity(Uncommon)
        .cost(5)
        .tags(&["meta", "tarot", "slots"])
        .on_apply(Effect::TarotSlot),
    CardDefinition::new("voucher_discount", "Clearance Sale", "All shop cards cost 1g less.", Voucher)
        .flavor("Everything must go!")
        .cost(4)
        .tags(&["meta", "shop", "economy"])
        .on_apply(Effect::AddCounter(keys::SHOP_DISCOUNT, 1)),
    CardDefinition::new(
        "voucher_veterans",
        "Veterans",
        "Start each round with a knight and a bishop instead of 2 pawns.",
        Voucher,
    )
    .flavor("Experienced soldiers make the difference.")
    .rarity(Rare)
    .cost(7)
    .tags(&["meta", "spawning", "upgrade"])
    .status(CardStatus::Designed)
    .on_apply(Effect::Flag(keys::VETERANS)),
    // --- Additional roster ---
    CardDefinition::new(
        "zugzwang",
        "Zugzwang",
        "If you pass your turn (no captures), gain x0.5 mult.",
        Joker,
    )
    .flavor("Sometimes the best move is no move.")
    .rarity(Uncommon)
    .cost(5)
    .tags(&["scoring", "mult", "strategy"])
    .status(CardStatus::Designed)
    .on_apply(Effect::Flag("zugzwang")),
    CardDefinition::new(
        "fianchetto",
        "Fianchetto",
        "Bishops on the long diagonal gain +15 chips per capture.",
        Joker,
    )
    .flavor("Control the diagonal highway.")
    .cost(4)
    .piece(PieceType::Bishop)
    .tags(&["scoring", "chips", "bishop", "positional"])
    .status(CardStatus::Designed)
    .on_apply(Effect::Flag("fianchetto")),
    CardDefinition::new(
        "desperado",
        "Desperado",
        "When you have only 3 or fewer pieces, gain +2 actions per turn.",
        Joker,
    )
    .flavor("Nothing left to lose.")
    .rarity(Rare)
    .cost(7)
    .tags(&["action", "endgame", "conditional"])
    .status(CardStatus::Designed)
    .on_apply(Effect::Flag("desperado"))
    .on_turn_start(Effect::DesperadoActions),
    CardDefinition::new(
        "poisoned_pawn",
        "Poisoned Pawn",
        "Enemy pieces that capture your pawns lose their next move.",
        Joker,
    )
    .flavor("A trap disguised as weakness.")
    .rarity(Uncommon)
    .cost(5)
    .piece(PieceType::Pawn)
    .tags(&["defense", "pawn", "trap"])
    .status(CardStatus::Concept)
    .on_apply(Effect::Flag("poisoned_pawn")),
    CardDefinition::new("windmill", "Windmill", "Discovered checks earn triple chips.", Joker)
        .flavor("The eternal machine.")
        .rarity(Rare)
        .cost(7)
        .tags(&["scoring", "chips", "check", "tactic"])
        .status(CardStatus::Concept)
        .on_apply(Effect::Flag("windmill")),
    CardDefinition::new("holy_water", "Holy Water", "Heal one captured piece back onto the board.", Tarot)
        .flavor("Rise again.")
        .rarity(Rare)
        .cost(6)
        .tags(&["summon", "recovery"])
        .status(CardStatus::Concept)
        .on_activate(Effect::Noop),
    CardDefinition::new(
        "earthquake",
        "Earthquake",
        "Randomly move all enemy pieces 1 square in a random direction.",
        Tarot,
    )
    .flavor("The ground trembles.")
    .rarity(Uncommon)
    .cost(5)
    .tags(&["disruption", "aoe", "random"])
    .status(CardStatus::Concept)
    .on_activate(Effect::Earthquake),
    CardDefinition::new(
        "checkmate_scholar",
        "Checkmate in One",
        "If the enemy king has only one legal move, capture it instantly.",
        Tarot,
    )
    .flavor("Inevitable.")
    .rarity(Legendary)
    .cost(12)
    .tags(&["capture", "king", "powerful", "legendary"])
    .status(CardStatus::Concept)
    .on_activate(Effect::Noop),
];

/// Look up a card by id
pub fn card_by_id(id: &str) -> Option<&'static CardDefinition> {
    ALL_CARDS.iter().find(|c| c.id == id)
}

pub fn cards_by_category(category: CardCategory) -> Vec<&'static CardDefinition> {
    ALL_CARDS.iter().filter(|c| c.category == category).collect()
}

pub fn cards_by_status(status: CardStatus) -> Vec<&'static CardDefinition> {
    ALL_CARDS.iter().filter(|c| c.status == status).collect()
}

/// Cards eligible for the shop: anything not cut and not already owned
pub fn shop_pool(owned_ids: &FxHashSet<&str>) -> Vec<&'static CardDefinition> {
    ALL_CARDS
        .iter()
        .filter(|c| c.status != CardStatus::Cut && !owned_ids.contains(c.id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_size_and_categories() {
        assert_eq!(ALL_CARDS.len(), 61);
        assert_eq!(cards_by_category(Joker).len(), 29);
        assert_eq!(cards_by_category(Tarot).len(), 18);
        assert_eq!(cards_by_category(Planet).len(), 6);
        assert_eq!(cards_by_category(Voucher).len(), 8);
    }

    #[test]
    fn test_ids_are_unique() {
        let ids: FxHashSet<&str> = ALL_CARDS.iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), ALL_CARDS.len());
    }

    #[test]
    fn test_every_card_has_a_hook() {
        for card in ALL_CARDS {
            if card.is_consumable() {
                assert!(card.on_activate.is_some(), "{} has no activation", card.id);
            } else {
                assert!(card.apply.is_some(), "{} has no apply", card.id);
            }
        }
    }

    #[test]
    fn test_lookup() {
        let card = card_by_id("planet_king").unwrap();
        assert_eq!(card.name, "Tyrant");
        assert_eq!(card.apply, Some(Effect::KingCaptureActions(3)));
        assert!(card_by_id("no_such_card").is_none());
    }

    #[test]
    fn test_status_buckets() {
        assert_eq!(cards_by_status(CardStatus::Concept).len(), 5);
        assert!(cards_by_status(CardStatus::Cut).is_empty());
    }

    #[test]
    fn test_shop_pool_excludes_owned() {
        let mut owned = FxHashSet::default();
        assert_eq!(shop_pool(&owned).len(), ALL_CARDS.len());
        owned.insert("pawn_side_step");
        owned.insert("voucher_armory");
        let pool = shop_pool(&owned);
        assert_eq!(pool.len(), ALL_CARDS.len() - 2);
        assert!(pool.iter().all(|c| c.id != "pawn_side_step"));
    }
}
