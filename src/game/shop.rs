//! Shop offers, purchases, and gold

use crate::cards::{apply_effect, shop_pool};
use crate::core::{keys, CardCategory, CardDefinition, CardRarity};
use crate::game::GameState;
use crate::{Result, RogueError};
use rand::seq::SliceRandom;
use rand::Rng;
use rustc_hash::FxHashSet;
use serde::Serialize;

/// Base gold paid out every round
pub const BASE_ROUND_GOLD: u32 = 3;
/// War Chest interest cap
pub const MAX_INTEREST: u32 = 5;

/// Gold payout for a finished round, broken down for the log line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GoldBreakdown {
    pub base: u32,
    pub score: u32,
    pub interest: u32,
    pub queen: u32,
}

impl GoldBreakdown {
    pub fn total(&self) -> u32 {
        self.base + self.score + self.interest + self.queen
    }
}

/// Gold for the round just won, computed before it is added to the purse
pub fn calculate_gold_earned(game: &GameState) -> GoldBreakdown {
    let interest = if game.mods.has_flag(keys::WAR_CHEST) {
        (game.gold / 5).min(MAX_INTEREST)
    } else {
        0
    };
    GoldBreakdown {
        base: BASE_ROUND_GOLD,
        score: (game.round_score.max(0) / 100) as u32,
        interest,
        queen: game.mods.queen_gold_gen.max(0) as u32,
    }
}

fn roll_rarity<R: Rng>(rng: &mut R) -> CardRarity {
    let total: u32 = CardRarity::ALL.iter().map(|r| r.shop_weight()).sum();
    let mut roll = rng.gen_range(0..total);
    for rarity in CardRarity::ALL {
        if roll < rarity.shop_weight() {
            return rarity;
        }
        roll -= rarity.shop_weight();
    }
    CardRarity::Common
}

/// Draw a fresh offer of `shop_cards` distinct cards
///
/// Each slot rolls a rarity first and falls back to any remaining card when
/// that rarity is exhausted.
pub fn generate_shop_cards(game: &mut GameState) -> Vec<&'static CardDefinition> {
    let owned = game.owned_ids();
    let owned: FxHashSet<&str> = owned.into_iter().collect();
    let mut pool = shop_pool(&owned);
    let mut offer = Vec::with_capacity(game.shop_cards);

    while offer.len() < game.shop_cards && !pool.is_empty() {
        let rarity = roll_rarity(&mut game.rng);
        let of_rarity: Vec<usize> = (0..pool.len()).filter(|&i| pool[i].rarity == rarity).collect();
        let index = match of_rarity.choose(&mut game.rng) {
            Some(&i) => i,
            None => game.rng.gen_range(0..pool.len()),
        };
        offer.push(pool.swap_remove(index));
    }
    offer
}

/// Listed cost minus the accumulated discount, never below zero
pub fn card_cost(game: &GameState, card: &CardDefinition) -> u32 {
    let discount = game.mods.counter(keys::SHOP_DISCOUNT).max(0) as u32;
    card.cost.saturating_sub(discount)
}

pub fn can_afford(game: &GameState, card: &CardDefinition) -> bool {
    game.gold >= card_cost(game, card)
}

/// Pay for `card` and take ownership of it
pub fn buy_card(game: &mut GameState, card: &'static CardDefinition) -> Result<()> {
    let cost = card_cost(game, card);
    if game.gold < cost {
        return Err(RogueError::InsufficientGold {
            needed: cost,
            available: game.gold,
        });
    }
    if card.category == CardCategory::Tarot && game.owned_tarots.len() >= game.max_tarots {
        return Err(RogueError::TarotSlotsFull(game.max_tarots));
    }

    game.gold -= cost;
    match card.category {
        CardCategory::Joker => {
            game.owned_jokers.push(card);
            game.upgrades.push(card.id);
        }
        CardCategory::Tarot => game.owned_tarots.push(card),
        CardCategory::Planet => {
            game.owned_planets.push(card.id);
            game.upgrades.push(card.id);
        }
        CardCategory::Voucher => {
            game.owned_vouchers.push(card.id);
            game.upgrades.push(card.id);
        }
    }
    if let Some(effect) = card.apply {
        apply_effect(game, effect, None);
    }
    game.logger
        .normal(&format!("Purchased {} for {}g.", card.name, cost));
    Ok(())
}

/// Buy the card at `index` of the current offer; it leaves the offer
pub fn buy_offer(game: &mut GameState, index: usize) -> Result<&'static CardDefinition> {
    let card = *game
        .shop_offer
        .get(index)
        .ok_or_else(|| RogueError::CardNotFound(format!("offer slot {}", index)))?;
    buy_card(game, card)?;
    game.shop_offer.remove(index);
    Ok(card)
}

/// Sell the first owned joker with `id` for half its listed cost
///
/// Its applied rule change stays in effect.
pub fn sell_joker(game: &mut GameState, id: &str) -> Result<u32> {
    let index = game
        .owned_jokers
        .iter()
        .position(|c| c.id == id)
        .ok_or_else(|| RogueError::CardNotFound(id.to_string()))?;
    let card = game.owned_jokers.remove(index);
    let refund = card.cost / 2;
    game.gold += refund;
    game.logger
        .normal(&format!("Sold {} for {}g.", card.name, refund));
    Ok(refund)
}

/// Pay the reroll cost and draw a new offer
pub fn reroll(game: &mut GameState) -> Result<()> {
    if game.gold < game.reroll_cost {
        return Err(RogueError::InsufficientGold {
            needed: game.reroll_cost,
            available: game.gold,
        });
    }
    game.gold -= game.reroll_cost;
    if !game.mods.has_flag(keys::DIPLOMAT) {
        game.reroll_cost += 1;
    }
    game.shop_offer = generate_shop_cards(game);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::card_by_id;

    fn card(id: &str) -> &'static CardDefinition {
        card_by_id(id).unwrap()
    }

    #[test]
    fn test_gold_breakdown() {
        let mut game = GameState::new(0);
        game.round_score = 250;
        game.gold = 27;
        assert_eq!(calculate_gold_earned(&game).total(), 5);

        game.mods.add_flag(keys::WAR_CHEST);
        game.mods.queen_gold_gen = 1;
        let gold = calculate_gold_earned(&game);
        assert_eq!(gold.interest, 5);
        assert_eq!(gold.total(), 11);

        game.gold = 9;
        assert_eq!(calculate_gold_earned(&game).interest, 1);
    }

    #[test]
    fn test_discount_floors_at_zero() {
        let mut game = GameState::new(0);
        game.mods.set_counter(keys::SHOP_DISCOUNT, 5);
        assert_eq!(card_cost(&game, card("opening_theory")), 0);
        assert_eq!(card_cost(&game, card("time_walk")), 5);
    }

    #[test]
    fn test_buy_joker_applies_effect() {
        let mut game = GameState::new(0);
        game.gold = 10;
        buy_card(&mut game, card("pawn_side_step")).unwrap();
        assert_eq!(game.gold, 6);
        assert!(game.mods.pawn_side_step);
        assert!(game.owns_joker("pawn_side_step"));
        assert!(game.upgrades.contains(&"pawn_side_step"));
    }

    #[test]
    fn test_buy_without_gold_changes_nothing() {
        let mut game = GameState::new(0);
        game.gold = 3;
        let err = buy_card(&mut game, card("knight_chain")).unwrap_err();
        assert!(matches!(err, RogueError::InsufficientGold { needed: 5, available: 3 }));
        assert_eq!(game.gold, 3);
        assert!(!game.mods.knight_chain);
    }

    #[test]
    fn test_tarot_slot_checked_before_payment() {
        let mut game = GameState::new(0);
        game.gold = 100;
        for _ in 0..3 {
            buy_card(&mut game, card("rally")).unwrap();
        }
        assert_eq!(game.gold, 91);
        let err = buy_card(&mut game, card("rally")).unwrap_err();
        assert!(matches!(err, RogueError::TarotSlotsFull(3)));
        assert_eq!(game.gold, 91);
        assert_eq!(game.owned_tarots.len(), 3);
    }

    #[test]
    fn test_armory_adds_slot() {
        let mut game = GameState::new(0);
        game.gold = 100;
        buy_card(&mut game, card("voucher_armory")).unwrap();
        assert_eq!(game.max_tarots, 4);
        assert_eq!(game.owned_vouchers, vec!["voucher_armory"]);
    }

    #[test]
    fn test_sell_refunds_half_and_keeps_effect() {
        let mut game = GameState::new(0);
        game.gold = 10;
        buy_card(&mut game, card("knight_chain")).unwrap();
        assert_eq!(game.gold, 5);
        let refund = sell_joker(&mut game, "knight_chain").unwrap();
        assert_eq!(refund, 2);
        assert_eq!(game.gold, 7);
        assert!(game.owned_jokers.is_empty());
        assert!(game.mods.knight_chain);
        assert!(sell_joker(&mut game, "knight_chain").is_err());
    }

    #[test]
    fn test_offer_is_distinct_and_unowned() {
        let mut game = GameState::new(42);
        game.gold = 100;
        buy_card(&mut game, card("pawn_side_step")).unwrap();
        for _ in 0..20 {
            let offer = generate_shop_cards(&mut game);
            assert_eq!(offer.len(), 3);
            let ids: FxHashSet<&str> = offer.iter().map(|c| c.id).collect();
            assert_eq!(ids.len(), 3);
            assert!(!ids.contains("pawn_side_step"));
        }
    }

    #[test]
    fn test_reroll_cost_and_diplomat() {
        let mut game = GameState::new(1);
        game.gold = 20;
        reroll(&mut game).unwrap();
        assert_eq!(game.gold, 17);
        assert_eq!(game.reroll_cost, 4);
        assert_eq!(game.shop_offer.len(), 3);

        game.mods.add_flag(keys::DIPLOMAT);
        reroll(&mut game).unwrap();
        assert_eq!(game.gold, 13);
        assert_eq!(game.reroll_cost, 4);

        game.gold = 2;
        assert!(reroll(&mut game).is_err());
        assert_eq!(game.gold, 2);
    }

    #[test]
    fn test_buy_offer_removes_slot() {
        let mut game = GameState::new(5);
        game.gold = 100;
        game.shop_offer = vec![card("rally"), card("retreat")];
        let bought = buy_offer(&mut game, 1).unwrap();
        assert_eq!(bought.id, "retreat");
        assert_eq!(game.shop_offer.len(), 1);
        assert!(buy_offer(&mut game, 4).is_err());
    }
}
