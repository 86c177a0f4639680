//! Card catalog and effect resolution

pub mod catalog;
pub mod effects;

pub use catalog::{card_by_id, cards_by_category, cards_by_status, shop_pool, ALL_CARDS};
pub use effects::{apply_effect, rook_battery_count, run_joker_hooks, Hook};
