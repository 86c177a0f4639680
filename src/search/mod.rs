//! Enemy decision making: static evaluation and alpha-beta minimax

pub mod evaluator;
pub mod minimax;

pub use evaluator::{evaluate_position, material_balance, MATE_SCORE};
pub use minimax::{
    choose_enemy_move, choose_worst_enemy_move, minimax, pick_greedy_move, score_enemy_move, search_value,
};
