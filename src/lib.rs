//! Chess Rogue - roguelike chess engine
//!
//! Move rules with card-driven modifiers, a legality filter, a minimax enemy,
//! and the round/shop run structure around them. Rendering is left to hosts
//! via [`game::GameHost`].

pub mod cards;
pub mod core;
pub mod error;
pub mod game;
pub mod rules;
pub mod search;
pub mod simulate;

pub use error::{Result, RogueError};
