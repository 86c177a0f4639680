//! Core game types: pieces, squares, modifiers, card definitions

pub mod card;
pub mod entity;
pub mod mods;
pub mod piece;
pub mod square;

pub use card::{CardCategory, CardDefinition, CardRarity, CardStatus, Effect};
pub use entity::{IdGen, PieceId};
pub use mods::{keys, Mods};
pub use piece::{Move, Piece, PieceType, Side};
pub use square::{Square, CANVAS_SIZE};
