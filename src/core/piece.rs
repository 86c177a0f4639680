//! Pieces, sides, and moves

use crate::core::PieceId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which army a piece belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }

    /// Row delta for a pawn step; the player advances toward y = 0
    pub fn forward(self) -> i32 {
        match self {
            Side::Player => -1,
            Side::Enemy => 1,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Player => write!(f, "player"),
            Side::Enemy => write!(f, "enemy"),
        }
    }
}

/// The six standard chess roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceType {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceType {
    /// Material value used by the search evaluator
    pub fn material_value(self) -> i32 {
        match self {
            PieceType::Pawn => 1,
            PieceType::Knight | PieceType::Bishop => 3,
            PieceType::Rook => 5,
            PieceType::Queen => 9,
            PieceType::King => 1000,
        }
    }

    /// Base chips awarded when the player captures this piece
    pub fn capture_chips(self) -> i64 {
        match self {
            PieceType::Pawn => 10,
            PieceType::Knight | PieceType::Bishop => 30,
            PieceType::Rook => 50,
            PieceType::Queen => 90,
            PieceType::King => 200,
        }
    }

    /// Lowercase board-string symbol (knight is `n` so it never clashes with king)
    pub fn symbol(self) -> char {
        match self {
            PieceType::Pawn => 'p',
            PieceType::Knight => 'n',
            PieceType::Bishop => 'b',
            PieceType::Rook => 'r',
            PieceType::Queen => 'q',
            PieceType::King => 'k',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PieceType::Pawn => "pawn",
            PieceType::Knight => "knight",
            PieceType::Bishop => "bishop",
            PieceType::Rook => "rook",
            PieceType::Queen => "queen",
            PieceType::King => "king",
        }
    }
}

impl fmt::Display for PieceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A piece on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub id: PieceId,
    pub side: Side,
    pub kind: PieceType,
    pub x: i32,
    pub y: i32,
}

impl Piece {
    pub fn new(id: PieceId, side: Side, kind: PieceType, x: i32, y: i32) -> Self {
        Piece { id, side, kind, x, y }
    }

    pub fn is_at(&self, x: i32, y: i32) -> bool {
        self.x == x && self.y == y
    }
}

/// A candidate destination for a specific piece in a specific position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub x: i32,
    pub y: i32,
    pub capture: bool,
}

impl Move {
    pub fn quiet(x: i32, y: i32) -> Self {
        Move { x, y, capture: false }
    }

    pub fn capture(x: i32, y: i32) -> Self {
        Move { x, y, capture: true }
    }
}
