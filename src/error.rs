//! Error types for chess-rogue

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RogueError {
    #[error("Invalid square notation: {0}")]
    InvalidSquare(String),

    #[error("Piece not found: {0}")]
    PieceNotFound(u32),

    #[error("Not enough gold: need {needed}, have {available}")]
    InsufficientGold { needed: u32, available: u32 },

    #[error("Tarot slots full ({0} max)")]
    TarotSlotsFull(usize),

    #[error("Card not found: {0}")]
    CardNotFound(String),

    #[error("Invalid game action: {0}")]
    InvalidAction(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RogueError>;
