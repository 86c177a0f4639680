//! Board geometry, legality, and notation

pub mod legality;
pub mod movegen;
pub mod notation;

pub use movegen::{apply_move_on, king_for_side, piece_at, MoveList, Rules};
pub use notation::{board_string, inactive_squares};
