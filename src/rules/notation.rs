//! Board-position string and canvas helpers for hosts

use crate::core::{Piece, Side, Square, CANVAS_SIZE};
use crate::rules::movegen::piece_at;

/// Encode the 8x8 canvas one row per rank (top row first), empty runs as
/// digits, uppercase for the player and lowercase for the enemy.
///
/// Squares outside the playable region are encoded like any empty square;
/// hosts get those from [`inactive_squares`].
pub fn board_string(pieces: &[Piece]) -> String {
    let mut rows = Vec::with_capacity(CANVAS_SIZE as usize);
    for y in 0..CANVAS_SIZE {
        let mut row = String::new();
        let mut empty = 0;
        for x in 0..CANVAS_SIZE {
            match piece_at(pieces, x, y) {
                None => empty += 1,
                Some(piece) => {
                    if empty > 0 {
                        row.push_str(&empty.to_string());
                        empty = 0;
                    }
                    let symbol = piece.kind.symbol();
                    row.push(match piece.side {
                        Side::Player => symbol.to_ascii_uppercase(),
                        Side::Enemy => symbol,
                    });
                }
            }
        }
        if empty > 0 {
            row.push_str(&empty.to_string());
        }
        rows.push(row);
    }
    rows.join("/")
}

/// Canvas squares outside a `width` x `height` playable region
pub fn inactive_squares(width: i32, height: i32) -> Vec<Square> {
    let mut out = Vec::new();
    for y in 0..CANVAS_SIZE {
        for x in 0..CANVAS_SIZE {
            if x >= width || y >= height {
                out.push(Square::new(x, y));
            }
        }
    }
    out
}
