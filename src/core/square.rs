//! Board coordinates and board-address notation
//!
//! The host addresses squares on a fixed 8x8 canvas with a file letter and a
//! rank digit ("e2"). Rank 8 is the top row of the canvas (y = 0), so the
//! player, who advances toward y = 0, marches up the ranks.

use crate::{Result, RogueError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Width/height of the notation canvas
pub const CANVAS_SIZE: i32 = 8;

const FILES: &[u8; 8] = b"abcdefgh";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Square {
    pub x: i32,
    pub y: i32,
}

impl Square {
    pub fn new(x: i32, y: i32) -> Self {
        Square { x, y }
    }

    /// Parse "e2"-style notation
    pub fn parse(key: &str) -> Result<Self> {
        let bytes = key.trim().as_bytes();
        if bytes.len() != 2 {
            return Err(RogueError::InvalidSquare(key.to_string()));
        }
        let x = FILES
            .iter()
            .position(|&f| f == bytes[0].to_ascii_lowercase())
            .ok_or_else(|| RogueError::InvalidSquare(key.to_string()))?;
        let rank = match bytes[1] {
            b'1'..=b'8' => (bytes[1] - b'0') as i32,
            _ => return Err(RogueError::InvalidSquare(key.to_string())),
        };
        Ok(Square {
            x: x as i32,
            y: CANVAS_SIZE - rank,
        })
    }

    /// Render as "e2"-style notation; only meaningful on the 8x8 canvas
    pub fn to_key(&self) -> String {
        let file = FILES
            .get(self.x as usize)
            .map(|&b| b as char)
            .unwrap_or('?');
        format!("{}{}", file, CANVAS_SIZE - self.y)
    }

    pub fn on_canvas(&self) -> bool {
        (0..CANVAS_SIZE).contains(&self.x) && (0..CANVAS_SIZE).contains(&self.y)
    }
}

impl FromStr for Square {
    type Err = RogueError;

    fn from_str(s: &str) -> Result<Self> {
        Square::parse(s)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_key())
    }
}
