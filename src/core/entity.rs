//! Piece identity with simple integer IDs

use serde::{Deserialize, Serialize};
use std::fmt;

/// Simple integer ID for pieces
///
/// IDs are unique within a run: the generator lives on the game state and is
/// never rewound, so a clone summoned mid-round never collides with a piece
/// spawned at round setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PieceId(u32);

impl PieceId {
    pub fn new(id: u32) -> Self {
        PieceId(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonic ID allocator
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdGen {
    next_id: u32,
}

impl IdGen {
    pub fn new() -> Self {
        IdGen { next_id: 0 }
    }

    /// Generate a new unique PieceId
    pub fn next_id(&mut self) -> PieceId {
        let id = PieceId::new(self.next_id);
        self.next_id += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_gen() {
        let mut ids = IdGen::new();
        let id1 = ids.next_id();
        let id2 = ids.next_id();

        assert_eq!(id1.as_u32(), 0);
        assert_eq!(id2.as_u32(), 1);
        assert_ne!(id1, id2);
        assert_eq!(format!("{id2}"), "1");
    }
}
