//! Run phases

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the run state machine currently sits
///
/// `AwaitingPlayerInput -> (move) -> AwaitingPlayerInput | Shop | RunLost`,
/// `Shop -> (leave) -> AwaitingPlayerInput`. `RunLost` is terminal until the
/// run is reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunPhase {
    #[default]
    AwaitingPlayerInput,
    Shop,
    RunLost,
}

impl RunPhase {
    pub fn accepts_moves(self) -> bool {
        self == RunPhase::AwaitingPlayerInput
    }

    pub fn is_terminal(self) -> bool {
        self == RunPhase::RunLost
    }
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RunPhase::AwaitingPlayerInput => "awaiting input",
            RunPhase::Shop => "shop",
            RunPhase::RunLost => "run lost",
        };
        f.write_str(s)
    }
}
