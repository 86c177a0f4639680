//! Outbound callbacks into the presentation layer
//!
//! The engine calls these at fixed points; hosts use them for feedback only
//! and never mutate engine state from inside a callback.

use crate::core::{PieceType, Square};
use serde::Serialize;

/// Discrete feedback events
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    /// A player piece captured an enemy piece
    Captured { by: PieceType, target: PieceType },
    Check,
    Checkmate,
    /// Chips were scored
    Score {
        chips: i64,
        source: String,
        square: Option<Square>,
    },
}

/// Host-side integration points; every method defaults to a no-op
pub trait GameHost {
    /// State changed and should be redrawn
    fn render(&mut self) {}

    /// Append a line to the run log
    fn log_line(&mut self, _message: &str) {}

    /// The round was won; the shop is open
    fn show_shop(&mut self) {}

    /// The run is over
    fn show_game_over(&mut self, _title: &str, _body: &str) {}

    fn on_event(&mut self, _event: &GameEvent) {}
}

/// Host that ignores everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullHost;

impl GameHost for NullHost {}

/// Host that records every callback, for tests and the CLI
#[derive(Debug, Default, Clone)]
pub struct RecordingHost {
    pub renders: usize,
    pub lines: Vec<String>,
    pub shops_shown: usize,
    pub game_over: Option<(String, String)>,
    pub events: Vec<GameEvent>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sum of chips across recorded score events
    pub fn scored_chips(&self) -> i64 {
        self.events
            .iter()
            .map(|e| match e {
                GameEvent::Score { chips, .. } => *chips,
                _ => 0,
            })
            .sum()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

impl GameHost for RecordingHost {
    fn render(&mut self) {
        self.renders += 1;
    }

    fn log_line(&mut self, message: &str) {
        self.lines.push(message.to_string());
    }

    fn show_shop(&mut self) {
        self.shops_shown += 1;
    }

    fn show_game_over(&mut self, title: &str, body: &str) {
        self.game_over = Some((title.to_string(), body.to_string()));
    }

    fn on_event(&mut self, event: &GameEvent) {
        self.events.push(event.clone());
    }
}
