//! Run state, turn structure, economy, and player controllers

pub mod autopilot;
pub mod controller;
pub mod flow;
pub mod heuristic_controller;
pub mod host;
pub mod logger;
pub mod objectives;
pub mod phase;
pub mod random_controller;
pub mod rounds;
pub mod scoring;
pub mod shop;
pub mod state;
pub mod view;

pub use autopilot::{Autopilot, EndReason, RunSummary};
pub use controller::{PlayerController, ShopAction};
pub use flow::RunLoop;
pub use heuristic_controller::HeuristicController;
pub use host::{GameEvent, GameHost, NullHost, RecordingHost};
pub use logger::{GameLogger, LogEntry, OutputFormat, OutputMode, VerbosityLevel};
pub use phase::RunPhase;
pub use random_controller::RandomController;
pub use rounds::{Boss, Difficulty, Objective, RoundConfig};
pub use shop::GoldBreakdown;
pub use state::GameState;
pub use view::{BoardSnapshot, GameStateView};
