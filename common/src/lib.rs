pub mod config;
pub mod game;
pub mod logger;
pub mod replay;

pub use game::{Direction, GameMap, GridCell, MatchOutcome, MatchSetup, Snake, SnakeStatus, StepScheduler};
pub use replay::{MatchRecord, ReplayController};
