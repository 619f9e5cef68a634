pub mod cell;
pub mod map;
pub mod scheduler;
pub mod snake;
pub mod types;
pub mod wall;

pub use cell::GridCell;
pub use map::{GameMap, MatchSetup, PlayerStart};
pub use scheduler::StepScheduler;
pub use snake::{Snake, SnakeSnapshot};
pub use types::{Direction, MatchOutcome, SnakeStatus};
pub use wall::{Wall, WallKind};
