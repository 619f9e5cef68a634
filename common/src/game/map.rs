use super::snake::Snake;
use super::types::{Direction, MatchOutcome};
use super::wall::{Wall, build_obstacles};

pub const DEFAULT_ROWS: usize = 13;
pub const DEFAULT_COLS: usize = 14;

pub const PLAYER_A_COLOR: &str = "#206CCF";
pub const PLAYER_B_COLOR: &str = "#CB272D";

#[derive(Clone, Debug, PartialEq)]
pub struct PlayerStart {
    pub id: u8,
    pub row: i32,
    pub col: i32,
    pub color: String,
}

/// Everything the simulation needs at construction, sourced externally
/// from a live match-start message or a stored match record.
#[derive(Clone, Debug, PartialEq)]
pub struct MatchSetup {
    /// rows x cols, 0 = empty, non-zero = obstacle.
    pub grid: Vec<Vec<u8>>,
    pub players: [PlayerStart; 2],
}

impl MatchSetup {
    /// Standalone setup: default board with a border ring and a small
    /// set of centrally symmetric interior barriers. Live matches get
    /// their map from the session instead.
    pub fn demo() -> Self {
        let rows = DEFAULT_ROWS;
        let cols = DEFAULT_COLS;
        let mut grid = vec![vec![0u8; cols]; rows];

        for r in 0..rows {
            grid[r][0] = 1;
            grid[r][cols - 1] = 1;
        }
        for c in 0..cols {
            grid[0][c] = 1;
            grid[rows - 1][c] = 1;
        }

        // Interior barriers, mirrored through the center so neither
        // player gets the easier half.
        for &(r, c) in &[(3, 4), (6, 2), (4, 8), (9, 6)] {
            grid[r][c] = 1;
            grid[rows - 1 - r][cols - 1 - c] = 1;
        }

        Self {
            grid,
            players: [
                PlayerStart {
                    id: 0,
                    row: rows as i32 - 2,
                    col: 1,
                    color: PLAYER_A_COLOR.to_string(),
                },
                PlayerStart {
                    id: 1,
                    row: 1,
                    col: cols as i32 - 2,
                    color: PLAYER_B_COLOR.to_string(),
                },
            ],
        }
    }

    pub fn rows(&self) -> usize {
        self.grid.len()
    }

    pub fn cols(&self) -> usize {
        self.grid.first().map(|row| row.len()).unwrap_or(0)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.rows() < 3 || self.cols() < 3 {
            return Err("Map grid must be at least 3x3".to_string());
        }
        if self.grid.iter().any(|row| row.len() != self.cols()) {
            return Err("Map grid rows must all have the same length".to_string());
        }
        for player in &self.players {
            if player.row < 0
                || player.col < 0
                || player.row as usize >= self.rows()
                || player.col as usize >= self.cols()
            {
                return Err(format!("Player {} starts outside the grid", player.id));
            }
            if self.grid[player.row as usize][player.col as usize] != 0 {
                return Err(format!("Player {} starts on an obstacle", player.id));
            }
        }
        if self.players[0].id == self.players[1].id {
            return Err("Players must have distinct ids".to_string());
        }
        Ok(())
    }
}

/// Shared match state: the static grid with its immutable obstacle set,
/// the two snakes, and the display scale for rendering. Owned by the
/// view that created it; destroyed exactly once on teardown.
pub struct GameMap {
    rows: usize,
    cols: usize,
    walls: Vec<Wall>,
    snakes: [Snake; 2],
    player_colors: [String; 2],
    /// Cell size in pixels, recomputed on viewport resize.
    cell_size: f64,
    background_dirty: bool,
    destroyed: bool,
}

impl GameMap {
    pub fn new(setup: &MatchSetup) -> Result<Self, String> {
        setup.validate()?;

        // Bottom-left snake starts facing up, top-right facing down.
        let [a, b] = &setup.players;
        let snakes = [
            Snake::new(a.id, a.row, a.col, Direction::Up),
            Snake::new(b.id, b.row, b.col, Direction::Down),
        ];

        Ok(Self {
            rows: setup.rows(),
            cols: setup.cols(),
            walls: build_obstacles(&setup.grid),
            snakes,
            player_colors: [a.color.clone(), b.color.clone()],
            cell_size: 0.0,
            background_dirty: true,
            destroyed: false,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    pub fn snakes(&self) -> &[Snake; 2] {
        &self.snakes
    }

    pub fn snake(&self, index: usize) -> &Snake {
        &self.snakes[index]
    }

    pub fn snake_mut(&mut self, index: usize) -> &mut Snake {
        &mut self.snakes[index]
    }

    pub fn player_color(&self, index: usize) -> &str {
        &self.player_colors[index]
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    pub fn background_dirty(&self) -> bool {
        self.background_dirty
    }

    pub fn mark_background_dirty(&mut self) {
        self.background_dirty = true;
    }

    pub fn clear_background_dirty(&mut self) {
        self.background_dirty = false;
    }

    /// Both snakes idle with equal, non-zero command backlogs. Equal
    /// depth keeps a lagging player from falling logical steps behind
    /// the other.
    pub fn snakes_ready(&self) -> bool {
        for snake in &self.snakes {
            if !snake.ready_for_step() {
                return false;
            }
        }
        self.snakes[0].queued_commands() == self.snakes[1].queued_commands()
    }

    /// Attempts one synchronized step. An unready map is a silent
    /// no-op; callers simply retry on their next tick.
    pub fn try_step(&mut self) -> bool {
        if self.destroyed || !self.snakes_ready() {
            return false;
        }
        for snake in &mut self.snakes {
            snake.advance_step();
        }
        true
    }

    /// Advances both snakes' continuous positions by `delta_ms`.
    pub fn tick(&mut self, delta_ms: f64) {
        if self.destroyed {
            return;
        }
        for snake in &mut self.snakes {
            snake.tick_interpolation(delta_ms);
        }
    }

    /// Recomputes the cell scale from the viewport's content size and
    /// flags the background composite when the scale actually changed.
    pub fn update_size(&mut self, width: f64, height: f64) {
        let new_size = (width / self.cols as f64)
            .min(height / self.rows as f64)
            .floor();
        if new_size != self.cell_size {
            self.cell_size = new_size;
            self.background_dirty = true;
        }
    }

    /// Marks the losing snake(s) dead per the recorded result.
    pub fn apply_outcome(&mut self, outcome: MatchOutcome) {
        if matches!(outcome, MatchOutcome::Draw | MatchOutcome::PlayerBWon) {
            self.snakes[0].set_dead();
        }
        if matches!(outcome, MatchOutcome::Draw | MatchOutcome::PlayerAWon) {
            self.snakes[1].set_dead();
        }
    }

    /// Teardown contract: idempotent, and every later step or tick is a
    /// guarded no-op, so a straggling callback cannot mutate the match.
    pub fn destroy(&mut self) {
        self.destroyed = true;
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::types::SnakeStatus;
    use rand::Rng;

    fn demo_map() -> GameMap {
        GameMap::new(&MatchSetup::demo()).unwrap()
    }

    fn settle(map: &mut GameMap) {
        for _ in 0..200 {
            map.tick(16.0);
            if map.snakes().iter().all(|s| s.status() != SnakeStatus::Moving) {
                return;
            }
        }
        panic!("snakes did not settle");
    }

    #[test]
    fn demo_setup_is_valid() {
        let setup = MatchSetup::demo();
        assert!(setup.validate().is_ok());
        assert_eq!(setup.rows(), DEFAULT_ROWS);
        assert_eq!(setup.cols(), DEFAULT_COLS);
    }

    #[test]
    fn rejects_ragged_grid() {
        let mut setup = MatchSetup::demo();
        setup.grid[4].pop();
        assert!(setup.validate().is_err());
    }

    #[test]
    fn rejects_start_on_obstacle() {
        let mut setup = MatchSetup::demo();
        let (r, c) = (setup.players[0].row as usize, setup.players[0].col as usize);
        setup.grid[r][c] = 1;
        assert!(setup.validate().is_err());
    }

    #[test]
    fn step_requires_both_ready_with_equal_backlogs() {
        let mut map = demo_map();
        assert!(!map.try_step());

        map.snake_mut(0).enqueue_direction(Direction::Up);
        assert!(!map.try_step(), "one-sided command must not step");

        map.snake_mut(0).enqueue_direction(Direction::Up);
        map.snake_mut(1).enqueue_direction(Direction::Down);
        assert!(!map.try_step(), "unequal backlogs must not step");

        map.snake_mut(1).enqueue_direction(Direction::Down);
        assert!(map.try_step());
        assert_eq!(map.snake(0).step(), 1);
        assert_eq!(map.snake(1).step(), 1);
    }

    #[test]
    fn fuzzed_command_arrival_never_violates_step_gate() {
        let mut rng = rand::rng();
        let mut steps_taken = 0;

        for _ in 0..50 {
            let mut map = demo_map();

            for _ in 0..400 {
                // Random arrival order of live commands: sometimes a
                // pair in the same tick, sometimes one side only.
                if rng.random_bool(0.2) {
                    map.snake_mut(0).enqueue_direction(Direction::Up);
                    map.snake_mut(1).enqueue_direction(Direction::Down);
                }
                if rng.random_bool(0.3) {
                    map.snake_mut(0).enqueue_direction(Direction::Up);
                }
                if rng.random_bool(0.3) {
                    map.snake_mut(1).enqueue_direction(Direction::Down);
                }

                let ready = map.snakes_ready();
                if ready {
                    assert_eq!(
                        map.snake(0).queued_commands(),
                        map.snake(1).queued_commands()
                    );
                    assert!(map.snakes().iter().all(|s| s.status() == SnakeStatus::Idle));
                }
                assert_eq!(map.try_step(), ready);
                if ready {
                    steps_taken += 1;
                    settle(&mut map);
                }
            }
        }

        // Sanity over the whole run: one-sided arrivals can starve a
        // single map of equal backlogs, but never all fifty.
        assert!(steps_taken > 0);
    }

    #[test]
    fn resize_marks_background_dirty_once_and_leaves_snakes_alone() {
        let mut map = demo_map();
        map.update_size(700.0, 650.0);
        map.clear_background_dirty();

        map.snake_mut(0).enqueue_direction(Direction::Up);
        let step_before = map.snake(0).step();

        map.update_size(1400.0, 1300.0);
        assert!(map.background_dirty());
        map.clear_background_dirty();

        // Same size again: no redundant invalidation.
        map.update_size(1400.0, 1300.0);
        assert!(!map.background_dirty());

        assert_eq!(map.snake(0).step(), step_before);
        assert_eq!(map.snake(0).queued_commands(), 1);
    }

    #[test]
    fn outcome_overlay_marks_losers_dead() {
        let mut map = demo_map();
        map.apply_outcome(MatchOutcome::PlayerAWon);
        assert!(!map.snake(0).is_dead());
        assert!(map.snake(1).is_dead());

        let mut map = demo_map();
        map.apply_outcome(MatchOutcome::Draw);
        assert!(map.snake(0).is_dead());
        assert!(map.snake(1).is_dead());

        let mut map = demo_map();
        map.apply_outcome(MatchOutcome::None);
        assert!(!map.snake(0).is_dead());
        assert!(!map.snake(1).is_dead());
    }

    #[test]
    fn destroy_is_idempotent_and_freezes_the_match()  {
        let mut map = demo_map();
        map.snake_mut(0).enqueue_direction(Direction::Up);
        map.snake_mut(1).enqueue_direction(Direction::Down);

        map.destroy();
        map.destroy();
        assert!(map.is_destroyed());
        assert!(!map.try_step());

        map.tick(16.0);
        assert_eq!(map.snake(0).step(), 0);
    }
}
