use std::collections::VecDeque;

use super::cell::GridCell;
use super::types::{Direction, SnakeStatus};

/// Interpolation speed in grid cells per second. One discrete step
/// therefore takes ~333ms of continuous motion on screen.
pub const SPEED_CELLS_PER_SEC: f64 = 3.0;

/// Distance below which the head snaps onto its target cell.
pub const ARRIVAL_EPS: f64 = 1e-2;

#[derive(Clone, Debug)]
pub struct Snake {
    id: u8,
    /// Body cells, head first. Never empty.
    body: VecDeque<GridCell>,
    /// Queued direction commands, oldest first.
    directions: VecDeque<Direction>,
    /// In-flight destination of the current step.
    next_cell: Option<GridCell>,
    status: SnakeStatus,
    /// Completed-or-started step count, drives the growth policy.
    step: u32,
    /// Head orientation for rendering only.
    facing: Direction,
}

/// Full per-snake state capture for replay pause/resume.
#[derive(Clone, Debug)]
pub struct SnakeSnapshot {
    body: VecDeque<GridCell>,
    directions: VecDeque<Direction>,
    next_cell: Option<GridCell>,
    status: SnakeStatus,
    step: u32,
    facing: Direction,
}

impl Snake {
    pub fn new(id: u8, row: i32, col: i32, facing: Direction) -> Self {
        let mut body = VecDeque::new();
        body.push_back(GridCell::new(row, col));

        Self {
            id,
            body,
            directions: VecDeque::new(),
            next_cell: None,
            status: SnakeStatus::Idle,
            step: 0,
            facing,
        }
    }

    pub fn id(&self) -> u8 {
        self.id
    }

    pub fn body(&self) -> &VecDeque<GridCell> {
        &self.body
    }

    pub fn head(&self) -> GridCell {
        *self.body.front().expect("Snake body should never be empty")
    }

    pub fn next_cell(&self) -> Option<GridCell> {
        self.next_cell
    }

    pub fn status(&self) -> SnakeStatus {
        self.status
    }

    pub fn step(&self) -> u32 {
        self.step
    }

    pub fn facing(&self) -> Direction {
        self.facing
    }

    pub fn queued_commands(&self) -> usize {
        self.directions.len()
    }

    pub fn is_dead(&self) -> bool {
        self.status == SnakeStatus::Dead
    }

    /// Appends a direction command. Legality (reversals, walls) is not
    /// checked here; collision resolution lives with the match session,
    /// which reports back through [`Snake::set_dead`].
    pub fn enqueue_direction(&mut self, direction: Direction) {
        self.directions.push_back(direction);
    }

    /// Terminal. After this only rendering reads the snake.
    pub fn set_dead(&mut self) {
        self.status = SnakeStatus::Dead;
    }

    pub fn ready_for_step(&self) -> bool {
        self.status == SnakeStatus::Idle && !self.directions.is_empty()
    }

    /// Tail is kept (net growth) for the first ten steps and then on
    /// every third step. Progressive-growth balancing rule of the game.
    fn keeps_tail(&self) -> bool {
        self.step <= 10 || self.step % 3 == 1
    }

    /// Consumes the oldest queued direction and begins the next step.
    /// Caller must hold [`Snake::ready_for_step`].
    pub fn advance_step(&mut self) {
        debug_assert!(self.ready_for_step());
        let Some(direction) = self.directions.pop_front() else {
            return;
        };

        let head = self.head();
        let (dr, dc) = direction.offset();
        self.next_cell = Some(GridCell::new(head.row + dr, head.col + dc));
        self.facing = direction;
        self.status = SnakeStatus::Moving;
        self.step += 1;

        // Shift every segment one slot toward the tail; the duplicated
        // front slot is what interpolation carries onto the target cell.
        self.body.push_front(head);
    }

    /// Advances continuous positions by `delta_ms`. No-op unless moving.
    pub fn tick_interpolation(&mut self, delta_ms: f64) {
        if self.status != SnakeStatus::Moving {
            return;
        }
        let Some(target) = self.next_cell else {
            return;
        };

        let move_distance = SPEED_CELLS_PER_SEC * delta_ms / 1000.0;
        let head = self.head();
        let dx = target.x - head.x;
        let dy = target.y - head.y;
        let distance = (dx * dx + dy * dy).sqrt();

        if distance < ARRIVAL_EPS {
            // Arrived. The growth-policy tail drop applies exactly now,
            // at step completion, not when the step began.
            self.body[0] = target;
            self.next_cell = None;
            self.status = SnakeStatus::Idle;
            if !self.keeps_tail() {
                self.body.pop_back();
            }
            return;
        }

        let ratio = move_distance / distance;
        {
            let head = &mut self.body[0];
            head.x += dx * ratio;
            head.y += dy * ratio;
        }

        // Rope follow: a trailing segment is pulled back to one grid
        // unit behind its predecessor whenever it lags further.
        for i in 1..self.body.len() {
            let prev = self.body[i - 1];
            let curr = &mut self.body[i];
            let seg_dx = prev.x - curr.x;
            let seg_dy = prev.y - curr.y;
            let seg_distance = (seg_dx * seg_dx + seg_dy * seg_dy).sqrt();
            if seg_distance > 1.0 {
                let seg_ratio = (seg_distance - 1.0) / seg_distance;
                curr.x += seg_dx * seg_ratio;
                curr.y += seg_dy * seg_ratio;
            }
        }

        // A tail that will be dropped this step flows toward the
        // second-to-last segment at head speed instead of lagging a
        // full unit behind, so the shrink looks continuous.
        if !self.keeps_tail() && self.body.len() >= 2 {
            let before_tail = self.body[self.body.len() - 2];
            let tail_index = self.body.len() - 1;
            let tail = &mut self.body[tail_index];
            let tail_dx = before_tail.x - tail.x;
            let tail_dy = before_tail.y - tail.y;
            let tail_distance = (tail_dx * tail_dx + tail_dy * tail_dy).sqrt();
            if tail_distance > 1.0 {
                let tail_ratio = move_distance / tail_distance;
                tail.x += tail_dx * tail_ratio;
                tail.y += tail_dy * tail_ratio;
            }
        }
    }

    pub fn snapshot(&self) -> SnakeSnapshot {
        SnakeSnapshot {
            body: self.body.clone(),
            directions: self.directions.clone(),
            next_cell: self.next_cell,
            status: self.status,
            step: self.step,
            facing: self.facing,
        }
    }

    pub fn restore(&mut self, snapshot: &SnakeSnapshot) {
        self.body = snapshot.body.clone();
        self.directions = snapshot.directions.clone();
        self.next_cell = snapshot.next_cell;
        self.status = snapshot.status;
        self.step = snapshot.step;
        self.facing = snapshot.facing;
    }
}
