use crate::game::map::GameMap;
use crate::game::snake::SnakeSnapshot;
use crate::game::types::{Direction, MatchOutcome};

/// Logical playback cadence: one recorded command pair per 300ms.
pub const REPLAY_STEP_INTERVAL_MS: f64 = 300.0;

/// Per-frame elapsed time is clamped to this many intervals so a
/// backgrounded window does not replay a burst of steps on return.
const MAX_CATCH_UP_INTERVALS: f64 = 2.0;

#[derive(Debug)]
pub enum ReplayError {
    EmptyLog,
    MismatchedLogs { a: usize, b: usize },
    InvalidDigit(char),
}

impl std::fmt::Display for ReplayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReplayError::EmptyLog => write!(f, "Replay logs must not be empty"),
            ReplayError::MismatchedLogs { a, b } => {
                write!(f, "Replay logs differ in length: {} vs {}", a, b)
            }
            ReplayError::InvalidDigit(c) => {
                write!(f, "Invalid direction digit '{}' in replay log", c)
            }
        }
    }
}

impl std::error::Error for ReplayError {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    Stopped,
    Playing,
    Paused,
    Finished,
}

/// Captured on pause, restored on resume. Owned by the controller;
/// live mode never sees one.
struct MatchSnapshot {
    step_index: usize,
    snakes: [SnakeSnapshot; 2],
}

/// Deterministically reproduces a finished match from two parallel
/// command logs. Frame-driven like the scheduler, but at its own fixed
/// cadence: the host view calls [`ReplayController::tick`] every frame
/// and elapsed-time accumulation decides when the next logical step is
/// due, keeping playback speed independent of display refresh rate.
pub struct ReplayController {
    log_a: Vec<Direction>,
    log_b: Vec<Direction>,
    outcome: MatchOutcome,
    step_index: usize,
    carry_ms: f64,
    state: PlaybackState,
    snapshot: Option<MatchSnapshot>,
    finished_pending: bool,
}

impl Default for ReplayController {
    fn default() -> Self {
        Self::new()
    }
}

impl ReplayController {
    pub fn new() -> Self {
        Self {
            log_a: Vec::new(),
            log_b: Vec::new(),
            outcome: MatchOutcome::None,
            step_index: 0,
            carry_ms: 0.0,
            state: PlaybackState::Stopped,
            snapshot: None,
            finished_pending: false,
        }
    }

    /// Begins playback. Malformed input (empty logs, mismatched
    /// lengths, non-direction digits) is refused without mutating any
    /// state.
    pub fn start(
        &mut self,
        log_a: &str,
        log_b: &str,
        outcome: MatchOutcome,
    ) -> Result<(), ReplayError> {
        let log_a = parse_log(log_a)?;
        let log_b = parse_log(log_b)?;
        if log_a.is_empty() || log_b.is_empty() {
            return Err(ReplayError::EmptyLog);
        }
        if log_a.len() != log_b.len() {
            return Err(ReplayError::MismatchedLogs {
                a: log_a.len(),
                b: log_b.len(),
            });
        }

        self.log_a = log_a;
        self.log_b = log_b;
        self.outcome = outcome;
        self.step_index = 0;
        self.carry_ms = 0.0;
        self.snapshot = None;
        self.finished_pending = false;
        self.state = PlaybackState::Playing;
        Ok(())
    }

    /// Per-frame callback. Enqueues due command pairs at the playback
    /// cadence (leftover time carries into the next frame) and then
    /// attempts the ready-gated synchronized step, so buffered commands
    /// apply on the first frame both snakes are idle.
    pub fn tick(&mut self, map: &mut GameMap, delta_ms: f64) {
        if self.state != PlaybackState::Playing || map.is_destroyed() {
            return;
        }

        self.carry_ms += delta_ms.min(REPLAY_STEP_INTERVAL_MS * MAX_CATCH_UP_INTERVALS);
        while self.carry_ms >= REPLAY_STEP_INTERVAL_MS {
            self.carry_ms -= REPLAY_STEP_INTERVAL_MS;

            if self.step_index >= self.log_a.len() - 1 {
                self.finish(map);
                return;
            }

            map.snake_mut(0).enqueue_direction(self.log_a[self.step_index]);
            map.snake_mut(1).enqueue_direction(self.log_b[self.step_index]);
            self.step_index += 1;
        }

        map.try_step();
    }

    fn finish(&mut self, map: &mut GameMap) {
        map.apply_outcome(self.outcome);
        self.state = PlaybackState::Finished;
        self.finished_pending = true;
    }

    /// Captures the current step index and both snakes' full state,
    /// then halts stepping. Interpolation of an in-flight step may
    /// still play out visually; resume rewinds to this capture.
    pub fn pause(&mut self, map: &GameMap) {
        if self.state != PlaybackState::Playing {
            return;
        }
        self.snapshot = Some(MatchSnapshot {
            step_index: self.step_index,
            snakes: [map.snake(0).snapshot(), map.snake(1).snapshot()],
        });
        self.state = PlaybackState::Paused;
    }

    /// Restores the most recent snapshot and zeroes the elapsed-time
    /// accumulator so motion continues from the captured sub-step
    /// position without a jump.
    pub fn resume(&mut self, map: &mut GameMap) {
        if self.state != PlaybackState::Paused {
            return;
        }
        if let Some(snapshot) = &self.snapshot {
            self.step_index = snapshot.step_index;
            map.snake_mut(0).restore(&snapshot.snakes[0]);
            map.snake_mut(1).restore(&snapshot.snakes[1]);
        }
        self.carry_ms = 0.0;
        self.state = PlaybackState::Playing;
    }

    /// Idempotent; part of view teardown.
    pub fn stop(&mut self) {
        self.state = PlaybackState::Stopped;
    }

    /// One-shot "replay finished" signal for the host view.
    pub fn take_finished(&mut self) -> bool {
        std::mem::take(&mut self.finished_pending)
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn step_index(&self) -> usize {
        self.step_index
    }

    pub fn total_steps(&self) -> usize {
        self.log_a.len()
    }

    pub fn outcome(&self) -> MatchOutcome {
        self.outcome
    }
}

fn parse_log(log: &str) -> Result<Vec<Direction>, ReplayError> {
    log.chars()
        .map(|c| Direction::from_digit(c).ok_or(ReplayError::InvalidDigit(c)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::map::MatchSetup;
    use crate::game::types::SnakeStatus;

    const FRAME_MS: f64 = 16.0;

    fn demo_map() -> GameMap {
        GameMap::new(&MatchSetup::demo()).unwrap()
    }

    fn frame(map: &mut GameMap, controller: &mut ReplayController, delta_ms: f64) {
        controller.tick(map, delta_ms);
        map.tick(delta_ms);
    }

    #[test]
    fn refuses_empty_logs_without_mutation() {
        let mut controller = ReplayController::new();
        assert!(matches!(
            controller.start("", "", MatchOutcome::Draw),
            Err(ReplayError::EmptyLog)
        ));
        assert_eq!(controller.state(), PlaybackState::Stopped);
    }

    #[test]
    fn refuses_mismatched_logs_without_mutation() {
        let mut controller = ReplayController::new();
        let result = controller.start("111", "33", MatchOutcome::Draw);
        assert!(matches!(
            result,
            Err(ReplayError::MismatchedLogs { a: 3, b: 2 })
        ));
        assert_eq!(controller.state(), PlaybackState::Stopped);
        assert_eq!(controller.total_steps(), 0);
    }

    #[test]
    fn refuses_invalid_digits() {
        let mut controller = ReplayController::new();
        assert!(matches!(
            controller.start("117", "333", MatchOutcome::Draw),
            Err(ReplayError::InvalidDigit('7'))
        ));
    }

    #[test]
    fn commands_apply_on_the_playback_cadence() {
        let mut map = demo_map();
        let mut controller = ReplayController::new();
        controller.start("111", "333", MatchOutcome::None).unwrap();

        // Just before the first cadence boundary nothing has happened.
        frame(&mut map, &mut controller, 299.0);
        assert_eq!(map.snake(0).step(), 0);

        // Crossing it enqueues one pair and steps both snakes together.
        frame(&mut map, &mut controller, 2.0);
        assert_eq!(map.snake(0).step(), 1);
        assert_eq!(map.snake(1).step(), 1);
        assert_eq!(controller.step_index(), 1);
    }

    #[test]
    fn large_frame_gaps_are_clamped() {
        let mut map = demo_map();
        let mut controller = ReplayController::new();
        controller
            .start("11111111", "33333333", MatchOutcome::None)
            .unwrap();

        // A five-second stall (e.g. tab backgrounding) must not burst
        // more than two intervals' worth of commands.
        controller.tick(&mut map, 5000.0);
        assert_eq!(controller.step_index(), 2);
    }

    #[test]
    fn replay_is_deterministic_across_runs() {
        let run = || {
            let mut map = demo_map();
            let mut controller = ReplayController::new();
            controller
                .start("111222", "333000", MatchOutcome::Draw)
                .unwrap();

            let mut trace = Vec::new();
            for _ in 0..300 {
                frame(&mut map, &mut controller, FRAME_MS);
                let a = map.snake(0).head();
                let b = map.snake(1).head();
                trace.push((controller.step_index(), a.x, a.y, b.x, b.y));
            }
            trace
        };

        let first = run();
        let second = run();
        assert_eq!(first.len(), second.len());
        for (lhs, rhs) in first.iter().zip(second.iter()) {
            assert_eq!(lhs.0, rhs.0);
            assert_eq!(lhs.1.to_bits(), rhs.1.to_bits());
            assert_eq!(lhs.2.to_bits(), rhs.2.to_bits());
            assert_eq!(lhs.3.to_bits(), rhs.3.to_bits());
            assert_eq!(lhs.4.to_bits(), rhs.4.to_bits());
        }
    }

    #[test]
    fn pause_and_resume_rewind_to_the_captured_sub_step_position() {
        let mut map = demo_map();
        let mut controller = ReplayController::new();
        controller
            .start("111111", "333333", MatchOutcome::None)
            .unwrap();

        // Run into the middle of an interpolated step.
        for _ in 0..25 {
            frame(&mut map, &mut controller, FRAME_MS);
        }
        assert_eq!(map.snake(0).status(), SnakeStatus::Moving);

        controller.pause(&map);
        let paused_x = map.snake(0).head().x;
        let paused_y = map.snake(0).head().y;
        let paused_index = controller.step_index();

        // Interpolation may keep playing out while paused; the
        // controller itself must not advance.
        for _ in 0..30 {
            controller.tick(&mut map, FRAME_MS);
            map.tick(FRAME_MS);
        }
        assert_eq!(controller.step_index(), paused_index);
        assert_ne!(map.snake(0).head().x, paused_x);

        controller.resume(&mut map);
        assert_eq!(map.snake(0).head().x.to_bits(), paused_x.to_bits());
        assert_eq!(map.snake(0).head().y.to_bits(), paused_y.to_bits());
        assert_eq!(controller.state(), PlaybackState::Playing);
    }

    #[test]
    fn pause_when_not_playing_is_a_no_op() {
        let mut map = demo_map();
        let mut controller = ReplayController::new();
        controller.pause(&map);
        assert_eq!(controller.state(), PlaybackState::Stopped);
        controller.resume(&mut map);
        assert_eq!(controller.state(), PlaybackState::Stopped);
    }

    #[test]
    fn stop_is_idempotent() {
        let mut controller = ReplayController::new();
        controller.start("11", "33", MatchOutcome::None).unwrap();
        controller.stop();
        controller.stop();
        assert_eq!(controller.state(), PlaybackState::Stopped);
    }
}
