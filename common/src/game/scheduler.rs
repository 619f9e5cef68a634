use super::map::GameMap;

/// Live-mode scheduling cadence. Steps are only attempted on this
/// boundary; most attempts are no-ops until both command queues fill.
pub const LIVE_STEP_INTERVAL_MS: f64 = 100.0;

/// Gates synchronized steps in live mode. Frame-driven: the owning view
/// feeds it elapsed wall-clock time and the scheduler fires a
/// ready-gated step attempt on every elapsed interval. Replay mode
/// bypasses this entirely and is driven by the replay controller.
///
/// An unready attempt is silent and retried on the next interval,
/// indefinitely; stall handling (a player that never sends a command)
/// belongs to the session layer, not here.
pub struct StepScheduler {
    interval_ms: f64,
    elapsed_ms: f64,
    stopped: bool,
}

impl Default for StepScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl StepScheduler {
    pub fn new() -> Self {
        Self::with_interval(LIVE_STEP_INTERVAL_MS)
    }

    pub fn with_interval(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            elapsed_ms: 0.0,
            stopped: false,
        }
    }

    /// Accumulates `delta_ms` and attempts a synchronized step per
    /// elapsed interval. Returns how many steps were actually taken.
    pub fn tick(&mut self, map: &mut GameMap, delta_ms: f64) -> u32 {
        if self.stopped || map.is_destroyed() {
            return 0;
        }

        self.elapsed_ms += delta_ms;
        let mut steps = 0;
        while self.elapsed_ms >= self.interval_ms {
            self.elapsed_ms -= self.interval_ms;
            if map.try_step() {
                steps += 1;
            }
        }
        steps
    }

    /// Safe to call any number of times; part of the view teardown
    /// contract together with [`GameMap::destroy`].
    pub fn stop(&mut self) {
        self.stopped = true;
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }
}
