//! Time control and search limits for chess engines.
//!
//! The search is single-threaded, so the clock is a plain value owned by the
//! search frame stack. It is checked on entry to every node.

use std::time::{Duration, Instant};

/// Search limits handed to an engine for one turn.
///
/// Engines stop deepening when either limit is reached. The clock takes
/// precedence: once the turn budget is spent the engine answers with the
/// deepest fully completed result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchLimits {
    /// Deepest iterative-deepening pass to attempt, in plies
    pub max_depth: u32,
    /// Time left on the mover's game clock (None = untimed)
    pub clock_remaining: Option<Duration>,
}

impl SearchLimits {
    /// Create limits with only a depth constraint (no clock).
    pub fn depth(max_depth: u32) -> Self {
        Self {
            max_depth,
            clock_remaining: None,
        }
    }

    /// Create limits from the game clock alone (depth bounded by the engine).
    pub fn clock(remaining: Duration) -> Self {
        Self {
            max_depth: u32::MAX,
            clock_remaining: Some(remaining),
        }
    }

    /// Create limits with both depth and clock constraints.
    pub fn depth_and_clock(max_depth: u32, remaining: Duration) -> Self {
        Self {
            max_depth,
            clock_remaining: Some(remaining),
        }
    }

    /// The share of the remaining clock this turn may spend.
    pub fn turn_budget(&self, fraction: f64) -> Option<Duration> {
        self.clock_remaining
            .map(|remaining| remaining.mul_f64(fraction.clamp(0.0, 1.0)))
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self::depth(4)
    }
}

/// Wall-clock budget for a single turn.
///
/// Once `check_time` observes the budget spent, the controller stays stopped
/// until restarted, so every unwinding frame sees the same answer.
#[derive(Debug, Clone)]
pub struct TimeControl {
    /// Start time of the search
    start_time: Option<Instant>,
    /// Time limit for this search (None = infinite)
    time_limit: Option<Duration>,
    stopped: bool,
}

impl TimeControl {
    /// Create a new time controller.
    ///
    /// # Arguments
    /// * `time_limit` - Maximum time allowed for search (None = infinite)
    pub fn new(time_limit: Option<Duration>) -> Self {
        Self {
            start_time: None,
            time_limit,
            stopped: false,
        }
    }

    /// Start the clock. Should be called when search begins.
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
        self.stopped = false;
    }

    /// Force stop the search immediately.
    pub fn stop(&mut self) {
        self.stopped = true;
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Check the clock and latch the stopped flag if the budget is spent.
    pub fn check_time(&mut self) -> bool {
        if self.stopped {
            return true;
        }

        if let Some(limit) = self.time_limit
            && let Some(start) = self.start_time
            && start.elapsed() >= limit
        {
            self.stop();
            return true;
        }

        false
    }

    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit
    }

    /// Get elapsed time since search started.
    pub fn elapsed(&self) -> Duration {
        self.start_time
            .map(|s| s.elapsed())
            .unwrap_or(Duration::ZERO)
    }

    /// Get remaining time (None if no limit).
    pub fn remaining(&self) -> Option<Duration> {
        let limit = self.time_limit?;
        Some(limit.saturating_sub(self.elapsed()))
    }
}

impl Default for TimeControl {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
#[path = "time_control_tests.rs"]
mod time_control_tests;
