//=========================================================================
// Frame Clock
//=========================================================================
//
// Measures frame-loop iterations start to start.
//
// ```text
//   begin()₁ ─────────── begin()₂ ─────────── begin()₃
//      │◄──── delta₂ ────►│◄──── delta₃ ────►│
//      └─ work ─┘ end()      └─ work ─┘ end()
// ```
//
// The delta includes everything between two iteration starts: the
// render work and the time spent waiting in the platform event loop.
// Iteration N + 1 consumes the full duration of iteration N
// (one-iteration lag); the first iteration sees zero.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::{Duration, Instant};

//=== FrameClock ==========================================================

/// Iteration timer with microsecond-resolution delta.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    /// Start of the most recent iteration.
    last_start: Option<Instant>,
    /// Set between `begin()` and `end()`.
    in_iteration: bool,
    last_delta: Duration,
    frames: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the start of an iteration and measures the previous one.
    pub fn begin(&mut self) {
        self.begin_at(Instant::now());
    }

    fn begin_at(&mut self, now: Instant) {
        if let Some(previous) = self.last_start {
            self.last_delta = now.saturating_duration_since(previous);
        }
        self.last_start = Some(now);
        self.in_iteration = true;
    }

    /// Marks the end of the current iteration's work and returns how long
    /// that work took.
    ///
    /// Without a matching [`begin`](Self::begin) nothing is counted and
    /// zero is returned.
    pub fn end(&mut self) -> Duration {
        if !self.in_iteration {
            return Duration::ZERO;
        }
        self.in_iteration = false;
        self.frames += 1;
        self.last_start.map_or(Duration::ZERO, |start| start.elapsed())
    }

    /// Start-to-start duration of the previous iteration (zero before the
    /// second `begin`).
    pub fn delta(&self) -> Duration {
        self.last_delta
    }

    /// [`delta`](Self::delta) in fractional milliseconds, truncated to
    /// whole microseconds.
    pub fn delta_ms(&self) -> f64 {
        self.last_delta.as_micros() as f64 / 1000.0
    }

    /// Number of completed iterations.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
