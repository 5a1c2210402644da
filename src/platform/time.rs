//! Frame clock
//!
//! The host scheduler (requestAnimationFrame, or a native sleep loop) calls
//! back with a millisecond timestamp. Every start hands out a new
//! `FrameHandle`; callbacks holding a stale handle are rejected, so a
//! restart never leaves two loops advancing the same session.

use crate::sim::FrameTime;

/// Token identifying one started loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHandle(u64);

/// Restartable, cancellable frame clock
#[derive(Debug, Clone, Default)]
pub struct LoopDriver {
    generation: u64,
    active: Option<u64>,
    last_timestamp: f64,
}

impl LoopDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a loop at `now`, cancelling whichever loop was running.
    /// The first frame measures from `now`, not from the last stop.
    pub fn start(&mut self, now: f64) -> FrameHandle {
        if self.active.is_some() {
            log::debug!("Cancelling loop {} before restart", self.generation);
        }
        self.generation += 1;
        self.active = Some(self.generation);
        self.last_timestamp = now;
        FrameHandle(self.generation)
    }

    pub fn stop(&mut self) {
        self.active = None;
    }

    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    /// Whether `handle` belongs to the live loop
    pub fn is_current(&self, handle: FrameHandle) -> bool {
        self.active == Some(handle.0)
    }

    /// Measure one frame. `None` when the handle is stale or the loop is
    /// stopped; the caller must not advance the simulation then.
    pub fn frame(&mut self, handle: FrameHandle, now: f64) -> Option<FrameTime> {
        if !self.is_current(handle) {
            return None;
        }
        let delta = now - self.last_timestamp;
        self.last_timestamp = now;
        Some(FrameTime::from_delta_ms(delta as f32))
    }
}
