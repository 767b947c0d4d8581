//! Long-press detection
//!
//! Timestamps are milliseconds from an arbitrary monotonic origin, supplied
//! by the caller each tick.

/// Hold timer for a single key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LongPressTimer {
    pressed_at: Option<u64>,
}

impl LongPressTimer {
    /// Create a disarmed timer
    pub const fn new() -> Self {
        Self { pressed_at: None }
    }

    /// Record a press at `now_ms`
    pub fn arm(&mut self, now_ms: u64) {
        self.pressed_at = Some(now_ms);
    }

    /// Forget any press
    pub fn clear(&mut self) {
        self.pressed_at = None;
    }

    /// Returns true once when the hold reaches `threshold_ms`, then disarms
    pub fn poll(&mut self, now_ms: u64, threshold_ms: u32) -> bool {
        match self.pressed_at {
            Some(at) if now_ms.saturating_sub(at) >= u64::from(threshold_ms) => {
                self.pressed_at = None;
                true
            }
            _ => false,
        }
    }
}
