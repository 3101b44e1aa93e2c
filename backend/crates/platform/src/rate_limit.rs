//! Login attempt limiting
//!
//! Fixed-window policy: the window opens on the first failure and is not
//! extended by later ones. Counting itself lives in the attempt store.

use std::time::Duration;

/// Fixed-window attempt limit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttemptLimit {
    /// Failures tolerated inside one window
    pub max_attempts: u32,
    /// Window length, measured from the first failure
    pub window: Duration,
}

impl Default for AttemptLimit {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            window: Duration::from_secs(15 * 60),
        }
    }
}

impl AttemptLimit {
    pub fn new(max_attempts: u32, window_secs: u64) -> Self {
        Self {
            max_attempts,
            window: Duration::from_secs(window_secs),
        }
    }

    /// Window in milliseconds, at least 1 so it is a valid `PEXPIRE` argument
    pub fn window_ms(&self) -> i64 {
        i64::try_from(self.window.as_millis())
            .unwrap_or(i64::MAX)
            .max(1)
    }

    /// `true` once `count` failures have used up the allowance
    pub fn is_exceeded(&self, count: i64) -> bool {
        count >= i64::from(self.max_attempts)
    }
}
