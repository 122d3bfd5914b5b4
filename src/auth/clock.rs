//! Timestamp source for authenticated requests.
//!
//! JOJO binds every signed payload to the wall-clock time at which it was
//! signed. The server rejects payloads whose `timestamp` is too far from its
//! own clock.

use std::time::{SystemTime, UNIX_EPOCH};

/// Trait for providing the `timestamp` injected into signed payloads.
pub trait TimestampProvider: Send + Sync {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> u64;
}

/// Reads the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    /// Create a new system clock.
    pub fn new() -> Self {
        Self
    }
}

impl TimestampProvider for SystemClock {
    fn now_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}

/// A clock frozen at one instant. Useful for reproducible signatures in tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub u64);

impl TimestampProvider for FixedClock {
    fn now_millis(&self) -> u64 {
        self.0
    }
}
