use chrono::Utc;

/// Source of wall-clock time in milliseconds since the Unix epoch.
///
/// Signing code reads time only through this trait so callers can pin the
/// clock in tests or feed in a server-synchronised time.
pub trait TimeProvider: Send + Sync {
    fn now_millis(&self) -> u64;
}

/// The system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl TimeProvider for SystemClock {
    fn now_millis(&self) -> u64 {
        // Clocks set before 1970 clamp to zero rather than wrapping.
        u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0)
    }
}

/// A clock frozen at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub u64);

impl TimeProvider for FixedClock {
    fn now_millis(&self) -> u64 {
        self.0
    }
}
