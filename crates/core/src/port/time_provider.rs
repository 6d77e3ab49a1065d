// Time Provider Port
// Used to stamp execution duration on the post-execution trace event

use std::sync::atomic::{AtomicI64, Ordering};

/// Clock abstraction so durations are deterministic under test
pub trait TimeProvider: Send + Sync {
    /// Current time in milliseconds since the Unix epoch
    fn now_millis(&self) -> i64;
}

/// Wall clock (production)
pub struct SystemTimeProvider;

impl TimeProvider for SystemTimeProvider {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// Clock that advances by a fixed step on every read (tests)
pub struct SteppingTimeProvider {
    now: AtomicI64,
    step_ms: i64,
}

impl SteppingTimeProvider {
    pub fn new(start_ms: i64, step_ms: i64) -> Self {
        Self {
            now: AtomicI64::new(start_ms),
            step_ms,
        }
    }
}

impl TimeProvider for SteppingTimeProvider {
    fn now_millis(&self) -> i64 {
        self.now.fetch_add(self.step_ms, Ordering::SeqCst)
    }
}
