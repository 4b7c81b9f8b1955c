use duel_core::GRACE_PERIOD;
use duel_core::JOIN_TIMEOUT;
use std::time::Duration;
use std::time::Instant;

/// Time source for the registry. Injected so eviction and join-timeout
/// behavior can be driven deterministically in tests, without
/// wall-clock waits.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Wall-clock time.
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Test double: time advances only when told to.
#[derive(Debug)]
pub struct ManualClock {
    start: Instant,
    offset: std::sync::Mutex<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            offset: std::sync::Mutex::new(Duration::ZERO),
        }
    }
    pub fn advance(&self, by: Duration) {
        *self.offset.lock().expect("clock poisoned") += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.start + *self.offset.lock().expect("clock poisoned")
    }
}

/// Session lifecycle timing knobs.
#[derive(Debug, Clone, Copy)]
pub struct LifecycleConfig {
    /// How long a terminal session stays visible before eviction.
    pub grace: Duration,
    /// How long a session may stay in `Forming` before it is abandoned.
    pub join_timeout: Duration,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            grace: Duration::from_secs(GRACE_PERIOD),
            join_timeout: Duration::from_secs(JOIN_TIMEOUT),
        }
    }
}
