use chrono::Utc;
use tracing::trace;

/// Default tolerance applied on both ends of the validity window, in seconds
pub const DEFAULT_CLOCK_SKEW: i64 = 300;

/// Source of the current time in whole Unix seconds
pub trait Clock {
    fn now(&self) -> i64;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        Utc::now().timestamp()
    }
}

/// Fixed instant, for replaying validation at a known time
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now(&self) -> i64 {
        self.0
    }
}

/// Whether a signature validity window contains the current wall-clock time
pub fn validate_signature_timestamps(inception: i64, expiration: i64, clock_skew: i64) -> bool {
    validate_signature_timestamps_with(&SystemClock, inception, expiration, clock_skew)
}

pub fn validate_signature_timestamps_with<C: Clock + ?Sized>(
    clock: &C,
    inception: i64,
    expiration: i64,
    clock_skew: i64,
) -> bool {
    let now = clock.now();
    if now < inception.saturating_sub(clock_skew) {
        trace!("Signature not yet valid: now={} inception={}", now, inception);
        return false;
    }
    if now > expiration.saturating_add(clock_skew) {
        trace!("Signature expired: now={} expiration={}", now, expiration);
        return false;
    }
    true
}
