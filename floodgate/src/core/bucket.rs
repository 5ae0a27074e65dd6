//! Token bucket admission check

use super::Policy;
use std::time::SystemTime;

/// Admission state for a single client identifier.
///
/// Tokens accrue continuously at one per refill interval, capped at the burst
/// capacity. Each admitted request consumes one token; a request finding less
/// than one token is rejected and consumes nothing.
#[derive(Debug, Clone)]
pub struct TokenBucket {
    capacity: f64,
    tokens: f64,
    refill_interval_secs: f64,
    last_refill: SystemTime,
}

impl TokenBucket {
    /// Create a bucket under the given policy, starting full.
    pub fn new(policy: &Policy, now: SystemTime) -> Self {
        let capacity = f64::from(policy.burst());
        TokenBucket {
            capacity,
            tokens: capacity,
            refill_interval_secs: policy.refill_interval().as_secs_f64(),
            last_refill: now,
        }
    }

    /// Decide whether one more request may proceed, and record the decision.
    ///
    /// Accrues tokens for the time elapsed since the last check, then
    /// consumes one when at least one whole token is available.
    pub fn try_admit(&mut self, now: SystemTime) -> bool {
        self.refill(now);
        if self.tokens >= 1.0 {
            self.tokens -= 1.0;
            true
        } else {
            false
        }
    }

    fn refill(&mut self, now: SystemTime) {
        // A clock step backwards accrues nothing and keeps the old mark.
        let Ok(elapsed) = now.duration_since(self.last_refill) else {
            return;
        };
        let accrued = elapsed.as_secs_f64() / self.refill_interval_secs;
        self.tokens = (self.tokens + accrued).min(self.capacity);
        self.last_refill = now;
    }

    /// Tokens currently available, fractional between refills.
    pub fn available(&self) -> f64 {
        self.tokens
    }

    /// When this bucket was last updated. Doubles as its last-touch time.
    pub(crate) fn last_touched(&self) -> SystemTime {
        self.last_refill
    }
}
