//! Core components of the floodgate rate limiting library
//!
//! This module contains the fundamental building blocks:
//! - [`rate`]: refill rate specification
//! - [`bucket`]: the token bucket admission check
//! - [`registry`]: the per-key bucket registry with idle eviction

pub mod bucket;
pub mod rate;
pub mod registry;
#[cfg(test)]
mod tests;

pub use bucket::TokenBucket;
pub use rate::Rate;
pub use registry::{RateLimiter, RateLimiterBuilder};

use std::error::Error;
use std::fmt;
use std::time::Duration;

/// Admission policy applied to every bucket a registry creates.
///
/// A policy pairs the refill [`Rate`] (time to regenerate one token) with the
/// burst capacity (maximum tokens a bucket can hold). It is validated at
/// construction and immutable afterwards.
///
/// # Example
///
/// ```
/// use floodgate::{Policy, Rate};
/// use std::time::Duration;
///
/// // One token per second, bursts of up to 5 requests
/// let policy = Policy::new(Rate::new(Duration::from_secs(1)), 5)?;
/// assert_eq!(policy.burst(), 5);
/// # Ok::<(), floodgate::PolicyError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Policy {
    refill: Rate,
    burst: u32,
}

impl Policy {
    /// Create a policy, validating that it can admit anything at all.
    ///
    /// # Errors
    ///
    /// - [`PolicyError::ZeroBurst`] if `burst` is zero
    /// - [`PolicyError::ZeroRefillInterval`] if the refill interval is zero
    pub fn new(refill: Rate, burst: u32) -> Result<Self, PolicyError> {
        if burst == 0 {
            return Err(PolicyError::ZeroBurst);
        }
        if refill.interval().is_zero() {
            return Err(PolicyError::ZeroRefillInterval);
        }
        Ok(Policy { refill, burst })
    }

    /// Time needed to regenerate one token.
    pub fn refill_interval(&self) -> Duration {
        self.refill.interval()
    }

    /// Maximum number of tokens a bucket can hold.
    pub fn burst(&self) -> u32 {
        self.burst
    }
}

/// Errors produced when constructing an admission [`Policy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyError {
    /// Burst capacity must be at least one token
    ZeroBurst,
    /// The refill interval must be a positive duration
    ZeroRefillInterval,
}

impl fmt::Display for PolicyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyError::ZeroBurst => write!(f, "burst capacity must be at least 1"),
            PolicyError::ZeroRefillInterval => write!(f, "refill interval must be positive"),
        }
    }
}

impl Error for PolicyError {}
