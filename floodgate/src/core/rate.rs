//! Refill rate specification
//!
//! This module provides the [`Rate`] type which converts human-friendly rate
//! specifications (e.g., "10 requests per second") into the interval needed
//! to regenerate exactly one token.

use std::time::Duration;

/// Rate defines the token regeneration interval for the limiter
///
/// The `Rate` type represents how frequently a bucket earns one token back.
/// It encapsulates the concept of "N requests per time period" as a duration
/// between consecutive token refills.
///
/// # Examples
///
/// ```
/// use floodgate::Rate;
/// use std::time::Duration;
///
/// // 10 requests per second
/// let rate = Rate::per_second(10);
/// assert_eq!(rate.interval(), Duration::from_millis(100));
///
/// // 60 requests per minute (1 per second)
/// let rate = Rate::per_minute(60);
/// assert_eq!(rate.interval(), Duration::from_secs(1));
///
/// // Custom rate: 1 request every 2.5 seconds
/// let rate = Rate::new(Duration::from_millis(2500));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rate {
    interval: Duration,
}

impl Rate {
    /// Creates a rate with a custom interval between token refills
    pub fn new(interval: Duration) -> Self {
        Rate { interval }
    }

    /// Creates a rate of n requests per second
    ///
    /// `n` must be non-zero.
    pub fn per_second(n: u32) -> Self {
        Rate {
            interval: Duration::from_secs(1) / n,
        }
    }

    /// Creates a rate of n requests per minute
    ///
    /// `n` must be non-zero.
    pub fn per_minute(n: u32) -> Self {
        Rate {
            interval: Duration::from_secs(60) / n,
        }
    }

    /// The time needed to regenerate one token
    pub fn interval(&self) -> Duration {
        self.interval
    }
}
