//! Per-key bucket registry with idle eviction

use super::{Policy, TokenBucket};
use std::time::{Duration, SystemTime};

#[cfg(feature = "ahash")]
use ahash::AHashMap as HashMap;
#[cfg(not(feature = "ahash"))]
use std::collections::HashMap;

// Configuration constants
const DEFAULT_CAPACITY: usize = 1000;
const CAPACITY_OVERHEAD_FACTOR: f64 = 1.3;
const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 60;
const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 300;

/// Keyed token-bucket rate limiter.
///
/// Owns one [`TokenBucket`] per client identifier. A bucket is created on
/// first sight of its key (starting full) and dropped again once the key has
/// been idle for longer than the configured timeout. The sweep piggybacks on
/// [`check`](RateLimiter::check) calls, so an otherwise idle limiter holds
/// its entries but performs no work.
///
/// The limiter owns its buckets exclusively (`&mut self` API); callers that
/// share it across threads serialize access, which also makes the
/// check-then-insert path for novel keys atomic.
///
/// # Example
///
/// ```
/// use floodgate::{Policy, Rate, RateLimiter};
/// use std::time::SystemTime;
///
/// let policy = Policy::new(Rate::per_second(2), 3)?;
/// let mut limiter = RateLimiter::new(policy);
///
/// // A fresh key starts with a full bucket
/// assert!(limiter.check("198.51.100.4", SystemTime::now()));
/// # Ok::<(), floodgate::PolicyError>(())
/// ```
pub struct RateLimiter {
    policy: Policy,
    buckets: HashMap<String, TokenBucket>,
    // Idle eviction
    idle_timeout: Duration,
    sweep_interval: Duration,
    next_sweep: SystemTime,
    swept_total: u64,
}

/// Builder for configuring a [`RateLimiter`]
///
/// # Example
///
/// ```
/// use floodgate::{Policy, Rate, RateLimiter};
/// use std::time::Duration;
///
/// let limiter = RateLimiter::builder(Policy::new(Rate::per_second(10), 20)?)
///     .capacity(100_000)
///     .idle_timeout(Duration::from_secs(600))
///     .sweep_interval(Duration::from_secs(120))
///     .build();
/// # Ok::<(), floodgate::PolicyError>(())
/// ```
pub struct RateLimiterBuilder {
    policy: Policy,
    capacity: usize,
    idle_timeout: Duration,
    sweep_interval: Duration,
}

impl RateLimiter {
    /// Create a limiter with default capacity and eviction settings.
    pub fn new(policy: Policy) -> Self {
        Self::builder(policy).build()
    }

    /// Create a builder for fine-grained configuration.
    pub fn builder(policy: Policy) -> RateLimiterBuilder {
        RateLimiterBuilder {
            policy,
            capacity: DEFAULT_CAPACITY,
            idle_timeout: Duration::from_secs(DEFAULT_IDLE_TIMEOUT_SECS),
            sweep_interval: Duration::from_secs(DEFAULT_SWEEP_INTERVAL_SECS),
        }
    }

    fn with_config(
        policy: Policy,
        capacity: usize,
        idle_timeout: Duration,
        sweep_interval: Duration,
    ) -> Self {
        RateLimiter {
            policy,
            // Pre-allocate with overhead to avoid rehashing
            buckets: HashMap::with_capacity((capacity as f64 * CAPACITY_OVERHEAD_FACTOR) as usize),
            idle_timeout,
            sweep_interval,
            next_sweep: SystemTime::now() + sweep_interval,
            swept_total: 0,
        }
    }

    /// Admit or reject one request for `key`.
    ///
    /// Looks up the key's bucket, lazily creating a full one on first sight,
    /// and consumes a token when one is available. At most one bucket ever
    /// exists per key.
    pub fn check(&mut self, key: &str, now: SystemTime) -> bool {
        self.maybe_sweep(now);

        match self.buckets.get_mut(key) {
            Some(bucket) => bucket.try_admit(now),
            None => {
                let mut bucket = TokenBucket::new(&self.policy, now);
                let admitted = bucket.try_admit(now);
                self.buckets.insert(key.to_string(), bucket);
                admitted
            }
        }
    }

    /// Number of keys currently tracked.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Whether no keys are currently tracked.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Whether `key` currently has a bucket.
    pub fn contains(&self, key: &str) -> bool {
        self.buckets.contains_key(key)
    }

    /// Total buckets evicted over the limiter's lifetime.
    pub fn swept_total(&self) -> u64 {
        self.swept_total
    }

    /// The admission policy applied to every bucket.
    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    fn maybe_sweep(&mut self, now: SystemTime) {
        if now < self.next_sweep {
            return;
        }
        let before = self.buckets.len();
        let idle_timeout = self.idle_timeout;
        self.buckets.retain(|_, bucket| {
            // Keep entries the clock cannot order (backwards step).
            now.duration_since(bucket.last_touched())
                .map(|idle| idle <= idle_timeout)
                .unwrap_or(true)
        });
        self.swept_total += (before - self.buckets.len()) as u64;
        self.next_sweep = now + self.sweep_interval;
    }
}

impl RateLimiterBuilder {
    /// Set the expected number of unique keys.
    ///
    /// The map pre-allocates 30% more space to reduce hash collisions.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Set how long a key may stay untouched before its bucket is dropped.
    pub fn idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    /// Set the interval between eviction sweeps.
    ///
    /// Shorter intervals mean tighter memory bounds but more frequent full
    /// scans of the key map.
    pub fn sweep_interval(mut self, sweep_interval: Duration) -> Self {
        self.sweep_interval = sweep_interval;
        self
    }

    /// Build the limiter with the configured settings.
    pub fn build(self) -> RateLimiter {
        RateLimiter::with_config(
            self.policy,
            self.capacity,
            self.idle_timeout,
            self.sweep_interval,
        )
    }
}
