//! # Floodgate
//!
//! Per-client token bucket rate limiting primitives.
//!
//! ## Overview
//!
//! Floodgate tracks one token bucket per client identifier (typically an IP
//! address) and answers, per request, whether one more unit of work is
//! admissible right now:
//! - **Burst tolerance**: a full bucket admits up to `burst` requests at once
//! - **Continuous refill**: tokens accrue at one per refill interval, with
//!   fractional accrual between requests
//! - **Bounded memory**: buckets idle for too long are swept away
//!
//! ## Quick Start
//!
//! ```
//! use floodgate::{Policy, Rate, RateLimiter};
//! use std::time::SystemTime;
//!
//! // One token every 100ms, bursts of up to 20 requests
//! let policy = Policy::new(Rate::per_second(10), 20)?;
//! let mut limiter = RateLimiter::new(policy);
//!
//! if limiter.check("203.0.113.7", SystemTime::now()) {
//!     // forward the request
//! } else {
//!     // reject with 429
//! }
//! # Ok::<(), floodgate::PolicyError>(())
//! ```
//!
//! ## Guarantees
//!
//! Over any interval of length `T`, a single key is admitted at most
//! `burst + T / refill_interval` times. A previously unseen key starts with a
//! full bucket, so the first `burst` requests always pass.
//!
//! ## Eviction
//!
//! The registry never grows without bound: on a configurable cadence it drops
//! buckets that have not been touched for longer than the idle timeout. An
//! evicted key is indistinguishable from a new one: its next bucket starts
//! full again.
//!
//! ```
//! use floodgate::{Policy, Rate, RateLimiter};
//! use std::time::Duration;
//!
//! let limiter = RateLimiter::builder(Policy::new(Rate::per_second(5), 10)?)
//!     .capacity(100_000)
//!     .idle_timeout(Duration::from_secs(600))
//!     .sweep_interval(Duration::from_secs(60))
//!     .build();
//! # Ok::<(), floodgate::PolicyError>(())
//! ```
//!
//! ## Thread Safety
//!
//! The limiter is not thread-safe by itself. Share it behind a mutex, or give
//! it to a single owning task and talk to that task over a channel:
//!
//! ```
//! use std::sync::{Arc, Mutex};
//! use floodgate::{Policy, Rate, RateLimiter};
//!
//! let policy = Policy::new(Rate::per_second(10), 20).unwrap();
//! let limiter = Arc::new(Mutex::new(RateLimiter::new(policy)));
//! ```
//!
//! ## Features
//!
//! - `ahash` (default): Use AHash for faster hashing

pub mod core;

pub use core::{Policy, PolicyError, Rate, RateLimiter, RateLimiterBuilder, TokenBucket};
