//! # Floodgate Server
//!
//! Per-IP admission control for HTTP services.
//!
//! ## Purpose
//!
//! Floodgate sits in front of an upstream handler and throttles each client
//! with its own token bucket. Clients inside their allowance never notice it;
//! clients exceeding it receive `429 Too Many Requests` until their bucket
//! refills. Requests that cannot be attributed to any client at all are
//! answered with `400 Bad Request`.
//!
//! ## Quick Start
//!
//! ```bash
//! # Allow bursts of 20, refilling one request per second
//! floodgate --port 8080
//!
//! # Tighter policy: bursts of 5, one request per 200ms
//! floodgate --port 8080 --burst 5 --refill-ms 200
//!
//! # List all environment variables
//! floodgate --list-env-vars
//! ```
//!
//! Exercise it:
//!
//! ```bash
//! curl -i http://localhost:8080/                # 200 until the bucket drains
//! curl -i -H "X-Forwarded-For: 203.0.113.7" \
//!     http://localhost:8080/                    # throttled separately
//! curl http://localhost:8080/metrics            # Prometheus text format
//! ```
//!
//! ## How It Works
//!
//! Each client identifier (the `X-Forwarded-For` header when present,
//! otherwise the peer IP) owns a token bucket holding up to `--burst`
//! tokens, regenerating one every `--refill-ms`. An admitted request
//! consumes a token; an empty bucket means 429. Buckets idle for longer
//! than `--idle-timeout` are swept away, so memory stays proportional to
//! the set of recently active clients.
//!
//! ## Architecture
//!
//! The registry is owned by a single actor task; the middleware running on
//! every connection talks to it over a channel, which serializes all bucket
//! access without locks:
//!
//! ```text
//! ┌────────────┐   ┌────────────┐   ┌────────────┐
//! │  request   │   │  request   │   │  request   │
//! │ middleware │   │ middleware │   │ middleware │
//! └─────┬──────┘   └─────┬──────┘   └─────┬──────┘
//!       └────────────────┼────────────────┘
//!                  ┌─────▼─────┐
//!                  │   Actor   │
//!                  │ (registry │
//!                  │  owner)   │
//!                  └─────┬─────┘
//!                  ┌─────▼─────┐
//!                  │  Limiter  │
//!                  │  buckets  │
//!                  └───────────┘
//! ```
//!
//! ## Endpoints
//!
//! - `/` - guarded demo upstream (replace with your own routes)
//! - `/health` - liveness probe, never throttled
//! - `/metrics` - Prometheus text format, never throttled

pub mod actor;
pub mod config;
pub mod metrics;
pub mod middleware;
pub mod routes;
