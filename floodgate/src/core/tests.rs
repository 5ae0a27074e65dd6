use super::{Policy, PolicyError, Rate, RateLimiter, TokenBucket};
use std::time::{Duration, SystemTime};

fn policy(refill: Duration, burst: u32) -> Policy {
    Policy::new(Rate::new(refill), burst).unwrap()
}

#[test]
fn test_capacity_bound() {
    let mut limiter = RateLimiter::new(policy(Duration::from_secs(1), 3));

    // A fresh bucket admits exactly its burst capacity at once
    let now = SystemTime::now();
    for i in 0..3 {
        assert!(
            limiter.check("capacity_test", now),
            "request {} should be admitted",
            i + 1
        );
    }
    assert!(!limiter.check("capacity_test", now));
}

#[test]
fn test_refill_after_one_interval() {
    let mut limiter = RateLimiter::new(policy(Duration::from_secs(1), 1));

    let now = SystemTime::now();
    assert!(limiter.check("refill_test", now));
    assert!(!limiter.check("refill_test", now));

    // Exactly one interval later a single token is back
    let later = now + Duration::from_secs(1);
    assert!(limiter.check("refill_test", later));
    assert!(!limiter.check("refill_test", later));
}

#[test]
fn test_no_refill_before_interval_elapses() {
    let mut limiter = RateLimiter::new(policy(Duration::from_secs(1), 1));

    let now = SystemTime::now();
    assert!(limiter.check("early_test", now));
    assert!(!limiter.check("early_test", now + Duration::from_millis(999)));
}

#[test]
fn test_fractional_accrual_accumulates() {
    let mut limiter = RateLimiter::new(policy(Duration::from_secs(1), 1));

    let now = SystemTime::now();
    assert!(limiter.check("fractional_test", now));

    // Half a token after half an interval, a full one after two halves
    assert!(!limiter.check("fractional_test", now + Duration::from_millis(500)));
    assert!(limiter.check("fractional_test", now + Duration::from_millis(1000)));
}

#[test]
fn test_refill_caps_at_capacity() {
    let mut limiter = RateLimiter::new(policy(Duration::from_secs(1), 2));

    let now = SystemTime::now();
    assert!(limiter.check("cap_test", now));

    // A long idle stretch refills to capacity, never beyond it
    let later = now + Duration::from_secs(100);
    assert!(limiter.check("cap_test", later));
    assert!(limiter.check("cap_test", later));
    assert!(!limiter.check("cap_test", later));
}

#[test]
fn test_keys_are_isolated() {
    let mut limiter = RateLimiter::new(policy(Duration::from_secs(60), 1));

    let now = SystemTime::now();
    assert!(limiter.check("key_a", now));
    assert!(!limiter.check("key_a", now));

    // Exhausting key_a leaves key_b untouched
    assert!(limiter.check("key_b", now));
}

#[test]
fn test_lookup_is_idempotent() {
    let mut limiter = RateLimiter::new(policy(Duration::from_secs(1), 5));

    let now = SystemTime::now();
    limiter.check("same_key", now);
    limiter.check("same_key", now);
    limiter.check("same_key", now + Duration::from_millis(10));

    assert_eq!(limiter.len(), 1);
    assert!(limiter.contains("same_key"));
}

#[test]
fn test_idle_buckets_are_swept() {
    let mut limiter = RateLimiter::builder(policy(Duration::from_secs(1), 2))
        .sweep_interval(Duration::from_secs(60))
        .idle_timeout(Duration::from_secs(300))
        .build();

    let now = SystemTime::now();
    limiter.check("old_key", now);
    assert_eq!(limiter.len(), 1);

    // Beyond the idle timeout the next check sweeps the stale entry
    let later = now + Duration::from_secs(400);
    assert!(limiter.check("new_key", later));
    assert!(!limiter.contains("old_key"));
    assert_eq!(limiter.len(), 1);
    assert_eq!(limiter.swept_total(), 1);
}

#[test]
fn test_active_buckets_survive_sweep() {
    let mut limiter = RateLimiter::builder(policy(Duration::from_secs(1), 2))
        .sweep_interval(Duration::from_secs(60))
        .idle_timeout(Duration::from_secs(300))
        .build();

    let now = SystemTime::now();
    limiter.check("busy_key", now);
    limiter.check("busy_key", now + Duration::from_secs(200));

    // Touched 100s ago when the sweep runs, well within the idle timeout
    limiter.check("other_key", now + Duration::from_secs(300));
    assert!(limiter.contains("busy_key"));
    assert_eq!(limiter.swept_total(), 0);
}

#[test]
fn test_evicted_key_starts_full_again() {
    let mut limiter = RateLimiter::builder(policy(Duration::from_secs(3600), 2))
        .sweep_interval(Duration::from_secs(60))
        .idle_timeout(Duration::from_secs(300))
        .build();

    let now = SystemTime::now();
    assert!(limiter.check("returning_key", now));
    assert!(limiter.check("returning_key", now));
    assert!(!limiter.check("returning_key", now));

    // With an hour-long refill the bucket would still be empty; eviction
    // hands the returning key a fresh, full bucket instead
    let later = now + Duration::from_secs(400);
    assert!(limiter.check("returning_key", later));
    assert!(limiter.check("returning_key", later));
    assert_eq!(limiter.swept_total(), 1);
}

#[test]
fn test_clock_backwards_is_harmless() {
    let mut limiter = RateLimiter::new(policy(Duration::from_secs(1), 2));

    let now = SystemTime::now();
    assert!(limiter.check("clock_test", now));

    // An earlier timestamp accrues nothing but still spends real tokens
    let earlier = now - Duration::from_secs(10);
    assert!(limiter.check("clock_test", earlier));
    assert!(!limiter.check("clock_test", earlier));
}

#[test]
fn test_bucket_starts_full_and_counts_down() {
    let p = policy(Duration::from_secs(1), 4);
    let now = SystemTime::now();
    let mut bucket = TokenBucket::new(&p, now);

    assert_eq!(bucket.available(), 4.0);
    assert!(bucket.try_admit(now));
    assert_eq!(bucket.available(), 3.0);
}

#[test]
fn test_rejection_leaves_tokens_unchanged() {
    let p = policy(Duration::from_secs(1), 1);
    let now = SystemTime::now();
    let mut bucket = TokenBucket::new(&p, now);

    assert!(bucket.try_admit(now));
    let before = bucket.available();
    assert!(!bucket.try_admit(now));
    assert_eq!(bucket.available(), before);
}

#[test]
fn test_policy_rejects_zero_burst() {
    let result = Policy::new(Rate::new(Duration::from_secs(1)), 0);
    assert_eq!(result.unwrap_err(), PolicyError::ZeroBurst);
}

#[test]
fn test_policy_rejects_zero_refill_interval() {
    let result = Policy::new(Rate::new(Duration::ZERO), 5);
    assert_eq!(result.unwrap_err(), PolicyError::ZeroRefillInterval);
}

#[test]
fn test_policy_accessors() {
    let p = policy(Duration::from_millis(250), 8);
    assert_eq!(p.refill_interval(), Duration::from_millis(250));
    assert_eq!(p.burst(), 8);
}
