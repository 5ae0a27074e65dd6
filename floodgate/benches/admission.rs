use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use floodgate::{Policy, Rate, RateLimiter};
use std::hint::black_box;
use std::time::{Duration, SystemTime};

fn benchmark_admission(c: &mut Criterion) {
    let mut group = c.benchmark_group("admission");
    group.throughput(Throughput::Elements(1));
    group.measurement_time(Duration::from_secs(10));

    group.bench_function("single_key_allowed", |b| {
        let policy = Policy::new(Rate::per_second(1_000_000), 1_000_000).unwrap();
        let mut limiter = RateLimiter::new(policy);

        b.iter(|| {
            let admitted = limiter.check(black_box("198.51.100.4"), black_box(SystemTime::now()));
            black_box(admitted)
        });
    });

    group.bench_function("rotating_keys_100", |b| {
        let policy = Policy::new(Rate::per_second(1000), 100).unwrap();
        let mut limiter = RateLimiter::new(policy);
        let mut counter = 0u64;

        b.iter(|| {
            let key = format!("10.0.0.{}", counter % 100);
            counter += 1;

            let admitted = limiter.check(black_box(&key), black_box(SystemTime::now()));
            black_box(admitted)
        });
    });

    group.bench_function("exhausted_key_denied", |b| {
        let policy = Policy::new(Rate::new(Duration::from_secs(3600)), 1).unwrap();
        let mut limiter = RateLimiter::new(policy);
        let now = SystemTime::now();
        limiter.check("203.0.113.9", now);

        b.iter(|| {
            let admitted = limiter.check(black_box("203.0.113.9"), black_box(now));
            black_box(admitted)
        });
    });

    group.finish();
}

criterion_group!(benches, benchmark_admission);
criterion_main!(benches);
