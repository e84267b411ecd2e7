use chrono::{TimeDelta, TimeZone};
use chrono_tz::Europe::Madrid;
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use tatwa_engine::{cycle_schedule, tatwa_interval};

fn interval_bench(c: &mut Criterion) {
    let event = Madrid.with_ymd_and_hms(2024, 6, 21, 6, 0, 0).unwrap();
    let query = event + TimeDelta::seconds(1500);

    let mut group = c.benchmark_group("interval");
    group.bench_function("tatwa_interval", |b| {
        b.iter(|| tatwa_interval(black_box(event), black_box(query)))
    });
    group.bench_function("cycle_schedule", |b| b.iter(|| cycle_schedule(black_box(event))));
    group.finish();
}

criterion_group!(benches, interval_bench);
criterion_main!(benches);
