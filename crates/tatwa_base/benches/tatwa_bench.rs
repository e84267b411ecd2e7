use criterion::{Criterion, black_box, criterion_group, criterion_main};
use tatwa_base::{Tatwa, TatwaName};

fn tatwa_bench(c: &mut Criterion) {
    let named = Tatwa::from(TatwaName::Teja);
    let positioned = Tatwa::by_position(1_234).unwrap();

    let mut group = c.benchmark_group("tatwa");
    group.bench_function("by_name", |b| b.iter(|| Tatwa::by_name(black_box(" Prithvi "))));
    group.bench_function("named_add", |b| b.iter(|| named.checked_add(black_box(-17))));
    group.bench_function("positioned_add", |b| {
        b.iter(|| positioned.checked_add(black_box(42)))
    });
    group.bench_function("distance_to_name", |b| {
        b.iter(|| positioned.distance_to(black_box("vayu")))
    });
    group.finish();
}

criterion_group!(benches, tatwa_bench);
criterion_main!(benches);
