// Draw throughput for each table size.

use std::hint::black_box;

use bsd_random::Generator;
use criterion::{Criterion, criterion_group, criterion_main};

fn bench_next_random(c: &mut Criterion) {
    let mut group = c.benchmark_group("next_random");
    for byte_size in [8usize, 32, 64, 128, 256] {
        let mut rng = Generator::new();
        rng.install_state(1, vec![0; byte_size / 4], byte_size)
            .unwrap();
        group.bench_function(format!("{byte_size}_bytes"), |b| {
            b.iter(|| black_box(rng.next_random()))
        });
    }
    group.finish();
}

fn bench_seed(c: &mut Criterion) {
    let mut rng = Generator::new();
    rng.install_state(1, vec![0; 64], 256).unwrap();
    c.bench_function("seed_63_words", |b| b.iter(|| rng.seed(black_box(12345))));
}

criterion_group!(benches, bench_next_random, bench_seed);
criterion_main!(benches);
