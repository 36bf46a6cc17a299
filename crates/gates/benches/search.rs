//! Benchmarks for the merge search
#![expect(missing_docs)]
#![allow(unused_crate_dependencies)]

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use xorshare_gates::{CircuitState, GainTable, Optimizer, exhaustive_min_gates};

const NARROW: [u16; 8] = [0xE, 0x7, 0xB, 0xD, 0x3, 0x5, 0x6, 0xF];
const WIDE: [u16; 6] = [0x3C, 0x0F, 0xF0, 0x66, 0x99, 0x5A];

fn bench_optimize(c: &mut Criterion) {
    let optimizer = Optimizer::new();

    c.bench_function("optimize_narrow", |b| {
        b.iter(|| {
            let mut state = CircuitState::new(black_box(&NARROW));
            optimizer.optimize(&mut state);
            black_box(state.gates());
        });
    });

    c.bench_function("optimize_wide", |b| {
        b.iter(|| {
            let mut state = CircuitState::new(black_box(&WIDE));
            optimizer.optimize(&mut state);
            black_box(state.gates());
        });
    });
}

fn bench_exhaustive(c: &mut Criterion) {
    let gains = GainTable::shared();
    c.bench_function("exhaustive_narrow", |b| {
        b.iter(|| black_box(exhaustive_min_gates(black_box(&NARROW), gains)));
    });
}

criterion_group!(benches, bench_optimize, bench_exhaustive);
criterion_main!(benches);
