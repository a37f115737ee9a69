#![allow(missing_docs, unused_crate_dependencies)]

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use cube_core::{CubieStore, ScrambleParams};

fn criterion_benchmark(c: &mut Criterion) {
    for len in [1000, 100, 20] {
        let params = ScrambleParams::with_seed(len, "bench");

        c.bench_with_input(
            BenchmarkId::new("generate_scramble", len),
            &params,
            |b, params| b.iter(|| params.generate()),
        );

        let moves = params.generate();
        c.bench_with_input(
            BenchmarkId::new("apply_scramble", len),
            &moves,
            |b, moves| b.iter(|| CubieStore::new().do_moves(moves.iter().copied())),
        );
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
