use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use esa_matchfinder::Session;

fn make_block(len: usize) -> Vec<u8> {
    // A few repeated motifs of varying period so the tree has real internal
    // structure instead of degenerating to all-literal or all-one-run input.
    let motifs: [&[u8]; 3] = [b"the quick brown fox ", b"jumps over the lazy dog ", b"ab"];
    let mut out = Vec::with_capacity(len);
    let mut i = 0;
    while out.len() < len {
        out.extend_from_slice(motifs[i % motifs.len()]);
        i += 1;
    }
    out.truncate(len);
    out
}

fn bench_build_tree(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_tree");
    for &len in &[4 * 1024usize, 64 * 1024, 1024 * 1024] {
        let block = make_block(len);
        for &workers in &[1usize, 4] {
            group.bench_with_input(
                BenchmarkId::new(format!("workers_{workers}"), len),
                &block,
                |b, block| {
                    b.iter(|| {
                        let mut session = Session::new_parallel(block.len(), 4, 64, workers).unwrap();
                        session.parse(black_box(block)).unwrap();
                        black_box(session.block_size());
                    })
                },
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_build_tree);
criterion_main!(benches);
