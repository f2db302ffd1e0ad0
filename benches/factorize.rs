use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use esa_matchfinder::Session;

fn make_block(len: usize) -> Vec<u8> {
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

fn bench_factorize(c: &mut Criterion) {
    let mut group = c.benchmark_group("factorize");
    for &len in &[4 * 1024usize, 64 * 1024] {
        let block = make_block(len);
        let mut session = Session::new(block.len(), 4, 64).unwrap();
        session.parse(&block).unwrap();

        group.bench_with_input(BenchmarkId::new("find_all_matches", len), &block, |b, block| {
            b.iter(|| {
                session.rewind(0).unwrap();
                let mut out = Vec::new();
                for _ in 0..block.len() {
                    session.find_all_matches(&mut out);
                    black_box(&out);
                }
            })
        });

        group.bench_with_input(BenchmarkId::new("find_best_match", len), &block, |b, block| {
            b.iter(|| {
                session.rewind(0).unwrap();
                for _ in 0..block.len() {
                    black_box(session.find_best_match());
                }
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_factorize);
criterion_main!(benches);
