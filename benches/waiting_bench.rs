use criterion::{black_box, criterion_group, criterion_main, Criterion};
use riichi_engine::meld::counts_from_codes;
use riichi_engine::{MeldDecomposer, WaitingAnalyzer};

fn bench_waiting_two_side(c: &mut Criterion) {
    // 两面等 1s/4s
    let counts = counts_from_codes("123m456m789m23s55s").unwrap();

    c.bench_function("waiting_two_side", |b| {
        let mut decomposer = MeldDecomposer::new();
        b.iter(|| {
            black_box(WaitingAnalyzer::waiting_set(
                &mut decomposer,
                black_box(&counts),
                0,
            ));
        });
    });
}

fn bench_waiting_nine_gates(c: &mut Criterion) {
    // 九莲形：九面等，最重的听牌分析
    let counts = counts_from_codes("1112345678999m").unwrap();

    c.bench_function("waiting_nine_gates", |b| {
        let mut decomposer = MeldDecomposer::new();
        b.iter(|| {
            black_box(WaitingAnalyzer::waiting_set(
                &mut decomposer,
                black_box(&counts),
                0,
            ));
        });
    });
}

fn bench_waiting_none(c: &mut Criterion) {
    // 完全不成形的 13 张
    let counts = counts_from_codes("147m258p369sESWN").unwrap();

    c.bench_function("waiting_none", |b| {
        let mut decomposer = MeldDecomposer::new();
        b.iter(|| {
            black_box(WaitingAnalyzer::is_waiting(
                &mut decomposer,
                black_box(&counts),
                0,
            ));
        });
    });
}

fn bench_waiting_with_declared_melds(c: &mut Criterion) {
    // 两副露后的 7 张暗牌
    let counts = counts_from_codes("234m67p55s").unwrap();

    c.bench_function("waiting_with_declared_melds", |b| {
        let mut decomposer = MeldDecomposer::new();
        b.iter(|| {
            black_box(WaitingAnalyzer::waiting_set(
                &mut decomposer,
                black_box(&counts),
                2,
            ));
        });
    });
}

criterion_group!(
    benches,
    bench_waiting_two_side,
    bench_waiting_nine_gates,
    bench_waiting_none,
    bench_waiting_with_declared_melds
);
criterion_main!(benches);
