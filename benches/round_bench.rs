use criterion::{black_box, criterion_group, criterion_main, Criterion};
use riichi_engine::{
    ActionMask, ClaimResponse, PrivateAction, Round, RoundConfig, RoundPhase,
};

/// 固定策略跑完一局：行动者打第一张合法牌，响应座位能荣则荣、否则过
fn play_out(seed: u64) -> Round {
    let mut round = Round::new(RoundConfig {
        seed: Some(seed),
        ..RoundConfig::default()
    });
    loop {
        let phase = round.phase().clone();
        match phase {
            RoundPhase::Private { seat } => {
                let mask = ActionMask::generate(&mut round, seat);
                if mask.can_tsumo {
                    round
                        .submit_private(seat, PrivateAction::Tsumo)
                        .expect("masked tsumo");
                    continue;
                }
                let tile = mask.can_discard[0];
                round
                    .submit_private(seat, PrivateAction::Discard { tile })
                    .expect("masked discard");
            }
            RoundPhase::Public {
                discarder,
                responses,
                ..
            } => {
                for seat in 0..4u8 {
                    if seat == discarder || responses[seat as usize].is_some() {
                        continue;
                    }
                    let mask = ActionMask::generate(&mut round, seat);
                    let response = if mask.can_ron {
                        ClaimResponse::Ron
                    } else {
                        ClaimResponse::Pass
                    };
                    round.submit_claim(seat, response).expect("masked response");
                }
            }
            RoundPhase::Over { .. } => return round,
        }
    }
}

fn bench_round_deal(c: &mut Criterion) {
    c.bench_function("round_deal", |b| {
        b.iter(|| {
            black_box(Round::new(RoundConfig {
                seed: Some(7),
                ..RoundConfig::default()
            }));
        });
    });
}

fn bench_round_play_out(c: &mut Criterion) {
    c.bench_function("round_play_out", |b| {
        b.iter(|| {
            black_box(play_out(black_box(7)));
        });
    });
}

fn bench_action_masks(c: &mut Criterion) {
    let mut round = Round::new(RoundConfig {
        seed: Some(7),
        ..RoundConfig::default()
    });

    c.bench_function("action_masks", |b| {
        b.iter(|| {
            black_box(round.action_masks());
        });
    });
}

criterion_group!(
    benches,
    bench_round_deal,
    bench_round_play_out,
    bench_action_masks
);
criterion_main!(benches);
