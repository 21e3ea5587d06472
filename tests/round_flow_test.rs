//! 对局全流程集成测试
//!
//! 从发牌一路驱动到终局：轮转次序、鸣牌移权、荒牌流局结算。

use riichi_engine::{
    ActionMask, ActionOutcome, ClaimResponse, Hand, PrivateAction, Round, RoundConfig,
    RoundOutcome, RoundPhase, Tile, TileKind,
};

fn seeded_round(seed: u64) -> Round {
    Round::new(RoundConfig {
        seed: Some(seed),
        ..RoundConfig::default()
    })
}

fn tile(code: &str) -> Tile {
    code.parse().unwrap()
}

fn set_hand(round: &mut Round, seat: u8, codes: &str) {
    round.seats[seat as usize].hand = Hand::from_codes(codes).unwrap();
}

/// 推进一步：行动者按掩码打第一张可打牌，其余座位全过
///
/// 返回对局是否仍在进行。
fn step_all_pass(round: &mut Round) -> bool {
    match round.phase().clone() {
        RoundPhase::Private { seat } => {
            let mask = ActionMask::generate(round, seat);
            let tile = mask.can_discard[0];
            round
                .submit_private(seat, PrivateAction::Discard { tile })
                .unwrap();
            true
        }
        RoundPhase::Public {
            discarder,
            responses,
            ..
        } => {
            for seat in 0..4u8 {
                if seat != discarder && responses[seat as usize].is_none() {
                    round.submit_claim(seat, ClaimResponse::Pass).unwrap();
                }
            }
            true
        }
        RoundPhase::Over { .. } => false,
    }
}

#[test]
fn test_full_round_reaches_exhaustive_draw() {
    let mut round = seeded_round(3);

    // 全员只弃牌不鸣牌，活牌摸空后必然荒牌流局
    let mut steps = 0;
    while step_all_pass(&mut round) {
        steps += 1;
        assert!(steps < 2_000, "round did not finish within the step limit");
    }

    let result = round.result().unwrap();
    assert!(matches!(result.outcome, RoundOutcome::ExhaustiveDraw { .. }));
    assert_eq!(round.wall().live_remaining(), 0);
    assert_eq!(result.deltas.iter().sum::<i32>(), 0);

    // 无人立直时总点数不变
    let total: i32 = round.seats.iter().map(|seat| seat.score).sum();
    assert_eq!(total, 100_000);
}

#[test]
fn test_turn_rotation_order() {
    let mut round = seeded_round(5);

    // 连续全过时行动权按座位号循环，第五手回到庄家
    let mut actors = Vec::new();
    while actors.len() < 5 {
        if let RoundPhase::Private { seat } = *round.phase() {
            actors.push(seat);
        }
        assert!(step_all_pass(&mut round));
    }
    assert_eq!(actors, vec![0, 1, 2, 3, 0]);
}

#[test]
fn test_claim_transfers_turn_without_draw() {
    let mut round = seeded_round(7);
    set_hand(&mut round, 0, "123456789m555p1s");
    round.seats[0].drawn = Some(tile("C"));
    set_hand(&mut round, 2, "1155m19p19sESWNC");
    let drawn_before = round.wall().drawn_count();

    // 1. 庄家打 5m，开启鸣牌窗口
    let outcome = round
        .submit_private(0, PrivateAction::Discard { tile: tile("5m") })
        .unwrap();
    assert_eq!(outcome, ActionOutcome::WindowOpened);

    // 2. 其余座位响应，仅 2 号碰
    assert_eq!(
        round.submit_claim(1, ClaimResponse::Pass),
        Ok(ActionOutcome::Waiting)
    );
    assert_eq!(
        round.submit_claim(3, ClaimResponse::Pass),
        Ok(ActionOutcome::Waiting)
    );
    assert_eq!(
        round.submit_claim(2, ClaimResponse::Pong),
        Ok(ActionOutcome::ClaimResolved { seat: 2 })
    );

    // 3. 行动权移交鸣牌者且不摸牌
    assert_eq!(*round.phase(), RoundPhase::Private { seat: 2 });
    assert_eq!(round.wall().drawn_count(), drawn_before);
    assert!(round.seats[2].drawn.is_none());
    assert_eq!(round.seats[2].melds.len(), 1);
    assert!(round.seats[2].melds[0].contains_face(tile("5m").face()));
    assert!(!round.seats[2].melds[0].concealed());
    assert_eq!(round.seats[2].normalized_count(), 14);

    // 4. 鸣牌者弃牌后回到 13 张规范数
    round
        .submit_private(2, PrivateAction::Discard { tile: tile("1m") })
        .unwrap();
    assert_eq!(round.seats[2].normalized_count(), 13);
}

#[test]
fn test_waiting_query_is_empty_before_claim_discard() {
    let mut round = seeded_round(7);
    set_hand(&mut round, 0, "123456789m555p1s");
    round.seats[0].drawn = Some(tile("C"));
    set_hand(&mut round, 2, "55m234p567p88s123s");

    round
        .submit_private(0, PrivateAction::Discard { tile: tile("5m") })
        .unwrap();
    round.submit_claim(1, ClaimResponse::Pass).unwrap();
    round.submit_claim(3, ClaimResponse::Pass).unwrap();
    round.submit_claim(2, ClaimResponse::Pong).unwrap();

    // 鸣牌后待打的 14 张形态下查询返回空集
    assert_eq!(*round.phase(), RoundPhase::Private { seat: 2 });
    assert!(!round.waiting(2).is_waiting());

    // 打出一张回到 13 张规范形态后查询恢复正常
    round
        .submit_private(2, PrivateAction::Discard { tile: tile("8s") })
        .unwrap();
    let waits = round.waiting(2);
    assert!(waits.contains(TileKind::Sou(8)));
}

#[test]
fn test_exhaustive_draw_waiting_settlement() {
    let mut round = seeded_round(11);

    // 1. 驱动到最后一张活牌已摸、尚未打出的时刻
    loop {
        if round.wall().live_remaining() == 0 {
            break;
        }
        assert!(step_all_pass(&mut round));
    }
    let actor = match *round.phase() {
        RoundPhase::Private { seat } => seat,
        ref phase => panic!("unexpected phase: {:?}", phase),
    };

    // 2. 改写手牌制造确定的听牌分布：0/1 听牌，2/3 不听
    set_hand(&mut round, 0, "123m456m789m23s55s");
    set_hand(&mut round, 1, "123m456m789m23s55s");
    set_hand(&mut round, 2, "147m258p369sESWN");
    set_hand(&mut round, 3, "147m258p369sESWN");
    round.seats[actor as usize].drawn = Some(tile("C"));
    assert_eq!(
        round.waiting(0).faces(),
        vec![TileKind::Sou(1), TileKind::Sou(4)]
    );
    assert!(round.waiting(3).is_empty());

    // 3. 最后一打直接触发荒牌流局，不再开窗口
    let outcome = round
        .submit_private(actor, PrivateAction::Discard { tile: tile("C") })
        .unwrap();
    assert_eq!(outcome, ActionOutcome::RoundEnded);

    let result = round.result().unwrap();
    assert_eq!(
        result.outcome,
        RoundOutcome::ExhaustiveDraw {
            waiting: [true, true, false, false],
        }
    );
    // 听牌两家平分 3000，由不听的两家分摊
    assert_eq!(result.deltas, [1_500, 1_500, -1_500, -1_500]);
    assert!(result.dealer_stays);
    assert_eq!(result.stick_pool, 0);
    assert_eq!(round.seats[0].score, 26_500);
    assert_eq!(round.seats[3].score, 23_500);
}
