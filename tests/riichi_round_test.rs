//! 立直流程集成测试
//!
//! 供托押入、两立直判定、立直锁定（弃牌与暗杠）、
//! 荣和时供托划转与荒牌时供托遗留。

use riichi_engine::{
    ActionMask, ActionOutcome, ClaimResponse, Hand, MeldKind, PrivateAction, RiichiStatus, Round,
    RoundConfig, RoundError, RoundOutcome, RoundPhase, Tile, TileKind, YakuId,
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

fn has_yaku(yaku: &[(YakuId, u32)], id: YakuId) -> bool {
    yaku.iter().any(|(found, _)| *found == id)
}

/// 所有未响应座位过，收齐窗口
fn pass_window(round: &mut Round) {
    if let RoundPhase::Public {
        discarder,
        responses,
        ..
    } = round.phase().clone()
    {
        for seat in 0..4u8 {
            if seat != discarder && responses[seat as usize].is_none() {
                round.submit_claim(seat, ClaimResponse::Pass).unwrap();
            }
        }
    }
}

/// 当前行动者改写进张为指定牌并打出，其余座位全过
fn force_discard(round: &mut Round, seat: u8, code: &str) {
    round.seats[seat as usize].drawn = Some(tile(code));
    round
        .submit_private(seat, PrivateAction::Discard { tile: tile(code) })
        .unwrap();
    pass_window(round);
}

/// 行动者打第一张可打牌、其余全过，推进一整步
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
        RoundPhase::Public { .. } => {
            pass_window(round);
            true
        }
        RoundPhase::Over { .. } => false,
    }
}

#[test]
fn test_riichi_deposit_and_pool_payout_on_ron() {
    let mut round = seeded_round(21);

    // 1. 第一巡全员打风牌，第二巡轮回 1 号
    force_discard(&mut round, 0, "W");
    force_discard(&mut round, 1, "W");
    force_discard(&mut round, 2, "W");
    force_discard(&mut round, 3, "W");
    force_discard(&mut round, 0, "N");

    // 2. 1 号第二巡改为断幺听牌形（听 5p/8p）并宣言立直
    set_hand(&mut round, 1, "345m678m345p67p88s");
    round.seats[1].drawn = Some(tile("N"));
    let outcome = round
        .submit_private(1, PrivateAction::Riichi { tile: tile("N") })
        .unwrap();
    assert_eq!(outcome, ActionOutcome::WindowOpened);
    match round.seats[1].riichi {
        RiichiStatus::Declared { double, .. } => assert!(!double),
        RiichiStatus::None => panic!("riichi was not recorded"),
    }
    assert_eq!(round.seats[1].score, 24_000);
    assert_eq!(round.stick_pool(), 1);
    pass_window(&mut round);

    // 3. 2 号放铳红五饼，1 号荣和
    round.seats[2].drawn = Some(tile("0p"));
    round
        .submit_private(2, PrivateAction::Discard { tile: tile("0p") })
        .unwrap();
    round.submit_claim(0, ClaimResponse::Pass).unwrap();
    round.submit_claim(3, ClaimResponse::Pass).unwrap();
    assert_eq!(
        round.submit_claim(1, ClaimResponse::Ron),
        Ok(ActionOutcome::RoundEnded)
    );

    // 4. 立直 1 番 + 断幺 1 番 + 平和 1 番 = 3000 点，供托归和牌者
    let result = round.result().unwrap();
    match &result.outcome {
        RoundOutcome::ClaimWin { payer, shares } => {
            assert_eq!(*payer, 2);
            assert_eq!(shares[0].seat, 1);
            assert_eq!(shares[0].fan, 3);
            assert!(has_yaku(&shares[0].yaku, YakuId::RIICHI));
            assert!(has_yaku(&shares[0].yaku, YakuId::ALL_SIMPLES));
            assert!(has_yaku(&shares[0].yaku, YakuId::ALL_RUNS));
            assert!(!has_yaku(&shares[0].yaku, YakuId::DOUBLE_RIICHI));
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
    assert_eq!(result.deltas, [0, 4_000, -3_000, 0]);
    assert_eq!(result.stick_pool, 0);
    assert_eq!(round.seats[1].score, 28_000);
    assert_eq!(round.seats[2].score, 22_000);
    let total: i32 = round.seats.iter().map(|seat| seat.score).sum();
    assert_eq!(total, 100_000);
}

#[test]
fn test_double_riichi_on_first_turn() {
    let mut round = seeded_round(23);
    set_hand(&mut round, 0, "234m567m234p67p44s");
    round.seats[0].drawn = Some(tile("N"));

    // 庄家第一巡宣言即两立直
    round
        .submit_private(0, PrivateAction::Riichi { tile: tile("N") })
        .unwrap();
    assert_eq!(
        round.seats[0].riichi,
        RiichiStatus::Declared {
            turn: 1,
            double: true,
        }
    );
    pass_window(&mut round);

    // 下家放铳 8p
    round.seats[1].drawn = Some(tile("8p"));
    round
        .submit_private(1, PrivateAction::Discard { tile: tile("8p") })
        .unwrap();
    round.submit_claim(2, ClaimResponse::Pass).unwrap();
    round.submit_claim(3, ClaimResponse::Pass).unwrap();
    assert_eq!(
        round.submit_claim(0, ClaimResponse::Ron),
        Ok(ActionOutcome::RoundEnded)
    );

    // 两立直 2 番吸收立直 1 番，断幺平和各 1 番，庄家收 1.5 倍
    let result = round.result().unwrap();
    match &result.outcome {
        RoundOutcome::ClaimWin { shares, .. } => {
            assert_eq!(shares[0].fan, 4);
            assert!(has_yaku(&shares[0].yaku, YakuId::DOUBLE_RIICHI));
            assert!(has_yaku(&shares[0].yaku, YakuId::ALL_RUNS));
            assert!(!has_yaku(&shares[0].yaku, YakuId::RIICHI));
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
    assert_eq!(result.deltas, [7_000, -6_000, 0, 0]);
    assert!(result.dealer_stays);
    assert_eq!(round.seats[0].score, 31_000);
    assert_eq!(round.seats[1].score, 19_000);
}

#[test]
fn test_riichi_locks_discard_and_allows_wait_preserving_kong() {
    let mut round = seeded_round(25);
    set_hand(&mut round, 0, "333m456m789m67p55s");
    round.seats[0].drawn = Some(tile("N"));
    round
        .submit_private(0, PrivateAction::Riichi { tile: tile("N") })
        .unwrap();
    pass_window(&mut round);
    force_discard(&mut round, 1, "W");
    force_discard(&mut round, 2, "W");
    force_discard(&mut round, 3, "W");

    // 立直后摸到第四张 3m：暗杠不改听（仍听 5p/8p），允许
    round.seats[0].drawn = Some(tile("3m"));
    let mask = ActionMask::generate(&mut round, 0);
    assert_eq!(mask.can_discard, vec![tile("3m")]);
    assert_eq!(mask.can_concealed_kong, vec![TileKind::Man(3)]);

    // 锁定期间不得打出进张以外的牌
    assert_eq!(
        round.submit_private(0, PrivateAction::Discard { tile: tile("9m") }),
        Err(RoundError::RiichiLocked)
    );

    let outcome = round
        .submit_private(
            0,
            PrivateAction::ConcealedKong {
                face: TileKind::Man(3),
            },
        )
        .unwrap();
    assert_eq!(outcome, ActionOutcome::KongResolved { seat: 0 });
    assert_eq!(round.seats[0].melds[0].kind(), MeldKind::Quad);
    assert!(round.seats[0].melds[0].concealed());
    assert!(round.seats[0].drawn.is_some());
    assert_eq!(round.wall().replacement_count(), 1);
}

#[test]
fn test_riichi_rejects_wait_changing_kong() {
    let mut round = seeded_round(27);
    // 5556s 形：听 4s/6s/7s，第四张 5s 的暗杠会把听牌缩成 6s 单骑
    set_hand(&mut round, 0, "123m456m789m5556s");
    round.seats[0].drawn = Some(tile("N"));
    round
        .submit_private(0, PrivateAction::Riichi { tile: tile("N") })
        .unwrap();
    pass_window(&mut round);
    force_discard(&mut round, 1, "W");
    force_discard(&mut round, 2, "W");
    force_discard(&mut round, 3, "W");

    round.seats[0].drawn = Some(tile("5s"));
    let mask = ActionMask::generate(&mut round, 0);
    assert!(mask.can_concealed_kong.is_empty());
    assert_eq!(
        round.submit_private(
            0,
            PrivateAction::ConcealedKong {
                face: TileKind::Sou(5),
            },
        ),
        Err(RoundError::RiichiLocked)
    );

    // 进张只能原样打出
    round
        .submit_private(0, PrivateAction::Discard { tile: tile("5s") })
        .unwrap();
    assert_eq!(round.seats[0].melds.len(), 0);
}

#[test]
fn test_riichi_pool_carries_on_exhaustive_draw() {
    let mut round = seeded_round(29);
    force_discard(&mut round, 0, "W");

    set_hand(&mut round, 1, "123m456m789m23s55s");
    round.seats[1].drawn = Some(tile("N"));
    round
        .submit_private(1, PrivateAction::Riichi { tile: tile("N") })
        .unwrap();
    pass_window(&mut round);
    assert_eq!(round.stick_pool(), 1);
    assert_eq!(round.seats[1].score, 24_000);

    // 无人和牌打到荒牌：立直者保持听牌，供托遗留给下一局
    let mut steps = 0;
    while step_all_pass(&mut round) {
        steps += 1;
        assert!(steps < 2_000, "round did not finish within the step limit");
    }
    let result = round.result().unwrap();
    match result.outcome {
        RoundOutcome::ExhaustiveDraw { waiting } => assert!(waiting[1]),
        ref other => panic!("unexpected outcome: {:?}", other),
    }
    assert_eq!(result.stick_pool, 1);
    assert_eq!(result.deltas.iter().sum::<i32>(), 0);
    // 1000 点押在供托里，座位点数总和少一根立直棒
    let total: i32 = round.seats.iter().map(|seat| seat.score).sum();
    assert_eq!(total, 99_000);
}
