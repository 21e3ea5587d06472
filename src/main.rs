/// 可执行文件入口（用于演示和调试）

use riichi_engine::meld::counts_from_codes;
use riichi_engine::{
    format_tiles, ActionMask, ClaimResponse, MeldDecomposer, PrivateAction, Round, RoundConfig,
    RoundOutcome, RoundPhase, Tile, WaitingAnalyzer, YakuSet,
};

fn main() {
    println!("立直麻将规则引擎演示");
    println!();

    demo_waiting();
    println!();
    demo_round();
}

/// 拆解与听牌演示
fn demo_waiting() {
    let mut decomposer = MeldDecomposer::new();
    let counts = match counts_from_codes("123m456m789m23s55s") {
        Some(counts) => counts,
        None => {
            println!("短码解析失败");
            return;
        }
    };

    println!("手牌 123m456m789m23s55s：");
    let waits = WaitingAnalyzer::waiting_set(&mut decomposer, &counts, 0);
    for (face, shape) in waits.iter() {
        println!("  等 {}（{:?}）", Tile::new(*face), shape);
    }
}

/// 整局演示
///
/// 固定种子下跑完一局：行动者能自摸则自摸，否则打出第一张合法牌；
/// 响应座位能荣则荣，否则过。多数种子下以荒牌流局收场。
fn demo_round() {
    let mut round = Round::new(RoundConfig {
        seed: Some(2024),
        ..RoundConfig::default()
    });

    for seat in 0..4usize {
        let state = &round.seats[seat];
        println!(
            "座位 {}（{:?}）起手 {}",
            seat,
            state.seat_wind,
            format_tiles(&state.hand.to_sorted_vec()),
        );
    }
    println!("牌山剩余 {} 张", round.wall().live_remaining());

    loop {
        let phase = round.phase().clone();
        match phase {
            RoundPhase::Private { seat } => {
                let mask = ActionMask::generate(&mut round, seat);
                if mask.can_tsumo {
                    println!("座位 {} 自摸", seat);
                    if let Err(error) = round.submit_private(seat, PrivateAction::Tsumo) {
                        println!("引擎拒绝自摸：{}", error);
                        return;
                    }
                    continue;
                }
                let tile = match mask.can_discard.first() {
                    Some(&tile) => tile,
                    None => {
                        println!("座位 {} 无牌可打", seat);
                        return;
                    }
                };
                if let Err(error) = round.submit_private(seat, PrivateAction::Discard { tile }) {
                    println!("引擎拒绝打牌：{}", error);
                    return;
                }
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
                        println!("座位 {} 荣和", seat);
                        ClaimResponse::Ron
                    } else {
                        ClaimResponse::Pass
                    };
                    if let Err(error) = round.submit_claim(seat, response) {
                        println!("引擎拒绝响应：{}", error);
                        return;
                    }
                }
            }
            RoundPhase::Over { .. } => break,
        }
    }

    let result = match round.result() {
        Some(result) => result.clone(),
        None => return,
    };
    let yaku_names = YakuSet::standard();
    println!();
    match &result.outcome {
        RoundOutcome::SelfDrawWin { share } => {
            println!("结局：座位 {} 自摸，共 {} 番", share.seat, share.fan);
            for (id, fan) in &share.yaku {
                println!("  {} {} 番", yaku_names.name_of(*id).unwrap_or("?"), fan);
            }
        }
        RoundOutcome::ClaimWin { payer, shares } => {
            for share in shares {
                println!(
                    "结局：座位 {} 荣和座位 {}，共 {} 番",
                    share.seat, payer, share.fan
                );
                for (id, fan) in &share.yaku {
                    println!("  {} {} 番", yaku_names.name_of(*id).unwrap_or("?"), fan);
                }
            }
        }
        RoundOutcome::ExhaustiveDraw { waiting } => {
            println!("结局：荒牌流局，各座位听牌 {:?}", waiting);
        }
    }
    println!("点数变动 {:?}", result.deltas);
    println!(
        "供托遗留 {}，庄家{}连庄",
        result.stick_pool,
        if result.dealer_stays { "" } else { "不" }
    );
}
