use crate::game::constants::{
    RIICHI_DEPOSIT, SEAT_COUNT, SEAT_WIND_TURN_POINTS, TENPAI_SETTLEMENT_TOTAL,
};
use crate::meld::{Decomposition, Meld, WaitingAnalyzer};
use crate::score::points::PointTable;
use crate::score::yaku::{WinContext, WinHand, WinMode, YakuId, YakuSet};
use crate::tile::Tile;

/// 单个和牌者的结算份额
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct WinShare {
    /// 和牌座位
    pub seat: u8,
    /// 总番数
    pub fan: u32,
    /// 成立役种及各自番数
    pub yaku: Vec<(YakuId, u32)>,
}

/// 对局结局
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum RoundOutcome {
    /// 自摸和
    SelfDrawWin {
        /// 和牌份额
        share: WinShare,
    },
    /// 荣和（一至三家）
    ClaimWin {
        /// 放铳座位
        payer: u8,
        /// 各和牌者份额
        shares: Vec<WinShare>,
    },
    /// 荒牌流局
    ExhaustiveDraw {
        /// 各座位是否听牌
        waiting: [bool; 4],
    },
}

/// 对局结果
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RoundResult {
    /// 结局
    pub outcome: RoundOutcome,
    /// 各座位点数变动（供托划转已计入）
    pub deltas: [i32; 4],
    /// 结算后遗留的供托立直棒
    pub stick_pool: u32,
    /// 庄家是否连庄
    pub dealer_stays: bool,
}

/// 和牌者结算输入
pub struct WinnerInput<'a> {
    /// 和牌座位
    pub seat: u8,
    /// 暗牌部分的全部和牌拆解
    pub decompositions: &'a [Decomposition],
    /// 副露面子
    pub declared: &'a [Meld],
    /// 和了牌
    pub win_tile: Tile,
    /// 判定上下文（wait_shape 留空，由结算器按拆解填入）
    pub context: WinContext,
}

/// 结算器（ScoringAggregator）
///
/// 汇总役种判定结果并计算三个独立成分的点数划转：
/// 点数表划转、供托立直棒划转、场供划转。
/// 每次结算校验守恒：座位变动之和恰等于释放的供托点数。
pub struct ScoringAggregator<'a> {
    yaku_set: &'a YakuSet,
    point_table: &'a dyn PointTable,
}

impl<'a> ScoringAggregator<'a> {
    /// 创建结算器
    pub fn new(yaku_set: &'a YakuSet, point_table: &'a dyn PointTable) -> Self {
        Self {
            yaku_set,
            point_table,
        }
    }

    /// 对单个和牌手在全部拆解中挑选番数最高的一种
    ///
    /// # 算法
    ///
    /// 对每个拆解：副露与拆解面子合并成完整和牌手，按和了牌在该
    /// 拆解中的位置分类听牌形状填入上下文，再交役种注册表判定。
    /// 取总番数最大的拆解（相同时取先出现者）。
    ///
    /// # 返回
    ///
    /// (总番数, 成立役种列表)；无任何役种成立时番数为 0
    pub fn best_evaluation(&self, input: &WinnerInput) -> (u32, Vec<(YakuId, u32)>) {
        let concealed = input.declared.iter().all(|meld| meld.concealed());
        let mut best: Option<(u32, Vec<(YakuId, u32)>)> = None;

        for decomposition in input.decompositions {
            let mut melds = input.declared.to_vec();
            melds.extend(decomposition.iter().cloned());
            let hand = WinHand {
                melds,
                win_tile: input.win_tile,
                concealed,
            };
            let mut context = input.context;
            context.wait_shape =
                WaitingAnalyzer::classify_wait(decomposition, input.win_tile.face());

            let (fan, applied) = self.yaku_set.evaluate_all(&hand, &context);
            let better = match &best {
                Some((best_fan, _)) => fan > *best_fan,
                None => true,
            };
            if better {
                best = Some((fan, applied));
            }
        }

        best.unwrap_or((0, Vec::new()))
    }

    /// 和牌结算
    ///
    /// # 参数
    ///
    /// - `winners`: 和牌者（荣和可多家；自摸恰一家）
    /// - `payer`: 荣和时的放铳座位，自摸为 None
    /// - `dealer`: 庄家座位
    /// - `seat_wind_turn`: 本场数
    /// - `stick_pool`: 结算前供托立直棒数量
    ///
    /// # 算法
    ///
    /// 三个独立成分逐项累加进各座位变动：
    /// 1. 点数表划转：荣和由放铳者向每名和牌者付全额；
    ///    自摸由三家按庄闲拆分支付。
    /// 2. 供托划转：全部供托归距放铳者顺位最近的和牌者（自摸归和牌者）。
    /// 3. 场供划转：每本场 300 点，荣和由放铳者对每名和牌者支付，
    ///    自摸由三家均摊（每家 100 点/本场）。
    pub fn settle_win(
        &self,
        winners: &[WinnerInput],
        payer: Option<u8>,
        dealer: u8,
        seat_wind_turn: u32,
        stick_pool: u32,
    ) -> RoundResult {
        assert!(!winners.is_empty(), "settle_win requires at least one winner");
        assert!(
            payer.is_some() || winners.len() == 1,
            "self-draw settlement accepts exactly one winner"
        );

        let mut deltas = [0i32; SEAT_COUNT as usize];
        let mut shares = Vec::with_capacity(winners.len());

        for winner in winners {
            let (fan, yaku) = self.best_evaluation(winner);
            let dealer_winner = winner.seat == dealer;

            match payer {
                Some(payer_seat) => {
                    let payment = self.point_table.claim_payment(fan, dealer_winner);
                    deltas[winner.seat as usize] += payment;
                    deltas[payer_seat as usize] -= payment;

                    let carry = seat_wind_turn as i32 * SEAT_WIND_TURN_POINTS;
                    deltas[winner.seat as usize] += carry;
                    deltas[payer_seat as usize] -= carry;
                }
                None => {
                    let payment = self.point_table.self_draw_payment(fan, dealer_winner);
                    let carry_share = seat_wind_turn as i32 * SEAT_WIND_TURN_POINTS / 3;
                    for seat in 0..SEAT_COUNT {
                        if seat == winner.seat {
                            continue;
                        }
                        let table_part = if seat == dealer {
                            payment.dealer_pays
                        } else {
                            payment.non_dealer_pays
                        };
                        deltas[seat as usize] -= table_part + carry_share;
                        deltas[winner.seat as usize] += table_part + carry_share;
                    }
                }
            }

            shares.push(WinShare {
                seat: winner.seat,
                fan,
                yaku,
            });
        }

        // 供托：全部归距放铳者顺位最近的和牌者
        let released = stick_pool as i32 * RIICHI_DEPOSIT;
        if released > 0 {
            let recipient = match payer {
                Some(payer_seat) => winners
                    .iter()
                    .map(|winner| winner.seat)
                    .min_by_key(|&seat| forward_distance(payer_seat, seat))
                    .unwrap_or(winners[0].seat),
                None => winners[0].seat,
            };
            deltas[recipient as usize] += released;
        }

        let total: i32 = deltas.iter().sum();
        assert_eq!(
            total, released,
            "settlement must balance: seat deltas {} vs released pool {}",
            total, released
        );

        let dealer_stays = winners.iter().any(|winner| winner.seat == dealer);
        let outcome = match payer {
            Some(payer_seat) => RoundOutcome::ClaimWin {
                payer: payer_seat,
                shares,
            },
            None => RoundOutcome::SelfDrawWin {
                share: shares.remove(0),
            },
        };

        RoundResult {
            outcome,
            deltas,
            stick_pool: 0,
            dealer_stays,
        }
    }

    /// 荒牌流局结算
    ///
    /// 听牌的座位均分 3000 点，由未听牌的座位均摊；
    /// 全听或全不听时无划转。供托立直棒原样遗留给下一局。
    pub fn settle_exhaustive(waiting: [bool; 4], stick_pool: u32, dealer: u8) -> RoundResult {
        let waiting_count = waiting.iter().filter(|&&ready| ready).count() as i32;
        let mut deltas = [0i32; SEAT_COUNT as usize];

        if waiting_count > 0 && waiting_count < SEAT_COUNT as i32 {
            let received = TENPAI_SETTLEMENT_TOTAL / waiting_count;
            let paid = TENPAI_SETTLEMENT_TOTAL / (SEAT_COUNT as i32 - waiting_count);
            for (seat, &ready) in waiting.iter().enumerate() {
                deltas[seat] = if ready { received } else { -paid };
            }
        }

        let total: i32 = deltas.iter().sum();
        assert_eq!(total, 0, "exhaustive draw settlement must balance: {}", total);

        RoundResult {
            outcome: RoundOutcome::ExhaustiveDraw { waiting },
            deltas,
            stick_pool,
            dealer_stays: waiting[dealer as usize],
        }
    }
}

/// 自某座位起沿顺位方向到另一座位的距离（1-3）
fn forward_distance(from: u8, to: u8) -> u8 {
    (to + SEAT_COUNT - from) % SEAT_COUNT
}
