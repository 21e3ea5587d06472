/// 番数到基础点数的查询协作者
///
/// 正式点数表（含符数细分）由使用方在 crate 之外提供并单独测试；
/// 这里只约定查询口径。荣和由放铳者付全额，自摸按庄闲拆分，
/// 庄家和牌总额为闲家的 1.5 倍。
pub trait PointTable {
    /// 荣和时放铳者应付总额
    ///
    /// # 参数
    ///
    /// - `fan`: 总番数
    /// - `dealer_winner`: 和牌者是否庄家
    fn claim_payment(&self, fan: u32, dealer_winner: bool) -> i32;

    /// 自摸时的支付拆分
    fn self_draw_payment(&self, fan: u32, dealer_winner: bool) -> SelfDrawPayment;
}

/// 自摸支付拆分
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SelfDrawPayment {
    /// 庄家应付（和牌者为闲家时生效）
    pub dealer_pays: i32,
    /// 每名闲家应付
    pub non_dealer_pays: i32,
}

impl SelfDrawPayment {
    /// 和牌者实收总额
    pub fn total(&self, dealer_winner: bool) -> i32 {
        if dealer_winner {
            self.non_dealer_pays * 3
        } else {
            self.dealer_pays + self.non_dealer_pays * 2
        }
    }
}

/// 简化参考点数表
///
/// 每番 1000 点基准。仅用于测试与演示，不实现符数。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimplePointTable;

impl SimplePointTable {
    const BASE_PER_FAN: i32 = 1_000;
}

impl PointTable for SimplePointTable {
    fn claim_payment(&self, fan: u32, dealer_winner: bool) -> i32 {
        let base = fan as i32 * Self::BASE_PER_FAN;
        if dealer_winner {
            base * 3 / 2
        } else {
            base
        }
    }

    fn self_draw_payment(&self, fan: u32, dealer_winner: bool) -> SelfDrawPayment {
        let share = fan as i32 * Self::BASE_PER_FAN / 4;
        if dealer_winner {
            SelfDrawPayment {
                dealer_pays: 0,
                non_dealer_pays: share * 2,
            }
        } else {
            SelfDrawPayment {
                dealer_pays: share * 2,
                non_dealer_pays: share,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_payment() {
        let table = SimplePointTable;
        assert_eq!(table.claim_payment(3, false), 3_000);
        assert_eq!(table.claim_payment(3, true), 4_500);
    }

    #[test]
    fn test_self_draw_totals_match_claim() {
        let table = SimplePointTable;
        for fan in 1..=13 {
            // 闲家自摸总收入与荣和一致
            let payment = table.self_draw_payment(fan, false);
            assert_eq!(payment.total(false), table.claim_payment(fan, false));
            // 庄家自摸总收入与庄家荣和一致
            let dealer = table.self_draw_payment(fan, true);
            assert_eq!(dealer.total(true), table.claim_payment(fan, true));
        }
    }

    #[test]
    fn test_dealer_pays_double_share() {
        let table = SimplePointTable;
        let payment = table.self_draw_payment(4, false);
        assert_eq!(payment.dealer_pays, payment.non_dealer_pays * 2);
    }
}
