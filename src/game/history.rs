use crate::tile::Tile;

/// 弃牌记录
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DiscardRecord {
    /// 弃牌巡目
    pub turn: u32,
    /// 弃牌座位
    pub seat: u8,
    /// 弃出的牌
    pub tile: Tile,
}

/// 宣告历史（DeclareHistory）
///
/// 按巡目严格单调记录整局的弃牌与鸣牌宣告，只追加不删除。
/// 被鸣走的弃牌只从座位牌河移除，历史记录保留，
/// 振听判定因此能看到全部曾経打出的牌。
///
/// # 注意
///
/// 巡目倒退属于核心缺陷，记录方法直接 panic 而不是返回错误。
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DeclareHistory {
    /// 弃牌记录（按记录顺序）
    discards: Vec<DiscardRecord>,
    /// 鸣牌宣告发生的巡目（吃/碰/杠）
    declares: Vec<u32>,
    /// 最近一次记录的巡目
    last_turn: u32,
}

impl DeclareHistory {
    /// 创建空历史
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录一次弃牌
    ///
    /// # 参数
    ///
    /// - `turn`: 弃牌巡目，不得早于最近记录
    /// - `seat`: 弃牌座位
    /// - `tile`: 弃出的牌
    pub fn record_discard(&mut self, turn: u32, seat: u8, tile: Tile) {
        assert!(
            turn >= self.last_turn,
            "declare history turn regression: {} < {}",
            turn,
            self.last_turn
        );
        self.last_turn = turn;
        self.discards.push(DiscardRecord { turn, seat, tile });
    }

    /// 记录一次鸣牌宣告（吃/碰/杠）
    ///
    /// # 参数
    ///
    /// - `turn`: 宣告巡目，不得早于最近记录
    pub fn record_declare(&mut self, turn: u32) {
        assert!(
            turn >= self.last_turn,
            "declare history turn regression: {} < {}",
            turn,
            self.last_turn
        );
        self.last_turn = turn;
        self.declares.push(turn);
    }

    /// 自某巡目（含）起是否发生过鸣牌宣告
    pub fn has_declared_since(&self, turn: u32) -> bool {
        self.declares.iter().any(|&t| t >= turn)
    }

    /// 查询某座位自某巡目（含）起的弃牌列表
    ///
    /// # 参数
    ///
    /// - `seat`: 座位
    /// - `from_turn`: 起始巡目
    /// - `exclude_last`: 为 true 时剔除全局最新一条弃牌记录
    ///   （当前被鸣的牌本身不应计入）
    pub fn discards_since(&self, seat: u8, from_turn: u32, exclude_last: bool) -> Vec<Tile> {
        let end = if exclude_last {
            self.discards.len().saturating_sub(1)
        } else {
            self.discards.len()
        };
        self.discards[..end]
            .iter()
            .filter(|record| record.seat == seat && record.turn >= from_turn)
            .map(|record| record.tile)
            .collect()
    }

    /// 全部弃牌记录
    pub fn discard_records(&self) -> &[DiscardRecord] {
        &self.discards
    }

    /// 鸣牌宣告次数
    pub fn declare_count(&self) -> usize {
        self.declares.len()
    }

    /// 最近一次记录的巡目
    pub fn last_turn(&self) -> u32 {
        self.last_turn
    }
}
