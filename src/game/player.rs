use crate::meld::Meld;
use crate::tile::{Hand, Tile, TileKind, Wind};

/// 立直状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum RiichiStatus {
    /// 未立直
    None,
    /// 已立直
    Declared {
        /// 宣言巡目
        turn: u32,
        /// 是否两立直（首巡且此前无人鸣牌）
        double: bool,
    },
}

impl RiichiStatus {
    /// 是否已立直
    pub fn is_declared(&self) -> bool {
        matches!(self, RiichiStatus::Declared { .. })
    }
}

impl Default for RiichiStatus {
    fn default() -> Self {
        RiichiStatus::None
    }
}

/// 座位状态
#[derive(Debug, Clone, PartialEq)]
pub struct SeatState {
    /// 座位号（0-3）
    pub seat: u8,
    /// 门风
    pub seat_wind: Wind,
    /// 暗牌
    pub hand: Hand,
    /// 副露与暗杠
    pub melds: Vec<Meld>,
    /// 待处理的进张（摸牌后为 Some）
    pub drawn: Option<Tile>,
    /// 牌河（被鸣走的牌已移除）
    pub river: Vec<Tile>,
    /// 立直状态
    pub riichi: RiichiStatus,
    /// 过水记录：曾在听该牌面时放过的牌面
    pub passed_waits: Vec<TileKind>,
    /// 持有点数
    pub score: i32,
    /// 本座位进入私有阶段的次数
    pub turn_count: u32,
}

impl SeatState {
    /// 创建新座位
    pub fn new(seat: u8, seat_wind: Wind, score: i32) -> Self {
        Self {
            seat,
            seat_wind,
            hand: Hand::new(),
            melds: Vec::new(),
            drawn: None,
            river: Vec::new(),
            riichi: RiichiStatus::None,
            passed_waits: Vec::new(),
            score,
            turn_count: 0,
        }
    }

    /// 副露面子数（含暗杠）
    pub fn declared_meld_count(&self) -> u8 {
        self.melds.len() as u8
    }

    /// 门前清：所有面子都是暗的（暗杠不破门清）
    pub fn is_concealed(&self) -> bool {
        self.melds.iter().all(|meld| meld.concealed())
    }

    /// 暗牌牌面计数（不含进张）
    pub fn concealed_counts(&self) -> [u8; TileKind::FACE_COUNT] {
        self.hand.face_counts()
    }

    /// 暗牌加一张额外牌面的计数
    pub fn counts_with(&self, extra: TileKind) -> [u8; TileKind::FACE_COUNT] {
        let mut counts = self.hand.face_counts();
        counts[extra.to_index() as usize] += 1;
        counts
    }

    /// 暗牌加进张的计数
    ///
    /// # 返回
    ///
    /// 没有进张时返回 None
    pub fn counts_with_drawn(&self) -> Option<[u8; TileKind::FACE_COUNT]> {
        self.drawn.map(|tile| self.counts_with(tile.face()))
    }

    /// 是否持有某张牌（进张或暗牌，按完整牌值含赤标记）
    pub fn holds(&self, tile: Tile) -> bool {
        self.drawn == Some(tile) || self.hand.has_tile(tile)
    }

    /// 某牌面的持有张数（进张计入）
    pub fn held_face_count(&self, face: TileKind) -> u8 {
        let drawn_extra = match self.drawn {
            Some(tile) if tile.face() == face => 1,
            _ => 0,
        };
        self.hand.face_count(face) + drawn_extra
    }

    /// 归一化张数（杠按 3 张计）
    ///
    /// 不变量：作为私有阶段行动者时为 14（摸牌或鸣牌所致），
    /// 其余时刻为 13。
    pub fn normalized_count(&self) -> usize {
        let meld_total: usize = self
            .melds
            .iter()
            .map(|meld| meld.normalized_count())
            .sum();
        self.hand.total_count() + usize::from(self.drawn.is_some()) + meld_total
    }

    /// 把进张并入暗牌
    pub fn merge_drawn(&mut self) {
        if let Some(tile) = self.drawn.take() {
            self.hand.add_tile(tile);
        }
    }

    /// 记录过水牌面（去重）
    pub fn record_passed_wait(&mut self, face: TileKind) {
        if !self.passed_waits.contains(&face) {
            self.passed_waits.push(face);
        }
    }

    /// 是否曾过水该牌面
    pub fn has_passed_wait(&self, face: TileKind) -> bool {
        self.passed_waits.contains(&face)
    }
}
