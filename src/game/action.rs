use crate::tile::{Tile, TileKind};

/// 私有阶段动作
///
/// 仅当前行动座位可提交。
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum PrivateAction {
    /// 弃牌
    Discard { tile: Tile },
    /// 立直宣言并弃牌
    Riichi { tile: Tile },
    /// 暗杠（手内四张同面）
    ConcealedKong { face: TileKind },
    /// 加杠（已碰刻子补第四张）
    PlusKong { tile: Tile },
    /// 自摸和
    Tsumo,
}

/// 公开阶段应答
///
/// 鸣牌窗口内除弃牌者外的每个座位必须提交且仅提交一个应答。
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ClaimResponse {
    /// 吃（指定手内的两张搭子牌，仅下家可用）
    Chow { tiles: [Tile; 2] },
    /// 碰
    Pong,
    /// 明杠
    Kong,
    /// 荣和
    Ron,
    /// 过
    Pass,
}

impl ClaimResponse {
    /// 是否荣和应答
    pub fn is_ron(&self) -> bool {
        matches!(self, ClaimResponse::Ron)
    }

    /// 是否放弃应答
    pub fn is_pass(&self) -> bool {
        matches!(self, ClaimResponse::Pass)
    }
}
