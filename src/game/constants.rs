/// 对局常量定义
///
/// 集中管理规则中的固定数字

/// 座位数量
pub const SEAT_COUNT: u8 = 4;

/// 起始手牌张数
pub const HAND_SIZE: usize = 13;

/// 各家起始点数
pub const INITIAL_POINTS: i32 = 25_000;

/// 立直供托点数
pub const RIICHI_DEPOSIT: i32 = 1_000;

/// 宣告立直所需最低持点
pub const MIN_RIICHI_POINTS: i32 = 1_000;

/// 宣告立直所需最少牌山余牌
pub const MIN_RIICHI_WALL: usize = 4;

/// 每一本场的场供单位点数
pub const SEAT_WIND_TURN_POINTS: i32 = 300;

/// 荒牌流局时听牌结算总额
pub const TENPAI_SETTLEMENT_TOTAL: i32 = 3_000;
