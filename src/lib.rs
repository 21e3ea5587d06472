/// 立直麻将规则引擎
///
/// 单局状态机 + 和牌拆解 + 役种计分的同步实现

pub mod engine;
pub mod game;
pub mod meld;
pub mod score;
pub mod tile;

// 重新导出常用类型
pub use engine::ActionMask;
pub use game::action::{ClaimResponse, PrivateAction};
pub use game::claims::ClaimHandler;
pub use game::history::{DeclareHistory, DiscardRecord};
pub use game::player::{RiichiStatus, SeatState};
pub use game::round::{
    ActionOutcome, ClaimWindowKind, Round, RoundConfig, RoundError, RoundPhase,
};
pub use meld::{
    DecomposeTarget, Decomposition, Meld, MeldDecomposer, MeldKind, WaitShape, WaitingAnalyzer,
    WaitingSet,
};
pub use score::{
    PointTable, RoundOutcome, RoundResult, ScoringAggregator, SimplePointTable, WinContext,
    WinHand, WinMode, YakuId, YakuSet,
};
pub use tile::{format_tiles, parse_tiles, Hand, Suit, Tile, TileKind, Wall, Wind};
