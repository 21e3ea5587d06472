/// 对局逻辑模块
///
/// 包含座位状态、动作、鸣牌判定、宣告历史与对局状态机

pub mod action;
pub mod claims;
pub mod constants;
pub mod history;
pub mod player;
pub mod round;

// 重新导出常用类型
pub use action::{ClaimResponse, PrivateAction};
pub use claims::ClaimHandler;
pub use history::{DeclareHistory, DiscardRecord};
pub use player::{RiichiStatus, SeatState};
pub use round::{ActionOutcome, ClaimWindowKind, Round, RoundConfig, RoundError, RoundPhase};
