/// 计分模块
///
/// 包含役种判定、点数表与对局结算

pub mod points;
pub mod settle;
pub mod yaku;

// 重新导出常用类型
pub use points::{PointTable, SelfDrawPayment, SimplePointTable};
pub use settle::{RoundOutcome, RoundResult, ScoringAggregator, WinShare, WinnerInput};
pub use yaku::{WinContext, WinHand, WinMode, YakuEvaluator, YakuId, YakuOutcome, YakuSet};
