/// 引擎查询模块
///
/// 面向外层调用方的合法动作查询

pub mod action_mask;

pub use action_mask::ActionMask;
