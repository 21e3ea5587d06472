/// 牌相关模块
///
/// 包含牌（Tile）、牌墙（Wall）和手牌（Hand）的实现

pub mod hand;
pub mod tile;
pub mod wall;

// 重新导出常用类型
pub use hand::Hand;
pub use tile::{format_tiles, parse_tiles, ParseTileError, Suit, Tile, TileKind, Wind};
pub use wall::Wall;
