use super::tile::{parse_tiles, Tile, TileKind};
use smallvec::SmallVec;
use std::collections::HashMap;

/// 手牌（暗牌部分）
///
/// 使用 HashMap 存储每张牌的数量，支持 O(1) 的添加、移除和查询操作。
/// 赤宝牌与普通牌按完整牌值分开计数，但所有规则判断走牌面
/// （[`Hand::face_count`] / [`Hand::face_counts`]）。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Hand {
    /// 牌的数量映射：Tile -> 数量
    tiles: HashMap<Tile, u8>,
    /// 总牌数（用于快速查询）
    total_count: usize,
}

impl Hand {
    /// 创建空手牌
    pub fn new() -> Self {
        Self {
            tiles: HashMap::new(),
            total_count: 0,
        }
    }

    /// 从牌列表创建手牌
    ///
    /// # 返回
    ///
    /// 任何牌面超过 4 张（或赤牌超过 1 张）时返回 None。
    pub fn from_tiles(tiles: &[Tile]) -> Option<Self> {
        let mut hand = Hand::new();
        for &tile in tiles {
            if !hand.add_tile(tile) {
                return None;
            }
        }
        Some(hand)
    }

    /// 从短码串创建手牌（"123m456p789s55sEE" 等），测试与演示用
    pub fn from_codes(s: &str) -> Option<Self> {
        let tiles = parse_tiles(s).ok()?;
        Self::from_tiles(&tiles)
    }

    /// 添加一张牌
    ///
    /// # 返回
    ///
    /// - `true`：成功添加
    /// - `false`：该牌面已有 4 张，或该花色的赤五已存在
    pub fn add_tile(&mut self, tile: Tile) -> bool {
        if self.face_count(tile.kind) >= 4 {
            return false;
        }
        if tile.red && self.tile_count(tile) >= 1 {
            return false; // 每花色赤五只有一张
        }
        *self.tiles.entry(tile).or_insert(0) += 1;
        self.total_count += 1;
        true
    }

    /// 移除一张指定牌（区分赤宝牌）
    ///
    /// # 返回
    ///
    /// - `true`：成功移除
    /// - `false`：手牌中没有该牌
    pub fn remove_tile(&mut self, tile: Tile) -> bool {
        match self.tiles.get_mut(&tile) {
            Some(count) if *count > 0 => {
                *count -= 1;
                self.total_count -= 1;
                if *count == 0 {
                    self.tiles.remove(&tile);
                }
                true
            }
            _ => false,
        }
    }

    /// 按牌面移除一张牌，普通牌优先于赤牌
    ///
    /// 副露消耗手牌时按牌面匹配，移除的具体牌值由此规则确定，
    /// 保证结果确定性。
    ///
    /// # 返回
    ///
    /// 被移除的牌；手牌中无该牌面时返回 None。
    pub fn take_face(&mut self, kind: TileKind) -> Option<Tile> {
        let normal = Tile::new(kind);
        if self.remove_tile(normal) {
            return Some(normal);
        }
        let red = Tile { kind, red: true };
        if self.remove_tile(red) {
            return Some(red);
        }
        None
    }

    /// 检查是否有某张牌（区分赤宝牌）
    pub fn has_tile(&self, tile: Tile) -> bool {
        self.tile_count(tile) > 0
    }

    /// 查询某张牌的数量（区分赤宝牌）
    pub fn tile_count(&self, tile: Tile) -> u8 {
        self.tiles.get(&tile).copied().unwrap_or(0)
    }

    /// 查询某牌面的数量（赤牌与普通牌合并）
    pub fn face_count(&self, kind: TileKind) -> u8 {
        self.tile_count(Tile::new(kind)) + self.tile_count(Tile { kind, red: true })
    }

    /// 获取总牌数
    pub fn total_count(&self) -> usize {
        self.total_count
    }

    /// 展开为 34 元素的牌面计数数组，供拆解器使用
    pub fn face_counts(&self) -> [u8; TileKind::FACE_COUNT] {
        let mut counts = [0u8; TileKind::FACE_COUNT];
        for (tile, &count) in &self.tiles {
            counts[tile.kind.to_index() as usize] += count;
        }
        counts
    }

    /// 转换为排序后的牌向量（规范顺序：牌面升序，赤牌在后）
    pub fn to_sorted_vec(&self) -> Vec<Tile> {
        let mut result = Vec::with_capacity(self.total_count);
        for (tile, &count) in &self.tiles {
            for _ in 0..count {
                result.push(*tile);
            }
        }
        result.sort();
        result
    }

    /// 检查手牌是否为空
    pub fn is_empty(&self) -> bool {
        self.total_count == 0
    }

    /// 清空手牌
    pub fn clear(&mut self) {
        self.tiles.clear();
        self.total_count = 0;
    }

    /// 获取所有不同的牌（不包含数量为 0 的，赤牌与普通牌分列）
    pub fn distinct_tiles(&self) -> SmallVec<[Tile; 14]> {
        let mut result: SmallVec<[Tile; 14]> = self.tiles.keys().copied().collect();
        result.sort();
        result
    }

    /// 获取所有牌的数量映射（用于高级操作）
    pub fn tiles_map(&self) -> &HashMap<Tile, u8> {
        &self.tiles
    }
}
