use super::tile::{Suit, Tile, TileKind};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{thread_rng, SeedableRng};

/// 牌墙（Wall）
///
/// 存储全部 136 张牌，末端为可摸牌的牌山，前 14 张为王牌（岭上牌区）。
/// 每次杠后的岭上摸牌从王牌区取出，同时牌山可摸数减一，
/// 使王牌区始终保持 14 张的规则语义。
///
/// 使用 Box<[Tile]> 替代 Vec<Tile> 以减少堆分配
#[derive(Debug, Clone)]
pub struct Wall {
    /// 牌堆（从后往前摸取）
    tiles: Box<[Tile]>,
    /// 已摸取的牌数（牌山部分）
    drawn_count: usize,
    /// 已摸取的岭上牌数
    replacement_count: usize,
}

impl Wall {
    /// 王牌区大小：14 张
    pub const DEAD_WALL_SIZE: usize = 14;

    /// 岭上牌上限：4 张（对应最多四次杠）
    pub const MAX_REPLACEMENTS: usize = 4;

    /// 创建一副完整的牌墙（136 张，含每花色一张赤五）
    pub fn new() -> Self {
        let mut tiles = Vec::with_capacity(Tile::TOTAL_COUNT);

        // 数牌：每花色 1-9 各 4 张，其中一张 5 替换为赤五
        for suit in Suit::all() {
            for rank in TileKind::MIN_RANK..=TileKind::MAX_RANK {
                let copies = if rank == 5 { 3 } else { 4 };
                for _ in 0..copies {
                    if let Some(kind) = TileKind::suited(suit, rank) {
                        tiles.push(Tile::new(kind));
                    }
                }
                if rank == 5 {
                    tiles.push(Tile::red_five(suit));
                }
            }
        }
        // 字牌：每种 4 张
        for kind in [
            TileKind::East,
            TileKind::South,
            TileKind::West,
            TileKind::North,
            TileKind::White,
            TileKind::Green,
            TileKind::Red,
        ] {
            for _ in 0..4 {
                tiles.push(Tile::new(kind));
            }
        }

        Self {
            tiles: tiles.into_boxed_slice(),
            drawn_count: 0,
            replacement_count: 0,
        }
    }

    /// 洗牌
    ///
    /// 使用 Fisher-Yates 洗牌算法，时间复杂度 O(n)
    pub fn shuffle(&mut self) {
        let mut rng = thread_rng();
        let mut tiles_vec: Vec<Tile> = self.tiles.to_vec();
        tiles_vec.shuffle(&mut rng);
        self.tiles = tiles_vec.into_boxed_slice();
        self.drawn_count = 0;
        self.replacement_count = 0;
    }

    /// 固定种子洗牌，用于可复现的测试与演示
    pub fn shuffle_seeded(&mut self, seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut tiles_vec: Vec<Tile> = self.tiles.to_vec();
        tiles_vec.shuffle(&mut rng);
        self.tiles = tiles_vec.into_boxed_slice();
        self.drawn_count = 0;
        self.replacement_count = 0;
    }

    /// 从牌山摸一张牌（从牌堆末尾）
    ///
    /// # 返回
    ///
    /// - `Some(Tile)`：成功摸取一张牌
    /// - `None`：牌山已空（进入荒牌流局判定）
    pub fn draw(&mut self) -> Option<Tile> {
        if self.live_remaining() == 0 {
            return None;
        }
        let index = self.tiles.len() - 1 - self.drawn_count;
        self.drawn_count += 1;
        Some(self.tiles[index])
    }

    /// 杠后从王牌区摸一张岭上牌（从牌堆前端）
    ///
    /// # 返回
    ///
    /// - `Some(Tile)`：成功摸取
    /// - `None`：已达岭上牌上限，或牌山已空无法补充王牌区
    pub fn draw_replacement(&mut self) -> Option<Tile> {
        if self.replacement_count >= Self::MAX_REPLACEMENTS || self.live_remaining() == 0 {
            return None;
        }
        let tile = self.tiles[self.replacement_count];
        self.replacement_count += 1;
        Some(tile)
    }

    /// 查询牌山剩余可摸牌数
    ///
    /// 王牌区固定占 14 张；每次岭上摸牌从牌山末端补充王牌区，
    /// 因此可摸数随之减一。
    pub fn live_remaining(&self) -> usize {
        self.tiles
            .len()
            .saturating_sub(Self::DEAD_WALL_SIZE)
            .saturating_sub(self.drawn_count)
            .saturating_sub(self.replacement_count)
    }

    /// 检查牌山是否已空
    pub fn is_exhausted(&self) -> bool {
        self.live_remaining() == 0
    }

    /// 重置牌墙（重新生成所有牌，不洗牌）
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// 获取已摸取的牌山牌数
    pub fn drawn_count(&self) -> usize {
        self.drawn_count
    }

    /// 获取已摸取的岭上牌数
    pub fn replacement_count(&self) -> usize {
        self.replacement_count
    }

    /// 获取总牌数（应该是 136）
    pub fn total_count(&self) -> usize {
        self.tiles.len()
    }
}

impl Default for Wall {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wall_creation() {
        let wall = Wall::new();
        assert_eq!(wall.total_count(), Tile::TOTAL_COUNT);
        assert_eq!(
            wall.live_remaining(),
            Tile::TOTAL_COUNT - Wall::DEAD_WALL_SIZE
        );
        assert!(!wall.is_exhausted());
    }

    #[test]
    fn test_wall_tile_distribution() {
        let wall = Wall::new();
        let mut face_counts = std::collections::HashMap::new();
        let mut red_count = 0;

        for tile in wall.tiles.iter() {
            *face_counts.entry(tile.kind).or_insert(0) += 1;
            if tile.red {
                red_count += 1;
            }
        }

        // 每种牌面 4 张，共 34 种
        assert_eq!(face_counts.len(), TileKind::FACE_COUNT);
        for (_, count) in face_counts {
            assert_eq!(count, 4);
        }
        // 每花色一张赤五
        assert_eq!(red_count, 3);
    }

    #[test]
    fn test_wall_draw() {
        let mut wall = Wall::new();
        let initial = wall.live_remaining();

        let tile = wall.draw();
        assert!(tile.is_some());
        assert_eq!(wall.live_remaining(), initial - 1);
        assert_eq!(wall.drawn_count(), 1);
    }

    #[test]
    fn test_wall_draw_until_exhausted() {
        let mut wall = Wall::new();

        let mut count = 0;
        while wall.draw().is_some() {
            count += 1;
        }

        // 王牌区 14 张不可摸
        assert_eq!(count, Tile::TOTAL_COUNT - Wall::DEAD_WALL_SIZE);
        assert!(wall.is_exhausted());
        assert!(wall.draw().is_none());
    }

    #[test]
    fn test_wall_replacement_draw() {
        let mut wall = Wall::new();
        let initial = wall.live_remaining();

        // 岭上摸牌同时削减牌山可摸数
        assert!(wall.draw_replacement().is_some());
        assert_eq!(wall.replacement_count(), 1);
        assert_eq!(wall.live_remaining(), initial - 1);

        // 最多 4 张岭上牌
        for _ in 0..3 {
            assert!(wall.draw_replacement().is_some());
        }
        assert!(wall.draw_replacement().is_none());
        assert_eq!(wall.replacement_count(), Wall::MAX_REPLACEMENTS);
    }

    #[test]
    fn test_wall_seeded_shuffle_is_deterministic() {
        let mut wall1 = Wall::new();
        let mut wall2 = Wall::new();

        wall1.shuffle_seeded(42);
        wall2.shuffle_seeded(42);

        for _ in 0..20 {
            assert_eq!(wall1.draw(), wall2.draw());
        }

        // 不同种子大概率产生不同序列，至少不会出错
        let mut wall3 = Wall::new();
        wall3.shuffle_seeded(43);
        assert!(wall3.draw().is_some());
    }

    #[test]
    fn test_wall_reset() {
        let mut wall = Wall::new();
        for _ in 0..10 {
            wall.draw();
        }
        wall.draw_replacement();

        wall.reset();
        assert_eq!(
            wall.live_remaining(),
            Tile::TOTAL_COUNT - Wall::DEAD_WALL_SIZE
        );
        assert_eq!(wall.drawn_count(), 0);
        assert_eq!(wall.replacement_count(), 0);
    }
}
