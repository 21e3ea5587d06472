use super::meld::Meld;
use super::meld_type::{thirteen_orphan_variants, MeldKind};
use crate::tile::TileKind;
use smallvec::SmallVec;
use std::collections::HashMap;

/// 一个完整拆解：构成目标牌型的面子列表（面子内与列表均为规范顺序）
pub type Decomposition = SmallVec<[Meld; 5]>;

/// 拆解目标牌型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecomposeTarget {
    /// 标准型：指定数量的面子加雀头
    ///
    /// 和牌检查时 `melds = 4 - 副露面子数`、`pairs = 1`。
    Standard { melds: u8, pairs: u8 },
    /// 七对子：七个互不相同的雀头（同牌面四张不算两对）
    SevenPairs,
    /// 国士无双：十三种幺九其一成对
    ThirteenOrphans,
}

/// 记忆化键：（剩余牌面计数，剩余面子额度，剩余雀头额度）
type MemoKey = ([u8; TileKind::FACE_COUNT], u8, u8);

/// 面子拆解器（MeldDecomposer）
///
/// 递归搜索把牌面多重集划分为目标牌型的所有不同拆解。
/// 下游规则依赖具体选了哪个拆解（同一手牌可能有的拆法成型、
/// 有的不成型），所以必须枚举全部拆解而非找到一个就停。
///
/// # 算法
///
/// 每层取索引最小的非零牌面，依次尝试以它开头的候选面子
/// （雀头、刻子、顺子），移除后递归拆解剩余部分。
/// 重复牌导致的指数分支用显式记忆化表压平：
/// 键为（剩余计数，剩余额度），值为该局面的全部子拆解。
///
/// # 注意
///
/// 记忆化表保存在拆解器实例内，由持有方显式构造与传递，
/// 不使用任何全局缓存。
#[derive(Debug, Clone)]
pub struct MeldDecomposer {
    /// 标准型搜索的记忆化表
    memo: HashMap<MemoKey, Vec<Decomposition>>,
    /// 国士无双的 13 个变体计数向量（构造时生成）
    orphan_variants: Vec<(SmallVec<[TileKind; 4]>, [u8; TileKind::FACE_COUNT])>,
    /// 记忆化表条目上限，超出后整体清空
    max_memo_entries: usize,
}

impl MeldDecomposer {
    /// 默认记忆化表上限
    const DEFAULT_MAX_MEMO: usize = 10_000;

    /// 创建拆解器，预生成国士变体表
    pub fn new() -> Self {
        let orphan_variants = thirteen_orphan_variants()
            .into_iter()
            .map(|faces| {
                let mut counts = [0u8; TileKind::FACE_COUNT];
                for face in &faces {
                    counts[face.to_index() as usize] += 1;
                }
                (faces, counts)
            })
            .collect();
        Self {
            memo: HashMap::new(),
            orphan_variants,
            max_memo_entries: Self::DEFAULT_MAX_MEMO,
        }
    }

    /// 拆解一个牌面多重集
    ///
    /// # 参数
    ///
    /// - `counts`：34 元素牌面计数
    /// - `target`：目标牌型
    ///
    /// # 返回
    ///
    /// 全部不同拆解，按规范顺序排序去重；无解时为空。
    ///
    /// # 注意
    ///
    /// 总牌数与目标牌型不匹配属于调用方契约错误，直接 panic。
    pub fn decompose(
        &mut self,
        counts: &[u8; TileKind::FACE_COUNT],
        target: DecomposeTarget,
    ) -> Vec<Decomposition> {
        let total: usize = counts.iter().map(|&c| c as usize).sum();
        match target {
            DecomposeTarget::Standard { melds, pairs } => {
                let expected = 3 * melds as usize + 2 * pairs as usize;
                assert_eq!(
                    total, expected,
                    "standard decompose expects {} tiles, got {}",
                    expected, total
                );
                let mut working = *counts;
                let mut results = self.search(&mut working, melds, pairs);
                for decomposition in &mut results {
                    decomposition.sort();
                }
                results.sort();
                results.dedup();
                results
            }
            DecomposeTarget::SevenPairs => {
                assert_eq!(total, 14, "seven pairs expects 14 tiles, got {}", total);
                self.decompose_seven_pairs(counts)
            }
            DecomposeTarget::ThirteenOrphans => {
                assert_eq!(
                    total, 14,
                    "thirteen orphans expects 14 tiles, got {}",
                    total
                );
                self.decompose_thirteen_orphans(counts)
            }
        }
    }

    /// 标准型便捷入口：`melds` 个面子加一个雀头
    pub fn decompose_standard(
        &mut self,
        counts: &[u8; TileKind::FACE_COUNT],
        melds: u8,
    ) -> Vec<Decomposition> {
        self.decompose(counts, DecomposeTarget::Standard { melds, pairs: 1 })
    }

    /// 和牌拆解：汇总所有适用目标牌型的拆解
    ///
    /// 标准型始终参与；七对子与国士无双只在门前无副露
    /// （`declared == 0`，即暗牌恰好 14 张）时参与。
    pub fn win_decompositions(
        &mut self,
        counts: &[u8; TileKind::FACE_COUNT],
        declared: u8,
    ) -> Vec<Decomposition> {
        let mut results = self.decompose_standard(counts, 4 - declared);
        if declared == 0 {
            results.extend(self.decompose(counts, DecomposeTarget::SevenPairs));
            results.extend(self.decompose(counts, DecomposeTarget::ThirteenOrphans));
        }
        results
    }

    /// 检查暗牌部分是否构成和牌
    pub fn is_winning(&mut self, counts: &[u8; TileKind::FACE_COUNT], declared: u8) -> bool {
        !self.win_decompositions(counts, declared).is_empty()
    }

    /// 当前记忆化表条目数
    pub fn memo_entries(&self) -> usize {
        self.memo.len()
    }

    /// 清空记忆化表
    pub fn clear_memo(&mut self) {
        self.memo.clear();
    }

    /// 标准型递归搜索
    ///
    /// `counts` 在递归中原地增减，返回前恢复原状。
    fn search(
        &mut self,
        counts: &mut [u8; TileKind::FACE_COUNT],
        melds_left: u8,
        pairs_left: u8,
    ) -> Vec<Decomposition> {
        // 取索引最小的非零牌面
        let first = match counts.iter().position(|&c| c > 0) {
            Some(index) => index,
            None => {
                // 牌空且额度恰好用完才算成功
                return if melds_left == 0 && pairs_left == 0 {
                    vec![SmallVec::new()]
                } else {
                    Vec::new()
                };
            }
        };
        if melds_left == 0 && pairs_left == 0 {
            return Vec::new(); // 有剩牌
        }

        let key: MemoKey = (*counts, melds_left, pairs_left);
        if let Some(cached) = self.memo.get(&key) {
            return cached.clone();
        }

        let mut results: Vec<Decomposition> = Vec::new();

        // 雀头候选
        if pairs_left > 0 && counts[first] >= 2 {
            counts[first] -= 2;
            let face = face_at(first);
            for mut sub in self.search(counts, melds_left, pairs_left - 1) {
                if let Some(meld) = Meld::from_faces(MeldKind::Pair, &[face, face], true) {
                    sub.insert(0, meld);
                    results.push(sub);
                }
            }
            counts[first] += 2;
        }

        // 刻子候选
        if melds_left > 0 && counts[first] >= 3 {
            counts[first] -= 3;
            let face = face_at(first);
            for mut sub in self.search(counts, melds_left - 1, pairs_left) {
                if let Some(meld) = Meld::from_faces(MeldKind::Triple, &[face, face, face], true) {
                    sub.insert(0, meld);
                    results.push(sub);
                }
            }
            counts[first] += 3;
        }

        // 顺子候选（最小牌面作为顺子首张）
        if melds_left > 0 {
            let face = face_at(first);
            if let (Some(second), Some(third)) = (face.shift(1), face.shift(2)) {
                let (i1, i2) = (second.to_index() as usize, third.to_index() as usize);
                if counts[i1] > 0 && counts[i2] > 0 {
                    counts[first] -= 1;
                    counts[i1] -= 1;
                    counts[i2] -= 1;
                    for mut sub in self.search(counts, melds_left - 1, pairs_left) {
                        if let Some(meld) =
                            Meld::from_faces(MeldKind::Run, &[face, second, third], true)
                        {
                            sub.insert(0, meld);
                            results.push(sub);
                        }
                    }
                    counts[first] += 1;
                    counts[i1] += 1;
                    counts[i2] += 1;
                }
            }
        }

        if self.memo.len() >= self.max_memo_entries {
            self.memo.clear();
        }
        self.memo.insert(key, results.clone());
        results
    }

    /// 七对子拆解：恰好七个不同牌面各两张
    fn decompose_seven_pairs(&self, counts: &[u8; TileKind::FACE_COUNT]) -> Vec<Decomposition> {
        let mut melds: Decomposition = SmallVec::new();
        for (index, &count) in counts.iter().enumerate() {
            match count {
                0 => continue,
                2 => {
                    let face = face_at(index);
                    match Meld::from_faces(MeldKind::Pair, &[face, face], true) {
                        Some(meld) => melds.push(meld),
                        None => return Vec::new(),
                    }
                }
                // 四张同面不算两对
                _ => return Vec::new(),
            }
        }
        if melds.len() == 7 {
            vec![melds]
        } else {
            Vec::new()
        }
    }

    /// 国士无双拆解：与预生成变体表逐一比对
    fn decompose_thirteen_orphans(
        &self,
        counts: &[u8; TileKind::FACE_COUNT],
    ) -> Vec<Decomposition> {
        for (faces, variant_counts) in &self.orphan_variants {
            if variant_counts == counts {
                if let Some(meld) = Meld::from_faces(MeldKind::SpecialThirteen, faces, true) {
                    let mut melds: Decomposition = SmallVec::new();
                    melds.push(meld);
                    return vec![melds];
                }
            }
        }
        Vec::new()
    }
}

impl Default for MeldDecomposer {
    fn default() -> Self {
        Self::new()
    }
}

/// 索引转牌面（索引由计数数组而来，必然有效）
#[inline]
fn face_at(index: usize) -> TileKind {
    TileKind::from_index(index as u8).unwrap_or(TileKind::Red)
}

/// 把牌短码串展开为计数数组，测试与演示用
pub fn counts_from_codes(s: &str) -> Option<[u8; TileKind::FACE_COUNT]> {
    let tiles = crate::tile::parse_tiles(s).ok()?;
    let mut counts = [0u8; TileKind::FACE_COUNT];
    for tile in tiles {
        let slot = &mut counts[tile.kind.to_index() as usize];
        if *slot >= 4 {
            return None;
        }
        *slot += 1;
    }
    Some(counts)
}
