use super::decompose::{Decomposition, MeldDecomposer};
use super::meld::Meld;
use super::meld_type::MeldKind;
use crate::tile::TileKind;
use smallvec::SmallVec;

/// 听牌形状
///
/// 变体按分类优先级升序排列：同一张牌在不同拆解下分类不一致时，
/// 取 Ord 意义下的最大值（两面 > 嵌张 > 边张 > 单骑 > 双碰）。
/// 两面排最高是因为平和判定依赖它，其余按结构特异度递减。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub enum WaitShape {
    /// 双碰听（手内雀头等成刻子）
    TripleComplete,
    /// 单骑听（等成雀头；七对子、国士听牌也归此类）
    PairSingle,
    /// 边张听（12 等 3、89 等 7）
    RunEdge,
    /// 嵌张听（顺子中间张）
    RunClosed,
    /// 两面听
    RunTwoSide,
}

/// 听牌集合：等牌牌面到听牌形状的映射，按牌面索引有序
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct WaitingSet {
    waits: Vec<(TileKind, WaitShape)>,
}

impl WaitingSet {
    /// 是否听牌（集合非空）
    pub fn is_waiting(&self) -> bool {
        !self.waits.is_empty()
    }

    /// 是否在等某牌面
    pub fn contains(&self, face: TileKind) -> bool {
        self.waits.iter().any(|(f, _)| *f == face)
    }

    /// 某牌面的听牌形状
    pub fn shape(&self, face: TileKind) -> Option<WaitShape> {
        self.waits
            .iter()
            .find(|(f, _)| *f == face)
            .map(|(_, shape)| *shape)
    }

    /// 等牌数量
    pub fn len(&self) -> usize {
        self.waits.len()
    }

    /// 集合是否为空
    pub fn is_empty(&self) -> bool {
        self.waits.is_empty()
    }

    /// 遍历（牌面，形状）对，按牌面索引升序
    pub fn iter(&self) -> impl Iterator<Item = &(TileKind, WaitShape)> {
        self.waits.iter()
    }

    /// 全部等牌牌面
    pub fn faces(&self) -> Vec<TileKind> {
        self.waits.iter().map(|(f, _)| *f).collect()
    }

    fn push(&mut self, face: TileKind, shape: WaitShape) {
        self.waits.push((face, shape));
    }
}

/// 听牌分析器（WaitingAnalyzer）
///
/// 基于拆解器：对牌面全集中的每一张，检查插入后能否完成和牌，
/// 能则记入听牌集合并给出形状分类。
pub struct WaitingAnalyzer;

impl WaitingAnalyzer {
    /// 计算听牌集合
    ///
    /// # 参数
    ///
    /// - `decomposer`：显式传入的拆解上下文（复用其记忆化表）
    /// - `concealed`：暗牌牌面计数（13 - 3×副露数 张）
    /// - `declared`：副露面子数（0-4）
    ///
    /// # 算法
    ///
    /// 逐一尝试 34 种牌面；手中已有 4 张的牌面跳过（无第五张可摸）。
    /// 插入后对全部适用牌型做和牌拆解，非空即为等牌；
    /// 形状取所有拆解中包含该牌面的面子分类的最大值（见 [`WaitShape`]）。
    pub fn waiting_set(
        decomposer: &mut MeldDecomposer,
        concealed: &[u8; TileKind::FACE_COUNT],
        declared: u8,
    ) -> WaitingSet {
        let mut result = WaitingSet::default();
        let mut working = *concealed;

        for index in 0..TileKind::FACE_COUNT {
            if working[index] >= 4 {
                continue;
            }
            let face = match TileKind::from_index(index as u8) {
                Some(face) => face,
                None => continue,
            };
            working[index] += 1;
            let decompositions = decomposer.win_decompositions(&working, declared);
            working[index] -= 1;

            if let Some(shape) = Self::classify(&decompositions, face) {
                result.push(face, shape);
            }
        }
        result
    }

    /// 是否听牌
    pub fn is_waiting(
        decomposer: &mut MeldDecomposer,
        concealed: &[u8; TileKind::FACE_COUNT],
        declared: u8,
    ) -> bool {
        Self::waiting_set(decomposer, concealed, declared).is_waiting()
    }

    /// 在单个拆解中为某牌面取形状分类（多个面子吸收时取最大值）
    ///
    /// 结算侧用它对和了牌分类：和了牌必在暗牌拆解部分之内。
    pub fn classify_wait(decomposition: &Decomposition, face: TileKind) -> Option<WaitShape> {
        let mut best: Option<WaitShape> = None;
        for meld in decomposition {
            if let Some(shape) = Self::classify_in_meld(meld, face) {
                best = Some(match best {
                    Some(current) if current >= shape => current,
                    _ => shape,
                });
            }
        }
        best
    }

    /// 在全部拆解中为候选牌面取最优形状分类
    fn classify(decompositions: &[Decomposition], face: TileKind) -> Option<WaitShape> {
        let mut best: Option<WaitShape> = None;
        for decomposition in decompositions {
            if let Some(shape) = Self::classify_wait(decomposition, face) {
                best = Some(match best {
                    Some(current) if current >= shape => current,
                    _ => shape,
                });
            }
        }
        best
    }

    /// 候选牌面被某面子吸收时的形状分类
    ///
    /// 把面子去掉一张候选牌面得到剩余搭子，先校验搭子结构
    /// （顺子剩两面/嵌张搭子，刻子剩雀头，雀头剩单骑），
    /// 再按候选牌在顺子中的位置细分。
    fn classify_in_meld(meld: &Meld, face: TileKind) -> Option<WaitShape> {
        if !meld.contains_face(face) {
            return None;
        }
        let mut remainder: SmallVec<[TileKind; 4]> = meld.faces();
        let position = remainder.iter().position(|&f| f == face)?;
        remainder.remove(position);

        match meld.kind() {
            MeldKind::Pair => {
                Meld::from_faces(MeldKind::WeakPair, &remainder, true)?;
                Some(WaitShape::PairSingle)
            }
            MeldKind::Triple => {
                Meld::from_faces(MeldKind::Pair, &remainder, true)?;
                Some(WaitShape::TripleComplete)
            }
            MeldKind::Run => {
                Meld::from_faces(MeldKind::WeakRun, &remainder, true)?;
                let start = meld.first_face().rank()?;
                let rank = face.rank()?;
                if rank == start + 1 {
                    Some(WaitShape::RunClosed)
                } else if rank == start {
                    // 低位端：89 等 7 为边张
                    if start == 7 {
                        Some(WaitShape::RunEdge)
                    } else {
                        Some(WaitShape::RunTwoSide)
                    }
                } else {
                    // 高位端：12 等 3 为边张
                    if start == 1 {
                        Some(WaitShape::RunEdge)
                    } else {
                        Some(WaitShape::RunTwoSide)
                    }
                }
            }
            MeldKind::SpecialThirteen => Some(WaitShape::PairSingle),
            MeldKind::Quad | MeldKind::WeakPair | MeldKind::WeakRun => None,
        }
    }
}
