use crate::tile::TileKind;
use smallvec::SmallVec;

/// 国士无双的锚定牌面：生成候选时只在遇到一万时提供
pub const THIRTEEN_ORPHAN_ANCHOR: TileKind = TileKind::Man(1);

/// 面子种类（封闭集合）
///
/// 终端面子：雀头（Pair）、顺子（Run）、刻子（Triple）、杠子（Quad）、
/// 国士无双（SpecialThirteen）。
/// 搜索中间产物：单骑搭子（WeakPair）、两面/嵌张搭子（WeakRun），
/// 二者只用于听牌形状推导，永远不会出现在完成的拆解结果中。
///
/// 每个种类提供三项能力：张数、牌面合法性判定、
/// 以给定首张生成全部可行牌面序列。
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub enum MeldKind {
    /// 雀头（两张同牌面）
    Pair,
    /// 顺子（同花色连续三张）
    Run,
    /// 刻子（三张同牌面）
    Triple,
    /// 杠子（四张同牌面）
    Quad,
    /// 单骑搭子（一张，等成雀头）
    WeakPair,
    /// 顺子搭子（两张，等成顺子）
    WeakRun,
    /// 国士无双（十三种幺九牌面，其一成对，共 14 张）
    SpecialThirteen,
}

impl MeldKind {
    /// 该面子种类的张数
    pub fn tile_count(&self) -> usize {
        match self {
            MeldKind::Pair => 2,
            MeldKind::Run => 3,
            MeldKind::Triple => 3,
            MeldKind::Quad => 4,
            MeldKind::WeakPair => 1,
            MeldKind::WeakRun => 2,
            MeldKind::SpecialThirteen => 14,
        }
    }

    /// 是否为搭子（非终端面子）
    pub fn is_weak(&self) -> bool {
        matches!(self, MeldKind::WeakPair | MeldKind::WeakRun)
    }

    /// 判定一组牌面是否符合该面子种类
    ///
    /// # 参数
    ///
    /// - `faces`：牌面列表，长度必须等于 [`MeldKind::tile_count`]
    ///
    /// # 注意
    ///
    /// 张数不匹配属于调用方契约错误，直接 panic。
    pub fn valid_faces(&self, faces: &[TileKind]) -> bool {
        assert_eq!(
            faces.len(),
            self.tile_count(),
            "meld face count mismatch for {:?}",
            self
        );
        match self {
            MeldKind::Pair | MeldKind::Triple | MeldKind::Quad => {
                faces.iter().all(|&f| f == faces[0])
            }
            MeldKind::Run => faces[0].can_form_run(&faces[1], &faces[2]),
            MeldKind::WeakPair => true,
            MeldKind::WeakRun => {
                let mut sorted = [faces[0], faces[1]];
                sorted.sort();
                match (sorted[0].suit(), sorted[1].suit()) {
                    (Some(s0), Some(s1)) if s0 == s1 => {
                        let r0 = sorted[0].rank().unwrap_or(0);
                        let r1 = sorted[1].rank().unwrap_or(0);
                        r1 - r0 == 1 || r1 - r0 == 2
                    }
                    _ => false,
                }
            }
            MeldKind::SpecialThirteen => {
                let mut counts = [0u8; TileKind::FACE_COUNT];
                for face in faces {
                    if !face.is_orphan() {
                        return false;
                    }
                    counts[face.to_index() as usize] += 1;
                }
                // 十三种幺九全齐，其一恰好成对
                orphan_faces()
                    .iter()
                    .all(|f| counts[f.to_index() as usize] >= 1)
            }
        }
    }

    /// 以给定首张生成该种类全部可行的牌面序列
    ///
    /// 用于拆解候选与副露校验：
    /// - 顺子：`[first, first+1, first+2]`（first 为 1-7 的数牌时唯一）
    /// - 雀头/刻子/杠子：first 重复 arity 次
    /// - 顺子搭子：`[first, first+1]` 与 `[first, first+2]`
    /// - 国士无双：仅当 first 为锚定牌面（一万）时给出全部 13 个变体
    ///
    /// # 返回
    ///
    /// 可行序列列表；该首张无法开始此种类时为空。
    pub fn possible_sequences(&self, first: TileKind) -> Vec<SmallVec<[TileKind; 4]>> {
        match self {
            MeldKind::Pair => vec![SmallVec::from_slice(&[first, first])],
            MeldKind::Triple => vec![SmallVec::from_slice(&[first, first, first])],
            MeldKind::Quad => vec![SmallVec::from_slice(&[first, first, first, first])],
            MeldKind::Run => match (first.shift(1), first.shift(2)) {
                (Some(second), Some(third)) => {
                    vec![SmallVec::from_slice(&[first, second, third])]
                }
                _ => Vec::new(),
            },
            MeldKind::WeakPair => vec![SmallVec::from_slice(&[first])],
            MeldKind::WeakRun => {
                let mut result = Vec::new();
                if let Some(second) = first.shift(1) {
                    result.push(SmallVec::from_slice(&[first, second]));
                }
                if let Some(third) = first.shift(2) {
                    result.push(SmallVec::from_slice(&[first, third]));
                }
                result
            }
            MeldKind::SpecialThirteen => {
                if first != THIRTEEN_ORPHAN_ANCHOR {
                    return Vec::new();
                }
                thirteen_orphan_variants()
            }
        }
    }
}

/// 十三种幺九牌面，按索引顺序
pub fn orphan_faces() -> [TileKind; 13] {
    [
        TileKind::Man(1),
        TileKind::Man(9),
        TileKind::Pin(1),
        TileKind::Pin(9),
        TileKind::Sou(1),
        TileKind::Sou(9),
        TileKind::East,
        TileKind::South,
        TileKind::West,
        TileKind::North,
        TileKind::White,
        TileKind::Green,
        TileKind::Red,
    ]
}

/// 生成国士无双的 13 个 14 张变体
///
/// 每个变体为十三种幺九各一张，外加其中一种的第二张。
/// 调用方（拆解器）在构造时保存结果，避免重复生成。
pub fn thirteen_orphan_variants() -> Vec<SmallVec<[TileKind; 4]>> {
    let faces = orphan_faces();
    faces
        .iter()
        .map(|&doubled| {
            let mut variant: SmallVec<[TileKind; 4]> = SmallVec::new();
            for &face in &faces {
                variant.push(face);
                if face == doubled {
                    variant.push(face);
                }
            }
            variant
        })
        .collect()
}
