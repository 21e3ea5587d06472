use super::meld_type::MeldKind;
use crate::tile::{parse_tiles, ParseTileError, Tile, TileKind};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

/// 面子（Meld）
///
/// 一组通过了种类校验的牌，附带暗/明标记。
/// 牌在构造时排成规范顺序（牌面升序，赤牌在后），
/// 因此两个同构面子的序列化结果一致。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct Meld {
    /// 规范顺序的牌列表
    tiles: SmallVec<[Tile; 4]>,
    /// 面子种类
    kind: MeldKind,
    /// 是否为暗面子（暗杠、手内雀头等）
    concealed: bool,
}

impl Meld {
    /// 创建一个面子，校验张数与牌面
    ///
    /// # 返回
    ///
    /// 张数或牌面不符合该种类时返回 None（校验为纯谓词，不抛错误）。
    pub fn new(kind: MeldKind, tiles: &[Tile], concealed: bool) -> Option<Self> {
        if tiles.len() != kind.tile_count() {
            return None;
        }
        let mut sorted: SmallVec<[Tile; 4]> = SmallVec::from_slice(tiles);
        sorted.sort();
        let faces: SmallVec<[TileKind; 4]> = sorted.iter().map(|t| t.kind).collect();
        if !kind.valid_faces(&faces) {
            return None;
        }
        Some(Self {
            tiles: sorted,
            kind,
            concealed,
        })
    }

    /// 从牌面列表创建（全部普通牌），拆解器内部使用
    pub fn from_faces(kind: MeldKind, faces: &[TileKind], concealed: bool) -> Option<Self> {
        let tiles: SmallVec<[Tile; 4]> = faces.iter().map(|&f| Tile::new(f)).collect();
        Self::new(kind, &tiles, concealed)
    }

    /// 面子种类
    #[inline]
    pub fn kind(&self) -> MeldKind {
        self.kind
    }

    /// 规范顺序的牌列表
    #[inline]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// 是否为暗面子
    #[inline]
    pub fn concealed(&self) -> bool {
        self.concealed
    }

    /// 牌面列表（规范顺序）
    pub fn faces(&self) -> SmallVec<[TileKind; 4]> {
        self.tiles.iter().map(|t| t.kind).collect()
    }

    /// 首张牌面
    pub fn first_face(&self) -> TileKind {
        self.tiles[0].kind
    }

    /// 是否包含某牌面
    pub fn contains_face(&self, face: TileKind) -> bool {
        self.tiles.iter().any(|t| t.kind == face)
    }

    /// 是否为终端面子（可出现在完成的拆解或副露中）
    pub fn is_terminal(&self) -> bool {
        !self.kind.is_weak()
    }

    /// 归一化张数贡献
    ///
    /// 杠子代表刻子之外多出的一张，归一化时按 3 计，
    /// 使「四面子一雀头」恒等于 14 张。
    pub fn normalized_count(&self) -> usize {
        match self.kind {
            MeldKind::Quad => 3,
            kind => kind.tile_count(),
        }
    }
}

impl fmt::Display for Meld {
    /// 序列化为短码：规范顺序逐张拼接，暗面子加圆括号
    ///
    /// 例：`2m3m4m`、`(1s1s1s1s)`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.concealed {
            write!(f, "(")?;
        }
        for tile in &self.tiles {
            write!(f, "{}", tile)?;
        }
        if self.concealed {
            write!(f, ")")?;
        }
        Ok(())
    }
}

/// 面子短码解析错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseMeldError {
    /// 无法解析的输入
    pub input: String,
}

impl fmt::Display for ParseMeldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid meld code: {:?}", self.input)
    }
}

impl std::error::Error for ParseMeldError {}

impl From<ParseTileError> for ParseMeldError {
    fn from(err: ParseTileError) -> Self {
        ParseMeldError { input: err.input }
    }
}

impl FromStr for Meld {
    type Err = ParseMeldError;

    /// 解析面子短码，按牌数与牌面推断种类
    ///
    /// 圆括号表示暗面子。只接受终端面子：
    /// 两张同面为雀头，三张为刻子或顺子，四张为杠子，
    /// 十四张为国士无双。
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseMeldError { input: s.to_string() };

        let (concealed, inner) = match s.strip_prefix('(') {
            Some(rest) => (true, rest.strip_suffix(')').ok_or_else(err)?),
            None => (false, s),
        };
        let tiles = parse_tiles(inner)?;

        let kind = match tiles.len() {
            2 => MeldKind::Pair,
            3 => {
                if tiles[0].same_face(&tiles[1]) {
                    MeldKind::Triple
                } else {
                    MeldKind::Run
                }
            }
            4 => MeldKind::Quad,
            14 => MeldKind::SpecialThirteen,
            _ => return Err(err()),
        };
        Meld::new(kind, &tiles, concealed).ok_or_else(err)
    }
}
