use std::fmt;
use std::str::FromStr;

/// 牌面类型（不含赤宝牌标记）
///
/// 立直麻将使用 136 张牌：万、筒、索各 36 张（1-9 各 4 张），
/// 风牌（东南西北）与三元牌（白发中）各 4 张，共 34 种牌面。
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub enum TileKind {
    /// 万子（1-9）
    Man(u8),
    /// 筒子（1-9）
    Pin(u8),
    /// 索子（1-9）
    Sou(u8),
    /// 东风
    East,
    /// 南风
    South,
    /// 西风
    West,
    /// 北风
    North,
    /// 白
    White,
    /// 发
    Green,
    /// 中
    Red,
}

impl TileKind {
    /// 牌面种类数：34
    pub const FACE_COUNT: usize = 34;

    /// 每种花色的数字范围：1-9
    pub const MIN_RANK: u8 = 1;
    pub const MAX_RANK: u8 = 9;

    /// 创建一张数牌牌面，验证输入有效性
    pub fn suited(suit: Suit, rank: u8) -> Option<Self> {
        if rank < Self::MIN_RANK || rank > Self::MAX_RANK {
            return None;
        }
        Some(match suit {
            Suit::Man => TileKind::Man(rank),
            Suit::Pin => TileKind::Pin(rank),
            Suit::Sou => TileKind::Sou(rank),
        })
    }

    /// 获取花色（字牌返回 None）
    pub fn suit(&self) -> Option<Suit> {
        match self {
            TileKind::Man(_) => Some(Suit::Man),
            TileKind::Pin(_) => Some(Suit::Pin),
            TileKind::Sou(_) => Some(Suit::Sou),
            _ => None,
        }
    }

    /// 获取数字（1-9，字牌返回 None）
    pub fn rank(&self) -> Option<u8> {
        match self {
            TileKind::Man(r) | TileKind::Pin(r) | TileKind::Sou(r) => Some(*r),
            _ => None,
        }
    }

    /// 是否为数牌
    #[inline]
    pub fn is_suited(&self) -> bool {
        self.suit().is_some()
    }

    /// 是否为字牌（风牌或三元牌）
    #[inline]
    pub fn is_honor(&self) -> bool {
        !self.is_suited()
    }

    /// 是否为老头牌（数牌的 1 或 9）
    pub fn is_terminal(&self) -> bool {
        matches!(self.rank(), Some(1) | Some(9))
    }

    /// 是否为幺九牌（老头牌或字牌）
    ///
    /// 国士无双的十三种牌面即全部幺九牌。
    pub fn is_orphan(&self) -> bool {
        self.is_terminal() || self.is_honor()
    }

    /// 转换为 u8 索引（0-33）
    ///
    /// 映射规则：
    /// - 万子：0-8
    /// - 筒子：9-17
    /// - 索子：18-26
    /// - 东南西北：27-30
    /// - 白发中：31-33
    pub fn to_index(&self) -> u8 {
        match self {
            TileKind::Man(r) => r - 1,
            TileKind::Pin(r) => 9 + r - 1,
            TileKind::Sou(r) => 18 + r - 1,
            TileKind::East => 27,
            TileKind::South => 28,
            TileKind::West => 29,
            TileKind::North => 30,
            TileKind::White => 31,
            TileKind::Green => 32,
            TileKind::Red => 33,
        }
    }

    /// 从 u8 索引创建牌面
    ///
    /// 索引范围：0-33
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0..=8 => Some(TileKind::Man(index + 1)),
            9..=17 => Some(TileKind::Pin(index - 9 + 1)),
            18..=26 => Some(TileKind::Sou(index - 18 + 1)),
            27 => Some(TileKind::East),
            28 => Some(TileKind::South),
            29 => Some(TileKind::West),
            30 => Some(TileKind::North),
            31 => Some(TileKind::White),
            32 => Some(TileKind::Green),
            33 => Some(TileKind::Red),
            _ => None,
        }
    }

    /// 同花色内向上偏移 offset 位（字牌或越界返回 None）
    pub fn shift(&self, offset: u8) -> Option<TileKind> {
        let suit = self.suit()?;
        let rank = self.rank()?;
        TileKind::suited(suit, rank.checked_add(offset)?)
    }

    /// 检查三张牌面是否可以组成顺子（同花色连续三张）
    pub fn can_form_run(&self, other1: &TileKind, other2: &TileKind) -> bool {
        let (Some(s0), Some(s1), Some(s2)) = (self.suit(), other1.suit(), other2.suit()) else {
            return false;
        };
        if s0 != s1 || s0 != s2 {
            return false;
        }
        let mut ranks = [
            self.rank().unwrap_or(0),
            other1.rank().unwrap_or(0),
            other2.rank().unwrap_or(0),
        ];
        ranks.sort();
        ranks[0] + 1 == ranks[1] && ranks[1] + 1 == ranks[2]
    }

    /// 所有 34 种牌面，按索引顺序
    pub fn all() -> impl Iterator<Item = TileKind> {
        (0..Self::FACE_COUNT as u8).filter_map(TileKind::from_index)
    }

    /// 牌面的短码表示
    ///
    /// 数牌为数字加花色字母（"5p"），字牌为单字母：
    /// 东南西北 = E/S/W/N，白发中 = P/F/C。
    pub fn code(&self) -> String {
        match self {
            TileKind::Man(r) => format!("{}m", r),
            TileKind::Pin(r) => format!("{}p", r),
            TileKind::Sou(r) => format!("{}s", r),
            TileKind::East => "E".to_string(),
            TileKind::South => "S".to_string(),
            TileKind::West => "W".to_string(),
            TileKind::North => "N".to_string(),
            TileKind::White => "P".to_string(),
            TileKind::Green => "F".to_string(),
            TileKind::Red => "C".to_string(),
        }
    }
}

/// 花色枚举（仅数牌）
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub enum Suit {
    Man = 0,
    Pin = 1,
    Sou = 2,
}

impl Suit {
    /// 所有花色
    pub fn all() -> [Suit; 3] {
        [Suit::Man, Suit::Pin, Suit::Sou]
    }

    /// 花色字母（m/p/s）
    pub fn letter(&self) -> char {
        match self {
            Suit::Man => 'm',
            Suit::Pin => 'p',
            Suit::Sou => 's',
        }
    }
}

/// 风位（门风/场风）
///
/// 按逆时针行牌顺序排列：东之后为南，以此类推。
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub enum Wind {
    East = 0,
    South = 1,
    West = 2,
    North = 3,
}

impl Wind {
    /// 所有风位，按行牌顺序
    pub fn all() -> [Wind; 4] {
        [Wind::East, Wind::South, Wind::West, Wind::North]
    }

    /// 下一风位（北之后回到东）
    pub fn next(&self) -> Wind {
        match self {
            Wind::East => Wind::South,
            Wind::South => Wind::West,
            Wind::West => Wind::North,
            Wind::North => Wind::East,
        }
    }

    /// 对应的风牌牌面
    pub fn tile_kind(&self) -> TileKind {
        match self {
            Wind::East => TileKind::East,
            Wind::South => TileKind::South,
            Wind::West => TileKind::West,
            Wind::North => TileKind::North,
        }
    }

    /// 从座位偏移创建（0-3）
    pub fn from_index(index: u8) -> Option<Wind> {
        match index {
            0 => Some(Wind::East),
            1 => Some(Wind::South),
            2 => Some(Wind::West),
            3 => Some(Wind::North),
            _ => None,
        }
    }
}

/// 麻将牌
///
/// 牌面加赤宝牌标记。赤宝牌（每花色一张赤五）只影响计分，
/// 拆解与听牌分析只看牌面（[`Tile::same_face`]）。
///
/// 排序规则为（牌面，赤标记在后），即同牌面的赤牌排在普通牌之后，
/// 使多张牌的规范排序对序列化稳定。
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct Tile {
    /// 牌面
    pub kind: TileKind,
    /// 是否为赤宝牌（赤五）
    pub red: bool,
}

impl Tile {
    /// 总牌数：136 张
    pub const TOTAL_COUNT: usize = 136;

    /// 创建一张普通牌
    pub fn new(kind: TileKind) -> Self {
        Self { kind, red: false }
    }

    /// 创建一张赤宝牌（仅数牌 5 有效）
    pub fn red_five(suit: Suit) -> Self {
        let kind = match suit {
            Suit::Man => TileKind::Man(5),
            Suit::Pin => TileKind::Pin(5),
            Suit::Sou => TileKind::Sou(5),
        };
        Self { kind, red: true }
    }

    /// 获取牌面
    #[inline]
    pub fn face(&self) -> TileKind {
        self.kind
    }

    /// 检查是否为同一牌面（忽略赤宝牌标记）
    ///
    /// 拆解、听牌、振听判断全部使用此等价关系。
    #[inline]
    pub fn same_face(&self, other: &Tile) -> bool {
        self.kind == other.kind
    }
}

impl From<TileKind> for Tile {
    fn from(kind: TileKind) -> Self {
        Tile::new(kind)
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.red {
            // 赤五写作 "0m"/"0p"/"0s"
            match self.kind.suit() {
                Some(suit) => write!(f, "0{}", suit.letter()),
                None => write!(f, "{}", self.kind.code()),
            }
        } else {
            write!(f, "{}", self.kind.code())
        }
    }
}

/// 牌短码解析错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTileError {
    /// 无法解析的输入
    pub input: String,
}

impl fmt::Display for ParseTileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid tile code: {:?}", self.input)
    }
}

impl std::error::Error for ParseTileError {}

impl FromStr for Tile {
    type Err = ParseTileError;

    /// 解析单张牌短码："5p"、"0p"（赤五）、"E"、"C" 等
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tiles = parse_tiles(s)?;
        if tiles.len() != 1 {
            return Err(ParseTileError { input: s.to_string() });
        }
        Ok(tiles[0])
    }
}

/// 解析多张牌的短码串
///
/// 数字串后跟花色字母表示一组数牌（"123m" = 一二三万），
/// 数字 0 表示该花色的赤五；字牌为独立字母（"ESWNPFC"）。
///
/// # 参数
///
/// - `s`：短码串，例如 `"123m456p0s55sEC"`
///
/// # 返回
///
/// 按出现顺序排列的牌向量；任何无法识别的字符返回错误。
pub fn parse_tiles(s: &str) -> Result<Vec<Tile>, ParseTileError> {
    let mut result = Vec::new();
    let mut pending_digits: Vec<u8> = Vec::new();

    let err = || ParseTileError { input: s.to_string() };

    for c in s.chars() {
        match c {
            '0'..='9' => pending_digits.push(c as u8 - b'0'),
            'm' | 'p' | 's' => {
                let suit = match c {
                    'm' => Suit::Man,
                    'p' => Suit::Pin,
                    _ => Suit::Sou,
                };
                if pending_digits.is_empty() {
                    return Err(err());
                }
                for &d in &pending_digits {
                    if d == 0 {
                        result.push(Tile::red_five(suit));
                    } else {
                        let kind = TileKind::suited(suit, d).ok_or_else(err)?;
                        result.push(Tile::new(kind));
                    }
                }
                pending_digits.clear();
            }
            'E' => result.push(Tile::new(TileKind::East)),
            'S' => result.push(Tile::new(TileKind::South)),
            'W' => result.push(Tile::new(TileKind::West)),
            'N' => result.push(Tile::new(TileKind::North)),
            'P' => result.push(Tile::new(TileKind::White)),
            'F' => result.push(Tile::new(TileKind::Green)),
            'C' => result.push(Tile::new(TileKind::Red)),
            _ => return Err(err()),
        }
    }
    if !pending_digits.is_empty() {
        // 数字后缺花色字母
        return Err(err());
    }
    Ok(result)
}

/// 格式化多张牌为短码串（逐张拼接，不合并花色前缀）
pub fn format_tiles(tiles: &[Tile]) -> String {
    tiles.iter().map(|t| t.to_string()).collect()
}
