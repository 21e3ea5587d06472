use crate::game::player::SeatState;
use crate::meld::{Meld, MeldKind};
use crate::tile::{Tile, TileKind};

/// 鸣牌校验器
///
/// 全部为纯谓词：只读座位状态，返回布尔或候选列表，不做任何改动。
/// 张数恒等式按「1 张被鸣牌 + 手内张数 = 面子张数」校验。
pub struct ClaimHandler;

impl ClaimHandler {
    /// 检查是否可以碰
    ///
    /// 碰条件：手内至少两张与被打出牌同面的牌（赤五按面计入）。
    pub fn can_pong(seat: &SeatState, tile: Tile) -> bool {
        let held_needed = MeldKind::Triple.tile_count() - 1;
        seat.hand.face_count(tile.face()) as usize >= held_needed
    }

    /// 检查是否可以明杠
    ///
    /// 明杠条件：手内三张同面牌，别家打出第四张。
    pub fn can_kong(seat: &SeatState, tile: Tile) -> bool {
        let held_needed = MeldKind::Quad.tile_count() - 1;
        seat.hand.face_count(tile.face()) as usize >= held_needed
    }

    /// 检查是否可以吃
    ///
    /// # 参数
    ///
    /// - `tile`: 被打出的牌
    /// - `held`: 手内指定的两张搭子牌（赤五须精确指定）
    ///
    /// # 返回
    ///
    /// 三张能构成顺子且两张搭子确实在手内时为 true
    pub fn can_chow(seat: &SeatState, tile: Tile, held: &[Tile; 2]) -> bool {
        if Meld::new(MeldKind::Run, &[tile, held[0], held[1]], false).is_none() {
            return false;
        }
        // 顺子三面互异，两张搭子必为不同牌面
        seat.hand.has_tile(held[0]) && seat.hand.has_tile(held[1])
    }

    /// 枚举吃的全部搭子选项
    ///
    /// # 算法
    ///
    /// 被打出牌为数牌时，依次尝试三种顺子位置（低、中、高），
    /// 对所需的两个牌面枚举手内实际持有的牌值组合；
    /// 含赤五的牌面会同时给出普通与赤五两种选择。
    pub fn chow_options(seat: &SeatState, tile: Tile) -> Vec<[Tile; 2]> {
        let mut options = Vec::new();
        let face = tile.face();
        let rank = match face.rank() {
            Some(rank) => rank,
            None => return options,
        };

        for start_offset in 0..3u8 {
            if rank + start_offset < 3 {
                continue;
            }
            let start_rank = rank + start_offset - 2;
            if start_rank > TileKind::MAX_RANK - 2 {
                continue;
            }
            let mut needed = Vec::with_capacity(2);
            let mut valid = true;
            for step in 0..3u8 {
                let member_rank = start_rank + step;
                if member_rank == rank {
                    continue;
                }
                match face.suit().and_then(|suit| TileKind::suited(suit, member_rank)) {
                    Some(kind) => needed.push(kind),
                    None => {
                        valid = false;
                        break;
                    }
                }
            }
            if !valid || needed.len() != 2 {
                continue;
            }

            for first in Self::held_variants(seat, needed[0]) {
                for second in Self::held_variants(seat, needed[1]) {
                    let candidate = [first, second];
                    if Self::can_chow(seat, tile, &candidate) {
                        options.push(candidate);
                    }
                }
            }
        }
        options
    }

    /// 检查是否可以暗杠
    ///
    /// 暗杠条件：暗牌加进张共四张同面牌。
    pub fn can_concealed_kong(seat: &SeatState, face: TileKind) -> bool {
        seat.held_face_count(face) as usize == MeldKind::Quad.tile_count()
    }

    /// 检查是否可以加杠
    ///
    /// 加杠条件：已有该面的明刻（碰），且指定牌在暗牌或进张中。
    pub fn can_plus_kong(seat: &SeatState, tile: Tile) -> bool {
        let has_open_triple = seat.melds.iter().any(|meld| {
            meld.kind() == MeldKind::Triple && !meld.concealed() && meld.contains_face(tile.face())
        });
        has_open_triple && seat.holds(tile)
    }

    /// 手内某牌面实际持有的不同牌值（普通在前，赤五在后）
    fn held_variants(seat: &SeatState, face: TileKind) -> Vec<Tile> {
        let mut variants = Vec::with_capacity(2);
        let normal = Tile::new(face);
        if seat.hand.has_tile(normal) {
            variants.push(normal);
        }
        let red = Tile { kind: face, red: true };
        if seat.hand.has_tile(red) {
            variants.push(red);
        }
        variants
    }
}
