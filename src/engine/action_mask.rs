use crate::game::claims::ClaimHandler;
use crate::game::constants::SEAT_COUNT;
use crate::game::round::{next_seat, ClaimWindowKind, Round, RoundPhase};
use crate::tile::{Tile, TileKind, Wall};

/// 动作掩码
///
/// 某一座位在当前阶段下全部合法动作的快照。私有阶段只有当前
/// 行动者拿到非空掩码；公开阶段每个尚未响应的非打牌座位拿到
/// 响应掩码（`must_respond` 为 true，即使只剩过可选）。
///
/// 掩码只描述「提交后不会被拒绝」的动作；荣和掩码已含振听与
/// 无役校验，与 [`Round::submit_claim`] 的判定完全一致。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionMask {
    /// 可以打出的牌（立直后锁定为进张）
    pub can_discard: Vec<Tile>,
    /// 可以立直宣言打出的牌
    pub can_riichi: Vec<Tile>,
    /// 可以暗杠的牌面
    pub can_concealed_kong: Vec<TileKind>,
    /// 可以加杠的牌
    pub can_plus_kong: Vec<Tile>,
    /// 可以自摸
    pub can_tsumo: bool,
    /// 可以吃的搭子组合（仅打牌者下家非空）
    pub can_chow: Vec<[Tile; 2]>,
    /// 可以碰
    pub can_pong: bool,
    /// 可以明杠
    pub can_kong: bool,
    /// 可以荣和
    pub can_ron: bool,
    /// 本窗口仍欠一次响应（过恒为合法响应）
    pub must_respond: bool,
}

impl ActionMask {
    /// 创建空掩码
    pub fn new() -> Self {
        Self::default()
    }

    /// 生成某座位的动作掩码
    ///
    /// # 参数
    ///
    /// - `round`: 对局状态机（听牌/和牌判定需要拆解缓存，故取可变借用）
    /// - `seat`: 目标座位
    ///
    /// # 返回
    ///
    /// 该座位当前的全部合法动作；座位越界、非行动者、已响应
    /// 或对局已终局时为空掩码。
    pub fn generate(round: &mut Round, seat: u8) -> Self {
        if seat >= SEAT_COUNT {
            return ActionMask::new();
        }
        let window = match *round.phase() {
            RoundPhase::Private { seat: actor } => {
                if actor != seat {
                    return ActionMask::new();
                }
                None
            }
            RoundPhase::Public {
                discarder,
                tile,
                kind,
                ref responses,
            } => {
                if seat == discarder || responses[seat as usize].is_some() {
                    return ActionMask::new();
                }
                Some((discarder, tile, kind))
            }
            RoundPhase::Over { .. } => return ActionMask::new(),
        };
        match window {
            None => Self::private_mask(round, seat),
            Some((discarder, tile, kind)) => Self::claim_mask(round, seat, discarder, tile, kind),
        }
    }

    /// 除过以外是否存在可选的响应
    pub fn has_claim_choice(&self) -> bool {
        self.can_ron || self.can_kong || self.can_pong || !self.can_chow.is_empty()
    }

    /// 私有阶段行动者的掩码
    ///
    /// # 算法
    ///
    /// 打牌候选取手牌不同牌值加进张（立直后只剩进张）；立直宣言、
    /// 暗杠、加杠、自摸各走状态机同一套校验谓词，保证掩码给出的
    /// 动作提交必成。
    fn private_mask(round: &mut Round, seat: u8) -> Self {
        let mut mask = ActionMask::new();
        let state = &round.seats[seat as usize];
        if state.riichi.is_declared() {
            if let Some(drawn) = state.drawn {
                mask.can_discard.push(drawn);
            }
        } else {
            mask.can_discard = state.hand.distinct_tiles().to_vec();
            if let Some(drawn) = state.drawn {
                if !mask.can_discard.contains(&drawn) {
                    mask.can_discard.push(drawn);
                }
            }
        }
        mask.can_plus_kong = Self::plus_kong_options(round, seat);
        mask.can_riichi = round.riichi_discard_options(seat);
        mask.can_concealed_kong = round.concealed_kong_options(seat);
        mask.can_tsumo = round.check_tsumo(seat).is_ok();
        mask
    }

    /// 公开阶段响应座位的掩码
    ///
    /// 抢杠窗口只给荣和；立直座位只给荣和；吃只给打牌者下家。
    fn claim_mask(
        round: &mut Round,
        seat: u8,
        discarder: u8,
        tile: Tile,
        kind: ClaimWindowKind,
    ) -> Self {
        let mut mask = ActionMask::new();
        mask.must_respond = true;
        mask.can_ron = round
            .check_ron(seat, tile, kind == ClaimWindowKind::AddedKong)
            .is_ok();
        if kind == ClaimWindowKind::AddedKong {
            return mask;
        }
        let state = &round.seats[seat as usize];
        if state.riichi.is_declared() {
            return mask;
        }
        mask.can_pong = ClaimHandler::can_pong(state, tile);
        mask.can_kong = ClaimHandler::can_kong(state, tile)
            && round.wall().replacement_count() < Wall::MAX_REPLACEMENTS
            && round.wall().live_remaining() > 0;
        if seat == next_seat(discarder) {
            mask.can_chow = ClaimHandler::chow_options(&round.seats[seat as usize], tile);
        }
        mask
    }

    /// 枚举可加杠的牌（无进张、立直或岭上耗尽时为空）
    fn plus_kong_options(round: &Round, seat: u8) -> Vec<Tile> {
        let state = &round.seats[seat as usize];
        if state.drawn.is_none() || state.riichi.is_declared() {
            return Vec::new();
        }
        if round.wall().replacement_count() >= Wall::MAX_REPLACEMENTS
            || round.wall().live_remaining() == 0
        {
            return Vec::new();
        }

        let mut options: Vec<Tile> = state
            .hand
            .distinct_tiles()
            .iter()
            .copied()
            .filter(|&tile| ClaimHandler::can_plus_kong(state, tile))
            .collect();
        if let Some(drawn) = state.drawn {
            if !options.contains(&drawn) && ClaimHandler::can_plus_kong(state, drawn) {
                options.push(drawn);
            }
        }
        options
    }
}

impl Round {
    /// 四个座位各自的动作掩码
    ///
    /// 任意阶段均可调用；无事可做的座位得到空掩码。
    pub fn action_masks(&mut self) -> [ActionMask; 4] {
        std::array::from_fn(|seat| ActionMask::generate(self, seat as u8))
    }
}
