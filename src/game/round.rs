use crate::game::action::{ClaimResponse, PrivateAction};
use crate::game::claims::ClaimHandler;
use crate::game::constants::{
    HAND_SIZE, INITIAL_POINTS, MIN_RIICHI_POINTS, MIN_RIICHI_WALL, RIICHI_DEPOSIT, SEAT_COUNT,
};
use crate::game::history::DeclareHistory;
use crate::game::player::{RiichiStatus, SeatState};
use crate::meld::{Decomposition, Meld, MeldDecomposer, MeldKind, WaitingAnalyzer, WaitingSet};
use crate::score::points::{PointTable, SimplePointTable};
use crate::score::settle::{RoundResult, ScoringAggregator, WinnerInput};
use crate::score::yaku::{WinContext, WinMode, YakuSet};
use crate::tile::{Tile, TileKind, Wall, Wind};
use smallvec::SmallVec;
use std::fmt;

/// 公开阶段的窗口种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ClaimWindowKind {
    /// 打牌后的鸣牌窗口（吃/碰/杠/荣/过）
    Discard,
    /// 加杠后的抢杠窗口（仅荣/过）
    AddedKong,
}

/// 对局阶段
///
/// 状态机只有三个阶段：私有（单一座位行动）、公开（鸣牌窗口，
/// 其余座位各提交一次响应）、终局。窗口响应存放在阶段值内，
/// 收齐后一次性仲裁。
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum RoundPhase {
    /// 私有阶段：`seat` 为当前行动者
    Private {
        /// 行动座位
        seat: u8,
    },
    /// 公开阶段：等待其余座位响应
    Public {
        /// 打出（或加杠宣告）该牌的座位
        discarder: u8,
        /// 被鸣对象牌
        tile: Tile,
        /// 窗口种类
        kind: ClaimWindowKind,
        /// 各座位的响应槽（打牌者一侧恒为 None）
        responses: [Option<ClaimResponse>; 4],
    },
    /// 终局阶段
    Over {
        /// 结算结果
        result: RoundResult,
    },
}

/// 对局配置
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RoundConfig {
    /// 各家起始点数
    pub initial_points: i32,
    /// 庄家座位
    pub dealer: u8,
    /// 场风
    pub prevailing_wind: Wind,
    /// 本场数（场供单位数）
    pub seat_wind_turn: u32,
    /// 上局遗留的供托立直棒
    pub carried_sticks: u32,
    /// 洗牌种子（None 时随机）
    pub seed: Option<u64>,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            initial_points: INITIAL_POINTS,
            dealer: 0,
            prevailing_wind: Wind::East,
            seat_wind_turn: 0,
            carried_sticks: 0,
            seed: None,
        }
    }
}

/// 对局错误
///
/// 全部为校验类错误：拒绝时不发生任何状态变更，调用方可换一个
/// 动作重试。内部不变量被破坏时不走此枚举而直接 panic。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundError {
    /// 座位号越界
    InvalidSeat,
    /// 当前阶段不接受该动作
    WrongPhase,
    /// 该座位不是当前行动者
    WrongActor,
    /// 引用的牌不在手中
    TileNotHeld,
    /// 该座位已对本窗口作出响应
    AlreadyResponded,
    /// 响应对本窗口不合法（吃非下家、抢杠窗口鸣牌、组合不成面子等）
    InvalidClaim,
    /// 手牌不构成和牌形
    NotWinning,
    /// 和牌形成立但无任何役种
    NoYaku,
    /// 振听，荣和被拒
    Furiten,
    /// 没有待处理的进张
    NoPendingTile,
    /// 立直前提条件不满足
    RiichiNotAllowed,
    /// 立直锁定：只能打进张，或杠会改变听牌
    RiichiLocked,
    /// 岭上无牌可补，杠被拒
    WallExhausted,
    /// 对局已结束
    RoundOver,
}

impl fmt::Display for RoundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            RoundError::InvalidSeat => "seat index out of range",
            RoundError::WrongPhase => "action not available in the current phase",
            RoundError::WrongActor => "seat is not the current actor",
            RoundError::TileNotHeld => "referenced tiles are not held",
            RoundError::AlreadyResponded => "seat already responded to this window",
            RoundError::InvalidClaim => "claim is not legal for this window",
            RoundError::NotWinning => "hand does not form a winning shape",
            RoundError::NoYaku => "winning hand carries no yaku",
            RoundError::Furiten => "ron blocked by furiten",
            RoundError::NoPendingTile => "no pending drawn tile",
            RoundError::RiichiNotAllowed => "riichi preconditions not met",
            RoundError::RiichiLocked => "action forbidden after riichi",
            RoundError::WallExhausted => "no replacement draw available",
            RoundError::RoundOver => "round already over",
        };
        write!(f, "{}", message)
    }
}

impl std::error::Error for RoundError {}

/// 动作处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// 打牌（或加杠宣告）后开启了鸣牌窗口
    WindowOpened,
    /// 响应已登记，窗口尚未收齐
    Waiting,
    /// 全过，轮转到下一座位（已摸牌）
    TurnAdvanced {
        /// 新的行动座位
        seat: u8,
    },
    /// 吃/碰成立，行动权移交鸣牌者
    ClaimResolved {
        /// 鸣牌座位
        seat: u8,
    },
    /// 杠成立（明杠、暗杠或加杠完成），已摸岭上牌
    KongResolved {
        /// 开杠座位
        seat: u8,
    },
    /// 对局结束，结果见 [`Round::result`]
    RoundEnded,
}

/// 对局状态机
///
/// 唯一的状态写入者。私有阶段接受行动座位的
/// [`PrivateAction`]，公开阶段从其余每个座位各收集一次
/// [`ClaimResponse`]，收齐后按 荣 > 杠 > 碰 > 吃 仲裁。
/// 所有校验失败都在变更状态之前返回错误。
pub struct Round {
    /// 四家座位状态
    pub seats: [SeatState; 4],
    phase: RoundPhase,
    /// 全局巡目，座位成为私有行动者时递增
    turn: u32,
    dealer: u8,
    prevailing_wind: Wind,
    seat_wind_turn: u32,
    stick_pool: u32,
    history: DeclareHistory,
    wall: Wall,
    decomposer: MeldDecomposer,
    yaku_set: YakuSet,
    point_table: Box<dyn PointTable>,
}

impl Round {
    /// 以默认协作者（标准役种表 + 简易点数表）开局
    pub fn new(config: RoundConfig) -> Self {
        Self::with_collaborators(config, YakuSet::standard(), Box::new(SimplePointTable))
    }

    /// 以外部役种表与点数表开局
    ///
    /// # 算法
    ///
    /// 洗牌后每家发 13 张，庄家摸第一张进张，阶段置为庄家私有，
    /// 巡目从 1 起计。门风按庄家为东依次顺延。
    pub fn with_collaborators(
        config: RoundConfig,
        yaku_set: YakuSet,
        point_table: Box<dyn PointTable>,
    ) -> Self {
        let mut wall = Wall::new();
        match config.seed {
            Some(seed) => wall.shuffle_seeded(seed),
            None => wall.shuffle(),
        }

        let dealer = config.dealer % SEAT_COUNT;
        let winds = Wind::all();
        let mut seats: [SeatState; 4] = std::array::from_fn(|index| {
            let offset = (index as u8 + SEAT_COUNT - dealer) % SEAT_COUNT;
            SeatState::new(index as u8, winds[offset as usize], config.initial_points)
        });

        for _ in 0..HAND_SIZE {
            for seat in seats.iter_mut() {
                match wall.draw() {
                    Some(tile) => {
                        seat.hand.add_tile(tile);
                    }
                    None => panic!("wall must cover the initial deal"),
                }
            }
        }
        match wall.draw() {
            Some(tile) => seats[dealer as usize].drawn = Some(tile),
            None => panic!("wall must cover the initial deal"),
        }
        seats[dealer as usize].turn_count = 1;

        Self {
            seats,
            phase: RoundPhase::Private { seat: dealer },
            turn: 1,
            dealer,
            prevailing_wind: config.prevailing_wind,
            seat_wind_turn: config.seat_wind_turn,
            stick_pool: config.carried_sticks,
            history: DeclareHistory::new(),
            wall,
            decomposer: MeldDecomposer::new(),
            yaku_set,
            point_table,
        }
    }

    /// 当前阶段
    pub fn phase(&self) -> &RoundPhase {
        &self.phase
    }

    /// 终局结果（未终局时为 None）
    pub fn result(&self) -> Option<&RoundResult> {
        match &self.phase {
            RoundPhase::Over { result } => Some(result),
            _ => None,
        }
    }

    /// 宣告历史
    pub fn history(&self) -> &DeclareHistory {
        &self.history
    }

    /// 牌墙
    pub fn wall(&self) -> &Wall {
        &self.wall
    }

    /// 当前供托立直棒数量
    pub fn stick_pool(&self) -> u32 {
        self.stick_pool
    }

    /// 当前巡目
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// 庄家座位
    pub fn dealer(&self) -> u8 {
        self.dealer
    }

    /// 场风
    pub fn prevailing_wind(&self) -> Wind {
        self.prevailing_wind
    }

    /// 本场数
    pub fn seat_wind_turn(&self) -> u32 {
        self.seat_wind_turn
    }

    /// 某座位暗牌部分的听牌集合
    ///
    /// 以 13 张归一化形态为准（进张不计入）；鸣牌后待打的
    /// 14 张形态下集合为空。
    pub fn waiting(&mut self, seat: u8) -> WaitingSet {
        let state = &self.seats[seat as usize];
        let counts = state.concealed_counts();
        let declared = state.declared_meld_count();
        let total: u8 = counts.iter().sum();
        // 鸣牌后尚未打出时暗牌是 14 张形态，不构成听牌查询对象
        if usize::from(total) + usize::from(declared) * 3 != HAND_SIZE {
            return WaitingSet::default();
        }
        WaitingAnalyzer::waiting_set(&mut self.decomposer, &counts, declared)
    }

    /// 提交私有阶段动作
    ///
    /// # 参数
    ///
    /// - `seat`: 动作座位，必须是当前行动者
    /// - `action`: 打牌 / 立直 / 暗杠 / 加杠 / 自摸
    ///
    /// # 返回
    ///
    /// 校验失败时返回错误且状态不变。
    pub fn submit_private(
        &mut self,
        seat: u8,
        action: PrivateAction,
    ) -> Result<ActionOutcome, RoundError> {
        if seat >= SEAT_COUNT {
            return Err(RoundError::InvalidSeat);
        }
        let actor = match self.phase {
            RoundPhase::Private { seat: actor } => actor,
            RoundPhase::Public { .. } => return Err(RoundError::WrongPhase),
            RoundPhase::Over { .. } => return Err(RoundError::RoundOver),
        };
        if seat != actor {
            return Err(RoundError::WrongActor);
        }

        match action {
            PrivateAction::Discard { tile } => self.handle_discard(seat, tile),
            PrivateAction::Riichi { tile } => self.handle_riichi(seat, tile),
            PrivateAction::ConcealedKong { face } => self.handle_concealed_kong(seat, face),
            PrivateAction::PlusKong { tile } => self.handle_plus_kong(seat, tile),
            PrivateAction::Tsumo => self.handle_tsumo(seat),
        }
    }

    /// 提交公开阶段响应
    ///
    /// 每个非打牌座位恰好提交一次；收齐三份后立即仲裁。
    /// 荣和并不提前结算，后到的荣和同样参与多家荣和。
    pub fn submit_claim(
        &mut self,
        seat: u8,
        response: ClaimResponse,
    ) -> Result<ActionOutcome, RoundError> {
        if seat >= SEAT_COUNT {
            return Err(RoundError::InvalidSeat);
        }
        let (discarder, tile, kind, mut responses) = match &self.phase {
            RoundPhase::Public {
                discarder,
                tile,
                kind,
                responses,
            } => (*discarder, *tile, *kind, *responses),
            RoundPhase::Private { .. } => return Err(RoundError::WrongPhase),
            RoundPhase::Over { .. } => return Err(RoundError::RoundOver),
        };
        if seat == discarder {
            return Err(RoundError::WrongActor);
        }
        if responses[seat as usize].is_some() {
            return Err(RoundError::AlreadyResponded);
        }
        self.validate_claim(seat, discarder, tile, kind, response)?;

        responses[seat as usize] = Some(response);
        let complete = (0..SEAT_COUNT)
            .filter(|&player| player != discarder)
            .all(|player| responses[player as usize].is_some());
        if complete {
            Ok(self.resolve_window(discarder, tile, kind, responses))
        } else {
            self.phase = RoundPhase::Public {
                discarder,
                tile,
                kind,
                responses,
            };
            Ok(ActionOutcome::Waiting)
        }
    }

    /// 校验荣和：和牌形、振听、至少一番
    pub(crate) fn check_ron(
        &mut self,
        seat: u8,
        tile: Tile,
        robbing: bool,
    ) -> Result<(), RoundError> {
        let state = &self.seats[seat as usize];
        let counts = state.counts_with(tile.face());
        let declared = state.declared_meld_count();
        let decompositions = self.decomposer.win_decompositions(&counts, declared);
        if decompositions.is_empty() {
            return Err(RoundError::NotWinning);
        }
        if self.is_furiten(seat, tile.face()) {
            return Err(RoundError::Furiten);
        }
        let context = self.win_context(seat, WinMode::Claim, robbing, false);
        let input = WinnerInput {
            seat,
            decompositions: &decompositions,
            declared: &self.seats[seat as usize].melds,
            win_tile: tile,
            context,
        };
        let aggregator = ScoringAggregator::new(&self.yaku_set, self.point_table.as_ref());
        let (fan, _) = aggregator.best_evaluation(&input);
        if fan == 0 {
            return Err(RoundError::NoYaku);
        }
        Ok(())
    }

    /// 校验自摸：有进张、和牌形、至少一番（振听不拦自摸）
    pub(crate) fn check_tsumo(&mut self, seat: u8) -> Result<(), RoundError> {
        let state = &self.seats[seat as usize];
        let drawn = match state.drawn {
            Some(tile) => tile,
            None => return Err(RoundError::NoPendingTile),
        };
        let counts = state.counts_with(drawn.face());
        let declared = state.declared_meld_count();
        let decompositions = self.decomposer.win_decompositions(&counts, declared);
        if decompositions.is_empty() {
            return Err(RoundError::NotWinning);
        }
        let last_tile = self.wall.live_remaining() == 0;
        let context = self.win_context(seat, WinMode::SelfDraw, false, last_tile);
        let input = WinnerInput {
            seat,
            decompositions: &decompositions,
            declared: &self.seats[seat as usize].melds,
            win_tile: drawn,
            context,
        };
        let aggregator = ScoringAggregator::new(&self.yaku_set, self.point_table.as_ref());
        let (fan, _) = aggregator.best_evaluation(&input);
        if fan == 0 {
            return Err(RoundError::NoYaku);
        }
        Ok(())
    }

    /// 振听判定
    ///
    /// 听牌集合非空，且满足其一：任一等牌牌面出现在自家弃牌历史中
    /// （弃牌被鸣走不解除，历史只增不减）；或该牌面曾在等牌时被
    /// 本座位放过（过水），过水记录整局有效。
    pub(crate) fn is_furiten(&mut self, seat: u8, face: TileKind) -> bool {
        let state = &self.seats[seat as usize];
        let counts = state.concealed_counts();
        let declared = state.declared_meld_count();
        let waits = WaitingAnalyzer::waiting_set(&mut self.decomposer, &counts, declared);
        if waits.is_empty() {
            return false;
        }
        let own_discards = self.history.discards_since(seat, 0, false);
        for (wait_face, _) in waits.iter() {
            if own_discards.iter().any(|tile| tile.face() == *wait_face) {
                return true;
            }
        }
        waits.contains(face) && self.seats[seat as usize].has_passed_wait(face)
    }

    /// 立直时可宣言打出的牌（不满足前提时为空）
    pub(crate) fn riichi_discard_options(&mut self, seat: u8) -> Vec<Tile> {
        if self.wall.live_remaining() < MIN_RIICHI_WALL {
            return Vec::new();
        }
        let state = &self.seats[seat as usize];
        if state.riichi.is_declared() || !state.is_concealed() || state.score < MIN_RIICHI_POINTS {
            return Vec::new();
        }
        let base = match state.counts_with_drawn() {
            Some(counts) => counts,
            None => return Vec::new(),
        };
        let declared = state.declared_meld_count();
        let mut candidates: Vec<Tile> = state.hand.distinct_tiles().to_vec();
        if let Some(drawn) = state.drawn {
            if !candidates.contains(&drawn) {
                candidates.push(drawn);
            }
        }

        let mut options = Vec::new();
        for tile in candidates {
            let mut counts = base;
            counts[tile.face().to_index() as usize] -= 1;
            if WaitingAnalyzer::is_waiting(&mut self.decomposer, &counts, declared) {
                options.push(tile);
            }
        }
        options
    }

    /// 当前可宣告的暗杠牌面（立直下只剩不改听的进张面）
    pub(crate) fn concealed_kong_options(&mut self, seat: u8) -> Vec<TileKind> {
        if self.wall.replacement_count() >= Wall::MAX_REPLACEMENTS
            || self.wall.live_remaining() == 0
        {
            return Vec::new();
        }
        let state = &self.seats[seat as usize];
        let drawn = match state.drawn {
            Some(tile) => tile,
            None => return Vec::new(),
        };
        let riichi = state.riichi.is_declared();
        let counts = state.counts_with(drawn.face());

        let mut faces = Vec::new();
        for (index, &count) in counts.iter().enumerate() {
            if count < 4 {
                continue;
            }
            let face = match TileKind::from_index(index as u8) {
                Some(face) => face,
                None => continue,
            };
            if riichi && (face != drawn.face() || !self.kong_keeps_waits(seat, face)) {
                continue;
            }
            faces.push(face);
        }
        faces
    }

    fn handle_discard(&mut self, seat: u8, tile: Tile) -> Result<ActionOutcome, RoundError> {
        let state = &self.seats[seat as usize];
        if !state.holds(tile) {
            return Err(RoundError::TileNotHeld);
        }
        if state.riichi.is_declared() && state.drawn != Some(tile) {
            return Err(RoundError::RiichiLocked);
        }
        Ok(self.perform_discard(seat, tile))
    }

    fn handle_riichi(&mut self, seat: u8, tile: Tile) -> Result<ActionOutcome, RoundError> {
        let state = &self.seats[seat as usize];
        if state.riichi.is_declared() {
            return Err(RoundError::RiichiNotAllowed);
        }
        if !state.holds(tile) {
            return Err(RoundError::TileNotHeld);
        }
        if !state.is_concealed() || state.score < MIN_RIICHI_POINTS {
            return Err(RoundError::RiichiNotAllowed);
        }
        if self.wall.live_remaining() < MIN_RIICHI_WALL {
            return Err(RoundError::RiichiNotAllowed);
        }
        let declared = state.declared_meld_count();
        let mut counts = match state.counts_with_drawn() {
            Some(counts) => counts,
            None => return Err(RoundError::NoPendingTile),
        };
        // holds 已验证，计数必不为零
        counts[tile.face().to_index() as usize] -= 1;
        if !WaitingAnalyzer::is_waiting(&mut self.decomposer, &counts, declared) {
            return Err(RoundError::RiichiNotAllowed);
        }

        let double = self.seats[seat as usize].turn_count == 1 && !self.history.has_declared_since(1);
        let state = &mut self.seats[seat as usize];
        state.riichi = RiichiStatus::Declared {
            turn: self.turn,
            double,
        };
        state.score -= RIICHI_DEPOSIT;
        self.stick_pool += 1;
        Ok(self.perform_discard(seat, tile))
    }

    fn handle_concealed_kong(
        &mut self,
        seat: u8,
        face: TileKind,
    ) -> Result<ActionOutcome, RoundError> {
        let drawn = match self.seats[seat as usize].drawn {
            Some(tile) => tile,
            None => return Err(RoundError::NoPendingTile),
        };
        if !ClaimHandler::can_concealed_kong(&self.seats[seat as usize], face) {
            return Err(RoundError::TileNotHeld);
        }
        if self.seats[seat as usize].riichi.is_declared()
            && (face != drawn.face() || !self.kong_keeps_waits(seat, face))
        {
            return Err(RoundError::RiichiLocked);
        }
        if self.wall.replacement_count() >= Wall::MAX_REPLACEMENTS
            || self.wall.live_remaining() == 0
        {
            return Err(RoundError::WallExhausted);
        }

        let state = &mut self.seats[seat as usize];
        state.merge_drawn();
        let mut tiles: SmallVec<[Tile; 4]> = SmallVec::new();
        for _ in 0..4 {
            match state.hand.take_face(face) {
                Some(tile) => tiles.push(tile),
                None => panic!("concealed kong tiles vanished from the hand"),
            }
        }
        let meld = match Meld::new(MeldKind::Quad, &tiles, true) {
            Some(meld) => meld,
            None => panic!("concealed kong tiles must form a quad"),
        };
        state.melds.push(meld);
        self.history.record_declare(self.turn);
        self.draw_replacement_for(seat);
        Ok(ActionOutcome::KongResolved { seat })
    }

    fn handle_plus_kong(&mut self, seat: u8, tile: Tile) -> Result<ActionOutcome, RoundError> {
        let state = &self.seats[seat as usize];
        if state.drawn.is_none() {
            return Err(RoundError::NoPendingTile);
        }
        if state.riichi.is_declared() {
            return Err(RoundError::RiichiLocked);
        }
        if !state.holds(tile) {
            return Err(RoundError::TileNotHeld);
        }
        if !ClaimHandler::can_plus_kong(state, tile) {
            return Err(RoundError::InvalidClaim);
        }
        if self.wall.replacement_count() >= Wall::MAX_REPLACEMENTS
            || self.wall.live_remaining() == 0
        {
            return Err(RoundError::WallExhausted);
        }

        let state = &mut self.seats[seat as usize];
        state.merge_drawn();
        if !state.hand.remove_tile(tile) {
            panic!("added kong tile vanished from the hand");
        }
        // 抢杠窗口：加杠在其余座位全过之后才完成
        self.phase = RoundPhase::Public {
            discarder: seat,
            tile,
            kind: ClaimWindowKind::AddedKong,
            responses: [None; 4],
        };
        Ok(ActionOutcome::WindowOpened)
    }

    fn handle_tsumo(&mut self, seat: u8) -> Result<ActionOutcome, RoundError> {
        self.check_tsumo(seat)?;
        let drawn = match self.seats[seat as usize].drawn {
            Some(tile) => tile,
            None => panic!("tsumo validated without a pending tile"),
        };
        let last_tile = self.wall.live_remaining() == 0;
        self.finish_win(&[seat], None, drawn, false, last_tile);
        Ok(ActionOutcome::RoundEnded)
    }

    /// 打出一张已验证的牌
    ///
    /// 牌墙打空时不开窗口，直接流局终局。
    fn perform_discard(&mut self, seat: u8, tile: Tile) -> ActionOutcome {
        let state = &mut self.seats[seat as usize];
        state.merge_drawn();
        if !state.hand.remove_tile(tile) {
            panic!("discard tile vanished from the hand");
        }
        state.river.push(tile);
        self.history.record_discard(self.turn, seat, tile);

        if self.wall.live_remaining() == 0 {
            self.finish_exhaustive_draw();
            return ActionOutcome::RoundEnded;
        }
        self.phase = RoundPhase::Public {
            discarder: seat,
            tile,
            kind: ClaimWindowKind::Discard,
            responses: [None; 4],
        };
        ActionOutcome::WindowOpened
    }

    fn validate_claim(
        &mut self,
        seat: u8,
        discarder: u8,
        tile: Tile,
        kind: ClaimWindowKind,
        response: ClaimResponse,
    ) -> Result<(), RoundError> {
        // 立直后只许荣和或过
        if self.seats[seat as usize].riichi.is_declared()
            && !matches!(response, ClaimResponse::Ron | ClaimResponse::Pass)
        {
            return Err(RoundError::RiichiLocked);
        }
        match response {
            ClaimResponse::Pass => Ok(()),
            ClaimResponse::Ron => self.check_ron(seat, tile, kind == ClaimWindowKind::AddedKong),
            ClaimResponse::Chow { tiles } => {
                if kind == ClaimWindowKind::AddedKong || seat != next_seat(discarder) {
                    return Err(RoundError::InvalidClaim);
                }
                let state = &self.seats[seat as usize];
                let held = if tiles[0] == tiles[1] {
                    state.hand.tile_count(tiles[0]) >= 2
                } else {
                    state.hand.has_tile(tiles[0]) && state.hand.has_tile(tiles[1])
                };
                if !held {
                    return Err(RoundError::TileNotHeld);
                }
                if !ClaimHandler::can_chow(state, tile, &tiles) {
                    return Err(RoundError::InvalidClaim);
                }
                Ok(())
            }
            ClaimResponse::Pong => {
                if kind == ClaimWindowKind::AddedKong {
                    return Err(RoundError::InvalidClaim);
                }
                if !ClaimHandler::can_pong(&self.seats[seat as usize], tile) {
                    return Err(RoundError::TileNotHeld);
                }
                Ok(())
            }
            ClaimResponse::Kong => {
                if kind == ClaimWindowKind::AddedKong {
                    return Err(RoundError::InvalidClaim);
                }
                if !ClaimHandler::can_kong(&self.seats[seat as usize], tile) {
                    return Err(RoundError::TileNotHeld);
                }
                if self.wall.replacement_count() >= Wall::MAX_REPLACEMENTS
                    || self.wall.live_remaining() == 0
                {
                    return Err(RoundError::WallExhausted);
                }
                Ok(())
            }
        }
    }

    /// 仲裁收齐的窗口
    ///
    /// # 算法
    ///
    /// 先登记过水（所有未荣和且等着这张牌的座位），再按优先级裁决：
    /// 荣和（可多家）> 杠 > 碰（并列时取打牌者顺位最近者）> 吃。
    /// 抢杠窗口无人荣和时完成加杠。全员过时下家摸牌，摸不到则流局。
    fn resolve_window(
        &mut self,
        discarder: u8,
        tile: Tile,
        kind: ClaimWindowKind,
        responses: [Option<ClaimResponse>; 4],
    ) -> ActionOutcome {
        self.record_passed_waits(discarder, tile, &responses);

        let mut ron_seats: SmallVec<[u8; 3]> = SmallVec::new();
        let mut probe = next_seat(discarder);
        while probe != discarder {
            if responses[probe as usize] == Some(ClaimResponse::Ron) {
                ron_seats.push(probe);
            }
            probe = next_seat(probe);
        }
        if !ron_seats.is_empty() {
            let robbing = kind == ClaimWindowKind::AddedKong;
            self.finish_win(&ron_seats, Some(discarder), tile, robbing, false);
            return ActionOutcome::RoundEnded;
        }

        if kind == ClaimWindowKind::AddedKong {
            return self.complete_added_kong(discarder, tile);
        }

        if let Some(claimant) =
            self.priority_claimant(discarder, &responses, |response| {
                matches!(response, ClaimResponse::Kong)
            })
        {
            return self.execute_kong_claim(claimant, discarder, tile);
        }
        if let Some(claimant) =
            self.priority_claimant(discarder, &responses, |response| {
                matches!(response, ClaimResponse::Pong)
            })
        {
            return self.execute_pong(claimant, discarder, tile);
        }
        let chow_seat = next_seat(discarder);
        if let Some(ClaimResponse::Chow { tiles }) = responses[chow_seat as usize] {
            return self.execute_chow(chow_seat, discarder, tile, tiles);
        }

        let next = next_seat(discarder);
        match self.wall.draw() {
            Some(drawn) => {
                self.seats[next as usize].drawn = Some(drawn);
                self.turn += 1;
                self.seats[next as usize].turn_count += 1;
                self.phase = RoundPhase::Private { seat: next };
                ActionOutcome::TurnAdvanced { seat: next }
            }
            None => {
                self.finish_exhaustive_draw();
                ActionOutcome::RoundEnded
            }
        }
    }

    /// 给所有未荣和且等着这张牌面的座位记过水
    fn record_passed_waits(
        &mut self,
        discarder: u8,
        tile: Tile,
        responses: &[Option<ClaimResponse>; 4],
    ) {
        let face = tile.face();
        for seat in 0..SEAT_COUNT {
            if seat == discarder || responses[seat as usize] == Some(ClaimResponse::Ron) {
                continue;
            }
            let counts = self.seats[seat as usize].concealed_counts();
            let declared = self.seats[seat as usize].declared_meld_count();
            let waits = WaitingAnalyzer::waiting_set(&mut self.decomposer, &counts, declared);
            if waits.contains(face) {
                self.seats[seat as usize].record_passed_wait(face);
            }
        }
    }

    /// 从打牌者顺位开始找第一个匹配的响应座位
    fn priority_claimant(
        &self,
        discarder: u8,
        responses: &[Option<ClaimResponse>; 4],
        matches: impl Fn(&ClaimResponse) -> bool,
    ) -> Option<u8> {
        let mut probe = next_seat(discarder);
        while probe != discarder {
            if let Some(response) = &responses[probe as usize] {
                if matches(response) {
                    return Some(probe);
                }
            }
            probe = next_seat(probe);
        }
        None
    }

    fn execute_pong(&mut self, claimant: u8, discarder: u8, tile: Tile) -> ActionOutcome {
        self.take_from_river(discarder, tile);
        let mut tiles = self.take_face_tiles(claimant, tile.face(), 2);
        tiles.push(tile);
        let meld = match Meld::new(MeldKind::Triple, &tiles, false) {
            Some(meld) => meld,
            None => panic!("pong tiles must form a triple"),
        };
        self.seats[claimant as usize].melds.push(meld);
        self.history.record_declare(self.turn);
        self.advance_to_claimant(claimant);
        ActionOutcome::ClaimResolved { seat: claimant }
    }

    fn execute_chow(
        &mut self,
        claimant: u8,
        discarder: u8,
        tile: Tile,
        held: [Tile; 2],
    ) -> ActionOutcome {
        self.take_from_river(discarder, tile);
        let hand = &mut self.seats[claimant as usize].hand;
        for piece in held {
            if !hand.remove_tile(piece) {
                panic!("chow tiles vanished from the hand");
            }
        }
        let meld = match Meld::new(MeldKind::Run, &[tile, held[0], held[1]], false) {
            Some(meld) => meld,
            None => panic!("chow tiles must form a run"),
        };
        self.seats[claimant as usize].melds.push(meld);
        self.history.record_declare(self.turn);
        self.advance_to_claimant(claimant);
        ActionOutcome::ClaimResolved { seat: claimant }
    }

    fn execute_kong_claim(&mut self, claimant: u8, discarder: u8, tile: Tile) -> ActionOutcome {
        self.take_from_river(discarder, tile);
        let mut tiles = self.take_face_tiles(claimant, tile.face(), 3);
        tiles.push(tile);
        let meld = match Meld::new(MeldKind::Quad, &tiles, false) {
            Some(meld) => meld,
            None => panic!("kong tiles must form a quad"),
        };
        self.seats[claimant as usize].melds.push(meld);
        self.history.record_declare(self.turn);
        self.advance_to_claimant(claimant);
        self.draw_replacement_for(claimant);
        ActionOutcome::KongResolved { seat: claimant }
    }

    /// 其余座位全过后完成加杠：明刻升级为明杠，摸岭上牌
    fn complete_added_kong(&mut self, declarer: u8, tile: Tile) -> ActionOutcome {
        let face = tile.face();
        let state = &mut self.seats[declarer as usize];
        let position = state.melds.iter().position(|meld| {
            meld.kind() == MeldKind::Triple && !meld.concealed() && meld.first_face() == face
        });
        let position = match position {
            Some(position) => position,
            None => panic!("added kong must have a matching exposed triple"),
        };
        let mut tiles: SmallVec<[Tile; 4]> = SmallVec::from_slice(state.melds[position].tiles());
        tiles.push(tile);
        let quad = match Meld::new(MeldKind::Quad, &tiles, false) {
            Some(meld) => meld,
            None => panic!("added kong tiles must form a quad"),
        };
        state.melds[position] = quad;
        self.history.record_declare(self.turn);
        self.draw_replacement_for(declarer);
        self.phase = RoundPhase::Private { seat: declarer };
        ActionOutcome::KongResolved { seat: declarer }
    }

    /// 行动权移交鸣牌者，巡目递增
    fn advance_to_claimant(&mut self, claimant: u8) {
        self.turn += 1;
        self.seats[claimant as usize].turn_count += 1;
        self.phase = RoundPhase::Private { seat: claimant };
    }

    fn draw_replacement_for(&mut self, seat: u8) {
        match self.wall.draw_replacement() {
            Some(tile) => self.seats[seat as usize].drawn = Some(tile),
            None => panic!("replacement draw must succeed after the wall check"),
        }
    }

    fn take_from_river(&mut self, discarder: u8, tile: Tile) {
        let popped = self.seats[discarder as usize].river.pop();
        assert_eq!(popped, Some(tile), "claimed tile must be the newest discard");
    }

    fn take_face_tiles(&mut self, seat: u8, face: TileKind, count: usize) -> SmallVec<[Tile; 4]> {
        let hand = &mut self.seats[seat as usize].hand;
        let mut tiles: SmallVec<[Tile; 4]> = SmallVec::new();
        for _ in 0..count {
            match hand.take_face(face) {
                Some(tile) => tiles.push(tile),
                None => panic!("claim tiles vanished from the hand"),
            }
        }
        tiles
    }

    /// 暗杠是否保持听牌牌面不变（立直下的合法性判据）
    fn kong_keeps_waits(&mut self, seat: u8, face: TileKind) -> bool {
        let state = &self.seats[seat as usize];
        let declared = state.declared_meld_count();
        let before = state.concealed_counts();
        let mut after = match state.counts_with_drawn() {
            Some(counts) => counts,
            None => return false,
        };
        let index = face.to_index() as usize;
        if after[index] < 4 {
            return false;
        }
        after[index] -= 4;
        let waits_before = WaitingAnalyzer::waiting_set(&mut self.decomposer, &before, declared);
        let waits_after =
            WaitingAnalyzer::waiting_set(&mut self.decomposer, &after, declared + 1);
        waits_before.faces() == waits_after.faces()
    }

    fn win_context(&self, seat: u8, mode: WinMode, robbing_kong: bool, last_tile: bool) -> WinContext {
        let state = &self.seats[seat as usize];
        WinContext {
            mode,
            seat_wind: state.seat_wind,
            prevailing_wind: self.prevailing_wind,
            riichi: state.riichi,
            robbing_kong,
            last_tile,
            wait_shape: None,
        }
    }

    /// 和牌终局：重算各家拆解，交结算器划分点数并落账
    fn finish_win(
        &mut self,
        winners: &[u8],
        payer: Option<u8>,
        win_tile: Tile,
        robbing: bool,
        last_tile: bool,
    ) {
        let mode = match payer {
            Some(_) => WinMode::Claim,
            None => WinMode::SelfDraw,
        };
        let mut prepared: Vec<(u8, Vec<Decomposition>, WinContext)> =
            Vec::with_capacity(winners.len());
        for &winner in winners {
            let state = &self.seats[winner as usize];
            let counts = state.counts_with(win_tile.face());
            let declared = state.declared_meld_count();
            let decompositions = self.decomposer.win_decompositions(&counts, declared);
            assert!(
                !decompositions.is_empty(),
                "settlement requires a winning decomposition"
            );
            let context = self.win_context(winner, mode, robbing, last_tile);
            prepared.push((winner, decompositions, context));
        }

        let inputs: Vec<WinnerInput> = prepared
            .iter()
            .map(|(winner, decompositions, context)| WinnerInput {
                seat: *winner,
                decompositions,
                declared: &self.seats[*winner as usize].melds,
                win_tile,
                context: *context,
            })
            .collect();
        let aggregator = ScoringAggregator::new(&self.yaku_set, self.point_table.as_ref());
        let result = aggregator.settle_win(
            &inputs,
            payer,
            self.dealer,
            self.seat_wind_turn,
            self.stick_pool,
        );

        for (index, state) in self.seats.iter_mut().enumerate() {
            state.score += result.deltas[index];
        }
        self.stick_pool = result.stick_pool;
        self.phase = RoundPhase::Over { result };
    }

    /// 荒牌流局终局：按各家听牌与否结算并落账
    fn finish_exhaustive_draw(&mut self) {
        let mut waiting = [false; SEAT_COUNT as usize];
        for seat in 0..SEAT_COUNT as usize {
            let counts = self.seats[seat].concealed_counts();
            let declared = self.seats[seat].declared_meld_count();
            waiting[seat] = WaitingAnalyzer::is_waiting(&mut self.decomposer, &counts, declared);
        }
        let result = ScoringAggregator::settle_exhaustive(waiting, self.stick_pool, self.dealer);
        for (index, state) in self.seats.iter_mut().enumerate() {
            state.score += result.deltas[index];
        }
        self.stick_pool = result.stick_pool;
        self.phase = RoundPhase::Over { result };
    }
}

/// 顺位下一座位
#[inline]
pub(crate) fn next_seat(seat: u8) -> u8 {
    (seat + 1) % SEAT_COUNT
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::settle::RoundOutcome;
    use crate::tile::Hand;

    fn seeded_round() -> Round {
        Round::new(RoundConfig {
            seed: Some(7),
            ..RoundConfig::default()
        })
    }

    fn set_hand(round: &mut Round, seat: u8, codes: &str) {
        round.seats[seat as usize].hand = Hand::from_codes(codes).unwrap();
    }

    fn tile(code: &str) -> Tile {
        code.parse().unwrap()
    }

    #[test]
    fn test_deal_shape() {
        let round = seeded_round();
        assert_eq!(*round.phase(), RoundPhase::Private { seat: 0 });
        assert_eq!(round.turn(), 1);
        assert_eq!(round.seats[0].hand.total_count(), 13);
        assert!(round.seats[0].drawn.is_some());
        assert_eq!(round.seats[0].normalized_count(), 14);
        for seat in 1..4 {
            assert_eq!(round.seats[seat].hand.total_count(), 13);
            assert!(round.seats[seat].drawn.is_none());
            assert_eq!(round.seats[seat].normalized_count(), 13);
        }
        // 13 × 4 + 庄家首摸
        assert_eq!(round.wall().drawn_count(), 53);
        // 门风从庄家起为东南西北
        assert_eq!(round.seats[0].seat_wind, Wind::East);
        assert_eq!(round.seats[1].seat_wind, Wind::South);
        assert_eq!(round.seats[3].seat_wind, Wind::North);
    }

    #[test]
    fn test_wrong_actor_and_phase() {
        let mut round = seeded_round();
        let result = round.submit_private(1, PrivateAction::Tsumo);
        assert_eq!(result, Err(RoundError::WrongActor));
        let result = round.submit_claim(1, ClaimResponse::Pass);
        assert_eq!(result, Err(RoundError::WrongPhase));
        let result = round.submit_private(4, PrivateAction::Tsumo);
        assert_eq!(result, Err(RoundError::InvalidSeat));
    }

    #[test]
    fn test_discard_opens_window_and_barrier() {
        let mut round = seeded_round();
        let drawn = round.seats[0].drawn.unwrap();
        let outcome = round.submit_private(0, PrivateAction::Discard { tile: drawn });
        assert_eq!(outcome, Ok(ActionOutcome::WindowOpened));
        assert_eq!(round.history().discard_records().len(), 1);
        match round.phase() {
            RoundPhase::Public {
                discarder,
                tile,
                kind,
                ..
            } => {
                assert_eq!(*discarder, 0);
                assert_eq!(*tile, drawn);
                assert_eq!(*kind, ClaimWindowKind::Discard);
            }
            other => panic!("unexpected phase: {:?}", other),
        }

        // 打牌者不能响应自己的窗口
        assert_eq!(
            round.submit_claim(0, ClaimResponse::Pass),
            Err(RoundError::WrongActor)
        );
        assert_eq!(round.submit_claim(1, ClaimResponse::Pass), Ok(ActionOutcome::Waiting));
        assert_eq!(
            round.submit_claim(1, ClaimResponse::Pass),
            Err(RoundError::AlreadyResponded)
        );
        assert_eq!(round.submit_claim(2, ClaimResponse::Pass), Ok(ActionOutcome::Waiting));
        // 第三份响应触发仲裁：全过则下家摸牌
        assert_eq!(
            round.submit_claim(3, ClaimResponse::Pass),
            Ok(ActionOutcome::TurnAdvanced { seat: 1 })
        );
        assert_eq!(*round.phase(), RoundPhase::Private { seat: 1 });
        assert!(round.seats[1].drawn.is_some());
        assert_eq!(round.turn(), 2);
    }

    #[test]
    fn test_riichi_deposit_and_lock() {
        let mut round = seeded_round();
        set_hand(&mut round, 0, "123m456m789m55s67s");
        round.seats[0].drawn = Some(tile("9p"));

        let outcome = round.submit_private(0, PrivateAction::Riichi { tile: tile("9p") });
        assert_eq!(outcome, Ok(ActionOutcome::WindowOpened));
        assert_eq!(round.seats[0].score, 24_000);
        assert_eq!(round.stick_pool(), 1);
        assert_eq!(
            round.seats[0].riichi,
            RiichiStatus::Declared {
                turn: 1,
                double: true
            }
        );

        // 全过回到庄家后只能打进张
        for seat in [1, 2, 3] {
            round.submit_claim(seat, ClaimResponse::Pass).unwrap();
        }
        for seat in [1, 2, 3] {
            let drawn = round.seats[seat as usize].drawn.unwrap();
            round
                .submit_private(seat, PrivateAction::Discard { tile: drawn })
                .unwrap();
            for other in 0..4u8 {
                if other != seat {
                    round.submit_claim(other, ClaimResponse::Pass).unwrap();
                }
            }
        }
        assert_eq!(*round.phase(), RoundPhase::Private { seat: 0 });
        round.seats[0].drawn = Some(tile("F"));
        let result = round.submit_private(0, PrivateAction::Discard { tile: tile("1m") });
        assert_eq!(result, Err(RoundError::RiichiLocked));
        let outcome = round.submit_private(0, PrivateAction::Discard { tile: tile("F") });
        assert_eq!(outcome, Ok(ActionOutcome::WindowOpened));
    }

    #[test]
    fn test_riichi_rejected_without_wait() {
        let mut round = seeded_round();
        set_hand(&mut round, 0, "159m258p369sEESW");
        round.seats[0].drawn = Some(tile("C"));
        let result = round.submit_private(0, PrivateAction::Riichi { tile: tile("C") });
        assert_eq!(result, Err(RoundError::RiichiNotAllowed));
        // 拒绝不留痕迹
        assert_eq!(round.seats[0].score, 25_000);
        assert_eq!(round.stick_pool(), 0);
        assert_eq!(*round.phase(), RoundPhase::Private { seat: 0 });
    }

    #[test]
    fn test_tsumo_settles_and_ends() {
        let mut round = seeded_round();
        set_hand(&mut round, 0, "234m567m345p666s8s");
        round.seats[0].drawn = Some(tile("8s"));

        let outcome = round.submit_private(0, PrivateAction::Tsumo);
        assert_eq!(outcome, Ok(ActionOutcome::RoundEnded));
        let result = round.result().unwrap();
        assert!(matches!(result.outcome, RoundOutcome::SelfDrawWin { .. }));
        assert_eq!(result.deltas.iter().sum::<i32>(), 0);
        assert!(result.dealer_stays);
        assert_eq!(round.seats[0].score, 25_000 + result.deltas[0]);
        assert!(result.deltas[0] > 0);
        // 终局后一切提交被拒
        assert_eq!(
            round.submit_private(0, PrivateAction::Tsumo),
            Err(RoundError::RoundOver)
        );
    }

    #[test]
    fn test_tsumo_without_yaku_rejected() {
        let mut round = seeded_round();
        // 副露北刻：门前清自摸和不成立，断幺九被北破坏
        set_hand(&mut round, 0, "234m567m88p45p");
        let north = Meld::new(
            MeldKind::Triple,
            &[tile("N"), tile("N"), tile("N")],
            false,
        )
        .unwrap();
        round.seats[0].melds.push(north);
        round.seats[0].drawn = Some(tile("3p"));

        assert_eq!(
            round.submit_private(0, PrivateAction::Tsumo),
            Err(RoundError::NoYaku)
        );
        assert_eq!(*round.phase(), RoundPhase::Private { seat: 0 });
    }

    #[test]
    fn test_pong_resolution_is_atomic() {
        let mut round = seeded_round();
        round.seats[0].drawn = Some(tile("7p"));
        set_hand(&mut round, 2, "7p7p123m456m99sWWE");

        round
            .submit_private(0, PrivateAction::Discard { tile: tile("7p") })
            .unwrap();
        round.submit_claim(1, ClaimResponse::Pass).unwrap();
        round.submit_claim(2, ClaimResponse::Pong).unwrap();
        let outcome = round.submit_claim(3, ClaimResponse::Pass).unwrap();
        assert_eq!(outcome, ActionOutcome::ClaimResolved { seat: 2 });

        // 鸣牌原子性：手牌少两张、牌河被取走、面子登记、历史保留
        assert_eq!(round.seats[2].hand.face_count(TileKind::Pin(7)), 0);
        assert!(round.seats[0].river.is_empty());
        assert_eq!(round.history().discard_records().len(), 1);
        assert_eq!(round.history().declare_count(), 1);
        let meld = &round.seats[2].melds[0];
        assert_eq!(meld.kind(), MeldKind::Triple);
        assert!(!meld.concealed());
        assert_eq!(*round.phase(), RoundPhase::Private { seat: 2 });
        assert!(round.seats[2].drawn.is_none());
        assert_eq!(round.seats[2].normalized_count(), 14);
        assert_eq!(round.turn(), 2);
    }

    #[test]
    fn test_chow_restricted_to_next_seat() {
        let mut round = seeded_round();
        round.seats[0].drawn = Some(tile("4m"));
        set_hand(&mut round, 2, "2m3m55p789p123sEEE");

        round
            .submit_private(0, PrivateAction::Discard { tile: tile("4m") })
            .unwrap();
        let result = round.submit_claim(
            2,
            ClaimResponse::Chow {
                tiles: [tile("2m"), tile("3m")],
            },
        );
        assert_eq!(result, Err(RoundError::InvalidClaim));
    }

    #[test]
    fn test_added_kong_window_is_ron_only() {
        let mut round = seeded_round();
        let triple = Meld::new(
            MeldKind::Triple,
            &[tile("5p"), tile("5p"), tile("5p")],
            false,
        )
        .unwrap();
        round.seats[0].melds.push(triple);
        set_hand(&mut round, 0, "123m456m789s9s");
        round.seats[0].drawn = Some(tile("0p"));

        let outcome = round.submit_private(0, PrivateAction::PlusKong { tile: tile("0p") });
        assert_eq!(outcome, Ok(ActionOutcome::WindowOpened));
        match round.phase() {
            RoundPhase::Public { kind, .. } => assert_eq!(*kind, ClaimWindowKind::AddedKong),
            other => panic!("unexpected phase: {:?}", other),
        }

        assert_eq!(
            round.submit_claim(1, ClaimResponse::Pong),
            Err(RoundError::InvalidClaim)
        );
        assert_eq!(
            round.submit_claim(1, ClaimResponse::Ron),
            Err(RoundError::NotWinning)
        );
        round.submit_claim(1, ClaimResponse::Pass).unwrap();
        round.submit_claim(2, ClaimResponse::Pass).unwrap();
        let outcome = round.submit_claim(3, ClaimResponse::Pass).unwrap();
        assert_eq!(outcome, ActionOutcome::KongResolved { seat: 0 });

        let meld = &round.seats[0].melds[0];
        assert_eq!(meld.kind(), MeldKind::Quad);
        assert!(!meld.concealed());
        // 赤 5p 随升级并入杠中
        assert!(meld.tiles().iter().any(|t| t.red));
        assert!(round.seats[0].drawn.is_some());
        assert_eq!(round.history().declare_count(), 1);
        assert_eq!(round.turn(), 1);
        assert_eq!(*round.phase(), RoundPhase::Private { seat: 0 });
    }

    #[test]
    fn test_concealed_kong_stays_private() {
        let mut round = seeded_round();
        set_hand(&mut round, 0, "2s2s2s123m456m99pEE");
        round.seats[0].drawn = Some(tile("2s"));

        let outcome = round.submit_private(
            0,
            PrivateAction::ConcealedKong {
                face: TileKind::Sou(2),
            },
        );
        assert_eq!(outcome, Ok(ActionOutcome::KongResolved { seat: 0 }));
        let meld = &round.seats[0].melds[0];
        assert_eq!(meld.kind(), MeldKind::Quad);
        assert!(meld.concealed());
        assert!(round.seats[0].is_concealed());
        assert!(round.seats[0].drawn.is_some());
        assert_eq!(round.wall().replacement_count(), 1);
        assert_eq!(round.history().declare_count(), 1);
        assert_eq!(*round.phase(), RoundPhase::Private { seat: 0 });
    }

    #[test]
    fn test_furiten_own_discard_blocks_ron() {
        let mut round = seeded_round();
        // 座位 1 听 3p/6p，先亲手打出过 6p
        set_hand(&mut round, 1, "234m567m456s88s45p");
        round.seats[0].drawn = Some(tile("1m"));
        round
            .submit_private(0, PrivateAction::Discard { tile: tile("1m") })
            .unwrap();
        for seat in [1, 2, 3] {
            round.submit_claim(seat, ClaimResponse::Pass).unwrap();
        }
        // 座位 1 摸到 6p 后打出（进张改写为测试值）
        round.seats[1].drawn = Some(tile("6p"));
        round
            .submit_private(1, PrivateAction::Discard { tile: tile("6p") })
            .unwrap();
        for seat in [0, 2, 3] {
            round.submit_claim(seat, ClaimResponse::Pass).unwrap();
        }
        // 座位 2 打 3p，座位 1 荣和被振听拦下
        round.seats[2].drawn = Some(tile("3p"));
        round
            .submit_private(2, PrivateAction::Discard { tile: tile("3p") })
            .unwrap();
        assert_eq!(
            round.submit_claim(1, ClaimResponse::Ron),
            Err(RoundError::Furiten)
        );
        // 改为过后窗口照常收齐
        round.submit_claim(1, ClaimResponse::Pass).unwrap();
        round.submit_claim(0, ClaimResponse::Pass).unwrap();
        let outcome = round.submit_claim(3, ClaimResponse::Pass).unwrap();
        assert_eq!(outcome, ActionOutcome::TurnAdvanced { seat: 3 });
    }

    #[test]
    fn test_passed_wait_creates_furiten() {
        let mut round = seeded_round();
        // 座位 1 听 3p/6p（断幺九，荣和本可成立）
        set_hand(&mut round, 1, "234m567m456s88s45p");
        round.seats[0].drawn = Some(tile("3p"));
        round
            .submit_private(0, PrivateAction::Discard { tile: tile("3p") })
            .unwrap();
        // 座位 1 明明能荣却选择过
        for seat in [1, 2, 3] {
            round.submit_claim(seat, ClaimResponse::Pass).unwrap();
        }
        assert!(round.seats[1].has_passed_wait(TileKind::Pin(3)));

        // 座位 1 摸切一张无关牌
        round.seats[1].drawn = Some(tile("W"));
        round
            .submit_private(1, PrivateAction::Discard { tile: tile("W") })
            .unwrap();
        for seat in [0, 2, 3] {
            round.submit_claim(seat, ClaimResponse::Pass).unwrap();
        }
        // 座位 2 再打 3p：过水振听
        round.seats[2].drawn = Some(tile("3p"));
        round
            .submit_private(2, PrivateAction::Discard { tile: tile("3p") })
            .unwrap();
        assert_eq!(
            round.submit_claim(1, ClaimResponse::Ron),
            Err(RoundError::Furiten)
        );
    }

    #[test]
    fn test_discard_on_empty_wall_ends_round() {
        let mut round = seeded_round();
        while round.wall.draw().is_some() {}
        assert_eq!(round.wall().live_remaining(), 0);

        let drawn = round.seats[0].drawn.unwrap();
        let outcome = round.submit_private(0, PrivateAction::Discard { tile: drawn });
        assert_eq!(outcome, Ok(ActionOutcome::RoundEnded));
        let result = round.result().unwrap();
        assert!(matches!(
            result.outcome,
            RoundOutcome::ExhaustiveDraw { .. }
        ));
        assert_eq!(result.deltas.iter().sum::<i32>(), 0);
    }
}
