use crate::game::player::RiichiStatus;
use crate::meld::{Meld, MeldKind, WaitShape};
use crate::tile::{Tile, TileKind, Wind};
use smallvec::SmallVec;

/// 役种标识
///
/// 数值编码便于序列化与外部扩展；已知役种以关联常量列出。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub struct YakuId(pub u16);

impl YakuId {
    /// 立直
    pub const RIICHI: YakuId = YakuId(1);
    /// 两立直
    pub const DOUBLE_RIICHI: YakuId = YakuId(2);
    /// 门前清自摸和
    pub const SELF_DRAW: YakuId = YakuId(3);
    /// 平和形（四顺子一对子，两面和了）
    pub const ALL_RUNS: YakuId = YakuId(4);
    /// 断幺九
    pub const ALL_SIMPLES: YakuId = YakuId(5);
    /// 七对子
    pub const SEVEN_PAIRS: YakuId = YakuId(6);
    /// 对对和
    pub const ALL_TRIPLES: YakuId = YakuId(7);
    /// 役牌刻子
    pub const VALUE_TRIPLE: YakuId = YakuId(8);
    /// 抢杠
    pub const ROBBING_KONG: YakuId = YakuId(9);
    /// 海底摸月
    pub const LAST_TILE_DRAW: YakuId = YakuId(10);
    /// 国士无双
    pub const THIRTEEN_ORPHANS: YakuId = YakuId(11);
}

/// 和牌方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum WinMode {
    /// 自摸
    SelfDraw,
    /// 荣和
    Claim,
}

/// 役种判定上下文
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WinContext {
    /// 和牌方式
    pub mode: WinMode,
    /// 门风
    pub seat_wind: Wind,
    /// 场风
    pub prevailing_wind: Wind,
    /// 立直状态
    pub riichi: RiichiStatus,
    /// 是否抢杠和
    pub robbing_kong: bool,
    /// 是否最后一张牌山牌
    pub last_tile: bool,
    /// 和了牌的听牌形状（结算器按拆解填入）
    pub wait_shape: Option<WaitShape>,
}

/// 供判定的和牌手
///
/// 副露与暗牌拆解合并后的完整面子列表，和了牌含在其中。
#[derive(Debug, Clone)]
pub struct WinHand {
    /// 全部面子（副露在前，暗牌拆解在后）
    pub melds: Vec<Meld>,
    /// 和了牌
    pub win_tile: Tile,
    /// 门前清
    pub concealed: bool,
}

impl WinHand {
    /// 雀头（标准形的对子）
    pub fn pair(&self) -> Option<&Meld> {
        self.melds.iter().find(|meld| meld.kind() == MeldKind::Pair)
    }

    /// 是否四顺子一对子形
    pub fn is_four_runs_and_pair(&self) -> bool {
        let runs = self
            .melds
            .iter()
            .filter(|meld| meld.kind() == MeldKind::Run)
            .count();
        let pairs = self
            .melds
            .iter()
            .filter(|meld| meld.kind() == MeldKind::Pair)
            .count();
        runs == 4 && pairs == 1 && self.melds.len() == 5
    }

    /// 是否七对子形
    pub fn is_seven_pairs(&self) -> bool {
        self.melds.len() == 7 && self.melds.iter().all(|meld| meld.kind() == MeldKind::Pair)
    }

    /// 是否国士形
    pub fn is_thirteen_orphans(&self) -> bool {
        self.melds
            .iter()
            .any(|meld| meld.kind() == MeldKind::SpecialThirteen)
    }

    /// 全部牌面是否满足谓词
    pub fn all_faces(&self, predicate: impl Fn(TileKind) -> bool) -> bool {
        self.melds
            .iter()
            .all(|meld| meld.faces().iter().all(|&face| predicate(face)))
    }
}

/// 役种判定结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YakuOutcome {
    /// 是否成立
    pub applies: bool,
    /// 番数
    pub fan: u32,
    /// 成立时压制的其他役种
    pub excluded: SmallVec<[YakuId; 2]>,
}

impl YakuOutcome {
    /// 不成立
    pub fn no() -> Self {
        Self {
            applies: false,
            fan: 0,
            excluded: SmallVec::new(),
        }
    }

    /// 成立
    pub fn apply(fan: u32) -> Self {
        Self {
            applies: true,
            fan,
            excluded: SmallVec::new(),
        }
    }

    /// 成立并压制列出的役种
    pub fn apply_excluding(fan: u32, excluded: &[YakuId]) -> Self {
        Self {
            applies: true,
            fan,
            excluded: SmallVec::from_slice(excluded),
        }
    }
}

/// 役种判定器
///
/// 外部可插拔：实现该 trait 并注册进 [`YakuSet`] 即可参与结算。
pub trait YakuEvaluator {
    /// 役种标识
    fn id(&self) -> YakuId;

    /// 役种名称
    fn name(&self) -> &'static str;

    /// 判定
    fn evaluate(&self, hand: &WinHand, context: &WinContext) -> YakuOutcome;
}

/// 役种注册表
///
/// 注册顺序即优先级：先注册的役种成立后，其压制列表会
/// 阻止后续被压制役种参与判定。
#[derive(Default)]
pub struct YakuSet {
    evaluators: Vec<Box<dyn YakuEvaluator>>,
}

impl YakuSet {
    /// 创建空注册表
    pub fn new() -> Self {
        Self {
            evaluators: Vec::new(),
        }
    }

    /// 内置参考役种表
    pub fn standard() -> Self {
        let mut set = Self::new();
        set.register(Box::new(ThirteenOrphansYaku));
        set.register(Box::new(DoubleRiichiYaku));
        set.register(Box::new(RiichiYaku));
        set.register(Box::new(SelfDrawYaku));
        set.register(Box::new(RobbingKongYaku));
        set.register(Box::new(LastTileDrawYaku));
        set.register(Box::new(AllRunsYaku));
        set.register(Box::new(AllSimplesYaku));
        set.register(Box::new(SevenPairsYaku));
        set.register(Box::new(AllTriplesYaku));
        set.register(Box::new(ValueTripleYaku));
        set
    }

    /// 注册一个役种判定器
    pub fn register(&mut self, evaluator: Box<dyn YakuEvaluator>) {
        self.evaluators.push(evaluator);
    }

    /// 注册的役种数量
    pub fn len(&self) -> usize {
        self.evaluators.len()
    }

    /// 注册表是否为空
    pub fn is_empty(&self) -> bool {
        self.evaluators.is_empty()
    }

    /// 查询役种名称
    pub fn name_of(&self, id: YakuId) -> Option<&'static str> {
        self.evaluators
            .iter()
            .find(|evaluator| evaluator.id() == id)
            .map(|evaluator| evaluator.name())
    }

    /// 依注册顺序逐一判定，应用压制过滤后汇总番数
    ///
    /// # 返回
    ///
    /// (总番数, 成立役种及其番数)
    pub fn evaluate_all(
        &self,
        hand: &WinHand,
        context: &WinContext,
    ) -> (u32, Vec<(YakuId, u32)>) {
        let mut applied: Vec<(YakuId, u32)> = Vec::new();
        let mut excluded: SmallVec<[YakuId; 4]> = SmallVec::new();

        for evaluator in &self.evaluators {
            if excluded.contains(&evaluator.id()) {
                continue;
            }
            let outcome = evaluator.evaluate(hand, context);
            if outcome.applies {
                applied.push((evaluator.id(), outcome.fan));
                for id in outcome.excluded {
                    if !excluded.contains(&id) {
                        excluded.push(id);
                    }
                }
            }
        }

        let total = applied.iter().map(|(_, fan)| fan).sum();
        (total, applied)
    }
}

/// 立直（1 番）
pub struct RiichiYaku;

impl YakuEvaluator for RiichiYaku {
    fn id(&self) -> YakuId {
        YakuId::RIICHI
    }

    fn name(&self) -> &'static str {
        "立直"
    }

    fn evaluate(&self, _hand: &WinHand, context: &WinContext) -> YakuOutcome {
        if context.riichi.is_declared() {
            YakuOutcome::apply(1)
        } else {
            YakuOutcome::no()
        }
    }
}

/// 两立直（2 番，压制立直）
pub struct DoubleRiichiYaku;

impl YakuEvaluator for DoubleRiichiYaku {
    fn id(&self) -> YakuId {
        YakuId::DOUBLE_RIICHI
    }

    fn name(&self) -> &'static str {
        "两立直"
    }

    fn evaluate(&self, _hand: &WinHand, context: &WinContext) -> YakuOutcome {
        match context.riichi {
            RiichiStatus::Declared { double: true, .. } => {
                YakuOutcome::apply_excluding(2, &[YakuId::RIICHI])
            }
            _ => YakuOutcome::no(),
        }
    }
}

/// 门前清自摸和（1 番）
pub struct SelfDrawYaku;

impl YakuEvaluator for SelfDrawYaku {
    fn id(&self) -> YakuId {
        YakuId::SELF_DRAW
    }

    fn name(&self) -> &'static str {
        "门前清自摸和"
    }

    fn evaluate(&self, hand: &WinHand, context: &WinContext) -> YakuOutcome {
        if context.mode == WinMode::SelfDraw && hand.concealed {
            YakuOutcome::apply(1)
        } else {
            YakuOutcome::no()
        }
    }
}

/// 平和形（1 番）：门前四顺子一对子，雀头非役牌，两面和了
pub struct AllRunsYaku;

impl AllRunsYaku {
    /// 雀头是否役牌（三元牌或门风/场风）
    fn pair_is_value(pair: &Meld, context: &WinContext) -> bool {
        let face = pair.first_face();
        matches!(face, TileKind::White | TileKind::Green | TileKind::Red)
            || face == context.seat_wind.tile_kind()
            || face == context.prevailing_wind.tile_kind()
    }
}

impl YakuEvaluator for AllRunsYaku {
    fn id(&self) -> YakuId {
        YakuId::ALL_RUNS
    }

    fn name(&self) -> &'static str {
        "平和"
    }

    fn evaluate(&self, hand: &WinHand, context: &WinContext) -> YakuOutcome {
        if !hand.concealed || !hand.is_four_runs_and_pair() {
            return YakuOutcome::no();
        }
        let pair = match hand.pair() {
            Some(pair) => pair,
            None => return YakuOutcome::no(),
        };
        if Self::pair_is_value(pair, context) {
            return YakuOutcome::no();
        }
        if context.wait_shape != Some(WaitShape::RunTwoSide) {
            return YakuOutcome::no();
        }
        YakuOutcome::apply(1)
    }
}

/// 断幺九（1 番）：全部牌面均非幺九
pub struct AllSimplesYaku;

impl YakuEvaluator for AllSimplesYaku {
    fn id(&self) -> YakuId {
        YakuId::ALL_SIMPLES
    }

    fn name(&self) -> &'static str {
        "断幺九"
    }

    fn evaluate(&self, hand: &WinHand, _context: &WinContext) -> YakuOutcome {
        if hand.all_faces(|face| !face.is_orphan()) {
            YakuOutcome::apply(1)
        } else {
            YakuOutcome::no()
        }
    }
}

/// 七对子（2 番）
pub struct SevenPairsYaku;

impl YakuEvaluator for SevenPairsYaku {
    fn id(&self) -> YakuId {
        YakuId::SEVEN_PAIRS
    }

    fn name(&self) -> &'static str {
        "七对子"
    }

    fn evaluate(&self, hand: &WinHand, _context: &WinContext) -> YakuOutcome {
        if hand.is_seven_pairs() {
            YakuOutcome::apply(2)
        } else {
            YakuOutcome::no()
        }
    }
}

/// 对对和（2 番）：面子全为刻子或杠
pub struct AllTriplesYaku;

impl YakuEvaluator for AllTriplesYaku {
    fn id(&self) -> YakuId {
        YakuId::ALL_TRIPLES
    }

    fn name(&self) -> &'static str {
        "对对和"
    }

    fn evaluate(&self, hand: &WinHand, _context: &WinContext) -> YakuOutcome {
        let triples = hand
            .melds
            .iter()
            .filter(|meld| matches!(meld.kind(), MeldKind::Triple | MeldKind::Quad))
            .count();
        let pairs = hand
            .melds
            .iter()
            .filter(|meld| meld.kind() == MeldKind::Pair)
            .count();
        if triples == 4 && pairs == 1 && hand.melds.len() == 5 {
            YakuOutcome::apply(2)
        } else {
            YakuOutcome::no()
        }
    }
}

/// 役牌刻子（每组 1 番）：三元牌、门风或场风的刻子/杠
pub struct ValueTripleYaku;

impl YakuEvaluator for ValueTripleYaku {
    fn id(&self) -> YakuId {
        YakuId::VALUE_TRIPLE
    }

    fn name(&self) -> &'static str {
        "役牌"
    }

    fn evaluate(&self, hand: &WinHand, context: &WinContext) -> YakuOutcome {
        let value_faces = [
            TileKind::White,
            TileKind::Green,
            TileKind::Red,
            context.seat_wind.tile_kind(),
            context.prevailing_wind.tile_kind(),
        ];
        let mut fan = 0;
        for meld in &hand.melds {
            if !matches!(meld.kind(), MeldKind::Triple | MeldKind::Quad) {
                continue;
            }
            // 门风与场风相同时按两番计
            fan += value_faces
                .iter()
                .filter(|&&face| face == meld.first_face())
                .count() as u32;
        }
        if fan > 0 {
            YakuOutcome::apply(fan)
        } else {
            YakuOutcome::no()
        }
    }
}

/// 抢杠（1 番）
pub struct RobbingKongYaku;

impl YakuEvaluator for RobbingKongYaku {
    fn id(&self) -> YakuId {
        YakuId::ROBBING_KONG
    }

    fn name(&self) -> &'static str {
        "抢杠"
    }

    fn evaluate(&self, _hand: &WinHand, context: &WinContext) -> YakuOutcome {
        if context.robbing_kong && context.mode == WinMode::Claim {
            YakuOutcome::apply(1)
        } else {
            YakuOutcome::no()
        }
    }
}

/// 海底摸月（1 番）：牌山最后一张自摸
pub struct LastTileDrawYaku;

impl YakuEvaluator for LastTileDrawYaku {
    fn id(&self) -> YakuId {
        YakuId::LAST_TILE_DRAW
    }

    fn name(&self) -> &'static str {
        "海底摸月"
    }

    fn evaluate(&self, _hand: &WinHand, context: &WinContext) -> YakuOutcome {
        if context.last_tile && context.mode == WinMode::SelfDraw {
            YakuOutcome::apply(1)
        } else {
            YakuOutcome::no()
        }
    }
}

/// 国士无双（13 番）
pub struct ThirteenOrphansYaku;

impl YakuEvaluator for ThirteenOrphansYaku {
    fn id(&self) -> YakuId {
        YakuId::THIRTEEN_ORPHANS
    }

    fn name(&self) -> &'static str {
        "国士无双"
    }

    fn evaluate(&self, hand: &WinHand, _context: &WinContext) -> YakuOutcome {
        if hand.is_thirteen_orphans() {
            YakuOutcome::apply(13)
        } else {
            YakuOutcome::no()
        }
    }
}
