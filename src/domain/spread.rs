use crate::domain::card::{Card, Suit, Taxonomy};
use crate::domain::deck::Deck;
use crate::utils::error::{Result, TarotError};
use crate::utils::validation::Validate;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// 四季牌陣的逆位機率
pub const SPREAD_REVERSED_PROBABILITY: f64 = 0.5;

/// 日常單抽的逆位機率
pub const DAILY_REVERSED_PROBABILITY: f64 = 0.3;

/// 十字形布局
pub const LAYOUT_PATTERN: &str = "    4\n1   5   3\n    2";

/// 牌陣中的五個位置，數值即位置編號
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    Action = 1,
    Emotion = 2,
    Intellect = 3,
    Material = 4,
    Spirit = 5,
}

impl Position {
    pub const ALL: [Position; 5] = [
        Position::Action,
        Position::Emotion,
        Position::Intellect,
        Position::Material,
        Position::Spirit,
    ];

    /// 核心位置優先，其餘依編號
    pub const PROMPT_ORDER: [Position; 5] = [
        Position::Spirit,
        Position::Action,
        Position::Emotion,
        Position::Intellect,
        Position::Material,
    ];

    pub fn number(&self) -> u8 {
        *self as u8
    }

    pub fn from_number(number: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|p| p.number() == number)
    }

    /// 每個位置固定對應的牌組
    pub fn taxonomy(&self) -> Taxonomy {
        match self {
            Position::Action => Taxonomy::Minor(Suit::Wands),
            Position::Emotion => Taxonomy::Minor(Suit::Cups),
            Position::Intellect => Taxonomy::Minor(Suit::Swords),
            Position::Material => Taxonomy::Minor(Suit::Pentacles),
            Position::Spirit => Taxonomy::Major,
        }
    }

    pub fn aspect(&self) -> &'static str {
        match self {
            Position::Action => "行动力",
            Position::Emotion => "情感状态",
            Position::Intellect => "理性思维",
            Position::Material => "事业财务",
            Position::Spirit => "心灵成长",
        }
    }

    pub fn meaning(&self) -> &'static str {
        match self {
            Position::Action => "关于意志、创造与行动层面",
            Position::Emotion => "关于情绪、感觉与感性层面",
            Position::Intellect => "关于理性、思维与关系层面",
            Position::Material => "关于感官、现实与物质层面",
            Position::Spirit => "关于灵魂课题和精神成长",
        }
    }

    pub fn season(&self) -> &'static str {
        match self {
            Position::Action => "春",
            Position::Emotion => "夏",
            Position::Intellect => "秋",
            Position::Material => "冬",
            Position::Spirit => "核心",
        }
    }

    /// 提示詞中使用的位置標籤，例如 `1号位置（权杖牌组-行动力）`
    pub fn prompt_label(&self) -> String {
        format!(
            "{}号位置（{}-{}）",
            self.number(),
            self.taxonomy().name(),
            self.aspect()
        )
    }
}

/// 一次抽牌的結果，五個位置各一張
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spread {
    #[serde(rename = "1")]
    action: Card,
    #[serde(rename = "2")]
    emotion: Card,
    #[serde(rename = "3")]
    intellect: Card,
    #[serde(rename = "4")]
    material: Card,
    #[serde(rename = "5")]
    spirit: Card,
}

impl Spread {
    /// 以指定的五張牌組成牌陣，牌組不符時回傳錯誤
    pub fn new(
        action: Card,
        emotion: Card,
        intellect: Card,
        material: Card,
        spirit: Card,
    ) -> Result<Self> {
        let spread = Self {
            action,
            emotion,
            intellect,
            material,
            spirit,
        };
        spread.validate()?;
        Ok(spread)
    }

    pub fn get(&self, position: Position) -> &Card {
        match position {
            Position::Action => &self.action,
            Position::Emotion => &self.emotion,
            Position::Intellect => &self.intellect,
            Position::Material => &self.material,
            Position::Spirit => &self.spirit,
        }
    }

    /// 依位置編號 1..5 迭代
    pub fn iter(&self) -> impl Iterator<Item = (Position, &Card)> + '_ {
        Position::ALL.iter().map(move |&p| (p, self.get(p)))
    }

    /// 從 JSON 載入外部保存的牌陣並驗證
    pub fn from_json(content: &str) -> Result<Self> {
        let spread: Spread = serde_json::from_str(content)?;
        spread.validate()?;
        Ok(spread)
    }
}

impl Validate for Spread {
    fn validate(&self) -> Result<()> {
        let errors: Vec<String> = self
            .iter()
            .filter(|(position, card)| card.arcana().taxonomy() != position.taxonomy())
            .map(|(position, card)| {
                format!(
                    "{}号位置应为{}，实际为{}",
                    position.number(),
                    position.taxonomy().name(),
                    card.arcana().name()
                )
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(TarotError::ValidationError {
                message: errors.join("; "),
            })
        }
    }
}

/// 抽取一組四季牌陣
pub fn draw_spread() -> Spread {
    draw_spread_with(&mut rand::rng())
}

/// 每次呼叫都重新建立並洗亂五副牌，各抽一張
pub fn draw_spread_with<R: Rng + ?Sized>(rng: &mut R) -> Spread {
    let mut decks = Position::ALL.map(|position| Deck::of(position.taxonomy()));
    for deck in decks.iter_mut() {
        deck.shuffle(rng);
    }

    let [wands, cups, swords, pentacles, major] = &mut decks;
    let spread = Spread {
        action: wands.draw_card(rng, SPREAD_REVERSED_PROBABILITY),
        emotion: cups.draw_card(rng, SPREAD_REVERSED_PROBABILITY),
        intellect: swords.draw_card(rng, SPREAD_REVERSED_PROBABILITY),
        material: pentacles.draw_card(rng, SPREAD_REVERSED_PROBABILITY),
        spirit: major.draw_card(rng, SPREAD_REVERSED_PROBABILITY),
    };

    tracing::debug!(
        "🃏 Drew spread: {}",
        spread
            .iter()
            .map(|(p, c)| format!("{}={}", p.number(), c))
            .collect::<Vec<_>>()
            .join(", ")
    );
    spread
}

/// 日常單抽：從完整 78 張中抽一張
pub fn draw_single_card() -> Card {
    draw_single_card_with(&mut rand::rng())
}

pub fn draw_single_card_with<R: Rng + ?Sized>(rng: &mut R) -> Card {
    let mut deck = Deck::full();
    deck.shuffle(rng);
    deck.draw_card(rng, DAILY_REVERSED_PROBABILITY)
}

#[derive(Debug, Clone, Serialize)]
pub struct PositionInfo {
    pub number: u8,
    pub name: &'static str,
    pub suit: &'static str,
    pub meaning: &'static str,
    pub season: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct SpreadInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub positions: Vec<PositionInfo>,
    pub layout: &'static str,
    pub traditional_use: &'static str,
}

pub fn spread_info() -> SpreadInfo {
    SpreadInfo {
        name: "四季牌阵",
        description: "传统塔罗牌阵，用于季节性指导和生活层面分析",
        positions: Position::ALL
            .iter()
            .map(|p| PositionInfo {
                number: p.number(),
                name: p.aspect(),
                suit: p.taxonomy().name(),
                meaning: p.meaning(),
                season: p.season(),
            })
            .collect(),
        layout: LAYOUT_PATTERN,
        traditional_use: "传统上仅在四个节气使用（春分、夏至、秋分、冬至）",
    }
}
