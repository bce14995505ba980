use serde::{Deserialize, Serialize};
use std::fmt;

/// 小阿爾卡納的四個牌組
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Suit {
    Wands,
    Cups,
    Swords,
    Pentacles,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Wands, Suit::Cups, Suit::Swords, Suit::Pentacles];

    pub fn name(&self) -> &'static str {
        match self {
            Suit::Wands => "权杖",
            Suit::Cups => "圣杯",
            Suit::Swords => "宝剑",
            Suit::Pentacles => "金币",
        }
    }
}

/// 每個牌組固定 14 張：一到十加上四張宮廷牌
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MinorRank {
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Page,
    Knight,
    Queen,
    King,
}

impl MinorRank {
    pub const ALL: [MinorRank; 14] = [
        MinorRank::Ace,
        MinorRank::Two,
        MinorRank::Three,
        MinorRank::Four,
        MinorRank::Five,
        MinorRank::Six,
        MinorRank::Seven,
        MinorRank::Eight,
        MinorRank::Nine,
        MinorRank::Ten,
        MinorRank::Page,
        MinorRank::Knight,
        MinorRank::Queen,
        MinorRank::King,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            MinorRank::Ace => "一",
            MinorRank::Two => "二",
            MinorRank::Three => "三",
            MinorRank::Four => "四",
            MinorRank::Five => "五",
            MinorRank::Six => "六",
            MinorRank::Seven => "七",
            MinorRank::Eight => "八",
            MinorRank::Nine => "九",
            MinorRank::Ten => "十",
            MinorRank::Page => "侍从",
            MinorRank::Knight => "骑士",
            MinorRank::Queen => "皇后",
            MinorRank::King => "国王",
        }
    }
}

/// 22 張大阿爾卡納，數值即牌號
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MajorArcana {
    Fool = 0,
    Magician = 1,
    HighPriestess = 2,
    Empress = 3,
    Emperor = 4,
    Hierophant = 5,
    Lovers = 6,
    Chariot = 7,
    Strength = 8,
    Hermit = 9,
    WheelOfFortune = 10,
    Justice = 11,
    HangedMan = 12,
    Death = 13,
    Temperance = 14,
    Devil = 15,
    Tower = 16,
    Star = 17,
    Moon = 18,
    Sun = 19,
    Judgement = 20,
    World = 21,
}

impl MajorArcana {
    pub const ALL: [MajorArcana; 22] = [
        MajorArcana::Fool,
        MajorArcana::Magician,
        MajorArcana::HighPriestess,
        MajorArcana::Empress,
        MajorArcana::Emperor,
        MajorArcana::Hierophant,
        MajorArcana::Lovers,
        MajorArcana::Chariot,
        MajorArcana::Strength,
        MajorArcana::Hermit,
        MajorArcana::WheelOfFortune,
        MajorArcana::Justice,
        MajorArcana::HangedMan,
        MajorArcana::Death,
        MajorArcana::Temperance,
        MajorArcana::Devil,
        MajorArcana::Tower,
        MajorArcana::Star,
        MajorArcana::Moon,
        MajorArcana::Sun,
        MajorArcana::Judgement,
        MajorArcana::World,
    ];

    pub fn number(&self) -> u8 {
        *self as u8
    }

    pub fn name(&self) -> &'static str {
        match self {
            MajorArcana::Fool => "愚人",
            MajorArcana::Magician => "魔术师",
            MajorArcana::HighPriestess => "女祭司",
            MajorArcana::Empress => "女皇",
            MajorArcana::Emperor => "皇帝",
            MajorArcana::Hierophant => "教皇",
            MajorArcana::Lovers => "恋人",
            MajorArcana::Chariot => "战车",
            MajorArcana::Strength => "力量",
            MajorArcana::Hermit => "隐士",
            MajorArcana::WheelOfFortune => "命运之轮",
            MajorArcana::Justice => "正义",
            MajorArcana::HangedMan => "倒吊人",
            MajorArcana::Death => "死神",
            MajorArcana::Temperance => "节制",
            MajorArcana::Devil => "恶魔",
            MajorArcana::Tower => "高塔",
            MajorArcana::Star => "星星",
            MajorArcana::Moon => "月亮",
            MajorArcana::Sun => "太阳",
            MajorArcana::Judgement => "审判",
            MajorArcana::World => "世界",
        }
    }
}

/// 牌所屬的分類：四個小牌組之一或大阿爾卡納
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Taxonomy {
    Minor(Suit),
    Major,
}

impl Taxonomy {
    pub fn name(&self) -> &'static str {
        match self {
            Taxonomy::Minor(Suit::Wands) => "权杖牌组",
            Taxonomy::Minor(Suit::Cups) => "圣杯牌组",
            Taxonomy::Minor(Suit::Swords) => "宝剑牌组",
            Taxonomy::Minor(Suit::Pentacles) => "金币牌组",
            Taxonomy::Major => "大阿尔卡纳",
        }
    }

    /// 該分類下的所有牌，依牌號排序
    pub fn members(&self) -> Vec<Arcana> {
        match self {
            Taxonomy::Minor(suit) => MinorRank::ALL
                .iter()
                .map(|&rank| Arcana::Minor { suit: *suit, rank })
                .collect(),
            Taxonomy::Major => MajorArcana::ALL.iter().map(|&m| Arcana::Major(m)).collect(),
        }
    }
}

/// 尚未決定正逆位的牌面
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Arcana {
    Major(MajorArcana),
    Minor { suit: Suit, rank: MinorRank },
}

impl Arcana {
    pub fn taxonomy(&self) -> Taxonomy {
        match self {
            Arcana::Major(_) => Taxonomy::Major,
            Arcana::Minor { suit, .. } => Taxonomy::Minor(*suit),
        }
    }

    pub fn is_major(&self) -> bool {
        matches!(self, Arcana::Major(_))
    }

    /// 例如 "魔术师" 或 "权杖一"
    pub fn name(&self) -> String {
        match self {
            Arcana::Major(major) => major.name().to_string(),
            Arcana::Minor { suit, rank } => format!("{}{}", suit.name(), rank.name()),
        }
    }
}

impl fmt::Display for Arcana {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Upright,
    Reversed,
}

impl Orientation {
    pub fn label(&self) -> &'static str {
        match self {
            Orientation::Upright => "正位",
            Orientation::Reversed => "逆位",
        }
    }

    pub fn is_reversed(&self) -> bool {
        matches!(self, Orientation::Reversed)
    }
}

/// 抽出後的一張牌，建立後不可變
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    arcana: Arcana,
    orientation: Orientation,
}

impl Card {
    pub fn new(arcana: Arcana, orientation: Orientation) -> Self {
        Self {
            arcana,
            orientation,
        }
    }

    pub fn upright(arcana: Arcana) -> Self {
        Self::new(arcana, Orientation::Upright)
    }

    pub fn reversed(arcana: Arcana) -> Self {
        Self::new(arcana, Orientation::Reversed)
    }

    pub fn arcana(&self) -> Arcana {
        self.arcana
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn is_reversed(&self) -> bool {
        self.orientation.is_reversed()
    }

    /// `<牌名> (<正位|逆位>)`
    pub fn display_name(&self) -> String {
        format!("{} ({})", self.arcana.name(), self.orientation.label())
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name())
    }
}
