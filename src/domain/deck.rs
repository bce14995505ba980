use crate::domain::card::{Arcana, Card, Orientation, Suit, Taxonomy};
use rand::seq::SliceRandom;
use rand::Rng;

/// 一副牌。抽牌時從尾端取出，配合 `shuffle` 等同均勻隨機抽取。
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Arcana>,
}

impl Deck {
    /// 單一分類的完整牌組
    pub fn of(taxonomy: Taxonomy) -> Self {
        Self {
            cards: taxonomy.members(),
        }
    }

    pub fn major() -> Self {
        Self::of(Taxonomy::Major)
    }

    pub fn suit(suit: Suit) -> Self {
        Self::of(Taxonomy::Minor(suit))
    }

    /// 完整 78 張牌
    pub fn full() -> Self {
        let mut cards = Taxonomy::Major.members();
        for suit in Suit::ALL {
            cards.extend(Taxonomy::Minor(suit).members());
        }
        Self { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Arcana] {
        &self.cards
    }

    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    pub fn try_draw(&mut self) -> Option<Arcana> {
        self.cards.pop()
    }

    /// 從空牌組抽牌屬於呼叫端的邏輯錯誤，直接 panic
    pub fn draw(&mut self) -> Arcana {
        match self.try_draw() {
            Some(arcana) => arcana,
            None => panic!("cannot draw from an empty deck"),
        }
    }

    /// 抽一張牌並以 `reversed_probability` 的機率設為逆位
    pub fn draw_card<R: Rng + ?Sized>(&mut self, rng: &mut R, reversed_probability: f64) -> Card {
        let arcana = self.draw();
        let orientation = if rng.random_bool(reversed_probability) {
            Orientation::Reversed
        } else {
            Orientation::Upright
        };
        Card::new(arcana, orientation)
    }
}
