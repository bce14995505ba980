// Domain layer: card taxonomy, decks, spreads and the result records.

pub mod card;
pub mod deck;
pub mod model;
pub mod ports;
pub mod spread;
