pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{LlmConfig, TomlConfig};

pub use crate::core::{analyzer::TarotAnalyzer, client::HttpChatClient, reading::ReadingEngine};
pub use crate::core::prompt::format_for_prompt;
pub use domain::card::{Arcana, Card, MajorArcana, MinorRank, Orientation, Suit, Taxonomy};
pub use domain::model::{AnalysisResult, AnalysisStatus, CompleteReading, SeasonalAdvice, SingleCardReading};
pub use domain::spread::{draw_single_card, draw_spread, spread_info, Position, Spread};
pub use utils::error::{Result, TarotError};
