use crate::domain::card::Card;
use crate::domain::spread::Spread;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisStatus {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub full_analysis: String,
    pub cards_summary: String,
    pub status: AnalysisStatus,
}

impl AnalysisResult {
    pub fn is_success(&self) -> bool {
        self.status == AnalysisStatus::Success
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalAdvice {
    pub seasonal_advice: String,
    pub status: AnalysisStatus,
}

impl SeasonalAdvice {
    pub fn is_success(&self) -> bool {
        self.status == AnalysisStatus::Success
    }
}

/// 日常單抽的解讀結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SingleCardReading {
    pub card: Card,
    pub question: String,
    pub interpretation: String,
    pub guidance: String,
    pub key_message: String,
    pub full_text: Option<String>,
    pub status: AnalysisStatus,
}

/// 一次抽牌加上洞察、建議與完整解讀
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompleteReading {
    pub spread: Spread,
    pub insight: String,
    pub advice: SeasonalAdvice,
    pub analysis: AnalysisResult,
    pub timestamp: DateTime<Utc>,
}
