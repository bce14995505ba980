pub mod analyzer;
pub mod client;
pub mod prompt;
pub mod reading;

pub use crate::domain::model::{AnalysisResult, AnalysisStatus, CompleteReading, SeasonalAdvice};
pub use crate::domain::ports::{ChatClient, ChatMessage, ChatRequest};
pub use crate::utils::error::Result;
