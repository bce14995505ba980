use crate::core::analyzer::TarotAnalyzer;
use crate::domain::model::CompleteReading;
use crate::domain::ports::ChatClient;
use crate::domain::spread::{draw_spread, Spread};
use crate::utils::error::Result;
use chrono::Utc;

/// 抽牌後依序取得洞察、建議與完整解讀
pub struct ReadingEngine<C: ChatClient> {
    analyzer: TarotAnalyzer<C>,
}

impl<C: ChatClient> ReadingEngine<C> {
    pub fn new(analyzer: TarotAnalyzer<C>) -> Self {
        Self { analyzer }
    }

    pub async fn run(&self) -> Result<CompleteReading> {
        // 先確認設定，避免抽了牌卻無法分析
        self.analyzer.config().require_api_key()?;

        tracing::info!("📜 Drawing Four Seasons spread...");
        let spread = draw_spread();
        self.run_with(spread).await
    }

    pub async fn run_with(&self, spread: Spread) -> Result<CompleteReading> {
        let insight = self.analyzer.quick_insight(&spread).await?;
        let advice = self.analyzer.seasonal_advice(&spread).await?;
        let analysis = self.analyzer.analyze(&spread, None).await?;

        tracing::info!(
            "✅ Complete reading finished (advice: {:?}, analysis: {:?})",
            advice.status,
            analysis.status
        );

        Ok(CompleteReading {
            spread,
            insight,
            advice,
            analysis,
            timestamp: Utc::now(),
        })
    }
}
