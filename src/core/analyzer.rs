use crate::config::llm::LlmConfig;
use crate::core::client::HttpChatClient;
use crate::core::prompt::{self, SingleCardSections};
use crate::domain::card::Card;
use crate::domain::model::{AnalysisResult, AnalysisStatus, SeasonalAdvice, SingleCardReading};
use crate::domain::ports::{ChatClient, ChatMessage, ChatRequest};
use crate::domain::spread::Spread;
use crate::utils::error::{ErrorCategory, Result, TarotError};

/// 四季牌陣的 AI 解讀。每個操作都是單次請求，不重試。
///
/// 網路、狀態碼與回應格式的錯誤都在這裡吸收，轉成 `status: error`
/// 或預設文字；只有未設定 API 金鑰會以 `Err` 回傳，且不會送出任何請求。
pub struct TarotAnalyzer<C: ChatClient = HttpChatClient> {
    client: C,
    config: LlmConfig,
}

impl TarotAnalyzer<HttpChatClient> {
    pub fn new(config: LlmConfig) -> Result<Self> {
        let client = HttpChatClient::new(&config)?;
        Ok(Self { client, config })
    }
}

impl<C: ChatClient> TarotAnalyzer<C> {
    pub fn with_client(config: LlmConfig, client: C) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    fn build_request(&self, user_prompt: String, max_tokens: Option<u32>) -> ChatRequest {
        ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage::system(prompt::system_prompt()),
                ChatMessage::user(user_prompt),
            ],
            max_tokens: max_tokens.unwrap_or(self.config.max_tokens),
            temperature: self.config.temperature,
        }
    }

    /// 送出請求；失敗時記錄並回傳 `None`
    async fn request_text(&self, user_prompt: String, max_tokens: Option<u32>) -> Result<Option<String>> {
        self.config.require_api_key()?;

        let request = self.build_request(user_prompt, max_tokens);
        match self.client.complete(&request).await {
            Ok(text) if !text.trim().is_empty() => Ok(Some(text)),
            Ok(_) => {
                tracing::warn!("⚠️ API returned empty content");
                Ok(None)
            }
            Err(e) if e.category() == ErrorCategory::Configuration => Err(e),
            Err(e) => {
                tracing::warn!("⚠️ API request failed: {}", e);
                Ok(None)
            }
        }
    }

    /// 完整解讀。`_context` 目前不會放進提示詞。
    pub async fn analyze(&self, spread: &Spread, _context: Option<&str>) -> Result<AnalysisResult> {
        let cards_summary = prompt::format_for_prompt(spread);
        tracing::info!("🔮 Requesting full analysis");

        let result = match self
            .request_text(prompt::analysis_prompt(&cards_summary), None)
            .await?
        {
            Some(text) => AnalysisResult {
                full_analysis: text,
                cards_summary,
                status: AnalysisStatus::Success,
            },
            None => AnalysisResult {
                full_analysis: prompt::ANALYSIS_FALLBACK.to_string(),
                cards_summary,
                status: AnalysisStatus::Error,
            },
        };
        Ok(result)
    }

    /// 一句話洞察，失敗時回傳固定文字
    pub async fn quick_insight(&self, spread: &Spread) -> Result<String> {
        let cards_summary = prompt::format_for_prompt(spread);
        tracing::info!("💡 Requesting quick insight");

        let insight = self
            .request_text(
                prompt::insight_prompt(&cards_summary),
                Some(prompt::INSIGHT_MAX_TOKENS),
            )
            .await?;
        Ok(insight.unwrap_or_else(|| prompt::INSIGHT_FALLBACK.to_string()))
    }

    pub async fn seasonal_advice(&self, spread: &Spread) -> Result<SeasonalAdvice> {
        let cards_summary = prompt::format_for_prompt(spread);
        tracing::info!("🌟 Requesting seasonal advice");

        let advice = match self
            .request_text(
                prompt::advice_prompt(&cards_summary),
                Some(prompt::ADVICE_MAX_TOKENS),
            )
            .await?
        {
            Some(text) => SeasonalAdvice {
                seasonal_advice: text,
                status: AnalysisStatus::Success,
            },
            None => SeasonalAdvice {
                seasonal_advice: prompt::ADVICE_FALLBACK.to_string(),
                status: AnalysisStatus::Error,
            },
        };
        Ok(advice)
    }

    /// 日常單抽解讀，問題不可為空
    pub async fn analyze_single_card(&self, card: &Card, question: &str) -> Result<SingleCardReading> {
        if question.trim().is_empty() {
            return Err(TarotError::ValidationError {
                message: "缺少用户问题".to_string(),
            });
        }
        tracing::info!("🃏 Requesting single card analysis for {}", card);

        let reading = match self
            .request_text(
                prompt::single_card_prompt(card, question),
                Some(prompt::SINGLE_CARD_MAX_TOKENS),
            )
            .await?
        {
            Some(text) => {
                let SingleCardSections {
                    interpretation,
                    guidance,
                    key_message,
                } = prompt::parse_single_card_sections(&text);
                SingleCardReading {
                    card: *card,
                    question: question.to_string(),
                    interpretation,
                    guidance,
                    key_message,
                    full_text: Some(text),
                    status: AnalysisStatus::Success,
                }
            }
            None => SingleCardReading {
                card: *card,
                question: question.to_string(),
                interpretation: prompt::SINGLE_INTERPRETATION_FALLBACK.to_string(),
                guidance: prompt::SINGLE_GUIDANCE_FALLBACK.to_string(),
                key_message: prompt::SINGLE_KEY_MESSAGE_FALLBACK.to_string(),
                full_text: None,
                status: AnalysisStatus::Error,
            },
        };
        Ok(reading)
    }

    /// 送出極小的測試請求確認金鑰可用；這裡的網路錯誤會直接回傳
    pub async fn validate_api_key(&self) -> Result<()> {
        self.config.require_api_key()?;
        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage::user(prompt::ping_prompt())],
            max_tokens: prompt::PING_MAX_TOKENS,
            temperature: self.config.temperature,
        };
        self.client.complete(&request).await?;
        tracing::info!("✅ API key validated against {}", self.config.api_base_url);
        Ok(())
    }
}
