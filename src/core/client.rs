use crate::config::llm::LlmConfig;
use crate::domain::ports::{ChatClient, ChatRequest};
use crate::utils::error::{Result, TarotError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

/// 只取用回應中需要的部分
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

/// 以 reqwest 呼叫 OpenAI 相容的 `/chat/completions`
pub struct HttpChatClient {
    client: Client,
    url: String,
    api_key: Option<String>,
}

impl HttpChatClient {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            client,
            url: config.completions_url(),
            api_key: config.api_key.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn extract_content(body: &str) -> Result<String> {
        let parsed: ChatCompletionResponse =
            serde_json::from_str(body).map_err(|e| TarotError::MalformedResponseError {
                message: format!("unexpected response body: {}", e),
            })?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| TarotError::MalformedResponseError {
                message: "response contains no choices".to_string(),
            })
    }
}

#[async_trait]
impl ChatClient for HttpChatClient {
    async fn complete(&self, request: &ChatRequest) -> Result<String> {
        let api_key = match self.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => key,
            _ => {
                return Err(TarotError::ConfigError {
                    message: "API密钥未设置，请先配置aihubmix API密钥".to_string(),
                })
            }
        };

        tracing::debug!(
            "📡 POST {} (model: {}, max_tokens: {})",
            self.url,
            request.model,
            request.max_tokens
        );

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(api_key)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("📡 API response status: {}", status);

        let body = response.text().await?;
        if status != reqwest::StatusCode::OK {
            return Err(TarotError::HttpStatusError {
                status: status.as_u16(),
                body,
            });
        }

        Self::extract_content(&body)
    }
}
