use crate::utils::error::{Result, TarotError};
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_range, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://aihubmix.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_MAX_TOKENS: u32 = 1500;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

pub const ENV_API_KEY: &str = "AIHUBMIX_API_KEY";
pub const ENV_BASE_URL: &str = "AIHUBMIX_BASE_URL";
pub const ENV_MODEL: &str = "AIHUBMIX_MODEL";
pub const ENV_MAX_TOKENS: &str = "AIHUBMIX_MAX_TOKENS";
pub const ENV_TEMPERATURE: &str = "AIHUBMIX_TEMPERATURE";
pub const ENV_TIMEOUT: &str = "AIHUBMIX_TIMEOUT";

/// chat-completion 服務的連線設定，建構分析器時明確傳入
#[derive(Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    pub api_base_url: String,
    pub api_key: Option<String>,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout_seconds: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

// api_key 不寫進日誌
impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("api_base_url", &self.api_base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl LlmConfig {
    /// 預設值加上環境變數
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    pub fn apply_env(&mut self) {
        self.apply_env_lookup(|name| std::env::var(name).ok());
    }

    /// 以任意查詢函式套用環境變數，無法解析的數值略過並警告
    pub fn apply_env_lookup<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(ENV_API_KEY).filter(|v| !v.is_empty()) {
            self.api_key = Some(key);
        }
        if let Some(url) = lookup(ENV_BASE_URL).filter(|v| !v.is_empty()) {
            self.api_base_url = url;
        }
        if let Some(model) = lookup(ENV_MODEL).filter(|v| !v.is_empty()) {
            self.model = model;
        }
        if let Some(raw) = lookup(ENV_MAX_TOKENS) {
            match raw.trim().parse() {
                Ok(v) => self.max_tokens = v,
                Err(_) => tracing::warn!("⚠️ Ignoring invalid {}: {}", ENV_MAX_TOKENS, raw),
            }
        }
        if let Some(raw) = lookup(ENV_TEMPERATURE) {
            match raw.trim().parse::<f32>() {
                Ok(v) if v.is_finite() => self.temperature = v,
                _ => tracing::warn!("⚠️ Ignoring invalid {}: {}", ENV_TEMPERATURE, raw),
            }
        }
        if let Some(raw) = lookup(ENV_TIMEOUT) {
            match raw.trim().parse() {
                Ok(v) => self.timeout_seconds = v,
                Err(_) => tracing::warn!("⚠️ Ignoring invalid {}: {}", ENV_TIMEOUT, raw),
            }
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api_base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout_seconds(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    /// API 金鑰存在且不是空白
    pub fn is_configured(&self) -> bool {
        self.api_key
            .as_deref()
            .map(|key| !key.trim().is_empty())
            .unwrap_or(false)
    }

    /// 未設定金鑰時回傳設定錯誤，任何網路請求之前都要先檢查
    pub fn require_api_key(&self) -> Result<&str> {
        match self.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(TarotError::ConfigError {
                message: "API密钥未配置，请先设置aihubmix API密钥".to_string(),
            }),
        }
    }

    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.api_base_url.trim_end_matches('/'))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Validate for LlmConfig {
    fn validate(&self) -> Result<()> {
        validate_url("api_base_url", &self.api_base_url)?;
        validate_non_empty_string("model", &self.model)?;
        validate_positive_number("max_tokens", self.max_tokens as u64, 1)?;
        validate_range("temperature", self.temperature, 0.0, 2.0)?;
        validate_positive_number("timeout_seconds", self.timeout_seconds, 1)?;
        Ok(())
    }
}
