use crate::config::llm::LlmConfig;
use crate::utils::error::{Result, TarotError};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 設定檔內容，所有欄位皆為選填
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub llm: Option<LlmSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LlmSection {
    pub api_base_url: Option<String>,
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub timeout_seconds: Option<u64>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(TarotError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| TarotError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${AIHUBMIX_API_KEY})，找不到的變數保留原文
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| TarotError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 將檔案中有設定的欄位覆蓋到 `config`
    pub fn apply_to(&self, config: &mut LlmConfig) {
        let Some(llm) = &self.llm else {
            return;
        };

        if let Some(url) = &llm.api_base_url {
            config.api_base_url = url.clone();
        }
        if let Some(key) = &llm.api_key {
            // 未被替換的 ${VAR} 視為未設定
            if !(key.starts_with("${") && key.ends_with('}')) {
                config.api_key = Some(key.clone());
            }
        }
        if let Some(model) = &llm.model {
            config.model = model.clone();
        }
        if let Some(max_tokens) = llm.max_tokens {
            config.max_tokens = max_tokens;
        }
        if let Some(temperature) = llm.temperature {
            config.temperature = temperature;
        }
        if let Some(timeout) = llm.timeout_seconds {
            config.timeout_seconds = timeout;
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        let mut merged = LlmConfig::default();
        self.apply_to(&mut merged);
        merged.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_llm_section() {
        let toml_content = r#"
[llm]
api_base_url = "https://api.example.com/v1"
model = "gpt-4o"
max_tokens = 900
temperature = 0.5
timeout_seconds = 10
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        let mut llm = LlmConfig::default();
        config.apply_to(&mut llm);

        assert_eq!(llm.api_base_url, "https://api.example.com/v1");
        assert_eq!(llm.model, "gpt-4o");
        assert_eq!(llm.max_tokens, 900);
        assert_eq!(llm.temperature, 0.5);
        assert_eq!(llm.timeout_seconds, 10);
        assert!(llm.api_key.is_none());
    }

    #[test]
    fn test_empty_file_keeps_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        let mut llm = LlmConfig::default();
        config.apply_to(&mut llm);
        assert_eq!(llm.model, "gpt-4o-mini");
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("TAROT_TEST_TOML_KEY", "sk-from-env");

        let toml_content = r#"
[llm]
api_key = "${TAROT_TEST_TOML_KEY}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        let mut llm = LlmConfig::default();
        config.apply_to(&mut llm);
        assert_eq!(llm.api_key.as_deref(), Some("sk-from-env"));

        std::env::remove_var("TAROT_TEST_TOML_KEY");
    }

    #[test]
    fn test_unresolved_variable_is_kept_and_not_used_as_key() {
        let toml_content = r#"
[llm]
api_key = "${TAROT_TEST_SURELY_UNSET_VAR}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        let section = config.llm.as_ref().unwrap();
        assert_eq!(
            section.api_key.as_deref(),
            Some("${TAROT_TEST_SURELY_UNSET_VAR}")
        );

        let mut llm = LlmConfig::default();
        config.apply_to(&mut llm);
        assert!(!llm.is_configured());
    }

    #[test]
    fn test_config_validation() {
        let config = TomlConfig::from_toml_str(
            r#"
[llm]
api_base_url = "invalid-url"
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_nan_temperature_fails_validation() {
        let config = TomlConfig::from_toml_str("[llm]\ntemperature = nan\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        assert!(matches!(
            TomlConfig::from_toml_str("[llm\nmodel = "),
            Err(TarotError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[llm]\nmodel = \"deepseek-chat\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(
            config.llm.unwrap().model.as_deref(),
            Some("deepseek-chat")
        );
    }
}
