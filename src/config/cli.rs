use crate::config::llm::LlmConfig;
use crate::config::toml_config::TomlConfig;
use crate::utils::error::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Clone, Parser)]
#[command(name = "four-seasons-tarot")]
#[command(about = "四季牌阵：抽牌与 AI 解读")]
pub struct CliConfig {
    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub log_json: bool,

    /// Path to TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// API key, overrides AIHUBMIX_API_KEY
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// API base URL, overrides AIHUBMIX_BASE_URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Model identifier, overrides AIHUBMIX_MODEL
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Draw a Four Seasons spread
    Draw {
        #[arg(long)]
        json: bool,
        /// Save the spread as JSON for later analysis
        #[arg(long)]
        save: Option<PathBuf>,
    },
    /// Full AI analysis of a spread
    Analyze {
        /// Spread JSON file; a new spread is drawn when omitted
        #[arg(long)]
        spread: Option<PathBuf>,
    },
    /// One-sentence insight
    Insight {
        #[arg(long)]
        spread: Option<PathBuf>,
    },
    /// Short advice for each life aspect
    Advice {
        #[arg(long)]
        spread: Option<PathBuf>,
    },
    /// Draw and run insight, advice and full analysis
    Complete {
        #[arg(long)]
        json: bool,
    },
    /// Daily single-card draw
    Daily {
        /// Ask the AI about this card
        #[arg(short, long)]
        question: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// List every card by deck
    Cards,
    /// Show spread positions and layout
    Info,
    /// Show configuration status
    Config {
        /// Send a test request to verify the API key
        #[arg(long)]
        check: bool,
    },
}

// --api-key 不寫進日誌
impl std::fmt::Debug for CliConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CliConfig")
            .field("verbose", &self.verbose)
            .field("log_json", &self.log_json)
            .field("config", &self.config)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .field("command", &self.command)
            .finish()
    }
}

impl CliConfig {
    /// 預設值 -> 設定檔 -> 環境變數 -> 命令列參數
    pub fn llm_config(&self) -> Result<LlmConfig> {
        self.llm_config_with(|name| std::env::var(name).ok())
    }

    pub fn llm_config_with<F>(&self, lookup: F) -> Result<LlmConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = LlmConfig::default();

        if let Some(path) = &self.config {
            tracing::debug!("📁 Loading configuration from: {}", path.display());
            TomlConfig::from_file(path)?.apply_to(&mut config);
        }

        config.apply_env_lookup(lookup);

        if let Some(key) = &self.api_key {
            config = config.with_api_key(key.clone());
        }
        if let Some(url) = &self.base_url {
            config = config.with_base_url(url.clone());
        }
        if let Some(model) = &self.model {
            config = config.with_model(model.clone());
        }
        if let Some(timeout) = self.timeout {
            config = config.with_timeout_seconds(timeout);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::validation::Validate;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_subcommands() {
        let cli = CliConfig::try_parse_from(["four-seasons-tarot", "draw", "--json"]).unwrap();
        assert!(matches!(cli.command, Command::Draw { json: true, save: None }));

        let cli = CliConfig::try_parse_from([
            "four-seasons-tarot",
            "daily",
            "-q",
            "今天适合出行吗？",
            "--verbose",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Command::Daily { question, .. } => {
                assert_eq!(question.as_deref(), Some("今天适合出行吗？"))
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_debug_hides_api_key() {
        let cli = CliConfig::try_parse_from([
            "four-seasons-tarot",
            "--api-key",
            "sk-secret-123",
            "info",
        ])
        .unwrap();
        let printed = format!("{:?}", cli);
        assert!(!printed.contains("sk-secret-123"));
        assert!(printed.contains("***"));
        assert!(printed.contains("Info"));
    }

    #[test]
    fn test_empty_env_key_keeps_file_key() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[llm]\napi_key = \"sk-from-file\"\n").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let cli =
            CliConfig::try_parse_from(["four-seasons-tarot", "--config", path.as_str(), "info"])
                .unwrap();
        let config = cli
            .llm_config_with(|name| (name == "AIHUBMIX_API_KEY").then(String::new))
            .unwrap();

        assert_eq!(config.api_key.as_deref(), Some("sk-from-file"));
        assert!(config.is_configured());
    }

    #[test]
    fn test_nan_temperature_from_env_is_ignored() {
        let cli = CliConfig::try_parse_from(["four-seasons-tarot", "info"]).unwrap();
        let config = cli
            .llm_config_with(|name| (name == "AIHUBMIX_TEMPERATURE").then(|| "NaN".to_string()))
            .unwrap();
        assert_eq!(config.temperature, 0.7);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_precedence_file_env_flags() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(
            b"[llm]\nmodel = \"from-file\"\nmax_tokens = 900\napi_base_url = \"http://file.example/v1\"\n",
        )
        .unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let cli = CliConfig::try_parse_from([
            "four-seasons-tarot",
            "--config",
            path.as_str(),
            "--model",
            "from-flag",
            "info",
        ])
        .unwrap();

        let config = cli
            .llm_config_with(|name| match name {
                "AIHUBMIX_MODEL" => Some("from-env".to_string()),
                "AIHUBMIX_BASE_URL" => Some("http://env.example/v1".to_string()),
                _ => None,
            })
            .unwrap();

        assert_eq!(config.model, "from-flag");
        assert_eq!(config.api_base_url, "http://env.example/v1");
        assert_eq!(config.max_tokens, 900);
        assert!(!config.is_configured());
    }
}
