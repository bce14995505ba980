#[cfg(feature = "cli")]
pub mod cli;
pub mod llm;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command};
pub use llm::LlmConfig;
pub use toml_config::TomlConfig;
