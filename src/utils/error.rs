use thiserror::Error;

#[derive(Error, Debug)]
pub enum TarotError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API returned status {status}: {body}")]
    HttpStatusError { status: u16, body: String },

    #[error("Malformed API response: {message}")]
    MalformedResponseError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Network,
    Data,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl TarotError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            TarotError::ConfigError { .. } | TarotError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            TarotError::ApiError(_) | TarotError::HttpStatusError { .. } => ErrorCategory::Network,
            TarotError::MalformedResponseError { .. }
            | TarotError::SerializationError(_)
            | TarotError::ValidationError { .. } => ErrorCategory::Data,
            TarotError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 給終端使用者看的訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            TarotError::ConfigError { .. } => "API密钥未配置，请先设置aihubmix API密钥".to_string(),
            TarotError::InvalidConfigValueError { field, reason, .. } => {
                format!("配置项 {} 无效：{}", field, reason)
            }
            TarotError::ApiError(e) if e.is_timeout() => "API请求超时".to_string(),
            TarotError::ApiError(_) => "无法连接到AI服务".to_string(),
            TarotError::HttpStatusError { status, .. } => format!("API请求失败: {}", status),
            TarotError::MalformedResponseError { .. } => "AI服务返回了无法解析的内容".to_string(),
            TarotError::SerializationError(e) => format!("JSON解析错误: {}", e),
            TarotError::IoError(e) => format!("文件读写失败: {}", e),
            TarotError::ValidationError { message } => message.clone(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => {
                "设置环境变量 AIHUBMIX_API_KEY，或使用 --api-key 参数"
            }
            ErrorCategory::Network => "检查网络连接与 API 地址后重试",
            ErrorCategory::Data => "确认输入的牌阵文件或 API 响应格式正确",
            ErrorCategory::System => "检查文件路径与权限",
        }
    }
}

pub type Result<T> = std::result::Result<T, TarotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_errors_are_high_severity() {
        let err = TarotError::ConfigError {
            message: "api_key not set".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.recovery_suggestion().contains("AIHUBMIX_API_KEY"));
    }

    #[test]
    fn test_status_error_is_network() {
        let err = TarotError::HttpStatusError {
            status: 503,
            body: "unavailable".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Network);
        assert_eq!(err.user_friendly_message(), "API请求失败: 503");
    }
}
