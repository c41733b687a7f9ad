use crate::domain::model::Coordinate;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{NoorError, Result};
use crate::utils::logger::LogFormat;
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_range, validate_required_field,
    validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_ENDPOINT: &str = "https://openrouter.ai/api/v1/chat/completions";
pub const API_KEY_ENV: &str = "OPENROUTER_API_KEY";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub ai: AiConfig,
    pub location: Option<LocationConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_model")]
    pub model: String,
    pub api_key: Option<String>,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_referer")]
    pub referer: String,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub format: Option<String>,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_model() -> String {
    "openai/gpt-4o".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    1500
}

fn default_referer() -> String {
    "https://nooriq.app".to_string()
}

fn default_title() -> String {
    "NoorIQ - Smart Quran Companion".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            api_key: None,
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            referer: default_referer(),
            title: default_title(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(NoorError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        let mut config: AppConfig =
            toml::from_str(&processed_content).map_err(|e| NoorError::ConfigValidationError {
                field: "toml_parsing".to_string(),
                message: format!("TOML parsing error: {}", e),
            })?;
        config.apply_env_fallbacks();
        Ok(config)
    }

    /// 沒有設定檔時使用預設值，再套用環境變數
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env_fallbacks();
        config
    }

    /// 替換環境變數 (例如 ${OPENROUTER_API_KEY})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| NoorError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    fn apply_env_fallbacks(&mut self) {
        // 未替換的 ${VAR} 視為未設定
        let unresolved = self
            .ai
            .api_key
            .as_deref()
            .map(|k| k.trim().is_empty() || k.starts_with("${"))
            .unwrap_or(true);

        if unresolved {
            self.ai.api_key = std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty());
        }
    }

    pub fn location(&self) -> Option<Coordinate> {
        self.location
            .as_ref()
            .map(|l| Coordinate::new(l.latitude, l.longitude))
    }

    /// `[location]` 為 prayer-times 未帶 --lat/--lng 時的必要設定
    pub fn require_location(&self) -> Result<Coordinate> {
        let location = self.location();
        validate_required_field("location", &location).copied()
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }

    pub fn log_format(&self) -> LogFormat {
        self.logging
            .as_ref()
            .and_then(|l| l.format.as_deref())
            .and_then(LogFormat::parse)
            .unwrap_or_default()
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validate_url("ai.endpoint", &self.ai.endpoint)?;
        validate_non_empty_string("ai.model", &self.ai.model)?;
        validate_range("ai.temperature", self.ai.temperature, 0.0, 2.0)?;
        validate_positive_number("ai.max_tokens", self.ai.max_tokens, 1)?;
        validate_positive_number("ai.timeout_seconds", self.ai.timeout_seconds, 1)?;

        if let Some(location) = self.location() {
            location.validate()?;
        }

        if let Some(format) = self.logging.as_ref().and_then(|l| l.format.as_deref()) {
            if LogFormat::parse(format).is_none() {
                return Err(NoorError::InvalidConfigValueError {
                    field: "logging.format".to_string(),
                    value: format.to_string(),
                    reason: "Unsupported format. Valid formats: compact, json".to_string(),
                });
            }
        }

        Ok(())
    }
}

impl ConfigProvider for AppConfig {
    fn ai_endpoint(&self) -> &str {
        &self.ai.endpoint
    }

    fn ai_model(&self) -> &str {
        &self.ai.model
    }

    fn api_key(&self) -> Option<&str> {
        self.ai.api_key.as_deref()
    }

    fn temperature(&self) -> f32 {
        self.ai.temperature
    }

    fn max_tokens(&self) -> u32 {
        self.ai.max_tokens
    }

    fn referer(&self) -> &str {
        &self.ai.referer
    }

    fn app_title(&self) -> &str {
        &self.ai.title
    }

    fn timeout_seconds(&self) -> u64 {
        self.ai.timeout_seconds
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
