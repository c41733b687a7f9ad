use thiserror::Error;

#[derive(Error, Debug)]
pub enum NoorError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Config validation failed on {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("API request failed: {status} {reason}. {detail}")]
    ApiStatusError {
        status: u16,
        reason: String,
        detail: String,
    },

    #[error("Invalid response format from AI service")]
    InvalidResponseError,

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Network,
    RemoteService,
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

impl NoorError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            NoorError::ConfigError { .. }
            | NoorError::MissingConfigError { .. }
            | NoorError::InvalidConfigValueError { .. }
            | NoorError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            NoorError::HttpError(_) => ErrorCategory::Network,
            NoorError::ApiStatusError { .. } | NoorError::InvalidResponseError => {
                ErrorCategory::RemoteService
            }
            NoorError::SerializationError(_) | NoorError::ValidationError { .. } => {
                ErrorCategory::Data
            }
            NoorError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network | ErrorCategory::RemoteService => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 給終端使用者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            NoorError::MissingConfigError { field } => {
                format!("Required setting '{}' is not configured", field)
            }
            NoorError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            NoorError::HttpError(_) => "Could not reach the AI service".to_string(),
            NoorError::ApiStatusError { status, .. } => {
                format!("The AI service rejected the request (HTTP {})", status)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            NoorError::MissingConfigError { .. } => {
                "Set the value in the config file or export the matching environment variable"
            }
            NoorError::InvalidConfigValueError { .. }
            | NoorError::ConfigValidationError { .. }
            | NoorError::ConfigError { .. } => "Check the config file against nooriq.example.toml",
            NoorError::HttpError(_) => "Check your network connection and try again",
            NoorError::ApiStatusError { status, .. } if *status == 401 || *status == 403 => {
                "Verify that OPENROUTER_API_KEY is valid"
            }
            NoorError::ApiStatusError { .. } | NoorError::InvalidResponseError => {
                "Try again later or switch ai.model"
            }
            NoorError::ValidationError { .. } => "Check the command arguments",
            NoorError::SerializationError(_) => "Report this response as a bug",
            NoorError::IoError(_) => "Check file permissions and paths",
        }
    }
}

pub type Result<T> = std::result::Result<T, NoorError>;
