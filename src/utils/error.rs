use thiserror::Error;

#[derive(Error, Debug)]
pub enum BotError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Telegram request failed: {0}")]
    TelegramError(#[from] teloxide::RequestError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Settings parsing error: {0}")]
    SettingsError(#[from] toml::de::Error),

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl BotError {
    pub fn user_friendly_message(&self) -> String {
        match self {
            BotError::ApiError(_) => "Could not reach the fixtures provider".to_string(),
            BotError::SerializationError(_) => {
                "The fixtures provider returned data in an unexpected format".to_string()
            }
            BotError::TelegramError(_) => "Could not talk to Telegram".to_string(),
            BotError::IoError(e) => format!("File access failed: {}", e),
            BotError::SettingsError(e) => format!("Settings file is not valid TOML: {}", e),
            BotError::MissingConfigError { field } => {
                format!("Required setting {} is not set", field)
            }
            BotError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting {} is invalid: {}", field, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            BotError::ApiError(_) | BotError::SerializationError(_) => {
                "Check FOOTBALL_API_KEY and the provider base_url, then try again later"
            }
            BotError::TelegramError(_) => "Check TELEGRAM_TOKEN and CHAT_ID",
            BotError::IoError(_) => "Make sure the settings file exists and is readable",
            BotError::SettingsError(_) => "Fix the settings file and restart",
            BotError::MissingConfigError { .. } | BotError::InvalidConfigValueError { .. } => {
                "Set TELEGRAM_TOKEN, CHAT_ID and FOOTBALL_API_KEY in the environment or a .env file"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, BotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_secret_message_and_suggestion() {
        let missing = BotError::MissingConfigError {
            field: "CHAT_ID".to_string(),
        };
        assert_eq!(
            missing.user_friendly_message(),
            "Required setting CHAT_ID is not set"
        );
        assert!(missing.recovery_suggestion().contains("CHAT_ID"));
    }

    #[test]
    fn test_invalid_value_message_names_field_and_reason() {
        let invalid = BotError::InvalidConfigValueError {
            field: "report.min_score".to_string(),
            value: "150".to_string(),
            reason: "must be between 0 and 100".to_string(),
        };
        assert_eq!(
            invalid.user_friendly_message(),
            "Setting report.min_score is invalid: must be between 0 and 100"
        );
        assert_eq!(
            invalid.to_string(),
            "Invalid value for report.min_score: '150' (must be between 0 and 100)"
        );
    }

    #[test]
    fn test_runtime_failures_point_at_the_failing_side() {
        let io = BotError::IoError(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert_eq!(io.user_friendly_message(), "File access failed: gone");
        assert_eq!(
            io.recovery_suggestion(),
            "Make sure the settings file exists and is readable"
        );
    }
}
