use crate::utils::error::{BotError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_required_field};
use std::fmt;
use teloxide::types::{ChatId, Recipient};

pub const BOT_TOKEN_VAR: &str = "TELEGRAM_TOKEN";
pub const CHAT_ID_VAR: &str = "CHAT_ID";
pub const API_KEY_VAR: &str = "FOOTBALL_API_KEY";

/// Credentials read once at startup. Any missing value is fatal.
#[derive(Clone)]
pub struct BotSecrets {
    pub bot_token: String,
    /// Numeric chat id or an `@channel` username.
    pub chat_id: Recipient,
    pub api_key: String,
}

impl fmt::Debug for BotSecrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotSecrets")
            .field("bot_token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl BotSecrets {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bot_token = required(&lookup, BOT_TOKEN_VAR)?;
        let raw_chat_id = required(&lookup, CHAT_ID_VAR)?;
        let api_key = required(&lookup, API_KEY_VAR)?;

        let chat_id = parse_recipient(&raw_chat_id)?;

        Ok(Self {
            bot_token,
            chat_id,
            api_key,
        })
    }
}

fn parse_recipient(raw: &str) -> Result<Recipient> {
    if let Ok(id) = raw.parse::<i64>() {
        return Ok(Recipient::Id(ChatId(id)));
    }

    match raw.strip_prefix('@') {
        Some(name) if !name.is_empty() && !name.contains(char::is_whitespace) => {
            Ok(Recipient::ChannelUsername(raw.to_string()))
        }
        _ => Err(BotError::InvalidConfigValueError {
            field: CHAT_ID_VAR.to_string(),
            value: raw.to_string(),
            reason: "Expected a numeric chat id or an @channel username".to_string(),
        }),
    }
}

fn required<F>(lookup: &F, name: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(name);
    let value = validate_required_field(name, &value)?;
    validate_non_empty_string(name, value)?;
    Ok(value.trim().to_string())
}
