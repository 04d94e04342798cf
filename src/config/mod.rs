pub mod secrets;
pub mod settings;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use chrono::NaiveDate;
use chrono_tz::Tz;
use clap::Parser;

pub use secrets::BotSecrets;
pub use settings::Settings;

#[derive(Debug, Clone, Parser)]
#[command(name = "btts-bot")]
#[command(about = "Telegram bot that posts today's high-probability BTTS fixtures")]
pub struct CliArgs {
    /// Path to an optional TOML settings file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Build the digest once, deliver it to CHAT_ID and exit
    #[arg(long)]
    pub once: bool,

    /// Fixture date for --once (defaults to today)
    #[arg(long, requires = "once")]
    pub date: Option<NaiveDate>,

    /// With --once, print the digest instead of sending it
    #[arg(long, requires = "once")]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,
}

/// Everything a run needs, loaded once at startup and passed down explicitly.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub secrets: BotSecrets,
    pub settings: Settings,
}

impl AppConfig {
    pub fn new(secrets: BotSecrets, settings: Settings) -> Result<Self> {
        let config = Self { secrets, settings };
        config.validate()?;
        Ok(config)
    }

    /// Secrets come from the environment, settings from `path` or defaults.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let secrets = BotSecrets::from_env()?;
        let settings = match path {
            Some(path) => {
                tracing::info!("Loading settings from: {}", path);
                Settings::from_file(path)?
            }
            None => Settings::default(),
        };
        Self::new(secrets, settings)
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        self.settings.validate()
    }
}

impl ConfigProvider for AppConfig {
    fn provider_base_url(&self) -> &str {
        &self.settings.provider.base_url
    }

    fn api_key(&self) -> &str {
        &self.secrets.api_key
    }

    fn timezone(&self) -> Tz {
        self.settings.report.timezone
    }

    fn zone_label(&self) -> &str {
        &self.settings.report.zone_label
    }

    fn min_score(&self) -> u32 {
        self.settings.report.min_score
    }
}
