use crate::core::scoring::DEFAULT_MIN_SCORE;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_range, validate_url, Validate};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_PROVIDER_BASE_URL: &str = "https://v3.football.api-sports.io";
pub const DEFAULT_ZONE_LABEL: &str = "Colombia time";

/// Optional TOML settings. Every field has a default, so the bot runs
/// without a settings file at all.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub provider: ProviderSettings,
    #[serde(default)]
    pub report: ReportSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSettings {
    #[serde(default = "default_timezone")]
    pub timezone: Tz,
    #[serde(default = "default_zone_label")]
    pub zone_label: String,
    #[serde(default = "default_min_score")]
    pub min_score: u32,
}

fn default_base_url() -> String {
    DEFAULT_PROVIDER_BASE_URL.to_string()
}

fn default_timezone() -> Tz {
    chrono_tz::America::Bogota
}

fn default_zone_label() -> String {
    DEFAULT_ZONE_LABEL.to_string()
}

fn default_min_score() -> u32 {
    DEFAULT_MIN_SCORE
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            zone_label: default_zone_label(),
            min_score: default_min_score(),
        }
    }
}

impl Settings {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// Parses settings after replacing `${VAR}` references with environment values.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content);
        let settings: Settings = toml::from_str(&processed)?;
        Ok(settings)
    }

    /// Unknown variables are left as written.
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        use std::sync::OnceLock;

        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR.get_or_init(|| {
            Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("env var pattern is valid")
        });

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_url("provider.base_url", &self.provider.base_url)?;
        validate_non_empty_string("report.zone_label", &self.report.zone_label)?;
        validate_range("report.min_score", self.report.min_score, 0, 100)?;
        Ok(())
    }
}
