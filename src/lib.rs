pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::config::{AppConfig, BotSecrets, CliArgs, Settings};

pub use crate::core::{etl::DigestEngine, pipeline::FixturePipeline};
pub use crate::utils::error::{BotError, Result};
