//! Telegram command handling.
//!
//! The `/btts` command runs the fixture pipeline for the requesting chat.
//! Pipeline failures stop here: they are logged and the chat receives a
//! generic failure notice instead of a digest.

use std::sync::Arc;

use chrono::NaiveDate;
use teloxide::prelude::*;
use teloxide::types::{ParseMode, Recipient};
use teloxide::utils::command::BotCommands;
use tracing::{error, info, warn};

use crate::config::AppConfig;
use crate::core::etl::DigestEngine;
use crate::core::render::{
    render_failure, split_message, SEARCHING_MESSAGE, TELEGRAM_MESSAGE_LIMIT,
};
use crate::utils::error::Result;

#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
    #[command(description = "today's high-probability BTTS fixtures")]
    Btts,
    #[command(description = "show this help")]
    Help,
    #[command(description = "show this help")]
    Start,
}

/// Long-polls Telegram until the process is interrupted.
pub async fn run_bot(config: Arc<AppConfig>) {
    let bot = Bot::new(&config.secrets.bot_token);

    // Register commands with Telegram so they appear in the "/" menu
    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        warn!(error = %e, "Failed to register bot commands with Telegram");
    }

    info!("✅ Bot started and listening for Telegram commands");

    Command::repl(bot, move |bot: Bot, msg: Message, cmd: Command| {
        let config = Arc::clone(&config);
        async move { handle_command(bot, msg, cmd, config).await }
    })
    .await;

    info!("Bot stopped");
}

async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    config: Arc<AppConfig>,
) -> ResponseResult<()> {
    match cmd {
        Command::Help | Command::Start => {
            bot.send_message(msg.chat.id, Command::descriptions().to_string())
                .await?;
        }
        Command::Btts => {
            info!(chat_id = msg.chat.id.0, "Received /btts");
            bot.send_message(msg.chat.id, SEARCHING_MESSAGE)
                .parse_mode(ParseMode::MarkdownV2)
                .await?;

            let reply = build_reply(config, None).await;
            send_markdown(&bot, msg.chat.id, &reply).await?;
        }
    }

    Ok(())
}

/// Sends `text` as one or more `MarkdownV2` messages, split between
/// fixture blocks when it is over Telegram's length limit.
async fn send_markdown<R>(bot: &Bot, chat: R, text: &str) -> ResponseResult<()>
where
    R: Into<Recipient> + Clone,
{
    let chunks = split_message(text, TELEGRAM_MESSAGE_LIMIT);
    if chunks.len() > 1 {
        info!("Reply split into {} messages", chunks.len());
    }

    for chunk in chunks {
        bot.send_message(chat.clone(), chunk)
            .parse_mode(ParseMode::MarkdownV2)
            .await?;
    }
    Ok(())
}

/// Runs the pipeline and turns a failure into the chat failure notice.
pub async fn build_reply(config: Arc<AppConfig>, date: Option<NaiveDate>) -> String {
    let engine = match date {
        Some(date) => DigestEngine::for_date(config, date),
        None => DigestEngine::for_today(config),
    };

    match engine.run().await {
        Ok(message) => message,
        Err(e) => {
            error!(error = %e, "Failed to build BTTS digest");
            render_failure(&e.user_friendly_message())
        }
    }
}

/// Builds one digest and sends it to the configured chat.
pub async fn deliver_once(config: Arc<AppConfig>, date: Option<NaiveDate>) -> Result<()> {
    let bot = Bot::new(&config.secrets.bot_token);
    let recipient = config.secrets.chat_id.clone();

    let reply = build_reply(Arc::clone(&config), date).await;
    send_markdown(&bot, recipient.clone(), &reply).await?;

    info!(chat = ?recipient, "Digest delivered");
    Ok(())
}
