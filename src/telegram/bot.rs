//! Bot initialization and command registration
//!
//! This module contains:
//! - Command enum definition
//! - Bot instance creation
//! - Command menu registration

use reqwest::ClientBuilder;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

use crate::core::config;
use crate::core::error::AppResult;

/// Bot commands enum with descriptions
#[derive(BotCommands, Clone, Debug)]
#[command(rename_rule = "lowercase", description = "These commands are supported:")]
pub enum Command {
    #[command(description = "Start the bot")]
    Start,
    #[command(description = "Displays the information about the media you have sent.")]
    Media,
}

/// Creates a Bot instance with a bounded request timeout
///
/// # Returns
/// * `Ok(Bot)` - Successfully created bot instance
/// * `Err(AppError)` - Failed to build the HTTP client
pub fn create_bot() -> AppResult<Bot> {
    let client = ClientBuilder::new().timeout(config::network::timeout()).build()?;
    Ok(Bot::with_client(config::BOT_TOKEN.clone(), client))
}

/// Sets up bot commands in the Telegram UI
///
/// # Arguments
/// * `bot` - Bot instance to configure
pub async fn setup_bot_commands(bot: &Bot) -> AppResult<()> {
    use teloxide::types::BotCommand;

    bot.set_my_commands(vec![
        BotCommand::new("start", "Start the bot"),
        BotCommand::new("media", "Displays the information about the media you have sent."),
    ])
    .await?;

    Ok(())
}
