use anyhow::Result;
use dotenvy::dotenv;
use std::sync::Arc;
use teloxide::prelude::*;

use salombot::cli::{Cli, Commands};
use salombot::core::{config, init_logger};
use salombot::storage::{PgStore, Storage};
use salombot::telegram::{create_bot, schema, setup_bot_commands, HandlerDeps};

/// Main entry point for the Telegram bot
///
/// # Errors
/// Returns an error if initialization fails (logging, database, bot creation).
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    // Load environment variables from .env if present
    let _ = dotenv();

    // Initialize logger (console + file)
    init_logger(&config::LOG_FILE_PATH)?;

    match cli.command {
        Some(Commands::Run) | None => run_bot().await,
    }
}

/// Run the Telegram bot
async fn run_bot() -> Result<()> {
    log::info!("Starting bot...");

    // Without the database the bot cannot serve a single update, so a
    // connection or authentication failure aborts startup.
    let store: Arc<dyn Storage> = Arc::new(PgStore::connect().await?);
    log::info!("Connected to PostgreSQL at {}", config::DB_HOST.as_str());

    let bot = create_bot()?;
    setup_bot_commands(&bot).await?;
    log::info!("Bot commands registered");

    let handler = schema(HandlerDeps::new(store));

    log::info!("Starting bot in long polling mode");
    Dispatcher::builder(bot, handler)
        .dependencies(DependencyMap::new())
        .default_handler(|upd| async move {
            log::debug!("Unhandled update: {:?}", upd);
        })
        .error_handler(LoggingErrorHandler::with_custom_text("An error from the update handler"))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    log::info!("Dispatcher shutdown gracefully");
    Ok(())
}
