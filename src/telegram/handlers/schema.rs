//! Dispatcher schema and handler chain builders

use teloxide::dispatching::{UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use teloxide::types::Message;

use super::commands::{handle_media_command, handle_start_command};
use super::contact::contact_handler;
use super::media::media_handler;
use super::types::{HandlerDeps, HandlerError};
use crate::telegram::bot::Command;

/// Creates the main dispatcher schema for the Telegram bot.
///
/// This function returns a handler tree that can be used with teloxide's
/// Dispatcher. The same schema is used in production and in integration
/// tests.
///
/// Branch order encodes routing priority: commands, then contact shares,
/// then media attachments. A message can only satisfy one of those
/// categories; anything that matches none of them falls through to the
/// final branch and is dropped after a debug log entry.
pub fn schema(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    let deps_commands = deps.clone();
    let deps_contact = deps.clone();
    let deps_media = deps;

    dptree::entry()
        .branch(command_handler(deps_commands))
        .branch(contact_handler(deps_contact))
        .branch(media_handler(deps_media))
        .branch(unmatched_message_handler())
}

/// Handler for bot commands (/start, /media)
fn command_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_message().branch(dptree::entry().filter_command::<Command>().endpoint(
        move |bot: Bot, msg: Message, cmd: Command| {
            let deps = deps.clone();
            async move {
                log::info!("Received command: {:?} from chat {}", cmd, msg.chat.id);

                match cmd {
                    Command::Start => {
                        handle_start_command(&bot, &msg, &deps).await?;
                    }
                    Command::Media => {
                        handle_media_command(&bot, &msg, &deps).await?;
                    }
                }
                Ok(())
            }
        },
    ))
}

/// Messages outside the three routed categories produce no reply and no
/// persistence write.
fn unmatched_message_handler() -> UpdateHandler<HandlerError> {
    Update::filter_message().endpoint(|msg: Message| async move {
        log::debug!("Dropping unmatched message from chat {}", msg.chat.id);
        Ok(())
    })
}
