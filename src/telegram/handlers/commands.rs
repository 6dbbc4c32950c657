//! Command handler implementations (/start, /media)

use teloxide::prelude::*;
use teloxide::types::{ButtonRequest, InputFile, KeyboardButton, KeyboardMarkup, Message, ParseMode};
use teloxide::utils::html;
use url::Url;

use super::types::{sender_full_name, sender_id, HandlerDeps, HandlerError};
use crate::core::config;
use crate::storage::MediaRecord;

pub(crate) const SHARE_CONTACT_PROMPT: &str = "You should share your contact";
pub(crate) const NO_MEDIA: &str = "You haven't sent any media to the bot.";

/// Handle /start command
///
/// Unknown senders get a greeting plus a contact-request prompt; known
/// senders get the welcome-back picture and text. No writes either way.
pub(super) async fn handle_start_command(bot: &Bot, msg: &Message, deps: &HandlerDeps) -> Result<(), HandlerError> {
    let user_id = sender_id(msg);
    let full_name = sender_full_name(msg);

    if deps.store.user_exists(user_id).await? {
        let photo = Url::parse(config::WELCOME_BACK_PHOTO_URL)?;
        bot.send_photo(msg.chat.id, InputFile::url(photo)).await?;
        bot.send_message(msg.chat.id, format!("Welcome back, {}", html::bold(&full_name)))
            .parse_mode(ParseMode::Html)
            .await?;
    } else {
        bot.send_message(msg.chat.id, format!("Assalomu alaykum, {}!", html::bold(&full_name)))
            .parse_mode(ParseMode::Html)
            .await?;
        bot.send_message(msg.chat.id, SHARE_CONTACT_PROMPT)
            .reply_markup(contact_keyboard())
            .await?;
    }

    Ok(())
}

/// One-button reply keyboard requesting the platform's native
/// contact-share action.
pub(crate) fn contact_keyboard() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![vec![
        KeyboardButton::new("Share contact").request(ButtonRequest::Contact)
    ]])
    .resize_keyboard()
}

/// Handle /media command
pub(super) async fn handle_media_command(bot: &Bot, msg: &Message, deps: &HandlerDeps) -> Result<(), HandlerError> {
    let user_id = sender_id(msg);

    if !deps.store.media_exists(user_id).await? {
        bot.send_message(msg.chat.id, NO_MEDIA).await?;
        return Ok(());
    }

    let records = deps.store.list_media(user_id).await?;
    bot.send_message(msg.chat.id, format_media_list(&records)).await?;

    Ok(())
}

/// Builds the single /media reply.
///
/// Telegram rejects messages over 4096 characters, so the listing is
/// capped and a trailing line reports how many rows were left out.
pub(crate) fn format_media_list(records: &[MediaRecord]) -> String {
    let mut response = String::from("Here are the media files you have sent:\n");
    for record in records.iter().take(config::listing::MAX_ROWS) {
        response.push_str(&format!(
            " File id: {}\n File type: {}\n Sent at: {}\n\n",
            record.file_id, record.file_type, record.created_at
        ));
    }
    if records.len() > config::listing::MAX_ROWS {
        response.push_str(&format!(
            "… and {} more not shown.",
            records.len() - config::listing::MAX_ROWS
        ));
    }
    response
}
