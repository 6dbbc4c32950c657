//! Contact-share handler: registers the sender with their phone number

use teloxide::dispatching::{UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use teloxide::types::Message;

use super::types::{sender_id, HandlerDeps, HandlerError};
use crate::storage::NewUser;

pub(crate) const CONTACT_SAVED: &str = "Welcome, Your information has been saved.";

/// Handler for messages carrying a contact payload.
///
/// The payload may describe someone other than the sender; the stored row
/// always belongs to the *sender's* identity, and only the phone number is
/// taken from the payload. A repeated share from a known user is a silent
/// no-op.
pub(super) fn contact_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_message()
        .filter(|msg: Message| msg.contact().is_some())
        .endpoint(move |bot: Bot, msg: Message| {
            let deps = deps.clone();
            async move {
                let Some(contact) = msg.contact() else {
                    return Ok(());
                };

                let user_id = sender_id(&msg);
                let from = msg.from.as_ref();
                let user = NewUser {
                    user_id,
                    username: from.and_then(|u| u.username.as_deref()),
                    first_name: from.map(|u| u.first_name.as_str()),
                    last_name: from.and_then(|u| u.last_name.as_deref()),
                    phone_number: &contact.phone_number,
                };

                if deps.store.insert_user(&user).await? {
                    log::info!("Registered user {} via contact share", user_id);
                    bot.send_message(msg.chat.id, CONTACT_SAVED).await?;
                } else {
                    log::info!("Repeated contact share from user {}, ignoring", user_id);
                }

                Ok(())
            }
        })
}
