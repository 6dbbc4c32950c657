//! Handler types, dependencies, and sender helpers

use std::sync::Arc;

use teloxide::types::Message;

use crate::storage::Storage;

/// Error type for handlers
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Dependencies required by handlers
#[derive(Clone)]
pub struct HandlerDeps {
    pub store: Arc<dyn Storage>,
}

impl HandlerDeps {
    /// Create new handler dependencies
    pub fn new(store: Arc<dyn Storage>) -> Self {
        Self { store }
    }
}

/// Telegram id of the message sender.
///
/// Falls back to the chat id, which equals the sender id in the private
/// chats this bot operates in.
pub(super) fn sender_id(msg: &Message) -> i64 {
    msg.from
        .as_ref()
        .and_then(|u| i64::try_from(u.id.0).ok())
        .unwrap_or(msg.chat.id.0)
}

/// Display name of the message sender.
pub(super) fn sender_full_name(msg: &Message) -> String {
    msg.from.as_ref().map(|u| u.full_name()).unwrap_or_default()
}
