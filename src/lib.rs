//! Salombot - Telegram bot that greets new users, collects their contact
//! information, and archives the media files they send.
//!
//! # Module Structure
//!
//! - `core`: configuration, errors, and logging
//! - `storage`: persistence gateway over the `users` and `medias` tables
//! - `telegram`: bot integration and update handlers

pub mod cli;
pub mod core;
pub mod storage;
pub mod telegram;

// Re-export commonly used types for convenience
pub use crate::core::{config, AppError};
pub use crate::storage::{MemoryStore, PgStore, Storage};
pub use crate::telegram::{create_bot, schema, setup_bot_commands, HandlerDeps};
