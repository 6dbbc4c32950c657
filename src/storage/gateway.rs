//! Storage trait and record types shared by the database backends

use std::fmt;

use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::core::error::AppResult;

/// A user row to insert, borrowed from the incoming message.
pub struct NewUser<'a> {
    /// Telegram user id (primary key)
    pub user_id: i64,
    pub username: Option<&'a str>,
    pub first_name: Option<&'a str>,
    pub last_name: Option<&'a str>,
    /// Phone number as delivered in the contact payload, formatting included
    pub phone_number: &'a str,
}

/// Type tag of an archived attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Photo,
    Video,
    Document,
}

impl MediaType {
    pub fn as_str(self) -> &'static str {
        match self {
            MediaType::Photo => "photo",
            MediaType::Video => "video",
            MediaType::Document => "document",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One archived media row as returned by `list_media`.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MediaRecord {
    pub file_id: String,
    pub file_type: String,
    pub created_at: NaiveDateTime,
}

/// Persistence gateway handle injected into every handler.
///
/// Handlers never touch a connection directly; they receive an
/// `Arc<dyn Storage>`, which lets tests substitute [`crate::MemoryStore`]
/// for the PostgreSQL backend.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Point lookup by primary key.
    async fn user_exists(&self, user_id: i64) -> AppResult<bool>;

    /// Inserts the user if no row with that id exists yet.
    ///
    /// Returns `Ok(true)` when a row was created and `Ok(false)` when the
    /// user was already registered. The insert is a single atomic
    /// statement, so two concurrent shares from the same user cannot
    /// produce a constraint violation.
    async fn insert_user(&self, user: &NewUser<'_>) -> AppResult<bool>;

    /// Unconditional insert; `user_id` is not required to exist in `users`.
    async fn insert_media(&self, user_id: i64, file_id: &str, file_type: MediaType) -> AppResult<()>;

    /// Existence probe used before materializing the full list.
    async fn media_exists(&self, user_id: i64) -> AppResult<bool>;

    /// All media rows for the user, in insertion order.
    async fn list_media(&self, user_id: i64) -> AppResult<Vec<MediaRecord>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_type_tags() {
        assert_eq!(MediaType::Photo.as_str(), "photo");
        assert_eq!(MediaType::Video.as_str(), "video");
        assert_eq!(MediaType::Document.as_str(), "document");
    }

    #[test]
    fn media_type_display_matches_tag() {
        assert_eq!(MediaType::Video.to_string(), "video");
    }
}
