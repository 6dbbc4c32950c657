//! In-memory gateway used as a test double
//!
//! Keeps the same observable behavior as [`super::postgres::PgStore`]
//! (insert-if-absent users, unconditional media inserts, insertion-ordered
//! listings) without requiring a running PostgreSQL server.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use super::gateway::{MediaRecord, MediaType, NewUser, Storage};
use crate::core::error::AppResult;

struct StoredUser {
    username: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    phone_number: String,
}

#[derive(Default)]
pub struct MemoryStore {
    users: Mutex<HashMap<i64, StoredUser>>,
    medias: Mutex<Vec<(i64, MediaRecord)>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered users (assertion helper).
    pub fn user_count(&self) -> usize {
        self.lock_users().len()
    }

    /// Number of stored media rows across all users (assertion helper).
    pub fn media_count(&self) -> usize {
        self.lock_medias().len()
    }

    /// Stored phone number for a user, if registered (assertion helper).
    pub fn phone_number(&self, user_id: i64) -> Option<String> {
        self.lock_users().get(&user_id).map(|u| u.phone_number.clone())
    }

    // Recover from a poisoned lock: the store holds plain data, so a panic
    // in another test thread cannot leave it in a half-written state.
    fn lock_users(&self) -> std::sync::MutexGuard<'_, HashMap<i64, StoredUser>> {
        self.users.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn lock_medias(&self) -> std::sync::MutexGuard<'_, Vec<(i64, MediaRecord)>> {
        self.medias.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl Storage for MemoryStore {
    async fn user_exists(&self, user_id: i64) -> AppResult<bool> {
        Ok(self.lock_users().contains_key(&user_id))
    }

    async fn insert_user(&self, user: &NewUser<'_>) -> AppResult<bool> {
        let mut users = self.lock_users();
        if users.contains_key(&user.user_id) {
            return Ok(false);
        }
        users.insert(
            user.user_id,
            StoredUser {
                username: user.username.map(str::to_owned),
                first_name: user.first_name.map(str::to_owned),
                last_name: user.last_name.map(str::to_owned),
                phone_number: user.phone_number.to_owned(),
            },
        );
        Ok(true)
    }

    async fn insert_media(&self, user_id: i64, file_id: &str, file_type: MediaType) -> AppResult<()> {
        self.lock_medias().push((
            user_id,
            MediaRecord {
                file_id: file_id.to_owned(),
                file_type: file_type.as_str().to_owned(),
                created_at: Utc::now().naive_utc(),
            },
        ));
        Ok(())
    }

    async fn media_exists(&self, user_id: i64) -> AppResult<bool> {
        Ok(self.lock_medias().iter().any(|(id, _)| *id == user_id))
    }

    async fn list_media(&self, user_id: i64) -> AppResult<Vec<MediaRecord>> {
        Ok(self
            .lock_medias()
            .iter()
            .filter(|(id, _)| *id == user_id)
            .map(|(_, record)| record.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn new_user(user_id: i64, phone_number: &str) -> NewUser<'_> {
        NewUser {
            user_id,
            username: Some("tester"),
            first_name: Some("Test"),
            last_name: None,
            phone_number,
        }
    }

    #[tokio::test]
    async fn insert_user_is_idempotent() {
        let store = MemoryStore::new();

        let created = store.insert_user(&new_user(1, "+998901234567")).await.unwrap();
        assert!(created);
        assert!(store.user_exists(1).await.unwrap());

        // A second share must not create a second row or overwrite the first
        let created_again = store.insert_user(&new_user(1, "+000000000000")).await.unwrap();
        assert!(!created_again);
        assert_eq!(store.user_count(), 1);
        assert_eq!(store.phone_number(1), Some("+998901234567".to_string()));
    }

    #[tokio::test]
    async fn media_insert_does_not_require_a_user_row() {
        let store = MemoryStore::new();

        store.insert_media(42, "file-abc", MediaType::Photo).await.unwrap();

        assert!(!store.user_exists(42).await.unwrap());
        assert!(store.media_exists(42).await.unwrap());
        assert_eq!(store.media_count(), 1);
    }

    #[tokio::test]
    async fn list_media_preserves_insertion_order_per_user() {
        let store = MemoryStore::new();

        store.insert_media(7, "first", MediaType::Photo).await.unwrap();
        store.insert_media(8, "other-user", MediaType::Video).await.unwrap();
        store.insert_media(7, "second", MediaType::Document).await.unwrap();

        let records = store.list_media(7).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].file_id, "first");
        assert_eq!(records[0].file_type, "photo");
        assert_eq!(records[1].file_id, "second");
        assert_eq!(records[1].file_type, "document");
    }

    #[tokio::test]
    async fn media_exists_is_false_for_unseen_user() {
        let store = MemoryStore::new();
        assert!(!store.media_exists(5).await.unwrap());
        assert_eq!(store.list_media(5).await.unwrap().len(), 0);
    }
}
