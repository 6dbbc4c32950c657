//! PostgreSQL-backed persistence gateway

use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};

use super::gateway::{MediaRecord, MediaType, NewUser, Storage};
use crate::core::config;
use crate::core::error::AppResult;

/// Persistence gateway backed by a PostgreSQL connection pool.
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Connects using the DB_* environment configuration and bootstraps
    /// the schema.
    ///
    /// A connection or authentication failure here is fatal: the caller is
    /// expected to abort startup, since no handler can make progress
    /// without the database.
    pub async fn connect() -> AppResult<Self> {
        let options = PgConnectOptions::new()
            .host(&config::DB_HOST)
            .database(&config::DB_NAME)
            .username(&config::DB_USER)
            .password(&config::DB_PASSWORD);

        let pool = PgPoolOptions::new()
            .max_connections(config::db::MAX_CONNECTIONS)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    /// Creates the two tables if they do not exist yet.
    ///
    /// `medias.user_id` deliberately carries no foreign key: media arriving
    /// from a sender who never completed onboarding must still be recorded.
    async fn init_schema(&self) -> AppResult<()> {
        sqlx::query(
            "create table if not exists users(
                id bigserial,
                user_id bigint primary key,
                username varchar,
                first_name varchar,
                last_name varchar,
                phone_number varchar,
                started_at timestamp default current_timestamp
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "create table if not exists medias(
                id bigserial primary key,
                user_id bigint not null,
                file_id varchar not null,
                file_type varchar not null,
                created_at timestamp default current_timestamp
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("create index if not exists idx_medias_user_id on medias(user_id)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

#[async_trait]
impl Storage for PgStore {
    async fn user_exists(&self, user_id: i64) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("select exists(select 1 from users where user_id = $1)")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn insert_user(&self, user: &NewUser<'_>) -> AppResult<bool> {
        let result = sqlx::query(
            "insert into users(user_id, username, first_name, last_name, phone_number)
             values ($1, $2, $3, $4, $5)
             on conflict (user_id) do nothing",
        )
        .bind(user.user_id)
        .bind(user.username)
        .bind(user.first_name)
        .bind(user.last_name)
        .bind(user.phone_number)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn insert_media(&self, user_id: i64, file_id: &str, file_type: MediaType) -> AppResult<()> {
        sqlx::query("insert into medias(user_id, file_id, file_type) values ($1, $2, $3)")
            .bind(user_id)
            .bind(file_id)
            .bind(file_type.as_str())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn media_exists(&self, user_id: i64) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("select exists(select 1 from medias where user_id = $1)")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn list_media(&self, user_id: i64) -> AppResult<Vec<MediaRecord>> {
        let records = sqlx::query_as::<_, MediaRecord>(
            "select file_id, file_type, created_at from medias where user_id = $1 order by id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(records)
    }
}
