use once_cell::sync::Lazy;
use std::env;
use std::time::Duration;

/// Configuration constants for the bot
///
/// Bot token
/// Read from BOT_TOKEN or TELOXIDE_TOKEN environment variable
pub static BOT_TOKEN: Lazy<String> = Lazy::new(|| {
    env::var("BOT_TOKEN")
        .or_else(|_| env::var("TELOXIDE_TOKEN"))
        .unwrap_or_else(|_| String::new())
});

/// Database name
/// Read from DB_NAME environment variable
pub static DB_NAME: Lazy<String> = Lazy::new(|| env::var("DB_NAME").unwrap_or_else(|_| String::new()));

/// Database role
/// Read from DB_USER environment variable, falling back to USERNAME
pub static DB_USER: Lazy<String> = Lazy::new(|| {
    env::var("DB_USER")
        .or_else(|_| env::var("USERNAME"))
        .unwrap_or_else(|_| String::new())
});

/// Database password
/// Read from DB_PASSWORD environment variable, falling back to PASSWORD
pub static DB_PASSWORD: Lazy<String> = Lazy::new(|| {
    env::var("DB_PASSWORD")
        .or_else(|_| env::var("PASSWORD"))
        .unwrap_or_else(|_| String::new())
});

/// Database host
/// Read from DB_HOST environment variable, falling back to HOST
/// Default: localhost
pub static DB_HOST: Lazy<String> = Lazy::new(|| {
    env::var("DB_HOST")
        .or_else(|_| env::var("HOST"))
        .unwrap_or_else(|_| "localhost".to_string())
});

/// Log file path
/// Read from LOG_FILE_PATH environment variable
/// Default: salombot.log
pub static LOG_FILE_PATH: Lazy<String> =
    Lazy::new(|| env::var("LOG_FILE_PATH").unwrap_or_else(|_| "salombot.log".to_string()));

/// Static picture sent to returning users on /start
pub const WELCOME_BACK_PHOTO_URL: &str = "https://telegra.ph/file/0c49ea8828ec8036fea54.png";

/// Database pool configuration
pub mod db {
    /// Maximum number of connections in the pool
    pub const MAX_CONNECTIONS: u32 = 5;
}

/// Media listing configuration
pub mod listing {
    /// Maximum number of records rendered into a single /media reply.
    /// Telegram rejects messages over 4096 characters; one record block is
    /// roughly 120 characters, so 25 keeps the reply well under the limit.
    pub const MAX_ROWS: usize = 25;
}

/// Network configuration
pub mod network {
    use super::Duration;

    /// Request timeout for Bot API HTTP requests (in seconds)
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;

    /// Request timeout duration
    pub fn timeout() -> Duration {
        Duration::from_secs(REQUEST_TIMEOUT_SECS)
    }
}
