use thiserror::Error;

/// Centralized error types for the application
///
/// Uses `thiserror` for automatic error conversion and display formatting.
#[derive(Error, Debug)]
pub enum AppError {
    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Telegram API errors
    #[error("Telegram error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    /// HTTP client errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Logger initialization errors
    #[error("Logging error: {0}")]
    Logging(#[from] log::SetLoggerError),
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;
