//! Persistence gateway for the `users` and `medias` tables

pub mod gateway;
pub mod memory;
pub mod postgres;

// Re-exports for convenience
pub use gateway::{MediaRecord, MediaType, NewUser, Storage};
pub use memory::MemoryStore;
pub use postgres::PgStore;
