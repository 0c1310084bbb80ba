//! SQLite storage backend implementation.
//!
//! Uses `rusqlite` for synchronous operations and `tokio-rusqlite` to run them
//! on a dedicated thread.

mod conversions;
mod error;
mod repository;
mod schema;

pub use repository::SqliteRepository;
