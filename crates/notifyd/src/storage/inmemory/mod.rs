//! In-memory storage backend.
//!
//! Keeps every notification in a HashMap behind `Arc<RwLock<_>>`. Data is lost
//! when the process exits, which makes it the default for development and the
//! backend used by the service and router tests.

mod repository;

pub use repository::InMemoryRepository;
