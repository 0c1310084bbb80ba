use thiserror::Error;

/// Errors raised by cache backends.
///
/// These never reach HTTP callers: the notification cache adapters log them
/// and degrade to a miss or a no-op.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CacheError {
    #[error("Cache connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Cache operation failed: {0}")]
    OperationFailed(String),
    /// A list operation hit a key holding a plain value, or the reverse.
    #[error("Wrong value type for key: {0}")]
    WrongType(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Publish failed: {0}")]
    PublishFailed(String),
}

/// Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;
