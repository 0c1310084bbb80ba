//! Pure functions for serializing/deserializing notifications to/from cache bytes.
//!
//! Values are stored as JSON so cached entries stay readable from `redis-cli`.

use thiserror::Error;

use crate::notification::{Notification, RecentNotification};

use super::CacheError;

/// Errors that can occur during cache serialization/deserialization.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SerializationError {
    /// Failed to serialize a value to bytes.
    #[error("Failed to serialize: {0}")]
    SerializeFailed(String),
    /// Failed to deserialize bytes to a value.
    #[error("Failed to deserialize: {0}")]
    DeserializeFailed(String),
}

impl From<SerializationError> for CacheError {
    fn from(err: SerializationError) -> Self {
        CacheError::Serialization(err.to_string())
    }
}

/// Result type for serialization operations.
pub type Result<T> = std::result::Result<T, SerializationError>;

/// Serializes a full notification record to JSON bytes.
pub fn serialize_notification(notification: &Notification) -> Result<Vec<u8>> {
    serde_json::to_vec(notification).map_err(|e| SerializationError::SerializeFailed(e.to_string()))
}

/// Deserializes JSON bytes to a full notification record.
pub fn deserialize_notification(bytes: &[u8]) -> Result<Notification> {
    serde_json::from_slice(bytes).map_err(|e| SerializationError::DeserializeFailed(e.to_string()))
}

/// Serializes a recent list entry to JSON bytes.
pub fn serialize_summary(summary: &RecentNotification) -> Result<Vec<u8>> {
    serde_json::to_vec(summary).map_err(|e| SerializationError::SerializeFailed(e.to_string()))
}

/// Deserializes a recent list entry.
pub fn deserialize_summary(bytes: &[u8]) -> Result<RecentNotification> {
    serde_json::from_slice(bytes).map_err(|e| SerializationError::DeserializeFailed(e.to_string()))
}
