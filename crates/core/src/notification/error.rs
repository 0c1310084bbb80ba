use thiserror::Error;

use crate::storage::{repository_error_to_status_code, RepositoryError};

/// A single request validation failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Type is required")]
    MissingType,
    #[error("Recipient is required")]
    MissingRecipient,
    #[error("Recipient cannot exceed 255 characters")]
    RecipientTooLong,
    #[error("Subject cannot exceed 255 characters")]
    SubjectTooLong,
    #[error("Content is required")]
    MissingContent,
    #[error("Content cannot exceed 5000 characters")]
    ContentTooLong,
}

/// All validation failures found in a request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Validation failed: {}", join_messages(.0))]
pub struct ValidationErrors(pub Vec<ValidationError>);

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("{e};"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Errors returned by notification service operations.
///
/// Cache and publish failures never show up here.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("Notification not found with id: {0}")]
    NotFound(i64),
    #[error(transparent)]
    Storage(RepositoryError),
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(id) => ServiceError::NotFound(id),
            other => ServiceError::Storage(other),
        }
    }
}

impl ServiceError {
    /// Maps this error to an HTTP status code.
    pub fn status_code(&self) -> u16 {
        match self {
            ServiceError::NotFound(_) => 404,
            ServiceError::Storage(err) => repository_error_to_status_code(err),
        }
    }
}

/// Result type for notification service operations.
pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
