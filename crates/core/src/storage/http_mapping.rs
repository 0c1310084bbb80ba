//! Pure functions for mapping repository errors to HTTP status codes.

use super::RepositoryError;

/// Maps a [`RepositoryError`] to an HTTP status code.
///
/// Only a missing record is the caller's concern. Everything else is a store
/// failure and maps to 500; the detail stays in the logs.
///
/// # Examples
///
/// ```
/// use notifyd_core::storage::{repository_error_to_status_code, RepositoryError};
///
/// assert_eq!(repository_error_to_status_code(&RepositoryError::NotFound(1)), 404);
/// assert_eq!(
///     repository_error_to_status_code(&RepositoryError::QueryFailed("x".into())),
///     500
/// );
/// ```
pub fn repository_error_to_status_code(error: &RepositoryError) -> u16 {
    match error {
        RepositoryError::NotFound(_) => 404,
        RepositoryError::ConnectionFailed(_)
        | RepositoryError::QueryFailed(_)
        | RepositoryError::Serialization(_)
        | RepositoryError::InvalidData(_) => 500,
    }
}
