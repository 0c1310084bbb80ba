use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use notifyd_core::notification::{ServiceError, ValidationErrors};
use notifyd_core::storage::{repository_error_to_status_code, RepositoryError};

/// Message returned for failures whose details stay in the logs.
const SERVER_ERROR_MESSAGE: &str = "Server Error";

/// A malformed request rejected before reaching the service.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct BadRequest(pub String);

/// JSON body of every error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub timestamp: DateTime<Utc>,
    pub status: u16,
    pub message: String,
}

pub struct AppError(pub anyhow::Error);

impl AppError {
    fn status_and_message(&self) -> (StatusCode, String) {
        if let Some(err) = self.0.downcast_ref::<BadRequest>() {
            return (StatusCode::BAD_REQUEST, err.to_string());
        }
        if let Some(err) = self.0.downcast_ref::<ValidationErrors>() {
            return (StatusCode::BAD_REQUEST, err.to_string());
        }

        let code = if let Some(err) = self.0.downcast_ref::<ServiceError>() {
            err.status_code()
        } else if let Some(err) = self.0.downcast_ref::<RepositoryError>() {
            repository_error_to_status_code(err)
        } else {
            500
        };

        match StatusCode::from_u16(code) {
            Ok(StatusCode::NOT_FOUND) => (StatusCode::NOT_FOUND, self.0.to_string()),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                SERVER_ERROR_MESSAGE.to_string(),
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        if status.is_server_error() {
            tracing::error!(error = %self.0, "Request failed");
        } else {
            tracing::debug!(status = status.as_u16(), message = %message, "Request rejected");
        }

        let body = ErrorResponse {
            timestamp: Utc::now(),
            status: status.as_u16(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
