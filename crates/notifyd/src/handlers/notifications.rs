//! Notification CRUD handlers.
//!
//! Requests are validated here; the service only sees well-formed input.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

use notifyd_core::notification::{
    CreateNotificationRequest, Notification, RecentNotification, UpdateNotificationRequest,
};

use crate::{
    handlers::{AppError, BadRequest},
    state::AppState,
};

const INVALID_TYPE_MESSAGE: &str = "Invalid notification type. Valid types are: EMAIL, SMS";
const INVALID_INPUT_MESSAGE: &str = "Invalid input";

/// Returns true if deserialization failed on the `type` field.
///
/// Data errors read `<context>: <field path>: <serde message>`.
fn is_type_field_error(rejection: &JsonRejection) -> bool {
    let JsonRejection::JsonDataError(err) = rejection else {
        return false;
    };
    let detail = err.body_text();
    detail.contains("unknown variant") || detail.split(": ").nth(1) == Some("type")
}

/// Turns a JSON extraction failure into a client error.
fn body_error(rejection: JsonRejection) -> AppError {
    tracing::debug!(error = %rejection.body_text(), "Rejected request body");

    if is_type_field_error(&rejection) {
        BadRequest(INVALID_TYPE_MESSAGE.to_string()).into()
    } else {
        BadRequest(INVALID_INPUT_MESSAGE.to_string()).into()
    }
}

/// Parses the `{id}` path segment.
fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.parse().map_err(|_| {
        BadRequest(format!(
            "Invalid value '{raw}' for parameter 'id'. Expected type: integer"
        ))
        .into()
    })
}

/// Create a new notification (POST /api/notifications).
pub async fn create_notification(
    State(state): State<AppState>,
    payload: Result<Json<CreateNotificationRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Notification>), AppError> {
    let Json(request) = payload.map_err(body_error)?;
    let new = request.into_new_notification()?;

    let notification = state.notifications.create(new).await?;

    Ok((StatusCode::CREATED, Json(notification)))
}

/// Get a single notification by id (GET /api/notifications/{id}).
pub async fn get_notification(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Notification>, AppError> {
    let id = parse_id(&id)?;
    let notification = state.notifications.get_by_id(id).await?;
    Ok(Json(notification))
}

/// List the most recent notifications (GET /api/notifications/recent).
pub async fn recent_notifications(State(state): State<AppState>) -> Json<Vec<RecentNotification>> {
    Json(state.notifications.get_recent().await)
}

/// Update subject and/or content (PUT /api/notifications/{id}).
pub async fn update_notification(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateNotificationRequest>, JsonRejection>,
) -> Result<Json<Notification>, AppError> {
    let id = parse_id(&id)?;
    let Json(request) = payload.map_err(body_error)?;
    request.validate()?;

    let notification = state.notifications.update(id, &request).await?;

    Ok(Json(notification))
}

/// Delete a notification (DELETE /api/notifications/{id}).
pub async fn delete_notification(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id)?;
    state.notifications.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
