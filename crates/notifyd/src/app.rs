use std::time::Duration;

use axum::{
    http::{header, Method, StatusCode},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{
        create_notification, delete_notification, get_notification, livez, recent_notifications,
        update_notification,
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    // CORS configuration for API endpoints
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    let api_routes = Router::new()
        .route("/notifications", post(create_notification))
        .route("/notifications/recent", get(recent_notifications))
        .route(
            "/notifications/{id}",
            get(get_notification)
                .put(update_notification)
                .delete(delete_notification),
        )
        .layer(cors);

    Router::new()
        .route("/livez", get(livez))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(10),
        ))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        response::Response,
    };
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(value) => {
                builder = builder.header("Content-Type", "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };

        app.clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    fn email(subject: &str) -> Value {
        json!({
            "type": "EMAIL",
            "recipient": "a@b.com",
            "subject": subject,
            "content": "C"
        })
    }

    #[tokio::test]
    async fn test_livez() {
        let app = create_app(AppState::default());

        let response = send(&app, "GET", "/livez", None).await;

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_recent_empty() {
        let app = create_app(AppState::default());

        let response = send(&app, "GET", "/api/notifications/recent", None).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!([]));
    }

    #[tokio::test]
    async fn test_notification_lifecycle() {
        let app = create_app(AppState::default());

        // Create
        let response = send(&app, "POST", "/api/notifications", Some(email("S"))).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = json_body(response).await;
        let id = created["id"].as_i64().unwrap();
        assert_eq!(created["type"], "EMAIL");
        assert_eq!(created["subject"], "S");
        assert_eq!(created["createdAt"], created["updatedAt"]);

        // Get
        let response = send(&app, "GET", &format!("/api/notifications/{id}"), None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["content"], "C");

        // Recent
        let response = send(&app, "GET", "/api/notifications/recent", None).await;
        let recent = json_body(response).await;
        assert_eq!(recent.as_array().unwrap().len(), 1);
        assert_eq!(recent[0]["id"], id);
        assert!(recent[0].get("content").is_none());

        // Update
        let response = send(
            &app,
            "PUT",
            &format!("/api/notifications/{id}"),
            Some(json!({ "subject": "S2" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let updated = json_body(response).await;
        assert_eq!(updated["subject"], "S2");
        assert_eq!(updated["content"], "C");

        let response = send(&app, "GET", "/api/notifications/recent", None).await;
        assert_eq!(json_body(response).await[0]["subject"], "S2");

        // Delete
        let response = send(&app, "DELETE", &format!("/api/notifications/{id}"), None).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = send(&app, "GET", &format!("/api/notifications/{id}"), None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = json_body(response).await;
        assert_eq!(body["status"], 404);
        assert_eq!(
            body["message"],
            format!("Notification not found with id: {id}")
        );
        assert!(body["timestamp"].is_string());

        let response = send(&app, "GET", "/api/notifications/recent", None).await;
        assert_eq!(json_body(response).await, json!([]));
    }

    #[tokio::test]
    async fn test_create_validation_failure() {
        let app = create_app(AppState::default());

        let response = send(
            &app,
            "POST",
            "/api/notifications",
            Some(json!({ "type": "SMS", "recipient": " " })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["status"], 400);
        assert_eq!(
            body["message"],
            "Validation failed: Recipient is required; Content is required;"
        );
    }

    #[tokio::test]
    async fn test_create_unknown_type() {
        let app = create_app(AppState::default());

        let response = send(
            &app,
            "POST",
            "/api/notifications",
            Some(json!({ "type": "FAX", "recipient": "x", "content": "y" })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await["message"],
            "Invalid notification type. Valid types are: EMAIL, SMS"
        );
    }

    #[tokio::test]
    async fn test_create_non_string_type() {
        let app = create_app(AppState::default());

        for kind in [json!(5), json!(true), json!(["EMAIL"])] {
            let response = send(
                &app,
                "POST",
                "/api/notifications",
                Some(json!({ "type": kind, "recipient": "x", "content": "y" })),
            )
            .await;

            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert_eq!(
                json_body(response).await["message"],
                "Invalid notification type. Valid types are: EMAIL, SMS"
            );
        }
    }

    #[tokio::test]
    async fn test_create_wrong_field_type_is_invalid_input() {
        let app = create_app(AppState::default());

        let response = send(
            &app,
            "POST",
            "/api/notifications",
            Some(json!({ "type": "EMAIL", "recipient": 5, "content": "y" })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["message"], "Invalid input");
    }

    #[tokio::test]
    async fn test_create_malformed_json() {
        let app = create_app(AppState::default());

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/notifications")
                    .header("Content-Type", "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["message"], "Invalid input");
    }

    #[tokio::test]
    async fn test_non_integer_id() {
        let app = create_app(AppState::default());

        let response = send(&app, "GET", "/api/notifications/abc", None).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await["message"],
            "Invalid value 'abc' for parameter 'id'. Expected type: integer"
        );
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let app = create_app(AppState::default());

        let response = send(
            &app,
            "PUT",
            "/api/notifications/999",
            Some(json!({ "content": "x" })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_update_too_long_subject() {
        let app = create_app(AppState::default());
        let response = send(&app, "POST", "/api/notifications", Some(email("S"))).await;
        let id = json_body(response).await["id"].as_i64().unwrap();

        let response = send(
            &app,
            "PUT",
            &format!("/api/notifications/{id}"),
            Some(json!({ "subject": "s".repeat(256) })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await["message"],
            "Validation failed: Subject cannot exceed 255 characters;"
        );
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let app = create_app(AppState::default());

        let response = send(&app, "DELETE", "/api/notifications/42", None).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_recent_is_capped_and_newest_first() {
        let app = create_app(AppState::default());

        for i in 0..12 {
            let response = send(
                &app,
                "POST",
                "/api/notifications",
                Some(email(&format!("S{i}"))),
            )
            .await;
            assert_eq!(response.status(), StatusCode::CREATED);
        }

        let response = send(&app, "GET", "/api/notifications/recent", None).await;
        let recent = json_body(response).await;
        let subjects: Vec<&str> = recent
            .as_array()
            .unwrap()
            .iter()
            .map(|n| n["subject"].as_str().unwrap())
            .collect();

        assert_eq!(subjects.len(), 10);
        assert_eq!(subjects[0], "S11");
        assert_eq!(subjects[9], "S2");
    }
}
