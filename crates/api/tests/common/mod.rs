#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use okr_api::auth::jwt::JwtConfig;
use okr_api::config::{ConversationConfig, ServerConfig};
use okr_api::router::build_app_router;
use okr_api::state::AppState;
use okr_core::conversation::{ConversationEngine, ConversationError};

pub const TEST_JWT_SECRET: &str = "test-secret-do-not-use-in-production";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        static_dir: None,
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            expiry_mins: 60,
        },
        conversation: ConversationConfig {
            program: "true".to_string(),
            script: String::new(),
            timeout: Duration::from_secs(5),
        },
    }
}

/// Conversation engine that answers from memory instead of spawning a process.
pub struct StubConversation {
    pub reply: Result<String, String>,
}

#[async_trait]
impl ConversationEngine for StubConversation {
    async fn reply(&self, input: &str) -> Result<String, ConversationError> {
        match &self.reply {
            Ok(prefix) => Ok(format!("{prefix}{input}")),
            Err(stderr) => Err(ConversationError::ExecutionFailed {
                exit_code: 1,
                stderr: stderr.clone(),
            }),
        }
    }
}

/// Build the full application router (same middleware stack as `main.rs`)
/// backed by the given pool and an echoing conversation stub.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, StubConversation {
        reply: Ok("echo: ".to_string()),
    })
}

pub fn build_test_app_with(pool: PgPool, conversation: StubConversation) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        conversation: Arc::new(conversation),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request should build");

    app.oneshot(request).await.expect("router is infallible")
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Register a user through the API and return the issued token.
pub async fn register(app: Router, email: &str, password: &str) -> String {
    let body = serde_json::json!({ "email": email, "password": password });
    let response = post_json(app, "/api/users/register", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    json["token"]
        .as_str()
        .expect("register should return a token")
        .to_string()
}

/// Create an objective through the API and return its JSON.
pub async fn create_objective(app: Router, token: &str, body: serde_json::Value) -> serde_json::Value {
    let response = post_json_auth(app, "/api/objectives", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}
