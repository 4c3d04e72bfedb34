use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use medibase::modules::users::directory::InMemoryDirectory;
use medibase::modules::users::model::UserRecord;
use medibase::router::init_router;
use medibase::state::AppState;
use medibase_auth::{Role, create_access_token};
use medibase_config::JwtConfig;
use serde_json::Value;
use tower::ServiceExt;

pub const DOCTOR_ID: &str = "u1";
pub const ADMIN_ID: &str = "u-admin";
pub const STAFF_ID: &str = "u-staff";
pub const USER_ID: &str = "u-user";

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "integration-test-secret".to_string(),
        access_token_expiry: 3600,
    }
}

pub fn seeded_directory() -> InMemoryDirectory {
    InMemoryDirectory::with_users([
        UserRecord::new(DOCTOR_ID, "Dr. Ada", Role::Doctor),
        UserRecord::new(ADMIN_ID, "Alex Admin", Role::Admin),
        UserRecord::new(STAFF_ID, "Sam Staff", Role::Staff),
        UserRecord::new(USER_ID, "Uma User", Role::User),
    ])
}

pub fn setup_test_state() -> AppState {
    AppState::new(Arc::new(seeded_directory()), test_jwt_config())
}

#[allow(dead_code)]
pub fn setup_test_app() -> Router {
    init_router(setup_test_state())
}

pub fn token_for(user_id: &str) -> String {
    create_access_token(user_id, &test_jwt_config()).unwrap()
}

#[allow(dead_code)]
pub fn id_for(role: Role) -> &'static str {
    match role {
        Role::Admin => ADMIN_ID,
        Role::Doctor => DOCTOR_ID,
        Role::Staff => STAFF_ID,
        Role::User => USER_ID,
    }
}

/// Sends one request and returns the status with the parsed JSON body
/// (`Value::Null` for an empty or non-JSON body).
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, body)
}
