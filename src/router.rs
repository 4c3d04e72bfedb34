use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::modules::appointments::router::init_appointments_router;
use crate::modules::auth::router::init_auth_router;
use crate::modules::doctors::router::init_doctors_router;
use crate::modules::patients::router::init_patients_router;
use crate::state::AppState;
use axum::http::{HeaderValue, Method, header};
use axum::{Json, Router, middleware, routing::get};
use serde_json::{Value, json};
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

async fn banner() -> &'static str {
    "Hospital Management System API is running"
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "message": "API is healthy" }))
}

fn cors_layer(state: &AppState) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT]);

    // Browsers refuse credentials with a wildcard origin.
    if state.cors_config.allows_any_origin() {
        return layer.allow_origin(Any);
    }

    let allowed_origins: Vec<HeaderValue> = state
        .cors_config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    layer.allow_origin(allowed_origins).allow_credentials(true)
}

pub fn init_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(banner))
        .route("/health", get(health))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest(
            "/api",
            Router::new()
                .nest("/auth", init_auth_router())
                .nest("/patients", init_patients_router())
                .nest("/doctors", init_doctors_router())
                .nest("/appointments", init_appointments_router()),
        )
        .with_state(state.clone())
        .layer(cors_layer(&state))
        .layer(middleware::from_fn(logging_middleware))
}
