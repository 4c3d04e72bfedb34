use axum::Json;
use medibase_core::MessageResponse;
use tracing::instrument;

use crate::middleware::auth::Authenticated;
use crate::modules::users::model::UserRecord;

/// The directory record behind the presented token
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current user", body = UserRecord),
        (status = 401, description = "Missing or invalid token", body = MessageResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn get_me(auth: Authenticated) -> Json<UserRecord> {
    Json(auth.into_identity())
}
