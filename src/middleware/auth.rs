use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::Response,
};
use medibase_auth::{AuthError, Role, verify_token};
use tracing::{debug, error, warn};

use crate::modules::users::model::UserRecord;
use crate::state::AppState;

/// A request whose bearer token verified and whose subject resolved to a
/// directory record.
///
/// This is the only value [`crate::middleware::role::authorize`] accepts, so
/// role checks cannot run ahead of authentication. Once built it is stored in
/// the request extensions; later extractors in the same request reuse it
/// instead of hitting the directory again.
///
/// Fields are private: outside this module a value only comes from
/// [`authenticate_headers`] or the extractor.
#[derive(Debug, Clone)]
pub struct Authenticated {
    identity: UserRecord,
    token: String,
}

impl Authenticated {
    /// Builds a context without verifying anything. Test builds only.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn for_tests(identity: UserRecord, token: impl Into<String>) -> Self {
        Self {
            identity,
            token: token.into(),
        }
    }

    pub fn identity(&self) -> &UserRecord {
        &self.identity
    }

    pub fn into_identity(self) -> UserRecord {
        self.identity
    }

    /// The raw bearer token the request presented.
    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn user_id(&self) -> &str {
        &self.identity.id
    }

    pub fn role(&self) -> Role {
        self.identity.role
    }
}

/// Pulls the token out of `Authorization: Bearer <token>`.
///
/// A header without the `Bearer ` prefix is passed through whole and will
/// fail verification.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let Some(value) = headers.get(header::AUTHORIZATION) else {
        return Err(AuthError::Unauthenticated);
    };
    let value = value.to_str().map_err(|_| AuthError::InvalidCredential)?;

    let token = value.strip_prefix("Bearer ").unwrap_or(value).trim();
    if token.is_empty() {
        return Err(AuthError::Unauthenticated);
    }

    Ok(token)
}

/// Runs the full authentication sequence against the request headers.
pub async fn authenticate_headers(
    headers: &HeaderMap,
    state: &AppState,
) -> Result<Authenticated, AuthError> {
    let token = bearer_token(headers)?;
    let claims = verify_token(token, &state.jwt_config)?;
    let subject = claims.subject().ok_or(AuthError::MalformedCredential)?;
    let identity = resolve_subject(subject, state).await?;

    Ok(Authenticated {
        identity,
        token: token.to_string(),
    })
}

async fn resolve_subject(subject: &str, state: &AppState) -> Result<UserRecord, AuthError> {
    let timeout = state.directory_config.lookup_timeout;

    match tokio::time::timeout(timeout, state.directory.find_user_by_id(subject)).await {
        Ok(Ok(Some(user))) => Ok(user),
        Ok(Ok(None)) => Err(AuthError::UnknownSubject(subject.to_string())),
        Ok(Err(e)) => Err(AuthError::DirectoryUnavailable(e.to_string())),
        Err(_) => Err(AuthError::DirectoryUnavailable(format!(
            "lookup timed out after {}ms",
            timeout.as_millis()
        ))),
    }
}

pub(crate) fn log_rejection(err: &AuthError) {
    match err {
        AuthError::Unauthenticated => debug!(kind = err.kind(), "Request rejected"),
        AuthError::DirectoryUnavailable(_) => {
            error!(kind = err.kind(), error = %err, "Request rejected")
        }
        _ => warn!(kind = err.kind(), error = %err, "Request rejected"),
    }
}

impl FromRequestParts<AppState> for Authenticated {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(existing) = parts.extensions.get::<Authenticated>() {
            return Ok(existing.clone());
        }

        let authenticated = authenticate_headers(&parts.headers, state)
            .await
            .inspect_err(log_rejection)?;

        debug!(
            user_id = %authenticated.user_id(),
            role = %authenticated.role(),
            "Request authenticated"
        );
        parts.extensions.insert(authenticated.clone());

        Ok(authenticated)
    }
}

/// Layer form of authentication, for `axum::middleware::from_fn_with_state`.
///
/// Rejects before the inner service runs; on success the [`Authenticated`]
/// context is available to every downstream extractor.
pub async fn authenticate(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let (mut parts, body) = req.into_parts();
    Authenticated::from_request_parts(&mut parts, &state).await?;

    Ok(next.run(Request::from_parts(parts, body)).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use axum::http::HeaderValue;
    use medibase_auth::{Claims, create_access_token, create_legacy_token, sign_claims};
    use medibase_config::JwtConfig;

    use crate::modules::users::directory::{DirectoryError, InMemoryDirectory, UserDirectory};

    fn jwt_config() -> JwtConfig {
        JwtConfig {
            secret: "unit-test-secret".to_string(),
            access_token_expiry: 3600,
        }
    }

    fn state_with(directory: Arc<dyn UserDirectory>) -> AppState {
        AppState::new(directory, jwt_config())
    }

    fn seeded_state() -> AppState {
        state_with(Arc::new(InMemoryDirectory::with_users([UserRecord::new(
            "u1",
            "Dr. Ada",
            Role::Doctor,
        )])))
    }

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    struct FailingDirectory;

    #[async_trait]
    impl UserDirectory for FailingDirectory {
        async fn find_user_by_id(&self, _id: &str) -> Result<Option<UserRecord>, DirectoryError> {
            Err(DirectoryError::Backend("connection refused".to_string()))
        }
    }

    struct StalledDirectory;

    #[async_trait]
    impl UserDirectory for StalledDirectory {
        async fn find_user_by_id(&self, _id: &str) -> Result<Option<UserRecord>, DirectoryError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(None)
        }
    }

    #[test]
    fn test_bearer_token_extraction() {
        assert_eq!(bearer_token(&headers_with("Bearer abc.def.ghi")), Ok("abc.def.ghi"));
        assert_eq!(bearer_token(&headers_with("abc.def.ghi")), Ok("abc.def.ghi"));
    }

    #[test]
    fn test_bearer_token_missing_or_empty() {
        assert_eq!(bearer_token(&HeaderMap::new()), Err(AuthError::Unauthenticated));
        assert_eq!(bearer_token(&headers_with("")), Err(AuthError::Unauthenticated));
        assert_eq!(bearer_token(&headers_with("Bearer ")), Err(AuthError::Unauthenticated));
    }

    #[tokio::test]
    async fn test_authenticate_success_attaches_identity_and_token() {
        let state = seeded_state();
        let token = create_access_token("u1", &state.jwt_config).unwrap();

        let auth = authenticate_headers(&headers_with(&format!("Bearer {}", token)), &state)
            .await
            .unwrap();

        assert_eq!(auth.user_id(), "u1");
        assert_eq!(auth.role(), Role::Doctor);
        assert_eq!(auth.token(), token);
        assert_eq!(auth.identity().name, "Dr. Ada");
    }

    #[tokio::test]
    async fn test_authenticate_accepts_legacy_claim() {
        let state = seeded_state();
        let token = create_legacy_token("u1", &state.jwt_config).unwrap();

        let auth = authenticate_headers(&headers_with(&format!("Bearer {}", token)), &state)
            .await
            .unwrap();
        assert_eq!(auth.user_id(), "u1");
    }

    #[tokio::test]
    async fn test_forged_token_is_not_trusted_without_attached_context() {
        let state = seeded_state();
        let (mut parts, _) = axum::http::Request::builder()
            .uri("/")
            .header(header::AUTHORIZATION, "Bearer forged.token.value")
            .body(())
            .unwrap()
            .into_parts();

        let err = Authenticated::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert_eq!(err, AuthError::InvalidCredential);
        assert!(parts.extensions.get::<Authenticated>().is_none());
    }

    #[tokio::test]
    async fn test_authenticate_without_subject_is_malformed() {
        let state = seeded_state();
        let now = chrono::Utc::now().timestamp() as usize;
        let token = sign_claims(
            &Claims {
                exp: now + 600,
                iat: now,
                ..Default::default()
            },
            &state.jwt_config,
        )
        .unwrap();

        let result = authenticate_headers(&headers_with(&format!("Bearer {}", token)), &state).await;
        assert_eq!(result.unwrap_err(), AuthError::MalformedCredential);
    }

    #[tokio::test]
    async fn test_authenticate_unknown_subject() {
        let state = seeded_state();
        let token = create_access_token("ghost", &state.jwt_config).unwrap();

        let result = authenticate_headers(&headers_with(&format!("Bearer {}", token)), &state).await;
        assert_eq!(
            result.unwrap_err(),
            AuthError::UnknownSubject("ghost".to_string())
        );
    }

    #[tokio::test]
    async fn test_directory_fault_maps_to_unavailable() {
        let state = state_with(Arc::new(FailingDirectory));
        let token = create_access_token("u1", &state.jwt_config).unwrap();

        let err = authenticate_headers(&headers_with(&format!("Bearer {}", token)), &state)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::DirectoryUnavailable(_)));
        assert_eq!(err.status(), axum::http::StatusCode::UNAUTHORIZED);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stalled_directory_times_out() {
        let mut state = state_with(Arc::new(StalledDirectory));
        state.directory_config.lookup_timeout = Duration::from_millis(50);
        let token = create_access_token("u1", &state.jwt_config).unwrap();

        let err = authenticate_headers(&headers_with(&format!("Bearer {}", token)), &state)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            AuthError::DirectoryUnavailable("lookup timed out after 50ms".to_string())
        );
    }

    #[tokio::test]
    async fn test_extractor_reuses_attached_context() {
        let state = state_with(Arc::new(FailingDirectory));
        let (mut parts, _) = axum::http::Request::builder()
            .uri("/")
            .body(())
            .unwrap()
            .into_parts();
        parts.extensions.insert(Authenticated::for_tests(
            UserRecord::new("u1", "Dr. Ada", Role::Doctor),
            "already-verified",
        ));

        let auth = Authenticated::from_request_parts(&mut parts, &state).await.unwrap();
        assert_eq!(auth.token(), "already-verified");
    }
}
