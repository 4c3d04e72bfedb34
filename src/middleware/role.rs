//! Role-based authorization for Axum.
//!
//! Everything here funnels into [`authorize`], which needs an
//! [`Authenticated`] context. Two ways to use it:
//! 1. Extractor-based, per handler: [`RequireRole`] parameterized by a [`Gate`]
//! 2. Layer-based, per router: [`require_roles`] and the preset wrappers

use std::marker::PhantomData;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use medibase_auth::{AdminOnly, AuthError, DoctorOrAdmin, Gate, RoleSet, StaffTier};

use crate::middleware::auth::{Authenticated, log_rejection};
use crate::state::AppState;

/// Admits the caller iff their role is in `allowed`.
pub fn authorize(auth: &Authenticated, allowed: RoleSet) -> Result<(), AuthError> {
    if allowed.contains(auth.role()) {
        Ok(())
    } else {
        Err(AuthError::Forbidden {
            role: auth.role(),
            allowed,
        })
    }
}

/// Extractor that authenticates the request and then checks it against `G`.
///
/// # Example
///
/// ```rust,ignore
/// use crate::middleware::role::RequireRole;
/// use medibase_auth::AdminOnly;
///
/// pub async fn delete_patient(RequireRole(auth, _): RequireRole<AdminOnly>) -> impl IntoResponse {
///     // Only administrators get here
/// }
/// ```
pub struct RequireRole<G: Gate>(pub Authenticated, pub PhantomData<G>);

impl<G: Gate> FromRequestParts<AppState> for RequireRole<G> {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth = Authenticated::from_request_parts(parts, state).await?;
        authorize(&auth, G::ROLES).inspect_err(|err| {
            tracing::warn!(
                kind = err.kind(),
                gate = G::NAME,
                user_id = %auth.user_id(),
                role = %auth.role(),
                "Request rejected"
            );
        })?;

        Ok(RequireRole(auth, PhantomData))
    }
}

/// Middleware that authenticates and then admits only `allowed` roles.
///
/// # Usage with axum::middleware::from_fn_with_state
///
/// ```rust,ignore
/// let protected_routes = Router::new()
///     .route("/reports", get(reports_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), |state, req, next| {
///         require_roles(state, req, next, RoleSet::STAFF_TIER)
///     }));
/// ```
pub async fn require_roles(
    State(state): State<AppState>,
    req: Request,
    next: Next,
    allowed: RoleSet,
) -> Result<Response, AuthError> {
    let (mut parts, body) = req.into_parts();

    let auth = Authenticated::from_request_parts(&mut parts, &state).await?;
    authorize(&auth, allowed).inspect_err(log_rejection)?;

    Ok(next.run(Request::from_parts(parts, body)).await)
}

/// Admin-only routes.
pub async fn require_admin(
    state: State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    require_roles(state, req, next, AdminOnly::ROLES).await
}

/// Doctor-or-admin routes.
pub async fn require_doctor(
    state: State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    require_roles(state, req, next, DoctorOrAdmin::ROLES).await
}

/// Staff-tier routes (admin, staff, doctor).
pub async fn require_staff(
    state: State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    require_roles(state, req, next, StaffTier::ROLES).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use medibase_auth::Role;

    use crate::modules::users::model::UserRecord;

    fn authenticated(role: Role) -> Authenticated {
        Authenticated::for_tests(UserRecord::new("u1", "Test", role), "t")
    }

    #[test]
    fn test_authorize_member() {
        assert!(authorize(&authenticated(Role::Staff), RoleSet::STAFF_TIER).is_ok());
    }

    #[test]
    fn test_authorize_non_member_is_forbidden() {
        assert_eq!(
            authorize(&authenticated(Role::Staff), RoleSet::ADMIN_ONLY),
            Err(AuthError::Forbidden {
                role: Role::Staff,
                allowed: RoleSet::ADMIN_ONLY,
            })
        );
    }

    #[test]
    fn test_authorize_empty_set_admits_nobody() {
        for role in Role::ALL {
            assert!(authorize(&authenticated(role), RoleSet::EMPTY).is_err());
        }
    }
}
