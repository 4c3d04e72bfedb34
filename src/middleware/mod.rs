//! Access-control middleware.
//!
//! - [`auth`]: Authenticate. Bearer token → verified claims → directory record.
//! - [`role`]: Authorize. Authenticated identity → role gate.
//!
//! # Request Flow
//!
//! 1. Client sends `Authorization: Bearer <token>`
//! 2. [`auth::Authenticated`] verifies the token, reads the subject from
//!    `userId` (or the legacy `id` claim) and looks it up in the directory
//! 3. [`role::RequireRole`] checks the resolved role against its gate
//! 4. The handler runs with the [`auth::Authenticated`] context in hand
//!
//! Any failure ends the request with `{"message": ...}`: 401 for every
//! authentication failure, 403 when the role is not admitted.
//!
//! # Example
//!
//! ```ignore
//! use crate::middleware::auth::Authenticated;
//! use crate::middleware::role::RequireRole;
//! use medibase_auth::StaffTier;
//!
//! // Any authenticated user
//! async fn me(auth: Authenticated) -> impl IntoResponse { /* ... */ }
//!
//! // Gate checked before the handler body runs
//! async fn list_patients(RequireRole(auth, _): RequireRole<StaffTier>) -> impl IntoResponse { /* ... */ }
//! ```

pub mod auth;
pub mod role;
