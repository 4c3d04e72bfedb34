//! Access-control failure taxonomy.
//!
//! Every variant ends the request. The variants stay distinct for logging and
//! tests, but callers only ever see the status code and a fixed message: all
//! authentication failures are 401, a role mismatch is 403.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use medibase_core::AppError;
use thiserror::Error;

use crate::roles::{Role, RoleSet};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No credential presented.
    #[error("no bearer credential presented")]
    Unauthenticated,

    /// Signature, payload, or expiry check failed.
    #[error("credential failed verification")]
    InvalidCredential,

    /// Verified, but neither subject claim is present.
    #[error("credential carries no subject claim")]
    MalformedCredential,

    /// Subject is well-formed but has no directory record.
    #[error("subject {0} not found in user directory")]
    UnknownSubject(String),

    /// The directory failed or did not answer in time.
    #[error("user directory unavailable: {0}")]
    DirectoryUnavailable(String),

    /// Known caller whose role is not admitted.
    #[error("role {role} not in allowed set [{allowed}]")]
    Forbidden { role: Role, allowed: RoleSet },
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::Forbidden { .. } => StatusCode::FORBIDDEN,
            _ => StatusCode::UNAUTHORIZED,
        }
    }

    /// Stable label used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            AuthError::Unauthenticated => "unauthenticated",
            AuthError::InvalidCredential => "invalid_credential",
            AuthError::MalformedCredential => "malformed_credential",
            AuthError::UnknownSubject(_) => "unknown_subject",
            AuthError::DirectoryUnavailable(_) => "directory_unavailable",
            AuthError::Forbidden { .. } => "forbidden",
        }
    }

    /// Message placed in the response body. Never includes subject ids,
    /// role names, or verification details.
    pub fn public_message(&self) -> &'static str {
        match self {
            AuthError::Unauthenticated => "No token, authorization denied",
            AuthError::InvalidCredential | AuthError::DirectoryUnavailable(_) => {
                "Token is not valid"
            }
            AuthError::MalformedCredential => "Invalid token format",
            AuthError::UnknownSubject(_) => "User not found",
            AuthError::Forbidden { .. } => "You do not have permission to perform this action",
        }
    }

    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::Forbidden { .. } => AppError::forbidden(self.public_message()),
            _ => AppError::unauthorized(self.public_message()),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.to_app_error().into_response()
    }
}
