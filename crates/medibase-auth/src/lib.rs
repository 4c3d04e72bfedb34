//! # Medibase Auth
//!
//! Roles, token claims, and JWT utilities for the Medibase API.
//!
//! This crate provides:
//!
//! - [`roles`]: the closed [`Role`] set, [`RoleSet`], and the named [`Gate`]s
//! - [`claims`]: the JWT payload and subject extraction
//! - [`jwt`]: token creation and verification
//! - [`error`]: the access-control failure taxonomy
//!
//! # Example
//!
//! ```ignore
//! use medibase_auth::{create_access_token, verify_token};
//! use medibase_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_access_token("u1", &config)?;
//! let claims = verify_token(&token, &config)?;
//! assert_eq!(claims.subject(), Some("u1"));
//! ```

pub mod claims;
pub mod error;
pub mod jwt;
pub mod roles;

pub use claims::Claims;
pub use error::AuthError;
pub use jwt::{create_access_token, create_legacy_token, sign_claims, verify_token};
pub use roles::{AdminOnly, AdminOrStaff, DoctorOrAdmin, Gate, ParseRoleError, Role, RoleSet, StaffTier};
