//! # Medibase Core
//!
//! Core types shared by every Medibase crate.
//!
//! - [`errors`]: Application error type with HTTP response conversion
//!
//! # Example
//!
//! ```ignore
//! use medibase_core::AppError;
//!
//! let error = AppError::not_found(anyhow::anyhow!("Patient not found"));
//! ```

pub mod errors;

pub use errors::{AppError, INTERNAL_ERROR_MESSAGE, MessageResponse};
