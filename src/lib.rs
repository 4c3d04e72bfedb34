//! # Medibase API
//!
//! A hospital management REST API built with Rust and Axum. Patients, doctors
//! and appointments sit behind JWT authentication and role-based access
//! control.
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── middleware/       # Authenticate and Authorize
//! ├── modules/          # Feature modules
//! │   ├── auth/        # Current-user endpoint
//! │   ├── users/       # User records and the user directory
//! │   ├── patients/    # Patient records
//! │   ├── doctors/     # Doctor profiles and availability
//! │   └── appointments/# Appointment scheduling
//! ├── db.rs             # In-process document collections
//! └── state.rs          # Shared application state
//! ```
//!
//! Each feature module follows the same layout: `controller.rs` (HTTP
//! handlers), `service.rs` (business logic), `model.rs` (documents and DTOs)
//! and `router.rs`.
//!
//! ## Roles
//!
//! | Role | Description |
//! |------|-------------|
//! | `admin` | Full access, the only role that may delete records |
//! | `doctor` | Clinical staff; reads records and its own appointments |
//! | `staff` | Front desk; registers patients and books appointments |
//! | `user` | Basic account; may only reach ungated authenticated routes |
//!
//! Routes are protected by named gates: `AdminOnly`, `DoctorOrAdmin`,
//! `StaffTier` (admin, staff, doctor) and `AdminOrStaff`.
//!
//! ## Authentication
//!
//! Clients send `Authorization: Bearer <token>`. The token is an HS256 JWT
//! whose `userId` claim (or the legacy `id` claim) names a record in the user
//! directory. Every authentication failure is a 401 with a `{"message"}`
//! body; a role that a gate does not admit is a 403.
//!
//! ## Quick Start
//!
//! ```bash
//! JWT_SECRET=your-secure-secret-key
//! USERS_SEED_FILE=users.json
//! cargo run --bin medibase-cli -- issue-token --user-id <id>
//! ```
//!
//! Swagger UI is served at `/swagger-ui`.

pub mod db;
pub mod docs;
pub mod logging;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod validator;

pub use medibase_auth;
pub use medibase_config;
pub use medibase_core;
