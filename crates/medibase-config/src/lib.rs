//! # Medibase Config
//!
//! Configuration types for the Medibase API.
//!
//! Every structure is loaded from environment variables with a development
//! default when the variable is missing or unparsable:
//!
//! - [`jwt`]: token signing secret and lifetime
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`directory`]: user directory lookup budget and seed file
//! - [`server`]: listen address
//!
//! # Example
//!
//! ```ignore
//! use medibase_config::{CorsConfig, DirectoryConfig, JwtConfig, ServerConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let cors_config = CorsConfig::from_env();
//! let directory_config = DirectoryConfig::from_env();
//! let server_config = ServerConfig::from_env();
//! ```

pub mod cors;
pub mod directory;
pub mod jwt;
pub mod server;

pub use cors::CorsConfig;
pub use directory::DirectoryConfig;
pub use jwt::JwtConfig;
pub use server::ServerConfig;
