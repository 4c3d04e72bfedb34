//! User records and the directory that resolves them.
//!
//! The directory is the upstream collaborator of the access-control chain:
//! it maps a subject identifier to a role-tagged [`model::UserRecord`].

pub mod directory;
pub mod model;
