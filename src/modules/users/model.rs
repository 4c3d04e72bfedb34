use medibase_auth::Role;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A user as stored in the directory.
///
/// `role` is parsed when the record is built or deserialized, so a record
/// with an unknown role never reaches a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserRecord {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub role: Role,
}

impl UserRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: None,
            role,
        }
    }
}
