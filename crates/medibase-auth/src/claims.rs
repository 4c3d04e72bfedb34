//! JWT payload carried by access tokens.

use serde::{Deserialize, Deserializer, Serialize};

/// Access token claims.
///
/// Two claim names have been used for the subject over time: `userId` is
/// written by current issuers, `id` by older ones. Both are still accepted,
/// as strings or as integers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject identifier (current claim name)
    #[serde(
        rename = "userId",
        default,
        deserialize_with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub user_id: Option<String>,
    /// Subject identifier (legacy claim name)
    #[serde(
        default,
        deserialize_with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: usize,
    /// Token issued-at timestamp (Unix timestamp)
    #[serde(default)]
    pub iat: usize,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SubjectValue {
    Text(String),
    Signed(i64),
    Unsigned(u64),
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        Option::<SubjectValue>::deserialize(deserializer)?.map(|value| match value {
            SubjectValue::Text(s) => s,
            SubjectValue::Signed(n) => n.to_string(),
            SubjectValue::Unsigned(n) => n.to_string(),
        }),
    )
}

impl Claims {
    /// The subject identifier, preferring `userId` over `id`. Empty values
    /// count as absent.
    pub fn subject(&self) -> Option<&str> {
        self.user_id
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.id.as_deref().filter(|s| !s.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_serialize_current_name() {
        let claims = Claims {
            user_id: Some("u1".to_string()),
            id: None,
            exp: 1234567890,
            iat: 1234567800,
        };
        let serialized = serde_json::to_string(&claims).unwrap();
        assert!(serialized.contains(r#""userId":"u1""#));
        assert!(!serialized.contains(r#""id""#));
    }

    #[test]
    fn test_claims_deserialize_legacy_name() {
        let json = r#"{"id":"legacy-7","exp":9999999999,"iat":9999999900}"#;
        let claims: Claims = serde_json::from_str(json).unwrap();
        assert_eq!(claims.user_id, None);
        assert_eq!(claims.subject(), Some("legacy-7"));
    }

    #[test]
    fn test_subject_prefers_user_id() {
        let claims = Claims {
            user_id: Some("current".to_string()),
            id: Some("legacy".to_string()),
            ..Default::default()
        };
        assert_eq!(claims.subject(), Some("current"));
    }

    #[test]
    fn test_subject_skips_empty_values() {
        let claims = Claims {
            user_id: Some(String::new()),
            id: Some("legacy".to_string()),
            ..Default::default()
        };
        assert_eq!(claims.subject(), Some("legacy"));

        let claims = Claims {
            user_id: Some(String::new()),
            id: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(claims.subject(), None);
    }

    #[test]
    fn test_numeric_subject_is_accepted() {
        let json = r#"{"userId":42,"exp":9999999999}"#;
        let claims: Claims = serde_json::from_str(json).unwrap();
        assert_eq!(claims.subject(), Some("42"));

        let json = r#"{"id":18446744073709551615,"exp":9999999999}"#;
        let claims: Claims = serde_json::from_str(json).unwrap();
        assert_eq!(claims.subject(), Some("18446744073709551615"));
    }

    #[test]
    fn test_null_and_non_scalar_subjects() {
        let json = r#"{"userId":null,"id":"legacy","exp":9999999999}"#;
        let claims: Claims = serde_json::from_str(json).unwrap();
        assert_eq!(claims.subject(), Some("legacy"));

        let json = r#"{"userId":{"oid":"x"},"exp":9999999999}"#;
        assert!(serde_json::from_str::<Claims>(json).is_err());
    }

    #[test]
    fn test_subject_missing() {
        let json = r#"{"sub":"not-recognised","exp":9999999999}"#;
        let claims: Claims = serde_json::from_str(json).unwrap();
        assert_eq!(claims.subject(), None);
    }
}
