//! Session data: the bearer token plus who it belongs to.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Authenticated user profile as returned by `POST /auth/login`.
///
/// Only `id` is required. Fields this client does not interpret are kept in
/// `extra` and written back verbatim when the session is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserProfile {
    /// Best human-readable name: username, then email, then id.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.username
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or(&self.id)
    }
}

/// An exam the user is assigned to. Opaque apart from a few accessors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExamAssignment(pub Map<String, Value>);

impl ExamAssignment {
    #[must_use]
    pub fn exam_id(&self) -> Option<String> {
        self.0.get("exam_id").or_else(|| self.0.get("id")).and_then(scalar_to_string)
    }

    #[must_use]
    pub fn exam_name(&self) -> Option<&str> {
        self.0.get("exam_name").and_then(Value::as_str)
    }
}

/// The persisted session: everything needed to resume after a restart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub token: String,
    pub user: UserProfile,
    #[serde(default)]
    pub exams: Vec<ExamAssignment>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl SessionRecord {
    #[must_use]
    pub fn new(token: String, user: UserProfile, exams: Vec<ExamAssignment>) -> Self {
        Self {
            token,
            user,
            exams,
            created_at: Utc::now(),
        }
    }

    /// Parse a persisted record, rejecting anything without a usable token and user id.
    pub(crate) fn from_persisted(raw: &str) -> Option<Self> {
        match serde_json::from_str::<Self>(raw) {
            Ok(record) if record.is_complete() => Some(record),
            Ok(_) => {
                tracing::warn!("persisted session is missing its token or user id; ignoring");
                None
            }
            Err(error) => {
                tracing::warn!(%error, "persisted session is malformed; ignoring");
                None
            }
        }
    }

    pub(crate) fn is_complete(&self) -> bool {
        !self.token.trim().is_empty() && !self.user.id.trim().is_empty()
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Accept `"42"` and `42` alike; backends disagree on id types.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Signed(i64),
        Unsigned(u64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Signed(n) => n.to_string(),
        Id::Unsigned(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn profile_keeps_unknown_fields() {
        let profile: UserProfile = serde_json::from_value(json!({
            "id": "u1",
            "role": "ADMIN",
            "school_id": 17
        }))
        .expect("decode");

        assert_eq!(profile.id, "u1");
        assert_eq!(profile.role.as_deref(), Some("ADMIN"));
        assert_eq!(profile.extra.get("school_id"), Some(&json!(17)));

        let back = serde_json::to_value(&profile).expect("encode");
        assert_eq!(back, json!({"id": "u1", "role": "ADMIN", "school_id": 17}));
    }

    #[test]
    fn numeric_user_id_is_stringified() {
        let profile: UserProfile =
            serde_json::from_value(json!({"id": 42, "username": "amina"})).expect("decode");
        assert_eq!(profile.id, "42");
        assert_eq!(profile.display_name(), "amina");
    }

    #[test]
    fn profile_without_id_is_rejected() {
        let result = serde_json::from_value::<UserProfile>(json!({"username": "x"}));
        assert!(result.is_err());
    }

    #[test]
    fn assignment_accessors() {
        let assignment: ExamAssignment =
            serde_json::from_value(json!({"exam_id": 7, "exam_name": "Form Four Mock"}))
                .expect("decode");
        assert_eq!(assignment.exam_id().as_deref(), Some("7"));
        assert_eq!(assignment.exam_name(), Some("Form Four Mock"));
    }

    #[test]
    fn from_persisted_rejects_blank_token() {
        let raw = r#"{"token":"  ","user":{"id":"u1"}}"#;
        assert!(SessionRecord::from_persisted(raw).is_none());
    }

    #[test]
    fn from_persisted_rejects_garbage() {
        assert!(SessionRecord::from_persisted("{not json").is_none());
        assert!(SessionRecord::from_persisted(r#"{"token":"abc"}"#).is_none());
    }

    #[test]
    fn from_persisted_defaults_missing_exams() {
        let raw = r#"{"token":"abc","user":{"id":"u1"}}"#;
        let record = SessionRecord::from_persisted(raw).expect("complete record");
        assert!(record.exams.is_empty());
    }
}
