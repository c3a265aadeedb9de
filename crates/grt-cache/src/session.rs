//! Session identifiers used to scope stored payloads.

use serde::{Deserialize, Serialize};

/// A browsing-session identifier.
///
/// Stored carts are keyed per session so two shoppers sharing a store
/// never see each other's items.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    /// Create a new session ID from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the session ID as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Namespace `prefix` with this session, e.g. `grtCart:sess_abc`.
    pub fn scoped_key(&self, prefix: &str) -> String {
        crate::cache_key!(prefix, self)
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for SessionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_id_from_str() {
        let id = SessionId::from("test-session");
        assert_eq!(id.as_str(), "test-session");
        assert_eq!(format!("{}", id), "test-session");
    }

    #[test]
    fn test_scoped_key() {
        let id = SessionId::new("sess_42");
        assert_eq!(id.scoped_key("grtCart"), "grtCart:sess_42");
    }

    #[test]
    fn test_session_id_serialization() {
        let id = SessionId::new("serialize-me");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, r#""serialize-me""#);

        let deserialized: SessionId = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, id);
    }
}
