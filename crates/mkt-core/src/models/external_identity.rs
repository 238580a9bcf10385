//! The identity provider's view of a user, read-only to this system.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// User object as reported by the external identity provider.
/// Source of truth for identity existence, not for profile fields once a
/// local override has been supplied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalIdentity {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    /// Free-form provider metadata (display name, avatar, ...)
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl ExternalIdentity {
    /// Read a string-valued metadata key, treating empty strings as absent
    pub fn metadata_str(&self, key: &str) -> Option<&str> {
        self.metadata
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }
}
