//! Lifecycle events pushed by the identity provider's webhook.

use crate::ExternalIdentity;

use serde::Deserialize;
use serde_json::{Map, Value};

/// Event type. Unknown types deserialize to `Unknown` so new provider
/// events never fail the endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventKind {
    Insert,
    Update,
    Delete,
    #[serde(other)]
    Unknown,
}

/// Row image carried by a lifecycle event. The provider sends metadata as
/// `raw_user_meta_data`; the alias keeps the wire format compatible.
#[derive(Debug, Clone, Deserialize)]
pub struct EventRecord {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, alias = "raw_user_meta_data")]
    pub metadata: Map<String, Value>,
}

impl EventRecord {
    /// View this row image as an external identity
    pub fn identity(&self) -> ExternalIdentity {
        ExternalIdentity {
            id: self.id.clone(),
            email: self.email.clone(),
            metadata: self.metadata.clone(),
        }
    }

    /// The `name` metadata key, empty strings treated as absent
    pub fn metadata_name(&self) -> Option<String> {
        self.metadata
            .get("name")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }
}

/// INSERT/UPDATE/DELETE notification, delivered at-least-once
#[derive(Debug, Clone, Deserialize)]
pub struct LifecycleEvent {
    #[serde(rename = "type")]
    pub kind: EventKind,
    #[serde(default)]
    pub record: Option<EventRecord>,
    #[serde(default)]
    pub old_record: Option<EventRecord>,
}
