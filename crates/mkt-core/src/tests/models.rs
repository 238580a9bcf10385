use crate::{CoreError, EventKind, ExternalIdentity, LifecycleEvent, User, UserRole};

use std::str::FromStr;

use serde_json::json;

#[test]
fn test_user_role_round_trip() {
    assert_eq!(UserRole::from_str("CLIENT").unwrap(), UserRole::Client);
    assert_eq!(
        UserRole::from_str("PROFESSIONAL").unwrap(),
        UserRole::Professional
    );
    assert_eq!(UserRole::Client.as_str(), "CLIENT");
    assert_eq!(UserRole::Professional.as_str(), "PROFESSIONAL");
}

#[test]
fn test_user_role_rejects_unknown_value() {
    let result = UserRole::from_str("ADMIN");
    assert!(matches!(result, Err(CoreError::InvalidUserRole { .. })));
}

#[test]
fn test_user_role_serializes_screaming_snake_case() {
    assert_eq!(
        serde_json::to_value(UserRole::Professional).unwrap(),
        json!("PROFESSIONAL")
    );
}

#[test]
fn test_user_new_defaults() {
    let user = User::new(
        "ext-1".to_string(),
        "a@x.com".to_string(),
        None,
        UserRole::default(),
    );

    assert_eq!(user.external_id, "ext-1");
    assert_eq!(user.role, UserRole::Client);
    assert_eq!(user.created_at, user.updated_at);
}

#[test]
fn test_metadata_str_skips_empty_and_non_string_values() {
    let identity: ExternalIdentity = serde_json::from_value(json!({
        "id": "ext-1",
        "metadata": { "name": "", "full_name": "Ann A", "age": 7 }
    }))
    .unwrap();

    assert_eq!(identity.metadata_str("name"), None);
    assert_eq!(identity.metadata_str("full_name"), Some("Ann A"));
    assert_eq!(identity.metadata_str("age"), None);
}

#[test]
fn test_lifecycle_event_accepts_provider_metadata_field_name() {
    let event: LifecycleEvent = serde_json::from_value(json!({
        "type": "INSERT",
        "record": {
            "id": "ext-1",
            "email": "a@x.com",
            "raw_user_meta_data": { "name": "Ann A" }
        }
    }))
    .unwrap();

    assert_eq!(event.kind, EventKind::Insert);
    let record = event.record.unwrap();
    assert_eq!(record.metadata_name().as_deref(), Some("Ann A"));
}

#[test]
fn test_lifecycle_event_unknown_type_parses() {
    let event: LifecycleEvent =
        serde_json::from_value(json!({ "type": "SOMETHING_NEW" })).unwrap();

    assert_eq!(event.kind, EventKind::Unknown);
    assert!(event.record.is_none());
}
