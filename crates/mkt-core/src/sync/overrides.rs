use crate::UserRole;

/// Caller-supplied overrides for a reconciliation call.
///
/// `name` takes precedence over provider metadata. `role` only applies at
/// creation time; it never changes an existing record.
#[derive(Debug, Clone, Default)]
pub struct SyncOverrides {
    pub name: Option<String>,
    pub role: Option<UserRole>,
}

impl SyncOverrides {
    pub fn with_role(role: Option<UserRole>) -> Self {
        Self { name: None, role }
    }
}
