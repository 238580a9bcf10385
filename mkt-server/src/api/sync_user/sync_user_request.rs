use mkt_core::UserRole;

use serde::Deserialize;

/// Optional request body for the sync endpoint. The role only applies when
/// the record is created by this call.
#[derive(Debug, Default, Deserialize)]
pub struct SyncUserRequest {
    #[serde(default)]
    pub role: Option<UserRole>,
}
