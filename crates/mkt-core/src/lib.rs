pub mod error;
pub mod models;
pub mod sync;

pub use error::{CoreError, Result};
pub use error_location::ErrorLocation;
pub use models::external_identity::ExternalIdentity;
pub use models::lifecycle_event::{EventKind, EventRecord, LifecycleEvent};
pub use models::user::User;
pub use models::user_role::UserRole;
pub use sync::overrides::SyncOverrides;
pub use sync::store::{StoreError, UserStore};
pub use sync::user_sync::{EventOutcome, UserSync};

#[cfg(test)]
mod tests;
