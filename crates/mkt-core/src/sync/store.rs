//! Persistence port for local user records.
//!
//! The store enforces uniqueness on `external_id` and `email`; everything
//! else (race recovery, field priorities) is the reconciler's job. Keeping
//! this a trait lets the reconciler run against an in-memory fake in tests.

use crate::User;

use std::panic::Location;

use async_trait::async_trait;
use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    /// A uniqueness constraint fired. `constraint` names the violated
    /// column (store-specific text, e.g. "users.external_id").
    #[error("Unique constraint violated: {constraint} {location}")]
    Conflict {
        constraint: String,
        location: ErrorLocation,
    },

    #[error("Store operation failed: {message} {location}")]
    Backend {
        message: String,
        location: ErrorLocation,
    },
}

impl StoreError {
    #[track_caller]
    pub fn conflict<S: Into<String>>(constraint: S) -> Self {
        StoreError::Conflict {
            constraint: constraint.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn backend<S: Into<String>>(message: S) -> Self {
        StoreError::Backend {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// True when the violated constraint is the one-record-per-external-id
    /// backstop (the lost-creation race the reconciler recovers from)
    pub fn is_external_id_conflict(&self) -> bool {
        matches!(self, Self::Conflict { constraint, .. } if constraint.contains("external_id"))
    }

    /// True when the violated constraint is the unique email index
    pub fn is_email_conflict(&self) -> bool {
        matches!(self, Self::Conflict { constraint, .. } if constraint.contains("email"))
    }
}

/// Keyed, single-row access to local user records
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_external_id(&self, external_id: &str)
    -> Result<Option<User>, StoreError>;

    /// Insert a new record. Fails with [`StoreError::Conflict`] when the
    /// external id or email is already taken.
    async fn create(&self, user: &User) -> Result<(), StoreError>;

    /// Persist the mutable fields (email, name, updated_at) of an existing
    /// record, addressed by its external id.
    async fn update(&self, user: &User) -> Result<(), StoreError>;

    /// Remove every record with this external id, returning the count.
    /// Zero is not an error.
    async fn delete_by_external_id(&self, external_id: &str) -> Result<u64, StoreError>;
}
