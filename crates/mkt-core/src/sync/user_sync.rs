//! Reconciliation between external identities and local user records.
//!
//! `sync` is a read-modify-write upsert, not an atomic database upsert:
//! two concurrent first-time calls for the same external id can both see
//! "not found" and both attempt the insert. The store's unique index on
//! `external_id` is the backstop; the losing writer gets a conflict and
//! retries once through the update path.

use crate::{
    CoreError, EventKind, EventRecord, ExternalIdentity, LifecycleEvent,
    Result as CoreErrorResult, SyncOverrides, User,
};
use crate::sync::store::UserStore;

use std::sync::Arc;

use chrono::Utc;

/// What a lifecycle event did to the local store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    /// Record created or fully refreshed via reconciliation
    Synced,
    /// Existing record patched from the event's row image
    Updated,
    /// Records removed (zero means the record was already gone)
    Deleted(u64),
    /// Unknown event type, or a payload without the required row image
    Ignored,
}

/// Keeps exactly one local user record per external identity
pub struct UserSync {
    store: Arc<dyn UserStore>,
}

impl UserSync {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Create-or-update the local record for `identity`.
    ///
    /// Email is always refreshed from the identity; name is refreshed only
    /// when a non-empty candidate exists (override, then metadata `name`,
    /// then `full_name`, then the email local-part); role is set at
    /// creation and never touched afterwards.
    pub async fn sync(
        &self,
        identity: &ExternalIdentity,
        overrides: &SyncOverrides,
    ) -> CoreErrorResult<User> {
        let email = identity
            .email
            .as_deref()
            .filter(|e| !e.is_empty())
            .ok_or_else(|| {
                CoreError::validation(format!("external identity {} has no email", identity.id))
            })?;

        let name = resolve_name(identity, overrides);

        if let Some(existing) = self.store.find_by_external_id(&identity.id).await? {
            return self.refresh(existing, email, name).await;
        }

        let user = User::new(
            identity.id.clone(),
            email.to_string(),
            name,
            overrides.role.unwrap_or_default(),
        );

        match self.store.create(&user).await {
            Ok(()) => Ok(user),
            Err(err) if err.is_external_id_conflict() => {
                // Lost the first-writer race; the row exists now, so take
                // the update path. One retry only.
                match self.store.find_by_external_id(&identity.id).await? {
                    Some(existing) => {
                        self.refresh(existing, email, resolve_name(identity, overrides))
                            .await
                    }
                    None => Err(CoreError::from(err)),
                }
            }
            Err(err) if err.is_email_conflict() => Err(CoreError::email_conflict(email)),
            Err(err) => Err(CoreError::from(err)),
        }
    }

    /// Lookup-first wrapper for read-heavy paths: returns the existing
    /// record without writing, creating it only when absent. Profile-field
    /// drift is accepted until the next explicit `sync`.
    pub async fn get_or_create(
        &self,
        identity: &ExternalIdentity,
        overrides: &SyncOverrides,
    ) -> CoreErrorResult<User> {
        if let Some(existing) = self.store.find_by_external_id(&identity.id).await? {
            return Ok(existing);
        }

        self.sync(identity, overrides).await
    }

    /// Apply a provider lifecycle event. Safe under at-least-once delivery:
    /// a redelivered INSERT updates, a redelivered DELETE removes nothing.
    pub async fn apply_event(&self, event: &LifecycleEvent) -> CoreErrorResult<EventOutcome> {
        match (event.kind, event.record.as_ref(), event.old_record.as_ref()) {
            (EventKind::Insert, Some(record), _) => {
                // Webhook deliveries are authoritative: always reconcile,
                // never the lookup-first shortcut.
                self.sync(&record.identity(), &SyncOverrides::default())
                    .await?;
                Ok(EventOutcome::Synced)
            }
            (EventKind::Update, Some(record), _) => {
                match self.store.find_by_external_id(&record.id).await? {
                    Some(existing) => {
                        self.patch(existing, record).await?;
                        Ok(EventOutcome::Updated)
                    }
                    // Missed INSERT: fall back to full reconciliation
                    None => {
                        self.sync(&record.identity(), &SyncOverrides::default())
                            .await?;
                        Ok(EventOutcome::Updated)
                    }
                }
            }
            (EventKind::Delete, _, Some(old_record)) => {
                let deleted = self.store.delete_by_external_id(&old_record.id).await?;
                Ok(EventOutcome::Deleted(deleted))
            }
            _ => Ok(EventOutcome::Ignored),
        }
    }

    /// Update path of `sync`: email always taken from the identity, name
    /// kept when no new candidate exists, role left alone.
    async fn refresh(
        &self,
        mut user: User,
        email: &str,
        name: Option<String>,
    ) -> CoreErrorResult<User> {
        user.email = email.to_string();
        if let Some(name) = name {
            user.name = Some(name);
        }
        user.updated_at = Utc::now();

        self.persist_update(user).await
    }

    /// Webhook UPDATE path: takes the event's row image as-is, falling back
    /// to the stored values for absent fields. Does not run the name
    /// priority chain.
    async fn patch(&self, mut user: User, record: &EventRecord) -> CoreErrorResult<User> {
        if let Some(email) = record.email.as_deref().filter(|e| !e.is_empty()) {
            user.email = email.to_string();
        }
        if let Some(name) = record.metadata_name() {
            user.name = Some(name);
        }
        user.updated_at = Utc::now();

        self.persist_update(user).await
    }

    async fn persist_update(&self, user: User) -> CoreErrorResult<User> {
        match self.store.update(&user).await {
            Ok(()) => Ok(user),
            Err(err) if err.is_email_conflict() => Err(CoreError::email_conflict(user.email)),
            Err(err) => Err(CoreError::from(err)),
        }
    }
}

/// Name priority: override, then metadata `name`, then `full_name`, then
/// the local-part of the email. Empty strings count as absent throughout.
fn resolve_name(identity: &ExternalIdentity, overrides: &SyncOverrides) -> Option<String> {
    overrides
        .name
        .clone()
        .filter(|n| !n.is_empty())
        .or_else(|| identity.metadata_str("name").map(str::to_string))
        .or_else(|| identity.metadata_str("full_name").map(str::to_string))
        .or_else(|| {
            identity
                .email
                .as_deref()
                .and_then(|e| e.split('@').next())
                .filter(|p| !p.is_empty())
                .map(str::to_string)
        })
}
