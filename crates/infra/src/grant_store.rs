use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use selldesk_access::{AccessGrant, AccessStore, AccessStoreError};
use selldesk_core::{OperationId, UserId};

/// Write side of grant storage, used by the grant-management workflow
/// (invitation acceptance, role/permission changes, member removal).
///
/// The resolver and guards only ever see the read side (`AccessStore`).
pub trait GrantStore: AccessStore {
    /// Insert or replace the grant for `(grant.user_id, grant.operation_id)`.
    ///
    /// Upsert semantics keep the one-grant-per-pair invariant: a second
    /// insert for the same pair replaces the first.
    fn upsert(&self, grant: AccessGrant) -> Result<(), AccessStoreError>;

    /// Delete the grant for `(user_id, operation_id)`.
    ///
    /// Removing a missing grant is a no-op.
    fn remove(&self, user_id: UserId, operation_id: OperationId) -> Result<(), AccessStoreError>;

    /// All grants within one operation (member listing).
    fn list_for_operation(
        &self,
        operation_id: OperationId,
    ) -> Result<Vec<AccessGrant>, AccessStoreError>;
}

impl<S> GrantStore for Arc<S>
where
    S: GrantStore + ?Sized,
{
    fn upsert(&self, grant: AccessGrant) -> Result<(), AccessStoreError> {
        (**self).upsert(grant)
    }

    fn remove(&self, user_id: UserId, operation_id: OperationId) -> Result<(), AccessStoreError> {
        (**self).remove(user_id, operation_id)
    }

    fn list_for_operation(
        &self,
        operation_id: OperationId,
    ) -> Result<Vec<AccessGrant>, AccessStoreError> {
        (**self).list_for_operation(operation_id)
    }
}

/// In-memory grant store for tests/dev.
///
/// Lock poisoning surfaces as `Unavailable` rather than a silent miss: for an
/// authorization store, a miss means "deny cleanly" while a fault must be
/// distinguishable upstream.
#[derive(Debug, Default)]
pub struct InMemoryGrantStore {
    inner: RwLock<HashMap<(UserId, OperationId), AccessGrant>>,
}

impl InMemoryGrantStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> AccessStoreError {
    AccessStoreError::Unavailable("grant store lock poisoned".to_string())
}

impl AccessStore for InMemoryGrantStore {
    fn grant_for(
        &self,
        user_id: UserId,
        operation_id: OperationId,
    ) -> Result<Option<AccessGrant>, AccessStoreError> {
        let map = self.inner.read().map_err(poisoned)?;
        Ok(map.get(&(user_id, operation_id)).cloned())
    }
}

impl GrantStore for InMemoryGrantStore {
    fn upsert(&self, grant: AccessGrant) -> Result<(), AccessStoreError> {
        let mut map = self.inner.write().map_err(poisoned)?;
        map.insert(grant.key(), grant);
        Ok(())
    }

    fn remove(&self, user_id: UserId, operation_id: OperationId) -> Result<(), AccessStoreError> {
        let mut map = self.inner.write().map_err(poisoned)?;
        map.remove(&(user_id, operation_id));
        Ok(())
    }

    fn list_for_operation(
        &self,
        operation_id: OperationId,
    ) -> Result<Vec<AccessGrant>, AccessStoreError> {
        let map = self.inner.read().map_err(poisoned)?;
        Ok(map
            .values()
            .filter(|grant| grant.operation_id == operation_id)
            .cloned()
            .collect())
    }
}
