//! Read-through grant cache for the request path.

use std::collections::HashMap;
use std::sync::RwLock;

use selldesk_access::{AccessGrant, AccessStore, AccessStoreError};
use selldesk_core::{OperationId, UserId};

use crate::grant_store::GrantStore;

fn poisoned<T>(_: T) -> AccessStoreError {
    AccessStoreError::Unavailable("grant cache lock poisoned".to_string())
}

/// Read-through cache in front of a grant store.
///
/// Keyed strictly on `(user_id, operation_id)`; both hits and misses are
/// cached. Mutations routed through this wrapper invalidate the key
/// synchronously before the write call returns: a stale allow is a security
/// defect, a stale deny merely a UX defect, so the design biases toward
/// invalidate-before-respond.
///
/// Cache fills and mutations both run under the write lock, so a fill cannot
/// re-insert a value that a concurrent mutation just invalidated.
#[derive(Debug)]
pub struct CachedGrantStore<S> {
    inner: S,
    cache: RwLock<HashMap<(UserId, OperationId), Option<AccessGrant>>>,
}

impl<S> CachedGrantStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Drop one cached entry. For grant mutations performed *outside* this
    /// wrapper (e.g. a bulk import writing to the backing store directly).
    pub fn invalidate(
        &self,
        user_id: UserId,
        operation_id: OperationId,
    ) -> Result<(), AccessStoreError> {
        let mut cache = self.cache.write().map_err(poisoned)?;
        cache.remove(&(user_id, operation_id));
        Ok(())
    }

    /// Drop every cached entry.
    pub fn clear(&self) -> Result<(), AccessStoreError> {
        let mut cache = self.cache.write().map_err(poisoned)?;
        cache.clear();
        Ok(())
    }
}

impl<S: AccessStore> AccessStore for CachedGrantStore<S> {
    fn grant_for(
        &self,
        user_id: UserId,
        operation_id: OperationId,
    ) -> Result<Option<AccessGrant>, AccessStoreError> {
        let key = (user_id, operation_id);

        {
            let cache = self.cache.read().map_err(poisoned)?;
            if let Some(cached) = cache.get(&key) {
                return Ok(cached.clone());
            }
        }

        let mut cache = self.cache.write().map_err(poisoned)?;
        if let Some(cached) = cache.get(&key) {
            return Ok(cached.clone());
        }
        // Faults are not cached: the `?` returns before the insert.
        let fetched = self.inner.grant_for(user_id, operation_id)?;
        cache.insert(key, fetched.clone());
        Ok(fetched)
    }
}

impl<S: GrantStore> GrantStore for CachedGrantStore<S> {
    fn upsert(&self, grant: AccessGrant) -> Result<(), AccessStoreError> {
        let key = grant.key();
        let mut cache = self.cache.write().map_err(poisoned)?;
        self.inner.upsert(grant)?;
        cache.remove(&key);
        Ok(())
    }

    fn remove(&self, user_id: UserId, operation_id: OperationId) -> Result<(), AccessStoreError> {
        let mut cache = self.cache.write().map_err(poisoned)?;
        self.inner.remove(user_id, operation_id)?;
        cache.remove(&(user_id, operation_id));
        Ok(())
    }

    fn list_for_operation(
        &self,
        operation_id: OperationId,
    ) -> Result<Vec<AccessGrant>, AccessStoreError> {
        self.inner.list_for_operation(operation_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use selldesk_access::OperationRole;

    use crate::grant_store::InMemoryGrantStore;

    /// Counts reads against the backing store.
    struct CountingStore {
        inner: InMemoryGrantStore,
        reads: AtomicUsize,
    }

    impl CountingStore {
        fn new() -> Self {
            Self {
                inner: InMemoryGrantStore::new(),
                reads: AtomicUsize::new(0),
            }
        }

        fn read_count(&self) -> usize {
            self.reads.load(Ordering::SeqCst)
        }
    }

    impl AccessStore for CountingStore {
        fn grant_for(
            &self,
            user_id: UserId,
            operation_id: OperationId,
        ) -> Result<Option<AccessGrant>, AccessStoreError> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            self.inner.grant_for(user_id, operation_id)
        }
    }

    impl GrantStore for CountingStore {
        fn upsert(&self, grant: AccessGrant) -> Result<(), AccessStoreError> {
            self.inner.upsert(grant)
        }

        fn remove(
            &self,
            user_id: UserId,
            operation_id: OperationId,
        ) -> Result<(), AccessStoreError> {
            self.inner.remove(user_id, operation_id)
        }

        fn list_for_operation(
            &self,
            operation_id: OperationId,
        ) -> Result<Vec<AccessGrant>, AccessStoreError> {
            self.inner.list_for_operation(operation_id)
        }
    }

    #[test]
    fn hits_and_misses_are_both_cached() {
        let backing = Arc::new(CountingStore::new());
        let user_id = UserId::new();
        let operation_id = OperationId::new();
        backing
            .upsert(AccessGrant::new(user_id, operation_id, OperationRole::Viewer))
            .unwrap();

        let cached = CachedGrantStore::new(Arc::clone(&backing));

        cached.grant_for(user_id, operation_id).unwrap();
        cached.grant_for(user_id, operation_id).unwrap();
        assert_eq!(backing.read_count(), 1);

        let absent_user = UserId::new();
        assert_eq!(cached.grant_for(absent_user, operation_id).unwrap(), None);
        assert_eq!(cached.grant_for(absent_user, operation_id).unwrap(), None);
        assert_eq!(backing.read_count(), 2);
    }

    #[test]
    fn remove_invalidates_before_responding() {
        // The stale-allow scenario: a cached grant must not survive the
        // member's removal.
        let cached = CachedGrantStore::new(InMemoryGrantStore::new());
        let user_id = UserId::new();
        let operation_id = OperationId::new();

        cached
            .upsert(AccessGrant::new(user_id, operation_id, OperationRole::Owner))
            .unwrap();
        assert!(cached.grant_for(user_id, operation_id).unwrap().is_some());

        cached.remove(user_id, operation_id).unwrap();
        assert_eq!(cached.grant_for(user_id, operation_id).unwrap(), None);
    }

    #[test]
    fn upsert_invalidates_the_cached_miss() {
        // The stale-deny direction: merely a UX defect, but invalidation
        // covers it the same way.
        let cached = CachedGrantStore::new(InMemoryGrantStore::new());
        let user_id = UserId::new();
        let operation_id = OperationId::new();

        assert_eq!(cached.grant_for(user_id, operation_id).unwrap(), None);

        cached
            .upsert(AccessGrant::new(user_id, operation_id, OperationRole::Viewer))
            .unwrap();
        let grant = cached.grant_for(user_id, operation_id).unwrap().unwrap();
        assert_eq!(grant.role, OperationRole::Viewer);
    }

    #[test]
    fn explicit_invalidate_drops_only_the_given_key() {
        let backing = Arc::new(CountingStore::new());
        let cached = CachedGrantStore::new(Arc::clone(&backing));

        let user_a = UserId::new();
        let user_b = UserId::new();
        let operation_id = OperationId::new();

        cached.grant_for(user_a, operation_id).unwrap();
        cached.grant_for(user_b, operation_id).unwrap();
        assert_eq!(backing.read_count(), 2);

        cached.invalidate(user_a, operation_id).unwrap();

        cached.grant_for(user_a, operation_id).unwrap();
        cached.grant_for(user_b, operation_id).unwrap();
        assert_eq!(backing.read_count(), 3);
    }
}
