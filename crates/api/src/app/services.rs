use std::sync::Arc;

use selldesk_access::{AccessGuard, TeamManagementGuard};
use selldesk_infra::{CachedGrantStore, InMemoryGrantStore};

/// Request-path grant store: in-memory backing fronted by the invalidating
/// cache. Production wiring swaps the backing store, not the guards.
pub type SharedGrantStore = Arc<CachedGrantStore<Arc<InMemoryGrantStore>>>;

/// Infrastructure wiring for the enforcement surface.
pub struct AppServices {
    grants: SharedGrantStore,
    guard: AccessGuard<SharedGrantStore>,
    team_guard: TeamManagementGuard<SharedGrantStore>,
}

impl AppServices {
    pub fn in_memory() -> Self {
        let grants: SharedGrantStore =
            Arc::new(CachedGrantStore::new(Arc::new(InMemoryGrantStore::new())));

        Self {
            guard: AccessGuard::new(Arc::clone(&grants)),
            team_guard: TeamManagementGuard::new(Arc::clone(&grants)),
            grants,
        }
    }

    /// Write handle for the grant-management workflow. Mutations must go
    /// through this (cached) handle so invalidation stays synchronous.
    pub fn grants(&self) -> &SharedGrantStore {
        &self.grants
    }

    pub fn guard(&self) -> &AccessGuard<SharedGrantStore> {
        &self.guard
    }

    pub fn team_guard(&self) -> &TeamManagementGuard<SharedGrantStore> {
        &self.team_guard
    }
}

impl Default for AppServices {
    fn default() -> Self {
        Self::in_memory()
    }
}
