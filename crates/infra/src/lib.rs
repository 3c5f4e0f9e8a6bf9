//! `selldesk-infra` — grant storage adapters.
//!
//! Read-side lookups are defined by `selldesk_access::AccessStore`; this
//! crate adds the write side consumed by the grant-management workflow, an
//! in-memory implementation for tests/dev, and the request-path cache.

pub mod cache;
pub mod grant_store;

pub use cache::CachedGrantStore;
pub use grant_store::{GrantStore, InMemoryGrantStore};
