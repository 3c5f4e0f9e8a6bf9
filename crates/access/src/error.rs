use thiserror::Error;

use crate::permissions::{Action, Module};
use crate::store::AccessStoreError;

/// Enforcement outcome error.
///
/// `MissingOperationContext` and `AccessDenied` are expected, user-facing
/// outcomes: surfaced directly, never retried. `StoreUnavailable` is an
/// infrastructure fault; by the time a caller sees it, the guard has
/// already failed closed. It must be surfaced as an internal error, never
/// converted into an allowance.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccessError {
    /// A non-platform identity issued a request without operation context.
    #[error("operation context missing")]
    MissingOperationContext,

    /// Resolution returned deny, the grant was absent, or the
    /// team-management role gate failed.
    #[error("access denied: {module}.{action}")]
    AccessDenied { module: Module, action: Action },

    /// The grant store lookup failed. Treated as denial.
    #[error("grant store unavailable")]
    StoreUnavailable(#[source] AccessStoreError),
}
