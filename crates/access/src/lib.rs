//! `selldesk-access` — operation-scoped authorization engine (zero-trust).
//!
//! Deterministic, fail-closed role/permission resolution for the back office:
//! given an identity, an operation, a module and an action, decide allow or
//! deny. This crate is intentionally decoupled from HTTP and storage; the
//! grant store and the claims verifier are injected at construction, and the
//! decision path performs no ambient lookups.

pub mod claims;
pub mod defaults;
pub mod error;
pub mod grant;
pub mod guard;
pub mod identity;
pub mod permissions;
pub mod resolver;
pub mod store;

pub use claims::{AuthClaims, ClaimsVerifier, TokenValidationError, validate_claims};
pub use defaults::defaults_for;
pub use error::AccessError;
pub use grant::{AccessGrant, OperationRole};
pub use guard::{AccessGuard, TeamManagementGuard};
pub use identity::{Identity, PlatformRole};
pub use permissions::{Action, ActionFlags, Module, PermissionSet};
pub use resolver::PermissionResolver;
pub use store::{AccessStore, AccessStoreError};
