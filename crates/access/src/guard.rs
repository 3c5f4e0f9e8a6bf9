//! Request-path enforcement.
//!
//! Guards wrap the resolver at the request boundary (before any business
//! handler runs) and convert its outcome into accept/reject. They also emit
//! the structured log line for both grant and denial: advisory output for
//! operators, never part of the decision itself.

use selldesk_core::OperationId;

use crate::error::AccessError;
use crate::identity::Identity;
use crate::permissions::{Action, Module};
use crate::resolver::PermissionResolver;
use crate::store::AccessStore;

/// Enforcement wrapper for module/action checks.
#[derive(Debug)]
pub struct AccessGuard<S> {
    resolver: PermissionResolver<S>,
}

impl<S: AccessStore> AccessGuard<S> {
    pub fn new(store: S) -> Self {
        Self {
            resolver: PermissionResolver::new(store),
        }
    }

    pub fn resolver(&self) -> &PermissionResolver<S> {
        &self.resolver
    }

    /// Accept or reject `action` on `module` for the caller.
    ///
    /// Platform admins are allowed without operation context. Everyone else
    /// needs an operation id; a store fault is converted to
    /// `StoreUnavailable` (denial, surfaced as an internal fault).
    pub fn enforce(
        &self,
        identity: &Identity,
        operation_id: Option<OperationId>,
        module: Module,
        action: Action,
    ) -> Result<(), AccessError> {
        if identity.platform_role.bypasses_operation_checks() {
            tracing::debug!(
                user_id = %identity.user_id,
                platform_role = %identity.platform_role,
                %module,
                %action,
                "access granted: platform role"
            );
            return Ok(());
        }

        let Some(operation_id) = operation_id else {
            tracing::warn!(
                user_id = %identity.user_id,
                %module,
                %action,
                "access rejected: missing operation context"
            );
            return Err(AccessError::MissingOperationContext);
        };

        let allowed = self
            .resolver
            .resolve(identity, operation_id, module, action)
            .map_err(|source| {
                tracing::error!(
                    user_id = %identity.user_id,
                    %operation_id,
                    %module,
                    %action,
                    error = %source,
                    "grant store fault during enforcement; failing closed"
                );
                AccessError::StoreUnavailable(source)
            })?;

        if allowed {
            tracing::debug!(
                user_id = %identity.user_id,
                %operation_id,
                %module,
                %action,
                "access granted"
            );
            Ok(())
        } else {
            tracing::warn!(
                user_id = %identity.user_id,
                %operation_id,
                %module,
                %action,
                "access denied"
            );
            Err(AccessError::AccessDenied { module, action })
        }
    }
}

/// Role-only gate for team administration (inviting/removing members,
/// changing roles).
///
/// Deliberately ignores granular `permissions` overrides: team administration
/// is a role-level privilege, not a toggle. Granting it piecemeal would let a
/// non-admin escalate other members' access.
#[derive(Debug)]
pub struct TeamManagementGuard<S> {
    store: S,
}

impl<S: AccessStore> TeamManagementGuard<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn enforce(
        &self,
        identity: &Identity,
        operation_id: OperationId,
    ) -> Result<(), AccessError> {
        if identity.platform_role.bypasses_operation_checks() {
            tracing::debug!(
                user_id = %identity.user_id,
                platform_role = %identity.platform_role,
                %operation_id,
                "team management granted: platform role"
            );
            return Ok(());
        }

        let grant = self
            .store
            .grant_for(identity.user_id, operation_id)
            .map_err(|source| {
                tracing::error!(
                    user_id = %identity.user_id,
                    %operation_id,
                    error = %source,
                    "grant store fault during team-management check; failing closed"
                );
                AccessError::StoreUnavailable(source)
            })?;

        match grant {
            Some(grant) if grant.role.is_operation_admin() => {
                tracing::debug!(
                    user_id = %identity.user_id,
                    %operation_id,
                    role = %grant.role,
                    "team management granted"
                );
                Ok(())
            }
            _ => {
                tracing::warn!(
                    user_id = %identity.user_id,
                    %operation_id,
                    "team management denied"
                );
                Err(AccessError::AccessDenied {
                    module: Module::Team,
                    action: Action::Manage,
                })
            }
        }
    }
}
