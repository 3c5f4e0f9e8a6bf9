//! API-side authorization guard for handlers.
//!
//! This enforces authorization at the handler boundary (before any business
//! logic runs), while keeping the engine itself HTTP-agnostic.

use axum::response::Response;

use selldesk_access::{AccessError, Action, Module};

use crate::app::{errors, services::AppServices};
use crate::context::{IdentityContext, OperationContext};

/// Check a module/action against the request context.
///
/// Intended to be called first thing in every protected handler; the `Err`
/// side is a ready-to-return HTTP response.
pub fn enforce(
    services: &AppServices,
    identity: &IdentityContext,
    operation: &OperationContext,
    module: Module,
    action: Action,
) -> Result<(), Response> {
    services
        .guard()
        .enforce(&identity.identity(), operation.operation_id(), module, action)
        .map_err(errors::access_error_to_response)
}

/// Check team-administration privilege against the request context.
///
/// Role-only: granular permission overrides are intentionally ignored here.
pub fn enforce_team_management(
    services: &AppServices,
    identity: &IdentityContext,
    operation: &OperationContext,
) -> Result<(), Response> {
    let caller = identity.identity();

    match operation.operation_id() {
        Some(operation_id) => services
            .team_guard()
            .enforce(&caller, operation_id)
            .map_err(errors::access_error_to_response),
        // Platform admins may act without operation context, as with `enforce`.
        None if caller.platform_role.bypasses_operation_checks() => Ok(()),
        None => Err(errors::access_error_to_response(
            AccessError::MissingOperationContext,
        )),
    }
}
