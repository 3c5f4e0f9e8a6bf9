//! Access self-inspection endpoints.
//!
//! These answer "what can the caller do here?" for client UX (hiding
//! disabled buttons) and for debugging denials. Everything is computed
//! through the same resolver the guards use, so the answers can never
//! disagree with enforcement, and nothing about other members' grants is
//! exposed.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde::Deserialize;

use selldesk_access::{AccessError, Action, Module, OperationRole, defaults_for};
use selldesk_core::OperationId;

use crate::app::{errors, services::AppServices};
use crate::authz;
use crate::context::{IdentityContext, OperationContext};

// ─────────────────────────────────────────────────────────────────────────────
// Router
// ─────────────────────────────────────────────────────────────────────────────

pub fn router() -> Router {
    Router::new()
        .route("/me", get(effective_access))
        .route("/check", get(check_access))
        .route("/defaults/:role", get(role_defaults))
}

#[derive(Debug, Deserialize)]
pub struct CheckAccessQuery {
    pub module: String,
    pub action: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// GET /access/me - effective module/action matrix for the caller.
pub async fn effective_access(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<IdentityContext>,
    Extension(operation): Extension<OperationContext>,
) -> axum::response::Response {
    let caller = identity.identity();

    let operation_id: Option<OperationId> = match operation.operation_id() {
        Some(id) => Some(id),
        None if caller.platform_role.bypasses_operation_checks() => None,
        None => {
            return errors::access_error_to_response(AccessError::MissingOperationContext);
        }
    };

    let mut modules = serde_json::Map::new();
    for module in Module::ALL {
        let mut flags = serde_json::Map::new();
        for &action in module.actions() {
            let allowed = match operation_id {
                Some(operation_id) => {
                    match services
                        .guard()
                        .resolver()
                        .resolve(&caller, operation_id, module, action)
                    {
                        Ok(allowed) => allowed,
                        Err(source) => {
                            return errors::access_error_to_response(
                                AccessError::StoreUnavailable(source),
                            );
                        }
                    }
                }
                // Platform role without operation context: global override.
                None => true,
            };
            flags.insert(action.to_string(), serde_json::Value::Bool(allowed));
        }
        modules.insert(module.to_string(), serde_json::Value::Object(flags));
    }

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "user_id": caller.user_id.to_string(),
            "platform_role": caller.platform_role.as_str(),
            "operation_id": operation_id.map(|id| id.to_string()),
            "modules": modules,
        })),
    )
        .into_response()
}

/// GET /access/check?module=X&action=Y - would this check pass?
///
/// A denial is a successful answer here (200 with `allowed: false`), not a
/// 403: the endpoint inspects the decision, it does not gate anything.
pub async fn check_access(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<IdentityContext>,
    Extension(operation): Extension<OperationContext>,
    Query(query): Query<CheckAccessQuery>,
) -> axum::response::Response {
    let Ok(module) = query.module.parse::<Module>() else {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "invalid_module",
            format!("unknown module: {}", query.module),
        );
    };
    let Ok(action) = query.action.parse::<Action>() else {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "invalid_action",
            format!("unknown action: {}", query.action),
        );
    };

    let outcome = services.guard().enforce(
        &identity.identity(),
        operation.operation_id(),
        module,
        action,
    );

    let allowed = match outcome {
        Ok(()) => true,
        Err(AccessError::AccessDenied { .. }) => false,
        Err(err) => return errors::access_error_to_response(err),
    };

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "module": module.as_str(),
            "action": action.as_str(),
            "allowed": allowed,
        })),
    )
        .into_response()
}

/// GET /access/defaults/:role - seed permission template for a role.
///
/// Gated on team management: the template is member-administration data.
pub async fn role_defaults(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<IdentityContext>,
    Extension(operation): Extension<OperationContext>,
    Path(role): Path<String>,
) -> axum::response::Response {
    if let Err(rejection) = authz::enforce_team_management(&services, &identity, &operation) {
        return rejection;
    }

    let Ok(role) = role.parse::<OperationRole>() else {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "invalid_role",
            format!("unknown role: {role}"),
        );
    };

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "role": role.as_str(),
            "permissions": defaults_for(role),
        })),
    )
        .into_response()
}
