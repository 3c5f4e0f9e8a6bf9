//! Team membership listing (read side).
//!
//! Mutating team administration (inviting, removing, role changes) lives in
//! the grant-management workflow; this surface only answers "who is in this
//! operation", gated on `team.view`.

use std::sync::Arc;

use axum::{Json, Router, extract::Extension, http::StatusCode, response::IntoResponse, routing::get};

use selldesk_access::{AccessError, Action, Module};
use selldesk_infra::GrantStore;

use crate::app::{errors, services::AppServices};
use crate::authz;
use crate::context::{IdentityContext, OperationContext};

pub fn router() -> Router {
    Router::new().route("/members", get(list_members))
}

/// GET /team/members - members of the current operation.
pub async fn list_members(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(identity): Extension<IdentityContext>,
    Extension(operation): Extension<OperationContext>,
) -> axum::response::Response {
    if let Err(rejection) =
        authz::enforce(&services, &identity, &operation, Module::Team, Action::View)
    {
        return rejection;
    }

    // Listing is inherently operation-scoped, even for platform admins the
    // guard just waved through.
    let Some(operation_id) = operation.operation_id() else {
        return errors::access_error_to_response(AccessError::MissingOperationContext);
    };

    let grants = match services.grants().list_for_operation(operation_id) {
        Ok(grants) => grants,
        Err(source) => {
            return errors::access_error_to_response(AccessError::StoreUnavailable(source));
        }
    };

    // Roles are team-page data; permission blobs stay server-side.
    let members: Vec<serde_json::Value> = grants
        .iter()
        .map(|grant| {
            serde_json::json!({
                "user_id": grant.user_id.to_string(),
                "role": grant.role.as_str(),
                "customized": grant.permissions.is_some(),
            })
        })
        .collect();

    (
        StatusCode::OK,
        Json(serde_json::json!({ "members": members })),
    )
        .into_response()
}
