use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};

use crate::context::{IdentityContext, OperationContext};

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn whoami(
    Extension(identity): Extension<IdentityContext>,
    Extension(operation): Extension<OperationContext>,
) -> impl IntoResponse {
    let caller = identity.identity();
    Json(serde_json::json!({
        "user_id": caller.user_id.to_string(),
        "platform_role": caller.platform_role.as_str(),
        "operation_id": operation.operation_id().map(|id| id.to_string()),
    }))
}
