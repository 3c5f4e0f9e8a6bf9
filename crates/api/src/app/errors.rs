use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use selldesk_access::AccessError;

/// Map an enforcement outcome to an HTTP response.
///
/// `StoreUnavailable` deliberately maps to 503, not 403: the caller was not
/// denied on the merits, the decision could not be made. It was still made
/// closed.
pub fn access_error_to_response(err: AccessError) -> axum::response::Response {
    match err {
        AccessError::MissingOperationContext => json_error(
            StatusCode::BAD_REQUEST,
            "missing_operation_context",
            "x-operation-id header is required for this request",
        ),
        AccessError::AccessDenied { module, action } => json_error(
            StatusCode::FORBIDDEN,
            "access_denied",
            format!("{module}.{action}"),
        ),
        AccessError::StoreUnavailable(_) => json_error(
            StatusCode::SERVICE_UNAVAILABLE,
            "grant_store_unavailable",
            "authorization backend unavailable",
        ),
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
