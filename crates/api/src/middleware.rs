use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use chrono::Utc;

use selldesk_access::{AuthClaims, ClaimsVerifier, TokenValidationError, validate_claims};
use selldesk_core::OperationId;

use crate::context::{IdentityContext, OperationContext};

#[derive(Clone)]
pub struct AuthState {
    pub verifier: Arc<dyn ClaimsVerifier>,
}

pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let token = extract_bearer(req.headers())?;

    let claims = state
        .verifier
        .verify(token)
        .map_err(|_e| StatusCode::UNAUTHORIZED)?;
    validate_claims(&claims, Utc::now()).map_err(|_e| StatusCode::UNAUTHORIZED)?;

    let operation = extract_operation_context(req.headers())?;

    req.extensions_mut()
        .insert(IdentityContext::new(claims.identity()));
    req.extensions_mut().insert(operation);

    Ok(next.run(req).await)
}

fn extract_bearer(headers: &HeaderMap) -> Result<&str, StatusCode> {
    let header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let header = header.to_str().map_err(|_| StatusCode::UNAUTHORIZED)?;

    let header = header
        .strip_prefix("Bearer ")
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let token = header.trim();
    if token.is_empty() {
        return Err(StatusCode::UNAUTHORIZED);
    }

    Ok(token)
}

/// Operation scope travels in the `x-operation-id` header.
///
/// Absent is legal (platform-level calls); malformed is not.
fn extract_operation_context(headers: &HeaderMap) -> Result<OperationContext, StatusCode> {
    let Some(value) = headers.get("x-operation-id") else {
        return Ok(OperationContext::none());
    };

    let value = value.to_str().map_err(|_| StatusCode::BAD_REQUEST)?;
    let operation_id = value
        .trim()
        .parse::<OperationId>()
        .map_err(|_| StatusCode::BAD_REQUEST)?;

    Ok(OperationContext::new(operation_id))
}

/// Dev/test verifier: treats the bearer token as literal JSON claims.
///
/// Performs no signature verification. Deployments must inject a verifying
/// `ClaimsVerifier` implementation instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonClaimsVerifier;

impl ClaimsVerifier for JsonClaimsVerifier {
    fn verify(&self, token: &str) -> Result<AuthClaims, TokenValidationError> {
        serde_json::from_str(token).map_err(|_| TokenValidationError::Invalid)
    }
}
