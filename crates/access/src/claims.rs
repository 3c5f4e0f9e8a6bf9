use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use selldesk_core::UserId;

use crate::identity::{Identity, PlatformRole};

/// Bearer claims model (transport-agnostic).
///
/// This is the minimal set of claims selldesk expects once a token has been
/// decoded/verified by whatever transport/security layer is in use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthClaims {
    /// Subject / user identifier.
    pub sub: UserId,

    /// Cross-tenant platform role, if any.
    #[serde(default)]
    pub platform_role: PlatformRole,

    /// Issued-at timestamp.
    pub issued_at: DateTime<Utc>,

    /// Expiration timestamp.
    pub expires_at: DateTime<Utc>,
}

impl AuthClaims {
    /// The request-scoped identity these claims establish.
    pub fn identity(&self) -> Identity {
        Identity::new(self.sub, self.platform_role)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenValidationError {
    #[error("token could not be decoded or verified")]
    Invalid,

    #[error("token has expired")]
    Expired,

    #[error("token not yet valid (issued_at is in the future)")]
    NotYetValid,

    #[error("invalid token time window (expires_at <= issued_at)")]
    InvalidTimeWindow,
}

/// Deterministically validate claims against a point in time.
///
/// Note: this validates the *claims* only. Signature verification / decoding
/// is intentionally outside this crate.
pub fn validate_claims(
    claims: &AuthClaims,
    now: DateTime<Utc>,
) -> Result<(), TokenValidationError> {
    if claims.expires_at <= claims.issued_at {
        return Err(TokenValidationError::InvalidTimeWindow);
    }
    if now < claims.issued_at {
        return Err(TokenValidationError::NotYetValid);
    }
    if now >= claims.expires_at {
        return Err(TokenValidationError::Expired);
    }
    Ok(())
}

/// Decodes and verifies a bearer token into claims.
///
/// Implementations own signature verification; the engine never sees raw
/// token material beyond this seam.
pub trait ClaimsVerifier: Send + Sync {
    fn verify(&self, token: &str) -> Result<AuthClaims, TokenValidationError>;
}
