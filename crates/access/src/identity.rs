use core::str::FromStr;

use serde::{Deserialize, Serialize};

use selldesk_core::{DomainError, UserId};

/// Cross-tenant platform role carried by an authenticated identity.
///
/// `Admin` and `SuperAdmin` are a global override: they bypass every
/// operation-scoped check, independent of grant state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlatformRole {
    #[default]
    None,
    Admin,
    SuperAdmin,
}

impl PlatformRole {
    pub fn bypasses_operation_checks(self) -> bool {
        matches!(self, PlatformRole::Admin | PlatformRole::SuperAdmin)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PlatformRole::None => "none",
            PlatformRole::Admin => "admin",
            PlatformRole::SuperAdmin => "super_admin",
        }
    }
}

impl core::fmt::Display for PlatformRole {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlatformRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(PlatformRole::None),
            "admin" => Ok(PlatformRole::Admin),
            "super_admin" => Ok(PlatformRole::SuperAdmin),
            other => Err(DomainError::validation(format!(
                "unknown platform role: {other}"
            ))),
        }
    }
}

/// Caller attributes needed for authorization decisions.
///
/// Immutable for the lifetime of a request; constructed once by the identity
/// layer and passed by reference into the resolver and guards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: UserId,
    pub platform_role: PlatformRole,
}

impl Identity {
    pub fn new(user_id: UserId, platform_role: PlatformRole) -> Self {
        Self {
            user_id,
            platform_role,
        }
    }

    /// An identity with no platform privileges (the common case).
    pub fn user(user_id: UserId) -> Self {
        Self::new(user_id, PlatformRole::None)
    }
}
