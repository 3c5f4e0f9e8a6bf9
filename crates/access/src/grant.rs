use core::str::FromStr;

use serde::{Deserialize, Serialize};

use selldesk_core::{DomainError, OperationId, UserId};

use crate::permissions::PermissionSet;

/// Role a member holds within one operation.
///
/// A closed enumeration: an unrecognized role string is rejected at the
/// parsing boundary instead of silently falling through to denial somewhere
/// deep in the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationRole {
    Owner,
    Admin,
    Viewer,
}

impl OperationRole {
    pub const ALL: [OperationRole; 3] = [
        OperationRole::Owner,
        OperationRole::Admin,
        OperationRole::Viewer,
    ];

    /// Owners and admins hold every module/action unconditionally.
    pub fn is_operation_admin(self) -> bool {
        matches!(self, OperationRole::Owner | OperationRole::Admin)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OperationRole::Owner => "owner",
            OperationRole::Admin => "admin",
            OperationRole::Viewer => "viewer",
        }
    }
}

impl core::fmt::Display for OperationRole {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "owner" => Ok(OperationRole::Owner),
            "admin" => Ok(OperationRole::Admin),
            "viewer" => Ok(OperationRole::Viewer),
            other => Err(DomainError::validation(format!(
                "unknown operation role: {other}"
            ))),
        }
    }
}

/// The unit of operation authorization: binds one user to one operation.
///
/// # Invariants
/// - At most one grant exists per `(user_id, operation_id)` pair.
/// - `permissions` stays `None` until explicitly customized. Once present it
///   fully replaces the role baseline for viewers, even when empty.
///
/// Lifecycle: created when an invitation is accepted, mutated by an
/// owner/admin of the same operation, deleted when the member is removed.
/// All of that happens in the grant-management workflow; this crate only
/// reads the resulting rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessGrant {
    pub user_id: UserId,
    pub operation_id: OperationId,
    pub role: OperationRole,
    #[serde(default)]
    pub permissions: Option<PermissionSet>,
}

impl AccessGrant {
    pub fn new(user_id: UserId, operation_id: OperationId, role: OperationRole) -> Self {
        Self {
            user_id,
            operation_id,
            role,
            permissions: None,
        }
    }

    pub fn with_permissions(mut self, permissions: PermissionSet) -> Self {
        self.permissions = Some(permissions);
        self
    }

    pub fn key(&self) -> (UserId, OperationId) {
        (self.user_id, self.operation_id)
    }
}
