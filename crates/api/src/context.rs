use selldesk_access::Identity;
use selldesk_core::OperationId;

/// Authenticated identity for a request.
///
/// Established once by the auth middleware; immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentityContext {
    identity: Identity,
}

impl IdentityContext {
    pub fn new(identity: Identity) -> Self {
        Self { identity }
    }

    pub fn identity(&self) -> Identity {
        self.identity
    }
}

/// Operation scope for a request.
///
/// Absent for platform-level calls; every operation-scoped check requires it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationContext {
    operation_id: Option<OperationId>,
}

impl OperationContext {
    pub fn new(operation_id: OperationId) -> Self {
        Self {
            operation_id: Some(operation_id),
        }
    }

    pub fn none() -> Self {
        Self { operation_id: None }
    }

    pub fn operation_id(&self) -> Option<OperationId> {
        self.operation_id
    }
}
