use std::sync::Arc;

use thiserror::Error;

use selldesk_core::{OperationId, UserId};

use crate::grant::AccessGrant;

/// Grant store fault.
///
/// Infrastructure failures only. A missing grant is `Ok(None)`, never an
/// error: absence resolves to a clean denial, while a fault must fail closed
/// *and* surface to the caller as an internal error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccessStoreError {
    #[error("grant store unavailable: {0}")]
    Unavailable(String),
}

/// Durable lookup of at most one grant per `(user, operation)` pair.
///
/// Implementations must serve consistent point reads; the resolver performs
/// no locking of its own. Grant mutations are single-row upserts/deletes in
/// the external grant-management workflow.
pub trait AccessStore: Send + Sync {
    fn grant_for(
        &self,
        user_id: UserId,
        operation_id: OperationId,
    ) -> Result<Option<AccessGrant>, AccessStoreError>;
}

impl<S> AccessStore for Arc<S>
where
    S: AccessStore + ?Sized,
{
    fn grant_for(
        &self,
        user_id: UserId,
        operation_id: OperationId,
    ) -> Result<Option<AccessGrant>, AccessStoreError> {
        (**self).grant_for(user_id, operation_id)
    }
}
