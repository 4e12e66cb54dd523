//! Application error model.

use thiserror::Error;

use atelier_core::DomainError;
use atelier_store::StoreError;

/// Anything an application operation can surface to the operator.
///
/// Domain errors are deterministic local refusals (validation, stock floors,
/// authorization); store errors are remote read/write failures that already
/// triggered the recovery policy by the time the caller sees them.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// State has not been loaded (or the last load failed); readable data
    /// would be stale or default, so nothing is exposed.
    #[error("catalog state not loaded")]
    NotReady,
}

impl AppError {
    /// Whether this failure came from the remote store.
    pub fn is_remote(&self) -> bool {
        matches!(self, AppError::Store(_))
    }
}
