//! Collaborator error kinds.
//!
//! Every collaborator call returns `Result<T, CollaboratorError>` so the
//! degradation path is visible at the call site: the orchestrator never
//! aborts an investigation because a collaborator failed, it substitutes
//! the documented fallback value and keeps going.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CollaboratorError {
    /// The call did not complete within the configured timeout.
    #[error("collaborator call timed out")]
    Timeout,

    /// The collaborator cannot be reached at all.
    #[error("collaborator unavailable: {0}")]
    Unavailable(String),

    /// The collaborator ran but could not produce a result.
    #[error("collaborator failed: {0}")]
    Failed(String),
}
