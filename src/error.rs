//! Error types shared by the backends and the engine.
//!
//! Not-found is never an error here: a missing id is reported as `false`
//! or `None` by the operation itself.

use thiserror::Error;

/// Failures raised by a queue or metadata backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// The backing store could not be reached. The outcome of the call is
    /// unknown; re-check with `queue_size` or `can_allocate`.
    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

/// Errors surfaced by [`crate::engine::AllocationEngine`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocationError {
    #[error(transparent)]
    Backend(#[from] BackendError),
}

pub type Result<T, E = AllocationError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_error_converts() {
        let err: AllocationError = BackendError::Unavailable("timeout".into()).into();

        assert_eq!(err.to_string(), "backend unavailable: timeout");
    }
}
