//! Error types for customization sessions

use crate::state::SessionState;
use crate::store::StoreError;
use pagecraft_patch::PatchError;

/// Main session error type
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Patch could not be applied; the draft is unchanged
    #[error("patch failed: {0}")]
    Patch(#[from] PatchError),

    /// Persistence collaborator reported failure
    #[error("save failed: {0}")]
    Save(#[from] StoreError),

    /// Persistence call exceeded its bound
    #[error("save timed out after {timeout_ms}ms")]
    SaveTimeout { timeout_ms: u64 },

    /// State machine violation
    #[error("illegal state transition: {from:?} -> {to:?}")]
    IllegalTransition { from: SessionState, to: SessionState },

    /// Session already closed
    #[error("session closed")]
    Closed,
}

impl SessionError {
    /// Whether a retry of the same operation can succeed
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Save(StoreError::Unavailable(_)) | Self::SaveTimeout { .. }
        )
    }
}

/// Preview surface errors (tolerated by the session, logged only)
#[derive(Debug, thiserror::Error)]
pub enum PreviewError {
    /// Surface could not reload
    #[error("preview reload failed: {0}")]
    ReloadFailed(String),

    /// Surface never acknowledged the reload
    #[error("preview reload timed out")]
    Timeout,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_classification() {
        assert!(SessionError::SaveTimeout { timeout_ms: 10 }.is_retryable());
        assert!(SessionError::Save(StoreError::Unavailable("down".into())).is_retryable());
        assert!(!SessionError::Save(StoreError::Rejected("bad slug".into())).is_retryable());
        assert!(!SessionError::Closed.is_retryable());
    }
}
