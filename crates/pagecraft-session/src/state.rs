//! Session state machine
//!
//! `Idle → Editing → Saving → Refreshing → Idle`, with `SaveFailed` as the
//! recoverable branch back to `Editing`. The states themselves are the
//! mutual-exclusion mechanism: at most one save/refresh cycle is in flight
//! because only `Editing` (or a failed retry) may enter `Saving`.

use crate::error::SessionError;

/// Customization session states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// Draft is in sync with the last persisted state; no timers pending
    Idle,
    /// A patch was applied; the debounce timer is armed
    Editing,
    /// Debounce fired; one save is in flight
    Saving,
    /// Save acknowledged; the preview is being reloaded
    Refreshing,
    /// Save failed or timed out; draft stays dirty
    SaveFailed,
}

/// States a session may move to from `from`
#[must_use]
pub fn allowed_transitions(from: SessionState) -> Vec<SessionState> {
    use SessionState::*;
    match from {
        Idle => vec![Editing],
        Editing => vec![Saving],
        Saving => vec![Refreshing, SaveFailed],
        // Deferred edits during the save fall straight back into Editing
        Refreshing => vec![Idle, Editing],
        // Next edit re-arms; flush() retries the save directly
        SaveFailed => vec![Editing, Saving],
    }
}

/// Validate a state transition
///
/// # Errors
/// Returns `SessionError::IllegalTransition` when `to` is not reachable
/// from `from`.
pub fn validate_transition(from: SessionState, to: SessionState) -> Result<(), SessionError> {
    if allowed(from, to) {
        Ok(())
    } else {
        Err(SessionError::IllegalTransition { from, to })
    }
}

fn allowed(from: SessionState, to: SessionState) -> bool {
    allowed_transitions(from).into_iter().any(|s| s == to)
}

/// Observable session status, published on the state watch channel
///
/// Mirrors [`SessionState`] but carries the failure message so observers
/// see why a save failed without a second channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    Idle,
    Editing,
    Saving,
    Refreshing,
    /// Save failed; the draft is still dirty and retained in memory
    SaveFailed {
        /// Human-readable failure description
        message: String,
    },
}

impl SessionStatus {
    /// The state this status corresponds to
    #[inline]
    #[must_use]
    pub fn state(&self) -> SessionState {
        match self {
            Self::Idle => SessionState::Idle,
            Self::Editing => SessionState::Editing,
            Self::Saving => SessionState::Saving,
            Self::Refreshing => SessionState::Refreshing,
            Self::SaveFailed { .. } => SessionState::SaveFailed,
        }
    }
}
