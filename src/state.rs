// src/state.rs

use crate::{error::LoadErrorKind, models::review::Review};

/// Monotonic request generation. A completion only applies while the session
/// is still waiting on the token it was issued with.
pub type AttemptToken = u64;

/// Lifecycle of one quiz session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// Nothing loaded yet.
    Idle,
    Loading { token: AttemptToken },
    /// Terminal for that load attempt; a fresh load is required.
    LoadFailed(LoadErrorKind),
    Answering,
    /// Answer store is frozen and a submission is in flight.
    Submitting { token: AttemptToken },
    Reviewing(Box<Review>),
}

/// Payload-free view of [`SessionState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    LoadFailed,
    Answering,
    Submitting,
    Reviewing,
}

impl SessionState {
    pub fn phase(&self) -> Phase {
        match self {
            SessionState::Idle => Phase::Idle,
            SessionState::Loading { .. } => Phase::Loading,
            SessionState::LoadFailed(_) => Phase::LoadFailed,
            SessionState::Answering => Phase::Answering,
            SessionState::Submitting { .. } => Phase::Submitting,
            SessionState::Reviewing(_) => Phase::Reviewing,
        }
    }
}
