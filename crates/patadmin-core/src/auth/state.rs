use super::task::{TaskSeq, Tasks};

/// Where the workflow stands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthPhase {
    /// Nothing has happened yet (no rehydration, no intent).
    #[default]
    Idle,
    /// A sign-in or sign-up call is in flight.
    Authenticating,
    Authenticated,
    Unauthenticated,
}

/// Reducer-owned workflow state.
#[derive(Debug, Default)]
pub struct AuthState {
    pub phase: AuthPhase,
    /// True while a sign-in/sign-up call is in flight.
    pub loading: bool,
    /// Whether the last settled outcome left a session in place.
    pub signed_in: bool,
    pub task_seq: TaskSeq,
    pub tasks: Tasks,
}

impl AuthState {
    /// Nothing running and nothing queued.
    pub fn is_idle(&self) -> bool {
        !self.tasks.is_any_running() && self.tasks.queued() == 0
    }

    /// Settles phase and loading after a task finished. While another call is
    /// still in flight the workflow stays `Authenticating`.
    pub(super) fn settle(&mut self, phase: AuthPhase) {
        if self.tasks.is_any_running() {
            self.phase = AuthPhase::Authenticating;
            self.loading = true;
        } else {
            self.phase = phase;
            self.loading = false;
        }
    }

    /// Phase to settle on when an outcome leaves the session untouched.
    pub(super) fn resting_phase(&self) -> AuthPhase {
        if self.signed_in {
            AuthPhase::Authenticated
        } else {
            AuthPhase::Unauthenticated
        }
    }
}
