//! Auth reducer (update function).
//!
//! All workflow state mutations happen here. The runtime calls
//! `update(state, event)` and executes the returned effects in order.

use patadmin_types::{
    AuthIntent, Credentials, LoginResponse, Notification, RegistrationRequest, Route, Session,
};

use super::effects::{AuthEffect, AuthSignal};
use super::events::AuthEvent;
use super::state::{AuthPhase, AuthState};
use super::task::{TaskCompleted, TaskKind};
use crate::gateway::{ApiError, ApiResult};

/// Shown when sign-in fails for a reason the user cannot fix.
pub const SIGN_IN_FAILED_MESSAGE: &str = "Authentication failed, please check your details";

/// Shown when sign-up fails for a reason the user cannot fix.
pub const SIGN_UP_FAILED_MESSAGE: &str = "Registration failed, please check your details";

/// The auth reducer.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(state: &mut AuthState, event: AuthEvent) -> Vec<AuthEffect> {
    match event {
        AuthEvent::Intent(intent) => handle_intent(state, intent),
        AuthEvent::SignInFinished(completed) => handle_sign_in_finished(state, completed),
        AuthEvent::SignUpFinished(completed) => handle_sign_up_finished(state, completed),
    }
}

fn handle_intent(state: &mut AuthState, intent: AuthIntent) -> Vec<AuthEffect> {
    match intent {
        AuthIntent::SignInRequested(credentials) => {
            if state.tasks.sign_in.is_running() {
                tracing::debug!("sign-in already in flight, queueing");
                state.tasks.queued_sign_ins.push_back(credentials);
                return vec![];
            }
            vec![start_sign_in(state, credentials)]
        }
        AuthIntent::SignUpRequested(request) => {
            if state.tasks.sign_up.is_running() {
                tracing::debug!("sign-up already in flight, queueing");
                state.tasks.queued_sign_ups.push_back(request);
                return vec![];
            }
            vec![start_sign_up(state, request)]
        }
        AuthIntent::SignOutRequested => {
            tracing::info!("signed out");
            state.signed_in = false;
            state.settle(AuthPhase::Unauthenticated);
            vec![
                AuthEffect::ClearAuthHeader,
                AuthEffect::ClearSession,
                AuthEffect::Navigate(Route::Root),
                AuthEffect::Signal(AuthSignal::SignedOut),
            ]
        }
        AuthIntent::SessionRehydrated(session) => rehydrate(state, session),
    }
}

fn start_sign_in(state: &mut AuthState, credentials: Credentials) -> AuthEffect {
    let task = state.task_seq.next_id();
    state.tasks.state_mut(TaskKind::SignIn).on_started(task);
    state.phase = AuthPhase::Authenticating;
    state.loading = true;
    AuthEffect::CallSignIn { task, credentials }
}

fn start_sign_up(state: &mut AuthState, request: RegistrationRequest) -> AuthEffect {
    let task = state.task_seq.next_id();
    state.tasks.state_mut(TaskKind::SignUp).on_started(task);
    state.phase = AuthPhase::Authenticating;
    state.loading = true;
    AuthEffect::CallSignUp { task, request }
}

fn handle_sign_in_finished(
    state: &mut AuthState,
    completed: TaskCompleted<ApiResult<LoginResponse>>,
) -> Vec<AuthEffect> {
    if !state.tasks.state_mut(TaskKind::SignIn).finish_if_active(completed.id) {
        tracing::debug!(task = completed.id.0, "ignoring stale sign-in result");
        return vec![];
    }

    let (mut effects, phase) = match completed.result {
        Ok(LoginResponse { token, user }) => {
            tracing::info!(user_id = user.id, "signed in");
            let effects = vec![
                AuthEffect::SetAuthHeader {
                    token: token.clone(),
                },
                AuthEffect::StoreSession(Session::authenticated(token, user)),
                AuthEffect::Navigate(Route::UsersListing),
                AuthEffect::Signal(AuthSignal::SignInSuccess),
            ];
            state.signed_in = true;
            (effects, AuthPhase::Authenticated)
        }
        Err(error) => {
            tracing::warn!(%error, "sign-in failed");
            state.signed_in = false;
            (
                failure_effects(&error, SIGN_IN_FAILED_MESSAGE),
                AuthPhase::Unauthenticated,
            )
        }
    };

    if let Some(next) = state.tasks.queued_sign_ins.pop_front() {
        effects.push(start_sign_in(state, next));
    }
    state.settle(phase);
    effects
}

fn handle_sign_up_finished(
    state: &mut AuthState,
    completed: TaskCompleted<ApiResult<()>>,
) -> Vec<AuthEffect> {
    if !state.tasks.state_mut(TaskKind::SignUp).finish_if_active(completed.id) {
        tracing::debug!(task = completed.id.0, "ignoring stale sign-up result");
        return vec![];
    }

    // Registration never signs the user in.
    let mut effects = match completed.result {
        Ok(()) => {
            tracing::info!("registered");
            vec![
                AuthEffect::Navigate(Route::Root),
                AuthEffect::Signal(AuthSignal::SignUpSuccess),
            ]
        }
        Err(error) => {
            tracing::warn!(%error, "sign-up failed");
            state.signed_in = false;
            failure_effects(&error, SIGN_UP_FAILED_MESSAGE)
        }
    };

    if let Some(next) = state.tasks.queued_sign_ups.pop_front() {
        effects.push(start_sign_up(state, next));
    }
    // A successful registration leaves any existing session alone.
    let phase = state.resting_phase();
    state.settle(phase);
    effects
}

/// Notification, reset to unauthenticated, then the failure acknowledgment.
///
/// Only `InvalidRequest` messages reach the user; everything else gets
/// `generic` so backend internals never leak.
fn failure_effects(error: &ApiError, generic: &str) -> Vec<AuthEffect> {
    let notification = match error {
        ApiError::InvalidRequest { message } => Notification::warning(message.clone()),
        ApiError::NetworkOrServerFailure { .. } => Notification::error(generic),
    };
    vec![
        AuthEffect::Notify(notification),
        AuthEffect::ClearAuthHeader,
        AuthEffect::ClearSession,
        AuthEffect::Signal(AuthSignal::SignFailure),
    ]
}

fn rehydrate(state: &mut AuthState, session: Option<Session>) -> Vec<AuthEffect> {
    match session {
        Some(Session {
            token: Some(token),
            user: Some(user),
        }) => {
            tracing::debug!(user_id = user.id, "rehydrated session");
            state.signed_in = true;
            state.settle(AuthPhase::Authenticated);
            vec![
                AuthEffect::SetAuthHeader {
                    token: token.clone(),
                },
                AuthEffect::StoreSession(Session::authenticated(token, user)),
            ]
        }
        Some(Session {
            token: None,
            user: None,
        })
        | None => {
            state.signed_in = false;
            state.settle(AuthPhase::Unauthenticated);
            vec![]
        }
        Some(_) => {
            tracing::warn!("discarding partial persisted session");
            state.signed_in = false;
            state.settle(AuthPhase::Unauthenticated);
            vec![]
        }
    }
}
