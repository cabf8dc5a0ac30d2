//! Auth effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes,
//! in order. They are the only way the workflow touches the network, the
//! authorization header, the session store, navigation, or notifications.

use std::fmt;

use patadmin_types::{Credentials, Notification, RegistrationRequest, Route, Session};

use super::task::TaskId;

/// Acknowledgments broadcast to the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthSignal {
    SignInSuccess,
    SignUpSuccess,
    /// A sign-in or sign-up failed; any loading indicator can stop.
    SignFailure,
    SignedOut,
}

#[derive(Clone, PartialEq, Eq)]
pub enum AuthEffect {
    /// Spawn `POST auth/login`.
    CallSignIn { task: TaskId, credentials: Credentials },
    /// Spawn `POST auth/register`.
    CallSignUp { task: TaskId, request: RegistrationRequest },
    /// Set the default `Authorization` header to `Bearer {token}`.
    SetAuthHeader { token: String },
    ClearAuthHeader,
    StoreSession(Session),
    ClearSession,
    Navigate(Route),
    Notify(Notification),
    Signal(AuthSignal),
}

impl AuthEffect {
    pub fn is_network_call(&self) -> bool {
        matches!(
            self,
            AuthEffect::CallSignIn { .. } | AuthEffect::CallSignUp { .. }
        )
    }
}

// Tokens and passwords stay out of logs and panic messages.
impl fmt::Debug for AuthEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthEffect::CallSignIn { task, credentials } => f
                .debug_struct("CallSignIn")
                .field("task", task)
                .field("email", &credentials.email)
                .finish(),
            AuthEffect::CallSignUp { task, request } => f
                .debug_struct("CallSignUp")
                .field("task", task)
                .field("email", &request.email)
                .finish(),
            AuthEffect::SetAuthHeader { .. } => f.write_str("SetAuthHeader"),
            AuthEffect::ClearAuthHeader => f.write_str("ClearAuthHeader"),
            AuthEffect::StoreSession(session) => {
                f.debug_tuple("StoreSession").field(session).finish()
            }
            AuthEffect::ClearSession => f.write_str("ClearSession"),
            AuthEffect::Navigate(route) => f.debug_tuple("Navigate").field(route).finish(),
            AuthEffect::Notify(notification) => {
                f.debug_tuple("Notify").field(notification).finish()
            }
            AuthEffect::Signal(signal) => f.debug_tuple("Signal").field(signal).finish(),
        }
    }
}
