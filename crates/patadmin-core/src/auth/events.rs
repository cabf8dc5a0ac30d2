//! Events consumed by the auth reducer.

use patadmin_types::{AuthIntent, LoginResponse};

use super::task::TaskCompleted;
use crate::gateway::ApiResult;

#[derive(Debug)]
pub enum AuthEvent {
    /// A user or lifecycle intent.
    Intent(AuthIntent),
    /// `POST auth/login` returned.
    SignInFinished(TaskCompleted<ApiResult<LoginResponse>>),
    /// `POST auth/register` returned.
    SignUpFinished(TaskCompleted<ApiResult<()>>),
}

impl From<AuthIntent> for AuthEvent {
    fn from(intent: AuthIntent) -> Self {
        AuthEvent::Intent(intent)
    }
}
