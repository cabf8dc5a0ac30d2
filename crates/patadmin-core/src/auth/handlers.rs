//! Async handlers for network-bound auth effects.
//!
//! Each handler is a plain async function: the runtime spawns it and sends
//! the returned event to its inbox.

use std::future::Future;
use std::sync::Arc;

use patadmin_types::{Credentials, RegistrationRequest};

use super::api::AuthApi;
use super::events::AuthEvent;
use super::task::{TaskCompleted, TaskId};
use crate::gateway::{ApiError, ApiResult};

pub async fn sign_in<A: AuthApi>(
    api: Arc<A>,
    task: TaskId,
    credentials: Credentials,
) -> AuthEvent {
    let result = guarded(async move { api.sign_in(&credentials).await }).await;
    AuthEvent::SignInFinished(TaskCompleted { id: task, result })
}

pub async fn sign_up<A: AuthApi>(
    api: Arc<A>,
    task: TaskId,
    request: RegistrationRequest,
) -> AuthEvent {
    let result = guarded(async move { api.sign_up(&request).await }).await;
    AuthEvent::SignUpFinished(TaskCompleted { id: task, result })
}

/// Runs `call` on its own task so a panic still yields a completion.
async fn guarded<T, F>(call: F) -> ApiResult<T>
where
    T: Send + 'static,
    F: Future<Output = ApiResult<T>> + Send + 'static,
{
    match tokio::spawn(call).await {
        Ok(result) => result,
        Err(err) => {
            tracing::error!(error = %err, "auth call aborted");
            Err(ApiError::failure(format!("auth call aborted: {err}")))
        }
    }
}
