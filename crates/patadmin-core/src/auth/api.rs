use std::future::Future;

use patadmin_types::{Credentials, LoginResponse, RegistrationPayload, RegistrationRequest};

use crate::gateway::{ApiClient, ApiResult};

/// Backend calls the auth workflow depends on.
pub trait AuthApi: Send + Sync + 'static {
    /// `POST auth/login`.
    fn sign_in(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = ApiResult<LoginResponse>> + Send;

    /// `POST auth/register`. The response body is ignored.
    fn sign_up(&self, request: &RegistrationRequest) -> impl Future<Output = ApiResult<()>> + Send;
}

impl AuthApi for ApiClient {
    async fn sign_in(&self, credentials: &Credentials) -> ApiResult<LoginResponse> {
        self.post_json("auth/login", credentials).await
    }

    async fn sign_up(&self, request: &RegistrationRequest) -> ApiResult<()> {
        self.post_json_discard("auth/register", &RegistrationPayload::from(request))
            .await
    }
}
