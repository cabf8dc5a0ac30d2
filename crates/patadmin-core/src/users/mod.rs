//! User administration: listing, lookup and CRUD over the backend, plus the
//! presentation rules around them (pagination, role gating, form checks).

mod form;
mod pagination;
mod permissions;

use patadmin_types::{UserDraft, UserPage, UserRecord};

pub use form::{FieldError, UserForm};
pub use pagination::{Pagination, UserQuery};
pub use permissions::{Action, Permissions};

use crate::gateway::{ApiClient, ApiResult};

/// Users endpoints. Every call carries the shared `Authorization` header.
#[derive(Debug, Clone)]
pub struct UsersApi {
    client: ApiClient,
}

impl UsersApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// `GET users?page=&limit=&search=`
    pub async fn list(&self, query: &UserQuery) -> ApiResult<UserPage> {
        self.client.get_json("users", &query.to_pairs()).await
    }

    pub async fn get(&self, id: u64) -> ApiResult<UserRecord> {
        self.client.get_json(&format!("users/{id}"), &[]).await
    }

    pub async fn create(&self, draft: &UserDraft) -> ApiResult<UserRecord> {
        self.client.post_json("users", draft).await
    }

    pub async fn update(&self, id: u64, draft: &UserDraft) -> ApiResult<UserRecord> {
        self.client.put_json(&format!("users/{id}"), draft).await
    }

    pub async fn remove(&self, id: u64) -> ApiResult<()> {
        self.client.delete(&format!("users/{id}")).await
    }
}
