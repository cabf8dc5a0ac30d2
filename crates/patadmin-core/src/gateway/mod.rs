//! Typed HTTP gateway to the patadmin backend.
//!
//! Every call goes through [`ApiClient`], which joins endpoint paths onto the
//! configured base URL, attaches the shared `Authorization` header, and turns
//! any failure into a classified [`ApiError`].

mod error;
mod header;

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

pub use error::{ApiError, ApiResult, is_client_correctable};
pub use header::{AuthHeaderReader, AuthHeaderWriter, auth_header};

/// Standard User-Agent header for patadmin API requests.
pub const USER_AGENT: &str = concat!("patadmin/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the backend REST API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base: Url,
    http: reqwest::Client,
    auth: AuthHeaderReader,
}

impl ApiClient {
    /// Creates a client rooted at `base` (which should end with `/`).
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(base: Url, timeout: Option<Duration>, auth: AuthHeaderReader) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to build HTTP client")?;
        Ok(Self { base, http, auth })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Whether outbound calls currently carry an `Authorization` header.
    pub fn is_authenticated(&self) -> bool {
        self.auth.is_set()
    }

    /// `GET path` with optional query pairs, decoding a JSON body.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ApiResult<T> {
        let builder = self.request(Method::GET, path)?.query(query);
        decode(self.send(builder).await?).await
    }

    /// `POST path` with a JSON body, decoding a JSON response.
    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let builder = self.request(Method::POST, path)?.json(body);
        decode(self.send(builder).await?).await
    }

    /// `POST path` with a JSON body, ignoring whatever the server returns.
    pub async fn post_json_discard<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<()> {
        let builder = self.request(Method::POST, path)?.json(body);
        self.send(builder).await.map(drop)
    }

    /// `PUT path` with a JSON body, decoding a JSON response.
    pub async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let builder = self.request(Method::PUT, path)?.json(body);
        decode(self.send(builder).await?).await
    }

    /// `DELETE path`, ignoring the response body.
    pub async fn delete(&self, path: &str) -> ApiResult<()> {
        let builder = self.request(Method::DELETE, path)?;
        self.send(builder).await.map(drop)
    }

    fn request(&self, method: Method, path: &str) -> ApiResult<RequestBuilder> {
        let url = self
            .base
            .join(path.trim_start_matches('/'))
            .map_err(|err| ApiError::failure(format!("invalid endpoint '{path}': {err}")))?;

        let mut builder = self.http.request(method, url);
        if let Some(value) = self.auth.get() {
            builder = builder.header(reqwest::header::AUTHORIZATION, value);
        }
        Ok(builder)
    }

    async fn send(&self, builder: RequestBuilder) -> ApiResult<Response> {
        let response = builder.send().await.map_err(|err| {
            let classified = ApiError::from_transport(&err);
            tracing::debug!(error = %classified, "request failed before a response");
            classified
        })?;

        let status = response.status();
        tracing::debug!(url = %response.url(), status = status.as_u16(), "api response");
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(ApiError::from_status(status, &body))
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    response
        .json::<T>()
        .await
        .map_err(|err| ApiError::from_transport(&err))
}
