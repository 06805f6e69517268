//! HTTP client adapter for the LifeScope task service.
//!
//! All requests go through [`Api`], which owns the behaviour every call site
//! shares:
//!
//! - **Bearer injection**: authenticated endpoints carry
//!   `Authorization: Bearer <token>` when the session context has a token;
//!   the token and registration endpoints are always sent anonymously
//! - **Global 401 handling**: a 401 on an authenticated endpoint expires the
//!   session (clear + redirect to login) before the error reaches the caller.
//!   Call sites cannot opt out
//! - **Error mapping**: non-2xx responses become [`ApiError`] values carrying the
//!   backend's structured payload; nothing is retried
//!
//! The adapter never reads ambient state. It is handed a [`SessionContext`] at
//! construction and asks it for the token on every request.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use lifescope::api::Api;
//! use lifescope::libs::navigation::Navigator;
//! use lifescope::libs::session::SessionStore;
//! use lifescope::libs::storage::MemoryStorage;
//! use std::sync::Arc;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let navigator = Arc::new(Navigator::default());
//! let session = Arc::new(SessionStore::new(Arc::new(MemoryStorage::new()), navigator));
//! let api = Api::new("http://127.0.0.1:8000/api", session);
//! let roles = api.roles().await?;
//! # Ok(())
//! # }
//! ```

use crate::libs::error::ApiError;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;

pub mod auth;
pub mod profile;
pub mod tasks;

pub use auth::AuthResponse;
pub use profile::ProfileUpdate;
pub use tasks::{completion_patch, ToggleOutcome};

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/api";

/// What the adapter needs to know about the signed-in user.
pub trait SessionContext: Send + Sync {
    /// Token for the current session, if any. Read fresh for every request.
    fn token(&self) -> Option<String>;

    /// Invalidates the session after the server rejected its token.
    fn expire(&self);
}

/// Whether an endpoint takes the bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Anonymous,
    Authenticated,
}

/// List endpoints answer with a bare array, a paginated envelope or a `data` envelope.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum Listing<T> {
    Plain(Vec<T>),
    Paginated {
        results: Vec<T>,
    },
    Wrapped {
        data: Vec<T>,
    },
}

impl<T> Listing<T> {
    pub(crate) fn into_vec(self) -> Vec<T> {
        match self {
            Listing::Plain(items) => items,
            Listing::Paginated { results } => results,
            Listing::Wrapped { data } => data,
        }
    }
}

#[derive(Clone)]
pub struct Api {
    client: Client,
    base_url: String,
    session: Arc<dyn SessionContext>,
}

impl Api {
    pub fn new(base_url: &str, session: Arc<dyn SessionContext>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub(crate) fn request(&self, method: Method, path: &str, access: Access) -> RequestBuilder {
        tracing::debug!(%method, path, ?access, "dispatch");
        let builder = self.client.request(method, self.url(path));
        match access {
            Access::Authenticated => match self.session.token() {
                Some(token) => builder.bearer_auth(token),
                None => builder,
            },
            Access::Anonymous => builder,
        }
    }

    /// Sends a request and turns every non-2xx status into an [`ApiError`].
    pub(crate) async fn send(&self, builder: RequestBuilder, access: Access) -> Result<Response, ApiError> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        if status == StatusCode::UNAUTHORIZED && access == Access::Authenticated {
            self.session.expire();
        }
        let error = ApiError::from_response(status, &body);
        tracing::debug!(status = status.as_u16(), error = %error, "request failed");
        Err(error)
    }

    pub(crate) async fn fetch<T: DeserializeOwned>(&self, builder: RequestBuilder, access: Access) -> Result<T, ApiError> {
        let response = self.send(builder, access).await?;
        Ok(response.json::<T>().await?)
    }

    pub(crate) async fn fetch_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ApiError> {
        let builder = self.request(Method::GET, path, Access::Authenticated);
        let listing: Listing<T> = self.fetch(builder, Access::Authenticated).await?;
        Ok(listing.into_vec())
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let builder = self.request(Method::DELETE, path, Access::Authenticated);
        self.send(builder, Access::Authenticated).await?;
        Ok(())
    }
}
