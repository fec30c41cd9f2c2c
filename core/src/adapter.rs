//! Request adapters: pipeline stages that rewrite a draft before dispatch.
//!
//! Adapters run strictly in the order they were added to the session, each
//! one receiving the output of the previous. A signing adapter can therefore
//! rely on headers set by an auth adapter registered before it.

use async_trait::async_trait;

use crate::error::SessionError;
use crate::http::HttpRequest;
use crate::session::SessionManager;

/// Rewrites a request before it is sent.
///
/// Returning an error aborts the call; the partially adapted request is
/// never dispatched.
#[async_trait]
pub trait RequestAdapter: Send + Sync {
    async fn adapt(
        &self,
        request: HttpRequest,
        session: &SessionManager,
    ) -> Result<HttpRequest, SessionError>;
}

/// Sets a fixed header on every request.
#[derive(Debug, Clone)]
pub struct HeaderAdapter {
    name: String,
    value: String,
}

impl HeaderAdapter {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

#[async_trait]
impl RequestAdapter for HeaderAdapter {
    async fn adapt(
        &self,
        request: HttpRequest,
        _session: &SessionManager,
    ) -> Result<HttpRequest, SessionError> {
        Ok(request.with_header(self.name.as_str(), self.value.as_str()))
    }
}

/// Sets `Authorization: Bearer <token>`.
#[derive(Clone)]
pub struct BearerAuthAdapter {
    token: String,
}

impl BearerAuthAdapter {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

// Keeps the token out of logs.
impl std::fmt::Debug for BearerAuthAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BearerAuthAdapter").finish_non_exhaustive()
    }
}

#[async_trait]
impl RequestAdapter for BearerAuthAdapter {
    async fn adapt(
        &self,
        request: HttpRequest,
        _session: &SessionManager,
    ) -> Result<HttpRequest, SessionError> {
        Ok(request.with_header("Authorization", format!("Bearer {}", self.token)))
    }
}
