//! The session manager: builds requests, runs adapters, dispatches.
//!
//! # Design
//! Every verb follows the same pipeline:
//!
//! 1. resolve the path against `base_url` and build a draft `HttpRequest`,
//!    encoding the body through the configured `RequestEncoder` if there is one;
//! 2. fold the adapters over the draft, strictly in insertion order;
//! 3. hand the final request to the transport, exactly once;
//! 4. wrap request, metadata and payload into a `Response`.
//!
//! Any stage may fail and nothing after it runs. There is no retry.
//!
//! Verbs borrow the session immutably while reconfiguration (`set_base_url`,
//! `add_adapter`, `set_encoder`, ...) needs `&mut self`, so the borrow checker
//! rules out changing the configuration under an in-flight call. Concurrent
//! calls on one session share only the read-only configuration and transport.

use serde::Serialize;
use tracing::{debug, trace, warn};
use url::Url;
use uuid::Uuid;

use crate::adapter::RequestAdapter;
use crate::config::SessionConfig;
use crate::encoder::RequestEncoder;
use crate::error::SessionError;
use crate::http::{HttpMethod, HttpRequest};
use crate::resolve::resolve_url;
use crate::response::Response;
use crate::transport::{HttpTransport, ReqwestTransport};

/// Performs HTTP requests relative to an optional base URL.
pub struct SessionManager {
    base_url: Option<Url>,
    unique_id: String,
    config: SessionConfig,
    adapters: Vec<Box<dyn RequestAdapter>>,
    encoder: Option<Box<dyn RequestEncoder>>,
    transport: Box<dyn HttpTransport>,
}

impl SessionManager {
    /// Create a session with the default configuration and HTTP client.
    pub fn new(base_url: Option<Url>) -> Self {
        Self::with_transport(base_url, SessionConfig::default(), ReqwestTransport::default())
    }

    /// Create a session whose HTTP client is built from `config`.
    pub fn with_config(base_url: Option<Url>, config: SessionConfig) -> Result<Self, SessionError> {
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self::with_transport(base_url, config, transport))
    }

    /// Create a session that dispatches through `transport`.
    ///
    /// `config` is recorded as-is; applying it is up to the transport.
    pub fn with_transport(
        base_url: Option<Url>,
        config: SessionConfig,
        transport: impl HttpTransport + 'static,
    ) -> Self {
        Self {
            base_url,
            unique_id: Uuid::new_v4().to_string(),
            config,
            adapters: Vec::new(),
            encoder: None,
            transport: Box::new(transport),
        }
    }

    /// Replace the randomly generated id.
    pub fn with_unique_id(mut self, unique_id: impl Into<String>) -> Self {
        self.unique_id = unique_id.into();
        self
    }

    pub fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }

    pub fn set_base_url(&mut self, base_url: Option<Url>) {
        self.base_url = base_url;
    }

    pub fn unique_id(&self) -> &str {
        &self.unique_id
    }

    pub fn session_description(&self) -> String {
        format!("session-core.session.{}", self.unique_id)
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Append an adapter. Adapters run in the order they were added.
    pub fn add_adapter(&mut self, adapter: impl RequestAdapter + 'static) {
        self.adapters.push(Box::new(adapter));
    }

    pub fn clear_adapters(&mut self) {
        self.adapters.clear();
    }

    pub fn adapter_count(&self) -> usize {
        self.adapters.len()
    }

    pub fn set_encoder(&mut self, encoder: impl RequestEncoder + 'static) {
        self.encoder = Some(Box::new(encoder));
    }

    pub fn clear_encoder(&mut self) {
        self.encoder = None;
    }

    pub fn has_encoder(&self) -> bool {
        self.encoder.is_some()
    }

    /// Build a draft request without a body.
    ///
    /// # Panics
    /// Panics if `path` is empty and no base URL is set.
    pub fn create_request(&self, path: &str, method: HttpMethod) -> Result<HttpRequest, SessionError> {
        let url = resolve_url(self.base_url.as_ref(), path)?;
        Ok(HttpRequest::new(method, url))
    }

    /// Build a draft request and encode `body` into it.
    ///
    /// Fails with `ConfigurationError` if no encoder is set.
    ///
    /// # Panics
    /// Panics if `path` is empty and no base URL is set.
    pub fn create_request_with_body<B>(
        &self,
        path: &str,
        body: &B,
        method: HttpMethod,
    ) -> Result<HttpRequest, SessionError>
    where
        B: Serialize + ?Sized,
    {
        let url = resolve_url(self.base_url.as_ref(), path)?;
        let encoder = self.encoder.as_deref().ok_or_else(|| {
            SessionError::ConfigurationError(
                "cannot perform requests with a body without setting a RequestEncoder".to_string(),
            )
        })?;

        encoder.encode(&body, HttpRequest::new(method, url), self)
    }

    pub async fn get(&self, path: &str) -> Result<Response, SessionError> {
        self.request(path, HttpMethod::Get).await
    }

    pub async fn head(&self, path: &str) -> Result<Response, SessionError> {
        self.request(path, HttpMethod::Head).await
    }

    pub async fn delete(&self, path: &str) -> Result<Response, SessionError> {
        self.request(path, HttpMethod::Delete).await
    }

    pub async fn post<B>(&self, path: &str, body: &B) -> Result<Response, SessionError>
    where
        B: Serialize + ?Sized,
    {
        self.request_with_body(path, body, HttpMethod::Post).await
    }

    pub async fn put<B>(&self, path: &str, body: &B) -> Result<Response, SessionError>
    where
        B: Serialize + ?Sized,
    {
        self.request_with_body(path, body, HttpMethod::Put).await
    }

    pub async fn patch<B>(&self, path: &str, body: &B) -> Result<Response, SessionError>
    where
        B: Serialize + ?Sized,
    {
        self.request_with_body(path, body, HttpMethod::Patch).await
    }

    /// Run the full pipeline for a request without a body.
    #[tracing::instrument(level = "debug", skip(self), fields(session = %self.unique_id))]
    pub async fn request(&self, path: &str, method: HttpMethod) -> Result<Response, SessionError> {
        let request = self
            .create_request(path, method)
            .inspect_err(|e| warn!(error = %e, "failed to build request"))?;
        self.execute(request).await
    }

    /// Run the full pipeline for a request with an encoded body.
    #[tracing::instrument(level = "debug", skip(self, body), fields(session = %self.unique_id))]
    pub async fn request_with_body<B>(
        &self,
        path: &str,
        body: &B,
        method: HttpMethod,
    ) -> Result<Response, SessionError>
    where
        B: Serialize + ?Sized,
    {
        let request = self
            .create_request_with_body(path, body, method)
            .inspect_err(|e| warn!(error = %e, "failed to build request"))?;
        self.execute(request).await
    }

    async fn execute(&self, request: HttpRequest) -> Result<Response, SessionError> {
        let request = self
            .adapt(request)
            .await
            .inspect_err(|e| warn!(error = %e, "adapter aborted request"))?;

        debug!(url = %request.url, headers = request.headers().len(), "dispatching request");
        let (http_response, data) = self
            .transport
            .send(&request)
            .await
            .inspect_err(|e| warn!(error = %e, "transport failed"))?;
        debug!(status = http_response.status, bytes = data.len(), "received response");

        Ok(Response::new(request, http_response, data))
    }

    async fn adapt(&self, request: HttpRequest) -> Result<HttpRequest, SessionError> {
        let mut request = request;
        for (index, adapter) in self.adapters.iter().enumerate() {
            trace!(index, "applying adapter");
            request = adapter.adapt(request, self).await?;
        }
        Ok(request)
    }
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("base_url", &self.base_url.as_ref().map(Url::as_str))
            .field("unique_id", &self.unique_id)
            .field("config", &self.config)
            .field("adapters", &self.adapters.len())
            .field("has_encoder", &self.encoder.is_some())
            .finish_non_exhaustive()
    }
}
