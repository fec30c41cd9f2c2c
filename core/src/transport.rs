//! The boundary between the session pipeline and the network.
//!
//! # Design
//! `HttpTransport` is the only place I/O happens. The session hands it the
//! fully adapted `HttpRequest` and gets back response metadata plus the raw
//! payload. `ReqwestTransport` is the default; tests and hosts with their
//! own client plug in through `SessionManager::with_transport`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::http::{HttpRequest, HttpResponse};

/// Performs one HTTP round-trip.
///
/// Implementations must not retry; a failure is reported as-is.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: &HttpRequest) -> Result<(HttpResponse, Vec<u8>), SessionError>;
}

/// `HttpTransport` backed by a single `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(config: &SessionConfig) -> Result<Self, SessionError> {
        let default_headers = header_map(&config.default_headers)?;
        let mut builder = reqwest::Client::builder().default_headers(default_headers);
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.as_str());
        }
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = config.connect_timeout_secs {
            builder = builder.connect_timeout(Duration::from_secs(secs));
        }

        let client = builder.build().map_err(SessionError::transport)?;
        Ok(Self { client })
    }

    /// Wrap an existing client, keeping its configuration.
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::from_client(reqwest::Client::new())
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: &HttpRequest) -> Result<(HttpResponse, Vec<u8>), SessionError> {
        let method = reqwest::Method::from_bytes(request.method.as_str().as_bytes())
            .map_err(SessionError::transport)?;

        let headers = header_map(request.headers())?;
        let mut builder = self
            .client
            .request(method, request.url.clone())
            .headers(headers);
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().await.map_err(SessionError::transport)?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let payload = response.bytes().await.map_err(SessionError::transport)?;

        Ok((HttpResponse { status, headers }, payload.to_vec()))
    }
}

/// Convert header pairs into a `HeaderMap`, keeping every value.
///
/// Names that collide only after lower-casing are appended rather than
/// overwritten.
fn header_map(pairs: &[(String, String)]) -> Result<HeaderMap, SessionError> {
    let mut headers = HeaderMap::with_capacity(pairs.len());
    for (name, value) in pairs {
        let (name, value) = header_pair(name, value)?;
        headers.append(name, value);
    }
    Ok(headers)
}

fn header_pair(name: &str, value: &str) -> Result<(HeaderName, HeaderValue), SessionError> {
    let invalid = || SessionError::InvalidHeader {
        name: name.to_string(),
    };
    let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
    let header_value = HeaderValue::from_str(value).map_err(|_| invalid())?;
    Ok((header_name, header_value))
}
