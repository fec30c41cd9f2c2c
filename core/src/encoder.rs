//! Request encoders: serialize a body value into a draft request.
//!
//! # Design
//! The session holds its encoder as a trait object, so the caller's body is
//! passed through `erased_serde`. The encoder serializes the caller's own
//! value with whatever format it implements; nothing is converted to an
//! intermediate representation on the way.

use erased_serde::Serialize;

use crate::error::SessionError;
use crate::http::HttpRequest;
use crate::session::SessionManager;

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=UTF-8";

/// Writes a body into a request, along with the headers that describe it.
///
/// Failures must be returned, never turned into an empty payload.
pub trait RequestEncoder: Send + Sync {
    fn encode(
        &self,
        body: &dyn Serialize,
        request: HttpRequest,
        session: &SessionManager,
    ) -> Result<HttpRequest, SessionError>;
}

/// Encodes bodies as JSON and sets `Content-Type: application/json; charset=UTF-8`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRequestEncoder {
    pretty: bool,
}

impl JsonRequestEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit indented JSON instead of the compact form.
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl RequestEncoder for JsonRequestEncoder {
    fn encode(
        &self,
        body: &dyn Serialize,
        mut request: HttpRequest,
        _session: &SessionManager,
    ) -> Result<HttpRequest, SessionError> {
        let bytes = if self.pretty {
            serde_json::to_vec_pretty(body)
        } else {
            serde_json::to_vec(body)
        }
        .map_err(|e| SessionError::SerializationError(Box::new(e)))?;

        request.body = Some(bytes);
        request.set_header("Content-Type", JSON_CONTENT_TYPE);
        Ok(request)
    }
}
