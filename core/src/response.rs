//! Completed responses and on-demand decoding of their payload.
//!
//! # Design
//! A `Response` is built once per finished call and never mutated. Decoding
//! is left to the caller: `Response::decode` first checks that the payload
//! can be viewed as the decoder's input representation (`[u8]` or `str`).
//! When it cannot, the caller paired the wrong decoder with this response
//! and the result is `Ok(None)`; a malformed payload for a compatible
//! decoder is a `DeserializationError`.

use serde::de::DeserializeOwned;

use crate::error::SessionError;
use crate::http::{HttpRequest, HttpResponse};

/// A view of the raw payload that a decoder accepts as input.
pub trait PayloadInput {
    /// Borrow `payload` as `Self`, or `None` if its representation does not fit.
    fn from_payload(payload: &[u8]) -> Option<&Self>;
}

impl PayloadInput for [u8] {
    fn from_payload(payload: &[u8]) -> Option<&Self> {
        Some(payload)
    }
}

impl PayloadInput for str {
    fn from_payload(payload: &[u8]) -> Option<&Self> {
        std::str::from_utf8(payload).ok()
    }
}

/// Parses a payload into a typed value.
pub trait ResponseDecoder {
    type Input: PayloadInput + ?Sized;
    type Error: std::error::Error + Send + Sync + 'static;

    fn decode<T: DeserializeOwned>(&self, input: &Self::Input) -> Result<T, Self::Error>;
}

/// Decodes JSON straight from the payload bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDecoder;

impl ResponseDecoder for JsonDecoder {
    type Input = [u8];
    type Error = serde_json::Error;

    fn decode<T: DeserializeOwned>(&self, input: &[u8]) -> Result<T, Self::Error> {
        serde_json::from_slice(input)
    }
}

/// Decodes JSON from the payload as UTF-8 text.
///
/// Payloads that are not valid UTF-8 are not text, so this decoder yields no
/// result for them.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonTextDecoder;

impl ResponseDecoder for JsonTextDecoder {
    type Input = str;
    type Error = serde_json::Error;

    fn decode<T: DeserializeOwned>(&self, input: &str) -> Result<T, Self::Error> {
        serde_json::from_str(input)
    }
}

/// The request that was sent, the response metadata, and the raw payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    request: HttpRequest,
    http_response: HttpResponse,
    data: Vec<u8>,
}

impl Response {
    pub fn new(request: HttpRequest, http_response: HttpResponse, data: Vec<u8>) -> Self {
        Self {
            request,
            http_response,
            data,
        }
    }

    /// The request as it was dispatched, after encoding and all adapters.
    pub fn request(&self) -> &HttpRequest {
        &self.request
    }

    pub fn http_response(&self) -> &HttpResponse {
        &self.http_response
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn status(&self) -> u16 {
        self.http_response.status
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.http_response.status)
    }

    /// The payload as UTF-8 text, if it is valid UTF-8.
    pub fn text(&self) -> Option<&str> {
        std::str::from_utf8(&self.data).ok()
    }

    pub fn into_parts(self) -> (HttpRequest, HttpResponse, Vec<u8>) {
        (self.request, self.http_response, self.data)
    }

    /// Decode the payload into `T` with `decoder`.
    ///
    /// Returns `Ok(None)` when the payload cannot be presented as the
    /// decoder's input type. Parse failures are returned as
    /// `SessionError::DeserializationError`.
    pub fn decode<T, D>(&self, decoder: &D) -> Result<Option<T>, SessionError>
    where
        T: DeserializeOwned,
        D: ResponseDecoder,
    {
        let Some(input) = D::Input::from_payload(&self.data) else {
            tracing::debug!(
                payload_len = self.data.len(),
                "payload does not match decoder input representation"
            );
            return Ok(None);
        };
        decoder
            .decode(input)
            .map(Some)
            .map_err(|e| SessionError::DeserializationError(Box::new(e)))
    }
}
