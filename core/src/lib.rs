//! A thin request pipeline over an async HTTP client.
//!
//! # Overview
//! `SessionManager` resolves a path against its base URL, builds a draft
//! `HttpRequest`, optionally encodes a body into it, folds the configured
//! `RequestAdapter`s over it in order, and dispatches it once through an
//! `HttpTransport`. The result is an immutable `Response` that can be decoded
//! on demand.
//!
//! # Design
//! - Adapters, encoders, decoders and the transport are traits injected by
//!   the caller; `HeaderAdapter`, `BearerAuthAdapter`, `JsonRequestEncoder`,
//!   `JsonDecoder` and `ReqwestTransport` are the provided implementations.
//! - Every stage fails fast with a `SessionError`; nothing is retried.
//! - An empty path on a session without a base URL is a programming error
//!   and panics.
//!
//! ```no_run
//! # async fn run() -> Result<(), session_core::SessionError> {
//! use session_core::{BearerAuthAdapter, JsonDecoder, JsonRequestEncoder, SessionManager};
//! use url::Url;
//!
//! let base = Url::parse("https://jsonplaceholder.typicode.com").expect("valid url");
//! let mut session = SessionManager::new(Some(base));
//! session.set_encoder(JsonRequestEncoder::new());
//! session.add_adapter(BearerAuthAdapter::new("token"));
//!
//! let posts: Option<Vec<serde_json::Value>> = session.get("/posts").await?.decode(&JsonDecoder)?;
//! # let _ = posts;
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod config;
pub mod encoder;
pub mod error;
pub mod http;
pub mod resolve;
pub mod response;
pub mod session;
pub mod transport;

pub use adapter::{BearerAuthAdapter, HeaderAdapter, RequestAdapter};
pub use config::SessionConfig;
pub use encoder::{JsonRequestEncoder, RequestEncoder, JSON_CONTENT_TYPE};
pub use error::{BoxError, Result, SessionError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use resolve::resolve_url;
pub use response::{JsonDecoder, JsonTextDecoder, PayloadInput, Response, ResponseDecoder};
pub use session::SessionManager;
pub use transport::{HttpTransport, ReqwestTransport};
pub use erased_serde;
pub use url::Url;
