//! Asynchronous, typed REST client core.
//!
//! # Overview
//! Each call sends one request, classifies the response status for its verb,
//! decodes the buffered JSON body into the caller's type, and returns a
//! `RestResult` carrying either the decoded value(s) or an `ErrorDetail`,
//! together with the request path, method, status, and response headers.
//!
//! # Design
//! - `RestClient` is built once from a `ClientConfig` and shared freely; its
//!   transport configuration never changes after construction.
//! - The network is behind the `Transport` trait. `ReqwestTransport` is the
//!   default; tests substitute scripted transports.
//! - Failures never escape as `Err` or panics. They are classified into four
//!   `ErrorKind`s (encode, transport, HTTP status, decode) and stored in the
//!   envelope.

pub mod classify;
pub mod client;
pub mod codec;
pub mod config;
pub mod envelope;
pub mod error;
pub mod http;
pub mod transport;

pub use classify::{classify, Classification};
pub use client::RestClient;
pub use config::ClientConfig;
pub use envelope::RestResult;
pub use error::{ConfigError, DecodeError, ErrorDetail, ErrorKind, TransportError};
pub use http::{Headers, HttpMethod, HttpRequest, HttpResponse};
pub use transport::{ReqwestTransport, Transport};
