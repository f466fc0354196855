//! Error types for the REST client.
//!
//! # Design
//! Every failure a call can hit is one of four kinds: the payload could not
//! be encoded, the transport produced no response, the status was rejected,
//! or an accepted body could not be decoded. Each stage raises a `Fault`
//! and `ErrorDetail::from` turns it into the `ErrorDetail` stored in the
//! result envelope. Callers branch on `ErrorDetail::kind` and never need to
//! downcast the cause.

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

type Cause = Arc<dyn StdError + Send + Sync>;

/// Category of a failed call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The response status was not accepted for the verb.
    HttpStatus,
    /// An accepted response body was not valid JSON for the target type.
    Decode,
    /// The transport failed to obtain a response.
    Transport,
    /// The request payload could not be serialized.
    Encode,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::HttpStatus => "http-status",
            ErrorKind::Decode => "decode",
            ErrorKind::Transport => "transport",
            ErrorKind::Encode => "encode",
        };
        f.write_str(name)
    }
}

/// Structured failure attached to an unsuccessful result.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct ErrorDetail {
    kind: ErrorKind,
    status_code: Option<u16>,
    message: String,
    #[source]
    cause: Option<Cause>,
}

impl ErrorDetail {
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The rejected status. Only set for `ErrorKind::HttpStatus`.
    pub fn status_code(&self) -> Option<u16> {
        self.status_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The underlying failure, kept for diagnostics only.
    pub fn cause(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.cause.as_deref()
    }
}

/// The response body could not be decoded into the requested type.
#[derive(Debug, thiserror::Error)]
#[error("failed to decode response body at '{path}': {source}")]
pub struct DecodeError {
    path: String,
    #[source]
    source: serde_json::Error,
}

impl DecodeError {
    pub(crate) fn new(path: String, source: serde_json::Error) -> Self {
        Self { path, source }
    }

    /// Location of the failure inside the document, `.` for the root.
    pub fn path(&self) -> &str {
        &self.path
    }
}

/// The transport could not produce a response.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Failure reported by the reqwest client: connect, timeout, body read.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Failure reported by a custom transport.
    #[error("{0}")]
    Other(String),
}

impl TransportError {
    pub fn is_timeout(&self) -> bool {
        match self {
            TransportError::Request(err) => err.is_timeout(),
            TransportError::Other(_) => false,
        }
    }
}

/// Client construction failed. This is the only error not reported through
/// a result envelope.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid header name '{name}': {source}")]
    InvalidHeaderName {
        name: String,
        #[source]
        source: reqwest::header::InvalidHeaderName,
    },

    #[error("invalid value for header '{name}': {source}")]
    InvalidHeaderValue {
        name: String,
        #[source]
        source: reqwest::header::InvalidHeaderValue,
    },

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// A failure raised by one pipeline stage.
#[derive(Debug, thiserror::Error)]
pub(crate) enum Fault {
    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),

    #[error("server responded with status {}", status_line(.status))]
    HttpStatus { status: u16 },

    #[error("{0}")]
    Decode(#[from] DecodeError),
}

impl Fault {
    pub(crate) fn kind(&self) -> ErrorKind {
        match self {
            Fault::Encode(_) => ErrorKind::Encode,
            Fault::Transport(_) => ErrorKind::Transport,
            Fault::HttpStatus { .. } => ErrorKind::HttpStatus,
            Fault::Decode(_) => ErrorKind::Decode,
        }
    }
}

/// `418 I'm a teapot`, or just the code when it has no canonical reason.
fn status_line(status: &u16) -> String {
    match reqwest::StatusCode::from_u16(*status)
        .ok()
        .and_then(|code| code.canonical_reason())
    {
        Some(reason) => format!("{status} {reason}"),
        None => status.to_string(),
    }
}

impl From<Fault> for ErrorDetail {
    fn from(fault: Fault) -> Self {
        let kind = fault.kind();
        let message = fault.to_string();
        let (status_code, cause) = match fault {
            Fault::Encode(err) => (None, Some(Arc::new(err) as Cause)),
            Fault::Transport(err) => (None, Some(Arc::new(err) as Cause)),
            Fault::HttpStatus { status } => (Some(status), None),
            Fault::Decode(err) => (None, Some(Arc::new(err) as Cause)),
        };
        ErrorDetail {
            kind,
            status_code,
            message,
            cause,
        }
    }
}
