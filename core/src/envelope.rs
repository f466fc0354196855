//! The uniform result returned by every client call.
//!
//! # Design
//! `EnvelopeBuilder` is created when a call starts and is owned by that call
//! alone. Stages record what they learn (response status and headers) and the
//! call ends by consuming the builder into a `RestResult`, either with the
//! decoded payload or with the first fault that occurred. A `RestResult` has
//! no mutating methods, so a returned value never changes under its reader.

use tracing::warn;

use crate::error::{ErrorDetail, Fault};
use crate::http::{Headers, HttpMethod};

/// Outcome of a single REST call plus its request/response metadata.
#[derive(Debug, Clone)]
pub struct RestResult<T> {
    value: Option<T>,
    values: Option<Vec<T>>,
    error: Option<ErrorDetail>,
    request_path: String,
    method: HttpMethod,
    status_code: Option<u16>,
    response_headers: Headers,
}

impl<T> RestResult<T> {
    /// `true` iff the status was accepted and the body decoded.
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Decoded body of a single-resource call. `None` on failure, for
    /// `delete`, or when the body was empty.
    pub fn success_value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Decoded body of a list call, in response order.
    pub fn success_values(&self) -> Option<&[T]> {
        self.values.as_deref()
    }

    pub fn error(&self) -> Option<&ErrorDetail> {
        self.error.as_ref()
    }

    /// The resolved URL the request was sent to.
    pub fn request_path(&self) -> &str {
        &self.request_path
    }

    pub fn http_method(&self) -> HttpMethod {
        self.method
    }

    /// Absent when no response was received.
    pub fn status_code(&self) -> Option<u16> {
        self.status_code
    }

    pub fn response_headers(&self) -> &Headers {
        &self.response_headers
    }

    pub fn into_value(self) -> Option<T> {
        self.value
    }

    pub fn into_values(self) -> Option<Vec<T>> {
        self.values
    }

    /// Collapse a single-resource result into a `Result`.
    pub fn into_result(self) -> Result<Option<T>, ErrorDetail> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.value),
        }
    }
}

/// Per-call accumulator for a `RestResult`.
#[derive(Debug)]
pub(crate) struct EnvelopeBuilder {
    method: HttpMethod,
    request_path: String,
    status_code: Option<u16>,
    response_headers: Headers,
}

impl EnvelopeBuilder {
    pub(crate) fn new(method: HttpMethod, request_path: String) -> Self {
        Self {
            method,
            request_path,
            status_code: None,
            response_headers: Headers::new(),
        }
    }

    pub(crate) fn method(&self) -> HttpMethod {
        self.method
    }

    pub(crate) fn request_path(&self) -> &str {
        &self.request_path
    }

    pub(crate) fn record_response(&mut self, status: u16, headers: Headers) {
        self.status_code = Some(status);
        self.response_headers = headers;
    }

    pub(crate) fn complete_one<T>(self, outcome: Result<Option<T>, Fault>) -> RestResult<T> {
        match outcome {
            Ok(value) => self.finish(value, None, None),
            Err(fault) => self.fail(fault),
        }
    }

    pub(crate) fn complete_many<T>(self, outcome: Result<Option<Vec<T>>, Fault>) -> RestResult<T> {
        match outcome {
            Ok(values) => self.finish(None, values, None),
            Err(fault) => self.fail(fault),
        }
    }

    fn fail<T>(self, fault: Fault) -> RestResult<T> {
        warn!(
            method = %self.method,
            url = %self.request_path,
            kind = %fault.kind(),
            "{fault}"
        );
        let detail = ErrorDetail::from(fault);
        self.finish(None, None, Some(detail))
    }

    fn finish<T>(
        self,
        value: Option<T>,
        values: Option<Vec<T>>,
        error: Option<ErrorDetail>,
    ) -> RestResult<T> {
        RestResult {
            value,
            values,
            error,
            request_path: self.request_path,
            method: self.method,
            status_code: self.status_code,
            response_headers: self.response_headers,
        }
    }
}
