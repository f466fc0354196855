//! Client configuration, fixed once the client is built.

use std::time::Duration;

/// Settings applied when constructing a `RestClient`.
///
/// `Content-Type: application/json` and `Accept: application/json` are always
/// sent; `default_headers` are added on top and may override them.
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    /// Prefix for relative call URLs. A trailing `/` is ignored.
    pub base_url: Option<String>,
    /// Whole-request timeout enforced by the transport.
    pub timeout: Option<Duration>,
    pub default_headers: Vec<(String, String)>,
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }
}
