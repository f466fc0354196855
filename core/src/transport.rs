//! The network side of a call.
//!
//! # Design
//! `Transport` is the seam between the pipeline and the HTTP stack. It takes
//! a plain `HttpRequest` and yields a fully buffered `HttpResponse`, or a
//! `TransportError` when no response was obtained. Implementations are shared
//! by concurrent calls, so they take `&self` and keep any configuration
//! immutable after construction.

use std::future::Future;
use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};

use crate::config::ClientConfig;
use crate::error::{ConfigError, TransportError};
use crate::http::{Headers, HttpMethod, HttpRequest, HttpResponse};

pub trait Transport: Send + Sync {
    /// Perform one exchange. Dropping the returned future abandons it.
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send;
}

impl<T: Transport> Transport for Arc<T> {
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send {
        (**self).send(request)
    }
}

/// `Transport` backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        for (name, value) in &config.default_headers {
            let header_name =
                HeaderName::from_bytes(name.as_bytes()).map_err(|source| ConfigError::InvalidHeaderName {
                    name: name.clone(),
                    source,
                })?;
            let header_value =
                HeaderValue::from_str(value).map_err(|source| ConfigError::InvalidHeaderValue {
                    name: name.clone(),
                    source,
                })?;
            headers.insert(header_name, header_value);
        }

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(ConfigError::Client)?;
        Ok(Self { client })
    }

    /// Wrap an already configured client as is.
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self.client.request(request.method.into(), request.url.as_str());
        if let Some(body) = request.body {
            builder = builder.body(body);
        }
        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = collect_headers(response.headers());
        let body = response.bytes().await?;
        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Flatten a header map: repeated names are joined with `", "`, values that
/// are not visible ASCII are skipped.
fn collect_headers(map: &HeaderMap) -> Headers {
    let mut headers = Headers::new();
    for (name, value) in map {
        let Ok(value) = value.to_str() else {
            continue;
        };
        headers
            .entry(name.as_str().to_string())
            .and_modify(|existing: &mut String| {
                existing.push_str(", ");
                existing.push_str(value);
            })
            .or_insert_with(|| value.to_string());
    }
    headers
}
