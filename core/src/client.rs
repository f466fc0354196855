//! Typed REST calls returning a uniform `RestResult`.
//!
//! # Design
//! Every operation runs the same pipeline: resolve the URL, encode the
//! payload (if any), send through the `Transport`, classify the status, then
//! decode the buffered body. Each stage either passes its output on or
//! raises a `Fault`. The first fault ends the call and is stored in the
//! envelope. Nothing is retried and no error escapes as a panic or `Err`.
//!
//! The client holds no per-call state. Clone it or share it behind an `Arc`
//! to issue calls concurrently; each call builds its own envelope.

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::classify::{classify, Classification};
use crate::codec;
use crate::config::ClientConfig;
use crate::envelope::{EnvelopeBuilder, RestResult};
use crate::error::{ConfigError, Fault};
use crate::http::{HttpMethod, HttpRequest};
use crate::transport::{ReqwestTransport, Transport};

/// Asynchronous JSON client for a REST API.
#[derive(Debug, Clone)]
pub struct RestClient<T = ReqwestTransport> {
    base_url: Option<String>,
    transport: T,
}

impl RestClient<ReqwestTransport> {
    /// Client with default settings rooted at `base_url`.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Self::from_config(&ClientConfig::new().with_base_url(base_url))
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ConfigError> {
        let transport = ReqwestTransport::new(config)?;
        Ok(Self::with_transport(transport, config.base_url.as_deref()))
    }
}

impl<T: Transport> RestClient<T> {
    pub fn with_transport(transport: T, base_url: Option<&str>) -> Self {
        Self {
            base_url: base_url.map(|base| base.trim_end_matches('/').to_string()),
            transport,
        }
    }

    /// Absolute URLs pass through; anything else is appended to the base URL.
    pub fn resolve_url(&self, url: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            return url.to_string();
        }
        match &self.base_url {
            Some(base) if url.starts_with('/') => format!("{base}{url}"),
            Some(base) => format!("{base}/{url}"),
            None => url.to_string(),
        }
    }

    /// `GET` a single resource.
    #[instrument(level = "debug", skip(self))]
    pub async fn fetch_one<R: DeserializeOwned>(&self, url: &str) -> RestResult<R> {
        let mut envelope = self.start(HttpMethod::Get, url);
        let outcome = self
            .exchange(&mut envelope, None)
            .await
            .and_then(|body| codec::decode_one(&body).map_err(Fault::from));
        envelope.complete_one(outcome)
    }

    /// `GET` a collection. The body must be a JSON array.
    #[instrument(level = "debug", skip(self))]
    pub async fn fetch_many<R: DeserializeOwned>(&self, url: &str) -> RestResult<R> {
        let mut envelope = self.start(HttpMethod::Get, url);
        let outcome = self
            .exchange(&mut envelope, None)
            .await
            .and_then(|body| codec::decode_many(&body).map_err(Fault::from));
        envelope.complete_many(outcome)
    }

    /// `POST` the payload; the result holds the server's representation.
    #[instrument(level = "debug", skip(self, payload))]
    pub async fn create<R>(&self, url: &str, payload: &R) -> RestResult<R>
    where
        R: Serialize + DeserializeOwned,
    {
        self.send_payload(HttpMethod::Post, url, payload).await
    }

    /// `PATCH` the payload; the result holds the server's representation.
    #[instrument(level = "debug", skip(self, payload))]
    pub async fn patch<R>(&self, url: &str, payload: &R) -> RestResult<R>
    where
        R: Serialize + DeserializeOwned,
    {
        self.send_payload(HttpMethod::Patch, url, payload).await
    }

    /// `PUT` the payload; the result holds the server's representation.
    #[instrument(level = "debug", skip(self, payload))]
    pub async fn replace<R>(&self, url: &str, payload: &R) -> RestResult<R>
    where
        R: Serialize + DeserializeOwned,
    {
        self.send_payload(HttpMethod::Put, url, payload).await
    }

    /// `DELETE` a resource. Any response body is discarded.
    #[instrument(level = "debug", skip(self))]
    pub async fn delete(&self, url: &str) -> RestResult<()> {
        let mut envelope = self.start(HttpMethod::Delete, url);
        let outcome = self.exchange(&mut envelope, None).await.map(|_| None);
        envelope.complete_one(outcome)
    }

    async fn send_payload<R>(&self, method: HttpMethod, url: &str, payload: &R) -> RestResult<R>
    where
        R: Serialize + DeserializeOwned,
    {
        let mut envelope = self.start(method, url);
        let outcome = match codec::encode(payload) {
            Ok(body) => self.exchange(&mut envelope, Some(body)).await,
            Err(err) => Err(Fault::Encode(err)),
        };
        let outcome = outcome.and_then(|body| codec::decode_one(&body).map_err(Fault::from));
        envelope.complete_one(outcome)
    }

    fn start(&self, method: HttpMethod, url: &str) -> EnvelopeBuilder {
        EnvelopeBuilder::new(method, self.resolve_url(url))
    }

    /// Send the request, record the response metadata and classify it.
    /// Returns the body only when the status is accepted.
    async fn exchange(
        &self,
        envelope: &mut EnvelopeBuilder,
        body: Option<Bytes>,
    ) -> Result<Bytes, Fault> {
        let method = envelope.method();
        let request = HttpRequest {
            method,
            url: envelope.request_path().to_string(),
            body,
        };
        debug!(%method, url = %request.url, "sending request");

        let response = self.transport.send(request).await?;
        debug!(status = response.status, bytes = response.body.len(), "received response");
        envelope.record_response(response.status, response.headers);

        match classify(method, response.status) {
            Classification::Accepted => Ok(response.body),
            Classification::Rejected { status } => Err(Fault::HttpStatus { status }),
        }
    }
}
