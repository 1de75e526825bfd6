use std::future::Future;
use std::pin::Pin;
use std::time::{Duration, Instant};

use reqwest::header::HeaderMap;
use reqwest::{Client, Url};
use thiserror::Error;
use tracing::debug;

use super::request::ApiRequest;
use super::response::HttpOutcome;

/// Failure at the transport boundary. Never converted into a decoded shape.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("cannot resolve `{path}` against the base URL: {source}")]
    InvalidUrl {
        path: String,
        #[source]
        source: url::ParseError,
    },
    #[error("request to {url} timed out after {timeout_ms} ms")]
    Timeout { url: String, timeout_ms: u64 },
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to read response body from {url}: {source}")]
    ReadBody {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

pub type SendFuture<'a> =
    Pin<Box<dyn Future<Output = Result<HttpOutcome, TransportError>> + Send + 'a>>;

/// Sends one request and waits for its terminal outcome.
pub trait Transport: Send + Sync {
    fn send<'a>(&'a self, request: &'a ApiRequest) -> SendFuture<'a>;
}

/// `reqwest`-backed transport. One attempt per request, no retries.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: Url,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(
        base_url: Url,
        headers: HeaderMap,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url,
            timeout,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve a request path against the base URL, keeping the base path.
    pub fn resolve(&self, request: &ApiRequest) -> Result<Url, TransportError> {
        self.base_url
            .join(request.relative_path())
            .map_err(|source| TransportError::InvalidUrl {
                path: request.path.clone(),
                source,
            })
    }

    async fn send_once(&self, request: &ApiRequest) -> Result<HttpOutcome, TransportError> {
        let url = self.resolve(request)?;
        let url_label = url.to_string();
        debug!(method = %request.method, url = %url_label, "sending request");

        let mut builder = self.client.request(request.method.into(), url);
        if request.method.allows_body() {
            if let Some(body) = &request.body {
                builder = builder.json(body);
            }
        }

        let started = Instant::now();
        let response = builder
            .send()
            .await
            .map_err(|source| {
                self.request_error(&url_label, source, |url, source| {
                    TransportError::Request { url, source }
                })
            })?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|source| {
                self.request_error(&url_label, source, |url, source| {
                    TransportError::ReadBody { url, source }
                })
            })?;
        let elapsed = duration_ms(started.elapsed());
        debug!(status, size_bytes = body.len(), duration_ms = elapsed, "response received");

        Ok(HttpOutcome {
            status,
            body: body.to_vec(),
            duration_ms: elapsed,
        })
    }

    /// The client timeout can fire while sending or while reading the body.
    fn request_error(
        &self,
        url: &str,
        source: reqwest::Error,
        otherwise: impl FnOnce(String, reqwest::Error) -> TransportError,
    ) -> TransportError {
        if source.is_timeout() {
            TransportError::Timeout {
                url: url.to_string(),
                timeout_ms: duration_ms(self.timeout),
            }
        } else {
            otherwise(url.to_string(), source)
        }
    }
}

impl Transport for HttpTransport {
    fn send<'a>(&'a self, request: &'a ApiRequest) -> SendFuture<'a> {
        Box::pin(self.send_once(request))
    }
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
