//! Swatch Host HTTP
//!
//! The outbound HTTP client used when a record's only reachable copy lives at
//! a remote URL. Requests are limited to `http` and `https`, carry no caller
//! headers, and never follow credentials from the record.
//!
//! Two timeouts apply: one for establishing the connection and one for the
//! upstream to produce response headers. Once headers arrive the body streams
//! without a deadline.

mod error;

pub use error::HttpError;

use std::pin::Pin;
use std::time::Duration;

use bytes::Bytes;
use futures::{Stream, TryStreamExt};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, Response};
use swatch_config::RemoteConfig;
use tracing::debug;
use url::Url;

/// A boxed stream of response body bytes.
pub type BodyStream = Pin<Box<dyn Stream<Item = Result<Bytes, HttpError>> + Send>>;

/// A successful (status < 400) upstream response.
pub struct RemoteResponse {
  pub status: u16,
  pub content_type: Option<String>,
  pub content_length: Option<u64>,
  pub body: BodyStream,
}

impl std::fmt::Debug for RemoteResponse {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("RemoteResponse")
      .field("status", &self.status)
      .field("content_type", &self.content_type)
      .field("content_length", &self.content_length)
      .finish_non_exhaustive()
  }
}

/// Client for remote asset URLs.
#[derive(Debug, Clone)]
pub struct RemoteClient {
  client: Client,
  timeout: Duration,
}

impl RemoteClient {
  pub fn new(config: &RemoteConfig) -> Result<Self, HttpError> {
    let client = Client::builder()
      .connect_timeout(config.connect_timeout())
      .build()?;
    Ok(Self {
      client,
      timeout: config.timeout(),
    })
  }

  /// GET `url`, returning the streamed body on success.
  ///
  /// Status codes of 400 and above become [`HttpError::Status`].
  pub async fn get(&self, url: &str) -> Result<RemoteResponse, HttpError> {
    let response = self.send(Method::GET, url).await?;

    let status = response.status().as_u16();
    let content_type = response
      .headers()
      .get(CONTENT_TYPE)
      .and_then(|v| v.to_str().ok())
      .map(str::to_string)
      .filter(|v| !v.is_empty());
    let content_length = response.content_length();
    let body = response.bytes_stream().map_err(HttpError::from);

    Ok(RemoteResponse {
      status,
      content_type,
      content_length,
      body: Box::pin(body),
    })
  }

  /// HEAD `url`. `Ok` means the upstream answered with a status below 400.
  pub async fn head(&self, url: &str) -> Result<u16, HttpError> {
    let response = self.send(Method::HEAD, url).await?;
    Ok(response.status().as_u16())
  }

  async fn send(&self, method: Method, url: &str) -> Result<Response, HttpError> {
    let url = parse_url(url)?;
    let host = url.host_str().unwrap_or_default().to_string();
    debug!(%method, host = %host, "requesting remote asset");

    let request = self.client.request(method, url).send();
    let response = tokio::time::timeout(self.timeout, request)
      .await
      .map_err(|_| HttpError::Timeout)??;

    let status = response.status();
    if status.as_u16() >= 400 {
      debug!(host = %host, status = status.as_u16(), "remote asset request rejected");
      return Err(HttpError::Status(status.as_u16()));
    }

    Ok(response)
  }
}

fn parse_url(raw: &str) -> Result<Url, HttpError> {
  let url = Url::parse(raw).map_err(|e| HttpError::InvalidUrl(e.to_string()))?;
  match url.scheme() {
    "http" | "https" => Ok(url),
    other => Err(HttpError::UnsupportedScheme(other.to_string())),
  }
}
