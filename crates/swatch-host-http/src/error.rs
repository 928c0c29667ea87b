/// Errors from outbound HTTP requests.
#[derive(Debug, thiserror::Error)]
pub enum HttpError {
  #[error("invalid url: {0}")]
  InvalidUrl(String),

  #[error("unsupported url scheme: {0}")]
  UnsupportedScheme(String),

  /// Upstream answered with a status of 400 or above.
  #[error("upstream responded with status {0}")]
  Status(u16),

  /// No response headers within the configured timeout.
  #[error("timed out waiting for upstream")]
  Timeout,

  #[error("request failed: {0}")]
  Request(#[source] reqwest::Error),
}

impl From<reqwest::Error> for HttpError {
  fn from(err: reqwest::Error) -> Self {
    if err.is_timeout() {
      HttpError::Timeout
    } else {
      // Drop the url; it may carry a signed query string.
      HttpError::Request(err.without_url())
    }
  }
}
