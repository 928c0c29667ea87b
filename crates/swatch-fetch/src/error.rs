//! Fetch error types.

/// Why a single candidate could not be served.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
  #[error("not found")]
  NotFound,

  /// Object-store credentials are absent.
  #[error("object store not configured")]
  NotConfigured,

  #[error("access denied")]
  AccessDenied,

  /// An inline payload failed to decode.
  #[error("corrupt inline payload: {0}")]
  Corrupt(String),

  /// A remote upstream answered with an error status.
  #[error("upstream responded with status {status}")]
  UpstreamError { status: u16 },

  /// Network failure, timeout, or an unexpected store error.
  #[error("transient failure: {0}")]
  Transient(String),
}

impl FetchError {
  /// Terminal failures stop the candidate walk.
  pub fn is_terminal(&self) -> bool {
    matches!(self, FetchError::NotConfigured | FetchError::AccessDenied)
  }
}

/// Overall outcome of resolving an asset.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
  #[error("asset not found")]
  NotFound,

  #[error("object store not configured")]
  NotConfigured,

  #[error("access denied")]
  AccessDenied,

  #[error("upstream responded with status {status}")]
  Upstream { status: u16 },

  #[error("transient failure")]
  Transient,

  /// The record store itself failed.
  #[error("record lookup failed: {0}")]
  Lookup(String),
}

impl ResolveError {
  /// Outcome after every candidate has failed, derived from the last failure.
  pub(crate) fn exhausted(last: Option<&FetchError>) -> Self {
    match last {
      Some(FetchError::UpstreamError { status }) => ResolveError::Upstream { status: *status },
      Some(FetchError::Transient(_)) => ResolveError::Transient,
      Some(FetchError::NotConfigured) => ResolveError::NotConfigured,
      Some(FetchError::AccessDenied) => ResolveError::AccessDenied,
      _ => ResolveError::NotFound,
    }
  }
}

impl From<swatch_record::Error> for ResolveError {
  fn from(err: swatch_record::Error) -> Self {
    ResolveError::Lookup(err.to_string())
  }
}

impl From<swatch_artifact::Error> for FetchError {
  fn from(err: swatch_artifact::Error) -> Self {
    use swatch_artifact::Error;
    match err {
      Error::NotConfigured => FetchError::NotConfigured,
      Error::NotFound(_) => FetchError::NotFound,
      Error::AccessDenied(_) => FetchError::AccessDenied,
      Error::Storage(message) => FetchError::Transient(message),
      Error::Io(e) => FetchError::Transient(e.to_string()),
    }
  }
}

impl From<swatch_host_http::HttpError> for FetchError {
  fn from(err: swatch_host_http::HttpError) -> Self {
    use swatch_host_http::HttpError;
    match err {
      HttpError::Status(status) => FetchError::UpstreamError { status },
      HttpError::InvalidUrl(_) | HttpError::UnsupportedScheme(_) => FetchError::NotFound,
      other => FetchError::Transient(other.to_string()),
    }
  }
}
