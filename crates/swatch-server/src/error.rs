use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use swatch_fetch::ResolveError;
use tracing::{error, warn};

/// Failure responses of the HTTP surface.
#[derive(Debug)]
pub enum ApiError {
  /// Record asset endpoints.
  Resolve(ResolveError),
  /// The raw object endpoint reports every fetch failure the same way.
  Object(ResolveError),
  MissingKey,
  UnknownCollection,
}

impl ApiError {
  pub fn status(&self) -> StatusCode {
    match self {
      ApiError::Resolve(err) => match err {
        ResolveError::NotFound => StatusCode::NOT_FOUND,
        ResolveError::NotConfigured | ResolveError::AccessDenied => StatusCode::FORBIDDEN,
        ResolveError::Upstream { .. } => StatusCode::BAD_GATEWAY,
        ResolveError::Transient | ResolveError::Lookup(_) => StatusCode::INTERNAL_SERVER_ERROR,
      },
      ApiError::Object(_) => StatusCode::INTERNAL_SERVER_ERROR,
      ApiError::MissingKey => StatusCode::BAD_REQUEST,
      ApiError::UnknownCollection => StatusCode::NOT_FOUND,
    }
  }

  fn message(&self) -> &'static str {
    match self {
      ApiError::Resolve(err) => match err {
        ResolveError::NotFound => "Asset not found",
        ResolveError::NotConfigured | ResolveError::AccessDenied => "Asset access denied",
        ResolveError::Upstream { .. } => "Upstream asset unavailable",
        ResolveError::Transient | ResolveError::Lookup(_) => "Failed to fetch asset",
      },
      ApiError::Object(_) => "Failed to fetch object",
      ApiError::MissingKey => "Missing key",
      ApiError::UnknownCollection => "Unknown collection",
    }
  }
}

impl From<ResolveError> for ApiError {
  fn from(err: ResolveError) -> Self {
    ApiError::Resolve(err)
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    match &self {
      ApiError::Resolve(err) | ApiError::Object(err) if status.is_server_error() => {
        error!(error = %err, status = status.as_u16(), "asset request failed")
      }
      ApiError::Resolve(err) | ApiError::Object(err) => {
        warn!(error = %err, status = status.as_u16(), "asset request rejected")
      }
      _ => {}
    }
    (status, self.message()).into_response()
  }
}
