//! Swatch Artifact
//!
//! Byte-level access to the places an asset can live: the object store and the
//! local filesystem. Everything is streamed; nothing here buffers a whole
//! payload.
//!
//! The [`ObjectClient`] trait is the seam to the object store. [`S3ObjectClient`]
//! is the production implementation; it is built once at startup and shared.
//! A client without credentials is valid and answers every call with
//! [`Error::NotConfigured`] without contacting the store.

mod fs;
mod s3;

pub use fs::{local_exists, open_local};
pub use s3::S3ObjectClient;

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::pin::Pin;

/// A boxed stream of bytes for artifact data.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, Error>> + Send>>;

/// Error type for artifact access.
#[derive(Debug, thiserror::Error)]
pub enum Error {
  /// Object-store credentials are absent.
  #[error("object store access not configured")]
  NotConfigured,

  /// The requested artifact was not found.
  #[error("artifact not found: {0}")]
  NotFound(String),

  /// The store refused the request.
  #[error("access denied: {0}")]
  AccessDenied(String),

  /// Any other store failure (network, throttling, server error).
  #[error("storage error: {0}")]
  Storage(String),

  /// An I/O error occurred.
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
}

/// An opened artifact: its bytes plus whatever metadata the source reported.
pub struct Artifact {
  pub body: ByteStream,
  pub content_type: Option<String>,
  pub size: Option<u64>,
}

impl std::fmt::Debug for Artifact {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Artifact")
      .field("content_type", &self.content_type)
      .field("size", &self.size)
      .finish_non_exhaustive()
  }
}

/// Metadata-only view of a stored object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactInfo {
  pub content_type: Option<String>,
  pub size: u64,
}

/// Read access to a bucket/key addressed object store.
#[async_trait]
pub trait ObjectClient: Send + Sync {
  /// Open an object for streaming.
  ///
  /// `region` overrides the configured default when the caller knows where
  /// the bucket lives.
  async fn get_object(
    &self,
    bucket: &str,
    key: &str,
    region: Option<&str>,
  ) -> Result<Artifact, Error>;

  /// Check that an object exists without transferring its body.
  async fn head_object(
    &self,
    bucket: &str,
    key: &str,
    region: Option<&str>,
  ) -> Result<ArtifactInfo, Error>;
}
