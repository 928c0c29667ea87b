//! Sequential candidate fetching and existence probing.

use std::sync::Arc;

use bytes::Bytes;
use futures::stream::{self, BoxStream};
use futures::{StreamExt, TryStreamExt};
use swatch_artifact::{ObjectClient, local_exists, open_local};
use swatch_host_http::RemoteClient;
use swatch_locator::{Candidate, CandidateKind, ObjectAddress};
use swatch_record::AssetRecord;
use tracing::{debug, warn};

use crate::content_type::{AssetContext, resolve_content_type};
use crate::error::{FetchError, ResolveError};
use crate::inline::{decode_inline, is_well_formed};

/// Body of a fetched asset. Dropping it releases the underlying handle.
pub type FetchStream = BoxStream<'static, Result<Bytes, std::io::Error>>;

/// A successfully opened asset, ready to stream.
pub struct Fetched {
  pub body: FetchStream,
  pub content_type: String,
  pub filename: Option<String>,
  pub content_length: Option<u64>,
  /// Which kind of candidate produced the bytes.
  pub kind: CandidateKind,
}

impl std::fmt::Debug for Fetched {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Fetched")
      .field("content_type", &self.content_type)
      .field("filename", &self.filename)
      .field("content_length", &self.content_length)
      .field("kind", &self.kind)
      .finish_non_exhaustive()
  }
}

/// Record-level metadata that feeds content-type and filename decisions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetHints {
  pub content_type: Option<String>,
  pub filename: Option<String>,
}

impl From<&AssetRecord> for AssetHints {
  fn from(record: &AssetRecord) -> Self {
    Self {
      content_type: record.declared_content_type().map(str::to_string),
      filename: record.filename().map(str::to_string),
    }
  }
}

/// Bytes opened from one candidate, before content-type resolution.
struct Opened {
  body: FetchStream,
  reported_type: Option<String>,
  size: Option<u64>,
  name: Option<String>,
}

/// Walks candidates in order and serves the first that works.
pub struct Fetcher {
  objects: Arc<dyn ObjectClient>,
  remote: RemoteClient,
}

impl Fetcher {
  pub fn new(objects: Arc<dyn ObjectClient>, remote: RemoteClient) -> Self {
    Self { objects, remote }
  }

  /// Open the first candidate that can be served.
  ///
  /// `NotConfigured` and `AccessDenied` stop the walk. Any other failure is
  /// logged and the next candidate is tried. When all fail the outcome
  /// follows the last failure.
  pub async fn fetch(
    &self,
    candidates: &[Candidate],
    hints: &AssetHints,
    context: AssetContext,
  ) -> Result<Fetched, ResolveError> {
    let mut last_failure = None;

    for candidate in candidates {
      debug!(%candidate, "trying candidate");

      let opened = match self.open(candidate).await {
        Ok(opened) => opened,
        Err(err) if err.is_terminal() => {
          warn!(%candidate, error = %err, "candidate refused, stopping");
          return Err(ResolveError::exhausted(Some(&err)));
        }
        Err(err) => {
          warn!(%candidate, error = %err, "candidate failed");
          last_failure = Some(err);
          continue;
        }
      };

      let content_type = resolve_content_type(
        opened.reported_type.as_deref(),
        hints.content_type.as_deref(),
        opened.name.as_deref().into_iter().chain(hints.filename.as_deref()),
        context,
      );
      debug!(%candidate, content_type = %content_type, "serving candidate");

      return Ok(Fetched {
        body: opened.body,
        content_type,
        filename: hints.filename.clone(),
        content_length: opened.size,
        kind: candidate.kind(),
      });
    }

    Err(ResolveError::exhausted(last_failure.as_ref()))
  }

  /// Whether any candidate is available, without transferring payload bytes.
  pub async fn probe(&self, candidates: &[Candidate]) -> bool {
    for candidate in candidates {
      match candidate {
        Candidate::ObjectStore(addr) => {
          match self
            .objects
            .head_object(&addr.bucket, &addr.key, addr.region.as_deref())
            .await
            .map_err(FetchError::from)
          {
            Ok(_) => return true,
            Err(err) if err.is_terminal() => {
              debug!(%candidate, error = %err, "probe refused, stopping");
              return false;
            }
            Err(err) => debug!(%candidate, error = %err, "probe miss"),
          }
        }
        Candidate::InlineEncoded { payload, .. } => {
          if is_well_formed(payload) {
            return true;
          }
        }
        Candidate::LocalPath { path } => {
          if local_exists(path).await {
            return true;
          }
        }
        Candidate::RemoteUrl { url } => match self.remote.head(url).await {
          Ok(_) => return true,
          Err(err) => debug!(%candidate, error = %err, "probe miss"),
        },
      }
    }
    false
  }

  async fn open(&self, candidate: &Candidate) -> Result<Opened, FetchError> {
    match candidate {
      Candidate::ObjectStore(addr) => self.open_object(addr).await,
      Candidate::InlineEncoded { mime, payload } => {
        let decoded = decode_inline(payload, mime.as_deref())?;
        let size = decoded.bytes.len() as u64;
        let bytes = decoded.bytes;
        Ok(Opened {
          body: stream::once(async move { Ok::<_, std::io::Error>(bytes) }).boxed(),
          reported_type: decoded.mime,
          size: Some(size),
          name: None,
        })
      }
      Candidate::LocalPath { path } => {
        let artifact = open_local(path).await?;
        Ok(Opened {
          body: artifact.body.map_err(std::io::Error::other).boxed(),
          reported_type: artifact.content_type,
          size: artifact.size,
          name: path.to_str().map(str::to_string),
        })
      }
      Candidate::RemoteUrl { url } => {
        let response = self.remote.get(url).await?;
        Ok(Opened {
          body: response.body.map_err(std::io::Error::other).boxed(),
          reported_type: response.content_type,
          size: response.content_length,
          name: None,
        })
      }
    }
  }

  async fn open_object(&self, addr: &ObjectAddress) -> Result<Opened, FetchError> {
    let artifact = self
      .objects
      .get_object(&addr.bucket, &addr.key, addr.region.as_deref())
      .await?;
    Ok(Opened {
      body: artifact.body.map_err(std::io::Error::other).boxed(),
      reported_type: artifact.content_type,
      size: artifact.size,
      name: Some(addr.key.clone()),
    })
  }
}
