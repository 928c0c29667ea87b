use std::fmt;
use std::path::PathBuf;

use serde::{Serialize, Serializer};

/// A bucket/key pair in the object store, with the region when known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectAddress {
  pub bucket: String,
  pub key: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub region: Option<String>,
}

impl ObjectAddress {
  pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
    Self {
      bucket: bucket.into(),
      key: key.into(),
      region: None,
    }
  }

  pub fn with_region(mut self, region: Option<String>) -> Self {
    self.region = region;
    self
  }
}

/// One hypothesis about where an asset's bytes live.
///
/// Built per request and discarded with it. Serialization elides inline
/// payloads so candidates can be printed for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Candidate {
  ObjectStore(ObjectAddress),
  InlineEncoded {
    #[serde(skip_serializing_if = "Option::is_none")]
    mime: Option<String>,
    #[serde(serialize_with = "elide")]
    payload: String,
  },
  LocalPath {
    path: PathBuf,
  },
  RemoteUrl {
    url: String,
  },
}

/// Discriminant of a [`Candidate`], for logging and outcome reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateKind {
  ObjectStore,
  InlineEncoded,
  LocalPath,
  RemoteUrl,
}

impl Candidate {
  pub fn kind(&self) -> CandidateKind {
    match self {
      Candidate::ObjectStore(_) => CandidateKind::ObjectStore,
      Candidate::InlineEncoded { .. } => CandidateKind::InlineEncoded,
      Candidate::LocalPath { .. } => CandidateKind::LocalPath,
      Candidate::RemoteUrl { .. } => CandidateKind::RemoteUrl,
    }
  }
}

impl fmt::Display for CandidateKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      CandidateKind::ObjectStore => "object-store",
      CandidateKind::InlineEncoded => "inline",
      CandidateKind::LocalPath => "local-path",
      CandidateKind::RemoteUrl => "remote-url",
    })
  }
}

/// Log-safe rendering: no payload bytes, no URL paths or query strings.
impl fmt::Display for Candidate {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Candidate::ObjectStore(addr) => write!(f, "object-store {}/{}", addr.bucket, addr.key),
      Candidate::InlineEncoded { payload, .. } => write!(f, "inline ({} chars)", payload.len()),
      Candidate::LocalPath { path } => write!(f, "local-path {}", path.display()),
      Candidate::RemoteUrl { url } => {
        let host = url::Url::parse(url)
          .ok()
          .and_then(|u| u.host_str().map(str::to_string))
          .unwrap_or_else(|| "<invalid>".to_string());
        write!(f, "remote-url {}", host)
      }
    }
  }
}

fn elide<S: Serializer>(payload: &str, serializer: S) -> Result<S::Ok, S::Error> {
  serializer.serialize_str(&format!("<{} chars>", payload.len()))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_display_hides_remote_path() {
    let candidate = Candidate::RemoteUrl {
      url: "https://cdn.example.com/private/file.pdf?token=abc".to_string(),
    };
    assert_eq!(candidate.to_string(), "remote-url cdn.example.com");
  }

  #[test]
  fn test_serialize_elides_payload() {
    let candidate = Candidate::InlineEncoded {
      mime: None,
      payload: "aGVsbG8=".to_string(),
    };
    let json = serde_json::to_value(&candidate).unwrap();
    assert_eq!(json["kind"], "inline_encoded");
    assert_eq!(json["payload"], "<8 chars>");
  }

  #[test]
  fn test_serialize_object_store() {
    let candidate = Candidate::ObjectStore(ObjectAddress::new("catalog", "a/b.png"));
    let json = serde_json::to_value(&candidate).unwrap();
    assert_eq!(json["kind"], "object_store");
    assert_eq!(json["bucket"], "catalog");
    assert_eq!(json["key"], "a/b.png");
  }
}
