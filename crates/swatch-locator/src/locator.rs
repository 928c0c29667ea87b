use std::path::{Component, Path, PathBuf};

use swatch_record::{AssetRecord, FileDescriptor};
use tracing::debug;

use crate::address::parse_object_url;
use crate::candidate::{Candidate, ObjectAddress};

/// Builds the ordered candidate list for a record.
///
/// Holds only the two pieces of configuration the rules need: the bucket to
/// assume for descriptors that name a key without one, and the root that
/// legacy path hints are relative to.
#[derive(Debug, Clone)]
pub struct Locator {
  uploads_root: PathBuf,
  default_bucket: Option<String>,
}

impl Locator {
  pub fn new(uploads_root: impl Into<PathBuf>, default_bucket: Option<String>) -> Self {
    Self {
      uploads_root: uploads_root.into(),
      default_bucket,
    }
  }

  pub fn default_bucket(&self) -> Option<&str> {
    self.default_bucket.as_deref()
  }

  /// Produce every candidate location for the record, in priority order.
  ///
  /// An empty list means the record names no resolvable location at all.
  pub fn locate(&self, record: &AssetRecord) -> Vec<Candidate> {
    let mut candidates = Vec::new();

    if let Some(addr) = self.object_address(record) {
      candidates.push(Candidate::ObjectStore(addr));
    }

    if let Some(payload) = &record.inline_payload {
      candidates.push(Candidate::InlineEncoded {
        mime: None,
        payload: payload.clone(),
      });
    }

    if let Some(hint) = &record.local_path_hint {
      match self.local_path(hint) {
        Some(path) => candidates.push(Candidate::LocalPath { path }),
        None => debug!(hint = %hint, "local path hint leaves the uploads root, skipped"),
      }
    }

    if let Some(url) = &record.remote_url
      && is_http_url(url)
    {
      candidates.push(Candidate::RemoteUrl { url: url.clone() });
    }

    candidates
  }

  /// The single object-store address for a record, first rule that applies wins.
  fn object_address(&self, record: &AssetRecord) -> Option<ObjectAddress> {
    if let (Some(key), Some(bucket)) = (&record.object_key, &record.bucket_name) {
      return Some(ObjectAddress::new(bucket, key).with_region(record.region.clone()));
    }

    let descriptor_addr = record
      .file_descriptor
      .iter()
      .chain(record.additional_files.iter())
      .find_map(|file| self.descriptor_address(file));
    if descriptor_addr.is_some() {
      return descriptor_addr;
    }

    if let (Some(key), Some(bucket)) = (&record.object_key, &self.default_bucket) {
      return Some(ObjectAddress::new(bucket, key).with_region(record.region.clone()));
    }

    let urls = record
      .file_descriptor
      .as_ref()
      .and_then(|f| f.url.as_deref())
      .into_iter()
      .chain(record.remote_url.as_deref());

    for url in urls {
      match parse_object_url(url) {
        Ok(addr) => return Some(addr),
        Err(reason) => debug!(%reason, "url is not an object-store address"),
      }
    }

    None
  }

  /// Resolve a local hint beneath the uploads root. Root and prefix components
  /// are dropped so absolute hints stay inside the root; any `..` rejects the
  /// hint.
  fn local_path(&self, hint: &str) -> Option<PathBuf> {
    let mut path = self.uploads_root.clone();
    for component in Path::new(hint).components() {
      match component {
        Component::Normal(part) => path.push(part),
        Component::ParentDir => return None,
        Component::RootDir | Component::CurDir | Component::Prefix(_) => {}
      }
    }
    Some(path)
  }

  fn descriptor_address(&self, file: &FileDescriptor) -> Option<ObjectAddress> {
    let key = file.key.as_ref()?;
    let bucket = file.bucket.as_ref().or(self.default_bucket.as_ref())?;
    Some(ObjectAddress::new(bucket, key))
  }
}

fn is_http_url(url: &str) -> bool {
  let lower = url.get(..8).unwrap_or(url).to_ascii_lowercase();
  lower.starts_with("http://") || lower.starts_with("https://")
}
