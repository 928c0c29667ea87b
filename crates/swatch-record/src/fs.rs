use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::warn;

use crate::{Collection, Error, RecordDocument, RecordStore};

/// Filesystem-backed record lookup.
///
/// Records are stored one JSON document per file:
/// ```text
/// {root}/
/// ├── techpacks/
/// │   └── 65f1c0ffee.json
/// ├── pantones/
/// ├── print-strikes/
/// └── pre-production/
/// ```
/// Every lookup reads the file again, so edits are visible immediately.
pub struct FsRecordStore {
  root: PathBuf,
}

impl FsRecordStore {
  /// Create a new store rooted at the given directory.
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into() }
  }

  fn record_path(&self, collection: Collection, id: &str) -> PathBuf {
    self
      .root
      .join(collection.as_str())
      .join(format!("{}.json", id))
  }

  async fn read(&self, collection: Collection, id: &str, path: &Path) -> Result<RecordDocument, Error> {
    let content = fs::read_to_string(path).await?;
    serde_json::from_str(&content).map_err(|source| Error::Malformed {
      collection,
      id: id.to_string(),
      source,
    })
  }
}

/// Ids are opaque tokens; anything that could escape the collection directory
/// is rejected before touching the filesystem.
fn is_valid_id(id: &str) -> bool {
  !id.is_empty()
    && id
      .chars()
      .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[async_trait]
impl RecordStore for FsRecordStore {
  async fn find_by_id(
    &self,
    collection: Collection,
    id: &str,
  ) -> Result<Option<RecordDocument>, Error> {
    if !is_valid_id(id) {
      return Ok(None);
    }

    let path = self.record_path(collection, id);
    match self.read(collection, id, &path).await {
      Ok(doc) => Ok(Some(doc)),
      Err(Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
      Err(e) => Err(e),
    }
  }

  async fn list(&self, collection: Collection) -> Result<Vec<(String, RecordDocument)>, Error> {
    let dir = self.root.join(collection.as_str());
    let mut records = Vec::new();

    let mut entries = match fs::read_dir(&dir).await {
      Ok(entries) => entries,
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(records),
      Err(e) => return Err(e.into()),
    };

    while let Some(entry) = entries.next_entry().await? {
      let path = entry.path();
      if path.extension().and_then(|e| e.to_str()) != Some("json") {
        continue;
      }

      let id = match path.file_stem().and_then(|s| s.to_str()) {
        Some(id) if is_valid_id(id) => id.to_string(),
        _ => continue,
      };

      match self.read(collection, &id, &path).await {
        Ok(doc) => records.push((id, doc)),
        Err(e) => warn!(%collection, %id, error = %e, "skipping unreadable record"),
      }
    }

    records.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(records)
  }
}
