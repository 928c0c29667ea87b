//! Swatch Record
//!
//! Catalog records (tech packs, Pantone references, print strikes,
//! pre-production files) as the asset proxy sees them.
//!
//! Records are owned by an external document store. This crate provides:
//! - [`RecordDocument`], the stored document shape with its legacy field names
//! - [`AssetRecord`], the normalized view of every place a record's binary may live
//! - the [`RecordStore`] lookup trait, with filesystem and in-memory implementations
//!
//! Lookups are read-only and uncached: every call reads the backing store again.

mod collection;
mod document;
mod fs;
mod memory;
mod record;

pub use collection::Collection;
pub use document::{RecordDocument, looks_like_base64};
pub use fs::FsRecordStore;
pub use memory::MemoryRecordStore;
pub use record::{AssetRecord, FileDescriptor};

use async_trait::async_trait;

/// Error type for record lookups.
#[derive(Debug, thiserror::Error)]
pub enum Error {
  /// A stored document could not be decoded.
  #[error("malformed record {collection}/{id}: {source}")]
  Malformed {
    collection: Collection,
    id: String,
    #[source]
    source: serde_json::Error,
  },

  /// An I/O error occurred.
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
}

/// Read-only record lookup.
#[async_trait]
pub trait RecordStore: Send + Sync {
  /// Find a record by id. Returns `Ok(None)` when it does not exist.
  async fn find_by_id(&self, collection: Collection, id: &str)
  -> Result<Option<RecordDocument>, Error>;

  /// List every record in a collection, ordered by id.
  async fn list(&self, collection: Collection) -> Result<Vec<(String, RecordDocument)>, Error>;
}
