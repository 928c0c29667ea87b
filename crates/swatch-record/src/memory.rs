use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{Collection, Error, RecordDocument, RecordStore};

/// In-memory record lookup, for tests and embedding.
#[derive(Default)]
pub struct MemoryRecordStore {
  records: RwLock<BTreeMap<(Collection, String), RecordDocument>>,
}

impl MemoryRecordStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Insert or replace a record.
  pub async fn insert(&self, collection: Collection, id: impl Into<String>, doc: RecordDocument) {
    self.records.write().await.insert((collection, id.into()), doc);
  }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
  async fn find_by_id(
    &self,
    collection: Collection,
    id: &str,
  ) -> Result<Option<RecordDocument>, Error> {
    let records = self.records.read().await;
    Ok(records.get(&(collection, id.to_string())).cloned())
  }

  async fn list(&self, collection: Collection) -> Result<Vec<(String, RecordDocument)>, Error> {
    let records = self.records.read().await;
    Ok(
      records
        .iter()
        .filter(|((c, _), _)| *c == collection)
        .map(|((_, id), doc)| (id.clone(), doc.clone()))
        .collect(),
    )
  }
}
