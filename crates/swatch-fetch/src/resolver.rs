use std::sync::Arc;

use swatch_locator::{Candidate, Locator, ObjectAddress};
use swatch_record::{Collection, RecordStore};
use tracing::{debug, instrument};

use crate::content_type::AssetContext;
use crate::error::ResolveError;
use crate::fetcher::{AssetHints, Fetched, Fetcher};

/// Record lookup, location, and fetching behind one handle.
///
/// Every call reads the record again; nothing is cached between requests.
pub struct Resolver {
  records: Arc<dyn RecordStore>,
  locator: Locator,
  fetcher: Fetcher,
}

impl Resolver {
  pub fn new(records: Arc<dyn RecordStore>, locator: Locator, fetcher: Fetcher) -> Self {
    Self {
      records,
      locator,
      fetcher,
    }
  }

  pub fn records(&self) -> &dyn RecordStore {
    self.records.as_ref()
  }

  /// Candidate locations for a record, or `None` when the record is absent.
  pub async fn locate(
    &self,
    collection: Collection,
    id: &str,
  ) -> Result<Option<Vec<Candidate>>, ResolveError> {
    let Some(doc) = self.records.find_by_id(collection, id).await? else {
      return Ok(None);
    };
    Ok(Some(self.locator.locate(&doc.asset_record())))
  }

  /// Fetch a record's asset for streaming.
  #[instrument(name = "resolve_fetch", skip(self), fields(collection = %collection))]
  pub async fn fetch(
    &self,
    collection: Collection,
    id: &str,
    context: AssetContext,
  ) -> Result<Fetched, ResolveError> {
    let Some(doc) = self.records.find_by_id(collection, id).await? else {
      debug!("record not found");
      return Err(ResolveError::NotFound);
    };

    let record = doc.asset_record();
    let candidates = self.locator.locate(&record);
    debug!(candidates = candidates.len(), "located");

    self
      .fetcher
      .fetch(&candidates, &AssetHints::from(&record), context)
      .await
  }

  /// Whether a record's asset is available. Only record lookup failures are errors.
  #[instrument(name = "resolve_probe", skip(self), fields(collection = %collection))]
  pub async fn probe(&self, collection: Collection, id: &str) -> Result<bool, ResolveError> {
    match self.locate(collection, id).await? {
      Some(candidates) => Ok(self.fetcher.probe(&candidates).await),
      None => Ok(false),
    }
  }

  /// Fetch an object by key from the default bucket.
  #[instrument(name = "resolve_object", skip(self))]
  pub async fn fetch_object(&self, key: &str) -> Result<Fetched, ResolveError> {
    let Some(bucket) = self.locator.default_bucket() else {
      return Err(ResolveError::NotConfigured);
    };

    let candidates = [Candidate::ObjectStore(ObjectAddress::new(bucket, key))];
    self
      .fetcher
      .fetch(&candidates, &AssetHints::default(), AssetContext::Raw)
      .await
  }
}
