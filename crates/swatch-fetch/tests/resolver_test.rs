//! End-to-end resolution from stored records.

use std::sync::Arc;

use futures::TryStreamExt;
use object_store::ObjectStore;
use object_store::memory::InMemory;
use object_store::path::Path;
use serde_json::json;
use swatch_artifact::S3ObjectClient;
use swatch_config::{ObjectStoreConfig, RemoteConfig};
use swatch_fetch::{AssetContext, Fetcher, ResolveError, Resolver};
use swatch_host_http::RemoteClient;
use swatch_locator::{CandidateKind, Locator};
use swatch_record::{Collection, MemoryRecordStore, RecordDocument};

async fn resolver(default_bucket: Option<&str>) -> (Resolver, Arc<MemoryRecordStore>) {
  let store = Arc::new(InMemory::new());
  store
    .put(&Path::parse("pantones/p1.png").unwrap(), b"png-bytes".to_vec().into())
    .await
    .unwrap();
  store
    .put(&Path::parse("raw/blob.bin").unwrap(), b"raw-bytes".to_vec().into())
    .await
    .unwrap();

  let objects = S3ObjectClient::new(ObjectStoreConfig::default()).with_store("catalog", store);
  let fetcher = Fetcher::new(
    Arc::new(objects),
    RemoteClient::new(&RemoteConfig::default()).unwrap(),
  );

  let records = Arc::new(MemoryRecordStore::new());
  let resolver = Resolver::new(
    records.clone(),
    Locator::new("/nonexistent/uploads", default_bucket.map(str::to_string)),
    fetcher,
  );
  (resolver, records)
}

fn doc(value: serde_json::Value) -> RecordDocument {
  serde_json::from_value(value).unwrap()
}

#[tokio::test]
async fn test_fetch_from_object_store() {
  let (resolver, records) = resolver(None).await;
  records
    .insert(
      Collection::Pantones,
      "p1",
      doc(json!({
        "s3Key": "pantones/p1.png",
        "s3BucketName": "catalog",
        "file": { "name": "Cloud Dancer.png" },
        "season": "SS25"
      })),
    )
    .await;

  let fetched = resolver
    .fetch(Collection::Pantones, "p1", AssetContext::Image)
    .await
    .unwrap();
  assert_eq!(fetched.kind, CandidateKind::ObjectStore);
  assert_eq!(fetched.content_type, "image/png");
  assert_eq!(fetched.filename.as_deref(), Some("Cloud Dancer.png"));

  let chunks: Vec<_> = fetched.body.try_collect().await.unwrap();
  assert_eq!(chunks.concat(), b"png-bytes");

  assert!(resolver.probe(Collection::Pantones, "p1").await.unwrap());
}

#[tokio::test]
async fn test_missing_record() {
  let (resolver, _) = resolver(None).await;
  let err = resolver
    .fetch(Collection::Techpacks, "nope", AssetContext::Pdf)
    .await
    .unwrap_err();
  assert_eq!(err, ResolveError::NotFound);
  assert!(!resolver.probe(Collection::Techpacks, "nope").await.unwrap());
  assert_eq!(resolver.locate(Collection::Techpacks, "nope").await.unwrap(), None);
}

#[tokio::test]
async fn test_record_without_locations() {
  let (resolver, records) = resolver(Some("catalog")).await;
  records
    .insert(Collection::PrintStrikes, "s1", doc(json!({ "styleId": "ST-1" })))
    .await;

  assert_eq!(
    resolver.locate(Collection::PrintStrikes, "s1").await.unwrap(),
    Some(vec![])
  );
  let err = resolver
    .fetch(Collection::PrintStrikes, "s1", AssetContext::Image)
    .await
    .unwrap_err();
  assert_eq!(err, ResolveError::NotFound);
  assert!(!resolver.probe(Collection::PrintStrikes, "s1").await.unwrap());
}

#[tokio::test]
async fn test_descriptor_key_uses_default_bucket() {
  let (resolver, records) = resolver(Some("catalog")).await;
  records
    .insert(
      Collection::PreProduction,
      "pp1",
      doc(json!({ "file": { "key": "pantones/p1.png", "type": "image/x-custom" } })),
    )
    .await;

  let fetched = resolver
    .fetch(Collection::PreProduction, "pp1", AssetContext::Image)
    .await
    .unwrap();
  assert_eq!(fetched.content_type, "image/x-custom");
}

#[tokio::test]
async fn test_fetch_object_by_key() {
  let (resolver, _) = resolver(Some("catalog")).await;
  let fetched = resolver.fetch_object("raw/blob.bin").await.unwrap();
  assert_eq!(fetched.content_type, "application/octet-stream");
  assert_eq!(fetched.filename, None);

  let err = resolver.fetch_object("raw/missing.bin").await.unwrap_err();
  assert_eq!(err, ResolveError::NotFound);
}

#[tokio::test]
async fn test_fetch_object_without_default_bucket() {
  let (resolver, _) = resolver(None).await;
  let err = resolver.fetch_object("raw/blob.bin").await.unwrap_err();
  assert_eq!(err, ResolveError::NotConfigured);
}
