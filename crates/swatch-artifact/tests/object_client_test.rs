use std::sync::Arc;

use futures::TryStreamExt;
use object_store::memory::InMemory;
use object_store::path::Path;
use object_store::{Attribute, AttributeValue, Attributes, ObjectStore, PutOptions};
use swatch_artifact::{Error, ObjectClient, S3ObjectClient};
use swatch_config::ObjectStoreConfig;

async fn seeded_store() -> Arc<InMemory> {
  let store = Arc::new(InMemory::new());

  let attributes: Attributes = [(Attribute::ContentType, AttributeValue::from("image/webp"))]
    .into_iter()
    .collect();
  let options = PutOptions {
    attributes,
    ..Default::default()
  };
  store
    .put_opts(
      &Path::parse("pantones/p1.webp").unwrap(),
      b"RIFF0000WEBP".to_vec().into(),
      options,
    )
    .await
    .unwrap();

  store
    .put(&Path::parse("techpacks/tp1.pdf").unwrap(), b"%PDF-1.4".to_vec().into())
    .await
    .unwrap();

  store
    .put(&Path::parse("techpacks/TP~v2.pdf").unwrap(), b"%PDF-1.7".to_vec().into())
    .await
    .unwrap();

  store
}

fn client(store: Arc<InMemory>) -> S3ObjectClient {
  S3ObjectClient::new(ObjectStoreConfig::default()).with_store("catalog", store)
}

#[tokio::test]
async fn test_get_streams_body_with_reported_type() {
  let client = client(seeded_store().await);

  let artifact = client
    .get_object("catalog", "pantones/p1.webp", Some("eu-west-1"))
    .await
    .unwrap();
  assert_eq!(artifact.content_type.as_deref(), Some("image/webp"));
  assert_eq!(artifact.size, Some(12));

  let chunks: Vec<_> = artifact.body.try_collect().await.unwrap();
  assert_eq!(chunks.concat(), b"RIFF0000WEBP");
}

#[tokio::test]
async fn test_get_without_stored_type() {
  let client = client(seeded_store().await);
  let artifact = client
    .get_object("catalog", "techpacks/tp1.pdf", None)
    .await
    .unwrap();
  assert_eq!(artifact.content_type, None);
}

#[tokio::test]
async fn test_missing_key_is_not_found() {
  let client = client(seeded_store().await);
  let err = client
    .get_object("catalog", "pantones/missing.png", None)
    .await
    .unwrap_err();
  assert!(matches!(err, Error::NotFound(_)));

  let err = client
    .head_object("catalog", "pantones/missing.png", None)
    .await
    .unwrap_err();
  assert!(matches!(err, Error::NotFound(_)));
}

#[tokio::test]
async fn test_head_reports_metadata() {
  let client = client(seeded_store().await);
  let info = client
    .head_object("catalog", "pantones/p1.webp", None)
    .await
    .unwrap();
  assert_eq!(info.size, 12);
  assert_eq!(info.content_type.as_deref(), Some("image/webp"));
}

#[tokio::test]
async fn test_unpinned_bucket_without_credentials() {
  let client = client(seeded_store().await);
  let err = client
    .get_object("other-bucket", "pantones/p1.webp", None)
    .await
    .unwrap_err();
  assert!(matches!(err, Error::NotConfigured));
}

#[tokio::test]
async fn test_key_with_reserved_characters_is_requested_verbatim() {
  let client = client(seeded_store().await);

  let artifact = client
    .get_object("catalog", "techpacks/TP~v2.pdf", None)
    .await
    .unwrap();
  let chunks: Vec<_> = artifact.body.try_collect().await.unwrap();
  assert_eq!(chunks.concat(), b"%PDF-1.7");

  let info = client
    .head_object("catalog", "techpacks/TP~v2.pdf", None)
    .await
    .unwrap();
  assert_eq!(info.size, 8);
}

#[tokio::test]
async fn test_key_with_empty_segment_is_not_found() {
  let client = client(seeded_store().await);
  let err = client
    .get_object("catalog", "techpacks//tp1.pdf", None)
    .await
    .unwrap_err();
  assert!(matches!(err, Error::NotFound(loc) if loc == "catalog/techpacks//tp1.pdf"));
}
