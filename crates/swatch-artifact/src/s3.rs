use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use futures::TryStreamExt;
use object_store::aws::AmazonS3Builder;
use object_store::path::Path;
use object_store::{Attribute, Attributes, GetOptions, ObjectStore};
use swatch_config::ObjectStoreConfig;
use tokio::sync::RwLock;
use tracing::debug;

use crate::{Artifact, ArtifactInfo, Error, ObjectClient};

/// [`ObjectClient`] backed by `object_store`'s S3 implementation.
///
/// One store is built lazily per (bucket, region) pair and cached for the life
/// of the client. Buckets registered with [`S3ObjectClient::with_store`] bypass
/// the builder and the credential check.
pub struct S3ObjectClient {
  config: ObjectStoreConfig,
  pinned: HashMap<String, Arc<dyn ObjectStore>>,
  stores: RwLock<HashMap<(String, String), Arc<dyn ObjectStore>>>,
}

impl S3ObjectClient {
  pub fn new(config: ObjectStoreConfig) -> Self {
    Self {
      config,
      pinned: HashMap::new(),
      stores: RwLock::new(HashMap::new()),
    }
  }

  /// Serve `bucket` from a pre-built store, whatever region is requested.
  pub fn with_store(mut self, bucket: impl Into<String>, store: Arc<dyn ObjectStore>) -> Self {
    self.pinned.insert(bucket.into(), store);
    self
  }

  async fn store_for(&self, bucket: &str, region: Option<&str>) -> Result<Arc<dyn ObjectStore>, Error> {
    if let Some(store) = self.pinned.get(bucket) {
      return Ok(store.clone());
    }

    let Some(credentials) = &self.config.credentials else {
      return Err(Error::NotConfigured);
    };

    let region = region.unwrap_or(&self.config.region);
    let cache_key = (bucket.to_string(), region.to_string());

    if let Some(store) = self.stores.read().await.get(&cache_key) {
      return Ok(store.clone());
    }

    let mut builder = AmazonS3Builder::new()
      .with_bucket_name(bucket)
      .with_region(region)
      .with_access_key_id(&credentials.access_key_id)
      .with_secret_access_key(&credentials.secret_access_key);

    if let Some(token) = &credentials.session_token {
      builder = builder.with_token(token);
    }
    if let Some(endpoint) = &self.config.endpoint {
      builder = builder
        .with_endpoint(endpoint)
        .with_allow_http(endpoint.starts_with("http://"));
    }

    let store: Arc<dyn ObjectStore> = Arc::new(
      builder
        .build()
        .map_err(|e| Error::Storage(format!("failed to build store for {}: {}", bucket, e)))?,
    );

    debug!(bucket, region, "object store client created");

    let mut stores = self.stores.write().await;
    Ok(stores.entry(cache_key).or_insert(store).clone())
  }
}

#[async_trait]
impl ObjectClient for S3ObjectClient {
  async fn get_object(
    &self,
    bucket: &str,
    key: &str,
    region: Option<&str>,
  ) -> Result<Artifact, Error> {
    let store = self.store_for(bucket, region).await?;
    let location = location(bucket, key)?;
    let result = store
      .get(&location)
      .await
      .map_err(|e| classify(e, bucket, key))?;

    let content_type = content_type(&result.attributes);
    let size = Some(result.meta.size as u64);
    let body = result
      .into_stream()
      .map_err(|e| Error::Storage(e.to_string()));

    Ok(Artifact {
      body: Box::pin(body),
      content_type,
      size,
    })
  }

  async fn head_object(
    &self,
    bucket: &str,
    key: &str,
    region: Option<&str>,
  ) -> Result<ArtifactInfo, Error> {
    let store = self.store_for(bucket, region).await?;
    let location = location(bucket, key)?;
    let options = GetOptions {
      head: true,
      ..Default::default()
    };
    let result = store
      .get_opts(&location, options)
      .await
      .map_err(|e| classify(e, bucket, key))?;

    Ok(ArtifactInfo {
      content_type: content_type(&result.attributes),
      size: result.meta.size as u64,
    })
  }
}

/// Object path for `key`, taken verbatim.
///
/// `Path::from` would percent-encode characters such as `~`, `%` or `[` a
/// second time. Keys that `object_store` cannot represent (empty segments,
/// `.`/`..` segments, control characters) cannot name a stored object.
fn location(bucket: &str, key: &str) -> Result<Path, Error> {
  Path::parse(key).map_err(|e| {
    debug!(bucket, key, error = %e, "key is not a valid object path");
    Error::NotFound(format!("{}/{}", bucket, key))
  })
}

fn content_type(attributes: &Attributes) -> Option<String> {
  attributes
    .get(&Attribute::ContentType)
    .map(|v| v.to_string())
    .filter(|v| !v.is_empty())
}

fn classify(err: object_store::Error, bucket: &str, key: &str) -> Error {
  let location = format!("{}/{}", bucket, key);
  match err {
    object_store::Error::NotFound { .. } => Error::NotFound(location),
    object_store::Error::PermissionDenied { .. } | object_store::Error::Unauthenticated { .. } => {
      Error::AccessDenied(location)
    }
    other => Error::Storage(other.to_string()),
  }
}
