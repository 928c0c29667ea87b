use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use serde::Serialize;
use serde_json::{Map, Value};
use swatch_fetch::{ResolveError, Resolver};
use swatch_record::{Collection, FileDescriptor, RecordDocument};

use crate::error::ApiError;

/// Metadata keys that address storage or collide with listing fields.
const HIDDEN_KEYS: [&str; 9] = [
  "id", "_id", "collection", "assetUrl", "url", "key", "bucket", "s3Url", "fileUrl",
];

/// One record in a collection listing. Never carries storage locations.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ListingEntry {
  id: String,
  collection: Collection,
  #[serde(flatten)]
  metadata: Map<String, Value>,
  #[serde(skip_serializing_if = "Option::is_none")]
  file: Option<FileSummary>,
  asset_url: String,
}

#[derive(Debug, Serialize)]
struct FileSummary {
  #[serde(skip_serializing_if = "Option::is_none")]
  name: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  size: Option<u64>,
  #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
  content_type: Option<String>,
}

impl From<&FileDescriptor> for FileSummary {
  fn from(file: &FileDescriptor) -> Self {
    Self {
      name: file.name.clone(),
      size: file.size,
      content_type: file.content_type.clone(),
    }
  }
}

impl ListingEntry {
  fn new(collection: Collection, id: String, doc: RecordDocument) -> Self {
    let asset = match collection {
      Collection::Techpacks => "pdf",
      _ => "image",
    };
    let asset_url = format!("/assets/{}/{}/{}", collection, id, asset);

    let mut metadata = doc.metadata;
    metadata.retain(|k, _| !HIDDEN_KEYS.contains(&k.as_str()));

    Self {
      id,
      collection,
      metadata,
      file: doc.file.as_ref().map(FileSummary::from),
      asset_url,
    }
  }
}

pub(crate) async fn list_collection(
  State(resolver): State<Arc<Resolver>>,
  Path(collection): Path<String>,
) -> Result<Json<Vec<ListingEntry>>, ApiError> {
  let collection = Collection::parse(&collection).ok_or(ApiError::UnknownCollection)?;
  let records = resolver
    .records()
    .list(collection)
    .await
    .map_err(ResolveError::from)?;

  Ok(Json(
    records
      .into_iter()
      .map(|(id, doc)| ListingEntry::new(collection, id, doc))
      .collect(),
  ))
}
