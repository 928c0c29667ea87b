use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::record::{AssetRecord, FileDescriptor, non_empty};

/// How many leading characters are checked when deciding whether a value is
/// bare base64.
const BASE64_SNIFF_LEN: usize = 100;

/// A catalog record as stored by the document database.
///
/// Field names follow the stored documents, which accumulated several storage
/// conventions over time. Everything that is not an asset location is kept in
/// `metadata` untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordDocument {
  #[serde(rename = "s3Key", alias = "objectKey", default, skip_serializing_if = "Option::is_none")]
  pub s3_key: Option<String>,
  #[serde(
    rename = "s3BucketName",
    alias = "bucketName",
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub s3_bucket_name: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub region: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub file: Option<FileDescriptor>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub files: Vec<FileDescriptor>,
  /// Legacy image: a data-URI, bare base64, or a path under the uploads root.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub image: Option<String>,
  #[serde(rename = "pdfPath", default, skip_serializing_if = "Option::is_none")]
  pub pdf_path: Option<String>,
  #[serde(rename = "pdfview", default, skip_serializing_if = "Option::is_none")]
  pub pdf_view: Option<String>,
  #[serde(rename = "pdfUrl", default, skip_serializing_if = "Option::is_none")]
  pub pdf_url: Option<String>,
  #[serde(rename = "previewUrl", default, skip_serializing_if = "Option::is_none")]
  pub preview_url: Option<String>,
  #[serde(rename = "remoteUrl", default, skip_serializing_if = "Option::is_none")]
  pub remote_url: Option<String>,
  #[serde(rename = "pdfOriginalName", default, skip_serializing_if = "Option::is_none")]
  pub pdf_original_name: Option<String>,
  /// Catalog fields (season, manager, style id, comments, ...).
  #[serde(flatten)]
  pub metadata: Map<String, Value>,
}

impl RecordDocument {
  /// Normalize the stored fields into an [`AssetRecord`].
  pub fn asset_record(&self) -> AssetRecord {
    let (inline_payload, image_path) = match non_empty(&self.image) {
      Some(image) if is_inline_payload(&image) => (Some(image), None),
      Some(image) => (None, Some(image)),
      None => (None, None),
    };

    let remote_url = [
      &self.remote_url,
      &self.pdf_view,
      &self.pdf_url,
      &self.preview_url,
    ]
    .into_iter()
    .find_map(non_empty);

    AssetRecord {
      object_key: non_empty(&self.s3_key),
      bucket_name: non_empty(&self.s3_bucket_name),
      region: non_empty(&self.region),
      file_descriptor: self.file.as_ref().map(FileDescriptor::normalized),
      additional_files: self.files.iter().map(FileDescriptor::normalized).collect(),
      inline_payload,
      local_path_hint: image_path.or_else(|| non_empty(&self.pdf_path)),
      remote_url,
      display_name: non_empty(&self.pdf_original_name),
    }
  }
}

/// Whether a legacy `image` value holds the content itself rather than a path.
fn is_inline_payload(image: &str) -> bool {
  if image.starts_with("data:") {
    return true;
  }
  looks_like_base64(image)
}

/// Whether `value` reads as bare base64: non-empty, with only base64 alphabet
/// characters among its leading characters.
pub fn looks_like_base64(value: &str) -> bool {
  !value.is_empty()
    && value
      .chars()
      .take(BASE64_SNIFF_LEN)
      .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '/' | '='))
}
