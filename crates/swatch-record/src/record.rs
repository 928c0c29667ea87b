use serde::{Deserialize, Serialize};

/// An embedded file descriptor.
///
/// Uploaded files are described by their display name plus whichever address
/// the uploader recorded: an object-store key/bucket, a browser-facing URL, or both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDescriptor {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub url: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub key: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub bucket: Option<String>,
  /// Declared MIME type. Stored documents call this field `type`.
  #[serde(
    default,
    rename = "type",
    alias = "contentType",
    skip_serializing_if = "Option::is_none"
  )]
  pub content_type: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub size: Option<u64>,
}

impl FileDescriptor {
  /// Copy with every empty string field treated as absent.
  pub(crate) fn normalized(&self) -> Self {
    Self {
      name: non_empty(&self.name),
      url: non_empty(&self.url),
      key: non_empty(&self.key),
      bucket: non_empty(&self.bucket),
      content_type: non_empty(&self.content_type),
      size: self.size,
    }
  }
}

/// Every place a record's binary asset may live.
///
/// All fields are optional and may be populated at the same time on records
/// that were migrated between storage strategies. String fields are never
/// empty: blank values from the stored document are mapped to `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetRecord {
  pub object_key: Option<String>,
  pub bucket_name: Option<String>,
  pub region: Option<String>,
  pub file_descriptor: Option<FileDescriptor>,
  #[serde(default)]
  pub additional_files: Vec<FileDescriptor>,
  pub inline_payload: Option<String>,
  pub local_path_hint: Option<String>,
  pub remote_url: Option<String>,
  /// Original filename recorded outside the descriptor.
  pub display_name: Option<String>,
}

impl AssetRecord {
  /// Filename to report for the asset, if one is known.
  pub fn filename(&self) -> Option<&str> {
    self
      .file_descriptor
      .as_ref()
      .and_then(|f| f.name.as_deref())
      .or(self.display_name.as_deref())
  }

  /// MIME type declared on the primary descriptor.
  pub fn declared_content_type(&self) -> Option<&str> {
    self
      .file_descriptor
      .as_ref()
      .and_then(|f| f.content_type.as_deref())
  }
}

pub(crate) fn non_empty(value: &Option<String>) -> Option<String> {
  value.as_ref().filter(|v| !v.trim().is_empty()).cloned()
}
