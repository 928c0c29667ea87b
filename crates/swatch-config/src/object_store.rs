use std::fmt;

use serde::{Deserialize, Serialize};

/// Object-store connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectStoreConfig {
  /// Region used when a record does not carry its own.
  pub region: String,
  /// Custom endpoint (S3-compatible services). `None` uses the provider default.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub endpoint: Option<String>,
  /// Access credentials. `None` means object-store retrieval is not configured.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub credentials: Option<Credentials>,
}

impl ObjectStoreConfig {
  pub fn is_configured(&self) -> bool {
    self.credentials.is_some()
  }
}

impl Default for ObjectStoreConfig {
  fn default() -> Self {
    Self {
      region: "us-east-1".to_string(),
      endpoint: None,
      credentials: None,
    }
  }
}

/// Static access credentials for the object store.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
  pub access_key_id: String,
  pub secret_access_key: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub session_token: Option<String>,
}

// Secrets never reach logs through `{:?}`.
impl fmt::Debug for Credentials {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Credentials")
      .field("access_key_id", &self.access_key_id)
      .field("secret_access_key", &"<redacted>")
      .field(
        "session_token",
        &self.session_token.as_ref().map(|_| "<redacted>"),
      )
      .finish()
  }
}
