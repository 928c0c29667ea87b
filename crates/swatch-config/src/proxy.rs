use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::object_store::{Credentials, ObjectStoreConfig};
use crate::remote::RemoteConfig;

/// Default listen address for `swatch serve`.
pub const DEFAULT_LISTEN: &str = "127.0.0.1:3001";

/// Environment variables consulted, in order, for the default bucket.
const BUCKET_VARS: [&str; 3] = ["AWS_S3_BUCKET_NAME", "S3_BUCKET_NAME", "S3_BUCKET"];

/// Top-level configuration for the asset proxy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxyConfig {
  /// Address the HTTP server binds to.
  pub listen: SocketAddr,
  /// Directory holding the record documents (`{root}/{collection}/{id}.json`).
  pub records_root: PathBuf,
  /// Root that legacy local path hints are resolved against.
  pub uploads_root: PathBuf,
  /// Bucket used for descriptors that carry a key but no bucket.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub default_bucket: Option<String>,
  pub object_store: ObjectStoreConfig,
  pub remote: RemoteConfig,
}

impl Default for ProxyConfig {
  fn default() -> Self {
    Self {
      listen: SocketAddr::from(([127, 0, 0, 1], 3001)),
      records_root: PathBuf::from("records"),
      uploads_root: PathBuf::from("uploads"),
      default_bucket: None,
      object_store: ObjectStoreConfig::default(),
      remote: RemoteConfig::default(),
    }
  }
}

impl ProxyConfig {
  /// Load configuration from an optional JSON file, then overlay the process
  /// environment.
  pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
    let mut config = match path {
      Some(path) => Self::from_file(path)?,
      None => Self::default(),
    };
    config.apply_env(|name| std::env::var(name).ok())?;
    Ok(config)
  }

  /// Read a JSON config file. Missing fields take their defaults.
  pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
      path: path.to_path_buf(),
      source,
    })?;
    serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
      path: path.to_path_buf(),
      source,
    })
  }

  /// Overlay values from an environment lookup. Empty values count as unset.
  pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
  where
    F: Fn(&str) -> Option<String>,
  {
    let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    if let Some(port) = get("PORT") {
      let port: u16 = port.trim().parse().map_err(|_| ConfigError::InvalidEnv {
        name: "PORT".to_string(),
        message: format!("'{}' is not a valid port", port),
      })?;
      self.listen.set_port(port);
    }

    if let Some(dir) = get("SWATCH_RECORDS_DIR") {
      self.records_root = PathBuf::from(dir);
    }
    if let Some(dir) = get("SWATCH_UPLOADS_DIR") {
      self.uploads_root = PathBuf::from(dir);
    }

    if let Some(bucket) = BUCKET_VARS.iter().find_map(|&name| get(name)) {
      self.default_bucket = Some(bucket);
    }

    if let Some(region) = get("AWS_REGION") {
      self.object_store.region = region;
    }
    if let Some(endpoint) = get("AWS_ENDPOINT_URL") {
      self.object_store.endpoint = Some(endpoint);
    }

    // Both halves are required; a lone key id leaves retrieval unconfigured.
    if let (Some(access_key_id), Some(secret_access_key)) =
      (get("AWS_ACCESS_KEY_ID"), get("AWS_SECRET_ACCESS_KEY"))
    {
      self.object_store.credentials = Some(Credentials {
        access_key_id,
        secret_access_key,
        session_token: get("AWS_SESSION_TOKEN"),
      });
    }

    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use std::collections::HashMap;

  use super::*;

  fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
      .iter()
      .map(|(k, v)| (k.to_string(), v.to_string()))
      .collect()
  }

  #[test]
  fn test_defaults_are_unconfigured() {
    let config = ProxyConfig::default();
    assert_eq!(config.listen.to_string(), DEFAULT_LISTEN);
    assert!(!config.object_store.is_configured());
    assert_eq!(config.default_bucket, None);
  }

  #[test]
  fn test_bucket_env_chain_prefers_first() {
    let vars = env(&[("S3_BUCKET", "third"), ("S3_BUCKET_NAME", "second")]);
    let mut config = ProxyConfig::default();
    config.apply_env(|k| vars.get(k).cloned()).unwrap();
    assert_eq!(config.default_bucket.as_deref(), Some("second"));
  }

  #[test]
  fn test_credentials_need_both_halves() {
    let vars = env(&[("AWS_ACCESS_KEY_ID", "AKIA123")]);
    let mut config = ProxyConfig::default();
    config.apply_env(|k| vars.get(k).cloned()).unwrap();
    assert!(!config.object_store.is_configured());

    let vars = env(&[
      ("AWS_ACCESS_KEY_ID", "AKIA123"),
      ("AWS_SECRET_ACCESS_KEY", "shh"),
      ("AWS_REGION", "eu-west-1"),
    ]);
    config.apply_env(|k| vars.get(k).cloned()).unwrap();
    assert!(config.object_store.is_configured());
    assert_eq!(config.object_store.region, "eu-west-1");
  }

  #[test]
  fn test_empty_env_values_are_ignored() {
    let vars = env(&[("AWS_REGION", "  "), ("S3_BUCKET", "")]);
    let mut config = ProxyConfig::default();
    config.apply_env(|k| vars.get(k).cloned()).unwrap();
    assert_eq!(config.object_store.region, "us-east-1");
    assert_eq!(config.default_bucket, None);
  }

  #[test]
  fn test_invalid_port() {
    let vars = env(&[("PORT", "eighty")]);
    let mut config = ProxyConfig::default();
    let err = config.apply_env(|k| vars.get(k).cloned()).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnv { ref name, .. } if name == "PORT"));
  }

  #[test]
  fn test_port_keeps_host() {
    let vars = env(&[("PORT", "8080")]);
    let mut config = ProxyConfig::default();
    config.apply_env(|k| vars.get(k).cloned()).unwrap();
    assert_eq!(config.listen.to_string(), "127.0.0.1:8080");
  }

  #[test]
  fn test_debug_redacts_secret() {
    let creds = Credentials {
      access_key_id: "AKIA123".to_string(),
      secret_access_key: "super-secret".to_string(),
      session_token: Some("token".to_string()),
    };
    let rendered = format!("{:?}", creds);
    assert!(rendered.contains("AKIA123"));
    assert!(!rendered.contains("super-secret"));
    assert!(!rendered.contains("\"token\""));
  }
}
