use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Settings for the outbound HTTP client used by the remote-URL fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
  /// Upper bound on waiting for upstream response headers.
  pub timeout_ms: u64,
  /// Upper bound on establishing the TCP/TLS connection.
  pub connect_timeout_ms: u64,
}

impl RemoteConfig {
  pub fn timeout(&self) -> Duration {
    Duration::from_millis(self.timeout_ms)
  }

  pub fn connect_timeout(&self) -> Duration {
    Duration::from_millis(self.connect_timeout_ms)
  }
}

impl Default for RemoteConfig {
  fn default() -> Self {
    Self {
      timeout_ms: 10_000,
      connect_timeout_ms: 5_000,
    }
  }
}
