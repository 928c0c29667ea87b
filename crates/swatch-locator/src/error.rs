use thiserror::Error;

/// Why a URL could not be read as an object-store address.
///
/// Never fatal: the locator logs it and moves on to the next candidate kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseFailure {
  /// Not a parseable absolute URL.
  #[error("malformed url: {0}")]
  Malformed(String),

  /// Only http and https URLs can address an object store.
  #[error("unsupported scheme: {0}")]
  UnsupportedScheme(String),

  /// The host is neither virtual-hosted nor path style.
  #[error("host is not an object-store endpoint: {0}")]
  UnrecognizedHost(String),

  /// Bucket or key could not be determined.
  #[error("url does not name both a bucket and a key")]
  MissingBucketOrKey,

  /// The path does not percent-decode to UTF-8.
  #[error("key is not valid percent-encoded utf-8")]
  InvalidEncoding,
}
