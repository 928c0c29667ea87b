use std::borrow::Cow;

use percent_encoding::percent_decode_str;
use url::Url;

use crate::candidate::ObjectAddress;
use crate::error::ParseFailure;

/// Label that marks the object-store service in a hostname.
const SERVICE_LABEL: &str = "s3";

/// Parse a stored object-store URL into its bucket, key, and region.
///
/// Two addressing conventions are recognized:
/// - virtual-hosted: `https://<bucket>.s3.<region>.<domain>/<key>`
/// - path style: `https://s3.<region>.<domain>/<bucket>/<key>`
///
/// The global endpoint forms (`<bucket>.s3.amazonaws.com`,
/// `s3.amazonaws.com/<bucket>`) carry no region label; the address then has
/// no region and the configured default applies.
///
/// The key is percent-decoded exactly once and may contain `/`. Query strings
/// (such as presigned-URL signatures) are ignored.
pub fn parse_object_url(raw: &str) -> Result<ObjectAddress, ParseFailure> {
  let url = Url::parse(raw.trim()).map_err(|e| ParseFailure::Malformed(e.to_string()))?;

  match url.scheme() {
    "http" | "https" => {}
    other => return Err(ParseFailure::UnsupportedScheme(other.to_string())),
  }

  let host = url
    .host_str()
    .ok_or_else(|| ParseFailure::Malformed("url has no host".to_string()))?;
  let labels: Vec<&str> = host.split('.').collect();
  let unrecognized = || ParseFailure::UnrecognizedHost(host.to_string());

  let service = labels
    .iter()
    .position(|l| l.eq_ignore_ascii_case(SERVICE_LABEL))
    .ok_or_else(unrecognized)?;

  // At least a two-label domain must follow the service label. A region label
  // sits between them only when more than two labels follow.
  if labels.len() < service + 3 {
    return Err(unrecognized());
  }
  let region = (labels.len() > service + 3).then(|| labels[service + 1].to_string());

  let path = decode(url.path().trim_start_matches('/'))?;

  let (bucket, key) = if service == 0 {
    // Path style: the first path segment is the bucket.
    match path.split_once('/') {
      Some((bucket, key)) => (bucket.to_string(), key.to_string()),
      None => return Err(ParseFailure::MissingBucketOrKey),
    }
  } else {
    (labels[..service].join("."), path.into_owned())
  };

  if bucket.is_empty() || key.is_empty() {
    return Err(ParseFailure::MissingBucketOrKey);
  }

  Ok(ObjectAddress::new(bucket, key).with_region(region))
}

fn decode(path: &str) -> Result<Cow<'_, str>, ParseFailure> {
  percent_decode_str(path)
    .decode_utf8()
    .map_err(|_| ParseFailure::InvalidEncoding)
}
