//! Inline (base64) payload decoding.

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use bytes::Bytes;
use swatch_record::looks_like_base64;

use crate::error::FetchError;

const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";

/// Standard alphabet, padding optional.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
  &alphabet::STANDARD,
  GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// A decoded inline payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedInline {
  pub bytes: Bytes,
  /// Declared (data URI) or sniffed MIME type.
  pub mime: Option<String>,
}

/// Decode a data URI or a bare base64 string.
///
/// `hint` is used for bare payloads in place of sniffing when present.
pub fn decode_inline(payload: &str, hint: Option<&str>) -> Result<DecodedInline, FetchError> {
  let payload = payload.trim();

  if let Some(rest) = payload.strip_prefix("data:") {
    let (header, body) = rest
      .split_once(',')
      .ok_or_else(|| FetchError::Corrupt("data uri has no ',' separator".to_string()))?;
    let mime = header
      .split(';')
      .next()
      .map(str::trim)
      .filter(|m| !m.is_empty())
      .map(str::to_string);
    let bytes = decode_base64(body)?;
    return Ok(DecodedInline { bytes, mime });
  }

  let bytes = decode_base64(payload)?;
  let mime = match hint {
    Some(hint) => hint.to_string(),
    None => sniff(&bytes).to_string(),
  };
  Ok(DecodedInline {
    bytes,
    mime: Some(mime),
  })
}

/// Whether a payload looks decodable, without decoding it.
pub fn is_well_formed(payload: &str) -> bool {
  let payload = payload.trim();

  if let Some(rest) = payload.strip_prefix("data:") {
    return match rest.split_once(',') {
      Some((header, _)) => header.split(';').any(|p| p.eq_ignore_ascii_case("base64")),
      None => false,
    };
  }

  looks_like_base64(payload)
}

fn decode_base64(body: &str) -> Result<Bytes, FetchError> {
  // Stored payloads are sometimes line-wrapped.
  let compact: String = body.chars().filter(|c| !c.is_ascii_whitespace()).collect();
  LENIENT
    .decode(compact)
    .map(Bytes::from)
    .map_err(|e| FetchError::Corrupt(e.to_string()))
}

fn sniff(bytes: &[u8]) -> &'static str {
  if bytes.starts_with(PNG_MAGIC) {
    "image/png"
  } else {
    "image/jpeg"
  }
}
