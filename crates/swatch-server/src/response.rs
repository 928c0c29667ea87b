use axum::body::Body;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use swatch_fetch::Fetched;

/// Stream a fetched asset as a 200 response.
pub fn asset_response(fetched: Fetched) -> Response {
  let mut headers = HeaderMap::new();

  let content_type = HeaderValue::from_str(&fetched.content_type)
    .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream"));
  headers.insert(CONTENT_TYPE, content_type);

  if let Some(len) = fetched.content_length {
    headers.insert(CONTENT_LENGTH, HeaderValue::from(len));
  }
  if let Some(disposition) = fetched.filename.as_deref().and_then(content_disposition) {
    headers.insert(CONTENT_DISPOSITION, disposition);
  }

  (StatusCode::OK, headers, Body::from_stream(fetched.body)).into_response()
}

/// `inline; filename="..."` with quotes, backslashes, and control characters removed.
///
/// `None` when nothing usable is left or the result is not a valid header value.
pub fn content_disposition(filename: &str) -> Option<HeaderValue> {
  let cleaned: String = filename
    .chars()
    .filter(|c| !matches!(c, '"' | '\\') && !c.is_control())
    .collect();
  let cleaned = cleaned.trim();
  if cleaned.is_empty() {
    return None;
  }
  HeaderValue::from_str(&format!("inline; filename=\"{}\"", cleaned)).ok()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_plain_name() {
    assert_eq!(
      content_disposition("Spring Tee.pdf").unwrap(),
      "inline; filename=\"Spring Tee.pdf\""
    );
  }

  #[test]
  fn test_injection_stripped() {
    let value = content_disposition("a\"; filename=\"evil.exe\r\nX-Injected: 1").unwrap();
    let value = value.to_str().unwrap();
    assert_eq!(value, "inline; filename=\"a; filename=evil.exeX-Injected: 1\"");
    assert!(!value.contains('\r'));
  }

  #[test]
  fn test_unusable_names() {
    assert!(content_disposition("\"\"\\").is_none());
    assert!(content_disposition("  ").is_none());
  }
}
