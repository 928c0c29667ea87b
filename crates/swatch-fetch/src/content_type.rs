//! Content-type resolution.

use std::path::Path;

/// Which endpoint an asset is being served for; decides the fallback type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetContext {
  Image,
  Pdf,
  Raw,
}

impl AssetContext {
  pub fn default_content_type(&self) -> &'static str {
    match self {
      AssetContext::Image => "image/jpeg",
      AssetContext::Pdf => "application/pdf",
      AssetContext::Raw => "application/octet-stream",
    }
  }
}

/// Pick the content type for a fetched asset.
///
/// Priority: what the source reported, what the record declares, a known
/// extension on any of `names`, then the context default.
pub fn resolve_content_type<'a>(
  reported: Option<&str>,
  declared: Option<&str>,
  names: impl IntoIterator<Item = &'a str>,
  context: AssetContext,
) -> String {
  [reported, declared]
    .into_iter()
    .flatten()
    .map(str::trim)
    .find(|t| !t.is_empty())
    .or_else(|| names.into_iter().find_map(from_extension))
    .unwrap_or(context.default_content_type())
    .to_string()
}

fn from_extension(name: &str) -> Option<&'static str> {
  let ext = Path::new(name).extension()?.to_str()?;
  if ext.eq_ignore_ascii_case("png") {
    Some("image/png")
  } else if ext.eq_ignore_ascii_case("webp") {
    Some("image/webp")
  } else {
    None
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_reported_wins() {
    let t = resolve_content_type(
      Some("image/webp"),
      Some("image/png"),
      ["a.png"],
      AssetContext::Image,
    );
    assert_eq!(t, "image/webp");
  }

  #[test]
  fn test_declared_before_extension() {
    let t = resolve_content_type(None, Some("image/gif"), ["a.png"], AssetContext::Image);
    assert_eq!(t, "image/gif");
  }

  #[test]
  fn test_blank_reported_is_skipped() {
    let t = resolve_content_type(Some(" "), None, ["pantones/p.WEBP"], AssetContext::Image);
    assert_eq!(t, "image/webp");
  }

  #[test]
  fn test_extension_from_later_name() {
    let t = resolve_content_type(None, None, ["keys/abc", "swatch.png"], AssetContext::Image);
    assert_eq!(t, "image/png");
  }

  #[test]
  fn test_context_defaults() {
    let none: [&str; 0] = [];
    assert_eq!(
      resolve_content_type(None, None, none, AssetContext::Image),
      "image/jpeg"
    );
    assert_eq!(
      resolve_content_type(None, None, ["tp.bin"], AssetContext::Pdf),
      "application/pdf"
    );
    assert_eq!(
      resolve_content_type(None, None, none, AssetContext::Raw),
      "application/octet-stream"
    );
  }
}
