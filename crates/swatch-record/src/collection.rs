use std::fmt;

use serde::{Deserialize, Serialize};

/// The catalog collections that carry assets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Collection {
  Techpacks,
  Pantones,
  PrintStrikes,
  PreProduction,
}

impl Collection {
  pub const ALL: [Collection; 4] = [
    Collection::Techpacks,
    Collection::Pantones,
    Collection::PrintStrikes,
    Collection::PreProduction,
  ];

  /// The URL path segment and directory name for this collection.
  pub fn as_str(&self) -> &'static str {
    match self {
      Collection::Techpacks => "techpacks",
      Collection::Pantones => "pantones",
      Collection::PrintStrikes => "print-strikes",
      Collection::PreProduction => "pre-production",
    }
  }

  pub fn parse(s: &str) -> Option<Self> {
    Self::ALL.into_iter().find(|c| c.as_str() == s)
  }
}

impl fmt::Display for Collection {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_parse_round_trips_every_collection() {
    for c in Collection::ALL {
      assert_eq!(Collection::parse(c.as_str()), Some(c));
    }
  }

  #[test]
  fn test_parse_unknown() {
    assert_eq!(Collection::parse("vendors"), None);
    assert_eq!(Collection::parse("Techpacks"), None);
  }
}
