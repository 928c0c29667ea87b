//! Swatch Fetch
//!
//! Turns a catalog record into streamable bytes. The [`Fetcher`] walks the
//! candidate list produced by the locator, strictly in order, and serves the
//! first candidate that opens. The same walk without payload transfer answers
//! existence checks.
//!
//! [`Resolver`] ties record lookup, location, and fetching together for the
//! HTTP surface and the CLI.

mod content_type;
mod error;
mod fetcher;
mod inline;
mod resolver;

pub use content_type::{AssetContext, resolve_content_type};
pub use error::{FetchError, ResolveError};
pub use fetcher::{AssetHints, FetchStream, Fetched, Fetcher};
pub use inline::{DecodedInline, decode_inline, is_well_formed};
pub use resolver::Resolver;
