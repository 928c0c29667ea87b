//! Swatch Locator
//!
//! Turns a catalog record into an ordered list of [`Candidate`] locations for
//! its binary asset. The order is fixed for every collection:
//!
//! 1. object store (explicit address, descriptor key, or a parsed object-store URL)
//! 2. inline-encoded legacy payload
//! 3. local path under the uploads root
//! 4. remote HTTP(S) URL
//!
//! Locating is pure: no I/O happens here and it never fails. Whether a
//! candidate actually holds the asset is decided by the fetcher.

mod address;
mod candidate;
mod error;
mod locator;

pub use address::parse_object_url;
pub use candidate::{Candidate, CandidateKind, ObjectAddress};
pub use error::ParseFailure;
pub use locator::Locator;
