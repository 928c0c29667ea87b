//! Swatch Config
//!
//! This crate contains the configuration types for the Swatch asset proxy.
//! Configuration is layered, lowest priority first:
//! - built-in defaults
//! - a JSON file (via CLI with `--config=swatch.json`)
//! - environment variables (`AWS_*`, `S3_BUCKET*`, `PORT`)
//! - CLI flags, applied by the binary after loading
//!
//! Object-store credentials are optional. A config without them is valid and
//! makes every object-store lookup report "not configured" instead of failing
//! at startup.

mod error;
mod object_store;
mod proxy;
mod remote;

pub use error::ConfigError;
pub use object_store::{Credentials, ObjectStoreConfig};
pub use proxy::{DEFAULT_LISTEN, ProxyConfig};
pub use remote::RemoteConfig;
