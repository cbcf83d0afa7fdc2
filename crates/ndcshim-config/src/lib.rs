//! Read-only rewrite configuration for the NDC shim.
//!
//! The [`Store`] is populated once at initialization from a JSON file and
//! treated as immutable afterwards; every rewrite rule takes it by shared
//! reference. Missing or malformed source data never aborts initialization —
//! [`Store::load_or_default`] falls back to empty tables, which turns every
//! rule into a no-op.

pub mod error;
pub mod store;

pub use error::{ConfigError, Result};
pub use store::{ConfigParameter, DeviceOverride, Store, MAX_CONFIG_FILE_SIZE};
