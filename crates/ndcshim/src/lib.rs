//! In-line protocol message rewriter bridging cash recyclers into NDC
//! terminal stacks.
//!
//! ndcshim sits between a terminal controller and a cash-recycling
//! peripheral, rewriting selected protocol fields in both directions so a
//! peripheral without recycling-aware protocol extensions interoperates
//! with controller software that expects them.
//!
//! # Crate Structure
//!
//! - [`codec`] — Two-level delimited message parsing and reassembly
//! - [`config`] — Read-only rewrite configuration loaded from JSON
//! - [`rules`] — Classification, per-message rewrite rules, dispatch
//!
//! The C-ABI boundary lives in the separate `ndcshim-ffi` crate.

/// Re-export codec types.
pub mod codec {
    pub use ndcshim_codec::*;
}

/// Re-export configuration types.
pub mod config {
    pub use ndcshim_config::*;
}

/// Re-export classification and rewrite types.
pub mod rules {
    pub use ndcshim_rules::*;
}
