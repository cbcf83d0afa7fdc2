//! Two-level delimited message codec for NDC-style terminal protocols.
//!
//! An NDC message is text split at two nesting levels:
//! - A field-separator byte divides the message into ordered fields.
//! - A group-separator byte divides a field into ordered group entries.
//!
//! Both separators are protocol control bytes and vary by protocol revision,
//! so they are carried in [`Separators`] rather than hard-coded.

pub mod message;
pub mod separators;

pub use message::{join_group, split_group, Message};
pub use separators::{Separators, DEFAULT_FIELD_SEPARATOR, DEFAULT_GROUP_SEPARATOR};
