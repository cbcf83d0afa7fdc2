//! Message classification and rewrite rules for the NDC recycler shim.
//!
//! This is the core value-add layer of ndcshim. Each intercepted message is
//! classified by a fixed route table, handed to the rewrite rule for its
//! type, and re-encoded byte-exactly for the downstream parser. Rules are
//! pure functions over a locally-owned copy of the message plus the
//! read-only [`ndcshim_config::Store`]; nothing here reaches for ambient
//! state.
//!
//! Failure never escapes a rule: malformed input makes the affected rule
//! report [`Outcome::Unchanged`] and the original bytes pass through.

pub mod chunk;
pub mod classify;
pub mod config_params;
pub mod devices;
pub mod dispatch;
pub mod mask;
pub mod state_table;
pub mod transaction;
pub mod unsolicited;

pub use classify::{classify, MessageType};
pub use dispatch::rewrite;

/// What a rewrite rule did to its message.
///
/// Collapsed to the fixed "continue" status only at the outermost FFI
/// adapter; inside the library the distinction drives whether the message
/// is re-encoded at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The rule altered the message; it must be re-encoded.
    Changed,
    /// The rule left the message alone (no match, no override, or input
    /// too malformed to touch safely).
    Unchanged,
}

impl Outcome {
    /// True when the message was altered.
    pub fn is_changed(self) -> bool {
        matches!(self, Self::Changed)
    }

    /// Combine with another rule's outcome (changed wins).
    pub fn or(self, other: Self) -> Self {
        if self.is_changed() || other.is_changed() {
            Self::Changed
        } else {
            Self::Unchanged
        }
    }

    pub(crate) fn from_changed(changed: bool) -> Self {
        if changed {
            Self::Changed
        } else {
            Self::Unchanged
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_or_prefers_changed() {
        assert_eq!(Outcome::Changed.or(Outcome::Unchanged), Outcome::Changed);
        assert_eq!(Outcome::Unchanged.or(Outcome::Changed), Outcome::Changed);
        assert_eq!(
            Outcome::Unchanged.or(Outcome::Unchanged),
            Outcome::Unchanged
        );
        assert!(Outcome::from_changed(true).is_changed());
    }
}
