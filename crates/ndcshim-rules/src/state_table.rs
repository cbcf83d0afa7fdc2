//! State Table Load rewrite.
//!
//! The target field is a group-separated list of state entries; the first
//! three characters of an entry are the state code. Configured codes have
//! their entire entry replaced with `code + override`.

use ndcshim_codec::{join_group, split_group, Separators};
use ndcshim_config::Store;
use tracing::debug;

use crate::Outcome;

const STATE_CODE_LEN: usize = 3;

/// Rewrite the state table entries.
pub fn apply(field: &str, store: &Store, seps: Separators) -> (String, Outcome) {
    let mut changed = false;

    let entries: Vec<String> = split_group(field, seps)
        .into_iter()
        .map(|entry| {
            let Some(code) = entry.get(..STATE_CODE_LEN) else {
                return entry.to_string();
            };

            match store.state_override(code) {
                Some(text) if !text.is_empty() => {
                    debug!(code, "state entry replaced");
                    changed = true;
                    format!("{code}{text}")
                }
                _ => entry.to_string(),
            }
        })
        .collect();

    if changed {
        (join_group(&entries, seps), Outcome::Changed)
    } else {
        (field.to_string(), Outcome::Unchanged)
    }
}

#[cfg(test)]
mod tests {
    use ndcshim_codec::Separators;
    use ndcshim_config::Store;

    use super::*;

    const GS: char = 0x1D as char;

    #[test]
    fn configured_entry_is_replaced() {
        let store = Store::default().with_state_definition("123", "AB");
        let field = format!("123XYZ{GS}456ZZZ");

        let (out, outcome) = apply(&field, &store, Separators::default());
        assert_eq!(out, format!("123AB{GS}456ZZZ"));
        assert_eq!(outcome, Outcome::Changed);
    }

    #[test]
    fn no_override_means_unchanged() {
        let store = Store::default();
        let field = format!("123XYZ{GS}456ZZZ");

        let (out, outcome) = apply(&field, &store, Separators::default());
        assert_eq!(out, field);
        assert_eq!(outcome, Outcome::Unchanged);
    }

    #[test]
    fn empty_override_leaves_entry_alone() {
        let store = Store::default().with_state_definition("123", "");
        let (out, outcome) = apply("123XYZ", &store, Separators::default());
        assert_eq!(out, "123XYZ");
        assert_eq!(outcome, Outcome::Unchanged);
    }

    #[test]
    fn short_entries_pass_through() {
        let store = Store::default().with_state_definition("123", "AB");
        let field = format!("12{GS}123LONGSTATE");

        let (out, outcome) = apply(&field, &store, Separators::default());
        assert_eq!(out, format!("12{GS}123AB"));
        assert_eq!(outcome, Outcome::Changed);
    }

    #[test]
    fn multiple_replacements() {
        let store = Store::default()
            .with_state_definition("001", "A")
            .with_state_definition("002", "B");
        let field = format!("001xxxx{GS}002yyyy{GS}003zzzz");

        let (out, _) = apply(&field, &store, Separators::default());
        assert_eq!(out, format!("001A{GS}002B{GS}003zzzz"));
    }
}
