//! Device inventory rewrite for Send Configuration Information replies.
//!
//! The target field is a group-separated list of device entries, each a
//! 1-character DIG followed by data. Configured overrides add, remove, or
//! mask-merge entries; the surviving set is reassembled in first-seen
//! order.

use ndcshim_codec::{join_group, split_group, Separators};
use ndcshim_config::Store;
use tracing::{debug, warn};

use crate::mask;
use crate::Outcome;

/// Recycler device tag whose incoming supplies/fitness data is wider than
/// the baseline protocol allows.
const RECYCLER_DIG: char = 'w';

/// Rewrite the device list for one message category ("HA", "IA" or "JA").
pub fn apply(field: &str, message_id: &str, store: &Store, seps: Separators) -> (String, Outcome) {
    if field.is_empty() {
        return (String::new(), Outcome::Unchanged);
    }

    let mut inventory: Vec<(char, String)> = Vec::new();

    for entry in split_group(field, seps) {
        let mut chars = entry.chars();
        let Some(dig) = chars.next() else {
            warn!(message_id, "empty device entry dropped");
            continue;
        };
        let data: String = chars.collect();
        if data.is_empty() {
            warn!(message_id, %dig, "device entry too short for DIG and data, dropped");
            continue;
        }

        // The recycler reports multi-character supplies/fitness data the
        // baseline parser cannot read; keep only the leading character.
        let data = if matches!(message_id, "IA" | "JA") && dig == RECYCLER_DIG && data.len() > 1 {
            data.chars().take(1).collect()
        } else {
            data
        };

        if inventory.iter().any(|(d, _)| *d == dig) {
            // The downstream parser keys entries on the DIG; a duplicate
            // means a reply this shim cannot rewrite without losing data.
            warn!(message_id, %dig, "duplicate DIG, field passed through");
            return (field.to_string(), Outcome::Unchanged);
        }
        inventory.push((dig, data));
    }

    for entry in store.device_overrides(message_id) {
        if entry.data.is_empty() {
            debug!(message_id, dig = %entry.dig, "removing device");
            inventory.retain(|(d, _)| *d != entry.dig);
        } else if let Some((_, current)) = inventory.iter_mut().find(|(d, _)| *d == entry.dig) {
            let merged = mask::merge(&entry.data, current);
            debug!(message_id, dig = %entry.dig, %merged, "merging device data");
            *current = merged;
        } else {
            debug!(message_id, dig = %entry.dig, "adding device");
            inventory.push((entry.dig, mask::merge(&entry.data, "")));
        }
    }

    // An emptied inventory leaves the wire field untouched; the downstream
    // parser cannot consume an empty device list.
    if inventory.is_empty() {
        return (field.to_string(), Outcome::Unchanged);
    }

    let entries: Vec<String> = inventory
        .iter()
        .map(|(dig, data)| format!("{dig}{data}"))
        .collect();
    let rebuilt = join_group(&entries, seps);

    let outcome = Outcome::from_changed(rebuilt != field);
    (rebuilt, outcome)
}

#[cfg(test)]
mod tests {
    use ndcshim_codec::Separators;
    use ndcshim_config::Store;

    use super::*;

    const GS: char = 0x1D as char;

    #[test]
    fn configured_device_is_added() {
        let store = Store::default().with_device("HA", 'z', "01");
        let field = format!("aAB{GS}bCD");

        let (out, outcome) = apply(&field, "HA", &store, Separators::default());
        assert_eq!(out, format!("aAB{GS}bCD{GS}z01"));
        assert_eq!(outcome, Outcome::Changed);
    }

    #[test]
    fn added_device_mask_is_stripped_of_wildcards() {
        let store = Store::default().with_device("HA", 'z', "?1?2");
        let (out, _) = apply("aAB", "HA", &store, Separators::default());
        assert_eq!(out, format!("aAB{GS}z12"));
    }

    #[test]
    fn configured_empty_data_removes_device() {
        let store = Store::default().with_device("JA", 'b', "");
        let field = format!("aAB{GS}bCD");

        let (out, outcome) = apply(&field, "JA", &store, Separators::default());
        assert_eq!(out, "aAB");
        assert_eq!(outcome, Outcome::Changed);
    }

    #[test]
    fn existing_device_is_mask_merged() {
        let store = Store::default().with_device("HA", 'a', "?9");
        let (out, outcome) = apply("aAB", "HA", &store, Separators::default());

        assert_eq!(out, "aA9");
        assert_eq!(outcome, Outcome::Changed);
    }

    #[test]
    fn recycler_data_truncated_for_supplies_and_fitness() {
        let store = Store::default();

        let (out, outcome) = apply("w123", "IA", &store, Separators::default());
        assert_eq!(out, "w1");
        assert_eq!(outcome, Outcome::Changed);

        let (out, _) = apply("w123", "JA", &store, Separators::default());
        assert_eq!(out, "w1");

        // Hardware configuration keeps the full data.
        let (out, outcome) = apply("w123", "HA", &store, Separators::default());
        assert_eq!(out, "w123");
        assert_eq!(outcome, Outcome::Unchanged);
    }

    #[test]
    fn untouched_inventory_reports_unchanged() {
        let store = Store::default();
        let field = format!("aAB{GS}bCD");

        let (out, outcome) = apply(&field, "IA", &store, Separators::default());
        assert_eq!(out, field);
        assert_eq!(outcome, Outcome::Unchanged);
    }

    #[test]
    fn rule_is_idempotent_under_fixed_configuration() {
        let store = Store::default()
            .with_device("IA", 'w', "?1")
            .with_device("IA", 'q', "")
            .with_device("IA", 'z', "07");
        let field = format!("w234{GS}qXX{GS}aAB");

        let (once, first) = apply(&field, "IA", &store, Separators::default());
        let (twice, second) = apply(&once, "IA", &store, Separators::default());

        assert_eq!(once, twice);
        assert_eq!(first, Outcome::Changed);
        assert_eq!(second, Outcome::Unchanged);
    }

    #[test]
    fn short_entries_are_dropped() {
        let store = Store::default().with_device("HA", 'z', "1");
        let field = format!("a{GS}bCD");

        let (out, _) = apply(&field, "HA", &store, Separators::default());
        assert_eq!(out, format!("bCD{GS}z1"));
    }

    #[test]
    fn duplicate_digs_leave_field_untouched() {
        let store = Store::default().with_device("HA", 'z', "01");
        let field = format!("aAB{GS}aCD");

        let (out, outcome) = apply(&field, "HA", &store, Separators::default());
        assert_eq!(out, field);
        assert_eq!(outcome, Outcome::Unchanged);
    }

    #[test]
    fn removing_every_device_leaves_field_untouched() {
        let store = Store::default().with_device("JA", 'a', "");
        let (out, outcome) = apply("aAB", "JA", &store, Separators::default());

        assert_eq!(out, "aAB");
        assert_eq!(outcome, Outcome::Unchanged);
    }

    #[test]
    fn empty_field_is_unchanged() {
        let store = Store::default().with_device("HA", 'z', "1");
        let (out, outcome) = apply("", "HA", &store, Separators::default());
        assert_eq!(out, "");
        assert_eq!(outcome, Outcome::Unchanged);
    }
}
