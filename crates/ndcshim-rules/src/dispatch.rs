//! Per-call orchestration: parse, classify, apply the rule, re-encode.

use bytes::Bytes;
use ndcshim_codec::{Message, Separators};
use ndcshim_config::Store;
use tracing::debug;

use crate::classify::{classify, MessageType};
use crate::{config_params, devices, state_table, transaction, unsolicited, Outcome};

/// Rewrite one intercepted message.
///
/// Returns `Some(bytes)` when a rule changed the message, `None` when it
/// passed through (unrecognized type, no overrides, or input too malformed
/// to parse). The caller keeps its original buffer in the `None` case.
pub fn rewrite(bytes: &[u8], store: &Store) -> Option<Bytes> {
    let seps = store.separators();
    let message = Message::parse(bytes, seps)?;

    let kind = classify(&message);
    if kind == MessageType::Unrecognized {
        return None;
    }
    debug!(?kind, fields = message.len(), "message classified");

    let mut working = message;
    let outcome = apply_rule(kind, &mut working, store, seps);

    if outcome.is_changed() {
        let encoded = working.encode(seps);
        debug!(?kind, len = encoded.len(), "message rewritten");
        Some(encoded)
    } else {
        None
    }
}

fn apply_rule(
    kind: MessageType,
    message: &mut Message,
    store: &Store,
    seps: Separators,
) -> Outcome {
    match kind {
        MessageType::EnhancedConfigLoad => {
            rewrite_field(message, 5, |field| config_params::apply(field, store))
        }
        MessageType::StateTableLoad => {
            rewrite_field(message, 4, |field| state_table::apply(field, store, seps))
        }
        MessageType::TransactionRequest => transaction::apply(message, store, seps),
        MessageType::SendHardwareConfig => {
            rewrite_field(message, 6, |field| devices::apply(field, "HA", store, seps))
        }
        MessageType::SendSuppliesData => {
            rewrite_field(message, 4, |field| devices::apply(field, "IA", store, seps))
        }
        MessageType::SendFitnessData => {
            rewrite_field(message, 4, |field| devices::apply(field, "JA", store, seps))
        }
        MessageType::UnsolicitedFitnessStatus => unsolicited::apply(message),
        MessageType::Unrecognized => Outcome::Unchanged,
    }
}

/// Run a field-scoped rule against one field, writing back only on change.
/// Missing or empty target fields abort the rule as unchanged.
fn rewrite_field(
    message: &mut Message,
    index: usize,
    rule: impl FnOnce(&str) -> (String, Outcome),
) -> Outcome {
    let Some(field) = message.field(index) else {
        return Outcome::Unchanged;
    };
    if field.is_empty() {
        return Outcome::Unchanged;
    }

    let (rewritten, outcome) = rule(field);
    if outcome.is_changed() {
        if let Some(slot) = message.field_mut(index) {
            *slot = rewritten;
        }
    }

    outcome
}
