//! Transaction Request rewrites: note type remapping and deposit count
//! chunking.
//!
//! Both sub-rules operate on the same deposit group entry — the first entry
//! (in any field past the leader) beginning with device tag `'w'`. After
//! the tag, tokens alternate a 2-character note-type id and a count.

use ndcshim_codec::{join_group, split_group, Message, Separators};
use ndcshim_config::Store;
use tracing::debug;

use crate::chunk::split_count;
use crate::Outcome;

const DEVICE_TAG: char = 'w';
const NOTE_TYPE_LEN: usize = 2;

/// Run both transaction sub-rules; their changed flags are OR-ed.
pub fn apply(message: &mut Message, store: &Store, seps: Separators) -> Outcome {
    let Some((field_index, entry_index)) = locate_deposit_entry(message, seps) else {
        return Outcome::Unchanged;
    };

    let field = message
        .field(field_index)
        .map(str::to_owned)
        .unwrap_or_default();
    let mut entries: Vec<String> = split_group(&field, seps)
        .into_iter()
        .map(str::to_owned)
        .collect();

    let (remapped, remap_outcome) = remap_note_types(&entries[entry_index], store);
    // Chunking always rewrites the entry layout, so the request counts as
    // changed whenever the deposit entry exists at all.
    let chunked = chunk_deposit_counts(&remapped);
    debug!(
        field = field_index,
        from = %entries[entry_index],
        to = %chunked,
        "deposit entry rewritten"
    );
    entries[entry_index] = chunked;

    if let Some(slot) = message.field_mut(field_index) {
        *slot = join_group(&entries, seps);
    }

    remap_outcome.or(Outcome::Changed)
}

/// Find the first group entry starting with the device tag, skipping the
/// leader field.
fn locate_deposit_entry(message: &Message, seps: Separators) -> Option<(usize, usize)> {
    for field_index in 1..message.len() {
        let field = message.field(field_index)?;
        for (entry_index, entry) in split_group(field, seps).into_iter().enumerate() {
            if entry.starts_with(DEVICE_TAG) {
                return Some((field_index, entry_index));
            }
        }
    }

    None
}

/// Substitute configured note-type ids; counts (fixed width from the store)
/// pass through untouched.
fn remap_note_types(entry: &str, store: &Store) -> (String, Outcome) {
    if !entry.is_ascii() {
        return (entry.to_string(), Outcome::Unchanged);
    }

    let count_len = store.note_count_length();
    let mut out = String::with_capacity(entry.len());
    out.push(DEVICE_TAG);

    let mut changed = false;
    let mut rest = &entry[DEVICE_TAG.len_utf8()..];

    while !rest.is_empty() {
        if rest.len() < NOTE_TYPE_LEN {
            out.push_str(rest);
            break;
        }

        let id = &rest[..NOTE_TYPE_LEN];
        match store.note_mapping(id) {
            Some(replacement) => {
                debug!(id, replacement, "note type remapped");
                out.push_str(replacement);
                changed = true;
            }
            None => out.push_str(id),
        }
        rest = &rest[NOTE_TYPE_LEN..];

        if rest.len() < count_len {
            out.push_str(rest);
            break;
        }
        out.push_str(&rest[..count_len]);
        rest = &rest[count_len..];
    }

    (out, Outcome::from_changed(changed))
}

/// Re-emit counts as two-digit tokens, splitting values of 100 or more.
///
/// Count tokens read 3 digits wide when at least 3 characters remain after
/// the id, otherwise 2 — the variable-width form the controller sends.
/// Unparseable counts are copied verbatim and the scan continues.
fn chunk_deposit_counts(entry: &str) -> String {
    if !entry.is_ascii() {
        return entry.to_string();
    }

    let mut out = String::with_capacity(entry.len());
    out.push(DEVICE_TAG);

    let mut rest = &entry[DEVICE_TAG.len_utf8()..];

    while !rest.is_empty() {
        if rest.len() < NOTE_TYPE_LEN {
            out.push_str(rest);
            break;
        }

        let id = &rest[..NOTE_TYPE_LEN];
        rest = &rest[NOTE_TYPE_LEN..];

        if rest.len() < 2 {
            // No room for a count token: id and tail copied verbatim.
            out.push_str(id);
            out.push_str(rest);
            break;
        }

        let count_len = if rest.len() >= 3 { 3 } else { 2 };
        let count = &rest[..count_len];
        rest = &rest[count_len..];

        match count.parse::<u32>() {
            Ok(value) => {
                for piece in split_count(value) {
                    out.push_str(id);
                    out.push_str(&format!("{piece:02}"));
                }
            }
            Err(_) => {
                out.push_str(id);
                out.push_str(count);
            }
        }
    }

    out
}
