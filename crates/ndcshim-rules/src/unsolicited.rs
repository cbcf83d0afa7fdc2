//! Unsolicited fitness status rewrite.
//!
//! Field 3 carries a 2-character DIG/status prefix, three 50-character
//! cassette blocks, then trailing note totals. Each block's 5-character
//! denomination descriptor is reordered into the template layout the
//! controller expects; the device/error fields after it are forced to
//! their "OK"/"no data" sentinels.

use ndcshim_codec::Message;
use tracing::debug;

use crate::Outcome;

const PREFIX_LEN: usize = 2;
const BLOCK_LEN: usize = 50;
const BLOCK_COUNT: usize = 3;
const DESCRIPTOR_LEN: usize = 5;
const CASSETTES_LEN: usize = BLOCK_COUNT * BLOCK_LEN;

const LEFT_PAD: usize = 9;
const RIGHT_PAD: usize = 36;

/// Template byte order of the reordered denomination descriptor.
const DESCRIPTOR_ORDER: [usize; DESCRIPTOR_LEN] = [1, 2, 3, 0, 4];

/// Rewrite the cassette template and force the status sentinels.
pub fn apply(message: &mut Message) -> Outcome {
    let Some(status) = message.field(3) else {
        return Outcome::Unchanged;
    };
    if !status.is_ascii() || status.len() < PREFIX_LEN + CASSETTES_LEN {
        debug!(len = status.len(), "fitness status field too short, left alone");
        return Outcome::Unchanged;
    }

    let mut rebuilt = String::with_capacity(status.len());
    rebuilt.push_str(&status[..PREFIX_LEN]);

    for block in 0..BLOCK_COUNT {
        let start = PREFIX_LEN + block * BLOCK_LEN;
        rebuilt.push_str(&reorder_descriptor(
            &status[start..start + DESCRIPTOR_LEN],
        ));
    }

    rebuilt.push_str(&status[PREFIX_LEN + CASSETTES_LEN..]);

    if let Some(slot) = message.field_mut(3) {
        *slot = rebuilt;
    }

    force_sentinel(message, 4, "0");
    force_sentinel(message, 5, "00");
    force_sentinel(message, 6, "0");

    Outcome::Changed
}

/// Reorder a denomination descriptor into its template slot: 9 spaces,
/// the permuted descriptor, 36 `'~'` fill characters.
fn reorder_descriptor(descriptor: &str) -> String {
    let bytes = descriptor.as_bytes();
    let mut out = String::with_capacity(BLOCK_LEN);

    for _ in 0..LEFT_PAD {
        out.push(' ');
    }
    for &index in &DESCRIPTOR_ORDER {
        out.push(bytes[index] as char);
    }
    for _ in 0..RIGHT_PAD {
        out.push('~');
    }

    out
}

/// Normalize a status field to its sentinel when it carries real data.
fn force_sentinel(message: &mut Message, index: usize, sentinel: &str) {
    if let Some(field) = message.field_mut(index) {
        if field.len() > sentinel.len() {
            *field = sentinel.to_string();
        }
    }
}
