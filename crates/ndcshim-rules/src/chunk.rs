//! Quantity chunking for deposit note counts.
//!
//! The downstream parser reads note counts as fixed two-digit tokens, so a
//! count of 100 or more must be split into several tokens that sum to the
//! original value.

/// Largest count a single two-digit token can carry.
pub const MAX_CHUNK: u32 = 99;

/// Split `total` into chunks of at most [`MAX_CHUNK`] that sum to `total`.
///
/// Emits `min(remaining, 99)` until the remainder reaches zero; a total of
/// zero yields a single zero chunk so the (type, count) pairing survives.
pub fn split_count(total: u32) -> Vec<u32> {
    let mut chunks = Vec::with_capacity((total / MAX_CHUNK) as usize + 1);
    let mut remaining = total;

    loop {
        let chunk = remaining.min(MAX_CHUNK);
        chunks.push(chunk);
        remaining -= chunk;
        if remaining == 0 {
            break;
        }
    }

    chunks
}
