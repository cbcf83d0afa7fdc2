//! Positional value-masking engine used by the device inventory rule.
//!
//! A mask is configured text where `'?'` means "keep the current character".
//! Mask and data may differ in length; the shorter side is padded with NUL
//! placeholders, and placeholder positions emit nothing.

/// Merge configured `mask` text with the current `data` for a device entry.
///
/// With empty data the result is the mask with every `'?'` stripped.
pub fn merge(mask: &str, data: &str) -> String {
    if mask.is_empty() {
        return String::new();
    }
    if data.is_empty() {
        return mask.chars().filter(|&c| c != '?').collect();
    }

    let len = mask.chars().count().max(data.chars().count());
    let mask_chars = padded(mask, len);
    let data_chars = padded(data, len);

    let mut out = String::with_capacity(len);
    for (m, d) in mask_chars.into_iter().zip(data_chars) {
        if m == '?' {
            if d != '\0' {
                out.push(d);
            }
        } else if m != '\0' {
            out.push(m);
        }
    }

    out
}

fn padded(s: &str, len: usize) -> Vec<char> {
    let mut chars: Vec<char> = s.chars().collect();
    chars.resize(len, '\0');
    chars
}
