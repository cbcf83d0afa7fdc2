//! Enhanced Configuration Parameters Load rewrite.
//!
//! The target field is a flat token stream: a 2-character option code
//! followed by a 3-character value, repeated. Recognized codes are
//! overridden or OR-masked from the store; configured codes missing from
//! the input are appended so the output always carries every configured
//! option.

use ndcshim_config::{ConfigParameter, Store};
use tracing::debug;

use crate::Outcome;

const CODE_LEN: usize = 2;
const VALUE_LEN: usize = 3;
const TOKEN_LEN: usize = CODE_LEN + VALUE_LEN;

/// Rewrite the option token stream. Returns the new field text and whether
/// any token was altered or appended.
pub fn apply(field: &str, store: &Store) -> (String, Outcome) {
    if !field.is_ascii() {
        return (field.to_string(), Outcome::Unchanged);
    }

    let mut out = String::with_capacity(field.len());
    let mut seen: Vec<&str> = Vec::new();
    let mut changed = false;
    let mut rest = field;

    while !rest.is_empty() {
        if rest.len() < TOKEN_LEN {
            // Trailing partial token: preserved verbatim, never reshaped.
            // A complete code still marks its option as present so the
            // appension pass cannot emit it a second time.
            if rest.len() >= CODE_LEN {
                seen.push(&rest[..CODE_LEN]);
            }
            out.push_str(rest);
            break;
        }

        let code = &rest[..CODE_LEN];
        let value = &rest[CODE_LEN..TOKEN_LEN];
        seen.push(code);
        out.push_str(code);

        match store.parameter(code) {
            Some(param) => {
                let emitted = rewrite_value(param, value);
                if emitted != value {
                    debug!(code, from = value, to = %emitted, "option value rewritten");
                    changed = true;
                }
                out.push_str(&emitted);
            }
            None => out.push_str(value),
        }

        rest = &rest[TOKEN_LEN..];
    }

    // Every configured option must appear in the output.
    for param in store.parameters() {
        if !seen.contains(&param.code.as_str()) {
            debug!(code = %param.code, "appending configured option");
            out.push_str(&param.code);
            match param.numeric_value() {
                Some(value) => out.push_str(&format!("{value:03}")),
                None => out.push_str(&param.value),
            }
            changed = true;
        }
    }

    (out, Outcome::from_changed(changed))
}

fn rewrite_value(param: &ConfigParameter, current: &str) -> String {
    let Some(configured) = param.numeric_value() else {
        // Non-numeric override: treated as no override for in-stream tokens.
        return current.to_string();
    };

    if param.mask {
        match current.parse::<i64>() {
            Ok(value) => format!("{:03}", value | configured),
            // Unparseable value: token copied through, siblings unaffected.
            Err(_) => current.to_string(),
        }
    } else {
        format!("{configured:03}")
    }
}
