//! End-to-end rewrite coverage over a JSON-loaded configuration store.

use ndcshim::config::Store;
use ndcshim::rules::rewrite;

const FS: char = 0x1C as char;
const GS: char = 0x1D as char;

const CONFIG: &str = r#"{
    "note_count_length": 2,
    "state_definitions": { "123": "AB" },
    "configuration_parameters": [
        { "code": "01", "value": "5" },
        { "code": "02", "value": "10", "mask": true },
        { "code": "45", "value": "8", "mask": true }
    ],
    "note_mappings": { "01": "05" },
    "devices": {
        "HA": [ { "dig": "z", "data": "01" } ],
        "IA": [ { "dig": "w", "data": "?1" } ],
        "JA": [ { "dig": "q" } ]
    }
}"#;

fn store() -> Store {
    Store::from_json_str(CONFIG).expect("fixture configuration should parse")
}

fn wire(fields: &[&str]) -> Vec<u8> {
    fields.join(FS.to_string().as_str()).into_bytes()
}

#[test]
fn enhanced_config_load_masks_and_appends() {
    let input = wire(&["30", "000", "001", "1A", "x", "0100002003"]);

    let out = rewrite(&input, &store()).expect("message should change");
    // 01: direct override to 005; 02: OR(3, 10) = 11; 45 absent, appended.
    assert_eq!(
        out.as_ref(),
        wire(&["30", "000", "001", "1A", "x", "010050201145008"]).as_slice()
    );
}

#[test]
fn enhanced_config_load_is_idempotent_after_appension() {
    let input = wire(&["30", "000", "001", "1A", "x", "0100002003"]);

    let first = rewrite(&input, &store()).expect("first pass should change");
    assert!(rewrite(&first, &store()).is_none(), "second pass is stable");
}

#[test]
fn state_table_load_replaces_configured_entries() {
    let field = format!("123XYZ{GS}456ZZZ");
    let input = wire(&["30", "000", "001", "12", &field]);

    let out = rewrite(&input, &store()).expect("message should change");
    let expected = format!("123AB{GS}456ZZZ");
    assert_eq!(
        out.as_ref(),
        wire(&["30", "000", "001", "12", &expected]).as_slice()
    );
}

#[test]
fn transaction_request_remaps_and_chunks() {
    let input = wire(&["11", "000", "001", "w01150"]);

    let out = rewrite(&input, &store()).expect("message should change");
    // Note type 01 -> 05, count 150 -> 99 + 51 as two-digit tokens.
    assert_eq!(
        out.as_ref(),
        wire(&["11", "000", "001", "w05990551"]).as_slice()
    );
}

#[test]
fn supplies_data_truncates_and_masks_recycler_entry() {
    let field = format!("IA{GS}w234{GS}aAB");
    let input = wire(&["22", "000", "001", "F", &field]);

    let out = rewrite(&input, &store()).expect("message should change");
    // Recycler data "234" truncated to "2", then mask "?1" appends "1".
    let expected = format!("IA{GS}w21{GS}aAB");
    assert_eq!(
        out.as_ref(),
        wire(&["22", "000", "001", "F", &expected]).as_slice()
    );
}

#[test]
fn fitness_data_removes_configured_device() {
    let field = format!("JA{GS}qXX{GS}aAB");
    let input = wire(&["22", "000", "001", "F", &field]);

    let out = rewrite(&input, &store()).expect("message should change");
    let expected = format!("JA{GS}aAB");
    assert_eq!(
        out.as_ref(),
        wire(&["22", "000", "001", "F", &expected]).as_slice()
    );
}

#[test]
fn hardware_config_adds_device_to_field_six() {
    let input = wire(&["22", "000", "001", "F", "HA", "x", "aAB"]);

    let out = rewrite(&input, &store()).expect("message should change");
    let expected = format!("aAB{GS}z01");
    assert_eq!(
        out.as_ref(),
        wire(&["22", "000", "001", "F", "HA", "x", &expected]).as_slice()
    );
}

#[test]
fn device_rewrite_is_idempotent() {
    let field = format!("IA{GS}w234{GS}aAB");
    let input = wire(&["22", "000", "001", "F", &field]);

    let first = rewrite(&input, &store()).expect("first pass should change");
    assert!(
        rewrite(&first, &store()).is_none(),
        "re-applying yields the same device set"
    );
}

#[test]
fn unsolicited_fitness_status_normalized() {
    let mut status = String::from("w0");
    for descriptor in ["ABCDE", "FGHIJ", "KLMNO"] {
        status.push_str(descriptor);
        status.push_str(&"x".repeat(45));
    }
    status.push_str("0042");
    let input = wire(&["12", "000", "001", &status, "1234", "5678", "9012"]);

    let out = rewrite(&input, &store()).expect("message should change");
    let text = String::from_utf8(out.to_vec()).unwrap();
    let fields: Vec<&str> = text.split(FS).collect();

    let rewritten = fields[3];
    assert_eq!(&rewritten[..2], "w0");
    assert_eq!(&rewritten[2..11], "         ");
    assert_eq!(&rewritten[11..16], "BCDAE");
    assert_eq!(&rewritten[16..52], "~".repeat(36));
    assert!(rewritten.ends_with("0042"));

    assert_eq!(fields[4], "0");
    assert_eq!(fields[5], "00");
    assert_eq!(fields[6], "0");
}

#[test]
fn unrecognized_message_passes_through() {
    let input = wire(&["99", "000", "001", "anything"]);
    assert!(rewrite(&input, &store()).is_none());
}

#[test]
fn empty_store_disables_every_rule() {
    let store = Store::default();

    let transaction = wire(&["11", "000", "001", "x123"]);
    assert!(rewrite(&transaction, &store).is_none());

    let state_load = wire(&["30", "000", "001", "12", "123XYZ"]);
    assert!(rewrite(&state_load, &store).is_none());
}

#[test]
fn chunking_applies_even_with_empty_store() {
    // The deposit layout rewrite does not depend on configured tables.
    let input = wire(&["11", "000", "001", "w01200"]);

    let out = rewrite(&input, &Store::default()).expect("entry exists, so it changes");
    assert_eq!(
        out.as_ref(),
        wire(&["11", "000", "001", "w019901990102"]).as_slice()
    );
}
