//! Inspect CLI Tests
//!
//! Tests verify:
//! - `encode` and `range` print hex prefixes and bounds
//! - `decode` accepts one optional `0x` and strict hex digits only
//! - Bad input exits with a non-zero status

use std::process::{Command, Output};

fn inspect(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_keyspan-inspect"))
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

// =============================================================================
// Encode / Range Tests
// =============================================================================

#[test]
fn test_encode_prints_big_endian_hex() {
    let output = inspect(&["encode", "16909060"]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "01020304\n");
}

#[test]
fn test_range_of_last_namespace_is_unbounded() {
    let output = inspect(&["range", "4294967295"]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "[ffffffff, (unbounded))\n");
}

#[test]
fn test_range_of_namespace() {
    let output = inspect(&["range", "255"]);
    assert_eq!(stdout(&output), "[000000ff, 00000100)\n");
}

// =============================================================================
// Decode Tests
// =============================================================================

#[test]
fn test_decode_splits_namespace_and_remainder() {
    for key in ["000000054142", "0x000000054142"] {
        let output = inspect(&["decode", key]);

        assert!(output.status.success(), "key {}", key);
        assert_eq!(stdout(&output), "namespace: 5\nremainder: 4142\n");
    }
}

#[test]
fn test_decode_rejects_repeated_hex_prefix() {
    let output = inspect(&["decode", "0x0x000000054142"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_decode_rejects_non_hex_digits() {
    for key in ["+5000000", "00000005zz", "0000000"] {
        let output = inspect(&["decode", key]);
        assert_eq!(output.status.code(), Some(2), "key {}", key);
    }
}

#[test]
fn test_decode_short_key_fails() {
    let output = inspect(&["decode", "0102"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
}
