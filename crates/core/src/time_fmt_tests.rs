// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn format_elapsed_seconds() {
    assert_eq!(format_elapsed(5), "5s");
    assert_eq!(format_elapsed(59), "59s");
}

#[test]
fn format_elapsed_minutes() {
    assert_eq!(format_elapsed(120), "2m");
}

#[test]
fn format_elapsed_hours_and_minutes() {
    assert_eq!(format_elapsed(3600), "1h");
    assert_eq!(format_elapsed(3600 + 30 * 60), "1h30m");
}

#[test]
fn format_elapsed_days() {
    assert_eq!(format_elapsed(3 * 86400), "3d");
}

#[test]
fn now_rfc3339_is_well_formed() {
    let ts = now_rfc3339();
    assert!(ts.ends_with('Z'));
    assert!(ts.contains('T'));
}
