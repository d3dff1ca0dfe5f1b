// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn parse_config_reads_capture_and_session_name() {
    let args = vec!["rdcd".to_string(), "cap.rdc".to_string(), "main".to_string()];
    let config = parse_config(&args).unwrap();
    assert_eq!(config.capture_path, PathBuf::from("cap.rdc"));
    assert_eq!(config.session_name, "main");
}

#[test]
fn parse_config_rejects_missing_session_name() {
    let args = vec!["rdcd".to_string(), "cap.rdc".to_string()];
    assert!(parse_config(&args).is_err());
}

#[test]
fn parse_config_rejects_missing_capture_path() {
    let args = vec!["rdcd".to_string()];
    assert!(parse_config(&args).is_err());
}
