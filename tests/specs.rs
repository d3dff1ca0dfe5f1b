// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! End-to-end seed scenarios, run against the real `rdc`/`rdcd` binaries.
//!
//! Each test gets its own `RDC_HOME` (so descriptors never collide) and its
//! own session name; `#[serial]` guards the shared process-env vars
//! (`RDC_HOME`, `RDC_DAEMON_BINARY`) these tests mutate.

use std::path::PathBuf;

use assert_cmd::Command;
use serial_test::serial;
use tempfile::tempdir;

fn rdc() -> Command {
    Command::cargo_bin("rdc").unwrap()
}

fn rdcd_path() -> PathBuf {
    assert_cmd::cargo::cargo_bin("rdcd")
}

/// Opens `session` against a throwaway capture path (the fake adapter
/// accepts any path) and returns the `RDC_HOME` directory so callers can
/// inspect the descriptor file directly.
fn open_session(home: &std::path::Path, session: &str) {
    std::env::set_var("RDC_HOME", home);
    std::env::set_var("RDC_DAEMON_BINARY", rdcd_path());
    rdc()
        .args(["--session", session, "open", "/tmp/seed.rdc"])
        .assert()
        .success();
}

fn close_session(session: &str) {
    rdc().args(["--session", session, "close"]).assert().success();
    std::env::remove_var("RDC_DAEMON_BINARY");
}

#[test]
#[serial]
fn open_close_cycle_leaves_no_descriptor_or_temp_dir() {
    let home = tempdir().unwrap();
    open_session(home.path(), "seed-open-close");

    let descriptor_path = home.path().join("sessions").join("seed-open-close.json");
    assert!(descriptor_path.exists());
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = std::fs::metadata(&descriptor_path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o600);
    }

    rdc()
        .args(["--session", "seed-open-close", "status"])
        .assert()
        .success();

    close_session("seed-open-close");
    assert!(!descriptor_path.exists());
}

#[test]
#[serial]
fn goto_updates_current_eid_and_survives_a_read_only_query() {
    let home = tempdir().unwrap();
    open_session(home.path(), "seed-goto");

    let before = rdc()
        .args(["--session", "seed-goto", "status", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    assert!(String::from_utf8_lossy(&before).contains("\"current_eid\": 0"));

    rdc().args(["--session", "seed-goto", "goto", "12"]).assert().success();

    // A read-only query in between must not move current_eid (invariant 1).
    rdc().args(["--session", "seed-goto", "draws"]).assert().success();

    let after = rdc()
        .args(["--session", "seed-goto", "status", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    assert!(String::from_utf8_lossy(&after).contains("\"current_eid\": 12"));

    close_session("seed-goto");
}

#[test]
#[serial]
fn pass_filter_returns_exactly_the_seeded_draw_count() {
    let home = tempdir().unwrap();
    open_session(home.path(), "seed-pass-filter");

    let output = rdc()
        .args(["--session", "seed-pass-filter", "draws", "--pass", "GBuffer", "--no-header", "--quiet"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    assert_eq!(String::from_utf8_lossy(&output).lines().count(), 20);

    close_session("seed-pass-filter");
}

#[test]
#[serial]
fn passes_lists_the_three_seeded_marker_groups() {
    let home = tempdir().unwrap();
    open_session(home.path(), "seed-passes");

    let output = rdc()
        .args(["--session", "seed-passes", "passes", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let rendered = String::from_utf8_lossy(&output);
    assert!(rendered.contains("\"Shadow\""));
    assert!(rendered.contains("\"GBuffer\""));
    assert!(rendered.contains("\"UI\""));

    close_session("seed-passes");
}

#[test]
#[serial]
fn cat_binary_leaf_streams_a_png_when_not_a_tty() {
    let home = tempdir().unwrap();
    open_session(home.path(), "seed-cat-png");

    let output = rdc()
        .args(["--session", "seed-cat-png", "cat", "/textures/tex-0001/image.png"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    assert_eq!(&output[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);

    close_session("seed-cat-png");
}

#[test]
#[serial]
fn stale_session_descriptor_is_reported_as_no_active_session() {
    let home = tempdir().unwrap();
    std::env::set_var("RDC_HOME", home.path());

    let sessions_dir = home.path().join("sessions");
    std::fs::create_dir_all(&sessions_dir).unwrap();
    std::fs::write(
        sessions_dir.join("seed-stale.json"),
        serde_json::json!({
            "pid": 999_999_999u32,
            "host": "127.0.0.1",
            "port": 1,
            "token": "dead",
            "capture": "/tmp/seed.rdc",
            "opened_at": "2026-01-01T00:00:00Z",
            "current_eid": 0
        })
        .to_string(),
    )
    .unwrap();

    rdc()
        .args(["--session", "seed-stale", "status"])
        .assert()
        .failure()
        .code(1);
}
