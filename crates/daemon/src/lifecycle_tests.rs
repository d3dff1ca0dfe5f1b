// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use serial_test::serial;
use tempfile::tempdir;

use super::*;

fn set_rdc_home(dir: &std::path::Path) {
    std::env::set_var("RDC_HOME", dir);
}

#[test]
#[serial]
fn startup_binds_a_listening_port_and_writes_descriptor() {
    let home = tempdir().unwrap();
    set_rdc_home(home.path());

    let config = Config {
        session_name: "lifecycle-startup".to_string(),
        capture_path: PathBuf::from("/tmp/seed.rdc"),
        idle_timeout: Duration::from_secs(1800),
    };
    let mut started = startup(&config).unwrap();

    let descriptor = SessionDescriptor::load(&config.session_name).unwrap();
    assert_eq!(descriptor.port, started.listener.local_addr().unwrap().port());
    assert_eq!(descriptor.token, started.state.token);

    shutdown(&mut started.state, &config.session_name);
    assert!(SessionDescriptor::load(&config.session_name).is_err());
}

#[test]
#[serial]
fn shutdown_removes_the_session_temp_directory() {
    let home = tempdir().unwrap();
    set_rdc_home(home.path());

    let config = Config {
        session_name: "lifecycle-tempdir".to_string(),
        capture_path: PathBuf::from("/tmp/seed.rdc"),
        idle_timeout: Duration::from_secs(1800),
    };
    let mut started = startup(&config).unwrap();
    let temp_dir = started.state.temp_dir.clone().unwrap();
    assert!(temp_dir.exists());

    shutdown(&mut started.state, &config.session_name);
    assert!(!temp_dir.exists());
}

#[test]
#[serial]
fn conflicting_capture_on_live_session_is_rejected() {
    let home = tempdir().unwrap();
    set_rdc_home(home.path());

    let config = Config {
        session_name: "lifecycle-conflict".to_string(),
        capture_path: PathBuf::from("/tmp/first.rdc"),
        idle_timeout: Duration::from_secs(1800),
    };
    let mut first = startup(&config).unwrap();

    let other = Config {
        session_name: "lifecycle-conflict".to_string(),
        capture_path: PathBuf::from("/tmp/second.rdc"),
        idle_timeout: Duration::from_secs(1800),
    };
    let err = startup(&other).unwrap_err();
    assert!(matches!(err, LifecycleError::Conflict(_)));

    shutdown(&mut first.state, &config.session_name);
}
