// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! rdcd: the daemon process behind an open capture (spec §3, §4).
//!
//! Forked by `rdc open`, never invoked directly. Binds an ephemeral
//! localhost TCP port, opens the capture, writes the session descriptor,
//! then serves JSON-RPC requests on a single-threaded accept loop until a
//! `shutdown` RPC, SIGTERM/SIGINT, or the idle timer fires.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod env;
mod lifecycle;
mod listener;

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{error, info};

use lifecycle::Config;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if let Some(arg) = args.get(1) {
        match arg.as_str() {
            "--version" | "-V" => {
                println!("rdcd {}", env!("CARGO_PKG_VERSION"));
                return;
            }
            "--help" | "-h" => {
                print_help();
                return;
            }
            _ => {}
        }
    }

    setup_logging();

    let config = match parse_config(&args) {
        Ok(c) => c,
        Err(message) => {
            eprintln!("error: {message}");
            std::process::exit(1);
        }
    };

    let started = match lifecycle::startup(&config) {
        Ok(s) => s,
        Err(e) => {
            error!("failed to start: {e}");
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    let terminate = Arc::new(AtomicBool::new(false));
    install_signal_handler(Arc::clone(&terminate));

    info!(
        session = %config.session_name,
        port = started.listener.local_addr().map(|a| a.port()).unwrap_or(0),
        "daemon ready"
    );
    println!("READY");

    let mut state = started.state;
    listener::run(
        &started.listener,
        &mut state,
        config.idle_timeout,
        env::accept_poll_interval(),
        &terminate,
    );

    lifecycle::shutdown(&mut state, &config.session_name);
    info!("daemon stopped");
}

/// Parse the daemon's argv contract (spec §4.1 step 3): `rdcd <capture>
/// <session-name>`. The token is generated internally by `lifecycle::startup`
/// rather than passed in, so it never appears in a process listing.
fn parse_config(args: &[String]) -> Result<Config, String> {
    let capture_path = args.get(1).ok_or("missing capture path")?;
    let session_name = args.get(2).ok_or("missing session name")?;
    Ok(Config {
        session_name: session_name.clone(),
        capture_path: PathBuf::from(capture_path),
        idle_timeout: env::idle_timeout(),
    })
}

fn install_signal_handler(terminate: Arc<AtomicBool>) {
    let result = ctrlc::set_handler(move || {
        terminate.store(true, Ordering::SeqCst);
    });
    if let Err(e) = result {
        error!("failed to install signal handler: {e}");
    }
}

fn setup_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry().with(filter).with(fmt::layer()).init();
}

fn print_help() {
    println!("rdcd {}", env!("CARGO_PKG_VERSION"));
    println!("Background replay session for a GPU frame capture.");
    println!();
    println!("USAGE:");
    println!("    rdcd <capture> <session-name>");
    println!();
    println!("rdcd is started by `rdc open` and should not be invoked directly.");
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
