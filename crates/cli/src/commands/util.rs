// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `doctor`, `completion`, `capture` (spec §6.3).
//!
//! `completion` and `capture` are deliberately thin: generating shell
//! completions and shelling out to a vendor capture tool are both named
//! Non-goals, so these exist only to give the user a clear pointer rather
//! than a bare "unknown command" error.

use anyhow::Result;
use clap::Args;

use rdc_core::SessionDescriptor;

use crate::env;
use crate::output::OutputOpts;

/// Check that the CLI's environment is set up the way `open`/`status` expect:
/// the `rdcd` binary is resolvable, the sessions directory exists and is
/// writable, and report which sessions are currently live.
pub fn doctor(opts: &OutputOpts) -> Result<()> {
    let dir = SessionDescriptor::sessions_dir()?;
    let sessions = SessionDescriptor::list_live(None)?;

    if opts.json || opts.jsonl {
        let obj = serde_json::json!({
            "sessions_dir": dir,
            "sessions_dir_exists": dir.exists(),
            "daemon_binary": env::daemon_binary(),
            "live_sessions": sessions,
        });
        println!("{}", serde_json::to_string_pretty(&obj)?);
        return Ok(());
    }

    println!("sessions_dir:{}", dir.display());
    println!("sessions_dir_exists:{}", dir.exists());
    match env::daemon_binary() {
        Some(path) => println!("daemon_binary_override:{path}"),
        None => println!("daemon_binary_override:-"),
    }
    if sessions.is_empty() {
        println!("live_sessions:-");
    } else {
        println!("live_sessions:{}", sessions.join(","));
    }
    Ok(())
}

#[derive(Args)]
pub struct CompletionArgs {
    /// Shell to generate completions for (bash, zsh, fish).
    pub shell: String,
}

pub fn completion(args: CompletionArgs) -> Result<()> {
    anyhow::bail!("shell completion generation for `{}` is not provided by this build; see your shell's own completion registry for `rdc`", args.shell)
}

#[derive(Args)]
pub struct CaptureArgs {
    #[arg(trailing_var_arg = true)]
    pub passthrough: Vec<String>,
}

pub fn capture(_args: CaptureArgs) -> Result<()> {
    anyhow::bail!("this build does not shell out to a capture tool; produce a .rdc file with your vendor's capture utility, then run `rdc open <capture>`")
}
