// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `open`, `close`, `status`, `goto` (spec §4.1, §6.4).

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;

use crate::client::{self, DaemonClient};
use crate::output::{render_detail, OutputOpts};

#[derive(Args)]
pub struct OpenArgs {
    /// Path to the `.rdc` capture file.
    pub capture: PathBuf,
}

pub fn open(args: OpenArgs, session: &str, opts: &OutputOpts) -> Result<()> {
    client::open(&args.capture, session)?;
    if !opts.quiet {
        let path = rdc_core::SessionDescriptor::path_for(session)?;
        println!("{}", path.display());
    }
    Ok(())
}

pub fn close(session: &str) -> Result<()> {
    client::close(session)?;
    Ok(())
}

pub fn status(session: &str, opts: &OutputOpts) -> Result<()> {
    let client = DaemonClient::connect(session)?;
    let result = client.send("status", serde_json::json!({}))?;
    render_detail(&result, opts);
    Ok(())
}

#[derive(Args)]
pub struct GotoArgs {
    pub eid: u32,
}

pub fn goto(args: GotoArgs, session: &str, opts: &OutputOpts) -> Result<()> {
    let client = DaemonClient::connect(session)?;
    let result = client.send("goto", serde_json::json!({"eid": args.eid}))?;
    if result.get("current_eid").is_none() {
        bail!("unexpected response from daemon");
    }
    render_detail(&result, opts);
    Ok(())
}
