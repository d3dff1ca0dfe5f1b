// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `search`, `counters` (spec §6.3, §6.4).
//!
//! There is no `search` RPC method (spec §6.4's canonical list omits one);
//! this filters the `events` result client-side by a regex over the event
//! name, the same data `events --type` already exposes server-side.

use anyhow::Result;
use clap::Args;
use regex::Regex;

use crate::client::DaemonClient;
use crate::output::{render_detail, render_list, OutputOpts};

#[derive(Args)]
pub struct SearchArgs {
    /// Regex matched against event names.
    pub pattern: String,
}

pub fn search(args: SearchArgs, session: &str, opts: &OutputOpts) -> Result<()> {
    let regex = Regex::new(&args.pattern)?;
    let client = DaemonClient::connect(session)?;
    let result = client.send("events", serde_json::json!({}))?;
    let rows: Vec<serde_json::Value> = result
        .get("events")
        .and_then(|v| v.as_array())
        .map(|rows| {
            rows.iter()
                .filter(|r| r.get("name").and_then(|n| n.as_str()).is_some_and(|n| regex.is_match(n)))
                .cloned()
                .collect()
        })
        .unwrap_or_default();
    render_list(&rows, &["eid", "type", "name"], opts);
    Ok(())
}

pub fn counters(session: &str, opts: &OutputOpts) -> Result<()> {
    let client = DaemonClient::connect(session)?;
    let result = client.send("counters", serde_json::json!({}))?;
    let rows = result.get("counters").and_then(|v| v.as_array()).cloned().unwrap_or_default();
    if rows.is_empty() {
        render_detail(&result, opts);
        return Ok(());
    }
    render_list(&rows, &["uuid", "name", "description", "unit"], opts);
    Ok(())
}
