// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `resources`, `resource`, `passes`, `pass`, `usage` (spec §4.6, §4.7, §6.4).

use anyhow::Result;
use clap::Args;

use crate::client::DaemonClient;
use crate::output::{render_detail, render_list, OutputOpts};

pub fn resources(session: &str, opts: &OutputOpts) -> Result<()> {
    let client = DaemonClient::connect(session)?;
    let result = client.send("resources", serde_json::json!({}))?;
    let rows = result.get("resources").and_then(|v| v.as_array()).cloned().unwrap_or_default();
    render_list(&rows, &["kind", "id", "name", "width", "height", "format", "byte_size"], opts);
    Ok(())
}

#[derive(Args)]
pub struct ResourceArgs {
    pub id: String,
}

pub fn resource(args: ResourceArgs, session: &str, opts: &OutputOpts) -> Result<()> {
    let client = DaemonClient::connect(session)?;
    let result = client.send("resource", serde_json::json!({"id": args.id}))?;
    render_detail(&result, opts);
    Ok(())
}

pub fn passes(session: &str, opts: &OutputOpts) -> Result<()> {
    let client = DaemonClient::connect(session)?;
    let result = client.send("passes", serde_json::json!({}))?;
    let rows = result.get("passes").and_then(|v| v.as_array()).cloned().unwrap_or_default();
    render_list(&rows, &["name", "begin_eid", "end_eid", "draws", "dispatches", "triangles"], opts);
    Ok(())
}

#[derive(Args)]
pub struct PassArgs {
    /// Pass name (e.g. "GBuffer") or numeric index.
    pub name: String,
}

pub fn pass(args: PassArgs, session: &str, opts: &OutputOpts) -> Result<()> {
    let client = DaemonClient::connect(session)?;
    let params = match args.name.parse::<u32>() {
        Ok(index) => serde_json::json!({"index": index}),
        Err(_) => serde_json::json!({"name": args.name}),
    };
    let result = client.send("pass", params)?;
    render_detail(&result, opts);
    Ok(())
}

#[derive(Args)]
pub struct UsageArgs {
    pub id: String,
}

pub fn usage(args: UsageArgs, session: &str, opts: &OutputOpts) -> Result<()> {
    let client = DaemonClient::connect(session)?;
    let result = client.send("usage", serde_json::json!({"id": args.id}))?;
    render_detail(&result, opts);
    Ok(())
}
