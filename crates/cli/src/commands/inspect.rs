// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `info`, `stats`, `events`, `draws`, `event`, `draw`, `log`, `count`
//! (spec §4.7, §6.4).

use anyhow::Result;
use clap::Args;

use crate::client::DaemonClient;
use crate::output::{render_detail, render_list, OutputOpts};

pub fn info(session: &str, opts: &OutputOpts) -> Result<()> {
    let client = DaemonClient::connect(session)?;
    let result = client.send("info", serde_json::json!({}))?;
    render_detail(&result, opts);
    Ok(())
}

pub fn stats(session: &str, opts: &OutputOpts) -> Result<()> {
    let client = DaemonClient::connect(session)?;
    let result = client.send("stats", serde_json::json!({}))?;
    render_detail(&result, opts);
    Ok(())
}

#[derive(Args)]
pub struct EventsArgs {
    /// Filter by event type: draw, dispatch, marker.
    #[arg(long = "type")]
    pub event_type: Option<String>,
}

pub fn events(args: EventsArgs, session: &str, opts: &OutputOpts) -> Result<()> {
    let client = DaemonClient::connect(session)?;
    let mut params = serde_json::json!({});
    if let Some(t) = args.event_type {
        params["type"] = t.into();
    }
    if let Some(limit) = opts.limit {
        params["limit"] = (limit as u64).into();
    }
    let result = client.send("events", params)?;
    let rows = result.get("events").and_then(|v| v.as_array()).cloned().unwrap_or_default();
    render_list(&rows, &["eid", "type", "name"], opts);
    Ok(())
}

#[derive(Args)]
pub struct DrawsArgs {
    /// Restrict to draws/dispatches within this render pass.
    #[arg(long)]
    pub pass: Option<String>,
}

pub fn draws(args: DrawsArgs, session: &str, opts: &OutputOpts) -> Result<()> {
    let client = DaemonClient::connect(session)?;
    let mut params = serde_json::json!({});
    if let Some(pass) = args.pass {
        params["pass"] = pass.into();
    }
    if let Some(limit) = opts.limit {
        params["limit"] = (limit as u64).into();
    }
    let result = client.send("draws", params)?;
    let rows = result.get("draws").and_then(|v| v.as_array()).cloned().unwrap_or_default();
    render_list(&rows, &["eid", "type", "triangles", "instances", "pass"], opts);
    if !opts.quiet && !opts.json && !opts.jsonl {
        if let Some(summary) = result.get("summary").and_then(|v| v.as_str()) {
            println!("{summary}");
        }
    }
    Ok(())
}

#[derive(Args)]
pub struct EventArgs {
    pub eid: u32,
}

pub fn event(args: EventArgs, session: &str, opts: &OutputOpts) -> Result<()> {
    let client = DaemonClient::connect(session)?;
    let result = client.send("event", serde_json::json!({"eid": args.eid}))?;
    render_detail(&result, opts);
    Ok(())
}

#[derive(Args)]
pub struct DrawArgs {
    /// Defaults to the current event if omitted.
    pub eid: Option<u32>,
}

pub fn draw(args: DrawArgs, session: &str, opts: &OutputOpts) -> Result<()> {
    let client = DaemonClient::connect(session)?;
    let mut params = serde_json::json!({});
    if let Some(eid) = args.eid {
        params["eid"] = eid.into();
    }
    let result = client.send("draw", params)?;
    render_detail(&result, opts);
    Ok(())
}

#[derive(Args)]
pub struct LogArgs {
    /// Filter by severity (error, warning, info, ...).
    #[arg(long)]
    pub level: Option<String>,
    /// Restrict to a single event id.
    #[arg(long)]
    pub eid: Option<u32>,
}

pub fn log(args: LogArgs, session: &str, opts: &OutputOpts) -> Result<()> {
    let client = DaemonClient::connect(session)?;
    let mut params = serde_json::json!({});
    if let Some(level) = args.level {
        params["level"] = level.into();
    }
    if let Some(eid) = args.eid {
        params["eid"] = eid.into();
    }
    let result = client.send("log", params)?;
    let rows = result.get("messages").and_then(|v| v.as_array()).cloned().unwrap_or_default();
    render_list(&rows, &["eid", "severity", "category", "text"], opts);
    Ok(())
}

#[derive(Args)]
pub struct CountArgs {
    /// events, draws, passes, or resources.
    #[arg(default_value = "events")]
    pub what: String,
}

pub fn count(args: CountArgs, session: &str, opts: &OutputOpts) -> Result<()> {
    let client = DaemonClient::connect(session)?;
    let result = client.send("count", serde_json::json!({"what": args.what}))?;
    render_detail(&result, opts);
    Ok(())
}
