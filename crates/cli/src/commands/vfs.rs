// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ls`, `tree`, `cat` (spec §4.5, §6.3).
//!
//! `vfs_ls`/`vfs_tree` only describe tree shape; there is no generic
//! invoke-by-path RPC method. `cat` resolves a path to the method + params
//! it names by combining the `handler` field `vfs_ls` returns with the eid
//! / id / name / stage / set segments the path itself carries, mirroring
//! the layout `VfsTree::build_static` encodes on the daemon side.

use std::io::{IsTerminal, Write};
use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use serde_json::{json, Value};

use crate::client::DaemonClient;
use crate::output::{render_detail, render_list, OutputOpts};

#[derive(Args)]
pub struct LsArgs {
    #[arg(default_value = "/")]
    pub path: String,
}

pub fn ls(args: LsArgs, session: &str, opts: &OutputOpts) -> Result<()> {
    let client = DaemonClient::connect(session)?;
    let result = client.send("vfs_ls", json!({"path": args.path}))?;
    let children = result.get("children").and_then(Value::as_array).cloned().unwrap_or_default();
    let rows: Vec<Value> = children.into_iter().map(|c| json!({"name": c})).collect();
    render_list(&rows, &["name"], opts);
    Ok(())
}

#[derive(Args)]
pub struct TreeArgs {
    #[arg(default_value = "/")]
    pub path: String,
    #[arg(long, default_value_t = 2)]
    pub depth: u32,
}

pub fn tree(args: TreeArgs, session: &str, opts: &OutputOpts) -> Result<()> {
    let client = DaemonClient::connect(session)?;
    let result = client.send("vfs_tree", json!({"path": args.path, "depth": args.depth}))?;
    render_detail(&result, opts);
    Ok(())
}

#[derive(Args)]
pub struct CatArgs {
    pub path: String,
    #[arg(long)]
    pub out: Option<PathBuf>,
    #[arg(long)]
    pub force: bool,
}

/// Split a normalized path into its non-empty segments.
fn segments(path: &str) -> Vec<&str> {
    path.trim_matches('/').split('/').filter(|s| !s.is_empty()).collect()
}

/// Derive RPC params from the path segments, keyed by the daemon's own
/// naming for each leaf (spec §4.5's static layout).
fn params_for(path: &str) -> Result<Value> {
    let segs = segments(path);
    let params = match segs.as_slice() {
        [] | ["info" | "stats" | "log" | "resources" | "shaders" | "counters"] => json!({}),
        ["events", eid] => json!({"eid": parse_eid(eid)?}),
        ["draws", eid, "pipeline" | "targets" | "descriptors" | "postvs" | "vbuffer" | "ibuffer"] => {
            json!({"eid": parse_eid(eid)?})
        }
        ["draws", eid, "shader", stage] => json!({"eid": parse_eid(eid)?, "stage": stage}),
        ["draws", eid, "bindings", set] => json!({"eid": parse_eid(eid)?, "set": parse_eid(set)?}),
        ["draws", eid, "cbuffer", set] => json!({"eid": parse_eid(eid)?, "set": parse_eid(set)?}),
        ["passes", name, "info"] => json!({"name": name}),
        ["textures", id, "info" | "data" | "image.png"] => json!({"id": id}),
        ["buffers", id, "info" | "data"] => json!({"id": id}),
        _ => bail!("`{path}` has no known handler; run `rdc tree {path}` to inspect it"),
    };
    Ok(params)
}

fn parse_eid(s: &str) -> Result<u32> {
    s.parse().map_err(|_| anyhow::anyhow!("`{s}` is not a valid eid"))
}

pub fn cat(args: CatArgs, session: &str, opts: &OutputOpts) -> Result<()> {
    let client = DaemonClient::connect(session)?;
    let listing = client.send("vfs_ls", json!({"path": args.path}))?;
    let kind = listing.get("kind").and_then(Value::as_str).unwrap_or("");
    if kind == "dir" {
        bail!("`{}` is a directory; use `rdc ls {}`", args.path, args.path);
    }
    let handler = listing
        .get("handler")
        .and_then(Value::as_str)
        .ok_or_else(|| anyhow::anyhow!("`{}` has no associated handler", args.path))?;

    let params = params_for(&args.path)?;
    let result = client.send(handler, params)?;

    if kind == "leaf_bin" {
        let path = result.get("path").and_then(Value::as_str).ok_or_else(|| anyhow::anyhow!("daemon did not return a path"))?;
        let bytes = std::fs::read(path)?;
        if let Some(out) = &args.out {
            std::fs::write(out, &bytes)?;
            return Ok(());
        }
        if std::io::stdout().is_terminal() && !args.force {
            bail!("refusing to write binary data to a terminal; redirect stdout, pass --out, or pass --force");
        }
        std::io::stdout().write_all(&bytes)?;
        return Ok(());
    }

    render_detail(&result, opts);
    Ok(())
}
