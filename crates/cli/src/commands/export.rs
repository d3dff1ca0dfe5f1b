// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `texture`, `rt`, `buffer` (spec §4.8, §6.3, §6.4). Binary results never
//! cross the wire — the daemon writes to a path under its session temp
//! directory and hands back `{path, size}`; this module copies those bytes
//! to `--out` or, absent that, to stdout, refusing a TTY without `--force`.

use std::io::{IsTerminal, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use clap::Args;

use crate::client::DaemonClient;
use crate::output::OutputOpts;

fn deliver(path: &Path, out: Option<&Path>, force: bool) -> Result<()> {
    let bytes = std::fs::read(path)?;
    if let Some(out) = out {
        std::fs::write(out, &bytes)?;
        return Ok(());
    }
    if std::io::stdout().is_terminal() && !force {
        bail!("refusing to write binary data to a terminal; redirect stdout, pass --out, or pass --force");
    }
    std::io::stdout().write_all(&bytes)?;
    Ok(())
}

#[derive(Args)]
pub struct TextureArgs {
    pub id: String,
    #[arg(long)]
    pub mip: Option<u32>,
    #[arg(long)]
    pub slice: Option<u32>,
    /// Export the raw texel bytes instead of a PNG.
    #[arg(long)]
    pub raw: bool,
    #[arg(long)]
    pub out: Option<PathBuf>,
    #[arg(long)]
    pub force: bool,
}

pub fn texture(args: TextureArgs, session: &str, _opts: &OutputOpts) -> Result<()> {
    let client = DaemonClient::connect(session)?;
    let mut params = serde_json::json!({"id": args.id});
    if let Some(mip) = args.mip {
        params["mip"] = mip.into();
    }
    if let Some(slice) = args.slice {
        params["slice"] = slice.into();
    }
    let method = if args.raw { "tex_raw" } else { "tex_export" };
    let result = client.send(method, params)?;
    let path = result.get("path").and_then(|v| v.as_str()).ok_or_else(|| anyhow::anyhow!("daemon did not return a path"))?;
    deliver(Path::new(path), args.out.as_deref(), args.force)
}

#[derive(Args)]
pub struct RtArgs {
    #[arg(long)]
    pub eid: Option<u32>,
    /// Export the bound depth target instead of the first color target.
    #[arg(long)]
    pub depth: bool,
    /// Export the debug overlay instead.
    #[arg(long)]
    pub overlay: bool,
    #[arg(long)]
    pub out: Option<PathBuf>,
    #[arg(long)]
    pub force: bool,
}

pub fn rt(args: RtArgs, session: &str, _opts: &OutputOpts) -> Result<()> {
    let client = DaemonClient::connect(session)?;
    let mut params = serde_json::json!({});
    if let Some(eid) = args.eid {
        params["eid"] = eid.into();
    }
    let method = if args.overlay {
        "rt_overlay"
    } else if args.depth {
        "rt_depth"
    } else {
        "rt_export"
    };
    let result = client.send(method, params)?;
    let path = result.get("path").and_then(|v| v.as_str()).ok_or_else(|| anyhow::anyhow!("daemon did not return a path"))?;
    deliver(Path::new(path), args.out.as_deref(), args.force)
}

#[derive(Args)]
pub struct BufferArgs {
    pub id: String,
    #[arg(long)]
    pub offset: Option<u64>,
    #[arg(long)]
    pub length: Option<u64>,
    #[arg(long)]
    pub out: Option<PathBuf>,
    #[arg(long)]
    pub force: bool,
}

pub fn buffer(args: BufferArgs, session: &str, _opts: &OutputOpts) -> Result<()> {
    let client = DaemonClient::connect(session)?;
    let mut params = serde_json::json!({"id": args.id});
    if let Some(offset) = args.offset {
        params["offset"] = offset.into();
    }
    if let Some(length) = args.length {
        params["length"] = length.into();
    }
    let result = client.send("buf_raw", params)?;
    let path = result.get("path").and_then(|v| v.as_str()).ok_or_else(|| anyhow::anyhow!("daemon did not return a path"))?;
    deliver(Path::new(path), args.out.as_deref(), args.force)
}
