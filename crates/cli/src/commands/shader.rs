// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `shader`, `shaders`, `shader-map` (spec §6.3, §6.4). Disassembly,
//! reflection, constants, and source are reached through `shader --disasm`,
//! `--reflect`, `--constants`, `--source` rather than four more
//! subcommands, since they all key off the same (eid, stage) pair.

use anyhow::Result;
use clap::Args;

use crate::client::DaemonClient;
use crate::output::{render_detail, render_list, OutputOpts};

#[derive(Args)]
pub struct ShaderArgs {
    /// Defaults to the current event if omitted.
    #[arg(long)]
    pub eid: Option<u32>,
    /// Shader stage (vs, ps, cs, gs, hs, ds, ...).
    pub stage: String,
    /// Print the decoded constant-buffer variable tree instead of the
    /// shader's identity.
    #[arg(long)]
    pub constants: bool,
    /// Print reflection (inputs/outputs/constant blocks) instead.
    #[arg(long)]
    pub reflect: bool,
    /// Print preprocessed/debug source instead.
    #[arg(long)]
    pub source: bool,
    /// Disassemble to the given bytecode target instead.
    #[arg(long)]
    pub disasm: Option<String>,
}

pub fn shader(args: ShaderArgs, session: &str, opts: &OutputOpts) -> Result<()> {
    let client = DaemonClient::connect(session)?;
    let mut params = serde_json::json!({"stage": args.stage});
    if let Some(eid) = args.eid {
        params["eid"] = eid.into();
    }

    let result = if let Some(target) = args.disasm {
        params["target"] = target.into();
        client.send("shader_disasm", params)?
    } else if args.constants {
        client.send("shader_constants", params)?
    } else if args.reflect {
        client.send("shader_reflect", params)?
    } else if args.source {
        client.send("shader_source", params)?
    } else {
        client.send("shader", params)?
    };
    render_detail(&result, opts);
    Ok(())
}

#[derive(Args)]
pub struct ShadersArgs {
    /// Only shaders whose stage list contains this substring.
    #[arg(long)]
    pub stage: Option<String>,
}

pub fn shaders(args: ShadersArgs, session: &str, opts: &OutputOpts) -> Result<()> {
    let client = DaemonClient::connect(session)?;
    let mut params = serde_json::json!({});
    if let Some(stage) = args.stage {
        params["stage"] = stage.into();
    }
    let result = client.send("shaders", params)?;
    let rows = result.get("shaders").and_then(|v| v.as_array()).cloned().unwrap_or_default();
    render_list(&rows, &["id", "stages", "entry_point", "used_by_draws"], opts);
    Ok(())
}

pub fn shader_map(session: &str, opts: &OutputOpts) -> Result<()> {
    let client = DaemonClient::connect(session)?;
    let result = client.send("shader_map", serde_json::json!({}))?;
    let rows = result.get("draws").and_then(|v| v.as_array()).cloned().unwrap_or_default();
    render_list(&rows, &["eid", "shaders"], opts);
    Ok(())
}
