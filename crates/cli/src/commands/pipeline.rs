// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `pipeline`, `bindings` (spec §6.4). The CLI exposes the granular
//! `pipe_*`/`descriptors` methods through `--section`/`--binding` rather
//! than a subcommand per fixed-function stage.

use anyhow::Result;
use clap::Args;

use crate::client::DaemonClient;
use crate::output::{render_detail, render_list, OutputOpts};

#[derive(Args)]
pub struct PipelineArgs {
    /// Defaults to the current event if omitted.
    #[arg(long)]
    pub eid: Option<u32>,
    /// One fixed-function section: topology, viewport, scissor, blend,
    /// vinputs, samplers, vbuffers, ibuffer, push_constants, rasterizer,
    /// depth_stencil, msaa.
    #[arg(long)]
    pub section: Option<String>,
}

pub fn pipeline(args: PipelineArgs, session: &str, opts: &OutputOpts) -> Result<()> {
    let client = DaemonClient::connect(session)?;
    let mut params = serde_json::json!({});
    if let Some(eid) = args.eid {
        params["eid"] = eid.into();
    }
    if let Some(section) = args.section {
        params["section"] = section.into();
    }
    let result = client.send("pipeline", params)?;
    render_detail(&result, opts);
    Ok(())
}

#[derive(Args)]
pub struct BindingsArgs {
    #[arg(long)]
    pub eid: Option<u32>,
    #[arg(long)]
    pub binding: Option<u32>,
}

pub fn bindings(args: BindingsArgs, session: &str, opts: &OutputOpts) -> Result<()> {
    let client = DaemonClient::connect(session)?;
    let mut params = serde_json::json!({});
    if let Some(eid) = args.eid {
        params["eid"] = eid.into();
    }
    if let Some(binding) = args.binding {
        params["binding"] = binding.into();
    }
    let result = client.send("bindings", params)?;
    let rows = result.get("bindings").and_then(|v| v.as_array()).cloned().unwrap_or_default();
    render_list(&rows, &["stage", "set", "binding", "access", "resource_id", "sampler_id"], opts);
    Ok(())
}
