// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output rendering: TSV for lists, key:value for detail, with `--json` and
//! `--jsonl` overrides (spec §6.3). Per-subcommand formatting is explicitly
//! mechanical — this module keeps it that way rather than growing a second
//! presentation layer.

use clap::Args;
use serde_json::Value;

#[derive(Args, Debug, Clone, Default)]
pub struct OutputOpts {
    /// Emit a single JSON document instead of TSV/key:value.
    #[arg(long, global = true)]
    pub json: bool,

    /// Emit one JSON object per line instead of TSV/key:value.
    #[arg(long, global = true)]
    pub jsonl: bool,

    /// Omit the TSV header line.
    #[arg(long, global = true)]
    pub no_header: bool,

    /// Suppress informational output; only print requested data.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Comma-separated column list, overriding the command's default.
    #[arg(long, global = true)]
    pub columns: Option<String>,

    /// Sort rows by this field before printing.
    #[arg(long, global = true)]
    pub sort: Option<String>,

    /// Limit the number of rows printed.
    #[arg(long, global = true)]
    pub limit: Option<usize>,

    /// Restrict rows to an inclusive `lo-hi` eid range.
    #[arg(long, global = true)]
    pub range: Option<String>,
}

impl OutputOpts {
    fn columns(&self) -> Option<Vec<String>> {
        self.columns.as_ref().map(|s| s.split(',').map(str::trim).map(String::from).collect())
    }

    fn parsed_range(&self) -> Option<(u64, u64)> {
        let (lo, hi) = self.range.as_ref()?.split_once('-')?;
        Some((lo.trim().parse().ok()?, hi.trim().parse().ok()?))
    }
}

fn plain(v: &Value) -> String {
    match v {
        Value::Null => "-".to_string(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(a) => a.iter().map(plain).collect::<Vec<_>>().join(","),
        Value::Object(_) => serde_json::to_string(v).unwrap_or_default(),
    }
}

/// Render a list of JSON objects (spec §6.3: TSV by default, header unless
/// `--no-header`, `--json`/`--jsonl` overrides).
pub fn render_list(rows: &[Value], default_columns: &[&str], opts: &OutputOpts) {
    let mut rows: Vec<Value> = rows.to_vec();

    if let Some(field) = &opts.sort {
        rows.sort_by(|a, b| plain(a.get(field).unwrap_or(&Value::Null)).cmp(&plain(b.get(field).unwrap_or(&Value::Null))));
    }

    if let Some((lo, hi)) = opts.parsed_range() {
        rows.retain(|r| match r.get("eid").and_then(Value::as_u64) {
            Some(eid) => eid >= lo && eid <= hi,
            None => true,
        });
    }

    if let Some(limit) = opts.limit {
        rows.truncate(limit);
    }

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&rows).unwrap_or_default());
        return;
    }
    if opts.jsonl {
        for row in &rows {
            println!("{}", serde_json::to_string(row).unwrap_or_default());
        }
        return;
    }

    let columns = opts.columns().unwrap_or_else(|| default_columns.iter().map(|s| s.to_string()).collect());
    if !opts.no_header {
        println!("{}", columns.join("\t"));
    }
    for row in &rows {
        let line = columns.iter().map(|c| plain(row.get(c).unwrap_or(&Value::Null))).collect::<Vec<_>>().join("\t");
        println!("{line}");
    }
}

/// Render a single JSON object as a key:value block, or as JSON with
/// `--json`/`--jsonl`.
pub fn render_detail(obj: &Value, opts: &OutputOpts) {
    if opts.json || opts.jsonl {
        println!("{}", serde_json::to_string_pretty(obj).unwrap_or_default());
        return;
    }
    let Value::Object(map) = obj else {
        println!("{}", plain(obj));
        return;
    };
    for (key, value) in map {
        println!("{key}:{}", plain(value));
    }
}
