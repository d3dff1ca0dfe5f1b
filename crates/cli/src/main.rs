// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! rdc - GPU frame capture inspector CLI

mod client;
mod commands;
mod env;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{export, inspect, pipeline, resource, search, session, shader, util, vfs};
use output::OutputOpts;

#[derive(Parser)]
#[command(name = "rdc", version, about = "Inspect GPU frame captures")]
struct Cli {
    /// Session name; defaults to $RDC_SESSION or "default".
    #[arg(long, global = true)]
    session: Option<String>,

    #[command(flatten)]
    output: OutputOpts,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fork a daemon over a capture file and wait for it to come up
    Open(session::OpenArgs),
    /// Shut down the daemon and remove the session descriptor
    Close,
    /// Report daemon uptime, capture path, and cursor position
    Status,
    /// Move the replay cursor to an event id
    Goto(session::GotoArgs),
    /// Capture-level metadata (API, dimensions, driver, frame count)
    Info,
    /// Aggregate counts (draw calls, triangles, dispatches, ...)
    Stats,
    /// List every event in the capture
    Events(inspect::EventsArgs),
    /// List draw/dispatch events
    Draws(inspect::DrawsArgs),
    /// A single event's detail
    Event(inspect::EventArgs),
    /// A single draw/dispatch's detail
    Draw(inspect::DrawArgs),
    /// Debug/validation log messages
    Log(inspect::LogArgs),
    /// Count events, draws, passes, or resources
    Count(inspect::CountArgs),
    /// Fixed-function pipeline state for a draw
    Pipeline(pipeline::PipelineArgs),
    /// Bound resource descriptors for a draw
    Bindings(pipeline::BindingsArgs),
    /// A shader stage's identity, reflection, constants, source, or disasm
    Shader(shader::ShaderArgs),
    /// List every shader in the capture
    Shaders(shader::ShadersArgs),
    /// Per-draw shader-id map
    ShaderMap,
    /// List every resource (texture/buffer) in the capture
    Resources,
    /// A single resource's detail
    Resource(resource::ResourceArgs),
    /// List render passes
    Passes,
    /// A single pass's detail
    Pass(resource::PassArgs),
    /// Where a resource is read/written across the frame
    Usage(resource::UsageArgs),
    /// Export a texture as PNG, or raw texels with --raw
    Texture(export::TextureArgs),
    /// Export a render target (color, --depth, or --overlay)
    Rt(export::RtArgs),
    /// Export raw buffer bytes
    Buffer(export::BufferArgs),
    /// Filter events by a regex over their name
    Search(search::SearchArgs),
    /// List available GPU performance counters
    Counters,
    /// List a VFS directory's children
    Ls(vfs::LsArgs),
    /// Print a VFS subtree's shape
    Tree(vfs::TreeArgs),
    /// Print or export a VFS leaf's payload
    Cat(vfs::CatArgs),
    /// Check the CLI's environment and list live sessions
    Doctor,
    /// Generate shell completions (not provided by this build)
    Completion(util::CompletionArgs),
    /// Invoke a vendor capture tool (not provided by this build)
    Capture(util::CaptureArgs),
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let session = cli.session.unwrap_or_else(env::default_session);
    let opts = &cli.output;

    match cli.command {
        Command::Open(args) => session::open(args, &session, opts),
        Command::Close => session::close(&session),
        Command::Status => session::status(&session, opts),
        Command::Goto(args) => session::goto(args, &session, opts),
        Command::Info => inspect::info(&session, opts),
        Command::Stats => inspect::stats(&session, opts),
        Command::Events(args) => inspect::events(args, &session, opts),
        Command::Draws(args) => inspect::draws(args, &session, opts),
        Command::Event(args) => inspect::event(args, &session, opts),
        Command::Draw(args) => inspect::draw(args, &session, opts),
        Command::Log(args) => inspect::log(args, &session, opts),
        Command::Count(args) => inspect::count(args, &session, opts),
        Command::Pipeline(args) => pipeline::pipeline(args, &session, opts),
        Command::Bindings(args) => pipeline::bindings(args, &session, opts),
        Command::Shader(args) => shader::shader(args, &session, opts),
        Command::Shaders(args) => shader::shaders(args, &session, opts),
        Command::ShaderMap => shader::shader_map(&session, opts),
        Command::Resources => resource::resources(&session, opts),
        Command::Resource(args) => resource::resource(args, &session, opts),
        Command::Passes => resource::passes(&session, opts),
        Command::Pass(args) => resource::pass(args, &session, opts),
        Command::Usage(args) => resource::usage(args, &session, opts),
        Command::Texture(args) => export::texture(args, &session, opts),
        Command::Rt(args) => export::rt(args, &session, opts),
        Command::Buffer(args) => export::buffer(args, &session, opts),
        Command::Search(args) => search::search(args, &session, opts),
        Command::Counters => search::counters(&session, opts),
        Command::Ls(args) => vfs::ls(args, &session, opts),
        Command::Tree(args) => vfs::tree(args, &session, opts),
        Command::Cat(args) => vfs::cat(args, &session, opts),
        Command::Doctor => util::doctor(opts),
        Command::Completion(args) => util::completion(args),
        Command::Capture(args) => util::capture(args),
    }
}
