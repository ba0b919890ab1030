//          Copyright Nick G 2023.
// Distributed under the Boost Software License, Version 1.0.
//    (See accompanying file LICENSE or copy at
//          https://www.boost.org/LICENSE_1_0.txt)

mod cmd;
mod error;
mod patch_dir;
mod patcher;
mod report;
mod runner;

use crate::patch_dir::{Order, PatchDir};
use crate::patcher::{Mode, Patcher};
use crate::report::Reporter;
use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Directory holding the patch files
    #[arg(long, env = "PATCH_RUNNER_DIR", default_value = patch_dir::DEFAULT_DIR, global = true)]
    patches: PathBuf,

    /// Only files ending in this extension are treated as patches
    #[arg(long, env = "PATCH_RUNNER_EXTENSION", default_value = patch_dir::DEFAULT_EXTENSION, global = true)]
    extension: String,

    /// The patch program to run
    #[arg(short, long, env = "PATCH_RUNNER_TOOL", default_value = patcher::DEFAULT_TOOL, global = true)]
    tool: String,

    /// Run the patch program from this directory instead of the current one
    #[arg(short = 'C', long, global = true)]
    directory: Option<PathBuf>,

    /// The order to run the patches in
    #[arg(long, value_enum, default_value_t = Order::Name, global = true)]
    order: Order,

    /// Report what would happen without changing any files
    #[arg(long, global = true)]
    dry_run: bool,

    /// More logging on stderr, repeat for even more
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Clone, Copy)]
enum Command {
    /// Apply every patch in the patch directory
    Apply,
    /// Reverse every previously applied patch in the patch directory
    Undo,
}

impl From<Command> for Mode {
    fn from(command: Command) -> Self {
        match command {
            Command::Apply => Mode::Apply,
            Command::Undo => Mode::Reverse,
        }
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let summary = run_patches(&cli)?;
    if summary.success() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run_patches(cli: &Cli) -> Result<report::Summary> {
    let mode = Mode::from(cli.command);
    let patches = match cli.directory {
        // Patch paths handed to the tool have to survive it running somewhere else
        Some(_) => std::env::current_dir()?.join(&cli.patches),
        None => cli.patches.clone(),
    };
    let dir = PatchDir::new(patches, &cli.extension);
    let mut patcher = Patcher::system(&cli.tool, cli.directory.clone()).dry_run(cli.dry_run);

    runner::run(
        &mut patcher,
        mode,
        &dir,
        cli.order,
        Reporter::new(io::stdout().lock(), mode),
    )
}
