use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "fsim",
    about = "Filesystem simulator with an append-only operation journal",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Journal file (overrides the config file)
    #[arg(short, long, global = true)]
    pub journal: Option<PathBuf>,

    /// TOML settings file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the interactive shell (default)
    Shell,
    /// Run shell commands from a script file, one per line
    Run(RunArgs),
}

#[derive(Args)]
pub struct RunArgs {
    pub script: PathBuf,
}
