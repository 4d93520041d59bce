use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tkit_diff::Algorithm;

#[derive(Parser)]
#[command(
    name = "tkit",
    about = "tkit: compare texts line by line and word by word",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum Style {
    /// Differing words in [brackets]
    Brackets,
    /// Terminal colours
    Color,
    /// HTML spans
    Html,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compare two files ("-" reads standard input)
    Diff(DiffArgs),
    /// Start the HTTP server
    Serve(ServeArgs),
}

#[derive(Args)]
pub struct DiffArgs {
    pub old: PathBuf,
    pub new: PathBuf,
    /// Line alignment. `lcs` needs memory proportional to both line counts and
    /// is capped at 5000 lines by default; use `myers` for large files
    #[arg(short, long, default_value = "lcs")]
    pub algorithm: Algorithm,
    #[arg(long, default_value = "color")]
    pub style: Style,
    /// Reject documents with more lines than this
    #[arg(long)]
    pub max_lines: Option<usize>,
    /// Reject documents larger than this many bytes
    #[arg(long)]
    pub max_bytes: Option<usize>,
}

#[derive(Args)]
pub struct ServeArgs {
    #[arg(long)]
    pub bind: Option<SocketAddr>,
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    #[arg(short, long)]
    pub algorithm: Option<Algorithm>,
}
