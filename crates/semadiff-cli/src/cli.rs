use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "semadiff",
    about = "Format-aware semantic file diff",
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

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compare two versions of a file
    Diff(DiffArgs),
    /// Show which diff strategy a path resolves to
    Detect(DetectArgs),
}

#[derive(Args)]
pub struct DiffArgs {
    /// Base version of the file; a missing file means "did not exist"
    pub base: String,
    /// Head version of the file; a missing file means "does not exist"
    pub head: String,
    /// Display path used for format detection and diff headers
    #[arg(long)]
    pub label: Option<String>,
}

#[derive(Args)]
pub struct DetectArgs {
    pub path: String,
}
