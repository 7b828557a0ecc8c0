use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "authbook",
    about = "AuthBook: reusable test-account credentials per product address",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Backing YAML document, overriding the configured location
    #[arg(long, global = true)]
    pub data_file: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate credentials without storing them
    Generate(GenerateArgs),
    /// Generate credentials for a run and store them
    Provision(ProvisionArgs),
    /// Write account views from JSON into one node
    Write(WriteArgs),
    /// Append a step record to one node
    Step(StepArgs),
    /// Show one view of one node
    Read(ReadArgs),
    /// Resolve credentials for addresses from existing data
    Resolve(ResolveArgs),
    /// List projects, or the files of one project
    List(ListArgs),
}

/// Identifies one node of the document.
#[derive(Args)]
pub struct NodeArgs {
    #[arg(short, long)]
    pub project: String,
    #[arg(short, long)]
    pub file: String,
}

#[derive(Args)]
pub struct GenerateArgs {
    pub addresses: Vec<String>,
    /// One credential per argument, duplicates included
    #[arg(long)]
    pub list: bool,
}

#[derive(Args)]
pub struct ProvisionArgs {
    #[command(flatten)]
    pub node: NodeArgs,
    #[arg(required = true)]
    pub addresses: Vec<String>,
}

#[derive(Args)]
pub struct WriteArgs {
    #[command(flatten)]
    pub node: NodeArgs,
    /// JSON object, `@<path>` to read a file, or `-` for stdin
    #[arg(long)]
    pub input: String,
}

#[derive(Args)]
pub struct StepArgs {
    #[command(flatten)]
    pub node: NodeArgs,
    #[arg(long)]
    pub index: i64,
    #[arg(long, default_value = "")]
    pub name: String,
    #[arg(long, default_value = "")]
    pub event: String,
    /// JSON object, `@<path>` to read a file, or `-` for stdin
    #[arg(long, default_value = "{}")]
    pub input: String,
}

#[derive(Args)]
pub struct ReadArgs {
    #[command(flatten)]
    pub node: NodeArgs,
    #[arg(long, default_value = "address")]
    pub view: View,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum View {
    Address,
    Order,
    Slots,
    AddressSlots,
    Steps,
}

#[derive(Args)]
pub struct ResolveArgs {
    pub addresses: Vec<String>,
}

#[derive(Args)]
pub struct ListArgs {
    #[arg(short, long)]
    pub project: Option<String>,
}
