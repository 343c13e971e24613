use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about = "Relax, patch, and render nested table schemas", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Render a schema as indented text, one line per field
    Print(PrintArgs),
    /// Clear the required marker from all but the listed top-level fields
    Relax(RelaxArgs),
    /// Replace field definitions by name anywhere in the schema
    Customize(CustomizeArgs),
    /// Show a line diff between the renderings of two schemas
    Diff(DiffArgs),
    /// Split a platform hostname into its parts
    Hostname(HostnameArgs),
}

#[derive(Debug, Args)]
pub struct PrintArgs {
    /// Schema JSON file (`-` for stdin)
    #[arg(short, long)]
    pub schema: PathBuf,
    /// Spell out every attribute instead of the compact golden layout
    #[arg(long)]
    pub diagnostic: bool,
}

#[derive(Debug, Args)]
pub struct RelaxArgs {
    /// Schema JSON file (`-` for stdin)
    #[arg(short, long)]
    pub schema: PathBuf,
    /// Top-level fields that stay required (comma-separated or repeated)
    #[arg(short, long = "keep", value_delimiter = ',', action = clap::ArgAction::Append)]
    pub keep: Vec<String>,
    /// Output file (stdout if omitted or `-`)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Emit the text rendering instead of JSON
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Debug, Args)]
pub struct CustomizeArgs {
    /// Schema JSON file (`-` for stdin)
    #[arg(short, long)]
    pub schema: PathBuf,
    /// Substitutions of the form `name=type[:mode]`, e.g. `ByteArray=integer:required`
    #[arg(long = "substitute", action = clap::ArgAction::Append, required = true)]
    pub substitutions: Vec<String>,
    /// Output file (stdout if omitted or `-`)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Emit the text rendering instead of JSON
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// Schema JSON file on the left-hand side
    pub before: PathBuf,
    /// Schema JSON file on the right-hand side
    pub after: PathBuf,
}

#[derive(Debug, Args)]
pub struct HostnameArgs {
    /// Hostname to parse, e.g. `mlab1-lga03.mlab-oti.measurement-lab.org`
    pub name: String,
    /// Print the parts as JSON
    #[arg(long)]
    pub json: bool,
}
