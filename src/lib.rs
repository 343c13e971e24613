pub mod cli;
pub mod commands;
pub mod hostname;
pub mod io_utils;
pub mod pretty;
pub mod schema;
pub mod transform;

use std::{env, sync::OnceLock};

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;

use crate::cli::{Cli, Commands};

pub use crate::pretty::{PrettyPrintError, diff_rendered, pretty_print};
pub use crate::schema::{FieldMode, FieldType, Schema, SchemaField};
pub use crate::transform::{customize, relax};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("schema_tree", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Print(args) => commands::print(&args),
        Commands::Relax(args) => commands::relax(&args),
        Commands::Customize(args) => commands::customize(&args),
        Commands::Diff(args) => commands::diff(&args),
        Commands::Hostname(args) => commands::hostname(&args),
    }
}
