//! Handlers behind each `schema-tree` subcommand.

use std::{collections::HashSet, path::Path};

use anyhow::{Context, Result};
use log::{debug, info};

use crate::{
    cli::{CustomizeArgs, DiffArgs, HostnameArgs, PrintArgs, RelaxArgs},
    hostname::Hostname,
    io_utils,
    pretty,
    schema::Schema,
    transform,
};

pub fn print(args: &PrintArgs) -> Result<()> {
    let schema = io_utils::load_schema(&args.schema)
        .with_context(|| format!("Loading schema from {:?}", args.schema))?;
    let rendered = pretty::pretty_print(&schema, !args.diagnostic)
        .with_context(|| format!("Rendering schema from {:?}", args.schema))?;
    io_utils::write_text(None, &rendered)?;
    info!(
        "Rendered {} field(s) from {:?}",
        schema.total_fields(),
        args.schema
    );
    Ok(())
}

pub fn relax(args: &RelaxArgs) -> Result<()> {
    let schema = io_utils::load_schema(&args.schema)
        .with_context(|| format!("Loading schema from {:?}", args.schema))?;
    let keep = args
        .keep
        .iter()
        .map(|name| name.trim())
        .filter(|name| !name.is_empty())
        .map(|name| name.to_string())
        .collect::<HashSet<_>>();
    debug!("Keeping required: {:?}", keep);
    for name in &keep {
        if schema.field(name).is_none() {
            debug!("Keep-set entry '{name}' does not name a top-level field");
        }
    }

    let relaxed = transform::relax(&schema, &keep);
    emit(&relaxed, args.output.as_deref(), args.pretty)?;
    info!(
        "Relaxed schema: {} required field(s) before, {} after",
        schema.count_required(),
        relaxed.count_required()
    );
    Ok(())
}

pub fn customize(args: &CustomizeArgs) -> Result<()> {
    let schema = io_utils::load_schema(&args.schema)
        .with_context(|| format!("Loading schema from {:?}", args.schema))?;
    let substitutions = transform::parse_substitutions(&args.substitutions)
        .context("Parsing --substitute definitions")?;
    debug!(
        "Substitutions: {:?}",
        substitutions.keys().collect::<Vec<_>>()
    );

    let customized = transform::customize(&schema, &substitutions);
    emit(&customized, args.output.as_deref(), args.pretty)?;
    info!(
        "Customized schema with {} substitution(s); {} field(s) in result",
        substitutions.len(),
        customized.total_fields()
    );
    Ok(())
}

pub fn diff(args: &DiffArgs) -> Result<()> {
    let before = io_utils::load_schema(&args.before)
        .with_context(|| format!("Loading schema from {:?}", args.before))?;
    let after = io_utils::load_schema(&args.after)
        .with_context(|| format!("Loading schema from {:?}", args.after))?;
    let diff = pretty::diff_rendered(&before, &after).context("Rendering schemas for diff")?;
    if diff.is_empty() {
        info!("Schemas {:?} and {:?} render identically", args.before, args.after);
        return Ok(());
    }
    io_utils::write_text(None, &diff)
}

pub fn hostname(args: &HostnameArgs) -> Result<()> {
    let parsed = Hostname::parse(&args.name)?;
    let text = if args.json {
        let mut json =
            serde_json::to_string_pretty(&parsed).context("Serializing hostname parts")?;
        json.push('\n');
        json
    } else {
        format!(
            "machine: {}\nsite: {}\nproject: {}\ndomain: {}\nversion: {}\n",
            parsed.machine(),
            parsed.site(),
            parsed.project(),
            parsed.domain(),
            parsed.version()
        )
    };
    io_utils::write_text(None, &text)
}

fn emit(schema: &Schema, output: Option<&Path>, as_text: bool) -> Result<()> {
    let mut text = if as_text {
        pretty::pretty_print(schema, true).context("Rendering schema")?
    } else {
        schema.to_json()?
    };
    if !text.ends_with('\n') {
        text.push('\n');
    }
    io_utils::write_text(output, &text)?;
    if let Some(path) = output.filter(|path| !io_utils::is_dash(path)) {
        info!("Schema written to {path:?}");
    }
    Ok(())
}
