//! Input and output plumbing for the command handlers.
//!
//! The `-` path convention routes through standard streams.

use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Read, Write},
    path::Path,
};

use anyhow::{Context, Result};

use crate::schema::Schema;

pub fn is_dash(path: &Path) -> bool {
    path == Path::new("-")
}

pub fn open_input(path: &Path) -> Result<Box<dyn Read>> {
    if is_dash(path) {
        Ok(Box::new(io::stdin().lock()))
    } else {
        let file = File::open(path).with_context(|| format!("Opening input file {path:?}"))?;
        Ok(Box::new(BufReader::new(file)))
    }
}

pub fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) if !is_dash(path) => {
            let file =
                File::create(path).with_context(|| format!("Creating output file {path:?}"))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        _ => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}

pub fn load_schema(path: &Path) -> Result<Schema> {
    if is_dash(path) {
        Schema::from_reader(open_input(path)?).context("Reading schema from stdin")
    } else {
        Schema::load(path)
    }
}

pub fn write_text(path: Option<&Path>, text: &str) -> Result<()> {
    let mut writer = open_output(path)?;
    writer
        .write_all(text.as_bytes())
        .context("Writing output")?;
    writer.flush().context("Flushing output")
}
