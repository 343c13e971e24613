//! Line-oriented rendering of a [`Schema`] for diffing and debugging.
//!
//! The test-mode layout is byte-stable and is compared against golden strings:
//!
//! ```text
//! [
//!   {"Name": "id", "Description": "", "Required": true, "Type": "INTEGER"},
//!   {"Name": "inner", "Description": "", "Type": "RECORD", "Schema": [
//!       {"Name": "raw", "Description": "", "Type": "BYTES"}
//!     ]}
//! ]
//! ```
//!
//! A sequence rendered at indentation `p` places its field lines at `p + 2`
//! and its closing bracket at `p`. The children of a record whose line sits
//! at `q` form a sequence at `q + 2`.

use serde::Serialize;
use similar::TextDiff;
use thiserror::Error;

use crate::schema::{FieldMode, FieldType, Schema, SchemaField};

const INDENT: usize = 2;

#[derive(Debug, Error)]
pub enum PrettyPrintError {
    #[error("Failed to encode attributes of field '{field}'")]
    Field {
        field: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to encode schema")]
    Tree(#[from] serde_json::Error),
}

/// Renders `schema` as text. With `test_mode` set the output follows the
/// compact one-line-per-field layout; otherwise every attribute of every
/// field is spelled out as indented JSON.
pub fn pretty_print(schema: &Schema, test_mode: bool) -> Result<String, PrettyPrintError> {
    if !test_mode {
        return render_diagnostic(schema);
    }
    let mut out = String::new();
    write_sequence(&mut out, schema.fields(), 0)?;
    out.push('\n');
    Ok(out)
}

fn write_sequence(
    out: &mut String,
    fields: &[SchemaField],
    base: usize,
) -> Result<(), PrettyPrintError> {
    out.push_str("[\n");
    let indent = base + INDENT;
    for (idx, field) in fields.iter().enumerate() {
        push_indent(out, indent);
        write_field(out, field, indent)?;
        if idx + 1 < fields.len() {
            out.push(',');
        }
        out.push('\n');
    }
    push_indent(out, base);
    out.push(']');
    Ok(())
}

fn write_field(out: &mut String, field: &SchemaField, indent: usize) -> Result<(), PrettyPrintError> {
    let encode_err = |source| PrettyPrintError::Field {
        field: field.name.clone(),
        source,
    };
    let name = serde_json::to_string(&field.name).map_err(encode_err)?;
    let description = serde_json::to_string(field.description_or_empty()).map_err(encode_err)?;
    let field_type = serde_json::to_string(&field.field_type).map_err(encode_err)?;

    out.push_str(&format!("{{\"Name\": {name}, \"Description\": {description}"));
    match field.mode {
        FieldMode::Required => out.push_str(", \"Required\": true"),
        FieldMode::Repeated => out.push_str(", \"Repeated\": true"),
        FieldMode::Nullable => {}
    }
    out.push_str(&format!(", \"Type\": {field_type}"));
    if field.is_record() {
        out.push_str(", \"Schema\": ");
        write_sequence(out, &field.fields, indent + INDENT)?;
    }
    out.push('}');
    Ok(())
}

fn push_indent(out: &mut String, width: usize) {
    out.push_str(&" ".repeat(width));
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct FieldView<'a> {
    name: &'a str,
    description: &'a str,
    repeated: bool,
    required: bool,
    #[serde(rename = "Type")]
    field_type: FieldType,
    schema: Vec<FieldView<'a>>,
}

impl<'a> From<&'a SchemaField> for FieldView<'a> {
    fn from(field: &'a SchemaField) -> Self {
        Self {
            name: &field.name,
            description: field.description_or_empty(),
            repeated: field.is_repeated(),
            required: field.is_required(),
            field_type: field.field_type,
            schema: field.fields.iter().map(FieldView::from).collect(),
        }
    }
}

fn render_diagnostic(schema: &Schema) -> Result<String, PrettyPrintError> {
    let views = schema.iter().map(FieldView::from).collect::<Vec<_>>();
    let mut rendered = serde_json::to_string_pretty(&views)?;
    rendered.push('\n');
    Ok(rendered)
}

/// Unified diff between the test-mode renderings of two schemas. Returns an
/// empty string when they render identically.
pub fn diff_rendered(before: &Schema, after: &Schema) -> Result<String, PrettyPrintError> {
    let old = pretty_print(before, true)?;
    let new = pretty_print(after, true)?;
    if old == new {
        return Ok(String::new());
    }
    let diff = TextDiff::from_lines(old.as_str(), new.as_str());
    Ok(diff
        .unified_diff()
        .context_radius(3)
        .header("before", "after")
        .to_string())
}
