//! Non-destructive rewrites over a [`Schema`] tree.
//!
//! Every operation borrows its input and builds a fresh tree, children first,
//! so a caller can feed the same schema into several independent transforms.

use std::collections::{HashMap, HashSet};

use anyhow::{Result, anyhow, bail};
use log::{debug, trace};

use crate::schema::{FieldMode, FieldType, Schema, SchemaField};

/// Clears the `REQUIRED` marker from every top-level field whose name is not
/// in `keep_required`, and from every field nested under a `RECORD`
/// regardless of the keep-set. `REPEATED` fields are left alone.
pub fn relax(schema: &Schema, keep_required: &HashSet<String>) -> Schema {
    debug!(
        "Relaxing {} top-level field(s), keeping {} required",
        schema.len(),
        keep_required.len()
    );
    schema
        .iter()
        .map(|field| {
            let keep = keep_required.contains(&field.name);
            relax_field(field, keep)
        })
        .collect()
}

fn relax_field(field: &SchemaField, keep: bool) -> SchemaField {
    let mode = match field.mode {
        FieldMode::Required if !keep => FieldMode::Nullable,
        other => other,
    };
    let fields = if field.is_record() {
        field
            .fields
            .iter()
            .map(|child| relax_field(child, false))
            .collect()
    } else {
        field.fields.clone()
    };
    SchemaField {
        name: field.name.clone(),
        description: field.description.clone(),
        field_type: field.field_type,
        mode,
        fields,
    }
}

/// Replaces each field whose name is a key in `substitutions` with a copy of
/// the mapped field, at any depth. A replacement is terminal: its own
/// children are taken as-is and not scanned again.
pub fn customize(schema: &Schema, substitutions: &HashMap<String, SchemaField>) -> Schema {
    debug!(
        "Customizing {} top-level field(s) with {} substitution(s)",
        schema.len(),
        substitutions.len()
    );
    customize_fields(schema.fields(), substitutions).into()
}

fn customize_fields(
    fields: &[SchemaField],
    substitutions: &HashMap<String, SchemaField>,
) -> Vec<SchemaField> {
    fields
        .iter()
        .map(|field| match substitutions.get(&field.name) {
            Some(replacement) => {
                trace!("Substituting field '{}'", field.name);
                replacement.clone()
            }
            None if field.is_record() => SchemaField {
                name: field.name.clone(),
                description: field.description.clone(),
                field_type: field.field_type,
                mode: field.mode,
                fields: customize_fields(&field.fields, substitutions),
            },
            None => field.clone(),
        })
        .collect()
}

/// Builds a substitution table from `NAME=TYPE[:MODE]` tokens. Tokens may be
/// comma-separated within one spec or spread across several specs.
pub fn parse_substitutions<S: AsRef<str>>(specs: &[S]) -> Result<HashMap<String, SchemaField>> {
    let mut substitutions = HashMap::new();
    for raw in specs {
        for token in raw.as_ref().split(',') {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            let (name, definition) = token.split_once('=').ok_or_else(|| {
                anyhow!("Substitution '{token}' must use the form name=type[:mode]")
            })?;
            let name = name.trim();
            if name.is_empty() {
                bail!("Field name cannot be empty in substitution '{token}'");
            }
            let (type_part, mode_part) = match definition.split_once(':') {
                Some((ty, mode)) => (ty, Some(mode)),
                None => (definition, None),
            };
            let field_type = type_part
                .parse::<FieldType>()
                .map_err(|err| anyhow!("Substitution for '{name}' has invalid type: {err}"))?;
            if field_type.is_record() {
                bail!("Substitution for '{name}' cannot use RECORD without nested fields");
            }
            let mode = match mode_part {
                Some(mode) => mode
                    .parse::<FieldMode>()
                    .map_err(|err| anyhow!("Substitution for '{name}' has invalid mode: {err}"))?,
                None => FieldMode::Nullable,
            };
            let field = SchemaField::new(name, field_type).with_mode(mode);
            if substitutions.insert(name.to_string(), field).is_some() {
                bail!("Duplicate substitution for field '{name}'");
            }
        }
    }
    Ok(substitutions)
}
