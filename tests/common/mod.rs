#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use proptest::prelude::*;
use schema_tree::{FieldMode, FieldType, Schema, SchemaField};
use tempfile::{TempDir, tempdir};

/// Schema as inferred from a record with two embedded integers, a nested
/// record holding a fixed-size byte array, a timestamp, and an integer
/// timestamp. Eight fields are required and one is repeated.
pub fn inferred_schema() -> Schema {
    Schema::new(vec![
        SchemaField::new("EmbeddedA", FieldType::Integer).required(),
        SchemaField::new("EmbeddedB", FieldType::Integer).required(),
        SchemaField::record(
            "Inner",
            vec![
                SchemaField::new("Integer", FieldType::Integer).required(),
                SchemaField::new("ByteSlice", FieldType::Bytes).required(),
                SchemaField::new("ByteArray", FieldType::Integer).repeated(),
                SchemaField::new("String", FieldType::String).required(),
            ],
        )
        .required(),
        SchemaField::new("Timestamp", FieldType::Timestamp).required(),
        SchemaField::new("IntTimestamp", FieldType::Integer).required(),
    ])
}

pub const INFERRED_SCHEMA_RENDERING: &str = r#"[
  {"Name": "EmbeddedA", "Description": "", "Required": true, "Type": "INTEGER"},
  {"Name": "EmbeddedB", "Description": "", "Required": true, "Type": "INTEGER"},
  {"Name": "Inner", "Description": "", "Required": true, "Type": "RECORD", "Schema": [
      {"Name": "Integer", "Description": "", "Required": true, "Type": "INTEGER"},
      {"Name": "ByteSlice", "Description": "", "Required": true, "Type": "BYTES"},
      {"Name": "ByteArray", "Description": "", "Repeated": true, "Type": "INTEGER"},
      {"Name": "String", "Description": "", "Required": true, "Type": "STRING"}
    ]},
  {"Name": "Timestamp", "Description": "", "Required": true, "Type": "TIMESTAMP"},
  {"Name": "IntTimestamp", "Description": "", "Required": true, "Type": "INTEGER"}
]
"#;

/// Name sequence at every level, depth-first, with a marker for each
/// record boundary so structure differences show up.
pub fn name_outline(fields: &[SchemaField]) -> Vec<String> {
    let mut outline = Vec::new();
    for field in fields {
        outline.push(field.name.clone());
        if field.is_record() {
            outline.push("[".to_string());
            outline.extend(name_outline(&field.fields));
            outline.push("]".to_string());
        }
    }
    outline
}

pub fn scalar_type_strategy() -> impl Strategy<Value = FieldType> {
    prop_oneof![
        Just(FieldType::String),
        Just(FieldType::Bytes),
        Just(FieldType::Integer),
        Just(FieldType::Float),
        Just(FieldType::Boolean),
        Just(FieldType::Timestamp),
        Just(FieldType::Date),
    ]
}

pub fn mode_strategy() -> impl Strategy<Value = FieldMode> {
    prop_oneof![
        Just(FieldMode::Nullable),
        Just(FieldMode::Required),
        Just(FieldMode::Repeated),
    ]
}

pub fn field_strategy() -> impl Strategy<Value = SchemaField> {
    let leaf = ("[a-e]{1,3}", scalar_type_strategy(), mode_strategy())
        .prop_map(|(name, field_type, mode)| SchemaField::new(name, field_type).with_mode(mode));
    leaf.prop_recursive(3, 32, 4, |inner| {
        ("[a-e]{1,3}", mode_strategy(), prop::collection::vec(inner, 1..4))
            .prop_map(|(name, mode, children)| SchemaField::record(name, children).with_mode(mode))
    })
}

pub fn schema_strategy() -> impl Strategy<Value = Schema> {
    prop::collection::vec(field_strategy(), 0..6).prop_map(Schema::new)
}

/// Scratch directory helper that cleans up files automatically on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes `contents` into a file under the workspace and returns the path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        let mut file = File::create(&path).expect("create temp file");
        file.write_all(contents.as_bytes())
            .expect("write temp file contents");
        path
    }

    pub fn write_schema(&self, name: &str, schema: &Schema) -> PathBuf {
        let json = serde_json::to_string_pretty(schema).expect("serialize schema");
        self.write(name, &json)
    }
}
