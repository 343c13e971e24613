//! Schema tree model and JSON interchange.
//!
//! A [`Schema`] is an ordered sequence of [`SchemaField`]s. Fields of type
//! [`FieldType::Record`] carry their own ordered children, so the whole
//! structure is a tree whose sibling order is significant.
//!
//! ## Responsibilities
//!
//! - Closed set of column types with upper-case wire names (`"INTEGER"`,
//!   `"RECORD"`, ...) plus the standard-SQL aliases accepted on input
//! - Field mode (`NULLABLE` / `REQUIRED` / `REPEATED`), defaulting to nullable
//! - Loading the JSON schema array produced by an upstream inference step
//! - Depth-first counting helpers used for logging and assertions

use std::{
    fmt,
    fs::File,
    io::{BufReader, Read},
    path::Path,
    str::FromStr,
};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldType {
    #[serde(rename = "STRING")]
    String,
    #[serde(rename = "BYTES")]
    Bytes,
    #[serde(rename = "INTEGER", alias = "INT64")]
    Integer,
    #[serde(rename = "FLOAT", alias = "FLOAT64")]
    Float,
    #[serde(rename = "NUMERIC")]
    Numeric,
    #[serde(rename = "BIGNUMERIC")]
    BigNumeric,
    #[serde(rename = "BOOLEAN", alias = "BOOL")]
    Boolean,
    #[serde(rename = "TIMESTAMP")]
    Timestamp,
    #[serde(rename = "DATE")]
    Date,
    #[serde(rename = "TIME")]
    Time,
    #[serde(rename = "DATETIME")]
    DateTime,
    #[serde(rename = "GEOGRAPHY")]
    Geography,
    #[serde(rename = "JSON")]
    Json,
    #[serde(rename = "INTERVAL")]
    Interval,
    #[serde(rename = "RECORD", alias = "STRUCT")]
    Record,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::String => "STRING",
            FieldType::Bytes => "BYTES",
            FieldType::Integer => "INTEGER",
            FieldType::Float => "FLOAT",
            FieldType::Numeric => "NUMERIC",
            FieldType::BigNumeric => "BIGNUMERIC",
            FieldType::Boolean => "BOOLEAN",
            FieldType::Timestamp => "TIMESTAMP",
            FieldType::Date => "DATE",
            FieldType::Time => "TIME",
            FieldType::DateTime => "DATETIME",
            FieldType::Geography => "GEOGRAPHY",
            FieldType::Json => "JSON",
            FieldType::Interval => "INTERVAL",
            FieldType::Record => "RECORD",
        }
    }

    pub fn is_record(&self) -> bool {
        matches!(self, FieldType::Record)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        let normalized = value.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "STRING" => Ok(FieldType::String),
            "BYTES" => Ok(FieldType::Bytes),
            "INTEGER" | "INT64" => Ok(FieldType::Integer),
            "FLOAT" | "FLOAT64" => Ok(FieldType::Float),
            "NUMERIC" => Ok(FieldType::Numeric),
            "BIGNUMERIC" => Ok(FieldType::BigNumeric),
            "BOOLEAN" | "BOOL" => Ok(FieldType::Boolean),
            "TIMESTAMP" => Ok(FieldType::Timestamp),
            "DATE" => Ok(FieldType::Date),
            "TIME" => Ok(FieldType::Time),
            "DATETIME" => Ok(FieldType::DateTime),
            "GEOGRAPHY" => Ok(FieldType::Geography),
            "JSON" => Ok(FieldType::Json),
            "INTERVAL" => Ok(FieldType::Interval),
            "RECORD" | "STRUCT" => Ok(FieldType::Record),
            _ => Err(anyhow!("Unsupported field type '{value}'")),
        }
    }
}

/// Presence marker of a field. `Required` and `Repeated` are mutually
/// exclusive; a repeated field is never considered mandatory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FieldMode {
    #[default]
    Nullable,
    Required,
    Repeated,
}

impl fmt::Display for FieldMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldMode::Nullable => f.write_str("NULLABLE"),
            FieldMode::Required => f.write_str("REQUIRED"),
            FieldMode::Repeated => f.write_str("REPEATED"),
        }
    }
}

impl FromStr for FieldMode {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "nullable" | "optional" => Ok(FieldMode::Nullable),
            "required" => Ok(FieldMode::Required),
            "repeated" => Ok(FieldMode::Repeated),
            _ => Err(anyhow!("Unsupported field mode '{value}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaField {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub mode: FieldMode,
    /// Children of a `RECORD` field, in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<SchemaField>,
}

impl SchemaField {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            description: None,
            field_type,
            mode: FieldMode::Nullable,
            fields: Vec::new(),
        }
    }

    pub fn record(name: impl Into<String>, fields: Vec<SchemaField>) -> Self {
        Self {
            fields,
            ..Self::new(name, FieldType::Record)
        }
    }

    pub fn required(mut self) -> Self {
        self.mode = FieldMode::Required;
        self
    }

    pub fn repeated(mut self) -> Self {
        self.mode = FieldMode::Repeated;
        self
    }

    pub fn with_mode(mut self, mode: FieldMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_required(&self) -> bool {
        self.mode == FieldMode::Required
    }

    pub fn is_repeated(&self) -> bool {
        self.mode == FieldMode::Repeated
    }

    pub fn is_record(&self) -> bool {
        self.field_type.is_record()
    }

    pub fn description_or_empty(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema(Vec<SchemaField>);

impl Schema {
    pub fn new(fields: Vec<SchemaField>) -> Self {
        Self(fields)
    }

    pub fn fields(&self) -> &[SchemaField] {
        &self.0
    }

    pub fn into_fields(self) -> Vec<SchemaField> {
        self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SchemaField> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Top-level lookup; nested fields are not searched.
    pub fn field(&self, name: &str) -> Option<&SchemaField> {
        self.0.iter().find(|field| field.name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.0.iter().map(|field| field.name.as_str()).collect()
    }

    pub fn count_required(&self) -> usize {
        self.count_where(&|field: &SchemaField| field.is_required())
    }

    pub fn count_repeated(&self) -> usize {
        self.count_where(&|field: &SchemaField| field.is_repeated())
    }

    pub fn count_type(&self, field_type: FieldType) -> usize {
        self.count_where(&|field: &SchemaField| field.field_type == field_type)
    }

    /// Total number of fields at every depth.
    pub fn total_fields(&self) -> usize {
        self.count_where(&|_: &SchemaField| true)
    }

    fn count_where(&self, predicate: &dyn Fn(&SchemaField) -> bool) -> usize {
        fn walk(fields: &[SchemaField], predicate: &dyn Fn(&SchemaField) -> bool) -> usize {
            fields
                .iter()
                .map(|field| usize::from(predicate(field)) + walk(&field.fields, predicate))
                .sum()
        }
        walk(&self.0, predicate)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        serde_json::from_reader(reader).context("Parsing schema JSON")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("Opening schema file {path:?}"))?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Serializing schema JSON")
    }
}

impl From<Vec<SchemaField>> for Schema {
    fn from(fields: Vec<SchemaField>) -> Self {
        Self(fields)
    }
}

impl FromIterator<SchemaField> for Schema {
    fn from_iter<I: IntoIterator<Item = SchemaField>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Schema {
    type Item = SchemaField;
    type IntoIter = std::vec::IntoIter<SchemaField>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Schema {
    type Item = &'a SchemaField;
    type IntoIter = std::slice::Iter<'a, SchemaField>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
