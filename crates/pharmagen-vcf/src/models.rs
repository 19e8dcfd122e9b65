//! Data models produced by the VCF reader.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize, Serializer};

/// One value in the INFO column: `KEY=VALUE` or a bare `KEY` flag.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum InfoValue {
    Value(String),
    Flag(bool),
}

impl InfoValue {
    /// The textual value, or `None` for flags.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            InfoValue::Value(v) => Some(v.as_str()),
            InfoValue::Flag(_) => None,
        }
    }
}

impl Serialize for InfoValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            InfoValue::Value(v) => serializer.serialize_str(v),
            InfoValue::Flag(b) => serializer.serialize_bool(*b),
        }
    }
}

/// A data row that carries some pharmacogenomic annotation.
/// Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantRecord {
    pub chrom: String,
    pub pos: String,
    /// Canonical `rsNNNN` identifier, from the ID column or INFO `RS`.
    pub rsid: Option<String>,
    pub reference: String,
    pub alternate: String,
    pub qual: String,
    pub filter: String,
    /// INFO `GENE` annotation.
    pub gene: Option<String>,
    /// INFO `STAR` annotation.
    pub star: Option<String>,
    /// Raw sample column (e.g. `0/1`).
    pub genotype: Option<String>,
    pub info: BTreeMap<String, InfoValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VcfMetadata {
    /// Value of `##fileformat=`, e.g. `VCFv4.2`.
    pub file_format: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedVcf {
    /// Sample name from the header, or a generated `PATIENT_XXXXX` id.
    pub patient_id: String,
    /// Annotated records in input line order.
    pub variants: Vec<VariantRecord>,
    pub metadata: VcfMetadata,
}
