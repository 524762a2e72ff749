use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::Path;
use serde::{Serialize, Deserialize};
use serde_json::Value;
use tempfile::NamedTempFile;
use crate::core::config::FieldConfig;
use crate::core::error::{Error, Result};
use crate::core::types::DocId;
use crate::index::field_index::FieldIndex;
use crate::storage::document_store::DocumentRecord;

/// Format version written into and required from every snapshot.
pub const SNAPSHOT_VERSION: &str = "1.0";

/// Borrowed view of an index, serialized without cloning it.
#[derive(Serialize)]
pub struct SnapshotRef<'a> {
    pub version: &'a str,
    pub fields: &'a BTreeMap<String, Option<FieldConfig>>,
    pub docs: &'a BTreeMap<DocId, DocumentRecord>,
    pub index: &'a FieldIndex,
}

/// Owned snapshot, as read back.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Snapshot {
    pub version: String,
    #[serde(default)]
    pub fields: BTreeMap<String, Option<FieldConfig>>,
    #[serde(default)]
    pub docs: BTreeMap<DocId, DocumentRecord>,
    #[serde(default)]
    pub index: FieldIndex,
}

impl SnapshotRef<'_> {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl Snapshot {
    /// Parse a snapshot. The version is checked before anything else is
    /// decoded; a mismatch fails without a partial load.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;

        match value.get("version") {
            Some(Value::String(v)) if v == SNAPSHOT_VERSION => {}
            Some(Value::String(v)) => return Err(Error::version_mismatch(v)),
            Some(other) => return Err(Error::version_mismatch(&other.to_string())),
            None => return Err(Error::version_mismatch("undefined")),
        }

        Ok(serde_json::from_value(value)?)
    }
}

/// Write `json` to `path` through a temp file in the same directory, so a
/// crash never leaves a torn snapshot behind.
pub fn write_snapshot_file(path: &Path, json: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(json.as_bytes())?;
    file.as_file().sync_all()?;
    file.persist(path)?;
    Ok(())
}

pub fn read_snapshot_file(path: &Path) -> Result<String> {
    Ok(fs::read_to_string(path)?)
}
