use std::collections::{BTreeMap, HashMap};
use serde::{Serialize, Deserialize};
use serde_json::Value;
use crate::core::types::DocId;
use crate::storage::content_hash::ContentHash;

/// Token count contributed to one field by the standard pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldStats {
    pub size: usize,
}

/// Per-document metadata, serialized as `{doc?, <field>: {size}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<Value>,
    #[serde(flatten)]
    pub fields: BTreeMap<String, FieldStats>,
}

impl DocumentRecord {
    pub fn field_size(&self, field: &str) -> usize {
        self.fields.get(field).map(|f| f.size).unwrap_or(0)
    }
}

/// Where an incoming document stands relative to what is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Unknown id.
    New,
    /// Same id, byte-identical content.
    Duplicate,
    /// Same id, different content: the old entry must go first.
    Changed,
}

/// Live documents plus the content fingerprints used for dedup.
#[derive(Debug, Clone, Default)]
pub struct DocumentStore {
    records: BTreeMap<DocId, DocumentRecord>,
    hashes: HashMap<DocId, ContentHash>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from snapshot records. Hashes can only be recovered for
    /// records that kept their payload.
    pub fn from_records(records: BTreeMap<DocId, DocumentRecord>) -> Self {
        let hashes = records
            .iter()
            .filter_map(|(id, record)| record.doc.as_ref().map(|doc| (id.clone(), ContentHash::of(doc))))
            .collect();
        DocumentStore { records, hashes }
    }

    pub fn placement(&self, id: &DocId, hash: &ContentHash) -> Placement {
        if !self.records.contains_key(id) {
            return Placement::New;
        }
        match self.hashes.get(id) {
            Some(existing) if existing == hash => Placement::Duplicate,
            _ => Placement::Changed,
        }
    }

    /// Create a fresh record, replacing any previous one for `id`.
    pub fn put(&mut self, id: DocId, hash: ContentHash, payload: Option<Value>) {
        self.hashes.insert(id.clone(), hash);
        self.records.insert(id, DocumentRecord {
            doc: payload,
            fields: BTreeMap::new(),
        });
    }

    pub fn record_field_size(&mut self, id: &DocId, field: &str, size: usize) {
        if let Some(record) = self.records.get_mut(id) {
            record.fields.insert(field.to_string(), FieldStats { size });
        }
    }

    pub fn remove(&mut self, id: &DocId) -> Option<DocumentRecord> {
        self.hashes.remove(id);
        self.records.remove(id)
    }

    pub fn get(&self, id: &DocId) -> Option<&DocumentRecord> {
        self.records.get(id)
    }

    pub fn contains(&self, id: &DocId) -> bool {
        self.records.contains_key(id)
    }

    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn ids(&self) -> impl Iterator<Item = &DocId> {
        self.records.keys()
    }

    pub fn records(&self) -> &BTreeMap<DocId, DocumentRecord> {
        &self.records
    }

    pub fn has_payloads(&self) -> bool {
        self.records.values().any(|r| r.doc.is_some())
    }
}
