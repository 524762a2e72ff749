use serde::{Serialize, Deserialize};
use crate::core::types::IndexKind;
use crate::index::field_index::FieldIndex;

/// Index statistics for monitoring
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexStats {
    pub doc_count: usize,

    // Trie shape per collection
    pub tokenized_fields: usize,
    pub tokenized_nodes: usize,
    pub tokenized_terms: usize,
    pub raw_fields: usize,
    pub raw_nodes: usize,
    pub raw_terms: usize,
}

impl IndexStats {
    pub fn collect(doc_count: usize, index: &FieldIndex) -> Self {
        IndexStats {
            doc_count,
            tokenized_fields: index.field_count(IndexKind::Tokenized),
            tokenized_nodes: index.node_count(IndexKind::Tokenized),
            tokenized_terms: index.term_count(IndexKind::Tokenized),
            raw_fields: index.field_count(IndexKind::Raw),
            raw_nodes: index.node_count(IndexKind::Raw),
            raw_terms: index.term_count(IndexKind::Raw),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.doc_count == 0
    }
}
