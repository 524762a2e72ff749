use std::collections::BTreeMap;
use serde::{Serialize, Deserialize};
use crate::core::types::{DocId, IndexKind};
use crate::index::posting::Posting;
use crate::index::trie::TrieNode;

/// Per-field trie roots for both index kinds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldIndex {
    pub tokenized: BTreeMap<String, TrieNode>,
    pub raw: BTreeMap<String, TrieNode>,
}

impl FieldIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn roots(&self, kind: IndexKind) -> &BTreeMap<String, TrieNode> {
        match kind {
            IndexKind::Tokenized => &self.tokenized,
            IndexKind::Raw => &self.raw,
        }
    }

    fn roots_mut(&mut self, kind: IndexKind) -> &mut BTreeMap<String, TrieNode> {
        match kind {
            IndexKind::Tokenized => &mut self.tokenized,
            IndexKind::Raw => &mut self.raw,
        }
    }

    /// Create empty roots for `field` in both collections.
    pub fn ensure_field(&mut self, field: &str) {
        for kind in [IndexKind::Tokenized, IndexKind::Raw] {
            self.roots_mut(kind).entry(field.to_string()).or_default();
        }
    }

    /// Record `token` for `doc_id`. Within one indexing pass the last write
    /// for a (doc, token) pair wins.
    pub fn insert(&mut self, field: &str, kind: IndexKind, token: &str, doc_id: &DocId, posting: Posting) {
        if token.is_empty() {
            return;
        }
        let root = self.roots_mut(kind).entry(field.to_string()).or_default();
        root.find_or_create(token).add_posting(doc_id, posting);
    }

    /// Insert `token` and every proper non-empty prefix of it, the prefixes
    /// carrying a tf decayed by their length.
    pub fn insert_with_prefixes(&mut self, field: &str, kind: IndexKind, token: &str, doc_id: &DocId, posting: Posting) {
        let boundaries: Vec<usize> = token.char_indices().map(|(i, _)| i).skip(1).collect();
        for (n, end) in boundaries.into_iter().enumerate() {
            self.insert(field, kind, &token[..end], doc_id, posting.for_prefix(n + 1));
        }
        self.insert(field, kind, token, doc_id, posting);
    }

    /// Read-only lookup. `None` when the field root or any edge is missing.
    pub fn lookup(&self, field: &str, kind: IndexKind, token: &str) -> Option<&TrieNode> {
        self.roots(kind).get(field)?.find(token)
    }

    /// Remove every entry for `doc_id` across all fields and kinds. Field
    /// roots stay in place even when they become empty.
    pub fn remove(&mut self, doc_id: &DocId) -> usize {
        self.tokenized
            .values_mut()
            .chain(self.raw.values_mut())
            .map(|root| root.remove_doc(doc_id))
            .sum()
    }

    pub fn node_count(&self, kind: IndexKind) -> usize {
        self.roots(kind).values().map(TrieNode::node_count).sum()
    }

    pub fn term_count(&self, kind: IndexKind) -> usize {
        self.roots(kind).values().map(TrieNode::term_count).sum()
    }

    pub fn field_count(&self, kind: IndexKind) -> usize {
        self.roots(kind).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u64) -> DocId {
        DocId::from(n)
    }

    #[test]
    fn lookup_missing_field_or_kind() {
        let mut index = FieldIndex::new();
        index.insert("title", IndexKind::Raw, "crime", &id(1), Posting::new(1.0));

        assert!(index.lookup("title", IndexKind::Raw, "crime").is_some());
        assert!(index.lookup("title", IndexKind::Tokenized, "crime").is_none());
        assert!(index.lookup("body", IndexKind::Raw, "crime").is_none());
        assert!(index.lookup("title", IndexKind::Raw, "crimes").is_none());
    }

    #[test]
    fn prefixes_get_decayed_tf() {
        let mut index = FieldIndex::new();
        index.insert_with_prefixes("title", IndexKind::Tokenized, "spew", &id(4), Posting::from_count(1));

        let full = index.lookup("title", IndexKind::Tokenized, "spew").unwrap();
        assert_eq!(full.docs[&id(4)].tf, 1.0);

        let s = index.lookup("title", IndexKind::Tokenized, "s").unwrap();
        assert_eq!(s.docs[&id(4)].tf, 1.0);

        let spe = index.lookup("title", IndexKind::Tokenized, "spe").unwrap();
        assert!((spe.docs[&id(4)].tf - (1.0f64 / 3.0).sqrt()).abs() < 1e-12);
        assert_eq!(spe.df, 1);
    }

    #[test]
    fn prefixes_follow_characters_not_bytes() {
        let mut index = FieldIndex::new();
        index.insert_with_prefixes("title", IndexKind::Raw, "caf\u{e9}s", &id(1), Posting::new(1.0));
        assert!(index.lookup("title", IndexKind::Raw, "caf\u{e9}").is_some());
        assert_eq!(index.term_count(IndexKind::Raw), 5);
    }

    #[test]
    fn remove_touches_both_kinds_and_keeps_roots() {
        let mut index = FieldIndex::new();
        index.ensure_field("title");
        index.insert("title", IndexKind::Tokenized, "sale", &id(1), Posting::new(1.0));
        index.insert("title", IndexKind::Raw, "sale", &id(1), Posting::new(1.0));
        index.insert("title", IndexKind::Raw, "sale", &id(2), Posting::new(1.0));

        assert_eq!(index.remove(&id(1)), 2);
        assert!(index.lookup("title", IndexKind::Tokenized, "sale").is_none());
        assert_eq!(index.lookup("title", IndexKind::Raw, "sale").unwrap().df, 1);
        assert_eq!(index.field_count(IndexKind::Tokenized), 1);
    }
}
