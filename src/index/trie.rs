use std::collections::BTreeMap;
use std::fmt;
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use crate::core::types::DocId;
use crate::index::posting::Posting;

/// Character-keyed prefix tree node.
///
/// A node terminates every token whose characters spell the path from the
/// root, and `docs` holds the documents containing that token. `df` always
/// equals `docs.len()`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrieNode {
    pub children: BTreeMap<char, TrieNode>,
    pub docs: BTreeMap<DocId, Posting>,
    pub df: usize,
}

impl TrieNode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Walk to the node for `token`, never creating nodes.
    pub fn find(&self, token: &str) -> Option<&TrieNode> {
        let mut node = self;
        for c in token.chars() {
            node = node.children.get(&c)?;
        }
        Some(node)
    }

    /// Walk to the node for `token`, creating missing nodes on the way.
    pub fn find_or_create(&mut self, token: &str) -> &mut TrieNode {
        let mut node = self;
        for c in token.chars() {
            node = node.children.entry(c).or_default();
        }
        node
    }

    /// Record `posting` for `doc_id`. A repeated id overwrites its tf and
    /// leaves `df` alone. Returns true when the id was new to this node.
    pub fn add_posting(&mut self, doc_id: &DocId, posting: Posting) -> bool {
        match self.docs.get_mut(doc_id) {
            Some(existing) => {
                *existing = posting;
                false
            }
            None => {
                self.docs.insert(doc_id.clone(), posting);
                self.df += 1;
                true
            }
        }
    }

    /// Delete `doc_id` from this subtree and prune children left with no
    /// documents and no descendants. Returns the number of entries removed.
    pub fn remove_doc(&mut self, doc_id: &DocId) -> usize {
        let mut removed = 0;

        if self.docs.remove(doc_id).is_some() {
            self.df -= 1;
            removed += 1;
        }

        self.children.retain(|_, child| {
            removed += child.remove_doc(doc_id);
            !child.is_empty()
        });

        removed
    }

    /// No documents here and no children below.
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty() && self.children.is_empty()
    }

    /// Nodes in this subtree, including this one.
    pub fn node_count(&self) -> usize {
        1 + self.children.values().map(TrieNode::node_count).sum::<usize>()
    }

    /// Distinct terminated tokens in this subtree.
    pub fn term_count(&self) -> usize {
        let own = usize::from(!self.docs.is_empty());
        own + self.children.values().map(TrieNode::term_count).sum::<usize>()
    }

    pub fn contains_doc(&self, doc_id: &DocId) -> bool {
        self.docs.contains_key(doc_id)
            || self.children.values().any(|child| child.contains_doc(doc_id))
    }
}

// Snapshot shape: {"docs": {...}, "df": n, "<char>": {...}, ...}
impl Serialize for TrieNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2 + self.children.len()))?;
        map.serialize_entry("docs", &self.docs)?;
        map.serialize_entry("df", &self.df)?;
        let mut edge = [0u8; 4];
        for (c, child) in &self.children {
            map.serialize_entry(c.encode_utf8(&mut edge) as &str, child)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for TrieNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(TrieNodeVisitor)
    }
}

struct TrieNodeVisitor;

impl<'de> Visitor<'de> for TrieNodeVisitor {
    type Value = TrieNode;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a trie node object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<TrieNode, A::Error> {
        let mut node = TrieNode::new();

        while let Some(key) = access.next_key::<String>()? {
            match key.as_str() {
                "docs" => node.docs = access.next_value()?,
                // Recomputed from `docs` below.
                "df" => {
                    access.next_value::<usize>()?;
                }
                edge => {
                    let mut chars = edge.chars();
                    let c = match (chars.next(), chars.next()) {
                        (Some(c), None) => c,
                        _ => {
                            return Err(de::Error::custom(format!(
                                "trie edge '{}' is not a single character",
                                edge
                            )));
                        }
                    };
                    node.children.insert(c, access.next_value()?);
                }
            }
        }

        node.df = node.docs.len();
        Ok(node)
    }
}
