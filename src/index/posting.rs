use serde::{Serialize, Deserialize};

/// Per-document entry stored at a trie node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Posting {
    /// `sqrt(count)` for whole tokens, decayed for indexed prefixes.
    pub tf: f64,
}

impl Posting {
    pub fn new(tf: f64) -> Self {
        Posting { tf }
    }

    /// Term frequency for a token seen `count` times in one field.
    pub fn from_count(count: usize) -> Self {
        Posting { tf: (count as f64).sqrt() }
    }

    /// Decayed entry for a prefix of `prefix_len` characters.
    pub fn for_prefix(&self, prefix_len: usize) -> Self {
        Posting { tf: (self.tf / prefix_len as f64).sqrt() }
    }
}
