pub mod field_index;
pub mod posting;
pub mod trie;
