use std::cmp::Ordering;
use std::fmt;
use serde::{Serialize, Deserialize};
use serde_json::Value;

/// Caller-supplied document identifier.
///
/// Ids arrive as JSON strings or numbers and are keyed by their text, so
/// `1` and `"1"` name the same document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocId(String);

impl DocId {
    pub fn new(id: impl Into<String>) -> Self {
        DocId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Extract the id of a document payload. Falsy ids (`null`, `false`,
    /// `0`, `""`) count as absent.
    pub fn from_document(doc: &Value) -> Option<Self> {
        match doc.get("id")? {
            Value::String(s) if !s.is_empty() => Some(DocId(s.clone())),
            Value::Number(n) if n.as_f64() != Some(0.0) => Some(DocId(n.to_string())),
            Value::Bool(true) => Some(DocId("true".to_string())),
            _ => None,
        }
    }

    fn numeric(&self) -> Option<&str> {
        if !self.0.is_empty() && self.0.bytes().all(|b| b.is_ascii_digit()) {
            Some(self.0.trim_start_matches('0'))
        } else {
            None
        }
    }
}

// Integer ids order numerically and before any other id.
impl Ord for DocId {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.numeric(), other.numeric()) {
            (Some(a), Some(b)) => a.len()
                .cmp(&b.len())
                .then_with(|| a.cmp(b))
                .then_with(|| self.0.cmp(&other.0)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for DocId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for DocId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocId {
    fn from(id: &str) -> Self {
        DocId(id.to_string())
    }
}

impl From<String> for DocId {
    fn from(id: String) -> Self {
        DocId(id)
    }
}

impl From<u64> for DocId {
    fn from(id: u64) -> Self {
        DocId(id.to_string())
    }
}

/// Which trie collection a token lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IndexKind {
    /// Fully normalized tokens (stemmed), used by `match` clauses.
    Tokenized,
    /// Exact terms, used by `term` clauses.
    Raw,
}

impl IndexKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IndexKind::Tokenized => "tokenized",
            IndexKind::Raw => "raw",
        }
    }
}

/// Text to index for a field value, or `None` when the value is skipped.
pub fn field_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        Value::Array(items) if !items.is_empty() => {
            let parts: Vec<String> = items
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s.clone()),
                    Value::Number(n) => Some(n.to_string()),
                    Value::Bool(b) => Some(b.to_string()),
                    _ => None,
                })
                .collect();
            Some(parts.join(" "))
        }
        _ => None,
    }
}
