use std::collections::HashMap;
use crate::core::types::IndexKind;
use crate::index::posting::Posting;

/// Scorer trait
pub trait Scorer: Send + Sync {
    fn score(&self, posting: &Posting, term: &TermStats, doc: &DocStats) -> f64;

    fn name(&self) -> &str;
}

/// Statistics of the matched token, fixed for one query.
#[derive(Debug, Clone, Copy)]
pub struct TermStats {
    pub idf: f64,
    pub boost: f64,
}

/// Statistics of the matched document field.
#[derive(Debug, Clone, Copy)]
pub struct DocStats {
    pub field_size: usize,  // Tokens recorded for the matched field
}

/// `idf * fieldNorm * tf * boost`
pub struct TfIdfScorer;

impl TfIdfScorer {
    pub fn new() -> Self {
        TfIdfScorer
    }

    /// `1 + ln(N / (df + 1))`
    pub fn idf(total_docs: usize, df: usize) -> f64 {
        1.0 + (total_docs as f64 / (df as f64 + 1.0)).ln()
    }

    /// `1 / sqrt(size)`, or 1 for an empty field.
    pub fn field_norm(size: usize) -> f64 {
        if size == 0 {
            1.0
        } else {
            1.0 / (size as f64).sqrt()
        }
    }
}

impl Default for TfIdfScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl Scorer for TfIdfScorer {
    fn score(&self, posting: &Posting, term: &TermStats, doc: &DocStats) -> f64 {
        term.idf * Self::field_norm(doc.field_size) * posting.tf * term.boost
    }

    fn name(&self) -> &str {
        "tfidf"
    }
}

/// IDF values memoized for the lifetime of a single search.
///
/// `df` and the document count change between searches, so a cache must
/// never outlive the query that filled it.
pub struct IdfCache {
    total_docs: usize,
    entries: HashMap<(IndexKind, String, String), f64>,
    misses: usize,
}

impl IdfCache {
    pub fn new(total_docs: usize) -> Self {
        IdfCache {
            total_docs,
            entries: HashMap::new(),
            misses: 0,
        }
    }

    pub fn idf(&mut self, kind: IndexKind, field: &str, token: &str, df: usize) -> f64 {
        let key = (kind, field.to_string(), token.to_string());
        if let Some(idf) = self.entries.get(&key) {
            return *idf;
        }
        self.misses += 1;
        let idf = TfIdfScorer::idf(self.total_docs, df);
        self.entries.insert(key, idf);
        idf
    }

    /// Number of IDF values actually computed.
    pub fn computed(&self) -> usize {
        self.misses
    }
}
