use std::path::Path;
use std::sync::Arc;
use parking_lot::RwLock;
use serde_json::Value;
use crate::core::error::Result;
use crate::core::index::{BatchReport, Index};
use crate::core::stats::IndexStats;
use crate::core::types::DocId;
use crate::search::results::SearchHit;

/// Cloneable handle to an [`Index`] shared between threads.
///
/// Searches take the read lock and run concurrently; adds and removals
/// take the write lock, so readers never observe a half-indexed document.
#[derive(Clone)]
pub struct SharedIndex {
    inner: Arc<RwLock<Index>>,
}

impl SharedIndex {
    pub fn new(index: Index) -> Self {
        SharedIndex {
            inner: Arc::new(RwLock::new(index)),
        }
    }

    pub fn add_doc(&self, doc: &Value) -> Result<()> {
        self.inner.write().add_doc(doc)
    }

    pub fn add_docs(&self, docs: &[Value]) -> BatchReport {
        self.inner.write().add_docs(docs)
    }

    pub fn remove_doc(&self, id: &DocId) -> bool {
        self.inner.write().remove_doc(id)
    }

    pub fn search(&self, query: &Value) -> Result<Vec<SearchHit>> {
        self.inner.read().search(query)
    }

    pub fn search_with_limit(&self, query: &Value, limit: usize) -> Result<Vec<SearchHit>> {
        self.inner.read().search_with_limit(query, limit)
    }

    pub fn doc_count(&self) -> usize {
        self.inner.read().doc_count()
    }

    pub fn stats(&self) -> IndexStats {
        self.inner.read().stats()
    }

    pub fn serialize(&self) -> Result<String> {
        self.inner.read().serialize()
    }

    pub fn save_snapshot(&self, path: impl AsRef<Path>) -> Result<()> {
        self.inner.read().save_snapshot(path)
    }

    /// Run `f` under the read lock.
    pub fn read<R>(&self, f: impl FnOnce(&Index) -> R) -> R {
        f(&self.inner.read())
    }

    /// Run `f` under the write lock.
    pub fn write<R>(&self, f: impl FnOnce(&mut Index) -> R) -> R {
        f(&mut self.inner.write())
    }
}

impl From<Index> for SharedIndex {
    fn from(index: Index) -> Self {
        SharedIndex::new(index)
    }
}
