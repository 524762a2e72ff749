use std::path::Path;
use log::{debug, info, trace, warn};
use rayon::prelude::*;
use serde_json::Value;
use crate::analysis::analyzer::{token_counts, Pipelines};
use crate::core::config::IndexConfig;
use crate::core::error::{Error, Result};
use crate::core::stats::IndexStats;
use crate::core::types::{field_text, DocId, IndexKind};
use crate::index::field_index::FieldIndex;
use crate::index::posting::Posting;
use crate::index::trie::TrieNode;
use crate::query::ast::SearchQuery;
use crate::query::parser::QueryParser;
use crate::scoring::scorer::TfIdfScorer;
use crate::search::executor::{QueryExecutor, SearchContext};
use crate::search::results::SearchHit;
use crate::storage::content_hash::ContentHash;
use crate::storage::document_store::{DocumentRecord, DocumentStore, Placement};
use crate::storage::snapshot::{read_snapshot_file, write_snapshot_file, Snapshot, SnapshotRef, SNAPSHOT_VERSION};

/// Full-text index over a fixed set of fields.
///
/// Owns the document store and both trie collections. Mutation takes
/// `&mut self`, so a single owner mutates at a time; see
/// [`SharedIndex`](crate::core::shared::SharedIndex) for a lock-guarded handle.
pub struct Index {
    config: IndexConfig,
    documents: DocumentStore,
    index: FieldIndex,
    pipelines: Pipelines,
    scorer: TfIdfScorer,
    parser: QueryParser,
}

/// Tokens of one field, ready to be written into the tries.
struct AnalyzedField {
    name: String,
    tokenized: Option<Vec<String>>,
    raw: Vec<String>,
}

/// Outcome of the pure analysis phase of an add.
struct AnalyzedDoc {
    id: DocId,
    hash: ContentHash,
    payload: Option<Value>,
    fields: Vec<AnalyzedField>,
}

/// Result of [`Index::add_docs`].
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Documents newly indexed or replaced.
    pub indexed: usize,
    /// Byte-identical re-adds that were skipped.
    pub unchanged: usize,
    /// Position in the input and the error of every rejected document.
    pub failed: Vec<(usize, Error)>,
}

impl BatchReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

impl Index {
    pub fn new(config: IndexConfig) -> Result<Self> {
        config.validate()?;
        let pipelines = Pipelines::new(config.stopwords);
        debug!(
            "new index over {} fields, pipelines: {}",
            config.fields.len(),
            pipelines.describe()
        );

        Ok(Index {
            config,
            documents: DocumentStore::new(),
            index: FieldIndex::new(),
            pipelines,
            scorer: TfIdfScorer::new(),
            parser: QueryParser::new(),
        })
    }

    /// Restore an index from a snapshot. The snapshot's field configuration
    /// replaces `options.fields`; the remaining options still apply.
    pub fn from_snapshot(json: &str, options: IndexConfig) -> Result<Self> {
        let snapshot = Snapshot::from_json(json)?;
        let documents = DocumentStore::from_records(snapshot.docs);

        let config = IndexConfig {
            fields: snapshot.fields,
            store_docs: options.store_docs || documents.has_payloads(),
            ..options
        };
        config.validate()?;

        info!(
            "restored index snapshot: {} docs, {} fields",
            documents.count(),
            config.fields.len()
        );

        Ok(Index {
            pipelines: Pipelines::new(config.stopwords),
            config,
            documents,
            index: snapshot.index,
            scorer: TfIdfScorer::new(),
            parser: QueryParser::new(),
        })
    }

    /// Restore with default options.
    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_snapshot(json, IndexConfig::default())
    }

    pub fn serialize(&self) -> Result<String> {
        SnapshotRef {
            version: SNAPSHOT_VERSION,
            fields: &self.config.fields,
            docs: self.documents.records(),
            index: &self.index,
        }
        .to_json()
    }

    pub fn save_snapshot(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = self.serialize()?;
        write_snapshot_file(path, &json)?;
        info!("saved index snapshot to {} ({} bytes)", path.display(), json.len());
        Ok(())
    }

    pub fn open_snapshot(path: impl AsRef<Path>, options: IndexConfig) -> Result<Self> {
        let json = read_snapshot_file(path.as_ref())?;
        Self::from_snapshot(&json, options)
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Index one document.
    ///
    /// Re-adding byte-identical content is a no-op. New content under a
    /// known id replaces the old entry. Errors leave the index untouched.
    pub fn add_doc(&mut self, doc: &Value) -> Result<()> {
        let analyzed = self.analyze(doc)?;
        self.commit(analyzed);
        Ok(())
    }

    /// Index many documents. Analysis runs in parallel; documents are
    /// committed in input order, and a rejected document does not stop
    /// the rest.
    pub fn add_docs(&mut self, docs: &[Value]) -> BatchReport {
        let analyzed: Vec<Result<AnalyzedDoc>> = docs
            .par_iter()
            .map(|doc| self.analyze(doc))
            .collect();

        let mut report = BatchReport::default();
        for (pos, result) in analyzed.into_iter().enumerate() {
            match result {
                Ok(doc) => {
                    if self.commit(doc) {
                        report.indexed += 1;
                    } else {
                        report.unchanged += 1;
                    }
                }
                Err(err) => {
                    warn!("skipping document at position {}: {}", pos, err);
                    report.failed.push((pos, err));
                }
            }
        }

        debug!(
            "batch add: {} indexed, {} unchanged, {} failed",
            report.indexed,
            report.unchanged,
            report.failed.len()
        );
        report
    }

    /// Remove a document and every trie entry it contributed. Returns
    /// false when the id is unknown.
    pub fn remove_doc(&mut self, id: &DocId) -> bool {
        if self.documents.remove(id).is_none() {
            return false;
        }
        let entries = self.index.remove(id);
        debug!("removed doc {} ({} trie entries)", id, entries);
        true
    }

    pub fn field_boost(&self, field: &str) -> f64 {
        self.config.field_boost(field)
    }

    pub fn get_node(&self, field: &str, token: &str, kind: IndexKind) -> Option<&TrieNode> {
        self.index.lookup(field, kind, token)
    }

    pub fn doc_count(&self) -> usize {
        self.documents.count()
    }

    pub fn get_doc(&self, id: &DocId) -> Option<&DocumentRecord> {
        self.documents.get(id)
    }

    pub fn contains_doc(&self, id: &DocId) -> bool {
        self.documents.contains(id)
    }

    /// Search with the JSON query language (a bare string matches every
    /// field). Hits carry their stored document when `store_docs` is set.
    pub fn search(&self, query: &Value) -> Result<Vec<SearchHit>> {
        let query = self.parser.parse(query)?;
        Ok(self.search_query(&query))
    }

    pub fn search_with_limit(&self, query: &Value, limit: usize) -> Result<Vec<SearchHit>> {
        let query = self.parser.parse(query)?;
        Ok(self.run(&query, Some(limit)))
    }

    pub fn search_query(&self, query: &SearchQuery) -> Vec<SearchHit> {
        self.run(query, None)
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats::collect(self.documents.count(), &self.index)
    }

    fn run(&self, query: &SearchQuery, limit: Option<usize>) -> Vec<SearchHit> {
        let ctx = SearchContext {
            config: &self.config,
            documents: &self.documents,
            index: &self.index,
            pipelines: &self.pipelines,
        };
        let hits = QueryExecutor::new(ctx, &self.scorer).execute(query, limit);
        debug!("search: {} clauses, {} hits", query.clause_count(), hits.len());

        if self.config.store_docs {
            self.hydrate(hits)
        } else {
            hits
        }
    }

    fn hydrate(&self, hits: Vec<SearchHit>) -> Vec<SearchHit> {
        hits.into_iter()
            .map(|mut hit| {
                hit.doc = self.documents.get(&hit.id).and_then(|record| record.doc.clone());
                hit
            })
            .collect()
    }

    /// Validate and tokenize a document without touching any state.
    fn analyze(&self, doc: &Value) -> Result<AnalyzedDoc> {
        let id = DocId::from_document(doc).ok_or_else(Error::missing_id)?;
        let mut fields = Vec::new();

        for name in self.config.field_names() {
            let text = match doc.get(name).and_then(field_text) {
                Some(text) => text,
                None => continue,
            };
            let analyzer = self.config.analyzer_for(name)?;

            let tokenized = analyzer
                .indexes_tokens()
                .then(|| self.pipelines.tokenized.terms(&text));

            fields.push(AnalyzedField {
                name: name.to_string(),
                tokenized,
                raw: self.pipelines.raw.terms(&text),
            });
        }

        Ok(AnalyzedDoc {
            id,
            hash: ContentHash::of(doc),
            payload: self.config.store_docs.then(|| doc.clone()),
            fields,
        })
    }

    /// Apply an analyzed document. Returns false for a duplicate no-op.
    fn commit(&mut self, doc: AnalyzedDoc) -> bool {
        match self.documents.placement(&doc.id, &doc.hash) {
            Placement::Duplicate => {
                trace!("doc {} unchanged, skipping", doc.id);
                return false;
            }
            Placement::Changed => {
                debug!("doc {} changed, replacing", doc.id);
                self.remove_doc(&doc.id);
            }
            Placement::New => {}
        }

        self.documents.put(doc.id.clone(), doc.hash, doc.payload);

        for field in &doc.fields {
            self.index.ensure_field(&field.name);

            if let Some(tokens) = &field.tokenized {
                self.documents.record_field_size(&doc.id, &field.name, tokens.len());
                self.insert_tokens(&field.name, IndexKind::Tokenized, tokens, &doc.id);
            }
            self.insert_tokens(&field.name, IndexKind::Raw, &field.raw, &doc.id);
        }

        debug!("indexed doc {} ({} fields)", doc.id, doc.fields.len());
        true
    }

    fn insert_tokens(&mut self, field: &str, kind: IndexKind, tokens: &[String], id: &DocId) {
        for (token, count) in token_counts(tokens) {
            let posting = Posting::from_count(count);
            if self.config.allow_partial {
                self.index.insert_with_prefixes(field, kind, token, id, posting);
            } else {
                self.index.insert(field, kind, token, id, posting);
            }
        }
    }
}
