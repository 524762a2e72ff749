use std::collections::{HashMap, HashSet};
use log::trace;
use crate::analysis::analyzer::Pipelines;
use crate::core::config::IndexConfig;
use crate::core::types::{DocId, IndexKind};
use crate::index::field_index::FieldIndex;
use crate::query::ast::{Clause, ClauseGroup, FieldTarget, SearchQuery, SubQuery};
use crate::scoring::scorer::{DocStats, IdfCache, Scorer, TermStats};
use crate::search::results::{rank, SearchHit};
use crate::storage::document_store::DocumentStore;

/// Read-only view of the index state a search needs.
pub struct SearchContext<'a> {
    pub config: &'a IndexConfig,
    pub documents: &'a DocumentStore,
    pub index: &'a FieldIndex,
    pub pipelines: &'a Pipelines,
}

/// Evaluates one query. Built fresh per search so its IDF cache never
/// sees another query.
pub struct QueryExecutor<'a> {
    ctx: SearchContext<'a>,
    scorer: &'a dyn Scorer,
    idf_cache: IdfCache,
}

impl<'a> QueryExecutor<'a> {
    pub fn new(ctx: SearchContext<'a>, scorer: &'a dyn Scorer) -> Self {
        let total_docs = ctx.documents.count();
        QueryExecutor {
            ctx,
            scorer,
            idf_cache: IdfCache::new(total_docs),
        }
    }

    /// Resolve `query` into hits ranked by score, then id.
    pub fn execute(mut self, query: &SearchQuery, limit: Option<usize>) -> Vec<SearchHit> {
        let mut matches = if query.match_all {
            self.match_all()
        } else {
            self.resolve_must(&query.must)
        };

        if query.has_filter() {
            let allowed = self.resolve_filters(&query.filter);
            matches.retain(|id, _| allowed.contains(id));
        }

        trace!(
            "query resolved by {}: {} matches, {} idf values computed",
            self.scorer.name(),
            matches.len(),
            self.idf_cache.computed()
        );

        rank(matches, limit)
    }

    fn match_all(&self) -> HashMap<DocId, f64> {
        self.ctx.documents.ids().map(|id| (id.clone(), 1.0)).collect()
    }

    /// Scores summed across every group, clause, field and token.
    fn resolve_must(&mut self, groups: &[ClauseGroup]) -> HashMap<DocId, f64> {
        let mut scores = HashMap::new();
        for group in groups {
            self.score_group(group, &mut scores);
        }
        scores
    }

    /// Ids satisfying every filter group.
    fn resolve_filters(&mut self, groups: &[ClauseGroup]) -> HashSet<DocId> {
        let mut allowed: Option<HashSet<DocId>> = None;

        for group in groups {
            let mut scores = HashMap::new();
            self.score_group(group, &mut scores);
            let ids: HashSet<DocId> = scores.into_keys().collect();

            allowed = Some(match allowed {
                None => ids,
                Some(current) => current.intersection(&ids).cloned().collect(),
            });

            if allowed.as_ref().is_some_and(HashSet::is_empty) {
                break;
            }
        }

        allowed.unwrap_or_default()
    }

    fn score_group(&mut self, group: &ClauseGroup, scores: &mut HashMap<DocId, f64>) {
        for clause in &group.clauses {
            self.score_clause(clause, scores);
        }
    }

    fn score_clause(&mut self, clause: &Clause, scores: &mut HashMap<DocId, f64>) {
        let kind = clause.index_kind();
        for sub in clause.sub_queries() {
            let tokens = self.tokenize(&sub.text, kind);
            if tokens.is_empty() {
                continue;
            }

            match &sub.target {
                FieldTarget::All => {
                    let config = self.ctx.config;
                    for field in config.field_names() {
                        self.score_field(kind, field, &tokens, sub, scores);
                    }
                }
                FieldTarget::Field(field) => {
                    self.score_field(kind, field, &tokens, sub, scores);
                }
            }
        }
    }

    fn score_field(
        &mut self,
        kind: IndexKind,
        field: &str,
        tokens: &[String],
        sub: &SubQuery,
        scores: &mut HashMap<DocId, f64>,
    ) {
        let index = self.ctx.index;
        let documents = self.ctx.documents;
        // A zero boost counts as unset.
        let boost = sub
            .boost
            .filter(|boost| *boost != 0.0)
            .unwrap_or_else(|| self.ctx.config.field_boost(field));
        trace!("scoring {} tokens in {}/{} (boost {})", tokens.len(), field, kind.as_str(), boost);

        for token in tokens {
            let node = match index.lookup(field, kind, token) {
                Some(node) => node,
                None => continue,
            };

            let term = TermStats {
                idf: self.idf_cache.idf(kind, field, token, node.df),
                boost,
            };

            for (id, posting) in &node.docs {
                let field_size = documents
                    .get(id)
                    .map(|record| record.field_size(field))
                    .unwrap_or(0);
                let score = self.scorer.score(posting, &term, &DocStats { field_size });
                *scores.entry(id.clone()).or_insert(0.0) += score;
            }
        }
    }

    fn tokenize(&self, text: &str, kind: IndexKind) -> Vec<String> {
        match kind {
            IndexKind::Tokenized => self.ctx.pipelines.tokenized.terms(text),
            IndexKind::Raw => self.ctx.pipelines.raw.terms(text),
        }
    }
}
