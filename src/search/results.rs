use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap};
use serde::Serialize;
use serde_json::Value;
use crate::core::types::DocId;

/// Document with relevance score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub id: DocId,
    pub score: f64,
    /// Stored payload, present only when the index keeps documents.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc: Option<Value>,
}

impl SearchHit {
    pub fn new(id: DocId, score: f64) -> Self {
        SearchHit { id, score, doc: None }
    }
}

/// Result ordering: higher score first, then lower id.
fn rank_order(a: &SearchHit, b: &SearchHit) -> Ordering {
    b.score
        .partial_cmp(&a.score)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.id.cmp(&b.id))
}

/// Heap entry whose `Ord` puts the best-ranked hit on top.
struct Ranked(SearchHit);

impl PartialEq for Ranked {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Ranked {}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ranked {
    fn cmp(&self, other: &Self) -> Ordering {
        rank_order(&other.0, &self.0)
    }
}

/// Top-K collector for bounded result lists
pub struct TopKCollector {
    heap: BinaryHeap<Reverse<Ranked>>,
    k: usize,
    pub total_collected: usize,
}

impl TopKCollector {
    pub fn new(k: usize) -> Self {
        TopKCollector {
            heap: BinaryHeap::with_capacity(k.saturating_add(1).min(1024)),
            k,
            total_collected: 0,
        }
    }

    pub fn collect(&mut self, hit: SearchHit) {
        self.total_collected += 1;
        if self.k == 0 {
            return;
        }

        self.heap.push(Reverse(Ranked(hit)));
        if self.heap.len() > self.k {
            // Drops the worst-ranked hit.
            self.heap.pop();
        }
    }

    pub fn into_hits(self) -> Vec<SearchHit> {
        let mut hits: Vec<SearchHit> = self.heap.into_iter().map(|Reverse(Ranked(hit))| hit).collect();
        hits.sort_by(rank_order);
        hits
    }
}

/// Turn accumulated scores into a ranked hit list.
pub fn rank(matches: HashMap<DocId, f64>, limit: Option<usize>) -> Vec<SearchHit> {
    let hits = matches.into_iter().map(|(id, score)| SearchHit::new(id, score));

    match limit {
        Some(k) => {
            let mut collector = TopKCollector::new(k);
            hits.for_each(|hit| collector.collect(hit));
            collector.into_hits()
        }
        None => {
            let mut hits: Vec<SearchHit> = hits.collect();
            hits.sort_by(rank_order);
            hits
        }
    }
}
