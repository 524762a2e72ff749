pub mod core;
pub mod storage;
pub mod analysis;
pub mod index;
pub mod scoring;
pub mod search;
pub mod query;

pub use crate::core::config::{FieldConfig, IndexConfig};
pub use crate::core::error::{Error, ErrorKind, Result};
pub use crate::core::index::{BatchReport, Index};
pub use crate::core::shared::SharedIndex;
pub use crate::core::stats::IndexStats;
pub use crate::core::types::{DocId, IndexKind};
pub use crate::search::results::SearchHit;

/*
┌──────────────────────────────────────────────────────────────────────────────────┐
│                           TRIEDEX STRUCT ARCHITECTURE                            │
└──────────────────────────────────────────────────────────────────────────────────┘

┌─────────────────────────────────── CORE LAYER ───────────────────────────────────┐
│                                                                                  │
│  ┌──────────────────────────────────────────────────────────────────────────┐    │
│  │                               struct Index                               │    │
│  │  config: IndexConfig          // fields, boosts, analyzers, flags        │    │
│  │  documents: DocumentStore     // id -> field sizes (+ payload), hashes   │    │
│  │  index: FieldIndex            // tokenized + raw tries per field         │    │
│  │  pipelines: Pipelines         // tokenized / raw analyzers               │    │
│  │  scorer: TfIdfScorer                                                     │    │
│  │  parser: QueryParser                                                     │    │
│  └──────────────────────────────────────────────────────────────────────────┘    │
│                                                                                  │
│  ┌──────────────────────┐  ┌─────────────────────┐  ┌──────────────────────┐     │
│  │ struct SharedIndex   │  │ struct IndexConfig  │  │ struct Error         │     │
│  │ Arc<RwLock<Index>>   │  │ • fields            │  │ • kind: ErrorKind    │     │
│  └──────────────────────┘  │ • store_docs        │  │ • context: String    │     │
│                            │ • allow_partial     │  └──────────────────────┘     │
│                            │ • stopwords         │                               │
│                            └─────────────────────┘                               │
└──────────────────────────────────────────────────────────────────────────────────┘

┌────────────────────────────────── INDEX LAYER ───────────────────────────────────┐
│                                                                                  │
│  FieldIndex { tokenized, raw: BTreeMap<field, TrieNode> }                        │
│                                                                                  │
│  TrieNode                                                                        │
│  • children: BTreeMap<char, TrieNode>                                            │
│  • docs: BTreeMap<DocId, Posting { tf }>                                         │
│  • df == docs.len()                                                              │
└──────────────────────────────────────────────────────────────────────────────────┘

┌─────────────────────────────────── QUERY FLOW ───────────────────────────────────┐
│                                                                                  │
│  JSON ──► QueryParser ──► SearchQuery { must, filter, match_all }                │
│                                │                                                 │
│                                ▼                                                 │
│                         QueryExecutor (per-query IdfCache)                       │
│                                │  must: sum scores                               │
│                                │  filter: intersect groups, union within one     │
│                                ▼                                                 │
│                         rank / TopKCollector ──► Vec<SearchHit>                  │
└──────────────────────────────────────────────────────────────────────────────────┘

┌───────────────────────────────── STORAGE LAYER ──────────────────────────────────┐
│                                                                                  │
│  snapshot: {"version": "1.0", "fields", "docs", "index"}                         │
│  write: NamedTempFile in target dir ──► persist (atomic rename)                  │
└──────────────────────────────────────────────────────────────────────────────────┘
*/
