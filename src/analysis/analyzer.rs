use std::collections::BTreeMap;
use crate::analysis::filter::TokenFilter;
use crate::analysis::filters::stemmer::StemmerFilter;
use crate::analysis::filters::stopword::StopWordFilter;
use crate::analysis::token::Token;
use crate::analysis::tokenizer::{StandardTokenizer, Tokenizer};

/// Per-field analyzer strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyzerKind {
    /// Populates both the tokenized and the raw trie.
    Standard,
    /// Populates only the raw trie.
    Keyword,
}

impl AnalyzerKind {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "standard" => Some(AnalyzerKind::Standard),
            "keyword" => Some(AnalyzerKind::Keyword),
            _ => None,
        }
    }

    pub fn indexes_tokens(&self) -> bool {
        matches!(self, AnalyzerKind::Standard)
    }
}

/// Options that shape a pipeline. Passed in explicitly, never global.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineOptions {
    pub stem: bool,
    pub remove_stopwords: bool,
}

/// Text analysis pipeline
pub struct Analyzer {
    pub tokenizer: Box<dyn Tokenizer>,
    pub filters: Vec<Box<dyn TokenFilter>>,
    pub name: String,
}

impl Analyzer {
    pub fn new(name: String, tokenizer: Box<dyn Tokenizer>) -> Self {
        Analyzer {
            tokenizer,
            filters: Vec::new(),
            name,
        }
    }

    pub fn add_filter(mut self, filter: Box<dyn TokenFilter>) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn analyze(&self, text: &str) -> Vec<Token> {
        let mut tokens = self.tokenizer.tokenize(text);

        for filter in &self.filters {
            tokens = filter.filter(tokens);
        }

        tokens
    }

    /// Name and stages, e.g. `raw_terms(standard > stop_words)`.
    pub fn describe(&self) -> String {
        let mut stages = vec![self.tokenizer.name()];
        stages.extend(self.filters.iter().map(|f| f.name()));
        format!("{}({})", self.name, stages.join(" > "))
    }

    /// Convenience wrapper returning only the token texts.
    pub fn terms(&self, text: &str) -> Vec<String> {
        self.analyze(text).into_iter().map(|t| t.text).collect()
    }

    /// Build a pipeline: tokenizer, then stopwords, then stemming.
    pub fn with_options(name: &str, options: PipelineOptions) -> Self {
        let mut analyzer = Analyzer::new(name.to_string(),
                                         Box::new(StandardTokenizer::default()));
        if options.remove_stopwords {
            analyzer = analyzer.add_filter(Box::new(StopWordFilter::english()));
        }
        if options.stem {
            analyzer = analyzer.add_filter(Box::new(StemmerFilter::english()));
        }
        analyzer
    }

    /// Full normalization for the tokenized trie and `match` clauses.
    pub fn standard_english(remove_stopwords: bool) -> Self {
        Analyzer::with_options("standard_english", PipelineOptions {
            stem: true,
            remove_stopwords,
        })
    }

    /// Light normalization for the raw trie and `term` clauses.
    pub fn raw_terms(remove_stopwords: bool) -> Self {
        Analyzer::with_options("raw_terms", PipelineOptions {
            stem: false,
            remove_stopwords,
        })
    }
}

impl Clone for Analyzer {
    fn clone(&self) -> Self {
        Analyzer {
            tokenizer: self.tokenizer.clone_box(),
            filters: self.filters.iter().map(|f| f.clone_box()).collect(),
            name: self.name.clone(),
        }
    }
}

/// The two pipelines an index runs, built once from its options.
#[derive(Clone)]
pub struct Pipelines {
    pub tokenized: Analyzer,
    pub raw: Analyzer,
}

impl Pipelines {
    pub fn new(remove_stopwords: bool) -> Self {
        Pipelines {
            tokenized: Analyzer::standard_english(remove_stopwords),
            raw: Analyzer::raw_terms(remove_stopwords),
        }
    }

    pub fn describe(&self) -> String {
        format!("{}, {}", self.tokenized.describe(), self.raw.describe())
    }
}

/// Occurrence count per distinct token, ordered by token text.
pub fn token_counts(tokens: &[String]) -> BTreeMap<&str, usize> {
    let mut counts = BTreeMap::new();
    for token in tokens {
        *counts.entry(token.as_str()).or_insert(0) += 1;
    }
    counts
}
