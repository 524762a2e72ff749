use crate::core::types::IndexKind;

/// Field selector of a sub-query.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldTarget {
    /// Every configured field (`_all`).
    All,
    Field(String),
}

/// Search text for one field, with an optional boost overriding the
/// field's configured boost.
#[derive(Debug, Clone, PartialEq)]
pub struct SubQuery {
    pub target: FieldTarget,
    pub text: String,
    pub boost: Option<f64>,
}

impl SubQuery {
    pub fn new(target: FieldTarget, text: &str) -> Self {
        SubQuery {
            target,
            text: text.to_string(),
            boost: None,
        }
    }

    pub fn with_boost(mut self, boost: f64) -> Self {
        self.boost = Some(boost);
        self
    }
}

/// Query operator
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    /// Normalized search against the tokenized trie.
    Match(Vec<SubQuery>),
    /// Exact search against the raw trie.
    Term(Vec<SubQuery>),
}

impl Clause {
    pub fn matching(field: &str, text: &str) -> Self {
        Clause::Match(vec![SubQuery::new(FieldTarget::Field(field.to_string()), text)])
    }

    pub fn matching_all(text: &str) -> Self {
        Clause::Match(vec![SubQuery::new(FieldTarget::All, text)])
    }

    pub fn term(field: &str, value: &str) -> Self {
        Clause::Term(vec![SubQuery::new(FieldTarget::Field(field.to_string()), value)])
    }

    pub fn index_kind(&self) -> IndexKind {
        match self {
            Clause::Match(_) => IndexKind::Tokenized,
            Clause::Term(_) => IndexKind::Raw,
        }
    }

    pub fn sub_queries(&self) -> &[SubQuery] {
        match self {
            Clause::Match(subs) | Clause::Term(subs) => subs,
        }
    }
}

/// One clause object of a query. Its clauses are evaluated together and
/// their match sets merged.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClauseGroup {
    pub clauses: Vec<Clause>,
}

impl ClauseGroup {
    pub fn new(clauses: Vec<Clause>) -> Self {
        ClauseGroup { clauses }
    }
}

impl From<Clause> for ClauseGroup {
    fn from(clause: Clause) -> Self {
        ClauseGroup { clauses: vec![clause] }
    }
}

/// Parsed search request.
///
/// `must` groups are scored and summed. Every `filter` group is a condition
/// a result must also satisfy; filter scores are discarded.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchQuery {
    pub must: Vec<ClauseGroup>,
    pub filter: Vec<ClauseGroup>,
    pub match_all: bool,
}

impl SearchQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for `{must: {match: {_all: text}}}`.
    pub fn text(text: &str) -> Self {
        SearchQuery::new().with_must(Clause::matching_all(text))
    }

    pub fn match_all() -> Self {
        SearchQuery {
            match_all: true,
            ..Self::default()
        }
    }

    pub fn with_must(mut self, group: impl Into<ClauseGroup>) -> Self {
        self.must.push(group.into());
        self
    }

    pub fn with_filter(mut self, group: impl Into<ClauseGroup>) -> Self {
        self.filter.push(group.into());
        self
    }

    pub fn has_filter(&self) -> bool {
        !self.filter.is_empty()
    }

    pub fn clause_count(&self) -> usize {
        self.must.iter().chain(&self.filter).map(|g| g.clauses.len()).sum()
    }
}
