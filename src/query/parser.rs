use serde_json::{Map, Value};
use crate::core::error::{Error, Result};
use crate::query::ast::{Clause, ClauseGroup, FieldTarget, SearchQuery, SubQuery};

const ALL_FIELDS: &str = "_all";

/// Filter combinators accepted in `{<op>: [clause, ...]}` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperator {
    And,
}

impl FilterOperator {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "and" => Some(FilterOperator::And),
            _ => None,
        }
    }
}

/// Which error a malformed clause object raises.
#[derive(Clone, Copy)]
enum Section {
    Must,
    Filter,
}

/// Parser for the JSON query language.
///
/// Examples:
/// - `"sale"` -> match on every field
/// - `{"must": {"match": {"title": "sale"}}}`
/// - `{"must": {"term": {"category": {"value": "crime", "boost": 3}}}}`
/// - `{"must": ..., "filter": {"and": [{"term": {...}}, {"match": {...}}]}}`
/// - `{"matchAll": true, "filter": [...]}`
pub struct QueryParser;

impl QueryParser {
    pub fn new() -> Self {
        QueryParser
    }

    pub fn parse(&self, query: &Value) -> Result<SearchQuery> {
        match query {
            Value::String(text) => Ok(SearchQuery::text(text)),
            Value::Object(map) => self.parse_object(map),
            other => Err(Error::invalid_query(format!(
                "query must be a string or an object, got {}",
                other
            ))),
        }
    }

    pub fn parse_str(&self, json: &str) -> Result<SearchQuery> {
        let value: Value = serde_json::from_str(json)?;
        self.parse(&value)
    }

    fn parse_object(&self, map: &Map<String, Value>) -> Result<SearchQuery> {
        let mut query = SearchQuery::new();

        for (key, value) in map {
            match key.as_str() {
                "must" => query.must = self.parse_must(value)?,
                "filter" => query.filter = self.parse_filter(value)?,
                "matchAll" => {
                    query.match_all = value.as_bool().ok_or_else(|| {
                        Error::invalid_query("matchAll must be a boolean")
                    })?;
                }
                other => {
                    return Err(Error::invalid_query(format!("unknown query key '{}'", other)));
                }
            }
        }

        Ok(query)
    }

    fn parse_must(&self, value: &Value) -> Result<Vec<ClauseGroup>> {
        match value {
            Value::Object(map) => Ok(vec![self.parse_group(map, Section::Must)?]),
            Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    Value::Object(map) => self.parse_group(map, Section::Must),
                    _ => Err(Error::invalid_query("must clauses must be objects")),
                })
                .collect(),
            _ => Err(Error::invalid_query("must must be an object or an array")),
        }
    }

    fn parse_filter(&self, value: &Value) -> Result<Vec<ClauseGroup>> {
        match value {
            Value::Array(items) => self.parse_filter_list(items),
            Value::Object(map) => {
                if !map.is_empty() && map.keys().all(|k| is_clause_kind(k)) {
                    return Ok(vec![self.parse_group(map, Section::Filter)?]);
                }

                let mut entries = map.iter();
                let (op_name, operand) = match (entries.next(), entries.next()) {
                    (Some(entry), None) => entry,
                    _ => return Err(Error::invalid_filter("Invalid query syntax: compound filter takes one operator")),
                };

                let op = FilterOperator::parse(op_name).ok_or_else(|| {
                    Error::invalid_filter(format!("Invalid query syntax: unsupported filter operator '{}'", op_name))
                })?;

                match (op, operand) {
                    (FilterOperator::And, Value::Array(items)) => self.parse_filter_list(items),
                    (FilterOperator::And, _) => Err(Error::invalid_filter(
                        "Invalid query syntax: 'and' expects an array of clauses",
                    )),
                }
            }
            _ => Err(Error::invalid_filter("Invalid query syntax: filter must be an object or an array")),
        }
    }

    fn parse_filter_list(&self, items: &[Value]) -> Result<Vec<ClauseGroup>> {
        items
            .iter()
            .map(|item| match item {
                Value::Object(map) => self.parse_group(map, Section::Filter),
                _ => Err(Error::invalid_filter("Invalid query syntax: filter clauses must be objects")),
            })
            .collect()
    }

    fn parse_group(&self, map: &Map<String, Value>, section: Section) -> Result<ClauseGroup> {
        let mut clauses = Vec::with_capacity(map.len());

        for (kind, fields) in map {
            let fields = match fields {
                Value::Object(fields) => fields,
                _ => return Err(Error::invalid_query(format!("'{}' expects an object of fields", kind))),
            };

            let clause = match kind.as_str() {
                "match" => Clause::Match(self.parse_sub_queries(fields, "query", "value")?),
                "term" => Clause::Term(self.parse_sub_queries(fields, "value", "query")?),
                other => {
                    let context = format!("unknown clause '{}'", other);
                    return Err(match section {
                        Section::Must => Error::invalid_query(context),
                        Section::Filter => Error::invalid_filter(format!("Invalid query syntax: {}", context)),
                    });
                }
            };
            clauses.push(clause);
        }

        Ok(ClauseGroup::new(clauses))
    }

    /// `_all` takes precedence over any named field in the same object.
    fn parse_sub_queries(&self, fields: &Map<String, Value>, text_key: &str, fallback_key: &str) -> Result<Vec<SubQuery>> {
        if let Some(value) = fields.get(ALL_FIELDS) {
            return Ok(vec![parse_sub_query(FieldTarget::All, value, text_key, fallback_key)?]);
        }

        fields
            .iter()
            .map(|(field, value)| {
                parse_sub_query(FieldTarget::Field(field.clone()), value, text_key, fallback_key)
            })
            .collect()
    }
}

impl Default for QueryParser {
    fn default() -> Self {
        Self::new()
    }
}

fn is_clause_kind(key: &str) -> bool {
    matches!(key, "match" | "term")
}

fn parse_sub_query(target: FieldTarget, value: &Value, text_key: &str, fallback_key: &str) -> Result<SubQuery> {
    match value {
        Value::String(text) => Ok(SubQuery::new(target, text)),
        Value::Number(n) => Ok(SubQuery::new(target, &n.to_string())),
        Value::Object(map) => {
            let text = match map.get(text_key).or_else(|| map.get(fallback_key)) {
                Some(Value::String(text)) => text.clone(),
                Some(Value::Number(n)) => n.to_string(),
                _ => {
                    return Err(Error::invalid_query(format!(
                        "sub-query needs a '{}' string",
                        text_key
                    )));
                }
            };
            let boost = match map.get("boost") {
                None | Some(Value::Null) => None,
                Some(b) => Some(b.as_f64().ok_or_else(|| Error::invalid_query("boost must be a number"))?),
            };
            Ok(SubQuery { target, text, boost })
        }
        other => Err(Error::invalid_query(format!("unsupported sub-query value {}", other))),
    }
}
