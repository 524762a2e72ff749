use std::collections::BTreeMap;
use serde::{Serialize, Deserialize};
use crate::analysis::analyzer::AnalyzerKind;
use crate::core::error::{Error, ErrorKind, Result};

/// Per-field indexing options. Both keys are optional in the JSON form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analyzer: Option<String>,
}

impl FieldConfig {
    pub fn boosted(boost: f64) -> Self {
        FieldConfig {
            boost: Some(boost),
            analyzer: None,
        }
    }

    pub fn keyword() -> Self {
        FieldConfig {
            boost: None,
            analyzer: Some("keyword".to_string()),
        }
    }

    pub fn with_boost(mut self, boost: f64) -> Self {
        self.boost = Some(boost);
        self
    }

    pub fn with_analyzer(mut self, analyzer: &str) -> Self {
        self.analyzer = Some(analyzer.to_string());
        self
    }
}

/// Key of the stored payload inside a serialized document record.
const RESERVED_FIELD: &str = "doc";

/// Construction-time index configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IndexConfig {
    /// Indexed fields; a `null` entry indexes the field with defaults.
    pub fields: BTreeMap<String, Option<FieldConfig>>,
    /// Keep a copy of every document for result hydration.
    pub store_docs: bool,
    /// Also index every proper prefix of each token.
    pub allow_partial: bool,
    /// Remove stopwords in both pipelines.
    pub stopwords: bool,
}

impl IndexConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: IndexConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_field(mut self, name: &str, field: FieldConfig) -> Self {
        self.fields.insert(name.to_string(), Some(field));
        self
    }

    pub fn with_default_field(mut self, name: &str) -> Self {
        self.fields.insert(name.to_string(), None);
        self
    }

    pub fn store_docs(mut self, enabled: bool) -> Self {
        self.store_docs = enabled;
        self
    }

    pub fn allow_partial(mut self, enabled: bool) -> Self {
        self.allow_partial = enabled;
        self
    }

    pub fn stopwords(mut self, enabled: bool) -> Self {
        self.stopwords = enabled;
        self
    }

    /// Boosts must be finite and non-negative, and no field may be named
    /// `doc` (the stored payload's key in a document record).
    /// Analyzer names are checked when a document is indexed.
    pub fn validate(&self) -> Result<()> {
        for (name, field) in &self.fields {
            if name == RESERVED_FIELD {
                return Err(Error::new(
                    ErrorKind::InvalidConfig,
                    format!("Field name '{}' is reserved", name),
                ));
            }
            if let Some(boost) = field.as_ref().and_then(|f| f.boost) {
                if !boost.is_finite() || boost < 0.0 {
                    return Err(Error::new(
                        ErrorKind::InvalidConfig,
                        format!("Invalid boost given for field '{}', {}", name, boost),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Configured boost, or 1 when unset. A boost of 0 counts as unset.
    pub fn field_boost(&self, field: &str) -> f64 {
        self.fields
            .get(field)
            .and_then(|f| f.as_ref())
            .and_then(|f| f.boost)
            .filter(|boost| *boost != 0.0)
            .unwrap_or(1.0)
    }

    pub fn analyzer_for(&self, field: &str) -> Result<AnalyzerKind> {
        match self.fields.get(field).and_then(|f| f.as_ref()).and_then(|f| f.analyzer.as_deref()) {
            None => Ok(AnalyzerKind::Standard),
            Some(name) => AnalyzerKind::parse(name)
                .ok_or_else(|| Error::unsupported_analyzer(field, name)),
        }
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}
