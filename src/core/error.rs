use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Io,
    Parse,
    MissingId,
    UnsupportedAnalyzer,
    InvalidFilterSyntax,
    InvalidQuery,
    InvalidConfig,
    VersionMismatch,
}

#[derive(Debug)]
pub struct Error {
    pub kind: ErrorKind,
    pub context: String,
}

impl Error {
    pub fn new(kind: ErrorKind, context: String) -> Self {
        Error { kind, context }
    }

    pub fn missing_id() -> Self {
        Error::new(ErrorKind::MissingId, "documents must have an id attribute".to_string())
    }

    pub fn unsupported_analyzer(field: &str, analyzer: &str) -> Self {
        Error::new(
            ErrorKind::UnsupportedAnalyzer,
            format!("field '{}' uses unsupported analyzer '{}'", field, analyzer),
        )
    }

    pub fn invalid_filter(context: impl Into<String>) -> Self {
        Error::new(ErrorKind::InvalidFilterSyntax, context.into())
    }

    pub fn invalid_query(context: impl Into<String>) -> Self {
        Error::new(ErrorKind::InvalidQuery, context.into())
    }

    pub fn version_mismatch(found: &str) -> Self {
        Error::new(
            ErrorKind::VersionMismatch,
            format!("Can't deserialize from version {}", found),
        )
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.context)
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error {
            kind: ErrorKind::Io,
            context: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error {
            kind: ErrorKind::Parse,
            context: err.to_string(),
        }
    }
}

impl From<tempfile::PersistError> for Error {
    fn from(err: tempfile::PersistError) -> Self {
        Error {
            kind: ErrorKind::Io,
            context: format!("snapshot persist failed: {}", err.error),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_kind_and_context() {
        let err = Error::version_mismatch("0.0");
        assert_eq!(err.kind(), ErrorKind::VersionMismatch);
        assert_eq!(err.to_string(), "VersionMismatch: Can't deserialize from version 0.0");
    }

    #[test]
    fn json_errors_map_to_parse() {
        let err: Error = serde_json::from_str::<serde_json::Value>("{").unwrap_err().into();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }
}
