use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading the corpus or answering a query
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed csv record: {0}")]
    Csv(#[from] csv::Error),

    /// A list-valued cell did not hold a JSON array of strings
    #[error("row {row}: column `{column}` is not a JSON string list: {source}")]
    MalformedField {
        row: usize,
        column: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("corpus produced an empty vocabulary")]
    EmptyVocabulary,

    #[error("query has {given} distinct terms, at most {max} are allowed")]
    TooManyTerms { given: usize, max: usize },

    #[error("index has {recipes} recipes but {rows} vector rows")]
    InconsistentIndex { recipes: usize, rows: usize },

    #[error("index snapshot: {0}")]
    Snapshot(#[from] serde_cbor::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] figment::Error),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io { path: path.into(), source }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
