// Library error type.
//
// The binary reports everything through anyhow, but callers of the library
// need to tell a bad index apart from a bad file, so the pipeline stages
// return this enum instead.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LookalikeError {
    #[error("cannot read dataset {}: {source}", .path.display())]
    DataAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("dataset {} has no `{column}` column", .path.display())]
    MissingColumn { column: &'static str, path: PathBuf },

    #[error("dataset {} has no rows with a description", .path.display())]
    EmptyDataset { path: PathBuf },

    #[error("empty vocabulary: descriptions contain only stop words")]
    EmptyVocabulary,

    #[error("product index {index} out of range (catalog has {len} products)")]
    OutOfRange { index: usize, len: usize },

    #[error("rendering failed: {0}")]
    Render(String),
}

impl LookalikeError {
    /// Wrap any backend error as a rendering failure.
    pub fn render(err: impl std::fmt::Display) -> Self {
        LookalikeError::Render(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LookalikeError>;
