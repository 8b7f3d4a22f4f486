use thiserror::Error;

use crate::assert::AssertionError;

/// Library error. Mismatches are never errors: they come back as a `Diff`.
#[derive(Debug, Error)]
pub enum Error {
    /// The value/shape nesting went deeper than `Options::max_depth`.
    #[error("nesting exceeded the depth limit of {limit} at `{path}`")]
    DepthExceeded { limit: usize, path: String },

    #[error("at JSON path {path} → {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Assertion(#[from] AssertionError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
