use thiserror::Error;

/// Fatal load failures. Anything less (dangling references, unknown
/// types, malformed individual entries) degrades into a diagnostic and
/// the parse continues.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed document: {0}")]
    MalformedDocument(String),
}

impl LoadError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        LoadError::MalformedDocument(reason.into())
    }
}
