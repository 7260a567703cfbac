use thiserror::Error;

/// Errors from the admin API client.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid API base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

/// Errors that abort the import of a single catalog.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("failed to read catalog source {path}: {reason}")]
    SourceRead { path: String, reason: String },

    #[error(transparent)]
    Client(#[from] ClientError),
}

impl ImportError {
    pub(crate) fn source_read(path: &std::path::Path, reason: impl std::fmt::Display) -> Self {
        ImportError::SourceRead {
            path: path.display().to_string(),
            reason: reason.to_string(),
        }
    }
}
