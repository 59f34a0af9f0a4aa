use thiserror::Error;

#[derive(Error, Debug)]
pub enum FolpError {
    #[error("{0}")]
    Validation(String),

    #[error("invalid JSON body")]
    InvalidJson(#[source] serde_json::Error),

    #[error("Invalid type")]
    InvalidWolframType(String),

    #[error("{0}")]
    Config(String),

    #[error("{service} API request failed")]
    UpstreamFailed {
        service: &'static str,
        details: String,
    },

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Upstream returned status {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FolpError {
    pub fn q_required() -> Self {
        FolpError::Validation("q required".to_string())
    }

    /// True for failures that come from a third-party service rather than from
    /// the caller or from local configuration.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            FolpError::Http(_)
                | FolpError::UpstreamStatus { .. }
                | FolpError::Json(_)
                | FolpError::UpstreamFailed { .. }
        )
    }

    /// Wrap an upstream failure so it can be surfaced to the caller
    pub fn upstream_failed(service: &'static str, source: FolpError) -> Self {
        FolpError::UpstreamFailed {
            service,
            details: source.to_string(),
        }
    }
}
