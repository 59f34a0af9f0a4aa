use crate::domain::error::FolpError;
use crate::domain::model::{CodeItem, Definition, WikiSummary};
use async_trait::async_trait;
use std::time::Instant;

/// Third-party lookup services
///
/// Every method issues at most one outbound call and returns the normalized
/// payload. `Ok(None)` means the upstream answered but had nothing usable;
/// transport failures, timeouts and non-success statuses come back as `Err`.
#[async_trait]
pub trait Upstream: Send + Sync {
    /// First definition of the first meaning for `word`
    async fn dictionary(&self, word: &str) -> Result<Option<Vec<Definition>>, FolpError>;

    /// Page summary for `title`
    async fn encyclopedia(&self, title: &str) -> Result<Option<WikiSummary>, FolpError>;

    /// Translate `text` into `target`
    async fn translate(&self, text: &str, target: &str) -> Result<Option<String>, FolpError>;

    /// Question search, at most five items in upstream order
    async fn search_code(&self, query: &str) -> Result<Option<Vec<CodeItem>>, FolpError>;

    /// Fetch `url` and return the raw body as text
    async fn fetch_text(&self, url: &str) -> Result<String, FolpError>;
}

/// Time source for cache expiry
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}
