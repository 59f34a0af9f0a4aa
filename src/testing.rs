//! Test doubles shared by unit and integration tests
//!
//! [`StubUpstream`] answers from canned results and records every call, so
//! tests can assert how often (and with what) the upstream was contacted.

use crate::domain::error::FolpError;
use crate::domain::model::{CodeItem, Definition, WikiSummary};
use crate::domain::traits::Upstream;
use crate::infrastructure::config::Config;
use crate::infrastructure::storage::cache::{ManualClock, ResponseCache};
use crate::state::AppState;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Canned result; `Err` carries the failure reason
pub type Canned<T> = Result<T, &'static str>;

pub struct StubUpstream {
    dictionary: Canned<Option<Vec<Definition>>>,
    encyclopedia: Canned<Option<WikiSummary>>,
    translation: Canned<Option<String>>,
    code: Canned<Option<Vec<CodeItem>>>,
    text: Canned<String>,
    delay: Option<Duration>,
    calls: Mutex<Vec<(&'static str, String)>>,
}

impl Default for StubUpstream {
    fn default() -> Self {
        Self {
            dictionary: Ok(None),
            encyclopedia: Ok(None),
            translation: Ok(None),
            code: Ok(None),
            text: Ok(String::new()),
            delay: None,
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl StubUpstream {
    pub fn with_dictionary(mut self, canned: Canned<Option<Vec<Definition>>>) -> Self {
        self.dictionary = canned;
        self
    }

    pub fn with_encyclopedia(mut self, canned: Canned<Option<WikiSummary>>) -> Self {
        self.encyclopedia = canned;
        self
    }

    pub fn with_translation(mut self, canned: Canned<Option<String>>) -> Self {
        self.translation = canned;
        self
    }

    pub fn with_code(mut self, canned: Canned<Option<Vec<CodeItem>>>) -> Self {
        self.code = canned;
        self
    }

    pub fn with_text(mut self, canned: Canned<String>) -> Self {
        self.text = canned;
        self
    }

    /// Sleep this long inside every call
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of calls made to `method`
    pub fn calls(&self, method: &str) -> usize {
        self.log().iter().filter(|(name, _)| *name == method).count()
    }

    pub fn total_calls(&self) -> usize {
        self.log().len()
    }

    /// Argument of the most recent call to `method`
    pub fn last_arg(&self, method: &str) -> Option<String> {
        self.log()
            .iter()
            .rev()
            .find(|(name, _)| *name == method)
            .map(|(_, arg)| arg.clone())
    }

    fn log(&self) -> std::sync::MutexGuard<'_, Vec<(&'static str, String)>> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    async fn record<T: Clone>(
        &self,
        method: &'static str,
        arg: String,
        canned: &Canned<T>,
    ) -> Result<T, FolpError> {
        self.log().push((method, arg));
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        canned.clone().map_err(|reason| FolpError::UpstreamStatus {
            status: 503,
            body: reason.to_string(),
        })
    }
}

#[async_trait]
impl Upstream for StubUpstream {
    async fn dictionary(&self, word: &str) -> Result<Option<Vec<Definition>>, FolpError> {
        self.record("dictionary", word.to_string(), &self.dictionary)
            .await
    }

    async fn encyclopedia(&self, title: &str) -> Result<Option<WikiSummary>, FolpError> {
        self.record("encyclopedia", title.to_string(), &self.encyclopedia)
            .await
    }

    async fn translate(&self, text: &str, target: &str) -> Result<Option<String>, FolpError> {
        self.record("translate", format!("{}|{}", text, target), &self.translation)
            .await
    }

    async fn search_code(&self, query: &str) -> Result<Option<Vec<CodeItem>>, FolpError> {
        self.record("search_code", query.to_string(), &self.code)
            .await
    }

    async fn fetch_text(&self, url: &str) -> Result<String, FolpError> {
        self.record("fetch_text", url.to_string(), &self.text).await
    }
}

/// App state wired to a stub upstream and a manually driven clock
pub struct Harness {
    pub state: AppState,
    pub stub: Arc<StubUpstream>,
    pub clock: Arc<ManualClock>,
}

pub fn harness(stub: StubUpstream) -> Harness {
    harness_with_config(stub, Config::default())
}

pub fn harness_with_config(stub: StubUpstream, config: Config) -> Harness {
    let clock = Arc::new(ManualClock::new());
    let cache = Arc::new(ResponseCache::with_clock(
        config.cache.ttl(),
        config.cache.max_entries,
        clock.clone(),
    ));
    let stub = Arc::new(stub);
    let state = AppState::with_parts(config, cache, stub.clone());
    Harness { state, stub, clock }
}
