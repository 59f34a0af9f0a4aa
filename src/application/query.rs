use crate::domain::error::FolpError;
use crate::domain::model::{CodeSearchResult, ExplainResult, LookupResult, TranslateResult};
use crate::state::AppState;
use serde::Serialize;
use std::future::Future;

/// Freshly computed payload, tagged with whether it may be cached
pub enum Fetched<T> {
    Store(T),
    Transient(T),
}

/// Serve `key` from the cache, or compute, serialize and store it.
///
/// Concurrent misses for the same key share one computation. The body is
/// stored only after it is fully serialized, and a hit returns exactly the
/// stored bytes.
pub async fn cached<T, F, Fut>(state: &AppState, key: &str, compute: F) -> Result<String, FolpError>
where
    T: Serialize,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Fetched<T>>,
{
    if let Some(hit) = state.cache.get(key) {
        tracing::debug!(key, "cache hit");
        return Ok(hit);
    }
    tracing::debug!(key, "cache miss");

    state
        .flights
        .run(key, || async move {
            // Another flight may have finished between the first check and now
            if let Some(hit) = state.cache.get(key) {
                return Ok(hit);
            }
            let (value, store) = match compute().await {
                Fetched::Store(value) => (value, true),
                Fetched::Transient(value) => (value, false),
            };
            let body = serde_json::to_string(&value)?;
            if store {
                state.cache.set(key, body.clone());
            }
            Ok::<_, FolpError>(body)
        })
        .await
}

/// Swallow an upstream failure, logging it
fn recover<T>(service: &str, query: &str, outcome: Result<Option<T>, FolpError>) -> Option<T> {
    match outcome {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(service, query, error = %e, "upstream lookup failed");
            None
        }
    }
}

pub fn no_match_message(q: &str) -> String {
    format!(
        "No direct matches found for \"{}\". You can try a more specific phrase or use the Translate/Code tool.",
        q
    )
}

pub const TRANSLATE_UNAVAILABLE: &str = "Translation service unavailable; showing original text.";
pub const CODE_UNAVAILABLE: &str = "No results or StackExchange API unreachable.";

/// Dictionary + encyclopedia lookup for `q`
pub async fn lookup(state: &AppState, q: &str) -> Result<String, FolpError> {
    let key = format!("lookup:{}", q);
    cached(state, &key, || async { Fetched::Store(fetch_lookup(state, q).await) }).await
}

async fn fetch_lookup(state: &AppState, q: &str) -> LookupResult {
    // The dictionary only knows single words
    let word = q.split_whitespace().next().unwrap_or(q);
    let (dictionary, wiki) = tokio::join!(
        state.upstream.dictionary(word),
        state.upstream.encyclopedia(q)
    );

    let mut result = LookupResult {
        dictionary: recover("dictionary", q, dictionary),
        wiki: recover("encyclopedia", q, wiki),
        message: None,
    };
    if result.is_empty() {
        result.message = Some(no_match_message(q));
    }
    result
}

pub async fn translate(state: &AppState, q: &str, target: &str) -> Result<String, FolpError> {
    let key = format!("translate:{}:{}", q, target);
    cached(state, &key, || async {
        let translated = recover("translation", q, state.upstream.translate(q, target).await);
        // The fallback is cached too, so a flaky service is not hammered
        Fetched::Store(match translated {
            Some(translation) => TranslateResult {
                message: None,
                translation,
            },
            None => TranslateResult {
                message: Some(TRANSLATE_UNAVAILABLE.to_string()),
                translation: q.to_string(),
            },
        })
    })
    .await
}

pub async fn code(state: &AppState, q: &str) -> Result<String, FolpError> {
    let key = format!("code:{}", q);
    cached(state, &key, || async {
        match recover("code search", q, state.upstream.search_code(q).await) {
            Some(items) => Fetched::Store(CodeSearchResult {
                items,
                message: None,
            }),
            None => Fetched::Transient(CodeSearchResult {
                items: Vec::new(),
                message: Some(CODE_UNAVAILABLE.to_string()),
            }),
        }
    })
    .await
}

/// Templated explanation; no upstream is involved
pub fn explain(q: &str) -> ExplainResult {
    ExplainResult {
        explanation: format!(
            "Explanation of \"{}\": This term refers to a concept that commonly appears in technical or popular contexts. For a concise understanding: break it down into its basic components, seek authoritative articles or summaries, and look for applied examples or simple tutorials.",
            q
        ),
    }
}
