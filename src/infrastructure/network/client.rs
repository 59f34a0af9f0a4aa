use crate::domain::error::FolpError;
use crate::domain::model::{CodeItem, Definition, WikiSummary};
use crate::domain::traits::Upstream;
use crate::infrastructure::config::UpstreamConfig;
use crate::infrastructure::network::http::{create_client, encode_component};
use crate::infrastructure::network::normalize::{
    self, DictionaryEntry, PageSummary, SearchResponse, TranslateResponse,
};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

// Keep status error details short enough to show in a panel
const MAX_ERROR_BODY_CHARS: usize = 200;

/// reqwest-backed implementation of every lookup service
pub struct HttpUpstream {
    client: Client,
    config: UpstreamConfig,
}

impl HttpUpstream {
    pub fn new(client: Client, config: UpstreamConfig) -> Self {
        Self { client, config }
    }

    pub fn from_config(config: UpstreamConfig) -> Result<Self, FolpError> {
        let client = create_client(&config)?;
        Ok(Self::new(client, config))
    }

    pub fn dictionary_url(&self, word: &str) -> String {
        format!(
            "{}/api/v2/entries/en/{}",
            self.config.dictionary_url.trim_end_matches('/'),
            encode_component(word)
        )
    }

    pub fn encyclopedia_url(&self, title: &str) -> String {
        format!(
            "{}/api/rest_v1/page/summary/{}",
            self.config.wiki_url.trim_end_matches('/'),
            encode_component(title)
        )
    }

    pub fn translate_url(&self, text: &str, target: &str) -> String {
        format!(
            "{}/get?q={}&langpair={}",
            self.config.translate_url.trim_end_matches('/'),
            encode_component(text),
            encode_component(&format!("auto|{}", target))
        )
    }

    pub fn search_url(&self, query: &str) -> String {
        format!(
            "{}/2.3/search/advanced?order=desc&sort=relevance&q={}&site=stackoverflow&pagesize={}",
            self.config.stackexchange_url.trim_end_matches('/'),
            encode_component(query),
            normalize::MAX_CODE_ITEMS
        )
    }

    /// GET `url` with `timeout`, turning non-success statuses into errors
    async fn get(&self, url: &str, timeout: Duration) -> Result<Response, FolpError> {
        let response = self.client.get(url).timeout(timeout).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FolpError::UpstreamStatus {
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        timeout: Duration,
    ) -> Result<T, FolpError> {
        let bytes = self.get(url, timeout).await?.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl Upstream for HttpUpstream {
    async fn dictionary(&self, word: &str) -> Result<Option<Vec<Definition>>, FolpError> {
        let url = self.dictionary_url(word);
        let entries: Vec<DictionaryEntry> =
            self.get_json(&url, self.config.lookup_timeout()).await?;
        Ok(normalize::dictionary(entries))
    }

    async fn encyclopedia(&self, title: &str) -> Result<Option<WikiSummary>, FolpError> {
        let url = self.encyclopedia_url(title);
        let summary: PageSummary = self.get_json(&url, self.config.lookup_timeout()).await?;
        Ok(normalize::encyclopedia(summary))
    }

    async fn translate(&self, text: &str, target: &str) -> Result<Option<String>, FolpError> {
        let url = self.translate_url(text, target);
        let response: TranslateResponse =
            self.get_json(&url, self.config.translate_timeout()).await?;
        Ok(normalize::translation(response))
    }

    async fn search_code(&self, query: &str) -> Result<Option<Vec<CodeItem>>, FolpError> {
        let url = self.search_url(query);
        let response: SearchResponse = self.get_json(&url, self.config.code_timeout()).await?;
        Ok(normalize::code_items(response))
    }

    async fn fetch_text(&self, url: &str) -> Result<String, FolpError> {
        let response = self.get(url, self.config.wolfram_timeout()).await?;
        Ok(response.text().await?)
    }
}
