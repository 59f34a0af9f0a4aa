// Upstream response structures and their normalization
use crate::domain::model::{CodeItem, Definition, WikiSummary};
use serde::Deserialize;

pub const MAX_CODE_ITEMS: usize = 5;

// Free Dictionary API
#[derive(Deserialize, Debug)]
pub struct DictionaryEntry {
    pub meanings: Option<Vec<Meaning>>,
}

#[derive(Deserialize, Debug)]
pub struct Meaning {
    #[serde(default)]
    pub definitions: Vec<DefinitionItem>,
}

#[derive(Deserialize, Debug)]
pub struct DefinitionItem {
    #[serde(default)]
    pub definition: String,
}

// Wikipedia REST summary
#[derive(Deserialize, Debug)]
pub struct PageSummary {
    pub extract: Option<String>,
    pub content_urls: Option<ContentUrls>,
}

#[derive(Deserialize, Debug)]
pub struct ContentUrls {
    pub desktop: Option<PageUrl>,
}

#[derive(Deserialize, Debug)]
pub struct PageUrl {
    pub page: Option<String>,
}

// MyMemory
#[derive(Deserialize, Debug)]
pub struct TranslateResponse {
    #[serde(rename = "responseData")]
    pub response_data: Option<ResponseData>,
}

#[derive(Deserialize, Debug)]
pub struct ResponseData {
    #[serde(rename = "translatedText")]
    pub translated_text: Option<String>,
}

// StackExchange advanced search
#[derive(Deserialize, Debug)]
pub struct SearchResponse {
    pub items: Option<Vec<SearchItem>>,
}

#[derive(Deserialize, Debug)]
pub struct SearchItem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub is_answered: bool,
    pub score: Option<i64>,
}

/// Keep only the first definition of the first meaning of the first entry
pub fn dictionary(entries: Vec<DictionaryEntry>) -> Option<Vec<Definition>> {
    let meaning = entries.into_iter().next()?.meanings?.into_iter().next()?;
    let definition = meaning
        .definitions
        .into_iter()
        .next()
        .map(|d| d.definition)
        .unwrap_or_default();
    Some(vec![Definition { definition }])
}

pub fn encyclopedia(summary: PageSummary) -> Option<WikiSummary> {
    let extract = summary.extract.filter(|e| !e.is_empty())?;
    let url = summary
        .content_urls
        .and_then(|urls| urls.desktop)
        .and_then(|desktop| desktop.page);
    Some(WikiSummary { extract, url })
}

pub fn translation(response: TranslateResponse) -> Option<String> {
    response
        .response_data
        .and_then(|data| data.translated_text)
        .filter(|text| !text.is_empty())
}

pub fn code_items(response: SearchResponse) -> Option<Vec<CodeItem>> {
    let items = response.items?;
    Some(
        items
            .into_iter()
            .take(MAX_CODE_ITEMS)
            .map(|item| CodeItem {
                snippet: if item.is_answered {
                    item.title.clone()
                } else {
                    String::new()
                },
                title: item.title,
                link: item.link,
                score: item.score,
            })
            .collect(),
    )
}
