use serde::{Deserialize, Serialize};

// 查询请求体 (所有 POST 端点共用)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueryRequest {
    #[serde(default)]
    pub q: Option<serde_json::Value>,
    #[serde(default)]
    pub target: Option<serde_json::Value>,
}

impl QueryRequest {
    /// Trimmed `q`, or `None` when it is missing, not a string, or blank.
    pub fn query(&self) -> Option<&str> {
        self.q
            .as_ref()
            .and_then(|v| v.as_str())
            .map(str::trim)
            .filter(|q| !q.is_empty())
    }

    /// Target language; missing, empty or non-string falls back to `en`.
    pub fn target(&self) -> &str {
        self.target
            .as_ref()
            .and_then(|v| v.as_str())
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_TARGET)
    }
}

pub const DEFAULT_TARGET: &str = "en";

// 词典 + 百科组合结果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LookupResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dictionary: Option<Vec<Definition>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wiki: Option<WikiSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl LookupResult {
    pub fn is_empty(&self) -> bool {
        self.dictionary.is_none() && self.wiki.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Definition {
    pub definition: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WikiSummary {
    pub extract: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

// 翻译结果: 真实译文, 或原文 + 说明
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslateResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub translation: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CodeSearchResult {
    pub items: Vec<CodeItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeItem {
    pub title: String,
    pub link: String,
    pub snippet: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplainResult {
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WolframResult {
    Image { url: String },
    Text { result: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct Health {
    pub ok: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(value: serde_json::Value) -> QueryRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_query_is_trimmed() {
        assert_eq!(request(json!({"q": "  hello  "})).query(), Some("hello"));
    }

    #[test]
    fn test_blank_or_non_string_query_is_missing() {
        assert_eq!(request(json!({"q": "   "})).query(), None);
        assert_eq!(request(json!({"q": 42})).query(), None);
        assert_eq!(request(json!({})).query(), None);
    }

    #[test]
    fn test_target_defaults_to_en() {
        assert_eq!(request(json!({"q": "x"})).target(), "en");
        assert_eq!(request(json!({"q": "x", "target": ""})).target(), "en");
        assert_eq!(request(json!({"q": "x", "target": "fr"})).target(), "fr");
    }

    #[test]
    fn test_non_string_target_defaults_to_en() {
        assert_eq!(request(json!({"q": "x", "target": 5})).target(), "en");
        assert_eq!(request(json!({"q": "x", "target": null})).target(), "en");
    }

    #[test]
    fn test_lookup_result_omits_absent_fields() {
        let result = LookupResult {
            message: Some("nothing".into()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_string(&result).unwrap(),
            r#"{"message":"nothing"}"#
        );
    }

    #[test]
    fn test_translate_fallback_field_order() {
        let result = TranslateResult {
            message: Some("unavailable".into()),
            translation: "hola".into(),
        };
        assert_eq!(
            serde_json::to_string(&result).unwrap(),
            r#"{"message":"unavailable","translation":"hola"}"#
        );
    }

    #[test]
    fn test_wolfram_result_is_untagged() {
        let image = WolframResult::Image { url: "u".into() };
        let text = WolframResult::Text { result: "42".into() };
        assert_eq!(serde_json::to_string(&image).unwrap(), r#"{"url":"u"}"#);
        assert_eq!(serde_json::to_string(&text).unwrap(), r#"{"result":"42"}"#);
    }
}
