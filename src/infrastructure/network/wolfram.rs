// Wolfram|Alpha API flavours and their URL templates
use crate::domain::error::FolpError;
use crate::infrastructure::config::UpstreamConfig;
use crate::infrastructure::network::http::encode_component;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WolframKind {
    /// Simple API, rendered as an image
    Simple,
    /// Full Results API (JSON output)
    Full,
    /// Summary Boxes API
    Summary,
    /// Instant Calculators API
    Calc,
    /// Spoken Results API
    Spoken,
    /// LLM API
    Llm,
}

impl WolframKind {
    pub const ALL: [WolframKind; 6] = [
        WolframKind::Simple,
        WolframKind::Full,
        WolframKind::Summary,
        WolframKind::Calc,
        WolframKind::Spoken,
        WolframKind::Llm,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WolframKind::Simple => "simple",
            WolframKind::Full => "full",
            WolframKind::Summary => "summary",
            WolframKind::Calc => "calc",
            WolframKind::Spoken => "spoken",
            WolframKind::Llm => "llm",
        }
    }

    /// Only the image flavour is answered without contacting Wolfram
    pub fn is_image(&self) -> bool {
        matches!(self, WolframKind::Simple)
    }

    /// Request URL for `query`; `appid` is inserted verbatim
    pub fn url(&self, config: &UpstreamConfig, appid: &str, query: &str) -> String {
        let api = config.wolfram_api_url.trim_end_matches('/');
        let www = config.wolfram_www_url.trim_end_matches('/');
        let q = encode_component(query);
        match self {
            WolframKind::Simple => format!("{}/v1/simple?appid={}&i={}", api, appid, q),
            WolframKind::Full => {
                format!("{}/v2/query?input={}&appid={}&output=json", api, q, appid)
            }
            WolframKind::Summary => format!("{}/api/v1/summary?appid={}&i={}", www, appid, q),
            WolframKind::Calc => format!("{}/api/v1/calc?appid={}&i={}", www, appid, q),
            WolframKind::Spoken => format!("{}/v1/spoken?appid={}&i={}", api, appid, q),
            WolframKind::Llm => format!("{}/v1/llm-api?appid={}&i={}", api, appid, q),
        }
    }
}

impl FromStr for WolframKind {
    type Err = FolpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WolframKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| FolpError::InvalidWolframType(s.to_string()))
    }
}

impl fmt::Display for WolframKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_kinds() {
        for kind in WolframKind::ALL {
            assert_eq!(kind.as_str().parse::<WolframKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert!(matches!(
            "Simple".parse::<WolframKind>(),
            Err(FolpError::InvalidWolframType(_))
        ));
        assert!("image".parse::<WolframKind>().is_err());
    }

    #[test]
    fn test_simple_url() {
        let url = WolframKind::Simple.url(&UpstreamConfig::default(), "ABC-123", "integral of x^2");
        assert_eq!(
            url,
            "https://api.wolframalpha.com/v1/simple?appid=ABC-123&i=integral%20of%20x%5E2"
        );
    }

    #[test]
    fn test_url_templates() {
        let config = UpstreamConfig::default();
        let url = |kind: WolframKind| kind.url(&config, "ID", "2+2");
        assert_eq!(
            url(WolframKind::Full),
            "https://api.wolframalpha.com/v2/query?input=2%2B2&appid=ID&output=json"
        );
        assert_eq!(
            url(WolframKind::Summary),
            "https://www.wolframalpha.com/api/v1/summary?appid=ID&i=2%2B2"
        );
        assert_eq!(
            url(WolframKind::Calc),
            "https://www.wolframalpha.com/api/v1/calc?appid=ID&i=2%2B2"
        );
        assert_eq!(
            url(WolframKind::Spoken),
            "https://api.wolframalpha.com/v1/spoken?appid=ID&i=2%2B2"
        );
        assert_eq!(
            url(WolframKind::Llm),
            "https://api.wolframalpha.com/v1/llm-api?appid=ID&i=2%2B2"
        );
    }

    #[test]
    fn test_only_simple_is_image() {
        assert!(WolframKind::Simple.is_image());
        assert!(WolframKind::ALL[1..].iter().all(|k| !k.is_image()));
    }
}
