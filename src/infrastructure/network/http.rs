// HTTP client utilities
use crate::domain::error::FolpError;
use crate::infrastructure::config::UpstreamConfig;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::Client;

// Characters JavaScript's encodeURIComponent leaves alone
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Create the shared HTTP client
///
/// No client-wide timeout: each upstream call sets its own.
pub fn create_client(config: &UpstreamConfig) -> Result<Client, FolpError> {
    Ok(Client::builder()
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(std::time::Duration::from_secs(30))
        .user_agent(config.user_agent.as_str())
        .build()?)
}

/// Percent-encode a path segment or query value
pub fn encode_component(input: &str) -> String {
    utf8_percent_encode(input, COMPONENT).to_string()
}
