use crate::domain::error::FolpError;
use crate::domain::model::WolframResult;
use crate::infrastructure::network::wolfram::WolframKind;
use crate::state::AppState;

/// Answer a Wolfram|Alpha query of flavour `kind`.
///
/// The credential is checked before the flavour, and both before any network
/// call. Results are never cached.
pub async fn query(state: &AppState, kind: &str, q: &str) -> Result<WolframResult, FolpError> {
    let appid = state
        .config
        .credentials
        .wolfram_appid
        .as_deref()
        .filter(|id| !id.is_empty())
        .ok_or_else(|| FolpError::Config("WOLFRAM_APPID missing".to_string()))?;

    let kind: WolframKind = kind.parse()?;
    let url = kind.url(&state.config.upstream, appid, q);

    if kind.is_image() {
        return Ok(WolframResult::Image { url });
    }

    tracing::debug!(%kind, "querying wolfram");
    // Non-success replies fail the request, including the 501 Wolfram sends
    // for input it cannot interpret
    let result = state
        .upstream
        .fetch_text(&url)
        .await
        .map_err(|e| {
            tracing::warn!(%kind, error = %e, "wolfram request failed");
            FolpError::upstream_failed("Wolfram", e)
        })?;
    Ok(WolframResult::Text { result })
}
