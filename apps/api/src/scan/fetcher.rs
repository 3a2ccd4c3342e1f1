//! Page acquisition over HTTP.

use url::Url;

use crate::errors::AppError;

/// Desktop browser User-Agent. Job boards serve stripped or blocked pages to
/// obvious bots.
pub const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Fetches a posting page as text. Only http(s) URLs are fetchable;
/// browser-internal schemes are refused up front, the same way the popup
/// refuses to scan them.
pub async fn fetch_page(client: &reqwest::Client, url: &str) -> Result<String, AppError> {
    let parsed =
        Url::parse(url).map_err(|e| AppError::Validation(format!("invalid url '{url}': {e}")))?;

    let scheme = parsed.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(AppError::Validation(format!(
            "cannot scan {scheme}:// pages; provide the page HTML instead"
        )));
    }

    let response = client
        .get(parsed)
        .send()
        .await
        .map_err(|e| AppError::Fetch(format!("could not fetch {url}: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(AppError::Fetch(format!("{url} returned HTTP {status}")));
    }

    response
        .text()
        .await
        .map_err(|e| AppError::Fetch(format!("could not read response body from {url}: {e}")))
}
