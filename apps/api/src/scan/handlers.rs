use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use crate::errors::AppError;
use crate::scan::extractor::{self, ScannedData};
use crate::scan::fetcher::fetch_page;
use crate::state::AppState;

/// A scan needs a page. Clients either capture the live DOM and send it
/// together with its location, or send just a URL for the service to fetch.
#[derive(Debug, Deserialize)]
pub struct ScanRequest {
    pub html: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, PartialEq, Eq)]
enum PageSource {
    Supplied { html: String, url: String },
    Remote { url: String },
}

pub async fn handle_scan(
    State(state): State<AppState>,
    Json(request): Json<ScanRequest>,
) -> Result<Json<ScannedData>, AppError> {
    let data = acquire_and_scan(&state, request).await?;
    tracing::info!("Scanned {}: {} / {}", data.url, data.company_name, data.job_title);
    Ok(Json(data))
}

/// Resolves the request to page HTML, then scans it. Shared with the answer
/// pipeline, which needs the same acquisition step before generating.
pub async fn acquire_and_scan(
    state: &AppState,
    request: ScanRequest,
) -> Result<ScannedData, AppError> {
    let (html, url) = match choose_source(request)? {
        PageSource::Supplied { html, url } => (html, url),
        PageSource::Remote { url } => {
            let html = fetch_page(&state.http, &url).await?;
            (html, url)
        }
    };
    run_scan(html, url).await
}

fn choose_source(request: ScanRequest) -> Result<PageSource, AppError> {
    match (request.html, request.url) {
        (Some(html), Some(url)) => Ok(PageSource::Supplied { html, url }),
        (Some(_), None) => Err(AppError::Validation(
            "'url' is required alongside 'html'".to_string(),
        )),
        (None, Some(url)) => Ok(PageSource::Remote { url }),
        (None, None) => Err(AppError::Validation(
            "provide the page 'html' with its 'url', or a 'url' to fetch".to_string(),
        )),
    }
}

/// Runs the blocking parse and scan off the async runtime. A panic inside
/// the scan fails this request with the panic's message; the server and
/// other in-flight requests are unaffected.
async fn run_scan(html: String, url: String) -> Result<ScannedData, AppError> {
    match tokio::task::spawn_blocking(move || extractor::scan_html(&html, &url)).await {
        Ok(data) => Ok(data),
        Err(e) => match e.try_into_panic() {
            Ok(panic) => Err(AppError::Scan(crate::errors::panic_message(panic))),
            Err(e) => Err(AppError::Internal(anyhow::anyhow!("scan task failed: {e}"))),
        },
    }
}
