//! HTTP access to the search endpoint.
//!
//! [`ResultSource`] is the seam between the session and the network; the
//! session only ever sees [`FetchOutcome`]s coming back over a channel.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use url::Url;

use crate::config::SearchConfig;

use super::collection::FetchRequest;
use super::error::{Result, SearchError};
use super::models::ResultPage;

/// Something that can answer a page request.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResultSource: Send + Sync {
    async fn fetch_page(&self, request: &FetchRequest) -> Result<ResultPage>;
}

/// A finished request, successful or not, tagged with the request itself so
/// the session can tell whether it is still current.
#[derive(Debug)]
pub struct FetchOutcome {
    pub request: FetchRequest,
    pub result: Result<ResultPage>,
}

/// Run `request` on a background task and deliver the outcome on `tx`.
///
/// There is no abort: a superseded request still completes and is dropped by
/// the collection as stale.
pub fn spawn_fetch<T>(
    source: Arc<dyn ResultSource>,
    request: FetchRequest,
    tx: mpsc::UnboundedSender<T>,
) -> JoinHandle<()>
where
    T: From<FetchOutcome> + Send + 'static,
{
    tokio::spawn(async move {
        let result = source.fetch_page(&request).await;
        if let Err(e) = &result {
            log::warn!("Fetch for generation {} failed: {e}", request.generation());
        }
        if tx.send(FetchOutcome { request, result }.into()).is_err() {
            log::debug!("Fetch outcome dropped: receiver closed");
        }
    })
}

// ============================================================================
// HTTP implementation
// ============================================================================

pub struct HttpResultSource {
    endpoint: Url,
    http_client: reqwest::Client,
}

impl HttpResultSource {
    /// `results_path` is resolved against `base_url` (an absolute path
    /// replaces any path on the base).
    pub fn new(base_url: &str, results_path: &str, timeout: Duration) -> Result<Self> {
        let endpoint = Url::parse(base_url)?.join(results_path)?;
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            endpoint,
            http_client,
        })
    }

    pub fn from_config(config: &SearchConfig) -> Result<Self> {
        Self::new(
            &config.base_url,
            &config.results_path,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl ResultSource for HttpResultSource {
    async fn fetch_page(&self, request: &FetchRequest) -> Result<ResultPage> {
        let url = request.url(&self.endpoint);
        log::debug!("GET {url}");

        let response = self.http_client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SearchError::api(status.as_u16(), message));
        }

        let body = response.text().await?;
        let page: ResultPage = serde_json::from_str(&body)?;
        log::debug!(
            "Received {} cocktail(s), index_updated={:?}",
            page.cocktails.len(),
            page.index_updated
        );
        Ok(page)
    }
}
