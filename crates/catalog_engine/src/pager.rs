use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use catalog_core::{Page, Query, RecordDetail};

use crate::{FailureKind, FetchError, FetchSettings, GenreEnricher, SearchApi};

/// Fetches one logical page for a query, applying the genre filter when set.
///
/// Calling twice with the same arguments requests the same page; the only
/// side effect is the upstream traffic.
#[derive(Clone)]
pub struct PageFetcher {
    api: Arc<dyn SearchApi>,
    enricher: GenreEnricher,
    request_timeout: Duration,
}

impl PageFetcher {
    pub fn new(api: Arc<dyn SearchApi>, settings: &FetchSettings) -> Self {
        Self {
            api,
            enricher: GenreEnricher::new(settings.max_concurrent_lookups, settings.request_timeout),
            request_timeout: settings.request_timeout,
        }
    }

    pub async fn fetch(&self, query: &Query, page: u32) -> Result<Page, FetchError> {
        let fetched = bounded(self.request_timeout, self.api.search(query, page)).await?;
        match query.genre() {
            Some(genre) if !fetched.records.is_empty() => {
                let enrichment = self.enricher.filter(self.api.as_ref(), fetched, genre).await;
                Ok(enrichment.page)
            }
            _ => Ok(fetched),
        }
    }

    pub async fn detail(&self, id: &str) -> Result<RecordDetail, FetchError> {
        bounded(self.request_timeout, self.api.detail(id)).await
    }
}

/// Applies the per-request bound regardless of what the transport enforces.
async fn bounded<T>(
    limit: Duration,
    call: impl Future<Output = Result<T, FetchError>>,
) -> Result<T, FetchError> {
    tokio::time::timeout(limit, call).await.unwrap_or_else(|_| {
        Err(FetchError::new(
            FailureKind::Timeout,
            format!("request exceeded {limit:?}"),
        ))
    })
}
