use std::time::Duration;

use catalog_core::{Page, Query, RecordDetail};
use engine_logging::{engine_debug, engine_warn};
use serde::de::DeserializeOwned;
use url::Url;

use crate::decode::{self, DetailReply, SearchReply};
use crate::{FailureKind, FetchError};

pub const DEFAULT_BASE_URL: &str = "https://www.omdbapi.com/";

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub base_url: String,
    pub api_key: String,
    pub connect_timeout: Duration,
    /// Upper bound for any single upstream call.
    pub request_timeout: Duration,
    /// Concurrent detail lookups allowed during genre enrichment.
    pub max_concurrent_lookups: usize,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(15),
            max_concurrent_lookups: 8,
        }
    }
}

/// The upstream catalog: paged search plus per-record detail lookup.
#[async_trait::async_trait]
pub trait SearchApi: Send + Sync {
    async fn search(&self, query: &Query, page: u32) -> Result<Page, FetchError>;

    async fn detail(&self, id: &str) -> Result<RecordDetail, FetchError>;
}

/// [`SearchApi`] over HTTP against an OMDb-compatible endpoint.
#[derive(Debug, Clone)]
pub struct OmdbClient {
    settings: FetchSettings,
    endpoint: Url,
    client: reqwest::Client,
}

impl OmdbClient {
    pub fn new(settings: FetchSettings) -> Result<Self, FetchError> {
        let endpoint = Url::parse(&settings.base_url)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self {
            settings,
            endpoint,
            client,
        })
    }

    pub fn settings(&self) -> &FetchSettings {
        &self.settings
    }

    fn request_url(&self, params: &[(&str, &str)]) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("apikey", &self.settings.api_key);
            for (key, value) in params {
                pairs.append_pair(key, value);
            }
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let body = response.bytes().await.map_err(map_reqwest_error)?;
        serde_json::from_slice(&body)
            .map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))
    }
}

#[async_trait::async_trait]
impl SearchApi for OmdbClient {
    async fn search(&self, query: &Query, page: u32) -> Result<Page, FetchError> {
        let page_param = page.to_string();
        let mut params = vec![("s", query.search_term()), ("page", page_param.as_str())];
        if let Some(kind) = query.kind().as_param() {
            params.push(("type", kind));
        }
        if let Some(year) = query.year() {
            params.push(("y", year));
        }

        engine_debug!("Search term={:?} page={}", query.search_term(), page);
        let reply: SearchReply = self.get_json(self.request_url(&params)).await?;
        decode::search_page(page, reply)
    }

    async fn detail(&self, id: &str) -> Result<RecordDetail, FetchError> {
        let id = id.trim();
        if id.is_empty() {
            engine_warn!("Rejected detail lookup with empty identifier");
            return Err(FetchError::new(
                FailureKind::InvalidIdentifier,
                "Invalid identifier",
            ));
        }

        let reply: DetailReply = self
            .get_json(self.request_url(&[("i", id), ("plot", "full")]))
            .await?;
        decode::record_detail(reply)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return FetchError::new(FailureKind::Decode, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
