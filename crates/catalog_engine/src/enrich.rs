//! Genre filtering by per-record detail lookup.
//!
//! Search replies do not carry genre, so each record on a page is looked up
//! individually. Lookups run concurrently and fail independently: a record
//! whose lookup fails is dropped from the page instead of failing the page.
//! Every drop is logged and reported in [`Enrichment::lost`].

use std::time::Duration;

use catalog_core::{Page, RecordDetail, ResultRecord};
use engine_logging::{engine_debug, engine_warn};
use futures_util::stream::{self, StreamExt};

use crate::{FailureKind, FetchError, SearchApi};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LostRecord {
    pub id: String,
    pub error: FetchError,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enrichment {
    pub page: Page,
    pub lost: Vec<LostRecord>,
}

#[derive(Debug, Clone, Copy)]
pub struct GenreEnricher {
    max_concurrent: usize,
    lookup_timeout: Duration,
}

impl GenreEnricher {
    pub fn new(max_concurrent: usize, lookup_timeout: Duration) -> Self {
        Self {
            max_concurrent: max_concurrent.max(1),
            lookup_timeout,
        }
    }

    /// Keeps the records whose genre contains `genre`, case-insensitively.
    ///
    /// The returned page's `total_available` is the post-filter count; its
    /// upstream numbers are left untouched.
    pub async fn filter(&self, api: &dyn SearchApi, page: Page, genre: &str) -> Enrichment {
        let lookup_timeout = self.lookup_timeout;
        let outcomes: Vec<(ResultRecord, Result<RecordDetail, FetchError>)> =
            stream::iter(page.records.iter().cloned())
                .map(|record| async move {
                    let result = tokio::time::timeout(lookup_timeout, api.detail(&record.id))
                        .await
                        .unwrap_or_else(|_| {
                            Err(FetchError::new(
                                FailureKind::Timeout,
                                format!("detail lookup exceeded {lookup_timeout:?}"),
                            ))
                        });
                    (record, result)
                })
                .buffered(self.max_concurrent)
                .collect()
                .await;

        let mut kept = Vec::new();
        let mut lost = Vec::new();
        for (record, result) in outcomes {
            match result {
                Ok(detail) if detail.matches_genre(genre) => kept.push(record),
                Ok(_) => {}
                Err(error) => {
                    engine_warn!(
                        "Partial enrichment loss: dropped {} from page {} ({})",
                        record.id,
                        page.page_number,
                        error
                    );
                    lost.push(LostRecord {
                        id: record.id,
                        error,
                    });
                }
            }
        }

        engine_debug!(
            "Genre {:?} kept {} of {} records on page {} (lost {})",
            genre,
            kept.len(),
            page.records.len(),
            page.page_number,
            lost.len()
        );
        Enrichment {
            page: page.filtered(kept),
            lost,
        }
    }
}
