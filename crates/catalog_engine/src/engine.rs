use std::sync::{mpsc, Arc};
use std::thread;

use catalog_core::{Query, RequestId};
use engine_logging::{engine_debug, engine_warn};

use crate::{EngineError, EngineEvent, FetchSettings, OmdbClient, PageFetcher};

enum EngineCommand {
    FetchPage {
        request_id: RequestId,
        query: Query,
        page: u32,
    },
    FetchDetail {
        request_id: RequestId,
        id: String,
    },
}

/// Receiver of engine completions.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

/// Runs fetches on a background runtime and reports each completion to the sink.
///
/// Completions arrive in network order, not issue order; every event echoes
/// the request id it was issued with so the caller can drop stale ones.
/// Dropping the handle stops the background thread once in-flight work ends.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn from_settings(
        settings: FetchSettings,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self, EngineError> {
        let client = OmdbClient::new(settings.clone())?;
        let fetcher = PageFetcher::new(Arc::new(client), &settings);
        Ok(Self::new(fetcher, sink)?)
    }

    pub fn new(fetcher: PageFetcher, sink: Arc<dyn EventSink>) -> std::io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()?;
        let (cmd_tx, cmd_rx) = mpsc::channel();

        thread::Builder::new()
            .name("catalog-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let fetcher = fetcher.clone();
                    let sink = sink.clone();
                    runtime.spawn(async move {
                        handle_command(&fetcher, command, sink.as_ref()).await;
                    });
                }
                engine_debug!("Engine command channel closed");
            })?;

        Ok(Self { cmd_tx })
    }

    pub fn fetch_page(&self, request_id: RequestId, query: Query, page: u32) {
        self.send(EngineCommand::FetchPage {
            request_id,
            query,
            page,
        });
    }

    pub fn fetch_detail(&self, request_id: RequestId, id: impl Into<String>) {
        self.send(EngineCommand::FetchDetail {
            request_id,
            id: id.into(),
        });
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            engine_warn!("Engine thread is gone; command dropped");
        }
    }
}

async fn handle_command(fetcher: &PageFetcher, command: EngineCommand, sink: &dyn EventSink) {
    match command {
        EngineCommand::FetchPage {
            request_id,
            query,
            page,
        } => {
            let result = fetcher.fetch(&query, page).await;
            if let Err(err) = &result {
                engine_warn!("Page request {} (page {}) failed: {}", request_id, page, err);
            }
            sink.emit(EngineEvent::PageFetched { request_id, result });
        }
        EngineCommand::FetchDetail { request_id, id } => {
            let result = fetcher.detail(&id).await;
            if let Err(err) = &result {
                engine_warn!("Detail request {} for {} failed: {}", request_id, id, err);
            }
            sink.emit(EngineEvent::DetailFetched { request_id, result });
        }
    }
}
