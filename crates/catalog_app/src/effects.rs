use std::sync::{mpsc, Arc};

use catalog_core::{Effect, ErrorReason, Msg};
use catalog_engine::{EngineError, EngineEvent, EngineHandle, EventSink, FetchSettings};
use engine_logging::engine_info;

use crate::AppEvent;

/// Forwards engine completions into the application inbox as core messages.
struct InboxSink {
    tx: mpsc::Sender<AppEvent>,
}

impl EventSink for InboxSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(AppEvent::Msg(map_event(event)));
    }
}

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(settings: FetchSettings, tx: mpsc::Sender<AppEvent>) -> Result<Self, EngineError> {
        let engine = EngineHandle::from_settings(settings, Arc::new(InboxSink { tx }))?;
        Ok(Self { engine })
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchPage {
                    request_id,
                    query,
                    page,
                } => {
                    engine_info!(
                        "FetchPage request_id={} page={} term={:?}",
                        request_id,
                        page,
                        query.search_term()
                    );
                    self.engine.fetch_page(request_id, query, page);
                }
                Effect::FetchDetail { request_id, id } => {
                    engine_info!("FetchDetail request_id={} id={}", request_id, id);
                    self.engine.fetch_detail(request_id, id);
                }
            }
        }
    }
}

pub fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::PageFetched { request_id, result } => Msg::PageLoaded {
            request_id,
            result: result.map_err(ErrorReason::from),
        },
        EngineEvent::DetailFetched { request_id, result } => Msg::DetailLoaded {
            request_id,
            result: result.map_err(ErrorReason::from),
        },
    }
}
