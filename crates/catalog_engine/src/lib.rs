//! Catalog engine: upstream search client and effect execution.
mod decode;
mod engine;
mod enrich;
mod fetch;
mod pager;
mod persist;
mod types;

pub use engine::{ChannelEventSink, EngineHandle, EventSink};
pub use enrich::{Enrichment, GenreEnricher, LostRecord};
pub use fetch::{FetchSettings, OmdbClient, SearchApi, DEFAULT_BASE_URL};
pub use pager::PageFetcher;
pub use persist::{PersistError, StateFile};
pub use types::{EngineError, EngineEvent, FailureKind, FetchError};
