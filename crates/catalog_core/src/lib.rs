//! Catalog core: pure query/pagination state machine and view-model helpers.
mod aggregate;
mod debounce;
mod effect;
mod model;
mod msg;
mod query;
mod state;
mod update;
mod view_model;

pub use aggregate::{MergeOutcome, ResultAggregator};
pub use debounce::{InputDebouncer, DEFAULT_QUIET_PERIOD};
pub use effect::Effect;
pub use model::{
    KindFilter, Page, Poster, Query, RecordDetail, RequestId, ResultRecord, DEFAULT_SEARCH_TERM,
};
pub use msg::Msg;
pub use query::{FingerprintChanged, QueryState};
pub use state::{
    AppState, DetailState, ErrorReason, FailureClass, LoadState, DEFAULT_SCAN_AHEAD_LIMIT,
};
pub use update::update;
pub use view_model::{year_options, AppViewModel, FIRST_YEAR_OPTION};
