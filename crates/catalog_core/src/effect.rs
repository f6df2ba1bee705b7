use crate::{Query, RequestId};

/// Work the core asks the outside world to perform.
///
/// Every request carries the tag its completion must echo back; completions
/// whose tag is no longer current are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
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
