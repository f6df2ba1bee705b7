use std::time::Instant;

use crate::{ErrorReason, KindFilter, Page, Query, RecordDetail, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the search box; commits after the quiet period.
    InputChanged { text: String, at: Instant },
    /// User explicitly submitted the search box, bypassing the quiet period.
    InputSubmitted,
    /// Timer tick; commits pending input whose quiet period has elapsed.
    Tick { now: Instant },
    /// A complete query from outside the search box (restored session, deep link).
    QuerySubmitted(Query),
    KindSelected(KindFilter),
    YearSelected(Option<String>),
    GenreSelected(Option<String>),
    /// Clears kind, year and genre, keeping the text.
    FiltersCleared,
    /// Scroll sentinel: the last rendered item entered the viewport.
    NearEnd,
    /// User asked to retry after an error.
    RetryClicked,
    /// Engine completion for a page request.
    PageLoaded {
        request_id: RequestId,
        result: Result<Page, ErrorReason>,
    },
    /// User opened a record's detail view.
    RecordOpened { id: String },
    /// Engine completion for a detail request.
    DetailLoaded {
        request_id: RequestId,
        result: Result<RecordDetail, ErrorReason>,
    },
    DetailClosed,
    /// Fallback for placeholder wiring.
    NoOp,
}
