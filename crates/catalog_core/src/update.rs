use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged { text, at } => {
            state.record_input(text, at);
            Vec::new()
        }
        Msg::InputSubmitted => {
            let text = state.force_commit_input();
            let query = state.base_query().with_text(text);
            state.submit_query(query)
        }
        Msg::Tick { now } => match state.poll_input(now) {
            Some(text) => {
                let query = state.base_query().with_text(text);
                state.submit_query(query)
            }
            None => Vec::new(),
        },
        Msg::QuerySubmitted(query) => state.submit_query(query),
        Msg::KindSelected(kind) => {
            let query = state.base_query().with_kind(kind);
            state.submit_query(query)
        }
        Msg::YearSelected(year) => {
            let query = state.base_query().with_year(year);
            state.submit_query(query)
        }
        Msg::GenreSelected(genre) => {
            let query = state.base_query().with_genre(genre);
            state.submit_query(query)
        }
        Msg::FiltersCleared => {
            let query = state.base_query().without_filters();
            state.submit_query(query)
        }
        Msg::NearEnd => state.request_next_page(),
        Msg::RetryClicked => state.retry(),
        Msg::PageLoaded { request_id, result } => state.apply_page(request_id, result),
        Msg::RecordOpened { id } => state.open_record(id),
        Msg::DetailLoaded { request_id, result } => {
            state.apply_detail(request_id, result);
            Vec::new()
        }
        Msg::DetailClosed => {
            state.close_detail();
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
