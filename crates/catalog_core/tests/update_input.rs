use std::sync::Once;
use std::time::{Duration, Instant};

use catalog_core::{
    update, AppState, DetailState, Effect, ErrorReason, KindFilter, LoadState, Msg, Page, Poster,
    Query, RecordDetail, ResultRecord,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

fn fetched_queries(effects: &[Effect]) -> Vec<Query> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::FetchPage { query, .. } => Some(query.clone()),
            Effect::FetchDetail { .. } => None,
        })
        .collect()
}

fn type_text(state: AppState, t0: Instant, keys: &[(u64, &str)]) -> AppState {
    keys.iter().fold(state, |state, (offset, text)| {
        let (state, effects) = update(
            state,
            Msg::InputChanged {
                text: text.to_string(),
                at: t0 + ms(*offset),
            },
        );
        assert!(effects.is_empty());
        state
    })
}

#[test]
fn keystroke_burst_commits_once_after_quiet_period() {
    init_logging();
    let t0 = Instant::now();
    let state = type_text(
        AppState::new(),
        t0,
        &[(0, "b"), (100, "ba"), (200, "bat"), (250, "batm")],
    );
    assert_eq!(state.input_deadline(), Some(t0 + ms(650)));

    let mut state = state;
    let mut commits = Vec::new();
    for step in (250..=1200).step_by(50) {
        let (next, effects) = update(state, Msg::Tick { now: t0 + ms(step) });
        for query in fetched_queries(&effects) {
            commits.push((step, query));
        }
        state = next;
    }

    assert_eq!(commits, vec![(650, Query::new("batm"))]);
}

#[test]
fn explicit_submit_commits_immediately_and_cancels_pending() {
    init_logging();
    let t0 = Instant::now();
    let state = type_text(AppState::new(), t0, &[(0, "dune")]);

    let (state, effects) = update(state, Msg::InputSubmitted);
    assert_eq!(fetched_queries(&effects), vec![Query::new("dune")]);
    assert_eq!(state.input_deadline(), None);

    let (_, effects) = update(state, Msg::Tick { now: t0 + ms(1_000) });
    assert!(effects.is_empty());
}

#[test]
fn filter_edits_build_on_committed_text() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::QuerySubmitted(Query::new("batman")));

    let (state, effects) = update(state, Msg::KindSelected(KindFilter::Movie));
    assert_eq!(
        fetched_queries(&effects),
        vec![Query::new("batman").with_kind(KindFilter::Movie)]
    );

    let (state, effects) = update(state, Msg::YearSelected(Some("2008".into())));
    let expected = Query::new("batman")
        .with_kind(KindFilter::Movie)
        .with_year(Some("2008".into()));
    assert_eq!(fetched_queries(&effects), vec![expected.clone()]);

    let (state, effects) = update(state, Msg::YearSelected(Some("2008".into())));
    assert!(effects.is_empty());

    let (state, effects) = update(state, Msg::FiltersCleared);
    assert_eq!(fetched_queries(&effects), vec![Query::new("batman")]);
    assert_eq!(state.query(), Some(&Query::new("batman")));
}

#[test]
fn blank_first_query_requests_baseline_listing() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::QuerySubmitted(Query::default()));
    let queries = fetched_queries(&effects);

    assert_eq!(queries.len(), 1);
    assert!(queries[0].is_baseline());
    assert_eq!(queries[0].search_term(), "movie");
    assert_eq!(state.view().load_state, LoadState::LoadingFirstPage);
}

fn genre_record(id: &str) -> ResultRecord {
    ResultRecord {
        id: id.to_string(),
        title: id.to_uppercase(),
        year: "1999".to_string(),
        poster: Poster::Unavailable,
        kind: "movie".to_string(),
    }
}

#[test]
fn genre_filtered_empty_page_scans_ahead() {
    init_logging();
    let query = Query::new("drama").with_genre(Some("horror".into()));
    let (state, effects) = update(AppState::new(), Msg::QuerySubmitted(query));
    let request_id = match effects.as_slice() {
        [Effect::FetchPage { request_id, .. }] => *request_id,
        other => panic!("unexpected effects {other:?}"),
    };

    // Ten raw records, none of which survived the genre filter.
    let raw = Page::new(1, (0..10).map(|n| genre_record(&format!("a{n}"))).collect(), 30);
    let (state, effects) = update(
        state,
        Msg::PageLoaded {
            request_id,
            result: Ok(raw.filtered(Vec::new())),
        },
    );
    let request_id = match effects.as_slice() {
        [Effect::FetchPage {
            request_id, page, ..
        }] => {
            assert_eq!(*page, 2);
            *request_id
        }
        other => panic!("expected automatic scan, got {other:?}"),
    };
    assert_eq!(state.view().load_state, LoadState::LoadingNextPage);

    let raw = Page::new(2, (0..10).map(|n| genre_record(&format!("b{n}"))).collect(), 30);
    let kept = vec![genre_record("b3")];
    let (state, effects) = update(
        state,
        Msg::PageLoaded {
            request_id,
            result: Ok(raw.filtered(kept)),
        },
    );
    let view = state.view();
    assert!(effects.is_empty());
    assert_eq!(view.records.len(), 1);
    assert_eq!(view.total_available, 1);
    assert!(view.has_more);
    assert_eq!(view.load_state, LoadState::IdleWithData);
}

#[test]
fn genre_scan_ahead_pauses_after_limit_until_sentinel() {
    init_logging();
    let query = Query::new("movie").with_genre(Some("western".into()));
    let state = AppState::new().with_scan_ahead_limit(2);
    let (mut state, effects) = update(state, Msg::QuerySubmitted(query));
    let mut next_fetch = effects;

    // Every page comes back empty after filtering; only two are fetched unasked.
    for page_number in 1..=3u32 {
        let request_id = match next_fetch.as_slice() {
            [Effect::FetchPage {
                request_id, page, ..
            }] => {
                assert_eq!(*page, page_number);
                *request_id
            }
            other => panic!("expected fetch of page {page_number}, got {other:?}"),
        };
        let raw = Page::new(
            page_number,
            (0..10)
                .map(|n| genre_record(&format!("p{page_number}-{n}")))
                .collect(),
            500,
        );
        let (next, effects) = update(
            state,
            Msg::PageLoaded {
                request_id,
                result: Ok(raw.filtered(Vec::new())),
            },
        );
        state = next;
        next_fetch = effects;
    }

    assert!(next_fetch.is_empty());
    let view = state.view();
    assert_eq!(view.load_state, LoadState::IdleWithData);
    assert!(view.has_more);
    assert!(view.records.is_empty());

    let (_, effects) = update(state, Msg::NearEnd);
    match effects.as_slice() {
        [Effect::FetchPage { page, .. }] => assert_eq!(*page, 4),
        other => panic!("expected sentinel to resume scan, got {other:?}"),
    }
}

fn detail(id: &str) -> RecordDetail {
    RecordDetail {
        id: id.to_string(),
        title: "Heat".to_string(),
        year: "1995".to_string(),
        kind: "movie".to_string(),
        genre: "Action, Crime, Drama".to_string(),
        runtime: Some("170 min".to_string()),
        released: None,
        director: Some("Michael Mann".to_string()),
        actors: None,
        plot: None,
        rating: Some("8.3".to_string()),
        poster: Poster::Unavailable,
    }
}

#[test]
fn detail_lookup_round_trip_and_staleness() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::RecordOpened { id: "tt1".into() });
    let first = match effects.as_slice() {
        [Effect::FetchDetail { request_id, id }] => {
            assert_eq!(id, "tt1");
            *request_id
        }
        other => panic!("unexpected effects {other:?}"),
    };
    let (state, effects) = update(state, Msg::RecordOpened { id: "tt2".into() });
    let second = match effects.as_slice() {
        [Effect::FetchDetail { request_id, .. }] => *request_id,
        other => panic!("unexpected effects {other:?}"),
    };

    let (state, _) = update(
        state,
        Msg::DetailLoaded {
            request_id: first,
            result: Ok(detail("tt1")),
        },
    );
    assert_eq!(state.view().detail, DetailState::Loading { id: "tt2".into() });

    let (state, _) = update(
        state,
        Msg::DetailLoaded {
            request_id: second,
            result: Err(ErrorReason::transport("reset")),
        },
    );
    assert!(matches!(state.view().detail, DetailState::Failed { ref id, .. } if id == "tt2"));

    let (state, _) = update(state, Msg::DetailClosed);
    assert_eq!(state.view().detail, DetailState::Closed);
}

#[test]
fn empty_identifier_fails_without_request() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::RecordOpened { id: "  ".into() });
    assert!(effects.is_empty());
    assert!(matches!(state.view().detail, DetailState::Failed { .. }));
}

#[test]
fn update_is_noop() {
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::NoOp);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}
