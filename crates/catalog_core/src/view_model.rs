use crate::{DetailState, KindFilter, LoadState, Query, ResultRecord};

/// Earliest year offered by [`year_options`].
pub const FIRST_YEAR_OPTION: i32 = 2000;

/// Read-only, point-in-time snapshot of the engine for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub input: String,
    pub query: Option<Query>,
    pub records: Vec<ResultRecord>,
    pub load_state: LoadState,
    pub has_more: bool,
    pub total_available: u32,
    pub page: u32,
    pub detail: DetailState,
    pub dirty: bool,
}

impl AppViewModel {
    /// One-line summary of what is listed, or `None` when nothing is shown.
    pub fn results_caption(&self) -> Option<String> {
        if matches!(self.load_state, LoadState::Error(_)) || self.records.is_empty() {
            return None;
        }
        let query = self.query.clone().unwrap_or_default();
        let total = group_thousands(self.total_available);
        let year_suffix = query
            .year()
            .map(|year| format!(" from {year}"))
            .unwrap_or_default();

        if !query.is_baseline() {
            let noun = match query.kind() {
                KindFilter::Any => "results",
                KindFilter::Movie => "movies",
                KindFilter::Series => "tv series",
            };
            return Some(format!(
                "Found {total} {noun} for \"{}\"{year_suffix}",
                query.text().trim()
            ));
        }

        match (query.kind(), query.year()) {
            (KindFilter::Any, None) => Some(format!("Showing popular movies ({total} available)")),
            (kind, _) => {
                let noun = if kind == KindFilter::Series {
                    "tv series"
                } else {
                    "movies"
                };
                Some(format!("Showing {noun}{year_suffix} ({total} available)"))
            }
        }
    }

    /// True while the first page of the current query is loading.
    pub fn is_searching(&self) -> bool {
        self.load_state == LoadState::LoadingFirstPage
    }
}

/// Year filter choices, newest first, from `current_year` back to [`FIRST_YEAR_OPTION`].
pub fn year_options(current_year: i32) -> Vec<i32> {
    (FIRST_YEAR_OPTION..=current_year).rev().collect()
}

fn group_thousands(value: u32) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
