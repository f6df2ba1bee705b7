//! Plain-text rendering of engine snapshots.

use catalog_core::{AppViewModel, DetailState, LoadState, Poster, ResultRecord};

/// Prints only what changed: records are appended as they arrive and the
/// list is reprinted from the top after a reset.
#[derive(Debug, Default)]
pub struct Renderer {
    shown: Vec<String>,
    last_status: Option<String>,
    last_detail: Option<DetailState>,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, view: &AppViewModel) -> Vec<String> {
        let mut lines = Vec::new();

        let still_prefix = self.shown.len() <= view.records.len()
            && self
                .shown
                .iter()
                .zip(&view.records)
                .all(|(shown, record)| *shown == record.id);
        if !still_prefix {
            self.shown.clear();
        }
        for (index, record) in view.records.iter().enumerate().skip(self.shown.len()) {
            lines.push(format_record(index + 1, record));
            self.shown.push(record.id.clone());
        }

        let status = status_line(view);
        if self.last_status.as_ref() != Some(&status) {
            lines.push(status.clone());
            self.last_status = Some(status);
        }

        if self.last_detail.as_ref() != Some(&view.detail) {
            lines.extend(detail_lines(&view.detail));
            self.last_detail = Some(view.detail.clone());
        }
        lines
    }
}

fn format_record(position: usize, record: &ResultRecord) -> String {
    let poster = match &record.poster {
        Poster::Url(_) => "",
        Poster::Unavailable => " [no poster]",
    };
    format!(
        "{position:>4}. {} ({}) {} {}{poster}",
        record.title, record.year, record.kind, record.id
    )
}

fn status_line(view: &AppViewModel) -> String {
    match &view.load_state {
        LoadState::Idle => "-- ready".to_string(),
        _ if view.is_searching() => {
            let term = view
                .query
                .as_ref()
                .filter(|query| !query.is_baseline())
                .map(|query| format!(" for \"{}\"", query.text().trim()))
                .unwrap_or_else(|| " popular movies".to_string());
            format!("-- searching{term}...")
        }
        LoadState::LoadingFirstPage | LoadState::LoadingNextPage => format!(
            "-- loading more... ({} of {} loaded)",
            view.records.len(),
            view.total_available
        ),
        LoadState::IdleWithData if view.records.is_empty() => format!(
            "-- no matches in the first {} pages (/more to keep looking)",
            view.page
        ),
        LoadState::IdleWithData => format!(
            "-- {} (/more for page {})",
            view.results_caption().unwrap_or_default(),
            view.page + 1
        ),
        LoadState::Exhausted if view.records.is_empty() => {
            "-- no matches; try adjusting your search or filters".to_string()
        }
        LoadState::Exhausted => format!(
            "-- {} (all {} loaded)",
            view.results_caption().unwrap_or_default(),
            view.records.len()
        ),
        LoadState::Error(reason) if reason.is_retryable() => {
            format!("-- {} (/retry)", reason.user_message())
        }
        LoadState::Error(reason) => format!("-- {}", reason.user_message()),
    }
}

fn detail_lines(detail: &DetailState) -> Vec<String> {
    match detail {
        DetailState::Closed => Vec::new(),
        DetailState::Loading { id } => vec![format!("== loading {id}...")],
        DetailState::Failed { id, reason } => {
            vec![format!("== {id}: {}", reason.user_message())]
        }
        DetailState::Loaded(detail) => {
            let mut lines = vec![format!(
                "== {} ({}) {} [{}]",
                detail.title, detail.year, detail.kind, detail.genre
            )];
            let fields = [
                ("runtime", &detail.runtime),
                ("released", &detail.released),
                ("director", &detail.director),
                ("actors", &detail.actors),
                ("rating", &detail.rating),
                ("plot", &detail.plot),
            ];
            for (label, value) in fields {
                if let Some(value) = value {
                    lines.push(format!("   {label}: {value}"));
                }
            }
            lines
        }
    }
}
