//! Upstream wire format.
//!
//! Replies carry `Response: "True" | "False"`; numbers arrive as strings and
//! missing values as `"N/A"`.

use catalog_core::{Page, Poster, RecordDetail, ResultRecord};
use serde::Deserialize;

use crate::{FailureKind, FetchError};

#[derive(Debug, Deserialize)]
pub(crate) struct SearchReply {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Search", default)]
    search: Vec<SearchItem>,
    #[serde(rename = "totalResults")]
    total_results: Option<String>,
    #[serde(rename = "Error")]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    #[serde(rename = "imdbID")]
    id: String,
    #[serde(rename = "Title", default)]
    title: String,
    #[serde(rename = "Year", default)]
    year: String,
    #[serde(rename = "Type", default)]
    kind: String,
    #[serde(rename = "Poster", default)]
    poster: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DetailReply {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Error")]
    error: Option<String>,
    #[serde(rename = "imdbID", default)]
    id: String,
    #[serde(rename = "Title", default)]
    title: String,
    #[serde(rename = "Year", default)]
    year: String,
    #[serde(rename = "Type", default)]
    kind: String,
    #[serde(rename = "Genre", default)]
    genre: String,
    #[serde(rename = "Runtime")]
    runtime: Option<String>,
    #[serde(rename = "Released")]
    released: Option<String>,
    #[serde(rename = "Director")]
    director: Option<String>,
    #[serde(rename = "Actors")]
    actors: Option<String>,
    #[serde(rename = "Plot")]
    plot: Option<String>,
    #[serde(rename = "imdbRating")]
    rating: Option<String>,
    #[serde(rename = "Poster", default)]
    poster: String,
}

/// Upstream phrasing for "the search matched nothing", e.g. `Movie not found!`.
pub(crate) fn is_not_found(message: &str) -> bool {
    message.to_ascii_lowercase().contains("not found")
}

pub(crate) fn search_page(page_number: u32, reply: SearchReply) -> Result<Page, FetchError> {
    if !reply.response.eq_ignore_ascii_case("true") {
        let message = reply.error.unwrap_or_default();
        if is_not_found(&message) {
            return Ok(Page::empty(page_number));
        }
        return Err(FetchError::new(FailureKind::Upstream, message));
    }

    let records: Vec<ResultRecord> = reply
        .search
        .into_iter()
        .map(|item| ResultRecord {
            id: item.id,
            title: item.title,
            year: item.year,
            poster: Poster::from_upstream(&item.poster),
            kind: item.kind,
        })
        .collect();

    let total = match reply.total_results.as_deref().map(str::trim) {
        Some(raw) => raw.parse::<u32>().map_err(|err| {
            FetchError::new(FailureKind::Decode, format!("totalResults {raw:?}: {err}"))
        })?,
        None => u32::try_from(records.len()).unwrap_or(u32::MAX),
    };

    Ok(Page::new(page_number, records, total))
}

pub(crate) fn record_detail(reply: DetailReply) -> Result<RecordDetail, FetchError> {
    if !reply.response.eq_ignore_ascii_case("true") {
        return Err(FetchError::new(
            FailureKind::Upstream,
            reply.error.unwrap_or_default(),
        ));
    }
    Ok(RecordDetail {
        id: reply.id,
        title: reply.title,
        year: reply.year,
        kind: reply.kind,
        genre: reply.genre,
        runtime: present(reply.runtime),
        released: present(reply.released),
        director: present(reply.director),
        actors: present(reply.actors),
        plot: present(reply.plot),
        rating: present(reply.rating),
        poster: Poster::from_upstream(&reply.poster),
    })
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty() && !v.trim().eq_ignore_ascii_case("N/A"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn search(json: &str) -> Result<Page, FetchError> {
        search_page(1, serde_json::from_str(json).expect("valid json"))
    }

    #[test]
    fn decodes_search_page() {
        let page = search(
            r#"{"Search":[{"Title":"Batman Begins","Year":"2005","imdbID":"tt0372784","Type":"movie","Poster":"N/A"}],"totalResults":"45","Response":"True"}"#,
        )
        .unwrap();
        assert_eq!(page.total_available, 45);
        assert_eq!(page.records[0].id, "tt0372784");
        assert_eq!(page.records[0].poster, Poster::Unavailable);
    }

    #[test]
    fn not_found_is_an_empty_page() {
        let page = search(r#"{"Response":"False","Error":"Movie not found!"}"#).unwrap();
        assert_eq!(page, Page::empty(1));
    }

    #[test]
    fn other_domain_errors_fail() {
        let err = search(r#"{"Response":"False","Error":"Too many results."}"#).unwrap_err();
        assert_eq!(err.kind, FailureKind::Upstream);
        assert_eq!(err.message, "Too many results.");
    }

    #[test]
    fn bad_total_is_a_decode_error() {
        let err = search(r#"{"Search":[],"totalResults":"lots","Response":"True"}"#).unwrap_err();
        assert_eq!(err.kind, FailureKind::Decode);
    }

    #[test]
    fn detail_drops_placeholder_values() {
        let reply: DetailReply = serde_json::from_str(
            r#"{"Title":"Heat","Year":"1995","Genre":"Action, Crime","Director":"N/A","imdbRating":"8.3","imdbID":"tt0113277","Type":"movie","Response":"True"}"#,
        )
        .unwrap();
        let detail = record_detail(reply).unwrap();
        assert_eq!(detail.director, None);
        assert_eq!(detail.rating.as_deref(), Some("8.3"));
        assert!(detail.matches_genre("crime"));
    }
}
