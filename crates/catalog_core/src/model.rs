/// Correlation tag attached to every outgoing request.
pub type RequestId = u64;

/// Search term sent upstream when the committed text is blank.
///
/// A blank query means "show baseline/popular results", never an empty search.
pub const DEFAULT_SEARCH_TERM: &str = "movie";

/// Content-kind filter for a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KindFilter {
    #[default]
    Any,
    Movie,
    Series,
}

impl KindFilter {
    /// Upstream request value, `None` for no filtering.
    pub fn as_param(self) -> Option<&'static str> {
        match self {
            KindFilter::Any => None,
            KindFilter::Movie => Some("movie"),
            KindFilter::Series => Some("series"),
        }
    }

    /// Parses user input; blank and `any`/`all` select no filter.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "" | "any" | "all" => Some(KindFilter::Any),
            "movie" | "movies" => Some(KindFilter::Movie),
            "series" | "tv" => Some(KindFilter::Series),
            _ => None,
        }
    }
}

/// A committed search: free text plus filters.
///
/// Values are immutable; the `with_*` builders produce a new value. Equality
/// over all fields is the fingerprint used to decide when results reset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Query {
    text: String,
    kind: KindFilter,
    year: Option<String>,
    genre: Option<String>,
}

impl Query {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_text(self, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..self
        }
    }

    pub fn with_kind(self, kind: KindFilter) -> Self {
        Self { kind, ..self }
    }

    /// Blank years are stored as "no year filter".
    pub fn with_year(self, year: Option<String>) -> Self {
        Self {
            year: non_blank(year),
            ..self
        }
    }

    /// Blank genres are stored as "no genre filter".
    pub fn with_genre(self, genre: Option<String>) -> Self {
        Self {
            genre: non_blank(genre),
            ..self
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> KindFilter {
        self.kind
    }

    pub fn year(&self) -> Option<&str> {
        self.year.as_deref()
    }

    pub fn genre(&self) -> Option<&str> {
        self.genre.as_deref()
    }

    /// True when the committed text is blank (baseline listing).
    pub fn is_baseline(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// The term to send upstream, substituting [`DEFAULT_SEARCH_TERM`] for blank text.
    pub fn search_term(&self) -> &str {
        let trimmed = self.text.trim();
        if trimmed.is_empty() {
            DEFAULT_SEARCH_TERM
        } else {
            trimmed
        }
    }

    /// Same query with every filter reset.
    pub fn without_filters(self) -> Self {
        Self {
            text: self.text,
            ..Self::default()
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Poster image reference; upstream uses `"N/A"` for missing artwork.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Poster {
    Url(String),
    Unavailable,
}

impl Poster {
    pub fn from_upstream(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() || raw.eq_ignore_ascii_case("N/A") {
            Poster::Unavailable
        } else {
            Poster::Url(raw.to_string())
        }
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            Poster::Url(url) => Some(url),
            Poster::Unavailable => None,
        }
    }
}

/// One catalog entry as returned by a search. Identity is `id` alone.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResultRecord {
    pub id: String,
    pub title: String,
    pub year: String,
    pub poster: Poster,
    pub kind: String,
}

/// One page of search results.
///
/// `total_available` is the count shown to the user; for genre-filtered pages
/// it is the post-filter count. Pagination runs on `upstream_total` and
/// `upstream_len`, the unfiltered numbers the page was cut from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub page_number: u32,
    pub records: Vec<ResultRecord>,
    pub total_available: u32,
    pub upstream_total: u32,
    pub upstream_len: usize,
}

impl Page {
    /// An unfiltered page straight from the upstream search.
    pub fn new(page_number: u32, records: Vec<ResultRecord>, total_available: u32) -> Self {
        let upstream_len = records.len();
        Self {
            page_number,
            records,
            total_available,
            upstream_total: total_available,
            upstream_len,
        }
    }

    /// Page reporting no matches at all.
    pub fn empty(page_number: u32) -> Self {
        Self::new(page_number, Vec::new(), 0)
    }

    /// Replaces the records with a filtered subset, correcting `total_available`.
    pub fn filtered(self, records: Vec<ResultRecord>) -> Self {
        Self {
            total_available: u32::try_from(records.len()).unwrap_or(u32::MAX),
            records,
            ..self
        }
    }
}

/// Full record from a detail lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDetail {
    pub id: String,
    pub title: String,
    pub year: String,
    pub kind: String,
    pub genre: String,
    pub runtime: Option<String>,
    pub released: Option<String>,
    pub director: Option<String>,
    pub actors: Option<String>,
    pub plot: Option<String>,
    pub rating: Option<String>,
    pub poster: Poster,
}

impl RecordDetail {
    /// Case-insensitive substring match against the comma-separated genre list.
    pub fn matches_genre(&self, wanted: &str) -> bool {
        let wanted = wanted.trim().to_lowercase();
        !wanted.is_empty() && self.genre.to_lowercase().contains(&wanted)
    }
}
