use crate::Query;

/// Emitted when a submitted query differs from the previous fingerprint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FingerprintChanged {
    pub previous: Option<Query>,
    pub current: Query,
}

/// Owner of the committed query.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryState {
    current: Option<Query>,
}

impl QueryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `query` and reports a change when it fails value equality with
    /// the previous one. Resubmitting an equal query is a no-op.
    pub fn set_query(&mut self, query: Query) -> Option<FingerprintChanged> {
        if self.current.as_ref() == Some(&query) {
            return None;
        }
        let previous = self.current.replace(query.clone());
        Some(FingerprintChanged {
            previous,
            current: query,
        })
    }

    pub fn current(&self) -> Option<&Query> {
        self.current.as_ref()
    }

    /// Committed query, or the baseline query before anything was committed.
    pub fn current_or_default(&self) -> Query {
        self.current.clone().unwrap_or_default()
    }
}
