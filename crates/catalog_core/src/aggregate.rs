use std::collections::HashSet;

use crate::{Page, ResultRecord};

/// Counts reported by a single merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MergeOutcome {
    pub added: usize,
    pub duplicates: usize,
}

/// Ordered, id-unique accumulation of records across pages.
///
/// Page 1 replaces the aggregate; later pages append only unseen ids, in
/// arrival order. No two records ever share an id.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultAggregator {
    records: Vec<ResultRecord>,
    seen: HashSet<String>,
}

impl ResultAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn merge(&mut self, page: Page) -> MergeOutcome {
        if page.page_number <= 1 {
            self.clear();
        }

        let mut outcome = MergeOutcome::default();
        for record in page.records {
            if self.seen.insert(record.id.clone()) {
                self.records.push(record);
                outcome.added += 1;
            } else {
                outcome.duplicates += 1;
            }
        }
        outcome
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.seen.clear();
    }

    pub fn records(&self) -> &[ResultRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Poster;

    fn record(id: &str) -> ResultRecord {
        ResultRecord {
            id: id.to_string(),
            title: format!("Title {id}"),
            year: "2000".to_string(),
            poster: Poster::Unavailable,
            kind: "movie".to_string(),
        }
    }

    fn page(number: u32, ids: &[&str]) -> Page {
        Page::new(number, ids.iter().map(|id| record(id)).collect(), 100)
    }

    fn ids(aggregator: &ResultAggregator) -> Vec<&str> {
        aggregator.records().iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn later_pages_append_only_unseen_ids() {
        let mut aggregator = ResultAggregator::new();
        aggregator.merge(page(1, &["a", "b", "c"]));
        let outcome = aggregator.merge(page(2, &["c", "d", "a", "e"]));

        assert_eq!(outcome, MergeOutcome { added: 2, duplicates: 2 });
        assert_eq!(ids(&aggregator), vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn first_page_replaces_outright() {
        let mut aggregator = ResultAggregator::new();
        aggregator.merge(page(1, &["a", "b"]));
        aggregator.merge(page(2, &["c"]));
        aggregator.merge(page(1, &["x", "a"]));

        assert_eq!(ids(&aggregator), vec!["x", "a"]);
        assert_eq!(aggregator.merge(page(2, &["c"])).added, 1);
    }

    #[test]
    fn duplicates_inside_one_page_are_absorbed() {
        let mut aggregator = ResultAggregator::new();
        let outcome = aggregator.merge(page(1, &["a", "a", "b"]));
        assert_eq!(outcome.duplicates, 1);
        assert_eq!(aggregator.len(), 2);
    }

    #[test]
    fn identity_ignores_other_fields() {
        let mut aggregator = ResultAggregator::new();
        aggregator.merge(page(1, &["a"]));
        let mut renamed = record("a");
        renamed.title = "Different".to_string();
        aggregator.merge(Page::new(2, vec![renamed], 2));

        assert_eq!(aggregator.len(), 1);
        assert_eq!(aggregator.records()[0].title, "Title a");
    }
}
