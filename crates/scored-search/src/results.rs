//! Search result models
//!
//! [`SearchResult`] pairs a matched document with its relevance score;
//! [`SearchResultCollection`] is the ranked page handed back to the
//! caller, with the pre-pagination hit count and the elapsed wall time.

use serde::{Deserialize, Serialize};

use crate::document::SearchDocument;

/// One matched document with its engine relevance score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Engine-computed relevance; higher is more relevant
    pub score: f32,
    /// The document's stored field data
    pub document: SearchDocument,
}

/// Ranked, paginated, timed result set for one search call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResultCollection {
    /// Results in ranked order, after pagination and type filtering
    pub results: Vec<SearchResult>,
    /// Hits the bounded execution returned, counted before skip/take and
    /// before the type filter
    pub total_hits: usize,
    /// Wall time of the whole search call in milliseconds
    pub elapsed_ms: u64,
}

impl SearchResultCollection {
    /// Number of results in this page
    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Returns `true` if this page holds no results
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Iterate over the ranked results
    pub fn iter(&self) -> std::slice::Iter<'_, SearchResult> {
        self.results.iter()
    }
}

impl IntoIterator for SearchResultCollection {
    type Item = SearchResult;
    type IntoIter = std::vec::IntoIter<SearchResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}

impl<'a> IntoIterator for &'a SearchResultCollection {
    type Item = &'a SearchResult;
    type IntoIter = std::slice::Iter<'a, SearchResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}
