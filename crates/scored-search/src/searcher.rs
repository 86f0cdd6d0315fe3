//! Scored search orchestration
//!
//! [`ScoredSearcher`] ties the pieces together per call: build the query
//! (single-field parse or multi-field fuzzy conjunction), acquire a
//! point-in-time snapshot, execute bounded by `max_hits` under the
//! composite sort, count total hits, apply skip/take, filter by document
//! type, and stamp elapsed time. A parse failure is retried exactly once
//! with escaped keywords; everything else propagates verbatim.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Instant;

use tantivy::collector::TopDocs;
use tantivy::tokenizer::TextAnalyzer;
use tantivy::{Index, IndexReader, TantivyDocument};
use tracing::debug;

use crate::document::SearchDocument;
use crate::error::{SearchError, SearchResult};
use crate::options::SearchOptions;
use crate::query::{build_query, escape_keywords};
use crate::results::{SearchResult as SearchHit, SearchResultCollection};
use crate::sort::SortSpec;

/// Query facade over one Tantivy index.
///
/// The index handle and any registered analyzer are fixed at
/// construction and read-only afterwards, so one `ScoredSearcher` can
/// serve unboundedly many concurrent calls. Each call takes its own
/// snapshot via [`IndexReader::searcher`] and never shares it.
pub struct ScoredSearcher {
    index: Index,
    reader: IndexReader,
}

impl ScoredSearcher {
    /// Create a facade over an already-opened index.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Engine`] if the index reader cannot be
    /// created.
    pub fn new(index: Index) -> SearchResult<Self> {
        let reader = index.reader()?;
        Ok(Self { index, reader })
    }

    /// Create a facade, registering `analyzer` under `name` first.
    ///
    /// The analyzer must be registered under the tokenizer name the
    /// index schema declares for its text fields; query parsing then
    /// tokenizes exactly as indexing did. The facade never inspects the
    /// analyzer, it only passes it through to the registry.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Engine`] if the index reader cannot be
    /// created.
    pub fn with_analyzer(index: Index, name: &str, analyzer: TextAnalyzer) -> SearchResult<Self> {
        index.tokenizers().register(name, analyzer);
        Self::new(index)
    }

    /// Open the index stored in `path` and create a facade over it.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Engine`] if the directory does not hold a
    /// readable index.
    pub fn open_in_dir(path: impl AsRef<Path>) -> SearchResult<Self> {
        let index = Index::open_in_dir(path)?;
        Self::new(index)
    }

    /// The underlying index handle
    #[must_use]
    pub const fn index(&self) -> &Index {
        &self.index
    }

    /// Run a weighted, scored search.
    ///
    /// The type filter runs strictly after the skip/take window, so a
    /// filtered page can hold fewer than `take` results; `total_hits`
    /// always reflects the bounded execution before pagination and
    /// filtering.
    ///
    /// # Errors
    ///
    /// [`SearchError::InvalidOptions`] for an invalid request;
    /// [`SearchError::InvalidQuery`] when both the raw and the escaped
    /// parse fail; any engine failure propagates unretried.
    pub fn scored_search(&self, options: &SearchOptions) -> SearchResult<SearchResultCollection> {
        options.validate()?;
        let started = Instant::now();

        let outcome = match self.perform_search(options, false) {
            Err(e) if e.is_parse() => {
                debug!(error = %e, "raw parse failed, retrying with escaped keywords");
                self.perform_search(options, true)
            }
            other => other,
        };

        let mut collection = outcome?;
        collection.elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        debug!(
            total_hits = collection.total_hits,
            returned = collection.len(),
            elapsed_ms = collection.elapsed_ms,
            "search complete"
        );
        Ok(collection)
    }

    /// Convenience overload: build [`SearchOptions`] from loose
    /// arguments (`fields` and `order_by` are comma-separated lists)
    /// and delegate to [`Self::scored_search`].
    ///
    /// # Errors
    ///
    /// Same contract as [`Self::scored_search`].
    #[allow(clippy::too_many_arguments)]
    pub fn scored_search_with(
        &self,
        keywords: &str,
        fields: &str,
        max_hits: usize,
        boosts: BTreeMap<String, f32>,
        doc_type: Option<String>,
        order_by: &str,
        skip: Option<usize>,
        take: Option<usize>,
    ) -> SearchResult<SearchResultCollection> {
        let mut options = SearchOptions::new(keywords, fields)
            .with_boosts(boosts)
            .with_max_hits(max_hits);
        options.doc_type = doc_type;
        options.order_by = order_by
            .split(',')
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(ToOwned::to_owned)
            .collect();
        options.skip = skip;
        options.take = take;
        self.scored_search(&options)
    }

    /// Single-result convenience: bounds the search to one hit and
    /// returns its document, or `None` when nothing matched.
    ///
    /// # Errors
    ///
    /// Same contract as [`Self::scored_search`].
    pub fn scored_search_single(
        &self,
        options: &SearchOptions,
    ) -> SearchResult<Option<SearchDocument>> {
        let mut single = options.clone();
        single.max_hits = 1;
        let collection = self.scored_search(&single)?;
        Ok(collection.into_iter().next().map(|hit| hit.document))
    }

    /// One build-and-execute attempt against a fresh snapshot
    fn perform_search(
        &self,
        options: &SearchOptions,
        escaped: bool,
    ) -> SearchResult<SearchResultCollection> {
        let keywords = if escaped {
            escape_keywords(&options.keywords)
        } else {
            options.keywords.clone()
        };
        let query = build_query(&self.index, &keywords, options)?;

        // Per-call snapshot; dropped (and its resources released) on
        // every exit path below.
        let searcher = self.reader.searcher();

        let hits = searcher.search(&*query, &TopDocs::with_limit(options.max_hits))?;
        let ranked = SortSpec::new(options.order_by.clone()).apply(&searcher, hits)?;
        let total_hits = ranked.len();

        let windowed = ranked.into_iter().skip(options.skip.unwrap_or(0));
        let windowed: Vec<_> = match options.take {
            Some(take) => windowed.take(take).collect(),
            None => windowed.collect(),
        };

        let schema = searcher.schema();
        let mut results = Vec::with_capacity(windowed.len());
        for (score, address) in windowed {
            let doc: TantivyDocument = searcher.doc(address).map_err(|e| {
                SearchError::DocumentNotFound(format!(
                    "segment {} doc {}: {e}",
                    address.segment_ord, address.doc_id
                ))
            })?;
            let document = SearchDocument::from_stored(&doc, schema);
            if let Some(wanted) = &options.doc_type {
                if document.doc_type() != Some(wanted.as_str()) {
                    continue;
                }
            }
            results.push(SearchHit { score, document });
        }

        Ok(SearchResultCollection {
            results,
            total_hits,
            elapsed_ms: 0,
        })
    }
}
