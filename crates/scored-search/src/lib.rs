//! Weighted, fuzzy, paginated query facade over a Tantivy index
//!
//! This crate is the query construction and result-shaping layer for a
//! pre-built, read-only-at-query-time inverted index:
//! - [`SearchOptions`] — keywords, target fields, per-field boosts, type
//!   filter, sort keys, hit bound, skip/take
//! - [`ScoredSearcher`] — the entry point: builds the query (full-grammar
//!   single-field parse, or typo-tolerant multi-field conjunction with
//!   boosts), executes it against a per-call snapshot, sorts by relevance
//!   plus caller fields, paginates, filters by type, stamps elapsed time
//! - [`SearchResultCollection`] / [`SearchResult`] — the ranked, timed
//!   result shape
//!
//! A malformed query is retried exactly once with its special syntax
//! escaped; all other failures propagate to the caller unchanged. Index
//! construction, analyzer internals, and index maintenance live outside
//! this crate.
//!
//! ```no_run
//! use scored_search::{ScoredSearcher, SearchOptions};
//!
//! # fn main() -> scored_search::SearchResult<()> {
//! let searcher = ScoredSearcher::open_in_dir("/var/lib/app/index")?;
//! let options = SearchOptions::new("rust serch", "title,body")
//!     .with_boost("title", 2.0)
//!     .with_take(10);
//! let page = searcher.scored_search(&options)?;
//! for hit in &page {
//!     println!("{:.3} {:?}", hit.score, hit.document.get_first_str("title"));
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod document;
pub mod error;
pub mod options;
pub mod query;
pub mod results;
pub mod searcher;
pub mod sort;

pub use document::{SearchDocument, TYPE_FIELD};
pub use error::{SearchError, SearchResult};
pub use options::SearchOptions;
pub use query::{build_query, escape_keywords};
pub use results::{SearchResult as ScoredHit, SearchResultCollection};
pub use searcher::ScoredSearcher;
pub use sort::SortSpec;
