//! Search request model
//!
//! [`SearchOptions`] is the caller's full request: keywords, target
//! fields with optional per-field boosts, an optional document-type
//! filter, secondary sort keys, a hit bound, and skip/take pagination.
//! Constructed per call and immutable afterwards.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{SearchError, SearchResult};

const fn default_max_hits() -> usize {
    1000
}

/// Options for a single scored search call.
///
/// The number of entries in `fields` selects the query strategy: one
/// field keeps the full parser grammar, several fields switch to the
/// typo-tolerant per-term conjunction with boosts applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchOptions {
    /// Raw keyword input
    pub keywords: String,
    /// Fields to search, in caller order (must be non-empty)
    pub fields: Vec<String>,
    /// Per-field boost weights, applied only on the multi-field path.
    /// Key-ordered so boost application is deterministic.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub boosts: BTreeMap<String, f32>,
    /// Keep only documents whose stored `doc_type` field equals this
    /// fully-qualified type string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<String>,
    /// Secondary sort fields, compared as strings after relevance
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub order_by: Vec<String>,
    /// Upper bound on hits the engine considers
    #[serde(default = "default_max_hits")]
    pub max_hits: usize,
    /// Leading ranked hits to discard
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip: Option<usize>,
    /// Maximum hits to keep after `skip`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub take: Option<usize>,
}

impl SearchOptions {
    /// Create options for `keywords` over a comma-separated field list
    /// (`"title,body"`). Whitespace around names is trimmed, empty
    /// entries dropped.
    #[must_use]
    pub fn new(keywords: impl Into<String>, fields: &str) -> Self {
        Self {
            keywords: keywords.into(),
            fields: fields
                .split(',')
                .map(str::trim)
                .filter(|f| !f.is_empty())
                .map(ToOwned::to_owned)
                .collect(),
            boosts: BTreeMap::new(),
            doc_type: None,
            order_by: Vec::new(),
            max_hits: default_max_hits(),
            skip: None,
            take: None,
        }
    }

    /// Set per-field boost weights
    #[must_use]
    pub fn with_boosts(mut self, boosts: BTreeMap<String, f32>) -> Self {
        self.boosts = boosts;
        self
    }

    /// Set a single field's boost weight
    #[must_use]
    pub fn with_boost(mut self, field: impl Into<String>, boost: f32) -> Self {
        self.boosts.insert(field.into(), boost);
        self
    }

    /// Keep only documents of the given type
    #[must_use]
    pub fn with_doc_type(mut self, doc_type: impl Into<String>) -> Self {
        self.doc_type = Some(doc_type.into());
        self
    }

    /// Append a secondary sort field
    #[must_use]
    pub fn with_order_by(mut self, field: impl Into<String>) -> Self {
        self.order_by.push(field.into());
        self
    }

    /// Set the engine hit bound
    #[must_use]
    pub const fn with_max_hits(mut self, max_hits: usize) -> Self {
        self.max_hits = max_hits;
        self
    }

    /// Set the number of leading hits to skip
    #[must_use]
    pub const fn with_skip(mut self, skip: usize) -> Self {
        self.skip = Some(skip);
        self
    }

    /// Set the maximum hits to take after skipping
    #[must_use]
    pub const fn with_take(mut self, take: usize) -> Self {
        self.take = Some(take);
        self
    }

    /// Validate the request before any query work.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidOptions`] when the field list is
    /// empty, `max_hits` is zero, or any boost is not strictly positive.
    pub fn validate(&self) -> SearchResult<()> {
        if self.fields.is_empty() {
            return Err(SearchError::InvalidOptions(
                "at least one search field is required".into(),
            ));
        }
        if self.max_hits == 0 {
            return Err(SearchError::InvalidOptions(
                "max_hits must be at least 1".into(),
            ));
        }
        for (field, boost) in &self.boosts {
            if !boost.is_finite() || *boost <= 0.0 {
                return Err(SearchError::InvalidOptions(format!(
                    "boost for field '{field}' must be a positive finite number, got {boost}"
                )));
            }
        }
        Ok(())
    }
}
