//! Query construction
//!
//! Turns caller keywords into one executable Tantivy query:
//! - one search field — the raw keyword string goes through the full
//!   parser grammar (booleans, phrases, prefixes), no fuzzy expansion;
//! - several search fields — keywords split into whitespace terms, each
//!   term matched typo-tolerantly across every boosted field, all terms
//!   required (`Occur::Must` conjunction);
//! - [`escape_keywords`] neutralizes query-grammar syntax so a malformed
//!   query can be retried as literal text.

use std::sync::LazyLock;

use regex::Regex;
use tantivy::Index;
use tantivy::query::{BooleanQuery, Occur, Query, QueryParser};
use tantivy::schema::Field;

use crate::error::{SearchError, SearchResult};
use crate::options::SearchOptions;

/// Edit distance allowed on the multi-field path, per term
const FUZZY_DISTANCE: u8 = 2;

/// Transpositions count as one edit
const FUZZY_TRANSPOSE_COST_ONE: bool = true;

/// Words the parser treats as boolean operators (uppercase only)
const BOOLEAN_OPERATORS: &[&str] = &["AND", "OR", "NOT"];

/// Characters that are special to the query grammar
static SPECIAL_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[+\-!(){}\[\]^"~*?:\\/&|]"#).expect("special chars regex"));

/// Render keywords literal: strip grammar-special characters and
/// lowercase standalone boolean operator words.
///
/// Used for the one retry after a parse failure, so caller input that
/// happened to collide with query syntax still yields results.
#[must_use]
pub fn escape_keywords(keywords: &str) -> String {
    let stripped = SPECIAL_CHARS.replace_all(keywords, " ");
    stripped
        .split_whitespace()
        .map(|word| {
            if BOOLEAN_OPERATORS.contains(&word) {
                word.to_ascii_lowercase()
            } else {
                word.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Resolve caller field names against the index schema
fn resolve_fields(index: &Index, names: &[String]) -> SearchResult<Vec<Field>> {
    let schema = index.schema();
    names
        .iter()
        .map(|name| {
            schema
                .get_field(name)
                .map_err(|_| SearchError::UnknownField(name.clone()))
        })
        .collect()
}

/// Build the executable query for one search call.
///
/// `keywords` is passed separately from `options` so the orchestrator
/// can substitute the escaped form on retry without mutating the
/// caller's request.
///
/// # Errors
///
/// [`SearchError::UnknownField`] when a search field is absent from the
/// index schema; [`SearchError::InvalidQuery`] when the parser rejects
/// the keyword syntax.
pub fn build_query(
    index: &Index,
    keywords: &str,
    options: &SearchOptions,
) -> SearchResult<Box<dyn Query>> {
    let fields = resolve_fields(index, &options.fields)?;

    if let [field] = fields[..] {
        let parser = QueryParser::for_index(index, vec![field]);
        return parser
            .parse_query(keywords)
            .map_err(|e| SearchError::InvalidQuery(e.to_string()));
    }

    build_fuzzy_conjunction(index, keywords, options, &fields)
}

/// Multi-field path: one required fuzzy sub-query per whitespace term.
///
/// Any caller-embedded `~` suffix is stripped before the term gets the
/// facade's own tolerance, so double fuzzy operators never stack.
fn build_fuzzy_conjunction(
    index: &Index,
    keywords: &str,
    options: &SearchOptions,
    fields: &[Field],
) -> SearchResult<Box<dyn Query>> {
    let schema = index.schema();
    let mut parser = QueryParser::for_index(index, fields.to_vec());

    for field in fields {
        parser.set_field_fuzzy(*field, false, FUZZY_DISTANCE, FUZZY_TRANSPOSE_COST_ONE);
    }

    // Boosts naming fields outside the search list are ignored; the
    // key-ordered map keeps application deterministic.
    for (name, boost) in &options.boosts {
        if let Ok(field) = schema.get_field(name) {
            if fields.contains(&field) {
                parser.set_field_boost(field, *boost);
            }
        }
    }

    let mut clauses: Vec<(Occur, Box<dyn Query>)> = Vec::new();
    for term in keywords.split_whitespace() {
        let bare = term.trim_end_matches('~');
        if bare.is_empty() {
            continue;
        }
        let sub_query = parser
            .parse_query(bare)
            .map_err(|e| SearchError::InvalidQuery(e.to_string()))?;
        clauses.push((Occur::Must, sub_query));
    }

    Ok(Box::new(BooleanQuery::new(clauses)))
}
