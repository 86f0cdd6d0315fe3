//! Composite sort specification
//!
//! Relevance score is always the primary sort key, descending. Caller
//! fields are secondary: compared ascending as strings, in caller order,
//! and only ever break score ties.

use tantivy::schema::{Schema, Value};
use tantivy::{DocAddress, Score, Searcher, TantivyDocument};

use crate::error::SearchResult;

/// Ordered sort keys for one search call.
///
/// The synthetic relevance key is implicit and always first; `keys`
/// holds only the caller-named fields. A key naming a field that is
/// missing, unstored, or absent from the schema compares as the empty
/// string, which sorts first.
#[derive(Debug, Clone, Default)]
pub struct SortSpec {
    keys: Vec<String>,
}

impl SortSpec {
    /// Build a spec from caller sort field names
    #[must_use]
    pub fn new(keys: Vec<String>) -> Self {
        Self { keys }
    }

    /// Returns `true` when only the relevance key applies
    #[must_use]
    pub fn is_relevance_only(&self) -> bool {
        self.keys.is_empty()
    }

    /// The caller-named secondary keys
    #[must_use]
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Re-rank a score-ordered hit list by the composite sort.
    ///
    /// With no secondary keys the engine's score-descending order is
    /// kept as-is. Otherwise each hit's key strings are resolved from
    /// its stored document and ties are broken ascending, key by key.
    /// The sort is stable, so hits equal on every key keep engine order.
    ///
    /// # Errors
    ///
    /// Propagates engine failures from resolving a hit's stored
    /// document within the snapshot.
    pub fn apply(
        &self,
        searcher: &Searcher,
        hits: Vec<(Score, DocAddress)>,
    ) -> SearchResult<Vec<(Score, DocAddress)>> {
        if self.is_relevance_only() {
            return Ok(hits);
        }

        let schema = searcher.schema();
        let mut decorated: Vec<(Score, Vec<String>, DocAddress)> = Vec::with_capacity(hits.len());
        for (score, address) in hits {
            let doc: TantivyDocument = searcher.doc(address)?;
            let keys = self
                .keys
                .iter()
                .map(|name| stored_key(&doc, schema, name))
                .collect();
            decorated.push((score, keys, address));
        }

        decorated.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(&b.1)));

        Ok(decorated
            .into_iter()
            .map(|(score, _, address)| (score, address))
            .collect())
    }
}

/// Resolve one sort-key string from a stored document
fn stored_key(doc: &TantivyDocument, schema: &Schema, name: &str) -> String {
    let Ok(field) = schema.get_field(name) else {
        return String::new();
    };
    doc.get_first(field).map_or_else(String::new, value_as_key)
}

fn value_as_key<'a, V: Value<'a>>(value: V) -> String {
    if let Some(s) = value.as_str() {
        s.to_owned()
    } else if let Some(v) = value.as_u64() {
        v.to_string()
    } else if let Some(v) = value.as_i64() {
        v.to_string()
    } else if let Some(v) = value.as_f64() {
        v.to_string()
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tantivy::Index;
    use tantivy::collector::TopDocs;
    use tantivy::doc;
    use tantivy::query::AllQuery;
    use tantivy::schema::{OwnedValue, STORED, SchemaBuilder, TEXT};

    fn setup_index(titles: &[&str]) -> Index {
        let mut builder = SchemaBuilder::new();
        let title = builder.add_text_field("title", TEXT | STORED);
        let body = builder.add_text_field("body", TEXT | STORED);
        let schema = builder.build();
        let index = Index::create_in_ram(schema);

        let mut writer = index.writer(15_000_000).unwrap();
        for t in titles {
            writer
                .add_document(doc!(title => *t, body => "identical body text"))
                .unwrap();
        }
        writer.commit().unwrap();
        index
    }

    fn titles_in_order(index: &Index, spec: &SortSpec) -> Vec<String> {
        let searcher = index.reader().unwrap().searcher();
        // AllQuery scores every document identically, so every hit ties
        // on relevance and only the secondary keys decide the order.
        let hits = searcher.search(&AllQuery, &TopDocs::with_limit(10)).unwrap();
        let ranked = spec.apply(&searcher, hits).unwrap();
        let schema = searcher.schema();
        ranked
            .into_iter()
            .map(|(_, addr)| {
                let doc: TantivyDocument = searcher.doc(addr).unwrap();
                stored_key(&doc, schema, "title")
            })
            .collect()
    }

    #[test]
    fn relevance_only_keeps_engine_order() {
        let index = setup_index(&["charlie", "alpha", "bravo"]);
        let searcher = index.reader().unwrap().searcher();
        let hits = searcher.search(&AllQuery, &TopDocs::with_limit(10)).unwrap();
        let spec = SortSpec::default();
        assert!(spec.is_relevance_only());
        let ranked = spec.apply(&searcher, hits.clone()).unwrap();
        assert_eq!(ranked, hits);
    }

    #[test]
    fn ties_broken_ascending_by_key() {
        let index = setup_index(&["charlie", "alpha", "bravo"]);
        let spec = SortSpec::new(vec!["title".to_string()]);
        assert_eq!(titles_in_order(&index, &spec), vec!["alpha", "bravo", "charlie"]);
    }

    #[test]
    fn missing_key_field_sorts_first() {
        let index = setup_index(&["zulu", "alpha"]);
        // Unknown field: every key is empty, stable sort keeps engine order.
        let spec = SortSpec::new(vec!["no_such_field".to_string()]);
        let searcher = index.reader().unwrap().searcher();
        let hits = searcher.search(&AllQuery, &TopDocs::with_limit(10)).unwrap();
        let ranked = spec.apply(&searcher, hits.clone()).unwrap();
        assert_eq!(ranked, hits);
    }

    #[test]
    fn multiple_keys_compare_in_order() {
        let mut builder = SchemaBuilder::new();
        let category = builder.add_text_field("category", TEXT | STORED);
        let title = builder.add_text_field("title", TEXT | STORED);
        let body = builder.add_text_field("body", TEXT | STORED);
        let schema = builder.build();
        let index = Index::create_in_ram(schema);

        let mut writer = index.writer(15_000_000).unwrap();
        for (c, t) in [("b", "x"), ("a", "y"), ("a", "x")] {
            writer
                .add_document(doc!(category => c, title => t, body => "same"))
                .unwrap();
        }
        writer.commit().unwrap();

        let spec = SortSpec::new(vec!["category".to_string(), "title".to_string()]);
        let searcher = index.reader().unwrap().searcher();
        let hits = searcher.search(&AllQuery, &TopDocs::with_limit(10)).unwrap();
        let ranked = spec.apply(&searcher, hits).unwrap();

        let keys: Vec<(String, String)> = ranked
            .into_iter()
            .map(|(_, addr)| {
                let doc: TantivyDocument = searcher.doc(addr).unwrap();
                (
                    stored_key(&doc, searcher.schema(), "category"),
                    stored_key(&doc, searcher.schema(), "title"),
                )
            })
            .collect();
        assert_eq!(
            keys,
            vec![
                ("a".to_string(), "x".to_string()),
                ("a".to_string(), "y".to_string()),
                ("b".to_string(), "x".to_string()),
            ]
        );
    }

    #[test]
    fn numeric_stored_values_compare_as_strings() {
        assert_eq!(value_as_key(&OwnedValue::U64(10)), "10");
        assert_eq!(value_as_key(&OwnedValue::I64(-3)), "-3");
        assert_eq!(value_as_key(&OwnedValue::Str("abc".into())), "abc");
    }
}
