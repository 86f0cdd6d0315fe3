//! Opaque stored-document representation
//!
//! The facade treats documents as a field-name → stored-values map and
//! reads exactly one reserved field, [`TYPE_FIELD`], for type filtering.
//! Everything else passes through untouched.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tantivy::TantivyDocument;
use tantivy::schema::{Document as _, OwnedValue, Schema};

/// Reserved stored field holding a document's fully-qualified type string
pub const TYPE_FIELD: &str = "doc_type";

/// A matched document's stored field data, keyed by field name.
///
/// Values are carried as JSON so callers stay decoupled from Tantivy's
/// value model. Multi-valued fields keep their stored order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchDocument {
    fields: BTreeMap<String, Vec<serde_json::Value>>,
}

fn owned_to_json(value: &OwnedValue) -> serde_json::Value {
    serde_json::to_value(value).unwrap_or(serde_json::Value::Null)
}

impl SearchDocument {
    /// Convert a retrieved Tantivy document into the opaque map form
    pub(crate) fn from_stored(doc: &TantivyDocument, schema: &Schema) -> Self {
        let named = doc.to_named_doc(schema);
        let fields = named
            .0
            .into_iter()
            .map(|(name, values)| (name, values.iter().map(owned_to_json).collect()))
            .collect();
        Self { fields }
    }

    /// All stored values for a field, or an empty slice if absent
    #[must_use]
    pub fn get_all(&self, field: &str) -> &[serde_json::Value] {
        self.fields.get(field).map_or(&[], Vec::as_slice)
    }

    /// First stored value for a field
    #[must_use]
    pub fn get_first(&self, field: &str) -> Option<&serde_json::Value> {
        self.fields.get(field).and_then(|values| values.first())
    }

    /// First stored value for a field, as a string
    #[must_use]
    pub fn get_first_str(&self, field: &str) -> Option<&str> {
        self.get_first(field).and_then(serde_json::Value::as_str)
    }

    /// The document's stored type discriminator, if any
    #[must_use]
    pub fn doc_type(&self) -> Option<&str> {
        self.get_first_str(TYPE_FIELD)
    }

    /// Field names present in this document
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    #[cfg(test)]
    pub(crate) fn from_map(fields: BTreeMap<String, Vec<serde_json::Value>>) -> Self {
        Self { fields }
    }
}
