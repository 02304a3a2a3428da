//! # Documents and exact-match filters
//!
//! The storage layer is schemaless: a [`Document`] is a flat JSON object and
//! a collection is an ordered list of them. [`Filter`] is the only query
//! form — a set of `key == value` clauses, all of which must hold.
//!
//! The remote and proxy backends may be capable of richer queries, but
//! exact match is the contract callers rely on, and it is the semantics the
//! local mock implements. Any new backend must preserve it.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A schemaless record stored in a collection.
pub type Document = serde_json::Map<String, Value>;

/// An exact-match filter over document fields.
///
/// A document matches when every filter key is present in the document with
/// an exactly equal value. No operators, no partial or regex matching. The
/// empty filter matches every document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Filter(Document);

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a clause requiring `key` to equal `value`.
    pub fn eq(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    /// Whether `doc` satisfies every clause of this filter.
    pub fn matches(&self, doc: &Document) -> bool {
        self.0.iter().all(|(key, value)| doc.get(key) == Some(value))
    }

    /// The underlying clause map, e.g. for serializing into a wire query.
    pub fn as_map(&self) -> &Document {
        &self.0
    }
}

impl From<Document> for Filter {
    fn from(clauses: Document) -> Self {
        Self(clauses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn matches_on_equal_values() {
        let user = doc(json!({"email": "a@x.com", "password": "p1", "name": "Ada"}));
        assert!(Filter::new().eq("email", "a@x.com").matches(&user));
        assert!(Filter::new()
            .eq("email", "a@x.com")
            .eq("password", "p1")
            .matches(&user));
    }

    #[test]
    fn rejects_unequal_or_missing_keys() {
        let user = doc(json!({"email": "a@x.com"}));
        assert!(!Filter::new().eq("email", "b@x.com").matches(&user));
        assert!(!Filter::new().eq("phone", "5551234567").matches(&user));
    }

    #[test]
    fn extra_document_keys_are_irrelevant() {
        let user = doc(json!({"email": "a@x.com", "name": "Ada", "phone": "555"}));
        assert!(Filter::new().eq("email", "a@x.com").matches(&user));
    }

    #[test]
    fn empty_filter_matches_everything() {
        assert!(Filter::new().matches(&doc(json!({"anything": 1}))));
        assert!(Filter::new().matches(&Document::new()));
    }

    #[test]
    fn values_compare_exactly_not_structurally() {
        let user = doc(json!({"age": 30}));
        assert!(Filter::new().eq("age", 30).matches(&user));
        assert!(!Filter::new().eq("age", "30").matches(&user));
    }
}
