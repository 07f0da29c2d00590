// ElasChat - core/filter.rs
//
// Case-insensitive substring search over arbitrary records.
// Fields are OR-combined: a record matches when any selected field
// contains the query. Results keep input order.
// Core layer: pure logic, no I/O.

use std::fmt;

/// Selects searchable text from a record.
pub enum Field<'a, R> {
    /// A single text field.
    Text(fn(&R) -> &str),

    /// A list field; matches when any element matches (e.g. hashtags).
    List(fn(&R) -> &[String]),

    /// Text computed per record, possibly from data outside it
    /// (e.g. the display name of a chat's participant).
    Derived(&'a dyn Fn(&R) -> String),
}

impl<R> Clone for Field<'_, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for Field<'_, R> {}

impl<R> Field<'_, R> {
    /// True if this field of `record` contains `needle` (already lower-cased).
    fn contains(&self, record: &R, needle: &str) -> bool {
        match self {
            Field::Text(select) => select(record).to_lowercase().contains(needle),
            Field::List(select) => select(record)
                .iter()
                .any(|value| value.to_lowercase().contains(needle)),
            Field::Derived(select) => select(record).to_lowercase().contains(needle),
        }
    }
}

/// A text search bound to a fixed set of fields.
pub struct TextSearch<'a, R> {
    /// Query as typed. Empty = no filter.
    query: String,

    /// Lower-cased query used for matching.
    needle: String,

    fields: Vec<Field<'a, R>>,
}

impl<'a, R> TextSearch<'a, R> {
    /// Create a search over `fields` with an empty query.
    pub fn new(fields: Vec<Field<'a, R>>) -> Self {
        Self {
            query: String::new(),
            needle: String::new(),
            fields,
        }
    }

    /// Builder form of `set_query`.
    pub fn with_query(mut self, query: &str) -> Self {
        self.set_query(query);
        self
    }

    /// Replace the query text.
    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.needle = query.to_lowercase();
    }

    /// The query as typed.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Returns true if no query is active (every record passes).
    pub fn is_empty(&self) -> bool {
        self.query.is_empty()
    }

    /// Check a single record against the query.
    pub fn matches(&self, record: &R) -> bool {
        self.is_empty()
            || self
                .fields
                .iter()
                .any(|field| field.contains(record, &self.needle))
    }

    /// Indices of matching records, in input order.
    pub fn apply(&self, records: &[R]) -> Vec<usize> {
        if self.is_empty() {
            return (0..records.len()).collect();
        }

        records
            .iter()
            .enumerate()
            .filter(|(_, record)| self.matches(record))
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Matching records, in input order.
    pub fn filter<'r>(&self, records: &'r [R]) -> Vec<&'r R> {
        records.iter().filter(|record| self.matches(record)).collect()
    }
}

impl<R> fmt::Debug for TextSearch<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextSearch")
            .field("query", &self.query)
            .field("fields", &self.fields.len())
            .finish()
    }
}

/// Indices of `records` matching `query` in any of `fields`.
pub fn matching_indices<R>(records: &[R], query: &str, fields: &[Field<'_, R>]) -> Vec<usize> {
    TextSearch::new(fields.to_vec()).with_query(query).apply(records)
}

/// Records matching `query` in any of `fields`, in input order.
///
/// An empty query returns every record; an empty field list returns none.
pub fn filter_records<'r, R>(
    records: &'r [R],
    query: &str,
    fields: &[Field<'_, R>],
) -> Vec<&'r R> {
    TextSearch::new(fields.to_vec()).with_query(query).filter(records)
}
