//! In-memory tabular data shared by every conversion direction

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Ordered sequence of row objects.
///
/// Rows are kept exactly as they were parsed or decoded. Column order for
/// rendering and encoding is taken from the keys of the first row only;
/// keys that appear only in later rows are not rendered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowSet(Vec<Value>);

impl RowSet {
    pub fn new(rows: Vec<Value>) -> Self {
        Self(rows)
    }

    /// Build a row set from flat objects
    pub fn from_objects(rows: Vec<Map<String, Value>>) -> Self {
        Self(rows.into_iter().map(Value::Object).collect())
    }

    pub fn record_count(&self) -> usize {
        self.0.len()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn rows(&self) -> &[Value] {
        &self.0
    }

    /// Column names in the key order of the first row
    pub fn headers(&self) -> Vec<String> {
        match self.0.first() {
            Some(Value::Object(first)) => first.keys().cloned().collect(),
            _ => Vec::new(),
        }
    }

    /// Value of `key` in row `index`, `None` when the row lacks it
    pub fn cell(&self, index: usize, key: &str) -> Option<&Value> {
        self.0.get(index)?.as_object()?.get(key)
    }

    /// Iterate rows as cells aligned to `headers()`
    pub fn aligned_rows(&self) -> impl Iterator<Item = Vec<Option<&Value>>> + '_ {
        let headers = self.headers();
        self.0.iter().map(move |row| {
            let object = row.as_object();
            headers
                .iter()
                .map(|key| object.and_then(|o| o.get(key)))
                .collect()
        })
    }
}

impl From<Vec<Value>> for RowSet {
    fn from(rows: Vec<Value>) -> Self {
        Self(rows)
    }
}
