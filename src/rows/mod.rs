pub mod resolver;
pub mod source;

pub use source::{CsvFileSource, CsvHttpSource, RowSource};

/// One unprocessed record from the listings sheet, keyed by column label.
/// Labels come straight from the header row and are NOT stable across
/// sheet edits; synonyms, stray whitespace and full-width characters all
/// happen in practice. The resolver (see `resolver`) is the only consumer
/// that should look values up by label.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    columns: Vec<(String, String)>,
}

impl RawRow {
    pub fn new(columns: Vec<(String, String)>) -> Self {
        Self { columns }
    }

    /// Exact-label lookup, first match in column order.
    pub fn get(&self, label: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|(k, _)| k == label)
            .map(|(_, v)| v.as_str())
    }

    /// Column order as it appeared in the sheet.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.columns.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.columns.iter().all(|(_, v)| v.trim().is_empty())
    }
}
