//! Document-level types.

use super::Table;
use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A word-processing document.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Document {
    /// Document metadata (title, creator, dates)
    pub metadata: Metadata,

    /// Tables in body order
    pub tables: Vec<Table>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new table of empty cells and return it.
    ///
    /// Fails with [`crate::Error::InvalidTableSize`] when either dimension
    /// is zero; the document is left unchanged in that case.
    pub fn add_table(&mut self, rows: usize, cols: usize) -> Result<&mut Table> {
        let table = Table::new(rows, cols)?;
        self.tables.push(table);
        let index = self.tables.len() - 1;
        Ok(&mut self.tables[index])
    }

    /// Get the number of tables.
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    /// Get a table by index.
    pub fn table(&self, index: usize) -> Option<&Table> {
        self.tables.get(index)
    }

    /// Check if the document has no tables.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

/// Document metadata (`docProps/core.xml`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Metadata {
    /// Document title
    pub title: Option<String>,

    /// Creator (author) of the document
    pub creator: Option<String>,

    /// Creation date
    pub created: Option<DateTime<Utc>>,

    /// Last modification date
    pub modified: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_document_new() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert_eq!(doc.table_count(), 0);
        assert!(doc.metadata.title.is_none());
    }

    #[test]
    fn test_add_table() {
        let mut doc = Document::new();
        let table = doc.add_table(2, 3).unwrap();
        table.cell_mut(1, 2).unwrap().set_text("x");

        assert_eq!(doc.table_count(), 1);
        assert_eq!(doc.table(0).unwrap().cell(1, 2).unwrap().text, "x");
    }

    #[test]
    fn test_add_table_zero_size_leaves_document_unchanged() {
        let mut doc = Document::new();
        let result = doc.add_table(0, 0);
        assert!(matches!(result, Err(Error::InvalidTableSize { .. })));
        assert!(doc.is_empty());
    }
}
