//! Rectangular grid of cell strings.

use crate::error::{Error, Result};
use serde::Serialize;

/// A rectangular grid of strings loaded from delimited text.
///
/// Every row has the same length: the widest source row. Shorter rows are
/// right-padded with empty strings when the grid is built, so the invariant
/// holds for every `Grid` value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grid {
    rows: Vec<Vec<String>>,
    columns: usize,
}

impl Grid {
    /// Build a grid from ragged rows, padding short rows on the right.
    ///
    /// Fails with [`Error::EmptyInput`] when there are no rows, and with
    /// [`Error::InvalidTableSize`] when every row has zero fields.
    pub fn from_rows<R, S>(rows: impl IntoIterator<Item = R>) -> Result<Self>
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut rows: Vec<Vec<String>> = rows
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();

        let columns = rows
            .iter()
            .map(Vec::len)
            .max()
            .ok_or(Error::EmptyInput)?;

        if columns == 0 {
            return Err(Error::InvalidTableSize {
                rows: rows.len(),
                cols: 0,
            });
        }

        for row in &mut rows {
            row.resize(columns, String::new());
        }

        Ok(Self { rows, columns })
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns (identical for every row).
    pub fn column_count(&self) -> usize {
        self.columns
    }

    /// Get a cell value.
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }

    /// Get a row.
    pub fn row(&self, index: usize) -> Option<&[String]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// All rows in source order.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Iterate over `(row, col, value)` for every cell.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, &str)> {
        self.rows.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .map(move |(c, value)| (r, c, value.as_str()))
        })
    }
}
